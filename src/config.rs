use serde::Deserialize;

/// Top-level naiad configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct NaiadConfig {
    /// Comparison settings.
    #[serde(default)]
    pub compare: CompareToml,
}

/// Tolerances for the `compare` subcommand. Both default to zero, which
/// demands exact agreement between the files.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CompareToml {
    #[serde(default)]
    pub abs_tol: f64,
    #[serde(default)]
    pub rel_tol: f64,
}
