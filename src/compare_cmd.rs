//! Compare command: test a solver output file against a reference.

use std::fs::File;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use naiad_compare::{CompareConfig, compare, to_json};
use naiad_output::OutputReader;

use crate::cli::CompareArgs;
use crate::config::NaiadConfig;

/// Run the comparison pipeline. Fails with a non-zero exit when any value
/// pair is outside tolerance.
pub fn run(args: CompareArgs) -> Result<()> {
    let _cmd = info_span!("compare").entered();

    // 1. Load optional TOML config
    let file_config = if let Some(ref config_path) = args.config {
        let toml_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;
        toml::from_str::<NaiadConfig>(&toml_str).context("failed to parse TOML config")?
    } else {
        NaiadConfig::default()
    };

    // 2. Merge CLI flags, which override config file tolerances
    let abs_tol = args.abs_tol.unwrap_or(file_config.compare.abs_tol);
    let rel_tol = args.rel_tol.unwrap_or(file_config.compare.rel_tol);
    let config = CompareConfig::new()
        .with_abs_tol(abs_tol)
        .with_rel_tol(rel_tol);

    // 3. Open both output files
    info!(
        test = %args.test.display(),
        reference = %args.reference.display(),
        abs_tol,
        rel_tol,
        "comparing output files"
    );
    let test_file = File::open(&args.test)
        .with_context(|| format!("failed to open test file: {}", args.test.display()))?;
    let mut test = OutputReader::open(test_file)
        .with_context(|| format!("failed to decode test file: {}", args.test.display()))?;

    let reference_file = File::open(&args.reference)
        .with_context(|| format!("failed to open reference file: {}", args.reference.display()))?;
    let mut reference = OutputReader::open(reference_file).with_context(|| {
        format!("failed to decode reference file: {}", args.reference.display())
    })?;

    // 4. Compare every result value
    let report = compare(&mut test, &mut reference, &config).context("comparison failed")?;

    // 5. Write the JSON report if requested
    if let Some(ref path) = args.output {
        let json = to_json(&report).context("failed to serialize report")?;
        std::fs::write(path, &json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    // 6. Print the verdict
    if report.passed() {
        println!(
            "PASSED: all {} values within tolerance",
            report.values_compared
        );
        return Ok(());
    }

    println!(
        "FAILED: {} of {} values outside tolerance",
        report.failures, report.values_compared
    );
    if let Some(ref worst) = report.worst {
        println!(
            "  largest difference: {} {} {} at period {} ({})",
            worst.element, worst.id, worst.attribute_name, worst.period, worst.time
        );
        println!("    test value:      {}", worst.test_value);
        println!("    reference value: {}", worst.reference_value);
        println!("    difference:      {}", worst.difference);
    }
    bail!(
        "{} of {} values outside tolerance",
        report.failures,
        report.values_compared
    );
}
