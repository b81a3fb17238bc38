//! Comparison report structures and JSON rendering.

use naiad_output::ElementKind;
use serde::Serialize;

use crate::error::CompareError;

/// Node attribute labels, in recorded order.
pub const NODE_ATTRIBUTE_NAMES: [&str; 4] = ["Demand", "Head", "Pressure", "Quality"];

/// Link attribute labels, in recorded order.
pub const LINK_ATTRIBUTE_NAMES: [&str; 8] = [
    "Flow",
    "Velocity",
    "Head Loss",
    "Quality",
    "Status",
    "Setting",
    "Reaction Rate",
    "Friction Factor",
];

/// Label for one attribute of one element kind.
///
/// # Panics
/// Panics when `attribute` is not a valid index for the kind.
pub fn attribute_name(element: ElementKind, attribute: usize) -> &'static str {
    match element {
        ElementKind::Node => NODE_ATTRIBUTE_NAMES[attribute],
        ElementKind::Link => LINK_ATTRIBUTE_NAMES[attribute],
    }
}

/// Clock time of a reporting period, formatted `H:MM:SS` from the report
/// start and step recorded in the file. Hours run past 24 for simulations
/// longer than a day.
pub fn period_time(report_start: i32, report_step: i32, period: usize) -> String {
    let total = report_start as i64 + report_step as i64 * period as i64;
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Summary of one test-against-reference comparison.
#[derive(Debug, Serialize)]
pub struct CompareReport {
    /// Absolute tolerance the comparison ran with.
    pub abs_tol: f64,
    /// Relative tolerance the comparison ran with.
    pub rel_tol: f64,
    /// Total number of value pairs compared.
    pub values_compared: u64,
    /// Number of pairs outside tolerance.
    pub failures: u64,
    /// The failing pair with the largest difference. NaN differences count
    /// towards `failures` but are never recorded here.
    pub worst: Option<WorstDiff>,
}

impl CompareReport {
    /// True when every compared pair was within tolerance.
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}

/// The failing value pair with the largest difference, located in network
/// and time terms.
#[derive(Debug, Clone, Serialize)]
pub struct WorstDiff {
    /// Element kind the pair belongs to, `node` or `link`.
    pub element: String,
    /// Zero-based position of the element within its kind.
    pub index: usize,
    /// Element ID from the file's ID table.
    pub id: String,
    /// Zero-based attribute index.
    pub attribute: usize,
    /// Attribute label from the recorded-order tables.
    pub attribute_name: String,
    /// Zero-based reporting period.
    pub period: usize,
    /// Clock time of the period, `H:MM:SS`.
    pub time: String,
    /// Value decoded from the test file.
    pub test_value: f32,
    /// Value decoded from the reference file.
    pub reference_value: f32,
    /// Absolute difference between the two.
    pub difference: f64,
}

/// Serialize a comparison report to a JSON string.
pub fn to_json(report: &CompareReport) -> Result<String, CompareError> {
    serde_json::to_string_pretty(report).map_err(|e| CompareError::Serialization {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_names_follow_recorded_order() {
        assert_eq!(attribute_name(ElementKind::Node, 0), "Demand");
        assert_eq!(attribute_name(ElementKind::Node, 3), "Quality");
        assert_eq!(attribute_name(ElementKind::Link, 0), "Flow");
        assert_eq!(attribute_name(ElementKind::Link, 2), "Head Loss");
        assert_eq!(attribute_name(ElementKind::Link, 7), "Friction Factor");
    }

    #[test]
    fn period_time_formats_hours_minutes_seconds() {
        assert_eq!(period_time(0, 3600, 0), "0:00:00");
        assert_eq!(period_time(3600, 1800, 1), "1:30:00");
        assert_eq!(period_time(3661, 0, 0), "1:01:01");
        assert_eq!(period_time(0, 3600, 25), "25:00:00");
    }

    #[test]
    fn to_json_renders_full_report() {
        let report = CompareReport {
            abs_tol: 0.0001,
            rel_tol: 0.01,
            values_compared: 288,
            failures: 2,
            worst: Some(WorstDiff {
                element: "link".to_string(),
                index: 4,
                id: "PU-7".to_string(),
                attribute: 0,
                attribute_name: "Flow".to_string(),
                period: 11,
                time: "11:00:00".to_string(),
                test_value: 13.25,
                reference_value: 12.75,
                difference: 0.5,
            }),
        };

        let json = to_json(&report).unwrap();
        assert!(json.contains("\"values_compared\": 288"));
        assert!(json.contains("\"failures\": 2"));
        assert!(json.contains("\"id\": \"PU-7\""));
        assert!(json.contains("\"attribute_name\": \"Flow\""));
        assert!(json.contains("\"time\": \"11:00:00\""));
    }

    #[test]
    fn to_json_renders_passing_report_without_worst() {
        let report = CompareReport {
            abs_tol: 0.0,
            rel_tol: 0.0,
            values_compared: 72,
            failures: 0,
            worst: None,
        };

        assert!(report.passed());
        let json = to_json(&report).unwrap();
        assert!(json.contains("\"worst\": null"));
    }
}
