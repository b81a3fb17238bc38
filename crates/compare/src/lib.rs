//! # naiad-compare
//!
//! Value-by-value regression comparison of two solver output files: one
//! candidate under test against one accepted reference. Every result array
//! is streamed from both files in lockstep and each value pair must satisfy
//! the configured closeness test. The verdict comes back as a report that
//! pins the worst difference to an element ID, an attribute label, and a
//! clock time.

mod closeness;
mod config;
mod error;
mod report;

pub use closeness::is_close;
pub use config::CompareConfig;
pub use error::CompareError;
pub use report::{
    CompareReport, LINK_ATTRIBUTE_NAMES, NODE_ATTRIBUTE_NAMES, WorstDiff, attribute_name,
    period_time, to_json,
};

use std::io::{Read, Seek};

use tracing::{debug, info};

use naiad_output::{ElementKind, OutputReader};

/// Worst failing pair tracked during the streaming pass. Resolved to a
/// [`WorstDiff`] once iteration is over and the reader is free again.
struct Worst {
    element: ElementKind,
    index: usize,
    attribute: usize,
    period: usize,
    test_value: f32,
    reference_value: f32,
    difference: f64,
}

/// Compare every result value in `test` against `reference`.
///
/// Both files must record the same element counts and the same number of
/// reporting periods. Decode failures in either file abort the comparison.
pub fn compare<T, F>(
    test: &mut OutputReader<T>,
    reference: &mut OutputReader<F>,
    config: &CompareConfig,
) -> Result<CompareReport, CompareError>
where
    T: Read + Seek,
    F: Read + Seek,
{
    config.validate()?;
    check_shape(test, reference)?;

    let abs_tol = config.abs_tol();
    let rel_tol = config.rel_tol();
    debug!(
        abs_tol,
        rel_tol,
        periods = test.period_count(),
        "comparing output files"
    );

    let mut values_compared = 0u64;
    let mut failures = 0u64;
    let mut worst: Option<Worst> = None;

    for (test_array, reference_array) in test.results().zip(reference.results()) {
        let test_array = test_array?;
        let reference_array = reference_array?;

        for (index, (&test_value, &reference_value)) in test_array
            .values
            .iter()
            .zip(reference_array.values.iter())
            .enumerate()
        {
            values_compared += 1;
            if is_close(test_value as f64, reference_value as f64, abs_tol, rel_tol) {
                continue;
            }
            failures += 1;
            let difference = (test_value as f64 - reference_value as f64).abs();
            if difference > worst.as_ref().map_or(0.0, |w| w.difference) {
                worst = Some(Worst {
                    element: test_array.element,
                    index,
                    attribute: test_array.attribute,
                    period: test_array.period,
                    test_value,
                    reference_value,
                    difference,
                });
            }
        }
    }

    let worst = match worst {
        Some(w) => Some(WorstDiff {
            element: w.element.to_string(),
            index: w.index,
            id: test.element_id(w.element, w.index)?,
            attribute: w.attribute,
            attribute_name: attribute_name(w.element, w.attribute).to_string(),
            period: w.period,
            time: period_time(test.report_start(), test.report_step(), w.period),
            test_value: w.test_value,
            reference_value: w.reference_value,
            difference: w.difference,
        }),
        None => None,
    };

    info!(values_compared, failures, "comparison finished");
    Ok(CompareReport {
        abs_tol,
        rel_tol,
        values_compared,
        failures,
        worst,
    })
}

/// Every recorded shape quantity must agree before values are compared,
/// otherwise the streams would pair up values of different elements.
fn check_shape<T, F>(
    test: &OutputReader<T>,
    reference: &OutputReader<F>,
) -> Result<(), CompareError>
where
    T: Read + Seek,
    F: Read + Seek,
{
    let t = test.counts();
    let r = reference.counts();
    let quantities = [
        ("node count", t.nodes, r.nodes),
        ("tank count", t.tanks, r.tanks),
        ("link count", t.links, r.links),
        ("pump count", t.pumps, r.pumps),
        ("valve count", t.valves, r.valves),
        (
            "reporting period count",
            test.period_count(),
            reference.period_count(),
        ),
    ];
    for (quantity, test_value, reference_value) in quantities {
        if test_value != reference_value {
            return Err(CompareError::ShapeMismatch {
                quantity,
                test: test_value,
                reference: reference_value,
            });
        }
    }
    Ok(())
}
