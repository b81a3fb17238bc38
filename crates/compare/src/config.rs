//! Comparison tolerances.

use crate::error::CompareError;

/// Tolerances for the closeness test applied to every value pair.
///
/// A pair passes when `|test - reference| <= abs_tol + rel_tol * |reference|`.
/// Both tolerances default to zero, which demands exact agreement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompareConfig {
    abs_tol: f64,
    rel_tol: f64,
}

impl CompareConfig {
    /// Create a configuration with both tolerances at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the absolute tolerance term.
    pub fn with_abs_tol(mut self, abs_tol: f64) -> Self {
        self.abs_tol = abs_tol;
        self
    }

    /// Set the relative tolerance term.
    pub fn with_rel_tol(mut self, rel_tol: f64) -> Self {
        self.rel_tol = rel_tol;
        self
    }

    /// Returns the absolute tolerance term.
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Returns the relative tolerance term.
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Both tolerances must be finite and non-negative.
    pub fn validate(&self) -> Result<(), CompareError> {
        for (name, value) in [("abs_tol", self.abs_tol), ("rel_tol", self.rel_tol)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CompareError::InvalidTolerance {
                    reason: format!("{name} must be finite and non-negative, got {value}"),
                });
            }
        }
        Ok(())
    }
}
