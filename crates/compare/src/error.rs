//! Comparison error types.

/// Errors that can occur while comparing two output files.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// Decoding one of the output files failed.
    #[error("output file error: {0}")]
    Output(#[from] naiad_output::OutputError),

    /// The two files do not describe the same network shape.
    #[error("{quantity} mismatch: test file has {test}, reference file has {reference}")]
    ShapeMismatch {
        /// Which recorded quantity disagrees.
        quantity: &'static str,
        /// Value in the file under test.
        test: usize,
        /// Value in the reference file.
        reference: usize,
    },

    /// A configured tolerance is unusable.
    #[error("invalid tolerance: {reason}")]
    InvalidTolerance {
        /// Description of the rejected value.
        reason: String,
    },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the underlying serializer failure.
        reason: String,
    },
}
