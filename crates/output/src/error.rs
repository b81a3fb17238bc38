//! Error types for naiad-output.

use crate::layout::ElementKind;

/// Error type for all fallible operations in the naiad-output crate.
///
/// This enum covers I/O failures on the underlying byte source, files that
/// end before the layout says they should, and requests that fall outside
/// the ranges recorded in the file.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Wraps an error from the underlying reader or seeker.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when the file ends before a required region.
    #[error("file truncated: {needed} bytes required at offset {offset}")]
    Truncated {
        /// Byte offset of the region that could not be read in full.
        offset: u64,
        /// Length in bytes the region was expected to have.
        needed: u64,
    },

    /// Returned when a count word in the file decodes to a negative value.
    #[error("invalid {field} count: {value}")]
    InvalidCount {
        /// Which count word was malformed.
        field: &'static str,
        /// The negative value read from the file.
        value: i32,
    },

    /// Returned when a requested reporting period does not exist.
    #[error("period {period} out of range: file records {periods} reporting period(s)")]
    PeriodOutOfRange {
        /// Requested period index.
        period: usize,
        /// Number of reporting periods the file records.
        periods: usize,
    },

    /// Returned when a requested attribute index does not exist.
    #[error("{element} attribute {attribute} out of range: {element}s record {attributes} attributes")]
    AttributeOutOfRange {
        /// Element kind the request was made for.
        element: ElementKind,
        /// Requested attribute index.
        attribute: usize,
        /// Number of attributes recorded per element of this kind.
        attributes: usize,
    },

    /// Returned when a requested element index does not exist.
    #[error("{element} index {index} out of range: file records {count} {element}s")]
    ElementOutOfRange {
        /// Element kind the request was made for.
        element: ElementKind,
        /// Requested element index.
        index: usize,
        /// Number of elements of this kind the file records.
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_truncated() {
        let err = OutputError::Truncated {
            offset: 884,
            needed: 32,
        };
        assert_eq!(
            err.to_string(),
            "file truncated: 32 bytes required at offset 884"
        );
    }

    #[test]
    fn display_invalid_count() {
        let err = OutputError::InvalidCount {
            field: "link",
            value: -7,
        };
        assert_eq!(err.to_string(), "invalid link count: -7");
    }

    #[test]
    fn display_period_out_of_range() {
        let err = OutputError::PeriodOutOfRange {
            period: 24,
            periods: 24,
        };
        assert_eq!(
            err.to_string(),
            "period 24 out of range: file records 24 reporting period(s)"
        );
    }

    #[test]
    fn display_attribute_out_of_range() {
        let err = OutputError::AttributeOutOfRange {
            element: ElementKind::Node,
            attribute: 4,
            attributes: 4,
        };
        assert_eq!(
            err.to_string(),
            "node attribute 4 out of range: nodes record 4 attributes"
        );
    }

    #[test]
    fn display_element_out_of_range() {
        let err = OutputError::ElementOutOfRange {
            element: ElementKind::Link,
            index: 9,
            count: 9,
        };
        assert_eq!(
            err.to_string(),
            "link index 9 out of range: file records 9 links"
        );
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
        let err: OutputError = io_err.into();
        assert!(matches!(err, OutputError::Io(_)));
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<OutputError>();
    }
}
