//! Error types for fetching and parsing stats samples

use std::fmt;

use reqwest::StatusCode;

/// Result type alias for a single fetch attempt
pub type FetchResult<T> = Result<T, FetchError>;

/// Reasons a stats body is rejected before any threshold is evaluated
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    /// The body did not split into the expected number of fields
    FieldCount { expected: usize, found: usize },

    /// A field is not a floating-point number
    InvalidNumber { index: usize, value: String },

    /// A "total" field is zero or negative, so no ratio can be computed
    NonPositiveTotal { field: &'static str, value: f64 },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            SampleError::InvalidNumber { index, value } => {
                write!(f, "field {index} is not a number: {value:?}")
            }
            SampleError::NonPositiveTotal { field, value } => {
                write!(f, "{field} total must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for SampleError {}

/// Errors that make a single tick count as failed
#[derive(Debug)]
pub enum FetchError {
    /// Transport failure, including the request timeout
    Request(reqwest::Error),

    /// The endpoint answered with anything but 200
    Status(StatusCode),

    /// The response body could not be read
    Body(reqwest::Error),

    /// The body was read but is not a valid sample
    Sample(SampleError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Request(err) => write!(f, "request failed: {err}"),
            FetchError::Status(status) => write!(f, "unexpected HTTP status: {status}"),
            FetchError::Body(err) => write!(f, "failed to read response body: {err}"),
            FetchError::Sample(err) => write!(f, "invalid sample: {err}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Request(err) | FetchError::Body(err) => Some(err),
            FetchError::Sample(err) => Some(err),
            FetchError::Status(_) => None,
        }
    }
}

impl From<SampleError> for FetchError {
    fn from(err: SampleError) -> Self {
        FetchError::Sample(err)
    }
}
