//! Error types for parameter construction.

use std::fmt;

/// Errors that can occur while building a [`Parameter`](crate::Parameter).
///
/// All failures are reported at construction time; once a parameter
/// exists, every operation on it is total.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// The range endpoints coincide, which would make the normalized/plain
    /// conversion divide by zero.
    DegenerateRange {
        /// The shared endpoint value.
        endpoint: f32,
    },
    /// A choice parameter needs at least two elements.
    NotEnoughChoices {
        /// Number of elements supplied.
        count: usize,
    },
    /// The default index does not address any element.
    DefaultOutOfRange {
        /// The supplied default index.
        index: usize,
        /// Number of elements supplied.
        count: usize,
    },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateRange { endpoint } => {
                write!(f, "Degenerate range: minimum == maximum == {}", endpoint)
            }
            Self::NotEnoughChoices { count } => {
                write!(f, "Choice parameter needs at least 2 elements, got {}", count)
            }
            Self::DefaultOutOfRange { index, count } => {
                write!(
                    f,
                    "Default index {} out of range for {} elements",
                    index, count
                )
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// Result type for parameter construction.
pub type ParamResult<T> = Result<T, ParamError>;
