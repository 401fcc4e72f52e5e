//! Error types for the salary file encoder.

use thiserror::Error;

/// Result type alias for encoder operations
pub type Result<T> = std::result::Result<T, SalaryFileError>;

/// Errors that can occur while building, rendering or saving a salary file.
#[derive(Error, Debug)]
pub enum SalaryFileError {
    /// Failed to read the input or write the output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input batch is not valid JSON or has the wrong shape
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required batch-level or payment-level key is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Date is not a valid calendar date in `YYYY-MM-DD` form
    #[error("Invalid {field} {value:?}; expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    /// Amount is not a finite, non-negative number
    #[error("Invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: &'static str },

    /// Value does not fit its column and strict mode is enabled
    #[error("Value {value:?} for {field} exceeds column width {width}")]
    FieldOverflow {
        field: &'static str,
        width: usize,
        value: String,
    },

    /// Character has no single-byte Latin-1 representation
    #[error("Character {ch:?} in {field} cannot be encoded as Latin-1")]
    Unencodable { field: &'static str, ch: char },

    /// Sum of payment amounts does not fit in 64 bits
    #[error("Total amount overflows after {count} payments")]
    AmountOverflow { count: usize },

    /// Render or save attempted before `finalize`
    #[error("Footer record has not been created; call finalize() before rendering")]
    NotFinalized,

    /// A payment entry failed to encode
    #[error("In payments[{index}]: {source}")]
    Payment {
        index: usize,
        #[source]
        source: Box<SalaryFileError>,
    },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: salary-file [--strict] [--output <path>] <input.json>")]
    MissingArgument,

    /// Unrecognised command-line option
    #[error("Unknown option {0:?}")]
    UnknownOption(String),
}

impl SalaryFileError {
    /// Wraps an error with the zero-based index of the payment it came from.
    pub fn in_payment(index: usize, source: SalaryFileError) -> Self {
        SalaryFileError::Payment {
            index,
            source: Box::new(source),
        }
    }
}
