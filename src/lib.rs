//! # Salary File
//!
//! Encodes a batch of salary payments from one sender into the fixed-width
//! 80-column record format used for bulk salary submission to the bank.
//!
//! ## Design Principles
//!
//! - **Named layouts**: every record is a table of named columns summing to 80
//! - **Exact amounts**: kronor are converted to integer öre via `rust_decimal`
//! - **Eager validation**: each record is validated when it is created
//! - **Explicit truncation**: oversized fields truncate by a per-column rule,
//!   or fail in strict mode
//!
//! ## Example
//!
//! ```
//! use salary_file::{PaymentInput, SalaryFile};
//!
//! let mut file = SalaryFile::new("2024-03-15", "123", "9999999").unwrap();
//! file.add_payment(&PaymentInput::new("2024-03-20", "123456789", 1500.50))
//!     .unwrap();
//! file.finalize().unwrap();
//!
//! let text = file.render().unwrap();
//! assert!(text.lines().all(|line| line.chars().count() == 80));
//! ```

pub mod batch;
pub mod error;
pub mod field;
pub mod layout;
pub mod money;
pub mod record;
pub mod salary_file;

pub use batch::{BatchSpec, PaymentSpec};
pub use error::{Result, SalaryFileError};
pub use field::{OverflowPolicy, Truncate};
pub use layout::LINE_WIDTH;
pub use money::{AmountInput, MinorUnits};
pub use record::{FooterRecord, OpeningRecord, PaymentInput, PaymentRecord};
pub use salary_file::SalaryFile;
