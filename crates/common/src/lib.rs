//! Mind Games acceptance common library
//!
//! Result records, report rows and the error type shared by the runner
//! and the command-line front end.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
