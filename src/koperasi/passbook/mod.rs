pub mod clean;
pub mod convert;
pub mod dates;
pub mod error;
pub mod extract;
pub mod io;
pub mod layout;
pub mod model;

pub use error::{PassbookError, Result};
