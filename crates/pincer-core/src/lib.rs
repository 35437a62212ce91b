pub mod error;
pub mod types;

pub use error::{PincerError, PincerResult};
pub use types::*;
