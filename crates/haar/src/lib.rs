pub mod error;
pub mod generate;
pub mod unitary;

pub use error::{HaarError, Result};
pub use generate::{haar_unitary, haar_unitary_with, MAX_RESAMPLES};
pub use unitary::{Unitary, C64};
