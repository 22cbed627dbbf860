pub mod enums;
pub mod medicine;

pub use enums::*;
pub use medicine::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Timestamp out of local calendar range: {millis} ms")]
    InvalidTimestamp { millis: i64 },
}
