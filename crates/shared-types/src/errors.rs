//! # Error Types
//!
//! Errors raised while decoding shared primitives.

use thiserror::Error;

/// Failure to parse an [`Address`](crate::Address) from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// The input was not valid hexadecimal.
    #[error("Invalid hex in address: {0}")]
    InvalidHex(String),

    /// The decoded byte length was not 20.
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}
