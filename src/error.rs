//! Error types for the outcome market core

use num_derive::FromPrimitive;
use thiserror::Error;

/// Errors that may be returned by a market operation
#[derive(Clone, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum MarketError {
    // === General Errors (0-99) ===

    #[error("Unauthorized")]
    Unauthorized = 0,

    #[error("Invalid input")]
    InvalidInput = 1,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow = 2,

    // === Lifecycle Errors (100-199) ===

    #[error("Invalid stage")]
    InvalidStage = 100,

    // === Construction Errors (200-299) ===

    #[error("Invalid configuration")]
    InvalidConfig = 200,

    // === Settlement Errors (300-399) ===

    #[error("Transfer failed")]
    TransferFailed = 300,

    #[error("Slippage exceeded")]
    SlippageExceeded = 301,
}

impl MarketError {
    /// Stable numeric code for this error, for host-side mapping.
    pub fn code(&self) -> u32 {
        self.clone() as u32
    }

    /// Decode an error from its numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        num_traits::FromPrimitive::from_u32(code)
    }
}
