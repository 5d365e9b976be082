//! Outcome Market
//!
//! Lifecycle and trade-settlement core for a single collateral-backed
//! outcome market.
//!
//! ## Architecture
//!
//! This crate implements exactly one market instance: the staged lifecycle
//! (created -> funded -> closed), the signed per-outcome inventory, the
//! protocol fee accrual and the atomic multi-asset exchange performed on
//! every trade. It works in conjunction with external collaborators
//! reached through the traits in [`interfaces`]:
//! - an outcome-issuing ledger minting/burning full claim sets against
//!   escrowed collateral
//! - a pricing oracle mapping net exposure plus a trade vector to a signed
//!   settlement cost
//! - a fungible collateral asset ledger
//!
//! ## Key Features
//!
//! - Stage machine with guard composition before any external interaction
//! - Signed-inventory accounting of net claims sold per outcome
//! - Protocol fee on every trade, sweepable by the market creator
//! - All-or-nothing settlement: a rejected transfer aborts the whole
//!   operation with the market state unchanged

pub mod error;
pub mod instruction;
pub mod interfaces;
pub mod processor;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used items
pub use error::MarketError;
pub use instruction::MarketInstruction;
pub use processor::{MarketProcessor, TradeReceipt};
pub use state::*;
