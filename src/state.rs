//! State definitions for the outcome market core
//!
//! A single market instance is one [`Market`] value. The host ledger owns
//! it, persists it between operations (it is borsh-serializable), and hands
//! it to the processor together with the market's collaborators.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::MarketError;

// ============================================================================
// Constants
// ============================================================================

/// Fee denominator: a `fee_numerator` equal to `FEE_RANGE` would be 100%.
pub const FEE_RANGE: u32 = 1_000_000;

/// Maximum number of outcomes accepted at market construction.
pub const MAX_OUTCOMES: usize = 32;

// ============================================================================
// Identities
// ============================================================================

/// 32-byte account identity on the collaborating ledgers.
#[derive(
    BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// A process-unique identity, for tests and fixtures.
    pub fn new_unique() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&COUNTER.fetch_add(1, Ordering::Relaxed).to_le_bytes());
        Self(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Market lifecycle stage
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Constructed, awaiting funding
    Created = 0,
    /// Funded and tradeable
    Funded = 1,
    /// Trading ended, residual claims returned to the creator
    Closed = 2,
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Created
    }
}

impl Stage {
    /// The only legal successor of this stage, if any.
    ///
    /// Stages advance Created -> Funded -> Closed; there is no regression
    /// and no skipping.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Created => Some(Stage::Funded),
            Stage::Funded => Some(Stage::Closed),
            Stage::Closed => None,
        }
    }
}

// ============================================================================
// Market
// ============================================================================

/// A single outcome market: escrow identity, lifecycle stage, fee
/// configuration and signed per-outcome inventory.
///
/// Collateral and outcome claims are held on the collaborating ledgers
/// under [`Market::address`]; the market itself only tracks its net
/// exposure per outcome.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Market {
    /// The market's own account on the collateral and claim ledgers.
    pub address: AccountId,

    /// Identity authorized for privileged operations.
    pub creator: AccountId,

    /// Creation marker supplied by the host (block height or similar).
    pub created_at: u64,

    /// Number of outcomes, captured from the outcome ledger at construction.
    pub outcome_count: u8,

    /// Protocol fee numerator over [`FEE_RANGE`].
    pub fee_numerator: u32,

    /// Current lifecycle stage.
    pub stage: Stage,

    /// Collateral committed at funding time. Set once, by Fund.
    pub funding_amount: u64,

    /// Running net amount of each outcome's claims sold to external
    /// holders (positive) or bought back (negative). Mutated only by Trade.
    pub net_outcome_sold: Vec<i64>,
}

impl Market {
    /// Create a market in the `Created` stage.
    ///
    /// `outcome_count` must be the count reported by the outcome ledger at
    /// this moment; it is fixed for the market's lifetime. Fails with
    /// `InvalidConfig` if the fee numerator is out of range or the outcome
    /// count is zero or above [`MAX_OUTCOMES`].
    pub fn new(
        address: AccountId,
        creator: AccountId,
        created_at: u64,
        outcome_count: u8,
        fee_numerator: u32,
    ) -> Result<Self, MarketError> {
        if fee_numerator >= FEE_RANGE {
            return Err(MarketError::InvalidConfig);
        }
        if outcome_count == 0 || outcome_count as usize > MAX_OUTCOMES {
            return Err(MarketError::InvalidConfig);
        }

        Ok(Self {
            address,
            creator,
            created_at,
            outcome_count,
            fee_numerator,
            stage: Stage::Created,
            funding_amount: 0,
            net_outcome_sold: vec![0; outcome_count as usize],
        })
    }

    /// Guard: the market must be in `expected` stage.
    pub fn require_stage(&self, expected: Stage) -> Result<(), MarketError> {
        if self.stage != expected {
            return Err(MarketError::InvalidStage);
        }
        Ok(())
    }

    /// Guard: `caller` must be the market creator.
    pub fn require_creator(&self, caller: &AccountId) -> Result<(), MarketError> {
        if *caller != self.creator {
            return Err(MarketError::Unauthorized);
        }
        Ok(())
    }

    /// Advance to `to`, which must be the direct successor of the current
    /// stage.
    pub(crate) fn advance_stage(&mut self, to: Stage) -> Result<(), MarketError> {
        if self.stage.next() != Some(to) {
            return Err(MarketError::InvalidStage);
        }
        self.stage = to;
        Ok(())
    }

    /// Check if the market currently admits trades.
    pub fn is_tradeable(&self) -> bool {
        self.stage == Stage::Funded
    }
}

// ============================================================================
// Tests
// ============================================================================
