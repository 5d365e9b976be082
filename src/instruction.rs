//! Instruction definitions for the outcome market core

use borsh::{BorshDeserialize, BorshSerialize};

/// All operations supported by a market instance.
///
/// This is the wire form in which a host ledger submits operations; the
/// processor decodes and dispatches it. Caller identity travels next to the
/// instruction, established by the host's own signature checks.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub enum MarketInstruction {
    /// Escrow collateral and mint the initial claim set.
    ///
    /// Creator only, legal exactly once, in the `Created` stage.
    Fund(FundArgs),

    /// Exchange outcome claims against the pricing engine.
    ///
    /// Any caller, any number of times, in the `Funded` stage.
    Trade(TradeArgs),

    /// Return residual claims to the creator and end trading.
    ///
    /// Creator only, in the `Funded` stage.
    Close,

    /// Sweep accrued collateral fees to the creator.
    ///
    /// Creator only, any stage.
    WithdrawFees,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct FundArgs {
    /// Collateral to commit. Zero is permitted and yields a degenerate,
    /// fee-only market.
    pub amount: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct TradeArgs {
    /// Signed per-outcome amounts, one per outcome: positive buys that
    /// outcome from the market, negative sells it back.
    pub outcome_amounts: Vec<i64>,

    /// Caller's collateral bound: positive caps what the caller will pay,
    /// negative floors what the caller requires back, zero means no limit.
    pub collateral_limit: i64,
}
