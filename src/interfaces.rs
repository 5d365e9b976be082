//! External collaborator interfaces for the outcome market core
//!
//! This module defines the boundary the core calls across:
//! - the fungible collateral asset (deposits, payouts, fee custody)
//! - the outcome-issuing ledger (mint/burn/transfer of outcome claims)
//! - the pricing oracle (signed settlement cost for a trade vector)
//!
//! The market never holds balances in its own state; collateral and claims
//! live on these ledgers under the market's account. Transfer-like calls
//! report boolean success, and the processor treats any `false` as fatal to
//! the whole operation.

use crate::state::{AccountId, Market};

/// Standard fungible transfer semantics: boolean success, no implicit
/// throwing.
pub trait FungibleAsset {
    /// Balance currently held by `holder`.
    fn balance_of(&self, holder: &AccountId) -> u64;

    /// Move `amount` from `from` to `to`, initiated by `from`.
    fn transfer(&self, from: &AccountId, to: &AccountId, amount: u64) -> bool;

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming
    /// `spender`'s allowance from `from`.
    fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> bool;

    /// Authorize `spender` to draw up to `amount` from `owner`.
    fn approve(&self, owner: &AccountId, spender: &AccountId, amount: u64) -> bool;
}

/// The outcome-issuing ledger: defines the outcome set and exchanges
/// escrowed collateral for full claim sets.
///
/// One claim set is one unit of every outcome; minting `n` sets draws `n`
/// collateral, burning `n` sets credits `n` collateral back.
pub trait OutcomeLedger {
    /// The ledger's own account, the spender the market approves before
    /// asking it to draw collateral.
    fn address(&self) -> AccountId;

    /// Number of outcomes in the set.
    fn outcome_count(&self) -> u8;

    /// The fungible asset backing the outcome set.
    fn collateral_asset(&self) -> &dyn FungibleAsset;

    /// The claim token for outcome `index`.
    fn outcome_claim(&self, index: u8) -> &dyn FungibleAsset;

    /// Mint `collateral_amount` full claim sets to `buyer`, drawing that
    /// much collateral from `buyer`'s approval. Fails the whole call on
    /// insufficient allowance or balance.
    fn buy_all_outcomes(&self, buyer: &AccountId, collateral_amount: u64) -> bool;

    /// Burn `claim_amount` full claim sets held by `seller`, crediting the
    /// equivalent collateral back to `seller`.
    fn sell_all_outcomes(&self, seller: &AccountId, claim_amount: u64) -> bool;
}

/// The pricing engine.
///
/// Implementations must be deterministic given the market's current net
/// exposure; they may read market state but cannot mutate it.
pub trait PricingOracle {
    /// Signed settlement cost of `outcome_amounts` against the market's
    /// current inventory: positive means the caller owes collateral,
    /// negative means the market owes the caller.
    fn cost(&self, market: &Market, outcome_amounts: &[i64]) -> i64;
}
