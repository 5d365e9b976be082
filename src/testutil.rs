//! In-memory collaborators for exercising the market core in tests
//!
//! `TokenLedger` is a minimal fungible ledger with balances and
//! allowances; `TestOutcomeLedger` wires one collateral token to a set of
//! claim tokens with complete-set mint/burn; `ScriptedOracle` replays a
//! fixed sequence of costs. All three support the failure injection the
//! atomicity tests need.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use crate::interfaces::{FungibleAsset, OutcomeLedger, PricingOracle};
use crate::state::{AccountId, Market};

// ============================================================================
// Fungible token ledger
// ============================================================================

#[derive(Default)]
struct TokenState {
    balances: HashMap<AccountId, u64>,
    allowances: HashMap<(AccountId, AccountId), u64>,
    transfer_count: usize,
    fail_all: bool,
}

/// One in-memory fungible token: balances plus allowances.
#[derive(Default)]
pub struct TokenLedger {
    state: RefCell<TokenState>,
}

impl TokenLedger {
    /// Credit `amount` to `to` out of thin air.
    pub fn mint(&self, to: &AccountId, amount: u64) {
        let mut state = self.state.borrow_mut();
        *state.balances.entry(*to).or_default() += amount;
    }

    /// Make every subsequent transfer-like call on this token fail.
    pub fn set_failing(&self, failing: bool) {
        self.state.borrow_mut().fail_all = failing;
    }

    /// Number of `transfer`/`transfer_from` calls made against this token.
    pub fn transfer_count(&self) -> usize {
        self.state.borrow().transfer_count
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u64 {
        self.state
            .borrow()
            .allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// Deduct `amount` of `spender`'s allowance from `owner`, if covered.
    fn consume_allowance(&self, owner: &AccountId, spender: &AccountId, amount: u64) -> bool {
        let mut state = self.state.borrow_mut();
        let entry = state.allowances.entry((*owner, *spender)).or_default();
        if *entry < amount {
            return false;
        }
        *entry -= amount;
        true
    }

    /// Balance move that bypasses the failure flag and the call counter,
    /// for the outcome ledger's internal escrow motion.
    fn move_unchecked(&self, from: &AccountId, to: &AccountId, amount: u64) -> bool {
        let mut state = self.state.borrow_mut();
        let from_balance = state.balances.get(from).copied().unwrap_or(0);
        if from_balance < amount {
            return false;
        }
        state.balances.insert(*from, from_balance - amount);
        *state.balances.entry(*to).or_default() += amount;
        true
    }

    fn burn(&self, from: &AccountId, amount: u64) -> bool {
        let mut state = self.state.borrow_mut();
        let balance = state.balances.get(from).copied().unwrap_or(0);
        if balance < amount {
            return false;
        }
        state.balances.insert(*from, balance - amount);
        true
    }
}

impl FungibleAsset for TokenLedger {
    fn balance_of(&self, holder: &AccountId) -> u64 {
        self.state
            .borrow()
            .balances
            .get(holder)
            .copied()
            .unwrap_or(0)
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: u64) -> bool {
        if self.state.borrow().fail_all {
            return false;
        }
        self.state.borrow_mut().transfer_count += 1;
        self.move_unchecked(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> bool {
        if self.state.borrow().fail_all {
            return false;
        }
        self.state.borrow_mut().transfer_count += 1;
        if !self.consume_allowance(from, spender, amount) {
            return false;
        }
        self.move_unchecked(from, to, amount)
    }

    fn approve(&self, owner: &AccountId, spender: &AccountId, amount: u64) -> bool {
        if self.state.borrow().fail_all {
            return false;
        }
        self.state
            .borrow_mut()
            .allowances
            .insert((*owner, *spender), amount);
        true
    }
}

// ============================================================================
// Outcome ledger
// ============================================================================

/// In-memory outcome-issuing ledger over `outcome_count` claim tokens.
pub struct TestOutcomeLedger {
    address: AccountId,
    pub collateral: TokenLedger,
    pub claims: Vec<TokenLedger>,
    fail_buy: Cell<bool>,
    fail_sell: Cell<bool>,
}

impl TestOutcomeLedger {
    pub fn new(outcome_count: u8) -> Self {
        Self {
            address: AccountId::new_unique(),
            collateral: TokenLedger::default(),
            claims: (0..outcome_count).map(|_| TokenLedger::default()).collect(),
            fail_buy: Cell::new(false),
            fail_sell: Cell::new(false),
        }
    }

    pub fn set_buy_failing(&self, failing: bool) {
        self.fail_buy.set(failing);
    }

    pub fn set_sell_failing(&self, failing: bool) {
        self.fail_sell.set(failing);
    }
}

impl OutcomeLedger for TestOutcomeLedger {
    fn address(&self) -> AccountId {
        self.address
    }

    fn outcome_count(&self) -> u8 {
        self.claims.len() as u8
    }

    fn collateral_asset(&self) -> &dyn FungibleAsset {
        &self.collateral
    }

    fn outcome_claim(&self, index: u8) -> &dyn FungibleAsset {
        &self.claims[index as usize]
    }

    fn buy_all_outcomes(&self, buyer: &AccountId, collateral_amount: u64) -> bool {
        if self.fail_buy.get() {
            return false;
        }
        if !self
            .collateral
            .consume_allowance(buyer, &self.address, collateral_amount)
        {
            return false;
        }
        if !self
            .collateral
            .move_unchecked(buyer, &self.address, collateral_amount)
        {
            return false;
        }
        for claim in &self.claims {
            claim.mint(buyer, collateral_amount);
        }
        true
    }

    fn sell_all_outcomes(&self, seller: &AccountId, claim_amount: u64) -> bool {
        if self.fail_sell.get() {
            return false;
        }
        if self
            .claims
            .iter()
            .any(|claim| claim.balance_of(seller) < claim_amount)
        {
            return false;
        }
        for claim in &self.claims {
            claim.burn(seller, claim_amount);
        }
        self.collateral
            .move_unchecked(&self.address, seller, claim_amount)
    }
}

// ============================================================================
// Pricing oracle
// ============================================================================

/// Oracle replaying a scripted sequence of gross costs.
pub struct ScriptedOracle {
    costs: RefCell<VecDeque<i64>>,
}

impl ScriptedOracle {
    pub fn new(costs: &[i64]) -> Self {
        Self {
            costs: RefCell::new(costs.iter().copied().collect()),
        }
    }
}

impl PricingOracle for ScriptedOracle {
    fn cost(&self, _market: &Market, _outcome_amounts: &[i64]) -> i64 {
        self.costs
            .borrow_mut()
            .pop_front()
            .expect("oracle script exhausted")
    }
}
