//! Operation handlers for the outcome market core
//!
//! Every state-mutating operation composes its identity and stage guards
//! before any external interaction. Own-state mutations (stage, funding
//! amount, inventory) are staged in locals and committed only once every
//! collaborator call has succeeded, so a rejected operation leaves the
//! market state exactly as it found it. Rolling back the collaborating
//! ledgers themselves is the host's all-or-nothing envelope, not the
//! core's.

use borsh::BorshDeserialize;
use tracing::{debug, info};

use crate::error::MarketError;
use crate::instruction::MarketInstruction;
use crate::interfaces::{OutcomeLedger, PricingOracle};
use crate::state::{AccountId, Market, Stage};
use crate::utils::{calculate_fee, fee_to_signed, safe_add_i64};

/// Settlement summary returned by [`MarketProcessor::trade`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeReceipt {
    /// The applied trade vector.
    pub outcome_amounts: Vec<i64>,
    /// The pricing oracle's raw signed cost.
    pub gross_cost: i64,
    /// Protocol fee charged on the gross magnitude.
    pub fee: u64,
    /// Collateral actually exchanged, fee included: positive paid by the
    /// caller, negative paid to the caller.
    pub net_cost: i64,
}

/// Executes operations against one market instance.
///
/// Borrows the market exclusively together with its collaborators; the
/// exclusive borrow serializes operations, so no operation can observe
/// another mid-execution.
pub struct MarketProcessor<'a> {
    market: &'a mut Market,
    outcome_ledger: &'a dyn OutcomeLedger,
    oracle: &'a dyn PricingOracle,
}

impl<'a> MarketProcessor<'a> {
    /// Bind a market to its collaborators.
    ///
    /// Fails with `InvalidConfig` if the outcome ledger no longer reports
    /// the outcome count captured when the market was constructed.
    pub fn new(
        market: &'a mut Market,
        outcome_ledger: &'a dyn OutcomeLedger,
        oracle: &'a dyn PricingOracle,
    ) -> Result<Self, MarketError> {
        if outcome_ledger.outcome_count() != market.outcome_count {
            return Err(MarketError::InvalidConfig);
        }
        Ok(Self {
            market,
            outcome_ledger,
            oracle,
        })
    }

    /// Decode and dispatch one instruction on behalf of `caller`.
    ///
    /// Returns the swept amount for `WithdrawFees`, `None` otherwise.
    pub fn process_instruction(
        &mut self,
        caller: &AccountId,
        instruction_data: &[u8],
    ) -> Result<Option<u64>, MarketError> {
        let instruction = MarketInstruction::try_from_slice(instruction_data)
            .map_err(|_| MarketError::InvalidInput)?;

        match instruction {
            MarketInstruction::Fund(args) => {
                debug!("Instruction: Fund");
                self.fund(caller, args.amount)?;
                Ok(None)
            }
            MarketInstruction::Trade(args) => {
                debug!("Instruction: Trade");
                self.trade(caller, &args.outcome_amounts, args.collateral_limit)?;
                Ok(None)
            }
            MarketInstruction::Close => {
                debug!("Instruction: Close");
                self.close(caller)?;
                Ok(None)
            }
            MarketInstruction::WithdrawFees => {
                debug!("Instruction: WithdrawFees");
                self.withdraw_fees(caller).map(Some)
            }
        }
    }

    /// Escrow `amount` collateral from the creator and exchange it for the
    /// initial claim set, held in the market's own custody.
    ///
    /// Creator only, `Created` stage only; advances the market to `Funded`.
    /// Zero funding is permitted and yields a degenerate, fee-only market.
    pub fn fund(&mut self, caller: &AccountId, amount: u64) -> Result<(), MarketError> {
        self.market.require_creator(caller)?;
        self.market.require_stage(Stage::Created)?;

        let ledger = self.outcome_ledger;
        let collateral = ledger.collateral_asset();
        let market_addr = self.market.address;

        // Pull the funding into escrow, then let the outcome ledger draw it
        // while minting the claim set to the market.
        if !collateral.transfer_from(&market_addr, caller, &market_addr, amount) {
            return Err(MarketError::TransferFailed);
        }
        if !collateral.approve(&market_addr, &ledger.address(), amount) {
            return Err(MarketError::TransferFailed);
        }
        if !ledger.buy_all_outcomes(&market_addr, amount) {
            return Err(MarketError::TransferFailed);
        }

        self.market.funding_amount = amount;
        self.market.advance_stage(Stage::Funded)?;

        info!(amount, "funding completed");
        Ok(())
    }

    /// Execute one signed-vector trade against the pricing engine.
    ///
    /// Positive entries buy claims from the market, negative entries sell
    /// claims back. `collateral_limit` bounds the net cost when nonzero.
    /// The whole settlement is all-or-nothing: any rejected transfer aborts
    /// it with the inventory unchanged.
    pub fn trade(
        &mut self,
        caller: &AccountId,
        outcome_amounts: &[i64],
        collateral_limit: i64,
    ) -> Result<TradeReceipt, MarketError> {
        self.market.require_stage(Stage::Funded)?;
        if outcome_amounts.len() != self.market.outcome_count as usize {
            return Err(MarketError::InvalidInput);
        }

        let ledger = self.outcome_ledger;
        let collateral = ledger.collateral_asset();
        let market_addr = self.market.address;

        // 1. Price the requested vector against the current net exposure.
        let gross_cost = self.oracle.cost(self.market, outcome_amounts);

        // 2. Fee on the magnitude, added with the gross sign preserved: the
        //    fee raises what the caller pays or shrinks what the caller
        //    gets back, never the reverse.
        let fee = calculate_fee(gross_cost.unsigned_abs(), self.market.fee_numerator);
        let net_cost = safe_add_i64(gross_cost, fee_to_signed(fee)?)?;

        // 3. A zero limit means unbounded; otherwise the net cost may not
        //    exceed the caller's cap. A negative limit is still only an
        //    upper bound on net cost, not a floor on the refund.
        if collateral_limit != 0 && net_cost > collateral_limit {
            return Err(MarketError::SlippageExceeded);
        }

        // 4. Caller owes: escrow the net cost and convert the gross part
        //    into freshly minted claim sets, so every outgoing claim
        //    transfer below is covered.
        if gross_cost > 0 {
            if !collateral.transfer_from(&market_addr, caller, &market_addr, net_cost as u64) {
                return Err(MarketError::TransferFailed);
            }
            if !collateral.approve(&market_addr, &ledger.address(), gross_cost as u64) {
                return Err(MarketError::TransferFailed);
            }
            if !ledger.buy_all_outcomes(&market_addr, gross_cost as u64) {
                return Err(MarketError::TransferFailed);
            }
        }

        // 5. Per-outcome claim movement. Inventory is staged and committed
        //    only after the whole settlement has gone through. Zero-amount
        //    outcomes move nothing.
        let mut staged_inventory = self.market.net_outcome_sold.clone();
        for (index, &amount) in outcome_amounts.iter().enumerate() {
            if amount == 0 {
                continue;
            }
            let claim = ledger.outcome_claim(index as u8);
            if amount > 0 {
                if !claim.transfer(&market_addr, caller, amount as u64) {
                    return Err(MarketError::TransferFailed);
                }
            } else if !claim.transfer_from(&market_addr, caller, &market_addr, amount.unsigned_abs())
            {
                return Err(MarketError::TransferFailed);
            }
            staged_inventory[index] = safe_add_i64(staged_inventory[index], amount)?;
        }

        // 6. Market owes: burn the surplus claim sets bought back above,
        //    then pay out whatever refund survives the fee.
        if gross_cost < 0 {
            if !ledger.sell_all_outcomes(&market_addr, gross_cost.unsigned_abs()) {
                return Err(MarketError::TransferFailed);
            }
            if net_cost < 0 && !collateral.transfer(&market_addr, caller, net_cost.unsigned_abs())
            {
                return Err(MarketError::TransferFailed);
            }
        }

        self.market.net_outcome_sold = staged_inventory;

        // 7.
        info!(
            caller = %caller,
            outcome_amounts = ?outcome_amounts,
            gross_cost,
            fee,
            "trade completed"
        );
        Ok(TradeReceipt {
            outcome_amounts: outcome_amounts.to_vec(),
            gross_cost,
            fee,
            net_cost,
        })
    }

    /// Sweep the market's entire remaining claim balance of every outcome
    /// back to the creator and end trading.
    ///
    /// Creator only, `Funded` stage only; advances the market to `Closed`.
    pub fn close(&mut self, caller: &AccountId) -> Result<(), MarketError> {
        self.market.require_creator(caller)?;
        self.market.require_stage(Stage::Funded)?;

        let ledger = self.outcome_ledger;
        let market_addr = self.market.address;

        for index in 0..self.market.outcome_count {
            let claim = ledger.outcome_claim(index);
            let balance = claim.balance_of(&market_addr);
            if !claim.transfer(&market_addr, &self.market.creator, balance) {
                return Err(MarketError::TransferFailed);
            }
        }

        self.market.advance_stage(Stage::Closed)?;

        info!("closing completed");
        Ok(())
    }

    /// Sweep the market's whole collateral balance to the creator and
    /// return the swept amount.
    ///
    /// Creator only, any stage. Outside an in-flight trade the market
    /// holds no collateral except accrued fees: funding is converted to
    /// claims immediately, and trade collateral nets out to claim
    /// inventory plus fee residue.
    pub fn withdraw_fees(&mut self, caller: &AccountId) -> Result<u64, MarketError> {
        self.market.require_creator(caller)?;

        let collateral = self.outcome_ledger.collateral_asset();
        let fees = collateral.balance_of(&self.market.address);
        if !collateral.transfer(&self.market.address, &self.market.creator, fees) {
            return Err(MarketError::TransferFailed);
        }

        info!(amount = fees, "fees withdrawn");
        Ok(fees)
    }
}

// ============================================================================
// Tests
// ============================================================================
