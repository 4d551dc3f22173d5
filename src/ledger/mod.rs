/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!The confidential token ledger
//!
//!The ledger never sees plaintext balances. Every mutation presents the commitments it
//!claims the new state should hold, and the ledger only checks that they compose with
//!the stored ones: `C_old == C_new * C_amount` for debits, `C_new == C_old * C_amount` for credits.
//!
//!Every operation is all-or-nothing. All checks run before the first write,
//!so a rejected call leaves balances, approvals, nonces and supply untouched.
//!
//!Each caller has one nonce shared by all of their mutating calls, and every call must
//!present exactly `stored + 1`.

use tracing::{info, warn};

use crate::internal_common::*;

mod store;
mod events;
mod views;
mod invariant;

pub use store::{BalanceRecord, ApprovalRecord, Metadata, LedgerStore, MemoryStore};
pub use events::{LedgerEvent, EventSink};
pub use views::{BalanceView, ApprovalView};
pub use invariant::SupplyReport;

use crate::planner::{TransferPlan, TransferFromPlan, ApprovePlan, MintPlan, BurnPlan};

///Id carried by the first emitted event.
pub const FIRST_TX_ID: u64 = 1;

///Host-supplied context of a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    ///The authenticated caller.
    pub caller: Address,
    ///Current ledger height, recorded on every write.
    pub height: Height

} impl CallContext {
    pub fn new(caller: &str, height: Height) -> Self {
        return Self {
            caller: caller.to_string(),
            height
        }
    }
}

///Token configuration applied when a ledger is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LedgerConfig {
    pub name: String,
    pub symbol: String

} impl Default for LedgerConfig {
    fn default() -> Self {
        return Self {
            name: "Confidential Commitment Token".to_string(),
            symbol: "CCT".to_string()
        }
    }
}

///The ledger state machine over a `LedgerStore` and an `EventSink`.
#[derive(Debug)]
pub struct Ledger<S: LedgerStore = MemoryStore, E: EventSink = Vec<LedgerEvent>> {
    store: S,
    events: E

} impl<S: LedgerStore, E: EventSink> Ledger<S, E> {
    ///Create a new token with `operator` as its deployer.
    ///
    ///Any metadata or tx counter already in `store` is overwritten.
    pub fn new(config: LedgerConfig, operator: &str, mut store: S, events: E) -> Self {
        store.set_metadata(Metadata {
            name: config.name,
            symbol: config.symbol,
            operator: operator.to_string(),
            total_supply: Amount::ZERO,
            supply_commitment: ZERO_COMMITMENT
        });
        store.set_next_tx_id(FIRST_TX_ID);

        info!(operator, "ledger created");
        return Self { store, events }
    }

    ///Resume a ledger from an already initialized store.
    pub fn open(store: S, events: E) -> Result<Self, LedgerError> {
        if store.metadata().is_none() {
            return Err(LedgerError::Uninitialized)
        }
        return Ok(Self { store, events })
    }

    pub fn store(&self) -> &S {
        return &self.store;
    }

    ///Direct access to the backing store, bypassing every check.
    pub fn store_mut(&mut self) -> &mut S {
        return &mut self.store;
    }

    pub fn events(&self) -> &E {
        return &self.events;
    }

    pub fn into_parts(self) -> (S, E) {
        return (self.store, self.events);
    }

    //views

    pub fn get_balance_commitment(&self, address: &str) -> BalanceView {
        return BalanceView::new(address, self.store.balance(address))
    }

    pub fn get_confidential_approval(&self, owner: &str, spender: &str) -> ApprovalView {
        return ApprovalView::new(owner, spender, self.store.approval(owner, spender))
    }

    ///The last accepted nonce of `address`, `0` if it never called.
    pub fn get_nonce(&self, address: &str) -> u64 {
        return self.store.nonce(address).unwrap_or(0)
    }

    pub fn get_metadata(&self) -> Result<Metadata, LedgerError> {
        return self.store.metadata().ok_or(LedgerError::Uninitialized)
    }

    //mutations

    ///Move a hidden amount from the caller to `to`.
    ///
    ///An account without a record takes part as `ZERO_COMMITMENT`.
    pub fn confidential_transfer(
        &mut self,
        ctx: &CallContext,
        to: &str,
        amount_commitment: Commitment,
        new_sender_commitment: Commitment,
        new_receiver_commitment: Commitment,
        nonce: u64
    ) -> Result<u64, LedgerError> {
        let result = self.try_transfer(ctx, to, amount_commitment, new_sender_commitment, new_receiver_commitment, nonce);
        return log_rejection("confidential_transfer", ctx, result)
    }

    ///Set the caller's allowance commitment for `spender`, replacing any previous one.
    ///
    ///Self-approval is allowed.
    pub fn confidential_approve(
        &mut self,
        ctx: &CallContext,
        spender: &str,
        allowance_commitment: Commitment,
        nonce: u64
    ) -> Result<u64, LedgerError> {
        let result = self.try_approve(ctx, spender, allowance_commitment, nonce);
        return log_rejection("confidential_approve", ctx, result)
    }

    ///Move a hidden amount out of `owner` into `to`, spending the caller's allowance.
    ///
    ///The nonce checked and bumped is the caller's, not the owner's.
    #[allow(clippy::too_many_arguments)]
    pub fn confidential_transfer_from(
        &mut self,
        ctx: &CallContext,
        owner: &str,
        to: &str,
        amount_commitment: Commitment,
        new_owner_commitment: Commitment,
        new_receiver_commitment: Commitment,
        new_allowance_commitment: Commitment,
        nonce: u64
    ) -> Result<u64, LedgerError> {
        let result = self.try_transfer_from(
            ctx,
            owner,
            to,
            amount_commitment,
            new_owner_commitment,
            new_receiver_commitment,
            new_allowance_commitment,
            nonce
        );
        return log_rejection("confidential_transfer_from", ctx, result)
    }

    ///Operator only: create `amount` new tokens in `to`.
    ///
    ///`amount` is public and added to `total_supply`. The ledger does not check
    ///that `amount_commitment` actually commits to `amount`.
    pub fn mint(
        &mut self,
        ctx: &CallContext,
        to: &str,
        amount: Amount,
        amount_commitment: Commitment,
        new_receiver_commitment: Commitment,
        nonce: u64
    ) -> Result<u64, LedgerError> {
        let result = self.try_mint(ctx, to, amount, amount_commitment, new_receiver_commitment, nonce);
        return log_rejection("mint", ctx, result)
    }

    ///Destroy `amount` tokens held by `from`. The holder may burn their own, the operator may burn anyone's.
    pub fn burn(
        &mut self,
        ctx: &CallContext,
        from: &str,
        amount: Amount,
        amount_commitment: Commitment,
        new_from_commitment: Commitment,
        nonce: u64
    ) -> Result<u64, LedgerError> {
        let result = self.try_burn(ctx, from, amount, amount_commitment, new_from_commitment, nonce);
        return log_rejection("burn", ctx, result)
    }

    //plan submission

    pub fn submit_transfer(&mut self, ctx: &CallContext, to: &str, plan: &TransferPlan) -> Result<u64, LedgerError> {
        return self.confidential_transfer(
            ctx,
            to,
            plan.amount_commitment,
            plan.new_sender_commitment,
            plan.new_receiver_commitment,
            plan.nonce
        )
    }

    pub fn submit_approve(&mut self, ctx: &CallContext, spender: &str, plan: &ApprovePlan) -> Result<u64, LedgerError> {
        return self.confidential_approve(ctx, spender, plan.allowance_commitment, plan.nonce)
    }

    pub fn submit_transfer_from(
        &mut self,
        ctx: &CallContext,
        owner: &str,
        to: &str,
        plan: &TransferFromPlan
    ) -> Result<u64, LedgerError> {
        return self.confidential_transfer_from(
            ctx,
            owner,
            to,
            plan.amount_commitment,
            plan.new_owner_commitment,
            plan.new_receiver_commitment,
            plan.new_allowance_commitment,
            plan.nonce
        )
    }

    pub fn submit_mint(&mut self, ctx: &CallContext, to: &str, plan: &MintPlan) -> Result<u64, LedgerError> {
        return self.mint(ctx, to, plan.amount, plan.amount_commitment, plan.new_receiver_commitment, plan.nonce)
    }

    pub fn submit_burn(&mut self, ctx: &CallContext, from: &str, plan: &BurnPlan) -> Result<u64, LedgerError> {
        return self.burn(ctx, from, plan.amount, plan.amount_commitment, plan.new_from_commitment, plan.nonce)
    }

    //checks and writes

    fn try_transfer(
        &mut self,
        ctx: &CallContext,
        to: &str,
        amount_commitment: Commitment,
        new_sender_commitment: Commitment,
        new_receiver_commitment: Commitment,
        nonce: u64
    ) -> Result<u64, LedgerError> {
        let sender = ctx.caller.as_str();
        if to == sender {
            return Err(LedgerError::SelfTransfer)
        }
        self.check_nonce(sender, nonce)?;

        let sender_record = self.store.balance(sender);
        let receiver_record = self.store.balance(to);

        if !verify_subtraction(&current(&sender_record), &new_sender_commitment, &amount_commitment) {
            return Err(LedgerError::SenderCommitmentMismatch)
        }
        if !verify_addition(&current(&receiver_record), &amount_commitment, &new_receiver_commitment) {
            return Err(LedgerError::ReceiverCommitmentMismatch)
        }

        self.store.set_nonce(sender, nonce);
        self.store.set_balance(sender, BalanceRecord::advance(sender_record.as_ref(), new_sender_commitment, ctx.height));
        self.store.set_balance(to, BalanceRecord::advance(receiver_record.as_ref(), new_receiver_commitment, ctx.height));

        let tx_id = self.take_tx_id();
        self.events.emit(LedgerEvent::ConfidentialTransfer {
            from: sender.to_string(),
            to: to.to_string(),
            amount_commitment: amount_commitment.to_hex(),
            tx_id
        });
        info!(tx_id, from = sender, to, height = ctx.height, "confidential transfer");
        return Ok(tx_id)
    }

    fn try_approve(
        &mut self,
        ctx: &CallContext,
        spender: &str,
        allowance_commitment: Commitment,
        nonce: u64
    ) -> Result<u64, LedgerError> {
        let owner = ctx.caller.as_str();
        self.check_nonce(owner, nonce)?;

        self.store.set_nonce(owner, nonce);
        self.store.set_approval(owner, spender, ApprovalRecord {
            commitment: allowance_commitment,
            approved_at: ctx.height
        });

        let tx_id = self.take_tx_id();
        self.events.emit(LedgerEvent::ConfidentialApprove {
            owner: owner.to_string(),
            spender: spender.to_string(),
            allowance_commitment: allowance_commitment.to_hex(),
            tx_id
        });
        info!(tx_id, owner, spender, height = ctx.height, "confidential approve");
        return Ok(tx_id)
    }

    #[allow(clippy::too_many_arguments)]
    fn try_transfer_from(
        &mut self,
        ctx: &CallContext,
        owner: &str,
        to: &str,
        amount_commitment: Commitment,
        new_owner_commitment: Commitment,
        new_receiver_commitment: Commitment,
        new_allowance_commitment: Commitment,
        nonce: u64
    ) -> Result<u64, LedgerError> {
        let spender = ctx.caller.as_str();
        if to == owner {
            return Err(LedgerError::SelfTransferFrom)
        }
        self.check_nonce(spender, nonce)?;

        let owner_record = self.store.balance(owner)
            .ok_or_else(|| LedgerError::NoOwnerCommitment(owner.to_string()))?;
        let receiver_record = self.store.balance(to);
        let approval = self.store.approval(owner, spender)
            .ok_or_else(|| LedgerError::NoApproval { owner: owner.to_string(), spender: spender.to_string() })?;

        if !verify_subtraction(&owner_record.commitment, &new_owner_commitment, &amount_commitment) {
            return Err(LedgerError::OwnerCommitmentMismatch)
        }
        if !verify_addition(&current(&receiver_record), &amount_commitment, &new_receiver_commitment) {
            return Err(LedgerError::ReceiverCommitmentMismatch)
        }
        if !verify_subtraction(&approval.commitment, &new_allowance_commitment, &amount_commitment) {
            return Err(LedgerError::AllowanceCommitmentMismatch)
        }

        self.store.set_nonce(spender, nonce);
        self.store.set_balance(owner, BalanceRecord::advance(Some(&owner_record), new_owner_commitment, ctx.height));
        self.store.set_balance(to, BalanceRecord::advance(receiver_record.as_ref(), new_receiver_commitment, ctx.height));
        //the allowance keeps the height it was granted at
        self.store.set_approval(owner, spender, ApprovalRecord {
            commitment: new_allowance_commitment,
            approved_at: approval.approved_at
        });

        let tx_id = self.take_tx_id();
        self.events.emit(LedgerEvent::ConfidentialTransfer {
            from: owner.to_string(),
            to: to.to_string(),
            amount_commitment: amount_commitment.to_hex(),
            tx_id
        });
        info!(tx_id, from = owner, to, spender, height = ctx.height, "confidential transfer-from");
        return Ok(tx_id)
    }

    fn try_mint(
        &mut self,
        ctx: &CallContext,
        to: &str,
        amount: Amount,
        amount_commitment: Commitment,
        new_receiver_commitment: Commitment,
        nonce: u64
    ) -> Result<u64, LedgerError> {
        let mut metadata = self.get_metadata()?;
        let operator = ctx.caller.as_str();
        if operator != metadata.operator {
            return Err(LedgerError::NotOperator { caller: operator.to_string() })
        }
        self.check_nonce(operator, nonce)?;

        let receiver_record = self.store.balance(to);
        if !verify_addition(&current(&receiver_record), &amount_commitment, &new_receiver_commitment) {
            return Err(LedgerError::ReceiverCommitmentMismatch)
        }
        metadata.total_supply = metadata.total_supply.checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        metadata.supply_commitment = metadata.supply_commitment.combine(&amount_commitment);

        self.store.set_nonce(operator, nonce);
        self.store.set_balance(to, BalanceRecord::advance(receiver_record.as_ref(), new_receiver_commitment, ctx.height));
        self.store.set_metadata(metadata);

        let tx_id = self.take_tx_id();
        self.events.emit(LedgerEvent::MintCommitment {
            to: to.to_string(),
            amount: amount.to_string(),
            amount_commitment: amount_commitment.to_hex(),
            tx_id
        });
        info!(tx_id, to, %amount, height = ctx.height, "mint");
        return Ok(tx_id)
    }

    fn try_burn(
        &mut self,
        ctx: &CallContext,
        from: &str,
        amount: Amount,
        amount_commitment: Commitment,
        new_from_commitment: Commitment,
        nonce: u64
    ) -> Result<u64, LedgerError> {
        let mut metadata = self.get_metadata()?;
        let caller = ctx.caller.as_str();
        if caller != from && caller != metadata.operator {
            return Err(LedgerError::NotAuthorizedToBurn { caller: caller.to_string(), from: from.to_string() })
        }
        self.check_nonce(caller, nonce)?;

        let from_record = self.store.balance(from)
            .ok_or_else(|| LedgerError::NoBurnCommitment(from.to_string()))?;
        if !verify_subtraction(&from_record.commitment, &new_from_commitment, &amount_commitment) {
            return Err(LedgerError::FromCommitmentMismatch)
        }
        metadata.total_supply = metadata.total_supply.checked_sub(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        metadata.supply_commitment = metadata.supply_commitment.remove(&amount_commitment);

        self.store.set_nonce(caller, nonce);
        self.store.set_balance(from, BalanceRecord::advance(Some(&from_record), new_from_commitment, ctx.height));
        self.store.set_metadata(metadata);

        let tx_id = self.take_tx_id();
        self.events.emit(LedgerEvent::BurnCommitment {
            from: from.to_string(),
            amount: amount.to_string(),
            amount_commitment: amount_commitment.to_hex(),
            tx_id
        });
        info!(tx_id, from, caller, %amount, height = ctx.height, "burn");
        return Ok(tx_id)
    }

    ///Require `provided == stored + 1` without writing anything.
    fn check_nonce(&self, address: &str, provided: u64) -> Result<(), LedgerError> {
        let stored = self.get_nonce(address);
        if provided.checked_sub(1) != Some(stored) {
            return Err(LedgerError::BadNonce {
                address: address.to_string(),
                expected: stored.saturating_add(1),
                provided
            })
        }
        return Ok(())
    }

    fn take_tx_id(&mut self) -> u64 {
        let tx_id = self.store.next_tx_id().unwrap_or(FIRST_TX_ID);
        self.store.set_next_tx_id(tx_id.saturating_add(1));
        return tx_id
    }
}

///The commitment an account takes part with: its stored one, or `ZERO_COMMITMENT` if it has no record.
fn current(record: &Option<BalanceRecord>) -> Commitment {
    return record.as_ref().map_or(ZERO_COMMITMENT, |record| record.commitment)
}

fn log_rejection<T>(operation: &'static str, ctx: &CallContext, result: Result<T, LedgerError>) -> Result<T, LedgerError> {
    if let Err(err) = &result {
        warn!(operation, caller = ctx.caller.as_str(), kind = ?err.kind(), %err, "rejected");
    }
    return result
}
