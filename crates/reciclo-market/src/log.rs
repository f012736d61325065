//! The deposit transaction log.
//!
//! Drives the deposit → validate → pay lifecycle over an append-only arena
//! of [`Transaction`] records, reading [`Registry`] policy at call time and
//! settling approved deposits through the shared asset ledger.
//!
//! The log holds its own settlement identity on the ledger. A company funds
//! settlement by calling `approve(company, log_identity, amount)` on the
//! ledger; `pay_picker` then moves the funds with `transfer_from`, spending
//! that pre-authorized allowance — so the ledger's own allowance and
//! balance checks bound what any payment can move.

use crate::error::MarketError;
use crate::events::MarketEvent;
use crate::registry::Registry;
use crate::transaction::{Transaction, TransactionId, TransactionStatus};
use parking_lot::Mutex;
use reciclo_token::{Address, Amount, AssetLedger};
use std::sync::Arc;
use tracing::info;

/// The marketplace's deposit/validate/pay lifecycle log.
///
/// Owns the transaction arena and a running counter; holds a reference (not
/// ownership) to the single shared [`AssetLedger`] used for settlement.
pub struct TransactionLog {
    address: Address,
    ledger: Arc<Mutex<AssetLedger>>,
    transactions: Vec<Transaction>,
    transaction_count: u64,
    events: Vec<MarketEvent>,
}

impl TransactionLog {
    /// Create a log settling through `ledger`, spending allowances granted
    /// to `address`.
    #[must_use]
    pub fn new(address: Address, ledger: Arc<Mutex<AssetLedger>>) -> Self {
        Self {
            address,
            ledger,
            transactions: Vec::new(),
            transaction_count: 0,
            events: Vec::new(),
        }
    }

    /// The log's settlement identity. Companies pre-authorize payments by
    /// approving an allowance for this address on the asset ledger.
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Record a plastic deposit from the calling picker against a company.
    ///
    /// Appends a pending transaction at the next sequential id, adds the id
    /// to the picker's transaction list, and bumps the picker's accumulated
    /// deposited weight.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::PickerNotRegistered`] if the caller has no
    /// picker record, [`MarketError::CompanyNotRegistered`] if
    /// `company_address` has no company record.
    pub fn deposit_plastic(
        &mut self,
        registry: &mut Registry,
        caller: &Address,
        company_address: &Address,
        weight: u64,
    ) -> Result<TransactionId, MarketError> {
        if registry.picker(caller).is_none() {
            return Err(MarketError::PickerNotRegistered {
                address: caller.clone(),
            });
        }
        if registry.company(company_address).is_none() {
            return Err(MarketError::CompanyNotRegistered {
                address: company_address.clone(),
            });
        }

        let id = TransactionId::new(self.transactions.len() as u64);
        self.transactions.push(Transaction::new(
            id,
            company_address.clone(),
            caller.clone(),
            weight,
        ));
        registry.record_deposit(caller, weight, id)?;
        self.transaction_count += 1;
        self.events.push(MarketEvent::PlasticDeposited {
            picker: caller.clone(),
            company: company_address.clone(),
            weight,
            transaction_id: id,
        });

        info!(
            picker = %caller,
            company = %company_address,
            weight,
            transaction_id = %id,
            "plastic deposited"
        );
        Ok(id)
    }

    /// Validate a pending deposit against the company's current
    /// minimum-weight policy. Equality passes: a deposit exactly at the
    /// minimum is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::TransactionNotFound`] for an unknown id,
    /// [`MarketError::Unauthorized`] unless the caller is the transaction's
    /// company, [`MarketError::InvalidState`] unless the transaction is
    /// pending, [`MarketError::WeightBelowMinimum`] if the deposit is too
    /// light (the transaction stays pending).
    pub fn validate_plastic(
        &mut self,
        registry: &Registry,
        caller: &Address,
        id: TransactionId,
    ) -> Result<(), MarketError> {
        let tx = self
            .transactions
            .get_mut(id.index() as usize)
            .ok_or(MarketError::TransactionNotFound { transaction_id: id })?;

        if tx.company != *caller {
            return Err(MarketError::Unauthorized {
                caller: caller.clone(),
                transaction_id: id,
            });
        }
        if tx.status() != TransactionStatus::Pending {
            return Err(MarketError::InvalidState {
                transaction_id: id,
                state: tx.status(),
            });
        }

        // Policy is read at validation time, not frozen at deposit time.
        let company =
            registry
                .company(caller)
                .ok_or_else(|| MarketError::CompanyNotRegistered {
                    address: caller.clone(),
                })?;
        if tx.weight < company.min_weight_requirement {
            return Err(MarketError::WeightBelowMinimum {
                weight: tx.weight,
                minimum: company.min_weight_requirement,
            });
        }

        tx.approve()?;
        self.events
            .push(MarketEvent::PlasticValidated { transaction_id: id });

        info!(company = %caller, transaction_id = %id, "plastic validated");
        Ok(())
    }

    /// Settle an approved deposit: pay the picker
    /// `weight * max_price_per_kg` out of the company's ledger account,
    /// using the price in effect now (not at deposit time).
    ///
    /// The ledger transfer runs before the transaction is marked paid. The
    /// ledger validates everything before writing, so a failed transfer
    /// leaves the transaction approved and unpaid with no other change, and
    /// the settled-state guard makes a second payment impossible.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::TransactionNotFound`] for an unknown id,
    /// [`MarketError::Unauthorized`] unless the caller is the transaction's
    /// company, [`MarketError::InvalidState`] unless the transaction is
    /// approved and unpaid, and propagates ledger failures
    /// ([`reciclo_token::TokenError::AllowanceExceeded`],
    /// [`reciclo_token::TokenError::InsufficientBalance`]) unchanged.
    pub fn pay_picker(
        &mut self,
        registry: &Registry,
        caller: &Address,
        id: TransactionId,
    ) -> Result<Amount, MarketError> {
        let tx = self
            .transactions
            .get(id.index() as usize)
            .ok_or(MarketError::TransactionNotFound { transaction_id: id })?;

        if tx.company != *caller {
            return Err(MarketError::Unauthorized {
                caller: caller.clone(),
                transaction_id: id,
            });
        }
        if tx.status() != TransactionStatus::Approved {
            return Err(MarketError::InvalidState {
                transaction_id: id,
                state: tx.status(),
            });
        }

        let company =
            registry
                .company(caller)
                .ok_or_else(|| MarketError::CompanyNotRegistered {
                    address: caller.clone(),
                })?;
        let amount =
            Amount::from_raw(u128::from(tx.weight) * u128::from(company.max_price_per_kg));
        let picker = tx.picker.clone();

        self.ledger
            .lock()
            .transfer_from(&self.address, caller, &picker, amount)?;

        let tx = self
            .transactions
            .get_mut(id.index() as usize)
            .ok_or(MarketError::TransactionNotFound { transaction_id: id })?;
        tx.settle()?;
        self.events.push(MarketEvent::PickerPaid {
            company: caller.clone(),
            picker: picker.clone(),
            amount,
            transaction_id: id,
        });

        info!(
            company = %caller,
            picker = %picker,
            amount = %amount,
            transaction_id = %id,
            "picker paid"
        );
        Ok(amount)
    }

    /// Look up a transaction by id.
    #[must_use]
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(id.index() as usize)
    }

    /// Total number of deposits ever recorded.
    #[must_use]
    pub const fn total_transactions(&self) -> u64 {
        self.transaction_count
    }

    /// Notifications emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }
}

#[allow(clippy::missing_fields_in_debug)]
impl std::fmt::Debug for TransactionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionLog")
            .field("address", &self.address)
            .field("transaction_count", &self.transaction_count)
            .finish_non_exhaustive()
    }
}
