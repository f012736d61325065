//! Error types for marketplace operations.

use crate::transaction::{TransactionId, TransactionStatus};
use reciclo_token::{Address, TokenError};
use thiserror::Error;

/// Errors that can occur in registry and transaction-log operations.
///
/// Every failure aborts the whole invocation with no partial state change;
/// each condition carries its own stable message so callers and tests can
/// match on it.
#[derive(Debug, Error)]
pub enum MarketError {
    /// A company record already exists for this identity.
    #[error("company already registered: {address}")]
    CompanyAlreadyRegistered {
        /// The identity that tried to register twice.
        address: Address,
    },

    /// No company record exists for this identity.
    #[error("company not registered: {address}")]
    CompanyNotRegistered {
        /// The identity without a record.
        address: Address,
    },

    /// No picker record exists for this identity.
    #[error("picker not registered: {address}")]
    PickerNotRegistered {
        /// The identity without a record.
        address: Address,
    },

    /// Caller is not the company a transaction belongs to.
    #[error("caller {caller} is not the company for transaction {transaction_id}")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
        /// The transaction the caller tried to act on.
        transaction_id: TransactionId,
    },

    /// The transaction is in the wrong lifecycle stage for the operation.
    #[error("invalid state for transaction {transaction_id}: {state}")]
    InvalidState {
        /// The transaction.
        transaction_id: TransactionId,
        /// Its current lifecycle stage.
        state: TransactionStatus,
    },

    /// No transaction exists with this id.
    #[error("transaction not found: {transaction_id}")]
    TransactionNotFound {
        /// The unknown id.
        transaction_id: TransactionId,
    },

    /// A company price was set to zero.
    #[error("max price per kg must be greater than zero")]
    InvalidPrice,

    /// A deposit's weight is below the company's minimum.
    #[error("deposit weight {weight} is below the company minimum of {minimum}")]
    WeightBelowMinimum {
        /// The deposited weight.
        weight: u64,
        /// The company's minimum weight requirement.
        minimum: u64,
    },

    /// A token ledger failure, propagated unchanged from settlement.
    #[error(transparent)]
    Token(#[from] TokenError),
}
