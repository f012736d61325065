//! Error types for token ledger operations.

use crate::amount::Amount;
use crate::wallet::Address;
use thiserror::Error;

/// Result type alias for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Errors that can occur during token ledger operations.
///
/// Each condition keeps its own stable message; callers and tests match on
/// the variant or the text, and every failure aborts the invocation with no
/// partial state change.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Caller is not the ledger owner (mint/burn are owner-gated).
    #[error("caller {caller} is not the ledger owner")]
    NotOwner {
        /// The rejected caller.
        caller: Address,
    },

    /// Recipient is the null identity.
    #[error("recipient is the zero address")]
    InvalidRecipient,

    /// Insufficient balance for the operation.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance {
        /// Current balance, in base units.
        have: Amount,
        /// Required balance, in base units.
        need: Amount,
    },

    /// Transfer amount exceeds the spender's allowance.
    #[error("transfer amount exceeds allowance: allowed {allowed}, requested {requested}")]
    AllowanceExceeded {
        /// Currently approved amount.
        allowed: Amount,
        /// Amount the spender tried to move.
        requested: Amount,
    },

    /// Arithmetic overflow (supply or balance would exceed `u128`).
    #[error("amount overflow")]
    AmountOverflow,

    /// Invalid address format.
    #[error("invalid address: {message}")]
    InvalidAddress {
        /// Description of the address error.
        message: String,
    },

    /// Wallet error.
    #[error("wallet error: {message}")]
    WalletError {
        /// Description of the wallet error.
        message: String,
    },
}

impl TokenError {
    /// Create an invalid address error.
    #[must_use]
    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::InvalidAddress {
            message: message.into(),
        }
    }

    /// Create an insufficient balance error.
    #[must_use]
    pub fn insufficient_balance(have: Amount, need: Amount) -> Self {
        Self::InsufficientBalance { have, need }
    }
}
