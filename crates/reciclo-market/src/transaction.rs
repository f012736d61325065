//! Deposit transaction records.
//!
//! Transactions live in an append-only arena owned by the
//! [`TransactionLog`](crate::log::TransactionLog); their id is the index at
//! which they were inserted. Records are never deleted, and their two
//! lifecycle flags only ever move forward: `is_approved` flips false→true
//! once (validation), then `is_paid` flips false→true once (payment).

use crate::error::MarketError;
use reciclo_token::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a deposit transaction: its insertion index in the arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Wrap an arena index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// The arena index.
    #[must_use]
    pub const fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle stage of a deposit transaction, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Deposited, awaiting company validation.
    Pending,
    /// Validated against the company's minimum-weight policy, awaiting payment.
    Approved,
    /// Paid out. Terminal.
    Settled,
}

impl TransactionStatus {
    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Settled => write!(f, "settled"),
        }
    }
}

/// One deposit-to-payment lifecycle record linking a picker, a company, and
/// a weight quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sequential id (arena index).
    pub id: TransactionId,

    /// The company the plastic was deposited with.
    pub company: Address,

    /// The picker who deposited it.
    pub picker: Address,

    /// Deposited weight, in kilograms.
    pub weight: u64,

    /// Whether the company has validated the deposit.
    pub is_approved: bool,

    /// Whether the picker has been paid. Implies `is_approved`.
    pub is_paid: bool,
}

impl Transaction {
    /// Create a new pending transaction.
    #[must_use]
    pub const fn new(id: TransactionId, company: Address, picker: Address, weight: u64) -> Self {
        Self {
            id,
            company,
            picker,
            weight,
            is_approved: false,
            is_paid: false,
        }
    }

    /// The current lifecycle stage.
    #[must_use]
    pub const fn status(&self) -> TransactionStatus {
        if self.is_paid {
            TransactionStatus::Settled
        } else if self.is_approved {
            TransactionStatus::Approved
        } else {
            TransactionStatus::Pending
        }
    }

    /// Mark the deposit as validated.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidState`] unless the transaction is
    /// pending.
    pub fn approve(&mut self) -> Result<(), MarketError> {
        if self.status() != TransactionStatus::Pending {
            return Err(MarketError::InvalidState {
                transaction_id: self.id,
                state: self.status(),
            });
        }
        self.is_approved = true;
        Ok(())
    }

    /// Mark the deposit as paid out.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidState`] unless the transaction is
    /// approved and not yet settled.
    pub fn settle(&mut self) -> Result<(), MarketError> {
        if self.status() != TransactionStatus::Approved {
            return Err(MarketError::InvalidState {
                transaction_id: self.id,
                state: self.status(),
            });
        }
        self.is_paid = true;
        Ok(())
    }
}
