//! Marketplace notifications.
//!
//! The registry and the transaction log each own an append-only event log
//! exposed as a slice, so tests and embedding hosts can assert on emitted
//! notifications directly.

use crate::transaction::TransactionId;
use reciclo_token::{Address, Amount};
use serde::{Deserialize, Serialize};

/// A notification emitted by the registry or the transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketEvent {
    /// A company registered.
    CompanyRegistered {
        /// The registrant.
        address: Address,
    },

    /// A company record was overwritten wholesale.
    CompanyEdited {
        /// The edited company.
        address: Address,
    },

    /// A company changed its display name.
    CompanyNameUpdated {
        /// The company.
        address: Address,
        /// The new name.
        name: String,
    },

    /// A company changed its minimum-weight policy.
    CompanyMinWeightUpdated {
        /// The company.
        address: Address,
        /// The new minimum deposit weight.
        min_weight_requirement: u64,
    },

    /// A company changed its price policy.
    CompanyMaxPriceUpdated {
        /// The company.
        address: Address,
        /// The new price per kilogram, in base units.
        max_price_per_kg: u64,
    },

    /// A company toggled its active flag.
    CompanyActiveStatusUpdated {
        /// The company.
        address: Address,
        /// The new status.
        active: bool,
    },

    /// A picker registered (or re-registered; see `Registry::register_picker`).
    PickerRegistered {
        /// The registrant.
        address: Address,
    },

    /// A picker record's profile fields were overwritten.
    PickerEdited {
        /// The edited picker.
        address: Address,
    },

    /// A picker changed their display name.
    PickerNameUpdated {
        /// The picker.
        address: Address,
        /// The new name.
        name: String,
    },

    /// A picker changed their email.
    PickerEmailUpdated {
        /// The picker.
        address: Address,
        /// The new email.
        email: String,
    },

    /// A picker deposited plastic with a company.
    PlasticDeposited {
        /// The depositing picker.
        picker: Address,
        /// The receiving company.
        company: Address,
        /// The deposited weight, in kilograms.
        weight: u64,
        /// The new pending transaction.
        transaction_id: TransactionId,
    },

    /// A company accepted a pending deposit.
    PlasticValidated {
        /// The approved transaction.
        transaction_id: TransactionId,
    },

    /// A company settled an approved deposit.
    PickerPaid {
        /// The paying company.
        company: Address,
        /// The paid picker.
        picker: Address,
        /// The settled amount, in base units.
        amount: Amount,
        /// The settled transaction.
        transaction_id: TransactionId,
    },
}
