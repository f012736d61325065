//! Ledger notifications.
//!
//! Every state-changing ledger operation appends a notification to an
//! observable log owned by the ledger. Tests and embedding hosts read the
//! log directly; there is no callback registration or language-level event
//! mechanism.

use crate::amount::Amount;
use crate::wallet::Address;
use serde::{Deserialize, Serialize};

/// A notification emitted by the asset ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Tokens moved between two accounts.
    Transfer {
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Amount moved, in base units.
        amount: Amount,
    },

    /// An allowance was set to a new absolute value.
    Approval {
        /// Account whose funds may be spent.
        owner: Address,
        /// Account permitted to spend.
        spender: Address,
        /// The approved amount, in base units.
        amount: Amount,
    },

    /// New tokens were issued.
    Minted {
        /// Credited account.
        to: Address,
        /// Amount issued, in base units.
        amount: Amount,
    },

    /// Tokens were destroyed from the owner's account.
    Burned {
        /// Debited account.
        from: Address,
        /// Amount destroyed, in base units.
        amount: Amount,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::Wallet;

    #[test]
    fn test_event_serialization() {
        let to = Wallet::generate().expect("wallet").address().clone();
        let event = LedgerEvent::Minted {
            to,
            amount: Amount::from_raw(500),
        };

        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("minted"));
        let parsed: LedgerEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(event, parsed);
    }
}
