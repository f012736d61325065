//! # reciclo-token
//!
//! RCO token ledger for the Reciclo recycling marketplace.
//!
//! This crate provides:
//! - Identity types (`Address`, `Wallet`)
//! - Fixed-point token amounts (`Amount`)
//! - The fungible asset ledger (`AssetLedger`): balances, allowances,
//!   supply, and owner-gated issuance/destruction
//! - An observable notification log (`LedgerEvent`)
//!
//! ## Ledger model
//!
//! The ledger is driven by a deterministic, single-threaded execution host
//! that passes the verified caller identity into every operation and either
//! commits or fully rolls back each invocation. Operations are therefore
//! plain synchronous methods: they validate everything up front and only
//! then write, so a failure never leaves partial state behind.
//!
//! ## Example
//!
//! ```rust
//! use reciclo_token::{AssetLedger, Amount, Wallet, DEFAULT_DECIMALS};
//!
//! # fn example() -> reciclo_token::Result<()> {
//! let owner = Wallet::generate()?.address().clone();
//! let picker = Wallet::generate()?.address().clone();
//!
//! let mut ledger = AssetLedger::new("Reciclo", "RCO", 1000, DEFAULT_DECIMALS, owner.clone());
//! assert_eq!(ledger.total_supply(), Amount::whole(1000, DEFAULT_DECIMALS));
//!
//! ledger.transfer(&owner, &picker, Amount::whole(80, DEFAULT_DECIMALS))?;
//! assert_eq!(ledger.balance_of(&picker), Amount::whole(80, DEFAULT_DECIMALS));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod amount;
pub mod error;
pub mod events;
pub mod ledger;
pub mod wallet;

pub use amount::Amount;
pub use error::{Result, TokenError};
pub use events::LedgerEvent;
pub use ledger::AssetLedger;
pub use wallet::{Address, Wallet};

/// Decimal scaling used by the reference RCO deployment.
pub const DEFAULT_DECIMALS: u8 = 18;
