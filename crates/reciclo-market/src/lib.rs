//! # reciclo-market
//!
//! Marketplace registry and deposit transaction log for the Reciclo
//! recycling network.
//!
//! This crate provides:
//!
//! - Company and picker identity records with field-level updates
//!   ([`Registry`])
//! - The deposit → validate → pay transaction lifecycle
//!   ([`TransactionLog`])
//! - Observable marketplace notifications ([`MarketEvent`])
//!
//! Payment settles through the shared [`reciclo_token::AssetLedger`]: a
//! company pre-authorizes the transaction log's settlement identity via
//! `approve`, and `pay_picker` moves `weight * max_price_per_kg` from the
//! company's account to the picker's with `transfer_from`.
//!
//! ## Example
//!
//! ```rust
//! use parking_lot::Mutex;
//! use reciclo_market::{Registry, TransactionLog};
//! use reciclo_token::{Amount, AssetLedger, Wallet};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let owner = Wallet::generate()?.address().clone();
//! let company = Wallet::generate()?.address().clone();
//! let picker = Wallet::generate()?.address().clone();
//! let settlement = Wallet::generate()?.address().clone();
//!
//! let mut ledger = AssetLedger::new("Reciclo", "RCO", 1_000_000, 0, owner.clone());
//! ledger.transfer(&owner, &company, Amount::from_raw(10_000))?;
//! let ledger = Arc::new(Mutex::new(ledger));
//!
//! let mut registry = Registry::new();
//! registry.register_company(&company, "Acme Recycling", 10, 10, true)?;
//! registry.register_picker(&picker, "Ada", "ada@example.com");
//!
//! let mut log = TransactionLog::new(settlement, Arc::clone(&ledger));
//! ledger.lock().approve(&company, log.address(), Amount::from_raw(1_000));
//!
//! let id = log.deposit_plastic(&mut registry, &picker, &company, 100)?;
//! log.validate_plastic(&registry, &company, id)?;
//! let paid = log.pay_picker(&registry, &company, id)?;
//! assert_eq!(paid, Amount::from_raw(1_000));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod log;
pub mod registry;
pub mod transaction;

pub use error::MarketError;
pub use events::MarketEvent;
pub use log::TransactionLog;
pub use registry::{Company, Picker, Registry};
pub use transaction::{Transaction, TransactionId, TransactionStatus};
