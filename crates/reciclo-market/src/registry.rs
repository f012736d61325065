//! Company and picker identity records.
//!
//! One record per identity, stored in keyed maps with explicit presence
//! checks; a missing key means "not registered", never a zero-valued
//! default record. Records are created only through registration and are
//! never deleted, so the registered counts are simply the map sizes.

use crate::error::MarketError;
use crate::events::MarketEvent;
use crate::transaction::TransactionId;
use reciclo_token::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// A registered recycling company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Display name.
    pub name: String,
    /// Minimum deposit weight (kg) the company accepts.
    pub min_weight_requirement: u64,
    /// Price paid per kilogram, in token base units. Always greater than
    /// zero for the life of the record.
    pub max_price_per_kg: u64,
    /// Whether the company is currently accepting deposits.
    pub active: bool,
}

/// A registered waste picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picker {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Total weight (kg) ever deposited. Monotonically non-decreasing.
    pub weight_deposited: u64,
    /// Ids of this picker's deposit transactions, in deposit order. Indices
    /// into the transaction log's arena, not copies.
    pub transaction_ids: Vec<TransactionId>,
}

/// The identity registry: company and picker records keyed by address.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    companies: HashMap<Address, Company>,
    pickers: HashMap<Address, Picker>,
    events: Vec<MarketEvent>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a company record for the caller.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::CompanyAlreadyRegistered`] if the caller
    /// already has a record, [`MarketError::InvalidPrice`] if
    /// `max_price_per_kg` is zero.
    pub fn register_company(
        &mut self,
        caller: &Address,
        name: impl Into<String>,
        min_weight_requirement: u64,
        max_price_per_kg: u64,
        active: bool,
    ) -> Result<(), MarketError> {
        if self.companies.contains_key(caller) {
            return Err(MarketError::CompanyAlreadyRegistered {
                address: caller.clone(),
            });
        }
        if max_price_per_kg == 0 {
            return Err(MarketError::InvalidPrice);
        }

        self.companies.insert(
            caller.clone(),
            Company {
                name: name.into(),
                min_weight_requirement,
                max_price_per_kg,
                active,
            },
        );
        self.events.push(MarketEvent::CompanyRegistered {
            address: caller.clone(),
        });

        info!(address = %caller, "company registered");
        Ok(())
    }

    /// Overwrite every field of the caller's company record.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::CompanyNotRegistered`] without an existing
    /// record, [`MarketError::InvalidPrice`] if `max_price_per_kg` is zero
    /// (the price stays positive for the life of the record).
    pub fn edit_company(
        &mut self,
        caller: &Address,
        name: impl Into<String>,
        min_weight_requirement: u64,
        max_price_per_kg: u64,
        active: bool,
    ) -> Result<(), MarketError> {
        let company = self.company_mut(caller)?;
        if max_price_per_kg == 0 {
            return Err(MarketError::InvalidPrice);
        }
        *company = Company {
            name: name.into(),
            min_weight_requirement,
            max_price_per_kg,
            active,
        };
        self.events.push(MarketEvent::CompanyEdited {
            address: caller.clone(),
        });

        debug!(address = %caller, "company edited");
        Ok(())
    }

    /// Update only the company's display name.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::CompanyNotRegistered`] without an existing
    /// record.
    pub fn update_company_name(
        &mut self,
        caller: &Address,
        name: impl Into<String>,
    ) -> Result<(), MarketError> {
        let name = name.into();
        let company = self.company_mut(caller)?;
        company.name.clone_from(&name);
        self.events.push(MarketEvent::CompanyNameUpdated {
            address: caller.clone(),
            name,
        });
        Ok(())
    }

    /// Update only the company's minimum-weight policy.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::CompanyNotRegistered`] without an existing
    /// record.
    pub fn update_company_min_weight_requirement(
        &mut self,
        caller: &Address,
        min_weight_requirement: u64,
    ) -> Result<(), MarketError> {
        let company = self.company_mut(caller)?;
        company.min_weight_requirement = min_weight_requirement;
        self.events.push(MarketEvent::CompanyMinWeightUpdated {
            address: caller.clone(),
            min_weight_requirement,
        });
        Ok(())
    }

    /// Update only the company's price policy.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::CompanyNotRegistered`] without an existing
    /// record, [`MarketError::InvalidPrice`] if the new price is zero.
    pub fn update_company_max_price_per_kg(
        &mut self,
        caller: &Address,
        max_price_per_kg: u64,
    ) -> Result<(), MarketError> {
        if max_price_per_kg == 0 {
            return Err(MarketError::InvalidPrice);
        }
        let company = self.company_mut(caller)?;
        company.max_price_per_kg = max_price_per_kg;
        self.events.push(MarketEvent::CompanyMaxPriceUpdated {
            address: caller.clone(),
            max_price_per_kg,
        });
        Ok(())
    }

    /// Update only the company's active flag.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::CompanyNotRegistered`] without an existing
    /// record.
    pub fn update_company_active_status(
        &mut self,
        caller: &Address,
        active: bool,
    ) -> Result<(), MarketError> {
        let company = self.company_mut(caller)?;
        company.active = active;
        self.events.push(MarketEvent::CompanyActiveStatusUpdated {
            address: caller.clone(),
            active,
        });
        Ok(())
    }

    /// Register a picker record for the caller.
    ///
    /// Unlike companies, a repeated registration is not rejected: it
    /// refreshes the profile fields and leaves the accumulated
    /// `weight_deposited` and `transaction_ids` untouched, since those are
    /// monotonic marketplace state rather than profile data.
    pub fn register_picker(
        &mut self,
        caller: &Address,
        name: impl Into<String>,
        email: impl Into<String>,
    ) {
        let name = name.into();
        let email = email.into();
        match self.pickers.get_mut(caller) {
            Some(picker) => {
                picker.name = name;
                picker.email = email;
            }
            None => {
                self.pickers.insert(
                    caller.clone(),
                    Picker {
                        name,
                        email,
                        weight_deposited: 0,
                        transaction_ids: Vec::new(),
                    },
                );
            }
        }
        self.events.push(MarketEvent::PickerRegistered {
            address: caller.clone(),
        });

        info!(address = %caller, "picker registered");
    }

    /// Overwrite the profile fields of the caller's picker record.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::PickerNotRegistered`] without an existing
    /// record.
    pub fn edit_picker(
        &mut self,
        caller: &Address,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<(), MarketError> {
        let picker = self.picker_mut(caller)?;
        picker.name = name.into();
        picker.email = email.into();
        self.events.push(MarketEvent::PickerEdited {
            address: caller.clone(),
        });

        debug!(address = %caller, "picker edited");
        Ok(())
    }

    /// Update only the picker's display name.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::PickerNotRegistered`] without an existing
    /// record.
    pub fn update_picker_name(
        &mut self,
        caller: &Address,
        name: impl Into<String>,
    ) -> Result<(), MarketError> {
        let name = name.into();
        let picker = self.picker_mut(caller)?;
        picker.name.clone_from(&name);
        self.events.push(MarketEvent::PickerNameUpdated {
            address: caller.clone(),
            name,
        });
        Ok(())
    }

    /// Update only the picker's email.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::PickerNotRegistered`] without an existing
    /// record.
    pub fn update_picker_email(
        &mut self,
        caller: &Address,
        email: impl Into<String>,
    ) -> Result<(), MarketError> {
        let email = email.into();
        let picker = self.picker_mut(caller)?;
        picker.email.clone_from(&email);
        self.events.push(MarketEvent::PickerEmailUpdated {
            address: caller.clone(),
            email,
        });
        Ok(())
    }

    /// Look up a company record.
    #[must_use]
    pub fn company(&self, address: &Address) -> Option<&Company> {
        self.companies.get(address)
    }

    /// Look up a picker record.
    #[must_use]
    pub fn picker(&self, address: &Address) -> Option<&Picker> {
        self.pickers.get(address)
    }

    /// Number of distinct identities that have ever registered a company.
    #[must_use]
    pub fn registered_company_count(&self) -> usize {
        self.companies.len()
    }

    /// Number of distinct identities that have ever registered a picker.
    #[must_use]
    pub fn registered_picker_count(&self) -> usize {
        self.pickers.len()
    }

    /// Notifications emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    fn company_mut(&mut self, address: &Address) -> Result<&mut Company, MarketError> {
        self.companies
            .get_mut(address)
            .ok_or_else(|| MarketError::CompanyNotRegistered {
                address: address.clone(),
            })
    }

    fn picker_mut(&mut self, address: &Address) -> Result<&mut Picker, MarketError> {
        self.pickers
            .get_mut(address)
            .ok_or_else(|| MarketError::PickerNotRegistered {
                address: address.clone(),
            })
    }

    /// Record a deposit against a picker: bump the accumulated weight and
    /// append the transaction id. Used by the transaction log.
    pub(crate) fn record_deposit(
        &mut self,
        picker: &Address,
        weight: u64,
        transaction_id: TransactionId,
    ) -> Result<(), MarketError> {
        let record = self.picker_mut(picker)?;
        record.weight_deposited = record.weight_deposited.saturating_add(weight);
        record.transaction_ids.push(transaction_id);
        Ok(())
    }
}
