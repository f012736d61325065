//! The fungible asset ledger.
//!
//! Balances, allowances, and total supply for the RCO accounting unit, with
//! issuance and destruction gated to a single owner identity fixed at
//! construction. The execution host invokes operations serially and passes
//! in the verified caller, so the ledger itself is a plain synchronous
//! structure: every operation validates all of its preconditions before
//! touching any table, which keeps failed invocations free of partial
//! writes.

use crate::amount::Amount;
use crate::error::{Result, TokenError};
use crate::events::LedgerEvent;
use crate::wallet::Address;
use std::collections::HashMap;
use tracing::{debug, info};

/// Fungible balance/allowance/supply bookkeeping.
///
/// Invariant: the sum of all balances equals the total supply after every
/// operation. Mint and burn move both together; transfers only redistribute.
#[derive(Debug, Clone)]
pub struct AssetLedger {
    name: String,
    symbol: String,
    decimals: u8,
    owner: Address,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    events: Vec<LedgerEvent>,
}

impl AssetLedger {
    /// Create a ledger and credit the scaled initial supply to `owner`.
    ///
    /// `initial_supply` is a whole-token count; it is scaled by
    /// `10^decimals` exactly once, here.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        initial_supply: u64,
        decimals: u8,
        owner: Address,
    ) -> Self {
        let supply = Amount::whole(initial_supply, decimals);
        let mut balances = HashMap::new();
        balances.insert(owner.clone(), supply);

        let ledger = Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            owner: owner.clone(),
            total_supply: supply,
            balances,
            allowances: HashMap::new(),
            events: vec![LedgerEvent::Minted {
                to: owner,
                amount: supply,
            }],
        };

        info!(
            name = %ledger.name,
            symbol = %ledger.symbol,
            supply = %supply,
            "asset ledger created"
        );
        ledger
    }

    /// The token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The decimal-scaling factor applied at construction.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// The identity allowed to mint and burn.
    #[must_use]
    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// Whether `identity` is the ledger owner.
    #[must_use]
    pub fn is_owner(&self, identity: &Address) -> bool {
        self.owner == *identity
    }

    /// The balance of an account. Unknown accounts hold zero.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    /// The amount `spender` may currently move out of `owner`'s account.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// The total supply.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Notifications emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Move `amount` from the caller's balance to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidRecipient`] if `to` is the null
    /// identity, [`TokenError::InsufficientBalance`] if the caller holds
    /// less than `amount`.
    pub fn transfer(&mut self, caller: &Address, to: &Address, amount: Amount) -> Result<()> {
        if to.is_zero() {
            return Err(TokenError::InvalidRecipient);
        }
        let have = self.balance_of(caller);
        if have < amount {
            return Err(TokenError::insufficient_balance(have, amount));
        }

        self.move_balance(caller, to, amount);
        self.events.push(LedgerEvent::Transfer {
            from: caller.clone(),
            to: to.clone(),
            amount,
        });

        debug!(from = %caller, to = %to, amount = %amount, "transfer completed");
        Ok(())
    }

    /// Set the allowance of `spender` over the caller's account to `amount`.
    ///
    /// The value is an absolute replacement, not an increment, and may
    /// exceed the caller's balance; balances are only checked when the
    /// allowance is spent.
    pub fn approve(&mut self, caller: &Address, spender: &Address, amount: Amount) {
        self.allowances
            .insert((caller.clone(), spender.clone()), amount);
        self.events.push(LedgerEvent::Approval {
            owner: caller.clone(),
            spender: spender.clone(),
            amount,
        });

        debug!(owner = %caller, spender = %spender, amount = %amount, "allowance set");
    }

    /// Move `amount` from `from` to `to` on behalf of `from`, spending the
    /// caller's allowance.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidRecipient`] if `to` is the null
    /// identity, [`TokenError::AllowanceExceeded`] if the caller's allowance
    /// is below `amount`, [`TokenError::InsufficientBalance`] if `from`
    /// holds less than `amount`. All checks run before any write, so a
    /// failure changes nothing.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()> {
        if to.is_zero() {
            return Err(TokenError::InvalidRecipient);
        }
        let allowed = self.allowance(from, caller);
        if allowed < amount {
            return Err(TokenError::AllowanceExceeded {
                allowed,
                requested: amount,
            });
        }
        let have = self.balance_of(from);
        if have < amount {
            return Err(TokenError::insufficient_balance(have, amount));
        }

        self.allowances
            .insert((from.clone(), caller.clone()), allowed.saturating_sub(amount));
        self.move_balance(from, to, amount);
        self.events.push(LedgerEvent::Transfer {
            from: from.clone(),
            to: to.clone(),
            amount,
        });

        debug!(
            spender = %caller,
            from = %from,
            to = %to,
            amount = %amount,
            "delegated transfer completed"
        );
        Ok(())
    }

    /// Issue `amount` new tokens to `to`. Owner only.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::NotOwner`] if the caller is not the ledger
    /// owner, [`TokenError::InvalidRecipient`] if `to` is the null
    /// identity, [`TokenError::AmountOverflow`] if the supply would exceed
    /// the representable range.
    pub fn mint(&mut self, caller: &Address, to: &Address, amount: Amount) -> Result<()> {
        if !self.is_owner(caller) {
            return Err(TokenError::NotOwner {
                caller: caller.clone(),
            });
        }
        if to.is_zero() {
            return Err(TokenError::InvalidRecipient);
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::AmountOverflow)?;

        self.total_supply = new_supply;
        self.credit(to, amount);
        self.events.push(LedgerEvent::Minted {
            to: to.clone(),
            amount,
        });

        info!(to = %to, amount = %amount, supply = %self.total_supply, "tokens minted");
        Ok(())
    }

    /// Destroy `amount` tokens from the owner's own balance. Owner only.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::NotOwner`] if the caller is not the ledger
    /// owner, [`TokenError::InsufficientBalance`] if `amount` exceeds the
    /// owner's balance.
    pub fn burn(&mut self, caller: &Address, amount: Amount) -> Result<()> {
        if !self.is_owner(caller) {
            return Err(TokenError::NotOwner {
                caller: caller.clone(),
            });
        }
        let have = self.balance_of(&self.owner);
        if have < amount {
            return Err(TokenError::insufficient_balance(have, amount));
        }

        let owner = self.owner.clone();
        self.debit(&owner, amount);
        self.total_supply = self.total_supply.saturating_sub(amount);
        self.events.push(LedgerEvent::Burned {
            from: owner,
            amount,
        });

        info!(amount = %amount, supply = %self.total_supply, "tokens burned");
        Ok(())
    }

    // Balance plumbing. Callers have already verified the debited account
    // covers `amount`; credits cannot overflow because the sum of balances
    // is bounded by the supply, which mint checks.

    fn move_balance(&mut self, from: &Address, to: &Address, amount: Amount) {
        self.debit(from, amount);
        self.credit(to, amount);
    }

    fn debit(&mut self, account: &Address, amount: Amount) {
        if let Some(balance) = self.balances.get_mut(account) {
            *balance = balance.saturating_sub(amount);
        }
    }

    fn credit(&mut self, account: &Address, amount: Amount) {
        let balance = self
            .balances
            .entry(account.clone())
            .or_insert(Amount::ZERO);
        *balance = balance.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::Wallet;
    use crate::DEFAULT_DECIMALS;
    use proptest::prelude::*;

    fn test_address() -> Address {
        Wallet::generate().expect("wallet").address().clone()
    }

    fn setup() -> (AssetLedger, Address) {
        let owner = test_address();
        let ledger = AssetLedger::new("Reciclo", "RCO", 1000, DEFAULT_DECIMALS, owner.clone());
        (ledger, owner)
    }

    fn whole(count: u64) -> Amount {
        Amount::whole(count, DEFAULT_DECIMALS)
    }

    #[test]
    fn test_deployment_sets_owner_and_supply() {
        let (ledger, owner) = setup();

        assert!(ledger.is_owner(&owner));
        assert_eq!(ledger.owner(), &owner);
        assert_eq!(ledger.name(), "Reciclo");
        assert_eq!(ledger.symbol(), "RCO");
        assert_eq!(ledger.decimals(), DEFAULT_DECIMALS);
        assert_eq!(ledger.total_supply(), whole(1000));
        assert_eq!(ledger.balance_of(&owner), whole(1000));
    }

    #[test]
    fn test_transfer_to_two_accounts() {
        let (mut ledger, owner) = setup();
        let account1 = test_address();
        let account2 = test_address();
        let amount = whole(80);

        ledger.transfer(&owner, &account1, amount).expect("transfer 1");
        ledger.transfer(&owner, &account2, amount).expect("transfer 2");

        assert_eq!(ledger.balance_of(&owner), whole(1000 - 160));
        assert_eq!(ledger.balance_of(&account1), amount);
        assert_eq!(ledger.balance_of(&account2), amount);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let (mut ledger, owner) = setup();
        let recipient = test_address();

        let result = ledger.transfer(&owner, &recipient, whole(2000));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { .. })
        ));
        // Nothing moved.
        assert_eq!(ledger.balance_of(&owner), whole(1000));
        assert_eq!(ledger.balance_of(&recipient), Amount::ZERO);
    }

    #[test]
    fn test_transfer_to_zero_address() {
        let (mut ledger, owner) = setup();

        let result = ledger.transfer(&owner, &Address::zero(), whole(1));
        assert!(matches!(result, Err(TokenError::InvalidRecipient)));
    }

    #[test]
    fn test_approve_sets_absolute_allowance() {
        let (mut ledger, owner) = setup();
        let spender = test_address();

        assert_eq!(ledger.allowance(&owner, &spender), Amount::ZERO);

        ledger.approve(&owner, &spender, whole(80));
        assert_eq!(ledger.allowance(&owner, &spender), whole(80));

        // A second approve replaces, it does not add.
        ledger.approve(&owner, &spender, whole(30));
        assert_eq!(ledger.allowance(&owner, &spender), whole(30));
    }

    #[test]
    fn test_allowance_may_exceed_balance() {
        let (mut ledger, owner) = setup();
        let spender = test_address();

        ledger.approve(&owner, &spender, whole(1_000_000));
        assert_eq!(ledger.allowance(&owner, &spender), whole(1_000_000));
    }

    #[test]
    fn test_transfer_from_moves_funds_and_allowance() {
        let (mut ledger, owner) = setup();
        let spender = test_address();
        let recipient = test_address();
        let amount = whole(50);

        ledger.approve(&owner, &spender, amount);
        ledger
            .transfer_from(&spender, &owner, &recipient, amount)
            .expect("delegated transfer");

        assert_eq!(ledger.balance_of(&owner), whole(950));
        assert_eq!(ledger.balance_of(&recipient), amount);
        assert_eq!(ledger.allowance(&owner, &spender), Amount::ZERO);

        // Allowance is spent; any further positive amount is rejected.
        let result = ledger.transfer_from(&spender, &owner, &recipient, Amount::from_raw(1));
        assert!(matches!(result, Err(TokenError::AllowanceExceeded { .. })));
    }

    #[test]
    fn test_transfer_from_without_approval() {
        let (mut ledger, owner) = setup();
        let spender = test_address();
        let recipient = test_address();

        let result = ledger.transfer_from(&spender, &owner, &recipient, whole(150));
        assert!(matches!(result, Err(TokenError::AllowanceExceeded { .. })));
    }

    #[test]
    fn test_transfer_from_insufficient_balance_keeps_allowance() {
        let (mut ledger, owner) = setup();
        let poor = test_address();
        let spender = test_address();
        let recipient = test_address();

        // Allowance covers the request but the account holds nothing.
        ledger.approve(&poor, &spender, whole(10));
        let result = ledger.transfer_from(&spender, &poor, &recipient, whole(10));

        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.allowance(&poor, &spender), whole(10));
        assert_eq!(ledger.balance_of(&recipient), Amount::ZERO);
    }

    #[test]
    fn test_mint_by_owner() {
        let (mut ledger, owner) = setup();
        let recipient = test_address();
        let amount = Amount::from_raw(500);

        ledger.mint(&owner, &recipient, amount).expect("mint");

        assert_eq!(ledger.balance_of(&recipient), amount);
        assert_eq!(
            ledger.total_supply(),
            whole(1000).saturating_add(amount)
        );
    }

    #[test]
    fn test_mint_by_non_owner() {
        let (mut ledger, _owner) = setup();
        let outsider = test_address();
        let recipient = test_address();

        let result = ledger.mint(&outsider, &recipient, Amount::from_raw(500));
        assert!(matches!(result, Err(TokenError::NotOwner { .. })));
        assert_eq!(ledger.total_supply(), whole(1000));
    }

    #[test]
    fn test_mint_to_zero_address() {
        let (mut ledger, owner) = setup();

        let result = ledger.mint(&owner, &Address::zero(), Amount::from_raw(500));
        assert!(matches!(result, Err(TokenError::InvalidRecipient)));
    }

    #[test]
    fn test_mint_overflow() {
        let (mut ledger, owner) = setup();
        let recipient = test_address();

        let result = ledger.mint(&owner, &recipient, Amount::MAX);
        assert!(matches!(result, Err(TokenError::AmountOverflow)));
        assert_eq!(ledger.total_supply(), whole(1000));
    }

    #[test]
    fn test_burn_reduces_supply_and_balance() {
        let (mut ledger, owner) = setup();

        ledger.burn(&owner, whole(80)).expect("burn");

        assert_eq!(ledger.total_supply(), whole(920));
        assert_eq!(ledger.balance_of(&owner), whole(920));
    }

    #[test]
    fn test_burn_by_non_owner() {
        let (mut ledger, _owner) = setup();
        let outsider = test_address();

        let result = ledger.burn(&outsider, whole(80));
        assert!(matches!(result, Err(TokenError::NotOwner { .. })));
    }

    #[test]
    fn test_burn_more_than_balance() {
        let (mut ledger, owner) = setup();

        let result = ledger.burn(&owner, whole(2000));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.total_supply(), whole(1000));
    }

    #[test]
    fn test_events_are_observable() {
        let (mut ledger, owner) = setup();
        let spender = test_address();
        let recipient = test_address();

        ledger.approve(&owner, &spender, whole(50));
        ledger
            .transfer_from(&spender, &owner, &recipient, whole(50))
            .expect("delegated transfer");

        let events = ledger.events();
        // Construction mints the initial supply.
        assert!(matches!(events[0], LedgerEvent::Minted { .. }));
        assert_eq!(
            events[1],
            LedgerEvent::Approval {
                owner: owner.clone(),
                spender,
                amount: whole(50),
            }
        );
        assert_eq!(
            events[2],
            LedgerEvent::Transfer {
                from: owner,
                to: recipient,
                amount: whole(50),
            }
        );
    }

    #[test]
    fn test_failed_operations_emit_nothing() {
        let (mut ledger, owner) = setup();
        let before = ledger.events().len();

        let _ = ledger.transfer(&owner, &Address::zero(), whole(1));
        let _ = ledger.burn(&owner, whole(2000));

        assert_eq!(ledger.events().len(), before);
    }

    #[test]
    fn test_reads_do_not_mutate() {
        let (ledger, owner) = setup();
        let other = test_address();

        let _ = ledger.balance_of(&other);
        let _ = ledger.allowance(&owner, &other);
        let _ = ledger.total_supply();

        // Reading an unknown account must not materialize a record.
        assert_eq!(ledger.balances.len(), 1);
        assert!(ledger.allowances.is_empty());
    }

    proptest! {
        /// Conservation: whatever sequence of operations runs, the sum of
        /// all balances equals the total supply afterwards.
        #[test]
        fn conservation_under_random_ops(
            ops in proptest::collection::vec((0u8..5, 0usize..3, 0usize..3, 0u64..2_000), 1..40)
        ) {
            let accounts: Vec<Address> = (0..3).map(|_| test_address()).collect();
            let owner = accounts[0].clone();
            let mut ledger = AssetLedger::new("Reciclo", "RCO", 1000, 0, owner.clone());

            for (op, a, b, raw) in ops {
                let amount = Amount::from_raw(u128::from(raw));
                let from = &accounts[a];
                let to = &accounts[b];
                // Failures are expected along the way; only the invariant matters.
                match op {
                    0 => { let _ = ledger.transfer(from, to, amount); }
                    1 => { ledger.approve(from, to, amount); }
                    2 => { let _ = ledger.transfer_from(from, to, &accounts[(a + 1) % 3], amount); }
                    3 => { let _ = ledger.mint(from, to, amount); }
                    _ => { let _ = ledger.burn(from, amount); }
                }

                let sum = accounts
                    .iter()
                    .map(|acct| ledger.balance_of(acct).raw())
                    .sum::<u128>();
                prop_assert_eq!(sum, ledger.total_supply().raw());
            }
        }

        /// Allowances never go negative and never move more than approved.
        #[test]
        fn allowance_never_overdrawn(
            approved in 0u64..1_000,
            requests in proptest::collection::vec(0u64..1_500, 1..10)
        ) {
            let owner = test_address();
            let spender = test_address();
            let recipient = test_address();
            let mut ledger = AssetLedger::new("Reciclo", "RCO", 1_000_000, 0, owner.clone());

            ledger.approve(&owner, &spender, Amount::from_raw(u128::from(approved)));

            let mut moved = 0u128;
            for req in requests {
                let amount = Amount::from_raw(u128::from(req));
                if ledger
                    .transfer_from(&spender, &owner, &recipient, amount)
                    .is_ok()
                {
                    moved += u128::from(req);
                }
            }

            prop_assert!(moved <= u128::from(approved));
            prop_assert_eq!(
                ledger.allowance(&owner, &spender).raw(),
                u128::from(approved) - moved
            );
        }
    }
}
