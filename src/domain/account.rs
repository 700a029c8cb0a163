use serde::Serialize;

use crate::domain::types::{AccountId, Amount};
use crate::error::{LedgerError, LedgerResult};

/// A named holder of a non-negative balance.
///
/// The balance can only change through [`deposit`](Account::deposit),
/// [`withdraw`](Account::withdraw) and [`transfer`](Account::transfer); each of
/// them validates fully before touching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    owner: String,
    balance: Amount,
}

impl Account {
    pub fn new(
        id: impl Into<AccountId>,
        owner: impl Into<String>,
        initial_balance: Amount,
    ) -> LedgerResult<Self> {
        let id = id.into();
        let owner = owner.into();

        if id.is_blank() {
            return Err(LedgerError::invalid("account id cannot be empty"));
        }
        if owner.trim().is_empty() {
            return Err(LedgerError::invalid("owner cannot be empty"));
        }
        if initial_balance.is_negative() {
            return Err(LedgerError::invalid("initial balance cannot be negative"));
        }

        Ok(Account {
            id,
            owner,
            balance: initial_balance,
        })
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn deposit(&mut self, amount: Amount) -> LedgerResult<()> {
        self.balance = self.credited(amount)?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Amount) -> LedgerResult<()> {
        self.balance = self.debited(amount)?;
        Ok(())
    }

    /// Moves `amount` from this account into `destination`.
    ///
    /// Both new balances are computed before either is stored, so a failed
    /// transfer leaves both accounts as they were.
    pub fn transfer(
        &mut self,
        destination: Option<&mut Account>,
        amount: Amount,
    ) -> LedgerResult<()> {
        let destination =
            destination.ok_or_else(|| LedgerError::invalid("destination account is required"))?;
        ensure_positive(amount)?;

        let source_balance = self.debited(amount)?;
        let destination_balance = destination.credited(amount)?;

        self.balance = source_balance;
        destination.balance = destination_balance;
        Ok(())
    }

    fn credited(&self, amount: Amount) -> LedgerResult<Amount> {
        ensure_positive(amount)?;
        self.balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)
    }

    fn debited(&self, amount: Amount) -> LedgerResult<Amount> {
        ensure_positive(amount)?;
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)
    }
}

fn ensure_positive(amount: Amount) -> LedgerResult<()> {
    if !amount.is_positive() {
        return Err(LedgerError::invalid("amount must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn amount(s: &str) -> Amount {
        Amount::from_str_rounded(s).expect("failed to parse amount")
    }

    fn jean() -> Account {
        Account::new("BE12345678", "Jean Dupont", amount("1000")).expect("valid account")
    }

    #[test]
    fn test_new_keeps_identity_and_balance() {
        let account = jean();
        assert_eq!(account.id().as_str(), "BE12345678");
        assert_eq!(account.owner(), "Jean Dupont");
        assert_eq!(account.balance(), amount("1000"));
    }

    #[test]
    fn test_new_with_zero_balance() {
        let account = Account::new("BE1", "Jean", Amount::ZERO).expect("zero is allowed");
        assert_eq!(account.balance(), Amount::ZERO);
    }

    #[test]
    fn test_new_rejects_blank_id() {
        let err = Account::new("", "Jean Dupont", amount("1000")).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));

        let err = Account::new("   ", "Jean Dupont", amount("1000")).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));
    }

    #[test]
    fn test_new_rejects_blank_owner() {
        let err = Account::new("BE12345678", " ", amount("1000")).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));
    }

    #[test]
    fn test_new_rejects_negative_balance() {
        let err = Account::new("BE12345678", "Jean Dupont", amount("-100")).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));
    }

    #[test]
    fn test_deposit_increases_balance() {
        let mut account = jean();
        account.deposit(amount("500")).expect("deposit should succeed");
        assert_eq!(account.balance(), amount("1500"));
    }

    #[test]
    fn test_deposit_rejects_non_positive_amounts() {
        let mut account = jean();
        for bad in ["-100", "0"] {
            let err = account.deposit(amount(bad)).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidArgument(_)));
        }
        assert_eq!(account.balance(), amount("1000"));
    }

    #[test]
    fn test_deposit_below_precision_rejected() {
        let mut account = Account::new("BE1", "Jean", Amount::ZERO).expect("valid");
        let err = account
            .deposit(Amount::new(Decimal::new(1, 8)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));
        assert_eq!(account.balance(), Amount::ZERO);
        assert_eq!(account.balance().to_string(), "0.0000");
    }

    #[test]
    fn test_deposit_overflow_leaves_balance() {
        let mut account = Account::new("BE1", "Jean", Amount::new(Decimal::MAX)).expect("valid");
        assert_eq!(account.deposit(amount("1")), Err(LedgerError::Overflow));
        assert_eq!(account.balance(), Amount::new(Decimal::MAX));
    }

    #[test]
    fn test_withdraw_decreases_balance() {
        let mut account = jean();
        account.withdraw(amount("300")).expect("withdraw should succeed");
        assert_eq!(account.balance(), amount("700"));
    }

    #[test]
    fn test_withdraw_exact_balance() {
        let mut account = jean();
        account.withdraw(amount("1000")).expect("withdraw should succeed");
        assert_eq!(account.balance(), Amount::ZERO);
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let mut account = jean();
        let err = account.withdraw(amount("1500")).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                requested: amount("1500"),
                available: amount("1000"),
            }
        );
        assert_eq!(account.balance(), amount("1000"));
    }

    #[test]
    fn test_withdraw_rejects_non_positive_amounts() {
        let mut account = jean();
        for bad in ["-1", "0"] {
            let err = account.withdraw(amount(bad)).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidArgument(_)));
        }
        assert_eq!(account.balance(), amount("1000"));
    }

    #[test]
    fn test_transfer_moves_funds() {
        let mut source = jean();
        let mut destination =
            Account::new("BE87654321", "Marie Martin", amount("500")).expect("valid account");

        source
            .transfer(Some(&mut destination), amount("300"))
            .expect("transfer should succeed");

        assert_eq!(source.balance(), amount("700"));
        assert_eq!(destination.balance(), amount("800"));
    }

    #[test]
    fn test_transfer_without_destination() {
        let mut source = jean();
        let err = source.transfer(None, amount("300")).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));
        assert_eq!(source.balance(), amount("1000"));
    }

    #[test]
    fn test_transfer_rejects_non_positive_amount() {
        let mut source = jean();
        let mut destination = Account::new("BE2", "Marie", amount("500")).expect("valid");
        let err = source
            .transfer(Some(&mut destination), Amount::ZERO)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));
        assert_eq!(source.balance(), amount("1000"));
        assert_eq!(destination.balance(), amount("500"));
    }

    #[test]
    fn test_transfer_insufficient_funds_changes_nothing() {
        let mut source = jean();
        let mut destination = Account::new("BE2", "Marie", amount("500")).expect("valid");
        let err = source
            .transfer(Some(&mut destination), amount("1000.0001"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(source.balance(), amount("1000"));
        assert_eq!(destination.balance(), amount("500"));
    }

    #[test]
    fn test_transfer_destination_overflow_changes_nothing() {
        let mut source = jean();
        let mut destination = Account::new("BE2", "Marie", Amount::new(Decimal::MAX)).expect("valid");
        let err = source
            .transfer(Some(&mut destination), amount("1"))
            .unwrap_err();
        assert_eq!(err, LedgerError::Overflow);
        assert_eq!(source.balance(), amount("1000"));
        assert_eq!(destination.balance(), Amount::new(Decimal::MAX));
    }
}
