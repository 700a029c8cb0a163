use std::collections::BTreeMap;

use crate::domain::account::Account;
use crate::domain::types::{AccountId, Amount};
use crate::error::{LedgerError, LedgerResult};

/// A single instruction against the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Open {
        account: AccountId,
        owner: String,
        initial_balance: Amount,
    },
    Deposit {
        account: AccountId,
        amount: Amount,
    },
    Withdraw {
        account: AccountId,
        amount: Amount,
    },
    Transfer {
        account: AccountId,
        destination: AccountId,
        amount: Amount,
    },
}

impl Operation {
    pub fn account(&self) -> &AccountId {
        match self {
            Operation::Open { account, .. }
            | Operation::Deposit { account, .. }
            | Operation::Withdraw { account, .. }
            | Operation::Transfer { account, .. } => account,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Open { .. } => "open",
            Operation::Deposit { .. } => "deposit",
            Operation::Withdraw { .. } => "withdraw",
            Operation::Transfer { .. } => "transfer",
        }
    }
}

/// Owns accounts by id and applies operations to them.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: BTreeMap<AccountId, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            accounts: BTreeMap::new(),
        }
    }

    pub fn get_account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Applies `operation`. On error no balance has changed.
    pub fn process(&mut self, operation: &Operation) -> LedgerResult<()> {
        let result = match operation {
            Operation::Open {
                account,
                owner,
                initial_balance,
            } => self.open(account, owner, *initial_balance),
            Operation::Deposit { account, amount } => self
                .account_mut(account)
                .and_then(|acc| acc.deposit(*amount)),
            Operation::Withdraw { account, amount } => self
                .account_mut(account)
                .and_then(|acc| acc.withdraw(*amount)),
            Operation::Transfer {
                account,
                destination,
                amount,
            } => self.transfer(account, destination, *amount),
        };

        match &result {
            Ok(()) => tracing::debug!(
                op = operation.kind(),
                account = %operation.account(),
                "operation applied"
            ),
            Err(e) => tracing::warn!(
                op = operation.kind(),
                account = %operation.account(),
                error = %e,
                "operation rejected"
            ),
        }
        result
    }

    fn open(&mut self, id: &AccountId, owner: &str, initial_balance: Amount) -> LedgerResult<()> {
        if self.accounts.contains_key(id) {
            return Err(LedgerError::AccountExists(id.clone()));
        }
        let account = Account::new(id.clone(), owner, initial_balance)?;
        self.accounts.insert(id.clone(), account);
        Ok(())
    }

    fn account_mut(&mut self, id: &AccountId) -> LedgerResult<&mut Account> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::UnknownAccount(id.clone()))
    }

    fn transfer(
        &mut self,
        source: &AccountId,
        destination: &AccountId,
        amount: Amount,
    ) -> LedgerResult<()> {
        if source == destination {
            return Err(LedgerError::invalid("cannot transfer to the same account"));
        }

        // Take the destination out so both accounts can be borrowed mutably.
        let mut destination_account = self.accounts.remove(destination);
        let result = match self.accounts.get_mut(source) {
            Some(source_account) => source_account.transfer(destination_account.as_mut(), amount),
            None => Err(LedgerError::UnknownAccount(source.clone())),
        };
        if let Some(account) = destination_account {
            self.accounts.insert(account.id().clone(), account);
        }
        result
    }
}
