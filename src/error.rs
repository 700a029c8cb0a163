use crate::domain::types::{AccountId, Amount};

/// Reasons an account, money or ledger operation is rejected.
///
/// Every variant is returned before any state changes, so a caller can
/// recover by simply dropping the operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: String, found: String },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("account {0} already exists")]
    AccountExists(AccountId),

    #[error("account {0} not found")]
    UnknownAccount(AccountId),
}

impl LedgerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        LedgerError::InvalidArgument(message.into())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
