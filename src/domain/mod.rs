pub mod account;
pub mod ledger;
pub mod money;
pub mod types;

pub use account::Account;
pub use ledger::{Ledger, Operation};
pub use money::Money;
pub use types::{AccountId, Amount};
