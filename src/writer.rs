use std::io::Write;

use crate::domain::types::{AccountId, Amount};
use crate::domain::Account;

pub struct OutputRecord {
    pub account: AccountId,
    pub owner: String,
    pub balance: Amount,
}

impl OutputRecord {
    pub fn from_account(account: &Account) -> Self {
        OutputRecord {
            account: account.id().clone(),
            owner: account.owner().to_string(),
            balance: account.balance(),
        }
    }
}

pub fn write_csv<W: Write>(
    writer: &mut W,
    records: impl Iterator<Item = OutputRecord>,
) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(["account", "owner", "balance"])?;
    for record in records {
        csv_writer.write_record([
            record.account.as_str(),
            record.owner.as_str(),
            record.balance.to_string().as_str(),
        ])?;
    }
    csv_writer.flush()?;

    Ok(())
}
