//! Replays a CSV of operations against a fresh ledger.

use std::io::Read;

use crate::config::Config;
use crate::domain::types::AccountId;
use crate::domain::Ledger;
use crate::error::LedgerError;
use crate::parser::{CsvParser, ParseError};

#[derive(Debug)]
pub struct BatchOutcome {
    pub ledger: Ledger,
    pub applied: usize,
    pub rejected: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Rejected {operation} on account {account}")]
    Rejected {
        operation: &'static str,
        account: AccountId,
        #[source]
        source: LedgerError,
    },
}

/// Parses and applies every row of `reader`.
///
/// Bad rows and rejected operations are logged and counted, unless
/// `config.fail_fast` is set, in which case the first one is returned.
pub fn run<R: Read>(reader: R, config: &Config) -> Result<BatchOutcome, BatchError> {
    let parser = CsvParser::new(reader)?;

    let mut outcome = BatchOutcome {
        ledger: Ledger::new(),
        applied: 0,
        rejected: 0,
    };

    for result in parser {
        let operation = match result {
            Ok(operation) => operation,
            Err(e) if config.fail_fast => return Err(e.into()),
            Err(e) => {
                tracing::warn!(line = e.line, "{}", e.message);
                outcome.rejected += 1;
                continue;
            }
        };

        match outcome.ledger.process(&operation) {
            Ok(()) => outcome.applied += 1,
            Err(source) if config.fail_fast => {
                return Err(BatchError::Rejected {
                    operation: operation.kind(),
                    account: operation.account().clone(),
                    source,
                })
            }
            Err(_) => outcome.rejected += 1,
        }
    }

    tracing::info!(
        accounts = outcome.ledger.len(),
        applied = outcome.applied,
        rejected = outcome.rejected,
        "finished processing"
    );
    Ok(outcome)
}
