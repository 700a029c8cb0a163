use csv::ReaderBuilder;
use std::io::Read;

use crate::domain::types::{AccountId, Amount, OperationType};
use crate::domain::Operation;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        ParseError {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
struct Columns {
    op: usize,
    account: usize,
    owner: usize,
    amount: usize,
    destination: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, ParseError> {
        Ok(Columns {
            op: column_index(headers, "op")?,
            account: column_index(headers, "account")?,
            owner: column_index(headers, "owner")?,
            amount: column_index(headers, "amount")?,
            destination: column_index(headers, "destination")?,
        })
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, ParseError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| ParseError::new(1, format!("Missing required column: '{}'", name)))
}

/// Streams [`Operation`]s out of a CSV document with an
/// `op,account,owner,amount,destination` header (any column order).
#[derive(Debug)]
pub struct CsvParser<R: Read> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
    columns: Columns,
}

impl<R: Read> CsvParser<R> {
    pub fn new(reader: R) -> Result<Self, ParseError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = match reader.headers() {
            Ok(headers) => Columns::locate(headers)?,
            Err(e) => return Err(ParseError::new(1, format!("Failed to read headers: {}", e))),
        };

        Ok(CsvParser {
            reader,
            record: csv::StringRecord::new(),
            columns,
        })
    }

    /// Reads the next row. Errors carry the physical line the row starts on,
    /// blank lines included.
    pub fn next_record(&mut self) -> Option<Result<Operation, ParseError>> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let line = self
                    .record
                    .position()
                    .map_or_else(|| self.reader.position().line(), |p| p.line());
                Some(self.parse_record(&self.record, line as usize))
            }
            Ok(false) => None,
            Err(e) => {
                let line = e
                    .position()
                    .map_or_else(|| self.reader.position().line(), |p| p.line());
                Some(Err(ParseError::new(
                    line as usize,
                    format!("CSV error: {}", e),
                )))
            }
        }
    }

    fn parse_record(
        &self,
        record: &csv::StringRecord,
        line: usize,
    ) -> Result<Operation, ParseError> {
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let op_str = field(self.columns.op);
        let op: OperationType = op_str
            .parse()
            .map_err(|_| ParseError::new(line, format!("Unknown operation: '{}'", op_str)))?;

        let account = AccountId::new(field(self.columns.account));

        let amount_str = field(self.columns.amount);
        let amount = if amount_str.is_empty() {
            None
        } else {
            let parsed = Amount::from_str_rounded(amount_str).map_err(|_| {
                ParseError::new(line, format!("Invalid amount: '{}'", amount_str))
            })?;
            Some(parsed)
        };
        let require_amount = || {
            amount.ok_or_else(|| ParseError::new(line, format!("'{}' requires an amount", op_str)))
        };

        let operation = match op {
            OperationType::Open => {
                let owner = field(self.columns.owner);
                if owner.is_empty() {
                    return Err(ParseError::new(line, "'open' requires an owner"));
                }
                Operation::Open {
                    account,
                    owner: owner.to_string(),
                    initial_balance: amount.unwrap_or(Amount::ZERO),
                }
            }
            OperationType::Deposit => Operation::Deposit {
                account,
                amount: require_amount()?,
            },
            OperationType::Withdraw => Operation::Withdraw {
                account,
                amount: require_amount()?,
            },
            OperationType::Transfer => {
                let destination = field(self.columns.destination);
                if destination.is_empty() {
                    return Err(ParseError::new(line, "'transfer' requires a destination"));
                }
                Operation::Transfer {
                    account,
                    destination: AccountId::new(destination),
                    amount: require_amount()?,
                }
            }
        };

        Ok(operation)
    }
}

impl<R: Read> Iterator for CsvParser<R> {
    type Item = Result<Operation, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}
