pub mod batch;
pub mod config;
pub mod domain;
pub mod error;
pub mod parser;
pub mod telemetry;
pub mod writer;

pub use error::{LedgerError, LedgerResult};
