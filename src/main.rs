use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

use anyhow::{bail, Context};

use account_ledger::batch;
use account_ledger::config::Config;
use account_ledger::telemetry;
use account_ledger::writer::{write_csv, OutputRecord};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(config.log_format);

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        bail!(
            "Usage: {} <operations.csv>\nExpected exactly 1 argument, got {}",
            args.first().map_or("account-ledger", String::as_str),
            args.len().saturating_sub(1)
        );
    }

    let file_path = &args[1];

    let file = File::open(file_path).with_context(|| format!("Failed to open '{}'", file_path))?;
    let outcome = batch::run(BufReader::new(file), &config)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let records = outcome.ledger.accounts().map(OutputRecord::from_account);

    write_csv(&mut handle, records).context("Failed to write output")?;

    Ok(())
}
