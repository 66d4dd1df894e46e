use anyhow::Result;
use ingro::{accumulator::Accumulator, dialect::Dialect, row::RawRow, stream_rows};

use std::env;
use std::io::stdout;
use std::path::Path;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries the converted statement.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let csv_path = parse_args();
    validate_csv_file(&csv_path);
    process_statement(&csv_path).await
}

fn parse_args() -> String {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => "statement.csv".to_string(),
        2 => args[1].clone(),
        _ => {
            eprintln!("Usage: {} [csv_file]", args[0]);
            eprintln!("  csv_file: Path to an ING Romania export (default: statement.csv)");
            std::process::exit(1);
        }
    }
}

fn validate_csv_file(path: &str) {
    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' does not exist", path);
        std::process::exit(1);
    }

    if !path.to_lowercase().ends_with(".csv") {
        eprintln!("Error: File '{}' is not a CSV file", path);
        std::process::exit(1);
    }
}

async fn process_statement(csv_path: &str) -> Result<()> {
    let rows = stream_rows(csv_path)?;

    // Rows flow through a single channel, so the accumulator still sees
    // them in file order.
    let (tx_channel, mut rx) = mpsc::channel::<RawRow>(100);

    let writer = tokio::spawn(async move {
        let dialect = Dialect::ing_ro();
        let mut accumulator = Accumulator::new(&dialect);
        let mut wtr = csv::Writer::from_writer(stdout());

        while let Some(row) = rx.recv().await {
            if let Some(tx) = accumulator.push(&row)? {
                wtr.serialize(&tx)?;
            }
        }

        accumulator.finish();
        wtr.flush()?;
        anyhow::Ok(())
    });

    for row in rows {
        let row = row?;
        if tx_channel.send(row).await.is_err() {
            // Writer bailed on a fatal error; it is surfaced below.
            break;
        }
    }
    drop(tx_channel);

    writer.await??;
    Ok(())
}
