pub mod accumulator;
pub mod amount;
pub mod dialect;
pub mod error;
pub mod row;
pub mod transaction;

use csv::ReaderBuilder;

use crate::accumulator::Accumulator;
use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::row::RawRow;
use crate::transaction::CompletedTransaction;

/// Stream the raw 7-field rows of an export file, in file order.
///
/// The reader is headerless and flexible: the column-header row is ordinary
/// data (the classifier drops it), and the field count is enforced per row
/// so a short row surfaces as [`ParseError::MalformedRow`].
pub fn stream_rows(
    path: &str,
) -> Result<impl Iterator<Item = Result<RawRow, ParseError>>, ParseError> {
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    Ok(rdr.into_records().map(|result| {
        let record = result?;
        RawRow::try_from(&record)
    }))
}

/// Parse a whole export file into completed transactions.
pub fn parse_statement(
    path: &str,
    dialect: &Dialect,
) -> Result<Vec<CompletedTransaction>, ParseError> {
    let mut accumulator = Accumulator::new(dialect);
    let mut transactions = Vec::new();

    for row in stream_rows(path)? {
        if let Some(tx) = accumulator.push(&row?)? {
            transactions.push(tx);
        }
    }
    accumulator.finish();

    Ok(transactions)
}
