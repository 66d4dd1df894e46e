use csv::StringRecord;

use crate::dialect::Dialect;
use crate::error::ParseError;

/// Fixed field count of the export format.
pub const FIELD_COUNT: usize = 7;

/// One raw export row in source order. The reserved fields carry data only
/// in the end-of-statement signature block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub date: String,
    pub reserved1: String,
    pub reserved2: String,
    pub details: String,
    pub reserved3: String,
    pub debit_amount: String,
    pub credit_amount: String,
}

impl TryFrom<&StringRecord> for RawRow {
    type Error = ParseError;

    fn try_from(record: &StringRecord) -> Result<Self, Self::Error> {
        if record.len() != FIELD_COUNT {
            return Err(ParseError::MalformedRow {
                expected: FIELD_COUNT,
                got: record.len(),
            });
        }

        Ok(RawRow {
            date: record[0].to_string(),
            reserved1: record[1].to_string(),
            reserved2: record[2].to_string(),
            details: record[3].to_string(),
            reserved3: record[4].to_string(),
            debit_amount: record[5].to_string(),
            credit_amount: record[6].to_string(),
        })
    }
}

/// Role of a row in the statement. Rows do not map 1:1 to transactions:
/// a transaction spans one `Header` row plus any following `Continuation`
/// rows, and is closed by the next `Header` or a `Trailer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Ignore,
    Header,
    Trailer,
    Continuation,
}

impl RawRow {
    /// Classify this row. The `Ignore` checks must come first: the
    /// column-header row has a non-empty date field and would otherwise
    /// read as a `Header`.
    pub fn classify(&self, dialect: &Dialect) -> RowKind {
        if self.date == dialect.header_label || self.date.starts_with(&dialect.owner_banner) {
            RowKind::Ignore
        } else if !self.date.is_empty() {
            RowKind::Header
        } else if !self.reserved1.is_empty() {
            RowKind::Trailer
        } else {
            RowKind::Continuation
        }
    }
}
