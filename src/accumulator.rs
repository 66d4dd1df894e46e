//! The record-reconciliation fold.
//!
//! Export rows do not map 1:1 to transactions: a header row opens a
//! transaction, continuation rows extend its memo, and the next header or a
//! trailer row closes it. The accumulator holds at most one pending
//! transaction and emits a completed one exactly when a row closes it.

use tracing::{debug, warn};

use crate::amount;
use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::row::{RawRow, RowKind};
use crate::transaction::{CompletedTransaction, PendingTransaction, TransactionType};

pub struct Accumulator<'a> {
    dialect: &'a Dialect,
    pending: Option<PendingTransaction>,
}

impl<'a> Accumulator<'a> {
    pub fn new(dialect: &'a Dialect) -> Self {
        Self {
            dialect,
            pending: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Fold one row, returning the transaction this row closed, if any.
    ///
    /// Rows must be fed in file order: transaction boundaries are defined
    /// entirely by row adjacency.
    pub fn push(&mut self, row: &RawRow) -> Result<Option<CompletedTransaction>, ParseError> {
        match row.classify(self.dialect) {
            RowKind::Ignore => Ok(None),

            RowKind::Header => {
                let date = self
                    .dialect
                    .parse_date(&row.date)
                    .ok_or_else(|| ParseError::InvalidDate(row.date.clone()))?;

                let (amount, kind) = amount::resolve(&row.debit_amount, &row.credit_amount);
                if kind == TransactionType::None {
                    warn!(
                        date = %row.date,
                        details = %row.details,
                        "header row with no debit or credit amount"
                    );
                }

                let closed = self.pending.take().map(PendingTransaction::close);
                self.pending = Some(PendingTransaction::open(
                    date,
                    row.details.clone(),
                    amount,
                    kind,
                ));
                Ok(closed)
            }

            RowKind::Trailer => Ok(self.pending.take().map(PendingTransaction::close)),

            RowKind::Continuation => {
                match self.pending.as_mut() {
                    Some(pending) => {
                        pending.append_memo(&row.details);
                        if pending.refnum.is_none() {
                            pending.refnum = self.dialect.find_refnum(&row.details);
                        }
                    }
                    None => {
                        debug!(
                            details = %row.details,
                            "continuation row with no transaction in progress, dropping"
                        );
                    }
                }
                Ok(None)
            }
        }
    }

    /// End of input. A transaction still open here is dropped, never
    /// emitted: a well-formed export always ends with trailer rows, so an
    /// open pending means the file was truncated.
    pub fn finish(self) {
        if let Some(pending) = self.pending {
            warn!(
                date = %pending.date,
                memo = %pending.memo,
                "input ended with a transaction still in progress, dropping"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn header(date: &str, details: &str, debit: &str, credit: &str) -> RawRow {
        RawRow {
            date: date.to_string(),
            reserved1: String::new(),
            reserved2: String::new(),
            details: details.to_string(),
            reserved3: String::new(),
            debit_amount: debit.to_string(),
            credit_amount: credit.to_string(),
        }
    }

    fn continuation(details: &str) -> RawRow {
        header("", details, "", "")
    }

    fn trailer(reserved1: &str) -> RawRow {
        let mut row = header("", "", "", "");
        row.reserved1 = reserved1.to_string();
        row
    }

    #[test]
    fn test_header_opens_without_emitting() {
        let dialect = Dialect::ing_ro();
        let mut acc = Accumulator::new(&dialect);

        let emitted = acc
            .push(&header("14 martie 2024", "Payment", "100,00", ""))
            .unwrap();
        assert!(emitted.is_none());
        assert!(acc.is_open());
    }

    #[test]
    fn test_next_header_closes_previous() {
        let dialect = Dialect::ing_ro();
        let mut acc = Accumulator::new(&dialect);

        acc.push(&header("14 martie 2024", "Payment", "100,00", ""))
            .unwrap();
        acc.push(&continuation("Referinta: 12345")).unwrap();
        let emitted = acc
            .push(&header("15 martie 2024", "Incasare", "", "2.500,00"))
            .unwrap()
            .expect("previous transaction should close");

        assert_eq!(emitted.date, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert_eq!(emitted.amount, Decimal::from_str("100.00").unwrap());
        assert_eq!(emitted.kind, TransactionType::Debit);
        assert_eq!(emitted.memo, "Payment Referinta: 12345");
        assert_eq!(emitted.refnum, "12345");
        assert!(acc.is_open());
    }

    #[test]
    fn test_trailer_closes_and_resets() {
        let dialect = Dialect::ing_ro();
        let mut acc = Accumulator::new(&dialect);

        acc.push(&header("14 martie 2024", "Payment", "100,00", ""))
            .unwrap();
        let emitted = acc.push(&trailer("Director Sucursala")).unwrap();
        assert!(emitted.is_some());
        assert!(!acc.is_open());

        // A following header starts fresh, no leakage of prior memo/refnum.
        acc.push(&continuation("Referinta: 99999")).unwrap();
        acc.push(&header("15 martie 2024", "Incasare", "", "50,00"))
            .unwrap();
        let emitted = acc.push(&trailer("Semnatura")).unwrap().unwrap();
        assert_eq!(emitted.memo, "Incasare");
        assert_ne!(emitted.refnum, "99999");
    }

    #[test]
    fn test_trailer_with_nothing_pending_emits_nothing() {
        let dialect = Dialect::ing_ro();
        let mut acc = Accumulator::new(&dialect);
        assert!(acc.push(&trailer("Director Sucursala")).unwrap().is_none());
    }

    #[test]
    fn test_refnum_first_match_wins() {
        let dialect = Dialect::ing_ro();
        let mut acc = Accumulator::new(&dialect);

        acc.push(&header("14 martie 2024", "Payment", "100,00", ""))
            .unwrap();
        acc.push(&continuation("Referinta: 11111")).unwrap();
        acc.push(&continuation("Autorizare: 22222")).unwrap();
        let emitted = acc.push(&trailer("Semnatura")).unwrap().unwrap();

        assert_eq!(emitted.refnum, "11111");
        assert_eq!(emitted.memo, "Payment Referinta: 11111 Autorizare: 22222");
    }

    #[test]
    fn test_orphan_continuation_is_dropped() {
        let dialect = Dialect::ing_ro();
        let mut acc = Accumulator::new(&dialect);

        assert!(acc.push(&continuation("stray text")).unwrap().is_none());
        assert!(!acc.is_open());

        acc.push(&header("14 martie 2024", "Payment", "100,00", ""))
            .unwrap();
        let emitted = acc.push(&trailer("Semnatura")).unwrap().unwrap();
        assert_eq!(emitted.memo, "Payment");
    }

    #[test]
    fn test_ignore_rows_do_not_touch_state() {
        let dialect = Dialect::ing_ro();
        let mut acc = Accumulator::new(&dialect);

        acc.push(&header("14 martie 2024", "Payment", "100,00", ""))
            .unwrap();
        let banner = header("Titular cont: POPESCU ION", "", "", "");
        assert!(acc.push(&banner).unwrap().is_none());
        assert!(acc.is_open());
    }

    #[test]
    fn test_zero_amount_header_still_emits() {
        let dialect = Dialect::ing_ro();
        let mut acc = Accumulator::new(&dialect);

        acc.push(&header("14 martie 2024", "Mystery row", "", ""))
            .unwrap();
        let emitted = acc.push(&trailer("Semnatura")).unwrap().unwrap();
        assert_eq!(emitted.kind, TransactionType::None);
        assert_eq!(emitted.amount, Decimal::ZERO);
    }

    #[test]
    fn test_unparseable_header_date_is_fatal() {
        let dialect = Dialect::ing_ro();
        let mut acc = Accumulator::new(&dialect);

        let result = acc.push(&header("14 March 2024", "Payment", "100,00", ""));
        match result {
            Err(ParseError::InvalidDate(value)) => assert_eq!(value, "14 March 2024"),
            _ => panic!("Expected InvalidDate error"),
        }
    }

    #[test]
    fn test_synthesized_refnum_when_no_label_found() {
        let dialect = Dialect::ing_ro();
        let mut acc = Accumulator::new(&dialect);

        acc.push(&header("14 martie 2024", "Payment", "100,00", ""))
            .unwrap();
        acc.push(&continuation("extra text")).unwrap();
        let emitted = acc.push(&trailer("Semnatura")).unwrap().unwrap();

        assert_eq!(
            emitted.refnum,
            format!("{:x}", md5::compute(b"Payment extra text"))
        );
    }
}
