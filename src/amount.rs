//! Romanian-locale numeric normalization: `.` is the thousands separator,
//! `,` the decimal separator (`"1.234,56"` means 1234.56).

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::transaction::TransactionType;

pub fn normalize(raw: &str) -> Decimal {
    let raw = raw.trim();
    if raw.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = raw.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).unwrap_or(Decimal::ZERO)
}

/// Resolve the debit/credit column pair of a header row. Exactly one of the
/// two is expected to be non-zero; when neither is, the caller emits the
/// transaction anyway with a zero amount and `TransactionType::None`.
pub fn resolve(debit: &str, credit: &str) -> (Decimal, TransactionType) {
    let debit = normalize(debit);
    if debit != Decimal::ZERO {
        return (debit, TransactionType::Debit);
    }

    let credit = normalize(credit);
    if credit != Decimal::ZERO {
        return (credit, TransactionType::Credit);
    }

    (Decimal::ZERO, TransactionType::None)
}
