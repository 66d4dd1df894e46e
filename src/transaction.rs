use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Debit,
    Credit,
    None,
}

/// The single in-progress transaction owned by the accumulator. Opened by a
/// header row, grown by continuation rows, consumed when the next header or
/// a trailer row closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    pub date: NaiveDate,
    pub memo: String,
    /// Set once at header time; continuation rows never alter it.
    pub amount: Decimal,
    pub kind: TransactionType,
    /// First labeled reference number seen in a continuation fragment.
    pub refnum: Option<String>,
}

impl PendingTransaction {
    pub fn open(date: NaiveDate, memo: String, amount: Decimal, kind: TransactionType) -> Self {
        Self {
            date,
            memo,
            amount,
            kind,
            refnum: None,
        }
    }

    /// Append a continuation fragment to the memo, space-joined.
    pub fn append_memo(&mut self, fragment: &str) {
        self.memo.push(' ');
        self.memo.push_str(fragment);
    }

    pub fn close(self) -> CompletedTransaction {
        let refnum = self
            .refnum
            .unwrap_or_else(|| format!("{:x}", md5::compute(self.memo.as_bytes())));

        CompletedTransaction {
            date: self.date,
            kind: self.kind,
            amount: self.amount,
            refnum,
            memo: self.memo,
        }
    }
}

/// A finished transaction. `refnum` is always non-empty: when no
/// continuation row carried one, it is the MD5 digest of the final memo, a
/// stable dedup key. Two transactions with identical memos and no explicit
/// refnum therefore share an identifier; that is accepted behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTransaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub refnum: String,
    pub memo: String,
}
