//! Locale configuration for an ING Romania export.
//!
//! Every bank-specific string the format relies on lives here: the column
//! header label, the account-owner banner prefix, the month names used in
//! long-form dates, and the labels that mark an embedded reference number.
//! A `Dialect` is read-only during a parse run, so independent runs can
//! share one by reference.

use chrono::NaiveDate;
use regex::Regex;

pub struct Dialect {
    /// Literal found in the date position of the column-header row.
    pub header_label: String,
    /// Prefix of the account-owner banner row.
    pub owner_banner: String,
    /// Full month names, January first, as spelled in statement dates.
    pub month_names: [String; 12],
    refnum: Regex,
}

impl Dialect {
    pub fn new(
        header_label: &str,
        owner_banner: &str,
        month_names: [&str; 12],
        refnum_labels: [&str; 2],
    ) -> Result<Self, regex::Error> {
        let refnum = Regex::new(&format!(
            "(?:{}|{}): (?P<digits>[0-9]+)",
            regex::escape(refnum_labels[0]),
            regex::escape(refnum_labels[1]),
        ))?;

        Ok(Self {
            header_label: header_label.to_string(),
            owner_banner: owner_banner.to_string(),
            month_names: month_names.map(str::to_string),
            refnum,
        })
    }

    /// The stock ING Romania dialect.
    pub fn ing_ro() -> Self {
        Self::new(
            "Data",
            "Titular cont",
            [
                "ianuarie",
                "februarie",
                "martie",
                "aprilie",
                "mai",
                "iunie",
                "iulie",
                "august",
                "septembrie",
                "octombrie",
                "noiembrie",
                "decembrie",
            ],
            ["Referinta", "Autorizare"],
        )
        .expect("stock refnum labels form a valid pattern")
    }

    /// Parse a long-form statement date like `"14 martie 2024"`.
    ///
    /// Month names are resolved through the dialect table rather than any
    /// process-wide locale setting.
    pub fn parse_date(&self, s: &str) -> Option<NaiveDate> {
        let parts: Vec<_> = s.split_whitespace().collect();
        if parts.len() != 3 {
            return None;
        }

        let day: u32 = parts[0].parse().ok()?;
        let month = self
            .month_names
            .iter()
            .position(|name| name.eq_ignore_ascii_case(parts[1]))?
            as u32
            + 1;
        let year: i32 = parts[2].parse().ok()?;

        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Search a memo fragment for a labeled reference number.
    pub fn find_refnum(&self, fragment: &str) -> Option<String> {
        self.refnum
            .captures(fragment)
            .map(|caps| caps["digits"].to_string())
    }
}
