use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed row: expected {expected} fields, got {got}")]
    MalformedRow { expected: usize, got: usize },

    #[error("Unparseable transaction date: {0:?}")]
    InvalidDate(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
