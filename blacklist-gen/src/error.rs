use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("CSV Error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error: {0}")]
    IoError(#[from] io::Error),
    #[error("Invalid row count {0}, the row count must not be negative")]
    InvalidRowCount(i64),
    #[error("The {0} vocabulary is empty")]
    EmptyVocabulary(&'static str),
}
