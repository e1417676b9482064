use chrono::NaiveDate;
use thiserror::Error;

use crate::types::LoanId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccrualError {
    #[error("invalid interval: end {end} is earlier than start {start}")]
    InvalidInterval {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid loan terms: {message}")]
    InvalidTerms {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("arithmetic overflow: {message}")]
    Overflow {
        message: String,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

impl From<serde_json::Error> for AccrualError {
    fn from(err: serde_json::Error) -> Self {
        AccrualError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AccrualError>;
