use cosmwasm_std::{ConversionOverflowError, OverflowError};
use genesis_accounts_common::AccountError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Overflow(#[from] OverflowError),

    #[error(transparent)]
    Conversion(#[from] ConversionOverflowError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse account file CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid genesis JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to collect account files: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("address already exists in genesis state: {address}")]
    DuplicateAccount { address: String },

    #[error("malformed ledger row {row} in {file}: expected at least {expected} columns, got {got}")]
    MalformedRow {
        file: String,
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("failed to parse {field} months ({value}) for {label}")]
    InvalidMonths {
        label: String,
        field: String,
        value: String,
    },

    #[error("genesis state has no {section} section")]
    MissingSection { section: String },

    #[error("invalid genesis time {value:?}: {reason}")]
    InvalidGenesisTime { value: String, reason: String },

    #[error("reconciliation account {address} was not generated in this run")]
    ReconcileAccountNotFound { address: String },
}
