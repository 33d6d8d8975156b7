use thiserror::Error;

use crate::models::Role;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid file pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PriceError>;

/// Why a whole source file was left out of the catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileError {
    #[error("cannot read table: {0}")]
    Access(String),

    #[error("missing columns: {}", join_roles(.missing))]
    Schema { missing: Vec<Role> },
}

/// Why a single data row was left out of the catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("missing value in column '{column}'")]
    MissingField { column: String },

    #[error("'{value}' in column '{column}' is not a number")]
    InvalidNumber { column: String, value: String },

    #[error("weight is zero")]
    ZeroWeight,

    #[error("price is zero")]
    ZeroPrice,

    #[error("unit price of {price} / {weight} is out of range")]
    UnitPriceOutOfRange { price: String, weight: String },

    #[error("negative value '{value}' in column '{column}'")]
    Negative { column: String, value: String },
}

fn join_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
