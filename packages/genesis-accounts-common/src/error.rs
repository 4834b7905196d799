use thiserror::Error;

/// Reasons a bech32 account string is rejected. Encoding problems and
/// payload format problems are kept apart for diagnostics.
#[derive(Error, Debug, PartialEq)]
pub enum AddressError {
    #[error("invalid bech32 encoding: {reason}")]
    Encoding { reason: String },

    #[error("invalid bech32 prefix: expected {expected}, got {got}")]
    WrongPrefix { expected: String, got: String },

    #[error("address uses bech32m checksum, expected bech32")]
    WrongVariant,

    #[error("invalid address format: {reason}")]
    InvalidFormat { reason: String },
}

impl From<bech32::Error> for AddressError {
    fn from(err: bech32::Error) -> Self {
        AddressError::Encoding {
            reason: err.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("failed to convert address ({address}): {source}")]
    InvalidAddress {
        address: String,
        source: AddressError,
    },

    #[error("failed to parse token allocation amount {amount:?}: {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("unsupported account parameters for {address}: cliff = {cliff}, vesting = {vesting}")]
    UnsupportedParameters {
        address: String,
        cliff: u32,
        vesting: u32,
    },

    #[error("vesting boundary out of range: {months} months after {reference}")]
    DateOutOfRange { reference: String, months: u32 },

    #[error("invalid chain config: {reason}")]
    InvalidConfig { reason: String },
}
