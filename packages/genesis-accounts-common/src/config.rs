use cosmwasm_schema::cw_serde;
use cosmwasm_std::Decimal256;

use crate::error::AccountError;

/// Bech32 prefix of the chain the ledger is imported into.
pub const DEFAULT_NATIVE_PREFIX: &str = "umee";
/// Bech32 prefix of Cosmos Hub addresses, accepted and re-keyed to the native prefix.
pub const DEFAULT_FOREIGN_PREFIX: &str = "cosmos";
pub const DEFAULT_DENOM: &str = "uumee";
/// 1 UMEE = 10^6 uumee
pub const DEFAULT_EXPONENT: u32 = 6;
pub const DEFAULT_ADDRESS_LENGTH: usize = 20;

/// Immutable chain parameters shared by the address normalizer and the
/// account generator.
#[cw_serde]
pub struct ChainConfig {
    pub native_prefix: String,
    pub foreign_prefix: String,
    /// Base denomination every generated balance is denominated in.
    pub denom: String,
    /// Decimal places between the display unit and the base unit.
    pub exponent: u32,
    /// Required length in bytes of a canonical account address.
    pub address_length: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            native_prefix: DEFAULT_NATIVE_PREFIX.to_string(),
            foreign_prefix: DEFAULT_FOREIGN_PREFIX.to_string(),
            denom: DEFAULT_DENOM.to_string(),
            exponent: DEFAULT_EXPONENT,
            address_length: DEFAULT_ADDRESS_LENGTH,
        }
    }
}

impl ChainConfig {
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.native_prefix.is_empty() || self.foreign_prefix.is_empty() {
            return Err(AccountError::InvalidConfig {
                reason: "bech32 prefixes must not be empty".to_string(),
            });
        }
        if self.native_prefix == self.foreign_prefix {
            return Err(AccountError::InvalidConfig {
                reason: format!(
                    "native and foreign prefix are both {}",
                    self.native_prefix
                ),
            });
        }
        if self.denom.is_empty() {
            return Err(AccountError::InvalidConfig {
                reason: "denom must not be empty".to_string(),
            });
        }
        // Base units are carved out of Decimal256 atomics, which hold 18 places.
        if self.exponent > Decimal256::DECIMAL_PLACES {
            return Err(AccountError::InvalidConfig {
                reason: format!(
                    "exponent {} exceeds {} decimal places",
                    self.exponent,
                    Decimal256::DECIMAL_PLACES
                ),
            });
        }
        if self.address_length == 0 {
            return Err(AccountError::InvalidConfig {
                reason: "address length must be positive".to_string(),
            });
        }
        Ok(())
    }
}
