use bech32::{FromBase32, ToBase32, Variant};
use cosmwasm_std::CanonicalAddr;

use crate::config::ChainConfig;
use crate::error::AddressError;

/// Turns bech32 account strings into canonical address bytes for the
/// configured chain. Addresses under the foreign prefix are decoded under
/// that prefix and re-keyed, so `cosmos1...` and `umee1...` renderings of the
/// same bytes compare equal.
#[derive(Debug, Clone, Copy)]
pub struct AddressNormalizer<'a> {
    config: &'a ChainConfig,
}

impl<'a> AddressNormalizer<'a> {
    pub fn new(config: &'a ChainConfig) -> Self {
        Self { config }
    }

    pub fn normalize(&self, raw: &str) -> Result<CanonicalAddr, AddressError> {
        let prefix = if raw.starts_with(&self.config.foreign_prefix) {
            &self.config.foreign_prefix
        } else {
            &self.config.native_prefix
        };

        let bytes = decode_with_prefix(raw, prefix)?;
        self.verify_format(&bytes)?;

        Ok(CanonicalAddr::from(bytes))
    }

    /// Renders canonical bytes as a native-prefix bech32 string.
    pub fn to_bech32(&self, addr: &CanonicalAddr) -> Result<String, AddressError> {
        self.verify_format(addr.as_slice())?;
        Ok(bech32::encode(
            &self.config.native_prefix,
            addr.as_slice().to_base32(),
            Variant::Bech32,
        )?)
    }

    fn verify_format(&self, bytes: &[u8]) -> Result<(), AddressError> {
        if bytes.is_empty() {
            return Err(AddressError::InvalidFormat {
                reason: "addresses cannot be empty".to_string(),
            });
        }
        if bytes.len() != self.config.address_length {
            return Err(AddressError::InvalidFormat {
                reason: format!(
                    "address length must be {} bytes, got {}",
                    self.config.address_length,
                    bytes.len()
                ),
            });
        }
        if bytes.iter().all(|b| *b == 0) {
            return Err(AddressError::InvalidFormat {
                reason: "all-zero address is reserved".to_string(),
            });
        }
        Ok(())
    }
}

fn decode_with_prefix(raw: &str, prefix: &str) -> Result<Vec<u8>, AddressError> {
    if raw.is_empty() {
        return Err(AddressError::Encoding {
            reason: "empty address string".to_string(),
        });
    }

    let (hrp, data, variant) = bech32::decode(raw)?;
    if hrp != prefix {
        return Err(AddressError::WrongPrefix {
            expected: prefix.to_string(),
            got: hrp,
        });
    }
    if variant != Variant::Bech32 {
        return Err(AddressError::WrongVariant);
    }

    Ok(Vec::<u8>::from_base32(&data)?)
}
