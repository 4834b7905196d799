use std::str::FromStr;

use cosmwasm_std::{Decimal256, Uint128, Uint256};

use crate::error::AccountError;

/// A non-negative token allocation in display units, e.g. `1234.56` UMEE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TokenAmount(Decimal256);

/// Result of scaling a [`TokenAmount`] into base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseUnits {
    pub amount: Uint128,
    /// Fraction of one base unit dropped by truncation, in `[0, 1)`.
    pub remainder: Decimal256,
}

impl TokenAmount {
    /// Parses plain decimal notation: ASCII digits with at most one dot and at
    /// least one digit on each side of it. Signs, exponents and whitespace are
    /// rejected.
    pub fn parse(input: &str) -> Result<Self, AccountError> {
        let invalid = |reason: &str| AccountError::InvalidAmount {
            amount: input.to_string(),
            reason: reason.to_string(),
        };

        let (whole, fractional) = match input.split_once('.') {
            Some((whole, fractional)) => (whole, Some(fractional)),
            None => (input, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a non-negative decimal number"));
        }

        let normalized = match fractional {
            None => whole.to_string(),
            Some(fractional) => {
                if fractional.is_empty() || !fractional.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("malformed fractional part"));
                }
                // Digits past the 18th never reach a base unit.
                let places = Decimal256::DECIMAL_PLACES as usize;
                let kept = &fractional[..fractional.len().min(places)];
                format!("{whole}.{kept}")
            }
        };

        Decimal256::from_str(&normalized)
            .map(TokenAmount)
            .map_err(|err| invalid(&err.to_string()))
    }

    pub fn as_decimal(&self) -> Decimal256 {
        self.0
    }

    /// `floor(self * 10^exponent)`, computed on the decimal's atomics so no
    /// intermediate product is ever rounded.
    pub fn to_base_units(&self, exponent: u32) -> Result<BaseUnits, AccountError> {
        let places = Decimal256::DECIMAL_PLACES
            .checked_sub(exponent)
            .ok_or_else(|| AccountError::InvalidConfig {
                reason: format!("exponent {exponent} exceeds 18 decimal places"),
            })?;

        let divisor = Uint256::from(10u8).pow(places);
        let atomics = self.0.atomics();

        let amount = Uint128::try_from(atomics / divisor).map_err(|_| {
            AccountError::InvalidAmount {
                amount: self.0.to_string(),
                reason: "base unit amount exceeds 128 bits".to_string(),
            }
        })?;
        let remainder = Decimal256::from_atomics(atomics % divisor, places)
            .map_err(|err| AccountError::InvalidAmount {
                amount: self.0.to_string(),
                reason: err.to_string(),
            })?;

        Ok(BaseUnits { amount, remainder })
    }
}

impl FromStr for TokenAmount {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
