use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use cosmwasm_std::{CanonicalAddr, Coin, Decimal256};
use tracing::debug;

use crate::address::AddressNormalizer;
use crate::amount::TokenAmount;
use crate::config::ChainConfig;
use crate::error::AccountError;
use crate::types::{Balance, GenesisAccount, VestingSchedule};

/// Which [`VestingSchedule`] a `(cliff, vesting, reference time)` triple maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VestingKind {
    None,
    CliffOnly,
    Linear,
    CliffThenLinear,
}

impl VestingKind {
    /// Returns `None` for combinations that have no account type.
    pub fn select(cliff_months: u32, vesting_months: u32, has_reference: bool) -> Option<Self> {
        match (cliff_months, vesting_months, has_reference) {
            (0, 0, _) => Some(VestingKind::None),
            (1.., 0, _) => Some(VestingKind::CliffOnly),
            (0, 1.., true) => Some(VestingKind::Linear),
            (1.., 1.., true) => Some(VestingKind::CliffThenLinear),
            (_, 1.., false) => None,
        }
    }
}

/// One generated ledger row.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAccount {
    pub account: GenesisAccount,
    pub balance: Balance,
    /// Fraction of a base unit lost when scaling the allocation.
    pub remainder: Decimal256,
}

/// Builds genesis accounts and balances from normalized ledger rows.
#[derive(Debug, Clone, Copy)]
pub struct AccountGenerator<'a> {
    config: &'a ChainConfig,
}

impl<'a> AccountGenerator<'a> {
    pub fn new(config: &'a ChainConfig) -> Self {
        Self { config }
    }

    pub fn normalizer(&self) -> AddressNormalizer<'a> {
        AddressNormalizer::new(self.config)
    }

    /// Normalizes `raw_address` and then runs [`AccountGenerator::generate`].
    pub fn generate_from_str(
        &self,
        raw_address: &str,
        allocation: &str,
        reference_time: Option<DateTime<Utc>>,
        cliff_months: u32,
        vesting_months: u32,
    ) -> Result<GeneratedAccount, AccountError> {
        let id = self
            .normalizer()
            .normalize(raw_address)
            .map_err(|source| AccountError::InvalidAddress {
                address: raw_address.to_string(),
                source,
            })?;

        self.generate(&id, allocation, reference_time, cliff_months, vesting_months)
    }

    pub fn generate(
        &self,
        id: &CanonicalAddr,
        allocation: &str,
        reference_time: Option<DateTime<Utc>>,
        cliff_months: u32,
        vesting_months: u32,
    ) -> Result<GeneratedAccount, AccountError> {
        let address =
            self.normalizer()
                .to_bech32(id)
                .map_err(|source| AccountError::InvalidAddress {
                    address: id.to_string(),
                    source,
                })?;

        let units = TokenAmount::parse(allocation)?.to_base_units(self.config.exponent)?;
        let coins = vec![Coin {
            denom: self.config.denom.clone(),
            amount: units.amount,
        }];

        let kind = VestingKind::select(cliff_months, vesting_months, reference_time.is_some())
            .ok_or_else(|| AccountError::UnsupportedParameters {
                address: address.clone(),
                cliff: cliff_months,
                vesting: vesting_months,
            })?;

        // Cliff-only accounts may be built without a genesis time; the zero
        // time is then the reference.
        let reference = reference_time.unwrap_or(DateTime::UNIX_EPOCH);
        let schedule = match kind {
            VestingKind::None => VestingSchedule::None,
            VestingKind::CliffOnly => VestingSchedule::CliffOnly {
                end_time: add_months(reference, cliff_months)?.timestamp(),
            },
            VestingKind::Linear => VestingSchedule::Linear {
                start_time: reference.timestamp(),
                end_time: add_months(reference, vesting_months)?.timestamp(),
            },
            VestingKind::CliffThenLinear => {
                let start = add_months(reference, cliff_months)?;
                let end = add_months(start, vesting_months)?;
                VestingSchedule::CliffThenLinear {
                    start_time: start.timestamp(),
                    end_time: end.timestamp(),
                }
            }
        };

        debug!(
            address = %address,
            amount = %units.amount,
            schedule = ?schedule,
            "generated genesis account"
        );

        let original_vesting = if schedule.is_vesting() {
            coins.clone()
        } else {
            vec![]
        };

        Ok(GeneratedAccount {
            account: GenesisAccount {
                canonical: id.clone(),
                address: address.clone(),
                schedule,
                original_vesting,
            },
            balance: Balance { address, coins },
            remainder: units.remainder,
        })
    }
}

/// Calendar-month addition. A day past the end of the target month rolls
/// over into the following month (Jan 31 + 1 month = Mar 3, or Mar 2 in a
/// leap year). Time of day is kept.
fn add_months(time: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>, AccountError> {
    let shifted = || {
        let total = i64::from(time.month0()) + i64::from(months);
        let year = i32::try_from(i64::from(time.year()) + total / 12).ok()?;
        let month = u32::try_from(total % 12).ok()? + 1;
        let date = NaiveDate::from_ymd_opt(year, month, 1)?
            .checked_add_days(Days::new(u64::from(time.day0())))?;
        Some(date.and_time(time.time()).and_utc())
    };

    shifted().ok_or_else(|| AccountError::DateOutOfRange {
        reference: time.to_rfc3339(),
        months,
    })
}
