use chrono::{DateTime, Utc};
use cosmwasm_std::Coin;
use genesis_accounts_common::Balance;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GeneratorError;

pub const AUTH_MODULE: &str = "auth";
pub const BANK_MODULE: &str = "bank";

/// Unix time of Go's zero `time.Time` (0001-01-01T00:00:00Z), which Cosmos
/// tooling writes when no genesis time has been chosen.
const GO_ZERO_TIME_UNIX: i64 = -62_135_596_800;

/// A genesis document. Only `genesis_time` and the `auth` and `bank` module
/// states are interpreted; everything else round-trips untouched and in
/// its original key order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct GenesisDoc(pub Map<String, Value>);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthGenesisState {
    #[serde(default)]
    pub params: Value,
    /// Accounts as opaque `Any` JSON; any SDK account type may appear.
    #[serde(default)]
    pub accounts: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BankGenesisState {
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub balances: Vec<Balance>,
    #[serde(default)]
    pub supply: Vec<Coin>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenesisDoc {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, GeneratorError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The reference time for vesting schedules. The zero time or a missing
    /// field means no genesis time is known.
    pub fn genesis_time(&self) -> Result<Option<DateTime<Utc>>, GeneratorError> {
        let raw = match self.0.get("genesis_time").and_then(Value::as_str) {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(None),
        };

        let time = DateTime::parse_from_rfc3339(raw)
            .map_err(|err| GeneratorError::InvalidGenesisTime {
                value: raw.to_string(),
                reason: err.to_string(),
            })?
            .with_timezone(&Utc);

        if time.timestamp() == GO_ZERO_TIME_UNIX && time.timestamp_subsec_nanos() == 0 {
            return Ok(None);
        }
        Ok(Some(time))
    }

    pub fn auth(&self) -> Result<AuthGenesisState, GeneratorError> {
        Ok(serde_json::from_value(self.module(AUTH_MODULE)?.clone())?)
    }

    pub fn bank(&self) -> Result<BankGenesisState, GeneratorError> {
        Ok(serde_json::from_value(self.module(BANK_MODULE)?.clone())?)
    }

    pub fn set_auth(&mut self, auth: &AuthGenesisState) -> Result<(), GeneratorError> {
        self.set_module(AUTH_MODULE, serde_json::to_value(auth)?)
    }

    pub fn set_bank(&mut self, bank: &BankGenesisState) -> Result<(), GeneratorError> {
        self.set_module(BANK_MODULE, serde_json::to_value(bank)?)
    }

    pub fn to_vec_pretty(&self) -> Result<Vec<u8>, GeneratorError> {
        let mut bytes = serde_json::to_vec_pretty(&self.0)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn app_state(&self) -> Result<&Map<String, Value>, GeneratorError> {
        self.0
            .get("app_state")
            .and_then(Value::as_object)
            .ok_or_else(|| GeneratorError::MissingSection {
                section: "app_state".to_string(),
            })
    }

    fn module(&self, name: &str) -> Result<&Value, GeneratorError> {
        self.app_state()?
            .get(name)
            .ok_or_else(|| GeneratorError::MissingSection {
                section: format!("app_state.{name}"),
            })
    }

    fn set_module(&mut self, name: &str, value: Value) -> Result<(), GeneratorError> {
        let app_state = self
            .0
            .get_mut("app_state")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| GeneratorError::MissingSection {
                section: "app_state".to_string(),
            })?;
        app_state.insert(name.to_string(), value);
        Ok(())
    }
}

/// Address of an SDK account in its JSON form, for base, module and vesting
/// account layouts.
pub fn account_address(account: &Value) -> Option<&str> {
    [
        "/address",
        "/base_account/address",
        "/base_vesting_account/base_account/address",
    ]
    .iter()
    .find_map(|pointer| account.pointer(pointer).and_then(Value::as_str))
}

/// Account number of an SDK account in its JSON form. Missing or malformed
/// numbers count as zero.
pub fn account_number(account: &Value) -> u64 {
    [
        "/account_number",
        "/base_account/account_number",
        "/base_vesting_account/base_account/account_number",
    ]
    .iter()
    .find_map(|pointer| account.pointer(pointer))
    .and_then(|value| match value {
        Value::String(s) => s.parse().ok(),
        other => other.as_u64(),
    })
    .unwrap_or(0)
}
