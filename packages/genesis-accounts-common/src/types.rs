use cosmwasm_schema::cw_serde;
use cosmwasm_std::{CanonicalAddr, Coin, Int64, Uint64};
use serde::{Deserialize, Serialize};

pub const BASE_ACCOUNT_TYPE: &str = "/cosmos.auth.v1beta1.BaseAccount";
pub const CONTINUOUS_VESTING_ACCOUNT_TYPE: &str =
    "/cosmos.vesting.v1beta1.ContinuousVestingAccount";
pub const DELAYED_VESTING_ACCOUNT_TYPE: &str = "/cosmos.vesting.v1beta1.DelayedVestingAccount";

/// How a genesis balance unlocks. Boundaries are absolute unix seconds.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum VestingSchedule {
    /// Spendable at genesis.
    None,
    /// Fully locked until `end_time`, then fully unlocked.
    CliffOnly { end_time: i64 },
    /// Linear from genesis time.
    Linear { start_time: i64, end_time: i64 },
    /// Linear, starting once the cliff has passed.
    CliffThenLinear { start_time: i64, end_time: i64 },
}

impl VestingSchedule {
    pub fn is_vesting(&self) -> bool {
        !matches!(self, VestingSchedule::None)
    }

    /// Type URL of the Cosmos SDK account this schedule is stored as.
    pub fn type_url(&self) -> &'static str {
        match self {
            VestingSchedule::None => BASE_ACCOUNT_TYPE,
            VestingSchedule::CliffOnly { .. } => DELAYED_VESTING_ACCOUNT_TYPE,
            VestingSchedule::Linear { .. } | VestingSchedule::CliffThenLinear { .. } => {
                CONTINUOUS_VESTING_ACCOUNT_TYPE
            }
        }
    }
}

/// A generated genesis account. Serializes as the matching Cosmos SDK
/// account JSON.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(into = "AccountJson")]
pub struct GenesisAccount {
    pub canonical: CanonicalAddr,
    /// Native-prefix bech32 rendering of `canonical`.
    pub address: String,
    pub schedule: VestingSchedule,
    /// Coins locked by the schedule; empty for plain accounts.
    pub original_vesting: Vec<Coin>,
}

/// Bank module balance entry.
#[cw_serde]
pub struct Balance {
    pub address: String,
    pub coins: Vec<Coin>,
}

// ─── Cosmos SDK JSON shapes ───

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "@type")]
pub enum AccountJson {
    #[serde(rename = "/cosmos.auth.v1beta1.BaseAccount")]
    Base(BaseAccountJson),
    #[serde(rename = "/cosmos.vesting.v1beta1.ContinuousVestingAccount")]
    ContinuousVesting(ContinuousVestingAccountJson),
    #[serde(rename = "/cosmos.vesting.v1beta1.DelayedVestingAccount")]
    DelayedVesting(DelayedVestingAccountJson),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BaseAccountJson {
    pub address: String,
    /// Genesis accounts never carry a key.
    pub pub_key: Option<String>,
    pub account_number: Uint64,
    pub sequence: Uint64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BaseVestingAccountJson {
    pub base_account: BaseAccountJson,
    pub original_vesting: Vec<Coin>,
    pub delegated_free: Vec<Coin>,
    pub delegated_vesting: Vec<Coin>,
    pub end_time: Int64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ContinuousVestingAccountJson {
    pub base_vesting_account: BaseVestingAccountJson,
    pub start_time: Int64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DelayedVestingAccountJson {
    pub base_vesting_account: BaseVestingAccountJson,
}

impl From<GenesisAccount> for AccountJson {
    fn from(account: GenesisAccount) -> Self {
        let base_account = BaseAccountJson {
            address: account.address,
            pub_key: None,
            account_number: Uint64::zero(),
            sequence: Uint64::zero(),
        };
        let vesting = |end_time: i64| BaseVestingAccountJson {
            base_account: base_account.clone(),
            original_vesting: account.original_vesting.clone(),
            delegated_free: vec![],
            delegated_vesting: vec![],
            end_time: Int64::new(end_time),
        };

        match account.schedule {
            VestingSchedule::None => AccountJson::Base(base_account.clone()),
            VestingSchedule::CliffOnly { end_time } => {
                AccountJson::DelayedVesting(DelayedVestingAccountJson {
                    base_vesting_account: vesting(end_time),
                })
            }
            VestingSchedule::Linear {
                start_time,
                end_time,
            }
            | VestingSchedule::CliffThenLinear {
                start_time,
                end_time,
            } => AccountJson::ContinuousVesting(ContinuousVestingAccountJson {
                base_vesting_account: vesting(end_time),
                start_time: Int64::new(start_time),
            }),
        }
    }
}
