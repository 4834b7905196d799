pub mod account;
pub mod address;
pub mod amount;
pub mod config;
pub mod error;
pub mod types;

pub use account::{AccountGenerator, GeneratedAccount, VestingKind};
pub use address::AddressNormalizer;
pub use amount::{BaseUnits, TokenAmount};
pub use config::ChainConfig;
pub use error::{AccountError, AddressError};
pub use types::{Balance, GenesisAccount, VestingSchedule};
