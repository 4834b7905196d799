use std::path::PathBuf;

use clap::Parser;
use genesis_accounts_common::config::{
    DEFAULT_ADDRESS_LENGTH, DEFAULT_DENOM, DEFAULT_EXPONENT, DEFAULT_FOREIGN_PREFIX,
    DEFAULT_NATIVE_PREFIX,
};
use genesis_accounts_common::ChainConfig;

use crate::contract::RunOptions;

/// Adds accounts from CSV allocation ledgers to a genesis file.
#[derive(Parser, Debug, Clone)]
#[clap(name = "generate-accounts", version)]
pub struct GenerateAccountsOpts {
    /// Path to the genesis JSON file to update
    pub genesis_file: PathBuf,

    /// A ledger CSV file, or a directory searched recursively for them
    pub accounts_path: PathBuf,

    /// Write the result here instead of overwriting the genesis file
    #[clap(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Bech32 prefix of the chain's own addresses
    #[clap(long, default_value = DEFAULT_NATIVE_PREFIX)]
    pub native_prefix: String,

    /// Bech32 prefix accepted as input and re-encoded to the native prefix
    #[clap(long, default_value = DEFAULT_FOREIGN_PREFIX)]
    pub foreign_prefix: String,

    /// Base denomination of allocated tokens
    #[clap(long, default_value = DEFAULT_DENOM)]
    pub denom: String,

    /// Decimal places between the display token and its base denomination
    #[clap(long, default_value_t = DEFAULT_EXPONENT)]
    pub exponent: u32,

    /// Expected length of an address payload in bytes
    #[clap(long, default_value_t = DEFAULT_ADDRESS_LENGTH)]
    pub address_length: usize,

    /// Credit the summed truncation remainder to this generated account
    #[clap(long)]
    pub reconcile_to: Option<String>,
}

impl GenerateAccountsOpts {
    pub fn into_options(self) -> RunOptions {
        RunOptions {
            genesis_file: self.genesis_file,
            accounts_path: self.accounts_path,
            output: self.output,
            config: ChainConfig {
                native_prefix: self.native_prefix,
                foreign_prefix: self.foreign_prefix,
                denom: self.denom,
                exponent: self.exponent,
                address_length: self.address_length,
            },
            reconcile_to: self.reconcile_to,
        }
    }
}
