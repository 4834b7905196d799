use std::fs;
use std::path::PathBuf;

use cosmwasm_std::{Coin, Uint128};
use genesis_accounts_common::{AccountError, AccountGenerator, ChainConfig};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::GeneratorError;
use crate::execute::{amount_of, GenesisMerger};
use crate::ledger::{collect_files, read_ledger};
use crate::reconcile::reconcile;
use crate::state::GenesisDoc;

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub genesis_file: PathBuf,
    pub accounts_path: PathBuf,
    /// Defaults to overwriting `genesis_file`.
    pub output: Option<PathBuf>,
    pub config: ChainConfig,
    /// Account that receives the truncation remainder, if any.
    pub reconcile_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub accounts: usize,
    pub supply: Vec<Coin>,
    pub top_up: Option<Uint128>,
    /// Hex SHA-256 of the written genesis file.
    pub sha256: String,
}

/// Reads the genesis file and every ledger under `accounts_path`, merges the
/// generated accounts, and writes the result. Nothing is written unless every
/// row succeeds.
pub fn run(opts: &RunOptions) -> Result<RunSummary, GeneratorError> {
    opts.config.validate()?;
    let generator = AccountGenerator::new(&opts.config);

    // resolve the reconciliation target before doing any work
    let reconcile_to = opts
        .reconcile_to
        .as_deref()
        .map(|raw| {
            generator
                .normalizer()
                .normalize(raw)
                .map_err(|source| AccountError::InvalidAddress {
                    address: raw.to_string(),
                    source,
                })
        })
        .transpose()?;

    let mut genesis = GenesisDoc::from_slice(&fs::read(&opts.genesis_file)?)?;
    let genesis_time = genesis.genesis_time()?;
    info!(
        genesis_file = %opts.genesis_file.display(),
        genesis_time = ?genesis_time,
        "Loaded genesis state"
    );

    let mut merger = GenesisMerger::new(generator.normalizer(), genesis.auth()?, genesis.bank()?);

    for file in collect_files(&opts.accounts_path)? {
        info!("Generate accounts from: {}", file.display());

        for record in read_ledger(&file)? {
            let generated = generator.generate_from_str(
                &record.address,
                &record.allocation,
                genesis_time,
                record.cliff_months,
                record.vesting_months,
            )?;
            merger.add(generated)?;
        }
    }

    let top_up = match &reconcile_to {
        Some(account) => Some(reconcile(&mut merger, account, &opts.config.denom)?),
        None => None,
    };

    let accounts = merger.account_count();
    let (auth, bank) = merger.finish();
    let supply = bank.supply.clone();
    genesis.set_auth(&auth)?;
    genesis.set_bank(&bank)?;

    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| opts.genesis_file.clone());
    let bytes = genesis.to_vec_pretty()?;
    fs::write(&output, &bytes)?;

    let sha256 = hex::encode(Sha256::digest(&bytes));
    info!(
        output = %output.display(),
        accounts,
        supply = %amount_of(&supply, &opts.config.denom),
        denom = %opts.config.denom,
        %sha256,
        "Wrote updated genesis state"
    );

    Ok(RunSummary {
        output,
        accounts,
        supply,
        top_up,
        sha256,
    })
}
