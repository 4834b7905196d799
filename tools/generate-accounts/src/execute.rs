use std::collections::HashSet;

use cosmwasm_std::{CanonicalAddr, Coin, Decimal256, Uint128};
use genesis_accounts_common::types::AccountJson;
use genesis_accounts_common::{AccountError, AddressNormalizer, GeneratedAccount};
use tracing::{debug, warn};

use crate::error::GeneratorError;
use crate::state::{account_address, account_number, AuthGenesisState, BankGenesisState};

/// Accumulates generated accounts into the auth and bank genesis states.
///
/// Owns the batch-level invariants: one account per address, supply equal to
/// the sum of added balances, and the running truncation remainder.
pub struct GenesisMerger<'a> {
    normalizer: AddressNormalizer<'a>,
    auth: AuthGenesisState,
    bank: BankGenesisState,
    known: HashSet<CanonicalAddr>,
    generated: HashSet<CanonicalAddr>,
    remainder_total: Decimal256,
}

impl<'a> GenesisMerger<'a> {
    pub fn new(
        normalizer: AddressNormalizer<'a>,
        auth: AuthGenesisState,
        bank: BankGenesisState,
    ) -> Self {
        let mut known = HashSet::with_capacity(auth.accounts.len());
        for account in &auth.accounts {
            match account_address(account).map(|a| normalizer.normalize(a)) {
                Some(Ok(addr)) => {
                    known.insert(addr);
                }
                Some(Err(err)) => warn!(%err, "existing genesis account has an unrecognized address"),
                None => warn!("existing genesis account has no address"),
            }
        }

        Self {
            normalizer,
            auth,
            bank,
            known,
            generated: HashSet::new(),
            remainder_total: Decimal256::zero(),
        }
    }

    /// Adds a generated account, its balance and its share of supply.
    pub fn add(&mut self, generated: GeneratedAccount) -> Result<(), GeneratorError> {
        let GeneratedAccount {
            account,
            balance,
            remainder,
        } = generated;

        if !self.known.insert(account.canonical.clone()) {
            return Err(GeneratorError::DuplicateAccount {
                address: account.address,
            });
        }

        add_coins(&mut self.bank.supply, &balance.coins)?;
        self.remainder_total = self.remainder_total.checked_add(remainder)?;
        self.generated.insert(account.canonical.clone());

        debug!(address = %account.address, "merged genesis account");
        self.auth.accounts.push(serde_json::to_value(&account)?);
        self.bank.balances.push(balance);

        Ok(())
    }

    pub fn is_generated(&self, addr: &CanonicalAddr) -> bool {
        self.generated.contains(addr)
    }

    /// Total fraction of base units dropped across all added accounts.
    pub fn remainder_total(&self) -> Decimal256 {
        self.remainder_total
    }

    pub fn supply(&self) -> &[Coin] {
        &self.bank.supply
    }

    pub fn account_count(&self) -> usize {
        self.generated.len()
    }

    /// Adds `coin` to an account generated in this run: its bank balance,
    /// its original vesting if it vests, and supply.
    pub fn credit(&mut self, addr: &CanonicalAddr, coin: Coin) -> Result<(), GeneratorError> {
        let address =
            self.normalizer
                .to_bech32(addr)
                .map_err(|source| AccountError::InvalidAddress {
                    address: addr.to_string(),
                    source,
                })?;
        if !self.is_generated(addr) {
            return Err(GeneratorError::ReconcileAccountNotFound { address });
        }

        let balance = self
            .bank
            .balances
            .iter_mut()
            .find(|b| b.address == address)
            .ok_or_else(|| GeneratorError::ReconcileAccountNotFound {
                address: address.clone(),
            })?;
        add_coins(&mut balance.coins, std::slice::from_ref(&coin))?;

        let account = self
            .auth
            .accounts
            .iter_mut()
            .find(|a| account_address(a) == Some(address.as_str()))
            .ok_or_else(|| GeneratorError::ReconcileAccountNotFound {
                address: address.clone(),
            })?;
        let mut parsed: AccountJson = serde_json::from_value(account.clone())?;
        match &mut parsed {
            AccountJson::Base(_) => {}
            AccountJson::ContinuousVesting(v) => {
                add_coins(&mut v.base_vesting_account.original_vesting, std::slice::from_ref(&coin))?
            }
            AccountJson::DelayedVesting(v) => {
                add_coins(&mut v.base_vesting_account.original_vesting, std::slice::from_ref(&coin))?
            }
        }
        *account = serde_json::to_value(&parsed)?;

        add_coins(&mut self.bank.supply, std::slice::from_ref(&coin))?;
        Ok(())
    }

    /// Sorts accounts by account number and balances by address, and returns
    /// the finished module states.
    pub fn finish(mut self) -> (AuthGenesisState, BankGenesisState) {
        self.auth.accounts.sort_by_key(account_number);

        let normalizer = self.normalizer;
        self.bank.balances.sort_by_cached_key(|b| {
            normalizer
                .normalize(&b.address)
                .map(|addr| addr.as_slice().to_vec())
                .unwrap_or_else(|_| b.address.as_bytes().to_vec())
        });
        for balance in &mut self.bank.balances {
            balance.coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        }

        (self.auth, self.bank)
    }
}

/// Adds `coins` into `into`, merging by denom and keeping `into` sorted.
pub fn add_coins(into: &mut Vec<Coin>, coins: &[Coin]) -> Result<(), GeneratorError> {
    for coin in coins {
        match into.iter_mut().find(|c| c.denom == coin.denom) {
            Some(existing) => existing.amount = existing.amount.checked_add(coin.amount)?,
            None => into.push(coin.clone()),
        }
    }
    into.sort_by(|a, b| a.denom.cmp(&b.denom));
    Ok(())
}

/// Sum of all `denom` amounts in `coins`.
pub fn amount_of(coins: &[Coin], denom: &str) -> Uint128 {
    coins
        .iter()
        .filter(|c| c.denom == denom)
        .map(|c| c.amount)
        .sum()
}
