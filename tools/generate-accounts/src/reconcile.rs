//! Optional total-supply reconciliation.
//!
//! Scaling each allocation down to whole base units drops a fraction of a
//! unit per row. This pass floors the batch-wide sum of those fractions and
//! credits it to one designated account. It only runs when asked for.

use cosmwasm_std::{CanonicalAddr, Coin, Uint128};
use tracing::info;

use crate::error::GeneratorError;
use crate::execute::GenesisMerger;

/// Whole base units recoverable from the accumulated truncation remainder.
pub fn top_up_amount(merger: &GenesisMerger) -> Result<Uint128, GeneratorError> {
    let units = merger.remainder_total().to_uint_floor();
    Ok(Uint128::try_from(units)?)
}

/// Credits the recovered base units to `account`. Returns the amount
/// credited; zero leaves the state untouched.
pub fn reconcile(
    merger: &mut GenesisMerger,
    account: &CanonicalAddr,
    denom: &str,
) -> Result<Uint128, GeneratorError> {
    if !merger.is_generated(account) {
        return Err(GeneratorError::ReconcileAccountNotFound {
            address: account.to_string(),
        });
    }

    let top_up = top_up_amount(merger)?;
    if top_up.is_zero() {
        info!("no truncation remainder to reconcile");
        return Ok(top_up);
    }

    merger.credit(account, Coin::new(top_up, denom))?;
    info!(%top_up, denom, "credited truncation remainder");

    Ok(top_up)
}
