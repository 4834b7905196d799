use anyhow::{Context, Result};
use clap::Parser;
use generate_accounts::cli::GenerateAccountsOpts;
use generate_accounts::contract::run;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let opts = GenerateAccountsOpts::parse().into_options();
    let summary = run(&opts).with_context(|| {
        format!(
            "failed to generate accounts from {} into {}",
            opts.accounts_path.display(),
            opts.genesis_file.display()
        )
    })?;

    if let Some(top_up) = summary.top_up {
        info!(%top_up, "reconciled supply");
    }
    info!(
        "Successfully generated {} accounts, sha256 {}",
        summary.accounts, summary.sha256
    );
    Ok(())
}
