use std::sync::Arc;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use cryke_rs::{
    constants::{parse_address, Env},
    core::{ClaimService, FeeLedgerClient},
};
use cryke_utils::{log::setup_logger, utils::format_address};
use ethers::signers::Signer;
use provider_utils::http_providers::HttpProviders;

#[derive(Parser, Debug)]
#[command(name = "claim_fees")]
#[command(about = "Cryke Fee Claimer: check and claim your trading fees")]
#[command(after_help = "Environment:\n  BASE_PRIVATE_KEY  Your wallet private key")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check pending fees
    Check { token_address: String },
    /// Claim all fees
    Claim { token_address: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    setup_logger(None)?;
    let env = Env::new()?;

    let token_address = match &cli.command {
        Command::Check { token_address } | Command::Claim { token_address } => {
            parse_address("token address", token_address)?
        }
    };
    // fail on a missing key before touching the network
    let signer = env.signer()?;

    let http_provider = Arc::new(
        HttpProviders::get_healthy_provider(&env.listen_network, env.rpc_url.as_deref()).await?,
    );
    let ledger = Arc::new(FeeLedgerClient::new(
        http_provider,
        env.fee_locker()?,
        env.chain_id(),
        env.confirmation_timeout,
    ));
    let network_config = env.network_config.clone();
    let claim_service = ClaimService::new(env, ledger);

    match cli.command {
        Command::Check { .. } => {
            let balances = claim_service
                .check_fees(signer.address(), token_address)
                .await?;
            println!("Checking fees for wallet: {}", format_address(&balances.fee_owner));
            println!("Token: {}\n", format_address(&token_address));
            println!("{}", balances.render());
            if balances.has_failures() {
                return Err(anyhow!("a fee balance could not be read"));
            }
        }
        Command::Claim { .. } => {
            let report = claim_service.claim_fees(token_address).await?;
            println!("{}", report.render(&network_config));
            if report.has_failures() {
                return Err(anyhow!(
                    "{} of {} fee claims failed",
                    report.failed_count(),
                    report.claims.len()
                ));
            }
        }
    }

    Ok(())
}
