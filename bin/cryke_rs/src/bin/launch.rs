use std::sync::Arc;

use clap::Parser;
use cryke_rs::{
    constants::Env,
    core::{AnnouncementFanout, LaunchService},
    types::LaunchArgs,
};
use cryke_toolkit::LaunchApi;
use cryke_utils::log::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "launch")]
#[command(about = "Cryke Token Launcher: deploy a token, creating its fee wallet when needed")]
#[command(
    after_help = "Environment (optional, for social announcements):\n  MOLTX_API_KEY     Announce on MoltX\n  MOLTBOOK_API_KEY  Announce on Moltbook\n  FOURCLAW_API_KEY  Announce on 4claw\n\nYou earn 80% of all trading fees forever."
)]
struct Cli {
    /// Token name (1-32 chars)
    #[arg(long)]
    name: String,

    /// Token symbol (1-8 chars)
    #[arg(long)]
    symbol: String,

    /// Token description
    #[arg(long)]
    description: String,

    /// Your wallet address (auto-created if not provided)
    #[arg(long)]
    wallet: Option<String>,

    /// Direct image URL
    #[arg(long)]
    image: Option<String>,

    /// Project website
    #[arg(long)]
    website: Option<String>,

    /// Twitter handle
    #[arg(long)]
    twitter: Option<String>,
}

impl From<Cli> for LaunchArgs {
    fn from(cli: Cli) -> Self {
        Self {
            name: cli.name,
            symbol: cli.symbol,
            description: cli.description,
            wallet: cli.wallet,
            image: cli.image,
            website: cli.website,
            twitter: cli.twitter,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    setup_logger(None)?;
    let env = Env::new()?;

    println!("\n{}", "=".repeat(60));
    println!("🦗 CRYKE TOKEN LAUNCHER");
    println!("{}", "=".repeat(60));

    let deployer = Arc::new(LaunchApi::new(env.launch_api_url.clone()));
    let fanout = AnnouncementFanout::from_env(&env);
    let launch_service = LaunchService::new(env, deployer, fanout);

    let summary = launch_service.launch(cli.into()).await?;

    println!("\n{}", "=".repeat(60));
    println!("✅ TOKEN LAUNCH COMPLETE!");
    println!("{}", "=".repeat(60));
    println!("{}", summary.render());

    Ok(())
}
