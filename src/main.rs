//! Scout CLI binary entry point.

use clap::Parser;
use scout::agent::Agent;
use scout::cli::{search_mode, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv(); // load .env if present, ignore error
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("scout=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let agent = Agent::new(cli.connection.to_config())?;

    match cli.command {
        Commands::Ask(args) => {
            scout::cli::repl::handle_ask(&agent, &args.question(), search_mode(args.no_search))
                .await
        }
        Commands::Repl(args) => scout::cli::repl::handle_repl(&agent, search_mode(args.no_search)).await,
    }
}
