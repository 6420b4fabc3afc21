//! KYC daemon: entry point for running the TSP registry and liquidity pool
//! against an in-memory chain.

mod chain;

use anyhow::Context;
use chain::ChainState;
use clap::Parser;
use kyc_keeper::{KeeperConfig, Msg, Query};
use kyc_utils::LogFormat;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kyc-daemon", about = "TSP registry and liquidity pool daemon")]
struct Cli {
    /// Path to the chain state JSON file (overrides the config file).
    #[arg(long, env = "KYC_GENESIS")]
    genesis: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "KYC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "KYC_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Apply a JSON array of commands in order, printing one result per line.
    Apply {
        /// File containing the commands.
        commands: PathBuf,

        /// Write the resulting chain state here.
        #[arg(long)]
        export: Option<PathBuf>,

        /// Stop at the first rejected command.
        #[arg(long)]
        stop_on_error: bool,
    },
    /// Run a read-only query.
    Query {
        #[command(subcommand)]
        query: QueryCommand,
    },
    /// Print the chain state after genesis import.
    Export,
}

#[derive(clap::Subcommand)]
enum QueryCommand {
    /// List trusted service providers.
    Tsps,
    /// Check whether an address is a trusted service provider.
    IsTsp { address: String },
    /// Show the liquidity pool balance.
    Pool,
    /// Show the governance authority.
    Government,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => KeeperConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => KeeperConfig::default(),
    };
    if let Some(genesis) = cli.genesis {
        config.genesis_path = genesis;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    let format: LogFormat = config.log_format.parse()?;
    kyc_utils::init_logging(format, &config.log_level)?;

    let mut chain = ChainState::load(&config.genesis_path)?.build()?;
    tracing::info!(genesis = %config.genesis_path.display(), "chain state loaded");

    match cli.command {
        Command::Apply {
            commands,
            export,
            stop_on_error,
        } => {
            let content = std::fs::read_to_string(&commands)
                .with_context(|| format!("reading commands {}", commands.display()))?;
            let msgs: Vec<Msg> = serde_json::from_str(&content)
                .with_context(|| format!("parsing commands {}", commands.display()))?;
            let stop_on_error = stop_on_error || config.stop_on_error;

            let mut rejected = 0usize;
            for msg in msgs {
                let line = match chain.server.handle(msg) {
                    Ok(resp) => json!({ "ok": resp }),
                    Err(e) => {
                        rejected += 1;
                        json!({ "error": { "kind": e.kind(), "message": e.to_string() } })
                    }
                };
                println!("{line}");
                if rejected > 0 && stop_on_error {
                    break;
                }
            }
            tracing::info!(rejected, "command batch applied");

            if let Some(path) = export.or(config.export_path) {
                let state = serde_json::to_string_pretty(&chain.export()?)?;
                std::fs::write(&path, state)
                    .with_context(|| format!("writing chain state {}", path.display()))?;
                tracing::info!(path = %path.display(), "chain state exported");
            }
        }
        Command::Query { query } => {
            let query = match query {
                QueryCommand::Tsps => Query::TrustedServiceProviders,
                QueryCommand::IsTsp { address } => Query::IsTrustedServiceProvider { address },
                QueryCommand::Pool => Query::LiquidityPoolAmount,
                QueryCommand::Government => Query::Government,
            };
            let resp = chain.server.query(query)?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
        Command::Export => {
            println!("{}", serde_json::to_string_pretty(&chain.export()?)?);
        }
    }

    Ok(())
}
