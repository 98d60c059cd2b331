//! Grove daemon: entry point for applying governance commands to a node's
//! store and reading its state back as JSON.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use grove_governance::Msg;
use grove_node::{init_logging, GroveNode, LogFormat, NodeConfig};
use grove_types::Address;

#[derive(Parser)]
#[command(name = "grove-daemon", about = "Weighted group governance node")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "GROVE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the LMDB environment.
    #[arg(long, env = "GROVE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "GROVE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "GROVE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Register the development bank at `bank/send`.
    #[arg(long, env = "GROVE_DEV_BANK")]
    dev_bank: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the effective configuration as TOML.
    Config,
    /// Apply the commands in a JSON file: a single command or an array.
    /// Each command commits on its own; failures are reported and skipped.
    Apply { file: PathBuf },
    /// Show a group with its members and accounts.
    Group { id: u64 },
    /// Show a group account with its proposals.
    Account { address: Address },
    /// Show a proposal with its votes.
    Proposal { id: u64 },
}

fn load_config(cli: &Cli) -> anyhow::Result<NodeConfig> {
    let mut config = match &cli.config {
        Some(path) => NodeConfig::from_toml_file(path)?,
        None => NodeConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    config.dev_bank |= cli.dev_bank;
    Ok(config)
}

fn read_commands(file: &Path) -> anyhow::Result<Vec<Msg>> {
    let content = std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", file.display()))?;
    let commands = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Msg>, _>>()?,
        single => vec![serde_json::from_value(single)?],
    };
    Ok(commands)
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_node(config: NodeConfig) -> anyhow::Result<GroveNode> {
    init_logging(config.log_format, &config.log_level);
    GroveNode::open(config).context("opening node")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Config => print!("{}", config.to_toml_string()?),
        Command::Apply { file } => {
            let commands = read_commands(&file)?;
            let mut node = open_node(config)?;
            tracing::info!(count = commands.len(), file = %file.display(), "applying commands");
            let mut failed = 0usize;
            for (index, msg) in commands.into_iter().enumerate() {
                let command = msg.name();
                let outcome = match node.apply(msg) {
                    Ok(response) => serde_json::json!({ "index": index, "command": command, "ok": response }),
                    Err(err) => {
                        failed += 1;
                        serde_json::json!({ "index": index, "command": command, "error": err.to_string() })
                    }
                };
                print_json(&outcome)?;
            }
            if failed > 0 {
                anyhow::bail!("{failed} command(s) failed");
            }
        }
        Command::Group { id } => {
            let node = open_node(config)?;
            let engine = node.engine();
            print_json(&serde_json::json!({
                "group": engine.group_info(id)?,
                "members": engine.group_members(id)?,
                "accounts": engine.group_accounts_by_group(id)?,
            }))?;
        }
        Command::Account { address } => {
            let node = open_node(config)?;
            let engine = node.engine();
            print_json(&serde_json::json!({
                "account": engine.group_account_info(&address)?,
                "proposals": engine.proposals_by_group_account(&address)?,
            }))?;
        }
        Command::Proposal { id } => {
            let node = open_node(config)?;
            let engine = node.engine();
            print_json(&serde_json::json!({
                "proposal": engine.proposal(id)?,
                "votes": engine.votes_by_proposal(id)?,
            }))?;
        }
    }
    Ok(())
}
