//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for tool outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable output
    Pretty,
    /// Raw JSON (`{simulation?, result?, note?}` or `{error, message}`)
    Json,
}

/// CLI arguments for blockagent
#[derive(Parser, Debug)]
#[command(name = "blockagent")]
#[command(author, version, about = "Policy-gated blockchain tools for agents")]
#[command(long_about = r#"
blockagent runs named blockchain tools (balance queries, native transfers,
contract deployment and calls) behind a static policy and an approval gate.

Read-only tools run immediately. State-changing tools return a simulation
(gas, gas price, chain id) and only submit a transaction with --approve.

Configuration files are loaded from (in priority order):
1. BLOCKAGENT_* environment variables
2. policy_file         JSON policy (allowedTools, maxAmountEther, blockedMethods)
3. --config <path>     Explicit config file
4. ./blockagent.toml   Project-level config
5. ~/.config/blockagent/config.toml   Global config

Example:
  blockagent run GET_BALANCE --param address=0x... --chain alfajores
  blockagent run SEND_NATIVE --param to=0x... --param amount=0.1
  blockagent run SEND_NATIVE --param to=0x... --param amount=0.1 --approve
  blockagent run DEPLOY_CONTRACT --param template=SimpleStorage --approve
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a tool through the policy and approval pipeline
    Run(RunArgs),
    /// List registered tools
    Tools,
    /// Show configuration sources and validation issues
    Config,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Tool name (e.g. GET_BALANCE, SEND_NATIVE)
    #[arg(value_name = "TOOL")]
    pub tool: String,

    /// Tool parameter as key=value (repeatable; JSON values are accepted)
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Tool parameters as a JSON object (merged before --param)
    #[arg(long, value_name = "JSON")]
    pub params_json: Option<String>,

    /// Override applied after the request parameters (repeatable)
    #[arg(long = "override", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Chain to run on (defaults to `default_chain`)
    #[arg(long, value_name = "NAME")]
    pub chain: Option<String>,

    /// Execute state-changing tools instead of returning a simulation
    #[arg(long)]
    pub approve: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub output: OutputFormat,
}
