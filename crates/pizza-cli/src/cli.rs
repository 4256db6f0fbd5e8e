use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pizzeria",
    about = "Pizza catalog — a small CRUD service over a JSON file",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with server settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file holding the pizza collection (overrides the config file)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Create an empty collection file if none exists
    Init,
    /// List pizzas, optionally filtered by name
    List(ListArgs),
    /// Show a single pizza
    Show(ShowArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Listen address (overrides config and PORT)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Serialize load-modify-save cycles behind a lock
    #[arg(long)]
    pub serialize_writes: bool,
    /// Enable a permissive CORS layer
    #[arg(long)]
    pub cors: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive name substring
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: String,
}
