//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::client::{DEFAULT_BACKEND, DEFAULT_TIMEOUT};
use crate::types::Transport;

#[derive(Debug, Parser)]
#[command(name = "winmon", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the metrics backend
    #[arg(short, long, env = "WINMON_BACKEND_URL", default_value = DEFAULT_BACKEND, global = true)]
    pub backend: String,

    /// Seconds to wait for the backend before giving up
    #[arg(long, env = "WINMON_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs(), global = true)]
    pub timeout: u64,

    /// Directory holding saved servers and the log file
    #[arg(long, env = "WINMON_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Without a command the interactive dashboard starts
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch metrics once and print them
    Monitor(MonitorArgs),
    /// List saved servers
    List,
    /// Print saved servers as JSON, without passwords
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete a saved server by id
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete every saved server
    Clear {
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, clap::Args)]
pub struct MonitorArgs {
    /// Re-use a saved server by id
    #[arg(long, conflicts_with_all = ["server", "username", "password", "port", "transport"])]
    pub saved: Option<String>,

    /// Server IP or hostname
    #[arg(short = 's', long, required_unless_present = "saved")]
    pub server: Option<String>,

    /// Windows account, DOMAIN\user for domain accounts
    #[arg(short = 'u', long, required_unless_present = "saved")]
    pub username: Option<String>,

    /// Prompted for when omitted
    #[arg(short = 'p', long, env = "WINMON_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// WinRM port (5985 HTTP, 5986 HTTPS)
    #[arg(short = 'P', long, default_value = "5985")]
    pub port: String,

    #[arg(short = 't', long, value_enum, default_value_t = Transport::Ntlm)]
    pub transport: Transport,

    /// Do not remember this server after a successful request
    #[arg(long)]
    pub no_save: bool,
}
