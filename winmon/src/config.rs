//! Runtime configuration: CLI flags with environment fallbacks, plus the
//! on-disk locations derived from them.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::cli::Cli;

pub const LOG_FILE: &str = "winmon.log";

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Url,
    pub timeout: Duration,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let backend = Url::parse(&cli.backend)
            .map_err(|e| anyhow::anyhow!("invalid --backend '{}': {e}", cli.backend))?;
        if !matches!(backend.scheme(), "http" | "https") {
            anyhow::bail!("--backend must be an http(s) URL, got '{}'", cli.backend);
        }
        if cli.timeout == 0 {
            anyhow::bail!("--timeout must be at least 1 second");
        }
        Ok(Self {
            backend,
            timeout: Duration::from_secs(cli.timeout),
            data_dir: cli.data_dir.clone().unwrap_or_else(config_dir),
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

/// `$XDG_CONFIG_HOME/winmon`, falling back to the platform config dir.
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("winmon")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("winmon")
    }
}
