//! Entry point for winmon. Parses args, then runs a one-shot command or the dashboard.

use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use winmon::app::App;
use winmon::cli::{Cli, Command, MonitorArgs};
use winmon::client::MonitorClient;
use winmon::config::Config;
use winmon::dashboard::render_text;
use winmon::form::{parse_port, validate_credentials};
use winmon::logging;
use winmon::panel::relative_time;
use winmon::profiles::ProfileStore;
use winmon::storage::FileStore;
use winmon::types::Credentials;

const PORT_MESSAGE: &str = "Valid port number (1-65535) is required";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::from_cli(&cli)?;
    let store = ProfileStore::new(Arc::new(FileStore::new(&cfg.data_dir)));

    match cli.command {
        None => {
            if let Err(e) = logging::init_file(&cfg.log_path()) {
                eprintln!("warning: cannot open log file {}: {e}", cfg.log_path().display());
            }
            info!(backend = %cfg.backend, data_dir = %cfg.data_dir.display(), "starting dashboard");
            let client = MonitorClient::new(cfg.backend.clone(), cfg.timeout)?;
            let mut app = App::new(client, store);
            app.run().await
        }
        Some(cmd) => {
            logging::init_stderr();
            run_command(cmd, &cfg, &store).await
        }
    }
}

async fn run_command(cmd: Command, cfg: &Config, store: &ProfileStore) -> Result<()> {
    match cmd {
        Command::Monitor(args) => monitor_once(args, cfg, store).await,
        Command::List => {
            list(store);
            Ok(())
        }
        Command::Export { output } => {
            let js = store.export_redacted()?;
            match output {
                Some(path) => {
                    fs::write(&path, format!("{js}\n"))
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!("Exported {} server(s) to {}", store.get_all().len(), path.display());
                }
                None => println!("{js}"),
            }
            Ok(())
        }
        Command::Delete { id, yes } => {
            let Some(entry) = store.get_by_id(&id) else {
                println!("No saved server with id '{id}'.");
                return Ok(());
            };
            if !yes && !prompt_yes_no(&format!("Delete saved server '{}' ({id})? [y/N]: ", entry.server)) {
                return Ok(());
            }
            if store.delete(&id)? {
                println!("Deleted {}.", entry.server);
            }
            Ok(())
        }
        Command::Clear { yes } => {
            if !yes && !prompt_yes_no("Delete ALL saved servers? [y/N]: ") {
                return Ok(());
            }
            if store.clear_all()? {
                println!("Removed all saved servers.");
            } else {
                println!("No saved servers to remove.");
            }
            Ok(())
        }
    }
}

async fn monitor_once(args: MonitorArgs, cfg: &Config, store: &ProfileStore) -> Result<()> {
    let creds = match &args.saved {
        Some(id) => {
            let entry = store
                .get_by_id(id)
                .ok_or_else(|| anyhow!("no saved server with id '{id}'"))?;
            if let Err(e) = store.update_last_used(id) {
                warn!("could not record last use of {}: {e}", entry.server);
            }
            entry.credentials()
        }
        None => {
            let Some(port) = parse_port(&args.port) else {
                bail!(PORT_MESSAGE);
            };
            let password = match args.password {
                Some(p) => p,
                None => prompt_string("Password: ")?
                    .trim_end_matches(['\r', '\n'])
                    .to_string(),
            };
            Credentials {
                server: args.server.unwrap_or_default().trim().to_string(),
                username: args.username.unwrap_or_default().trim().to_string(),
                password,
                port,
                transport: args.transport,
            }
        }
    };
    validate_credentials(&creds).map_err(|e| anyhow!("{e}"))?;

    let client = MonitorClient::new(cfg.backend.clone(), cfg.timeout)?;
    let report = client.monitor(&creds).await?;
    print!("{}", render_text(&report));

    if !args.no_save {
        if let Err(e) = store.save(&creds) {
            warn!("metrics fetched but saving {} failed: {e}", creds.server);
        }
    }
    Ok(())
}

fn list(store: &ProfileStore) {
    let all = store.get_all();
    if all.is_empty() {
        println!("No saved servers yet.");
        return;
    }
    let now = Utc::now();
    println!(
        "{:<36}  {:<24}  {:<20}  {:>5}  {:<8}  LAST USED",
        "ID", "SERVER", "USERNAME", "PORT", "AUTH"
    );
    for p in all {
        println!(
            "{:<36}  {:<24}  {:<20}  {:>5}  {:<8}  {}",
            p.id,
            p.server,
            p.username,
            p.port,
            p.transport.as_str().to_ascii_uppercase(),
            relative_time(p.last_used, now)
        );
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
