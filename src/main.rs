use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use onedoc::app::App;
use onedoc::catalog::{Catalog, ALL_TOPICS};
use onedoc::config::Config;
use onedoc::preferences::PreferenceManager;
use onedoc::storage::{Database, DatabaseError};
use onedoc::ui::{self, TerminalPointer};
use onedoc::util::strip_control_chars;
use onedoc::watched::WATCHED_KEY;

/// Get the config directory path (~/.config/onedoc/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("onedoc"))
}

#[derive(Parser, Debug)]
#[command(
    name = "onedoc",
    about = "Terminal documentation and tutorial browser for the One Click plugin"
)]
struct Args {
    /// Catalog TOML file to use instead of the built-in content
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Config file (default: ~/.config/onedoc/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Clear the list of watched tutorials
    #[arg(long)]
    reset_watched: bool,

    /// Print the tutorial list and exit
    #[arg(long)]
    list: bool,

    /// Topic to list with --list
    #[arg(long, value_name = "ID", default_value = ALL_TOPICS, requires = "list")]
    topic: String,

    /// Search text to list with --list
    #[arg(long, value_name = "TEXT", default_value = "", requires = "list")]
    query: String,
}

/// Send logs to a file; the terminal belongs to the TUI.
fn init_logging(config_dir: &Path) -> Result<()> {
    let log_path = config_dir.join("onedoc.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    }

    // User-only access on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }
    Ok(())
}

/// Catalog source precedence: `--catalog`, then `catalog_path`, then built-in.
fn load_catalog(args: &Args, config: &Config) -> Result<Catalog> {
    let path = args.catalog.as_ref().or(config.catalog_path.as_ref());
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading catalog");
            Catalog::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))
        }
        None => Catalog::builtin().context("Built-in catalog is invalid"),
    }
}

fn print_list(catalog: &Catalog, topic: &str, query: &str) {
    let videos = catalog.filter(topic, query);
    if videos.is_empty() {
        println!("No tutorials found");
        return;
    }
    for video in videos {
        println!(
            "{:>3}  {}  [{}] {}",
            strip_control_chars(&video.id),
            strip_control_chars(&video.title),
            strip_control_chars(&video.tool),
            strip_control_chars(&video.duration)
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    ensure_config_dir(&config_dir)?;
    init_logging(&config_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let catalog = load_catalog(&args, &config)?;
    tracing::info!(
        topics = catalog.topics().len(),
        videos = catalog.videos().len(),
        "Catalog loaded"
    );

    if args.list {
        print_list(&catalog, &args.topic, &args.query);
        return Ok(());
    }

    let db_path = config_dir.join("onedoc.db");
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of onedoc appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open database: {}", e));
        }
    };

    if args.reset_watched {
        let removed = db
            .delete_preference(WATCHED_KEY)
            .await
            .context("Failed to reset watched list")?;
        tracing::info!(removed, "Watched list reset");
        if removed {
            println!("Watched list cleared.");
        } else {
            println!("No watched list to clear.");
        }
    }

    let prefs = match PreferenceManager::load(&config, &db).await {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load stored preferences, using config");
            PreferenceManager::from_config(&config)
        }
    };

    let mut app = App::new(
        db,
        Arc::new(catalog),
        prefs,
        Arc::new(TerminalPointer::new()),
    );
    app.apply_config(&config);
    app.load_watched().await;

    ui::run(&mut app).await?;

    Ok(())
}
