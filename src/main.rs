//! tenantfind - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tenantfind::config::{self, CliOverrides, ResolvedConfig};
use tenantfind::model::AppError;
use tenantfind::provider::{DirectoryProvider, HttpProvider, TenantSource};
use tenantfind::view::{self, AppOptions};
use tracing::info;

/// tenantfind - search the tenant directory from the terminal
#[derive(Parser, Debug)]
#[command(name = "tenantfind")]
#[command(version)]
#[command(about = "Debounced, cached tenant search for the admin console")]
pub struct Args {
    /// Tenant list JSON file (reads from stdin if neither a file nor an API URL is given)
    pub file: Option<PathBuf>,

    /// Admin API base URL; tenants are fetched from <URL>/api/tenants
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Bearer token for the admin API
    #[arg(long)]
    pub token: Option<String>,

    /// Quiet period after the last keystroke before searching
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Directory export files are written to
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Path to log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged);

    Ok(config::apply_cli_overrides(
        with_env,
        CliOverrides {
            debounce_ms: args.debounce_ms,
            api_url: args.api_url.clone(),
            api_token: args.token.clone(),
            log_file_path: args.log_file.clone(),
        },
    ))
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    tenantfind::logging::init(&config.log_file_path)?;

    // api_token is never logged
    info!(
        debounce = ?config.debounce,
        cache_capacity = config.cache_capacity,
        lookup_timeout = ?config.lookup_timeout,
        max_matches = config.max_matches,
        api_url = ?config.api_url,
        "Configuration loaded and resolved"
    );

    let mut options = AppOptions {
        controller: config.controller_config(),
        export_dir: args.export_dir,
        ..AppOptions::default()
    };

    // An explicit file wins over a configured API
    match (args.file, config.api_url) {
        (None, Some(url)) => {
            let provider =
                HttpProvider::new(url, config.api_token)?.with_limit(config.max_matches);
            options.source_label = provider.endpoint();
            view::run_with_provider(provider, options)?;
        }
        (file, _) => {
            let source = TenantSource::detect(file);
            let provider = DirectoryProvider::load(&source)?.with_limit(config.max_matches);
            options.source_label = format!("{} tenants from {source}", provider.tenants().len());
            view::run_with_provider(provider, options)?;
        }
    }

    Ok(())
}
