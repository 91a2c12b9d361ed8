mod cli;
mod site;

use std::path::Path;
use std::process::ExitCode;

use kepailitan_common::{ConfigError, KepailitanError};
use kepailitan_config::{config_to_json, toml_loader, SiteConfig};
use kepailitan_search::Page;
use kepailitan_web::{CachePolicy, FileStore, KeyValueStore, MemoryStore};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::site::Site;

fn load_config(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => kepailitan_config::load_config(),
    }
}

async fn run<S: KeyValueStore>(
    args: &cli::Args,
    config: &SiteConfig,
    store: S,
) -> Result<(), KepailitanError> {
    let page = match &args.content {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let page = Page::from_json(&raw)?;
            tracing::info!("Loaded {} content blocks from {}", page.len(), path.display());
            page
        }
        None => {
            tracing::warn!("No content outline given, searching an empty page");
            Page::new()
        }
    };

    let mut site = Site::new(page, config, store);
    for script in site.init_scripts() {
        println!("{script}");
    }

    let input: Box<dyn AsyncBufRead + Unpin> = match &args.script {
        Some(path) => Box::new(BufReader::new(tokio::fs::File::open(path).await?)),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };
    site.serve(input.lines(), |script| println!("{script}")).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Config is read before logging so its level can apply.
    let loaded = load_config(args.config.as_deref());
    let config_directive = loaded
        .as_ref()
        .map(|c| c.logging.level.as_directive())
        .unwrap_or("kepailitan=info");
    let log_directive = args
        .log_directive()
        .unwrap_or_else(|| config_directive.to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .init();

    tracing::info!("kepailitan v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        SiteConfig::default()
    });

    if args.print_config {
        println!("{}", config_to_json(&config));
        return ExitCode::SUCCESS;
    }
    if args.service_worker {
        print!("{}", CachePolicy::new(config.offline.clone()).service_worker());
        return ExitCode::SUCCESS;
    }

    let storage_path = args.storage.clone().or_else(FileStore::default_path);
    let result = match storage_path.map(FileStore::open) {
        Some(Ok(store)) => {
            tracing::info!("Progress stored in {}", store.path().display());
            run(&args, &config, store).await
        }
        Some(Err(e)) => {
            tracing::warn!("Progress storage unavailable, keeping it in memory: {e}");
            run(&args, &config, MemoryStore::new()).await
        }
        None => run(&args, &config, MemoryStore::new()).await,
    };

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("kepailitan: {e}");
            ExitCode::FAILURE
        }
    }
}
