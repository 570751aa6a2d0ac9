//! # Recent State Summarizer
//!
//! Collects the titles of articles someone recently wrote or bookmarked and
//! asks an LLM what that person has been up to.
//!
//! ## Features
//!
//! - Reads Hatena Blog archives, Hatena Bookmark, note and Qiita feeds, Qiita
//!   and Adventar advent calendars, and the Qiita API
//! - Normalizes every source into `{title, url[, description]}` records
//! - Saves records as JSON lines or as a `- title` bullet list
//! - Summarizes a bullet list through an OpenAI-compatible chat completion
//!
//! ## Usage
//!
//! ```sh
//! recent_state_summarizer fetch https://qiita.com/ftnext/feed.atom titles.txt --as-title-list
//! recent_state_summarizer summarize titles.txt
//! ```
//!
//! ## Architecture
//!
//! 1. **Resolve**: the registry picks the first scraper whose matcher accepts the URL
//! 2. **Fetch**: the scraper downloads and parses its source, one request at a time
//! 3. **Output**: records are rendered and written to the save path
//! 4. **Summarize**: the bullet list is embedded in a prompt and sent once

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod http;
mod models;
mod outputs;
mod registry;
mod scrapers;
mod summarize;
mod utils;

use api::ChatCompletionClient;
use cli::{Cli, Command};
use config::AppConfig;
use error::FetchError;
use http::HttpClient;
use registry::{Registry, default_registry, fetch_titles};
use summarize::{read_titles, summarize_titles};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = config::load_config(args.config.as_deref())?;
    let registry = default_registry(&config.fetch);

    let result = match args.command {
        Command::Fetch {
            url,
            save_path,
            as_title_list,
        } => run_fetch(&config, &registry, &url, &save_path, as_title_list).await,
        Command::Summarize { titles_path } => run_summarize(&config, &titles_path).await,
        Command::Run { url } => run_pipeline(&config, &registry, &url).await,
        Command::Sources => {
            print_sources(&registry);
            Ok(())
        }
    };

    if let Err(e) = &result {
        error!(error = %e, "Execution failed");
        return result;
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

#[instrument(level = "info", skip(config, registry))]
async fn run_fetch(
    config: &AppConfig,
    registry: &Registry,
    url: &str,
    save_path: &Path,
    as_title_list: bool,
) -> Result<(), Box<dyn Error>> {
    let client = HttpClient::new(&config.fetch)?;
    match outputs::fetch_and_save(registry, &client, url, save_path, as_title_list).await {
        Ok(count) => {
            info!(count, path = %save_path.display(), "Saved titles");
            Ok(())
        }
        Err(e @ FetchError::UnsupportedSource { .. }) => {
            error!("{}", supported_sources_hint(registry));
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

#[instrument(level = "info", skip(config))]
async fn run_summarize(config: &AppConfig, titles_path: &Path) -> Result<(), Box<dyn Error>> {
    let titles = read_titles(titles_path).await?;
    let client = ChatCompletionClient::new(config.llm.clone())?;
    let summary = summarize_titles(&client, &titles).await?;
    println!("{summary}");
    Ok(())
}

/// Fetch titles as a bullet list and summarize them without touching disk.
#[instrument(level = "info", skip(config, registry))]
async fn run_pipeline(config: &AppConfig, registry: &Registry, url: &str) -> Result<(), Box<dyn Error>> {
    let client = HttpClient::new(&config.fetch)?;
    let records = match fetch_titles(registry, &client, url).await {
        Ok(records) => records,
        Err(e @ FetchError::UnsupportedSource { .. }) => {
            error!("{}", supported_sources_hint(registry));
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    let titles = outputs::titles::render_bullet_list(&records);

    let llm = ChatCompletionClient::new(config.llm.clone())?;
    let summary = summarize_titles(&llm, &titles).await?;
    println!("{summary}");
    Ok(())
}

fn print_sources(registry: &Registry) {
    for (name, example) in registry.help_entries() {
        println!("{name}\t{example}");
    }
}

fn supported_sources_hint(registry: &Registry) -> String {
    format!("Supported sources: {}", registry.names().join(", "))
}
