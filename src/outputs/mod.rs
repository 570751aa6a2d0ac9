//! Rendering fetched records and writing them to disk.
//!
//! # Submodules
//!
//! - [`json`]: JSON-lines, one record per line (the default)
//! - [`titles`]: bullet list of titles, the input of the summarizer
//!
//! [`fetch_and_save`] ties the registry, the renderers and the file write
//! together for the `fetch` subcommand.

pub mod json;
pub mod titles;

use crate::error::FetchError;
use crate::http::PageClient;
use crate::models::TitleRecord;
use crate::registry::{Registry, fetch_titles};
use crate::utils::ensure_parent_dir;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    JsonLines,
    TitleList,
}

impl OutputFormat {
    pub fn from_title_list_flag(as_title_list: bool) -> Self {
        if as_title_list {
            Self::TitleList
        } else {
            Self::JsonLines
        }
    }
}

pub fn render(records: &[TitleRecord], format: OutputFormat) -> Result<String, FetchError> {
    Ok(match format {
        OutputFormat::JsonLines => json::render_json_lines(records)?,
        OutputFormat::TitleList => titles::render_bullet_list(records),
    })
}

/// Write `contents` as UTF-8, creating missing parent directories.
#[instrument(level = "info", skip(contents), fields(path = %path.display(), bytes = contents.len()))]
pub async fn save(path: &Path, contents: &str) -> Result<(), FetchError> {
    ensure_parent_dir(path).await?;
    fs::write(path, contents).await?;
    info!("Wrote titles");
    Ok(())
}

/// Resolve `url`, fetch all records and save them in the requested format.
#[instrument(level = "info", skip(registry, client), fields(path = %save_path.display()))]
pub async fn fetch_and_save(
    registry: &Registry,
    client: &dyn PageClient,
    url: &str,
    save_path: &Path,
    as_title_list: bool,
) -> Result<usize, FetchError> {
    let records = fetch_titles(registry, client, url).await?;
    let contents = render(&records, OutputFormat::from_title_list_flag(as_title_list))?;
    save(save_path, &contents).await?;
    Ok(records.len())
}
