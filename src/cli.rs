//! Command-line interface definitions.
//!
//! All arguments use the `clap` derive API. The global `--config` option can
//! also come from the `RSS_CONFIG` environment variable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Collect recent article titles and summarize what their author is up to.
///
/// # Examples
///
/// ```sh
/// # Save Qiita titles as JSON lines
/// recent_state_summarizer fetch https://qiita.com/ftnext/feed.atom titles.jsonl
///
/// # Save a bullet list, then summarize it
/// recent_state_summarizer fetch https://example.hatenablog.com/archive/2025 titles.txt --as-title-list
/// recent_state_summarizer summarize titles.txt
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long, global = true, env = "RSS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Fetch titles from a supported URL and save them
    Fetch {
        /// Source URL (see `sources` for supported sites)
        url: String,
        /// File to write
        save_path: PathBuf,
        /// Write a `- title` bullet list instead of JSON lines
        #[arg(long)]
        as_title_list: bool,
    },
    /// Summarize a bullet list of titles
    Summarize {
        /// File written by `fetch --as-title-list`
        titles_path: PathBuf,
    },
    /// Fetch titles from a URL and print the summary directly
    Run {
        url: String,
    },
    /// List supported sources with example URLs
    Sources,
}
