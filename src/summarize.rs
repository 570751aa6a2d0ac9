//! Summarize a bullet list of titles with one chat completion.

use crate::api::AskAsync;
use crate::error::SummarizeError;
use crate::outputs::json::parse_json_lines;
use crate::outputs::titles::render_bullet_list;
use crate::utils::truncate_for_log;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Build the prompt asking what the author of `titles` has been up to lately.
pub fn build_prompt(titles: &str) -> String {
    format!(
        "以下は同一人物が最近書いたブログ記事のタイトルの一覧です。\n\
         それを読み、この人物が最近何をやっているかを詳しく教えてください。\n\
         応答は文ごとに改行して区切ってください。\n\
         \n\
         {titles}\n"
    )
}

/// Send the prompt for `titles` and return the completion verbatim.
#[instrument(level = "info", skip_all, fields(title_bytes = titles.len()))]
pub async fn summarize_titles<A: AskAsync>(client: &A, titles: &str) -> Result<String, SummarizeError> {
    let prompt = build_prompt(titles);
    debug!(prompt = %truncate_for_log(&prompt, 300), "Built summary prompt");
    let summary = client.ask(&prompt).await?;
    info!(preview = %truncate_for_log(&summary, 120), "Summary generated");
    Ok(summary)
}

/// Read a titles file written by `fetch`.
///
/// Bullet lists are returned unchanged; a JSON-lines file is converted to a
/// bullet list first.
pub async fn read_titles(path: &Path) -> std::io::Result<String> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(match parse_json_lines(&text) {
        Ok(records) if !records.is_empty() => {
            debug!(count = records.len(), "Converted JSON lines to a bullet list");
            render_bullet_list(&records)
        }
        _ => text,
    })
}
