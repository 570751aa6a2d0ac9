//! JSON-lines rendering.
//!
//! One compact JSON object per record, records joined by `\n` with no
//! enclosing array and no trailing newline. Keys follow [`TitleRecord`]'s
//! field order and non-ASCII text is written as-is.

use crate::models::TitleRecord;
use itertools::Itertools;

pub fn render_json_lines(records: &[TitleRecord]) -> Result<String, serde_json::Error> {
    let lines: Vec<String> = records
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<_, _>>()?;
    Ok(lines.into_iter().join("\n"))
}

/// Parse JSON-lines back into records. Blank lines are ignored.
pub fn parse_json_lines(text: &str) -> Result<Vec<TitleRecord>, serde_json::Error> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}
