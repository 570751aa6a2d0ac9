//! Bullet-list rendering: one `- <title>` line per record.

use crate::models::TitleRecord;
use itertools::Itertools;

pub fn render_bullet_list(records: &[TitleRecord]) -> String {
    records.iter().map(|r| format!("- {}", r.title)).join("\n")
}
