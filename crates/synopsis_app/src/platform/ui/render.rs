use std::fmt::Write;

use chrono::{DateTime, Utc};
use synopsis_core::{AppViewModel, ResultView, StageRow, StageStatus};

use super::constants::*;

/// Renders the view as plain text. Empty when there is nothing to show.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    if let Some(reason) = &view.input_error {
        let _ = writeln!(out, "Input: {reason}");
    }

    if view.stages_visible {
        match &view.address {
            Some(address) => {
                let _ = writeln!(out, "Pipeline for {address}");
            }
            None => out.push_str("Pipeline\n"),
        }
        for row in &view.stages {
            let _ = writeln!(out, "  {}", format_stage_row(row));
        }
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {error}");
    }

    if let Some(result) = &view.result {
        out.push('\n');
        out.push_str(&format_result(result));
    }

    out
}

fn format_stage_row(row: &StageRow) -> String {
    let mark = match row.status {
        StageStatus::Pending => MARK_PENDING,
        StageStatus::Processing => MARK_PROCESSING,
        StageStatus::Completed => MARK_COMPLETED,
        StageStatus::Errored => MARK_ERRORED,
    };
    match &row.detail {
        Some(detail) => format!("{mark} {}: {detail}", row.kind.label()),
        None => format!("{mark} {}", row.kind.label()),
    }
}

fn format_result(result: &ResultView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", result.title);
    let _ = writeln!(out, "{}", result.source_url);
    out.push('\n');
    let _ = writeln!(out, "{}", result.synopsis.trim_end());
    out.push('\n');

    let mut meta = vec![format!("{} words", format_with_commas(result.word_count))];
    if let Some(author) = &result.author {
        meta.push(format!("by {author}"));
    }
    meta.push(format_created_at(&result.created_at));
    let _ = writeln!(out, "{}", meta.join(" | "));

    if let Some(translation) = &result.translation {
        out.push('\n');
        out.push_str("Urdu translation:\n");
        let _ = writeln!(out, "{}", translation.trim_end());
    }
    out
}

/// Shows RFC 3339 timestamps in UTC; anything else is printed as received.
fn format_created_at(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(stamp) => stamp
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
