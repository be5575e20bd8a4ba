//! Output formatting helpers for CLI commands

use crate::health::HealthSnapshot;
use crate::notes::Note;
use crate::registry::Endpoint;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Longest content preview shown in the notes table.
const CONTENT_PREVIEW_CHARS: usize = 48;

/// Format notes as a table
pub fn format_notes_table(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes.".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Content", "Updated"]);

    for note in notes {
        table.add_row(vec![
            Cell::new(note.id),
            Cell::new(&note.title),
            Cell::new(preview(&note.content)),
            Cell::new(note.updated_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    table.to_string()
}

/// Format notes as JSON
pub fn format_notes_json(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "notes": notes }))
}

/// Format probe results as a table, followed by the live endpoint line
pub fn format_health_table(snapshots: &[HealthSnapshot], live: Option<&Endpoint>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Endpoint", "Status", "Latency", "Error"]);

    for s in snapshots {
        table.add_row(vec![
            Cell::new(&s.url),
            Cell::new(status_label(s.healthy)),
            Cell::new(
                s.latency_ms
                    .map(|ms| format!("{}ms", ms))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(s.error.as_deref().unwrap_or("")),
        ]);
    }

    format!("{}\n{}", table, live_line(live))
}

/// Format probe results as JSON
pub fn format_health_json(
    snapshots: &[HealthSnapshot],
    live: Option<&Endpoint>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "endpoints": snapshots,
        "live_endpoint": live,
    }))
}

/// "Live endpoint: ..." summary line
pub fn live_line(live: Option<&Endpoint>) -> String {
    match live {
        Some(endpoint) => format!("Live endpoint: {}", endpoint.url().green()),
        None => format!("Live endpoint: {}", "none".red()),
    }
}

/// Colored status word for an endpoint
pub fn status_label(healthy: bool) -> String {
    if healthy {
        "Healthy".green().to_string()
    } else {
        "Unhealthy".red().to_string()
    }
}

fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    if first_line.chars().count() > CONTENT_PREVIEW_CHARS || content.lines().nth(1).is_some() {
        let cut: String = first_line.chars().take(CONTENT_PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn note(id: i64, content: &str) -> Note {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        Note {
            id,
            title: format!("title {}", id),
            content: content.to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    fn snapshot(url: &str, healthy: bool) -> HealthSnapshot {
        HealthSnapshot {
            url: url.to_string(),
            healthy,
            latency_ms: healthy.then_some(12),
            error: (!healthy).then(|| "request timeout after 3000ms".to_string()),
            checked_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_notes_table() {
        let table = format_notes_table(&[note(1, "milk"), note(2, "eggs")]);
        assert!(table.contains("title 1"));
        assert!(table.contains("eggs"));
        assert!(table.contains("2024-05-01 08:30"));
    }

    #[test]
    fn test_format_notes_table_empty() {
        assert_eq!(format_notes_table(&[]), "No notes.");
    }

    #[test]
    fn test_format_notes_json_keeps_camel_case() {
        let json = format_notes_json(&[note(3, "x")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["notes"][0]["id"], 3);
        assert!(value["notes"][0].get("updatedAt").is_some());
    }

    #[test]
    fn test_preview_truncates_long_and_multiline() {
        assert_eq!(preview("short"), "short");
        assert_eq!(preview("line one\nline two"), "line one…");
        let long = "x".repeat(60);
        assert_eq!(preview(&long).chars().count(), CONTENT_PREVIEW_CHARS + 1);
    }

    #[test]
    fn test_format_health_table() {
        colored::control::set_override(false);
        let live = Endpoint::new("http://a:1");
        let output = format_health_table(
            &[snapshot("http://a:1", true), snapshot("http://b:1", false)],
            Some(&live),
        );
        assert!(output.contains("12ms"));
        assert!(output.contains("request timeout after 3000ms"));
        assert!(output.contains("Live endpoint: http://a:1"));
    }

    #[test]
    fn test_format_health_json() {
        let json = format_health_json(&[snapshot("http://b:1", false)], None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["endpoints"][0]["healthy"], false);
        assert!(value["live_endpoint"].is_null());
    }
}
