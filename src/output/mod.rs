//! Console messages and file renderers

use crate::cluster::query::select_str;
use owo_colors::{OwoColorize, Stream};
use serde_json::{json, Value};

/// Print an informational message
pub fn info(msg: impl AsRef<str>) {
    println!(
        "{} {}",
        "[INFO]".if_supports_color(Stream::Stdout, |t| t.green()),
        msg.as_ref()
    );
}

/// Print a warning; the run continues
pub fn warn(msg: impl AsRef<str>) {
    println!(
        "{} {}",
        "[WARN]".if_supports_color(Stream::Stdout, |t| t.yellow()),
        msg.as_ref()
    );
}

/// Print a fatal error to stderr
pub fn error(msg: impl AsRef<str>) {
    eprintln!(
        "{} {}",
        "[ERROR]".if_supports_color(Stream::Stderr, |t| t.red().bold().to_string()),
        msg.as_ref()
    );
}

/// Wrap objects in a `v1/List`, the shape `kubectl get -o yaml` produces
pub fn list_document(items: Vec<Value>) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "List",
        "metadata": {"resourceVersion": ""},
        "items": items,
    })
}

/// Format a value as YAML
pub fn format_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}

/// Format raw headers and rows as an aligned, uncoloured table
pub fn format_table_raw(headers: &[&str], rows: &[Vec<String>]) -> String {
    let num_cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

    for row in rows {
        for (i, cell) in row.iter().enumerate().take(num_cols) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    for row in std::iter::once(&header_row).chain(rows) {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate().take(num_cols) {
            let padding = widths[i].saturating_sub(cell.chars().count());
            line.push_str(cell);
            line.push_str(&" ".repeat(padding + 2));
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Human-readable events listing, like `kubectl get events`
pub fn format_events_table(events: &[Value]) -> String {
    if events.is_empty() {
        return "No events found\n".to_string();
    }

    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|event| {
            let seen = select_str(event, "$.lastTimestamp")
                .or_else(|| select_str(event, "$.eventTime"))
                .or_else(|| select_str(event, "$.metadata.creationTimestamp"));
            let object = format!(
                "{}/{}",
                select_str(event, "$.involvedObject.kind")
                    .unwrap_or_default()
                    .to_lowercase(),
                select_str(event, "$.involvedObject.name").unwrap_or_default()
            );
            vec![
                seen.as_deref().map(humanize_timestamp).unwrap_or_else(|| "<unknown>".to_string()),
                select_str(event, "$.type").unwrap_or_default(),
                select_str(event, "$.reason").unwrap_or_default(),
                object,
                select_str(event, "$.message").unwrap_or_default().replace('\n', " "),
            ]
        })
        .collect();

    format_table_raw(&["LAST SEEN", "TYPE", "REASON", "OBJECT", "MESSAGE"], &rows)
}

/// Age of an RFC 3339 timestamp ("5m", "2d"); unparsable input is returned as-is
pub fn humanize_timestamp(ts: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(ts) {
        Ok(time) => humanize_duration(time.with_timezone(&chrono::Utc)),
        Err(_) => ts.to_string(),
    }
}

/// Humanize time since a timestamp
pub fn humanize_duration(time: chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(time);

    if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        format!("{}s", duration.num_seconds().max(0))
    }
}
