//! Reshape nested JSON from describe/get calls into terminal-friendly text.
//!
//! Pure functions: callers decide what to print. Missing optional fields
//! render as a placeholder instead of failing, and long scalars are
//! truncated to keep table columns aligned.

use serde_json::Value;

pub const PLACEHOLDER: &str = "N/A";

/// Character budget for a single cell before truncation kicks in.
/// Secret values and endpoint URLs routinely blow past this.
pub const CELL_BUDGET: usize = 48;

/// A table column: header plus the dotted path to pull from each row.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub path: &'static str,
}

impl Column {
    pub const fn new(header: &'static str, path: &'static str) -> Self {
        Column { header, path }
    }
}

/// Walk a dotted field path through objects and arrays.
/// `items.0.metadata.name` indexes into arrays with numeric segments.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Extract a display string at `path`, substituting the placeholder for
/// anything missing or null.
pub fn scalar(value: &Value, path: &str, budget: usize) -> String {
    match lookup(value, path) {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(Value::String(s)) => truncate(s, budget),
        Some(other) => truncate(&other.to_string(), budget),
    }
}

/// Truncate to `budget` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, budget: usize) -> String {
    if s.chars().count() <= budget {
        return s.to_string();
    }
    let kept: String = s.chars().take(budget.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Render JSON documents as fixed-width columns, one row per document.
pub fn json_table(rows: &[Value], columns: &[Column]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|col| scalar(row, col.path, CELL_BUDGET))
                .collect()
        })
        .collect();
    let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();
    table(&headers, cells)
}

/// Render pre-extracted string cells as fixed-width columns.
pub fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    out.push_str(header_row.join("  ").trim_end());
    out.push('\n');

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&sep.join("  "));
    out.push('\n');

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Render labeled fields from one document as an aligned key/value block.
pub fn kv_block(value: &Value, fields: &[(&str, &str)]) -> String {
    let label_width = fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (label, path) in fields {
        let v = scalar(value, path, CELL_BUDGET);
        out.push_str(&format!("  {label:label_width$}  {v}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_walks_objects_and_arrays() {
        let doc = json!({"items": [{"metadata": {"name": "node-a"}}]});
        assert_eq!(
            lookup(&doc, "items.0.metadata.name"),
            Some(&json!("node-a"))
        );
        assert_eq!(lookup(&doc, "items.1.metadata.name"), None);
        assert_eq!(lookup(&doc, "items.x"), None);
    }

    #[test]
    fn missing_fields_become_placeholder() {
        let doc = json!({"name": "q", "arn": null});
        assert_eq!(scalar(&doc, "name", CELL_BUDGET), "q");
        assert_eq!(scalar(&doc, "arn", CELL_BUDGET), PLACEHOLDER);
        assert_eq!(scalar(&doc, "endpoint.url", CELL_BUDGET), PLACEHOLDER);
    }

    #[test]
    fn long_scalars_are_truncated() {
        let long = "x".repeat(100);
        let doc = json!({ "secret": long });
        let cell = scalar(&doc, "secret", 10);
        assert_eq!(cell.chars().count(), 10);
        assert!(cell.ends_with('…'));
    }

    #[test]
    fn short_scalars_pass_through() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
    }

    #[test]
    fn table_aligns_columns() {
        let rows = vec![
            json!({"name": "a", "status": "ACTIVE"}),
            json!({"name": "longer-name", "status": "CREATING"}),
        ];
        let cols = [Column::new("NAME", "name"), Column::new("STATUS", "status")];
        let out = json_table(&rows, &cols);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "NAME         STATUS");
        assert_eq!(lines[1], "-----------  --------");
        assert_eq!(lines[2], "a            ACTIVE");
        assert_eq!(lines[3], "longer-name  CREATING");
    }

    #[test]
    fn table_substitutes_placeholder_per_row() {
        let rows = vec![json!({"name": "a"}), json!({"name": "b", "age": 3})];
        let cols = [Column::new("NAME", "name"), Column::new("AGE", "age")];
        let out = json_table(&rows, &cols);
        assert!(out.contains("N/A"));
        assert!(out.contains('3'));
    }

    #[test]
    fn kv_block_aligns_labels() {
        let doc = json!({"status": "ACTIVE", "arn": "arn:aws:x"});
        let out = kv_block(&doc, &[("Status", "status"), ("Arn", "arn"), ("Endpoint", "endpoint")]);
        assert_eq!(
            out,
            "  Status    ACTIVE\n  Arn       arn:aws:x\n  Endpoint  N/A\n"
        );
    }
}
