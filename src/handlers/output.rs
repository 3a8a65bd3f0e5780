//! Table and JSON rendering for command output

use colored::Colorize;
use prettytable::{Cell, Row, Table, format};
use serde::Serialize;

/// Prints any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Builds a borderless table with a bold header row
pub fn build_table(headers: &[&str], rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(Row::new(
        headers
            .iter()
            .map(|h| Cell::new(h).style_spec("b"))
            .collect(),
    ));
    for row in rows {
        table.add_row(Row::new(row.iter().map(|c| Cell::new(c)).collect()));
    }
    table
}

/// Prints a table, or a dimmed note when there are no rows
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("{}", "No results".dimmed());
        return;
    }
    build_table(headers, rows).printstd();
}

/// Prints a `total` footer for paginated listings
pub fn print_page_footer(shown: usize, skip: u64, total: u64) {
    if (shown as u64) < total {
        println!(
            "{}",
            format!("Showing {}-{} of {}", skip + 1, skip + shown as u64, total).dimmed()
        );
    }
}

/// One-line success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Formats an optional value for a table cell
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_table_rows() {
        let rows = vec![
            vec!["team-1".to_string(), "Editors".to_string()],
            vec!["team-2".to_string(), "Writers".to_string()],
        ];
        let table = build_table(&["ID", "NAME"], &rows);
        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("Editors"));
        assert!(rendered.contains("team-2"));
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("x")), "x");
    }
}
