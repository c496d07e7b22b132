//! Table output formatting using the `tabled` crate

use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment, Modify},
};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Create a rounded table from rows of strings
    pub fn from_rows(headers: &[&str], rows: &[Vec<String>]) -> String {
        if rows.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().copied());

        for row in rows {
            builder.push_record(row.iter().map(|s| s.as_str()));
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    /// Format a key-value table with right-aligned counts
    pub fn format_counts(pairs: &[(&str, usize)]) -> String {
        let mut builder = Builder::default();

        for (key, value) in pairs {
            builder.push_record([key.to_string(), value.to_string()]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.with(Modify::new(Columns::last()).with(Alignment::right()));
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let rows = vec![
            vec!["Added".to_string(), "2".to_string()],
            vec!["Removed".to_string(), "1".to_string()],
        ];
        let output = TableOutput::from_rows(&["Change", "Types"], &rows);

        assert!(output.contains("Change"));
        assert!(output.contains("Removed"));
        assert!(output.contains('╭'));
    }

    #[test]
    fn test_from_rows_empty() {
        assert_eq!(TableOutput::from_rows(&["A"], &[]), "(no results)");
    }

    #[test]
    fn test_format_counts() {
        let output = TableOutput::format_counts(&[("types added", 3), ("fields renamed", 12)]);

        assert!(output.contains("types added"));
        assert!(output.contains("12"));
    }
}
