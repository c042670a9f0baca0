//! Minimal delimited-text table model
//!
//! Comma-separated, no quoting or escaping: the datasets this suite handles
//! are plain numeric/categorical exports. Cells are trimmed on parse.

/// A parsed table: one header row plus data rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse a delimited text blob. Blank lines are skipped; the first
    /// non-blank line is the header.
    pub fn parse(raw: &str) -> Self {
        let mut lines = raw.lines().filter(|line| !line.trim().is_empty());

        let headers = match lines.next() {
            Some(line) => split_row(line),
            None => Vec::new(),
        };

        let rows = lines.map(split_row).collect();

        Self { headers, rows }
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Values of one column by index, row-ordered (missing for short rows)
    pub fn column(&self, index: usize) -> Vec<Option<&str>> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str))
            .collect()
    }

    /// Serialize back to comma-separated text
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.headers.join(","));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&row.join(","));
        }
        out
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

/// Whether a cell counts as a missing value
pub fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let table = Table::parse("a,b\n1,2\n3,4\n");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1], vec!["3", "4"]);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_trims() {
        let table = Table::parse("a, b\n\n 1 ,2\n\n");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_parse_empty_input() {
        let table = Table::parse("");
        assert!(table.headers.is_empty());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_roundtrip() {
        let raw = "a,b\n1,2\n3,4";
        assert_eq!(Table::parse(raw).to_csv(), raw);
    }

    #[test]
    fn test_column_with_short_row() {
        let table = Table::parse("a,b\n1,2\n3");
        let col = table.column(1);
        assert_eq!(col, vec![Some("2"), None]);
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("  "));
        assert!(is_missing("NA"));
        assert!(is_missing("n/a"));
        assert!(is_missing("NULL"));
        assert!(!is_missing("0"));
        assert!(!is_missing("none of the above"));
    }
}
