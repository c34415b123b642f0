//! Quote-aware parser for uploaded delimited text.
//!
//! The first non-empty line is the header; each following line is tokenized on
//! commas with a scanner that treats commas inside double quotes as literal
//! text. Fields are trimmed and stripped of one surrounding quote pair. Lines
//! whose field count does not match the header are not importable rows; they
//! are returned as skip records so the import driver can report them.

use std::collections::HashMap;

/// One data row: column name -> non-empty cell value. Empty cells are absent.
#[derive(Debug, Clone)]
pub struct ImportRow {
    /// 1-based line number among the file's non-empty lines (header is line 1).
    pub line: usize,
    values: HashMap<String, String>,
}

impl ImportRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Owned copy of an optional cell, for building insert payloads.
    pub fn opt(&self, column: &str) -> Option<String> {
        self.values.get(column).cloned()
    }
}

/// A line that could not become a row because its field count disagreed with
/// the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

#[derive(Debug, Default)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<ImportRow>,
    pub skipped: Vec<SkippedLine>,
}

/// Parses delimited text. Fewer than 2 non-empty lines yields an empty result.
pub fn parse_delimited(text: &str) -> ParsedCsv {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return ParsedCsv::default();
    }

    let headers: Vec<String> = lines[0].split(',').map(clean_field).collect();

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (i, line) in lines[1..].iter().enumerate() {
        let line_no = i + 2; // header occupies line 1
        let values = split_quoted(line);

        if values.len() != headers.len() {
            skipped.push(SkippedLine {
                line: line_no,
                expected: headers.len(),
                found: values.len(),
            });
            continue;
        }

        let cells = headers
            .iter()
            .zip(values)
            .filter(|(_, v)| !v.is_empty())
            .map(|(h, v)| (h.clone(), v))
            .collect();
        rows.push(ImportRow {
            line: line_no,
            values: cells,
        });
    }

    ParsedCsv {
        headers,
        rows,
        skipped,
    }
}

/// Splits one line on commas, treating commas inside double quotes as literal.
fn split_quoted(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(clean_field(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(clean_field(&current));
    values
}

/// Trims whitespace and strips at most one leading and one trailing quote.
fn clean_field(field: &str) -> String {
    let trimmed = field.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_single_row() {
        let csv = parse_delimited("firstName,lastName,email\nJane,Doe,jane@x.com\n");
        assert_eq!(csv.headers, vec!["firstName", "lastName", "email"]);
        assert_eq!(csv.rows.len(), 1);
        assert_eq!(csv.rows[0].line, 2);
        assert_eq!(csv.rows[0].get("firstName"), Some("Jane"));
        assert_eq!(csv.rows[0].get("email"), Some("jane@x.com"));
        assert!(csv.skipped.is_empty());
    }

    #[test]
    fn test_quoted_delimiter_stays_one_field() {
        let csv = parse_delimited("name,title\n\"Smith, Jones\",Engineer\n");
        assert_eq!(csv.rows.len(), 1);
        assert_eq!(csv.rows[0].get("name"), Some("Smith, Jones"));
        assert_eq!(csv.rows[0].get("title"), Some("Engineer"));
    }

    #[test]
    fn test_quoted_headers_are_unwrapped() {
        let csv = parse_delimited("\"firstName\", \"lastName\"\nJane,Doe\n");
        assert_eq!(csv.headers, vec!["firstName", "lastName"]);
    }

    #[test]
    fn test_empty_cells_are_absent() {
        let csv = parse_delimited("firstName,lastName,email\nJane,,jane@x.com\n");
        assert_eq!(csv.rows[0].get("lastName"), None);
        assert_eq!(csv.rows[0].get("firstName"), Some("Jane"));
    }

    #[test]
    fn test_fewer_than_two_lines_is_empty() {
        assert!(parse_delimited("firstName,lastName\n").rows.is_empty());
        assert!(parse_delimited("").headers.is_empty());
        assert!(parse_delimited("\n\n  \n").rows.is_empty());
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let csv = parse_delimited("a,b\n\n1,2\n   \n3,4\n");
        assert_eq!(csv.rows.len(), 2);
        assert_eq!(csv.rows[0].line, 2);
        assert_eq!(csv.rows[1].line, 3);
    }

    #[test]
    fn test_width_mismatch_is_surfaced_not_silent() {
        let csv = parse_delimited("a,b,c\n1,2\n1,2,3\n");
        assert_eq!(csv.rows.len(), 1);
        assert_eq!(
            csv.skipped,
            vec![SkippedLine {
                line: 2,
                expected: 3,
                found: 2
            }]
        );
        // The surviving row keeps its true source line.
        assert_eq!(csv.rows[0].line, 3);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let csv = parse_delimited("a,b\n  x  , \"y\" \n");
        assert_eq!(csv.rows[0].get("a"), Some("x"));
        assert_eq!(csv.rows[0].get("b"), Some("y"));
    }
}
