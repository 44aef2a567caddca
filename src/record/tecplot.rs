//! Reader for Tecplot-style ASCII tables
//!
//! ```text
//! TITLE = "transport"
//! VARIABLES = "time" "x" "state"
//! ZONE I=500, J=3001, F=POINT
//! 0.000000E+00 1.000000E-01 5.2311D-40
//! ...
//! ```
//!
//! Keyword lines (anything starting with a letter) other than `VARIABLES`
//! are skipped, as are blank lines and `#` comments. Quoted variable names
//! may continue on the following lines.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{PostError, Result};
use crate::record::SimulationRecord;

/// Read a `.dat` table from disk
pub fn read(path: &Path) -> Result<SimulationRecord> {
    let file = File::open(path).map_err(|source| PostError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, BufReader::new(file))
}

/// Parse a table from any buffered reader; `path` is used for messages only
pub fn parse<R: BufRead>(path: &Path, reader: R) -> Result<SimulationRecord> {
    let parse_error = |line: usize, reason: String| PostError::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut names: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();
    let mut in_variables = false;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| PostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Continuation of a quoted VARIABLES list
        if in_variables && trimmed.starts_with('"') {
            names.extend(parse_variable_names(trimmed));
            continue;
        }

        let first = trimmed.chars().next().unwrap_or(' ');
        if first.is_ascii_alphabetic() && !is_special_float(trimmed) {
            in_variables = false;
            if let Some(list) = keyword_value(trimmed, "variables") {
                if columns.first().is_some_and(|c| !c.is_empty()) {
                    return Err(parse_error(
                        line_no,
                        "VARIABLES line after data rows".to_string(),
                    ));
                }
                names = parse_variable_names(list);
                columns.clear();
                in_variables = true;
            }
            continue;
        }
        in_variables = false;

        if names.is_empty() {
            return Err(parse_error(
                line_no,
                "data row before VARIABLES header".to_string(),
            ));
        }
        if columns.is_empty() {
            columns = vec![Vec::new(); names.len()];
        }

        let tokens: Vec<&str> = trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();

        if tokens.len() != names.len() {
            return Err(parse_error(
                line_no,
                format!("expected {} columns, found {}", names.len(), tokens.len()),
            ));
        }

        for (column, token) in columns.iter_mut().zip(tokens) {
            let value = parse_number(token).ok_or_else(|| {
                parse_error(line_no, format!("'{}' is not a number", token))
            })?;
            column.push(value);
        }
    }

    if names.is_empty() {
        return Err(parse_error(0, "missing VARIABLES header".to_string()));
    }
    if columns.is_empty() {
        columns = vec![Vec::new(); names.len()];
    }

    SimulationRecord::from_columns(path, names.into_iter().zip(columns).collect())
}

/// Value part of `KEYWORD = value`, case-insensitive on the keyword
fn keyword_value<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let (key, value) = line.split_once('=')?;
    if key.trim().eq_ignore_ascii_case(keyword) {
        Some(value)
    } else {
        None
    }
}

fn parse_variable_names(list: &str) -> Vec<String> {
    if list.contains('"') {
        list.split('"')
            .skip(1)
            .step_by(2)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    } else {
        list.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

fn is_special_float(line: &str) -> bool {
    let token = line.split_whitespace().next().unwrap_or("");
    matches!(
        token.to_ascii_lowercase().as_str(),
        "nan" | "inf" | "infinity"
    )
}

/// Accepts Fortran double-precision exponents (`1.0D-03`)
fn parse_number(token: &str) -> Option<f64> {
    token
        .parse::<f64>()
        .ok()
        .or_else(|| token.replace(['D', 'd'], "E").parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(text: &str) -> Result<SimulationRecord> {
        parse(Path::new("inline.dat"), text.as_bytes())
    }

    #[test]
    fn test_parse_quoted_header() {
        let text = "TITLE = \"transport\"\n\
                    VARIABLES = \"time\" \"x\" \"state\"\n\
                    ZONE I=2, J=2\n\
                    0.0 1.0 0.5\n\
                    0.1 1.0 0.4\n\
                    0.0 2.0 0.3\n\
                    0.1 2.0 0.2\n";
        let record = parse_str(text).unwrap();
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["time", "x", "state"]);
        assert_eq!(record.len(), 4);
        assert_eq!(record.field("state").unwrap().to_vec(), vec![0.5, 0.4, 0.3, 0.2]);
    }

    #[test]
    fn test_parse_bare_names_and_commas() {
        let text = "variables = iteration, residual\n1, 1.0e-1\n2, 5.0e-2\n";
        let record = parse_str(text).unwrap();
        assert_eq!(record.field("iteration").unwrap().to_vec(), vec![1.0, 2.0]);
        assert_eq!(record.field("residual").unwrap()[1], 5.0e-2);
    }

    #[test]
    fn test_parse_multiline_variables() {
        let text = "VARIABLES = \"time\"\n\"x\"\n\"state\" \"T\"\n0 1 2 3\n";
        let record = parse_str(text).unwrap();
        assert_eq!(record.names().count(), 4);
        assert_eq!(record.field("T").unwrap()[0], 3.0);
    }

    #[test]
    fn test_fortran_exponent() {
        let text = "VARIABLES = a b\n1.5D-03 2.0d+01\n";
        let record = parse_str(text).unwrap();
        assert!((record.field("a").unwrap()[0] - 1.5e-3).abs() < 1e-15);
        assert_eq!(record.field("b").unwrap()[0], 20.0);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let text = "# produced by solver\n\nVARIABLES = a\n\n1\n# mid\n2\n";
        assert_eq!(parse_str(text).unwrap().len(), 2);
    }

    #[test]
    fn test_nan_row_is_data() {
        let text = "VARIABLES = a b\nNaN 1.0\n";
        let record = parse_str(text).unwrap();
        assert!(record.field("a").unwrap()[0].is_nan());
    }

    #[test]
    fn test_header_only_gives_empty_record() {
        let record = parse_str("VARIABLES = time x state\n").unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_column_count_mismatch_reports_line() {
        let text = "VARIABLES = a b c\n1 2 3\n4 5\n";
        match parse_str(text).unwrap_err() {
            PostError::Parse { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("expected 3 columns, found 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_number_reports_token() {
        let err = parse_str("VARIABLES = a\n1.0.0\n").unwrap_err();
        assert!(err.to_string().contains("'1.0.0' is not a number"));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            parse_str("1 2 3\n"),
            Err(PostError::Parse { line: 1, .. })
        ));
        assert!(matches!(parse_str(""), Err(PostError::Parse { line: 0, .. })));
    }
}
