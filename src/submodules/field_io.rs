use std::path::Path;

use ndarray::Array2;

use super::{error::{PlotError, Result}, type_lib::{Field, NumericData}};

/// Reads a whitespace-delimited numeric table, one row per non-blank line.
/// Text following `#` on a line is ignored.
pub fn load_field(path: &Path) -> Result<Field> {
    let content = std::fs::read_to_string(path).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_field(&content, path)
}

pub fn parse_field(content: &str, path: &Path) -> Result<Field> {
    let mut values: Vec<NumericData> = Vec::new();
    let mut columns: Option<usize> = None;
    let mut rows = 0;

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.split('#').next().unwrap_or("");
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let before = values.len();
        for token in line.split_whitespace() {
            let value = token.parse::<NumericData>().map_err(|e| PlotError::Parse {
                path: path.to_path_buf(),
                line: line_number,
                message: format!("invalid value '{}': {}", token, e),
            })?;
            values.push(value);
        }
        let found = values.len() - before;
        match columns {
            None => columns = Some(found),
            Some(expected) if expected != found => {
                return Err(PlotError::RaggedRow {
                    path: path.to_path_buf(),
                    line: line_number,
                    expected,
                    found,
                })
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let columns = columns.ok_or_else(|| PlotError::EmptyField { path: path.to_path_buf() })?;
    Array2::from_shape_vec((rows, columns), values).map_err(|e| PlotError::Parse {
        path: path.to_path_buf(),
        line: 0,
        message: e.to_string(),
    })
}
