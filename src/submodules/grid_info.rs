use std::{path::Path, str::FromStr};

use ndarray::{Array1, Array2};

use super::{error::{PlotError, Result}, type_lib::NumericData};

/// Domain size and sampling resolution of a 2D run, as written to `grid_info.txt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridInfo {
    pub length_x: NumericData,
    pub length_y: NumericData,
    pub resolution_x: usize,
    pub resolution_y: usize,
}

impl GridInfo {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        GridInfo::parse(&content, path)
    }

    /// Line 1 holds the two domain lengths, line 2 the two resolutions.
    /// Each line must carry exactly two values.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut lines = content.lines();
        let (length_x, length_y) = parse_pair::<NumericData>(lines.next(), 1, path)?;
        let (resolution_x, resolution_y) = parse_pair::<usize>(lines.next(), 2, path)?;
        Ok(GridInfo {
            length_x,
            length_y,
            resolution_x,
            resolution_y,
        })
    }

    /// Evenly spaced coordinates over `[0, length_x]` and `[0, length_y]`.
    pub fn axes(&self) -> (Array1<NumericData>, Array1<NumericData>) {
        (
            linspace(0.0, self.length_x, self.resolution_x),
            linspace(0.0, self.length_y, self.resolution_y),
        )
    }

    /// Shape of the coordinate mesh, `(resolution_y, resolution_x)`.
    pub fn mesh_shape(&self) -> (usize, usize) {
        (self.resolution_y, self.resolution_x)
    }
}

fn parse_pair<T: FromStr>(line: Option<&str>, line_number: usize, path: &Path) -> Result<(T, T)>
where
    T::Err: std::fmt::Display,
{
    let parse_error = |message: String| PlotError::Parse {
        path: path.to_path_buf(),
        line: line_number,
        message,
    };
    let line = line.ok_or_else(|| parse_error("unexpected end of file".to_string()))?;
    let mut tokens = line.split_whitespace();
    let mut next = || -> Result<T> {
        let token = tokens
            .next()
            .ok_or_else(|| parse_error(format!("expected two values, got '{}'", line.trim())))?;
        token
            .parse::<T>()
            .map_err(|e| parse_error(format!("invalid value '{}': {}", token, e)))
    };
    let first = next()?;
    let second = next()?;
    if tokens.next().is_some() {
        return Err(parse_error(format!("expected two values, got '{}'", line.trim())));
    }
    Ok((first, second))
}

/// `n` evenly spaced samples from `start` to `stop`, both ends included.
pub fn linspace(start: NumericData, stop: NumericData, n: usize) -> Array1<NumericData> {
    let mut values = Array1::linspace(start, stop, n);
    // pin the endpoint against accumulated rounding
    if n > 1 {
        values[n - 1] = stop;
    }
    values
}

/// Coordinate matrices of shape `(y.len(), x.len())`.
pub fn meshgrid(x: &Array1<NumericData>, y: &Array1<NumericData>) -> (Array2<NumericData>, Array2<NumericData>) {
    let shape = (y.len(), x.len());
    let mesh_x = Array2::from_shape_fn(shape, |(_, i)| x[i]);
    let mesh_y = Array2::from_shape_fn(shape, |(j, _)| y[j]);
    (mesh_x, mesh_y)
}
