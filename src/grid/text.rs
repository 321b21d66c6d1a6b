//! Plain text grid files.
//! One row per line, values separated by whitespace.

use super::*;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

/// Decimal places written per value.
pub const WRITE_PRECISION: usize = 6;

pub fn load_grid<P: AsRef<Path>>(path: &P, size: usize) -> Result<Grid> {
    let path = path.as_ref();
    let file =
        std::fs::File::open(path).map_err(|e| RelaxError::io(path, e))?;
    let grid = read_grid(std::io::BufReader::new(file), size, path)?;
    tracing::info!(path = %path.display(), size, "loaded grid");
    Ok(grid)
}

/// Parse `size` rows of `size` values.
/// `path` is only used to label errors.
pub fn read_grid<R: BufRead>(
    reader: R,
    size: usize,
    path: &Path,
) -> Result<Grid> {
    let parse_error = |line: usize, column: usize, message: String| {
        RelaxError::Parse {
            path: path.to_path_buf(),
            line,
            column,
            message,
        }
    };

    check_size(size)?;
    let mut values = Vec::with_capacity(buffer_size(size));
    let mut rows = 0;
    for (line_index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| RelaxError::io(path, e))?;
        let line_number = line_index + 1;
        if line.trim().is_empty() {
            continue;
        }
        if rows == size {
            return Err(parse_error(
                line_number,
                1,
                format!("expected {size} rows, found more"),
            ));
        }

        let mut columns = 0;
        for (column_index, token) in line.split_whitespace().enumerate() {
            let value: f64 = token.parse().map_err(|_| {
                parse_error(
                    line_number,
                    column_index + 1,
                    format!("cannot parse '{token}' as a number"),
                )
            })?;
            values.push(value);
            columns += 1;
        }
        if columns != size {
            return Err(parse_error(
                line_number,
                columns.min(size) + 1,
                format!("expected {size} values, found {columns}"),
            ));
        }
        rows += 1;
    }

    if rows != size {
        return Err(parse_error(
            rows + 1,
            1,
            format!("expected {size} rows, found {rows}"),
        ));
    }
    Grid::from_values(size, values)
}

/// Serialize rows of space separated values.
pub fn format_grid<W: Write, G: GridView>(
    output: &mut W,
    grid: &G,
) -> std::io::Result<()> {
    let size = grid.size();
    for row in 0..size {
        for column in 0..size {
            if column > 0 {
                write!(output, " ")?;
            }
            let v = grid.value_linear(row * size + column);
            write!(output, "{:.*}", WRITE_PRECISION, v)?;
        }
        writeln!(output)?;
    }
    Ok(())
}

/// Write through a temporary sibling and rename,
/// so a failed write never leaves a partial grid at `path`.
pub fn write_grid<P: AsRef<Path>, G: GridView>(
    path: &P,
    grid: &G,
) -> Result<()> {
    let path = path.as_ref();
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let write_tmp = || -> std::io::Result<()> {
        let mut output =
            std::io::BufWriter::new(std::fs::File::create(&tmp_path)?);
        format_grid(&mut output, grid)?;
        output.flush()
    };
    if let Err(e) = write_tmp() {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(RelaxError::io(path, e));
    }
    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        RelaxError::io(path, e)
    })?;

    tracing::info!(path = %path.display(), "wrote grid");
    Ok(())
}
