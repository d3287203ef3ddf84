//! Line-oriented readers shared by the proc and cgroup file parsers.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::Path;

use crate::error::{LimitError, Result};

/// Feed every line of `reader` to `visit` until it breaks.
///
/// One buffer is reused for the whole scan and grows to fit the longest
/// line. The trailing newline is stripped before `visit` sees the line.
/// Returns `Ok(None)` when the input ends without a break.
pub(crate) fn scan_lines<R, T, F>(mut reader: R, mut visit: F) -> io::Result<Option<T>>
where
    R: BufRead,
    F: FnMut(&str) -> ControlFlow<Option<T>>,
{
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let record = line.strip_suffix('\n').unwrap_or(&line);
        if let ControlFlow::Break(found) = visit(record) {
            return Ok(found);
        }
    }
}

/// Open `path` and return its first line without the trailing newline.
///
/// The file handle is released before returning.
/// The path is only rendered to text for error messages.
pub(crate) fn read_first_line(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|error| LimitError::Io {
        path: path.display().to_string(),
        error,
    })?;

    let mut line = String::new();
    let read = BufReader::new(file)
        .read_line(&mut line)
        .map_err(|error| LimitError::Io {
            path: path.display().to_string(),
            error,
        })?;

    if read == 0 {
        return Err(LimitError::Empty {
            path: path.display().to_string(),
        });
    }

    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}
