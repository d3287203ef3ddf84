//! Single-value readers for cgroup control files.

use std::path::Path;

use tracing::trace;

use super::lines::read_first_line;
use crate::error::{LimitError, Result};

const KIB: u64 = 1024;

/// Why a number could not be taken from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberError {
    NoDigits,
    BadSuffix,
    Overflow,
}

impl NumberError {
    fn into_limit_error(self, path: &str) -> LimitError {
        match self {
            NumberError::NoDigits => LimitError::Parse {
                path: path.to_string(),
                message: "no digits".to_string(),
            },
            NumberError::BadSuffix => LimitError::Parse {
                path: path.to_string(),
                message: "unexpected character after digits".to_string(),
            },
            NumberError::Overflow => LimitError::Overflow {
                path: path.to_string(),
            },
        }
    }
}

/// Length of the leading run of ASCII digits.
fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Parse a byte count with an optional `k`, `m` or `g` suffix (either case).
///
/// The multiplier is built one 1024 step at a time: `g` takes the `m`
/// step and the `k` step too, `m` takes the `k` step. Anything after the
/// suffix character is ignored. Any other letter or digit right after the
/// number (`0x10`, `1e6`) is rejected rather than read as a short prefix.
fn parse_byte_count(line: &str) -> std::result::Result<u64, NumberError> {
    let s = line.trim_start();
    let end = digit_run(s);
    if end == 0 {
        return Err(NumberError::NoDigits);
    }

    let num: u64 = s[..end].parse().map_err(|_| NumberError::Overflow)?;

    let steps = match s[end..].chars().next() {
        Some('g' | 'G') => 3,
        Some('m' | 'M') => 2,
        Some('k' | 'K') => 1,
        Some(c) if c.is_alphanumeric() => return Err(NumberError::BadSuffix),
        _ => 0,
    };
    let multiplier = (0..steps).fold(1u64, |m, _| m * KIB);

    num.checked_mul(multiplier).ok_or(NumberError::Overflow)
}

/// Parse an optionally signed base-10 integer at the start of `line`.
fn parse_signed(line: &str) -> std::result::Result<i64, NumberError> {
    let s = line.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = digit_run(&s[sign_len..]);
    if digits == 0 {
        return Err(NumberError::NoDigits);
    }

    s[..sign_len + digits]
        .parse()
        .map_err(|_| NumberError::Overflow)
}

/// Read a byte count from the first line of `path`.
pub fn read_byte_count(path: &str) -> Result<u64> {
    let line = read_first_line(Path::new(path))?;
    let value = parse_byte_count(&line).map_err(|e| e.into_limit_error(path))?;
    trace!("{}: {} bytes", path, value);
    Ok(value)
}

/// Read a signed integer from the first line of `path`.
pub fn read_signed(path: &str) -> Result<i64> {
    let line = read_first_line(Path::new(path))?;
    let value = parse_signed(&line).map_err(|e| e.into_limit_error(path))?;
    trace!("{}: {}", path, value);
    Ok(value)
}
