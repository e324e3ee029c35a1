//! Parsing of noise-amplitude ranges.
//!
//! Two forms are accepted:
//! - `start:stop:step`: the grid `start + i * step`, including `stop` when it
//!   falls on the grid within rounding.
//! - `a,b,c`: an explicit list, kept in the given order.

use crate::error::AmopError;

/// Largest number of points a grid may expand to.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Parses `start:stop:step` or a comma-separated list into amplitudes.
///
/// The grid form has `floor((stop - start) / step + 0.5) + 1` points, at most
/// [`MAX_GRID_POINTS`].
pub fn parse_range(s: &str) -> Result<Vec<f64>, AmopError> {
    let s = s.trim();
    if s.contains(':') {
        parse_grid(s)
    } else {
        parse_list(s)
    }
}

fn parse_grid(s: &str) -> Result<Vec<f64>, AmopError> {
    let parts: Vec<&str> = s.split(':').collect();
    let [start, stop, step] = parts.as_slice() else {
        return Err(AmopError::InvalidRange(format!(
            "expected start:stop:step, got '{s}'"
        )));
    };
    let (start, stop, step) = (parse_number(start)?, parse_number(stop)?, parse_number(step)?);
    if step == 0.0 {
        return Err(AmopError::InvalidRange("step must be non-zero".into()));
    }
    let span = ((stop - start) / step + 0.5).floor();
    if span < 0.0 {
        return Err(AmopError::InvalidRange(format!(
            "step {step} never reaches {stop} from {start}"
        )));
    }
    if !span.is_finite() || span >= MAX_GRID_POINTS as f64 {
        return Err(AmopError::InvalidRange(format!(
            "'{s}' expands to more than {MAX_GRID_POINTS} points"
        )));
    }
    let count = span as usize + 1;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

fn parse_list(s: &str) -> Result<Vec<f64>, AmopError> {
    if s.is_empty() {
        return Err(AmopError::InvalidRange("empty amplitude list".into()));
    }
    s.split(',').map(parse_number).collect()
}

fn parse_number(raw: &str) -> Result<f64, AmopError> {
    let raw = raw.trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| AmopError::InvalidRange(format!("'{raw}' is not a number")))?;
    if !value.is_finite() {
        return Err(AmopError::InvalidRange(format!("'{raw}' is not finite")));
    }
    Ok(value)
}
