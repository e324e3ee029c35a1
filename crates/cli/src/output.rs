//! Tabular and file output for run and sweep results.

use crate::error::CliError;
use amop_vicsek::SweepResult;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Formats an order-parameter time series as CSV with a `t,phi` header.
pub fn series_csv(times: &[f64], phi: &[f64]) -> String {
    let mut out = String::from("t,phi\n");
    for (t, p) in times.iter().zip(phi) {
        let _ = writeln!(out, "{t},{p}");
    }
    out
}

/// Formats a sweep result as CSV with an `eta,phi_mean,phi_std` header.
pub fn sweep_csv(result: &SweepResult) -> String {
    let mut out = String::from("eta,phi_mean,phi_std\n");
    for (eta, mean, std) in result.rows() {
        let _ = writeln!(out, "{eta},{mean},{std}");
    }
    out
}

/// Writes `contents` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::Io(format!("{}: {e}", parent.display())))?;
    }
    fs::write(path, contents).map_err(|e| CliError::Io(format!("{}: {e}", path.display())))
}
