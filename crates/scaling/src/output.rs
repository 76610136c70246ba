use crate::error::{BenchError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one value per line, truncating any existing file.
pub fn write_table(path: &Path, values: &[f64]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut w = BufWriter::new(File::create(path)?);
    for &v in values {
        writeln!(w, "{}", format_value(v))?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_table(path: &Path) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path)?;
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .enumerate()
        .map(|(i, l)| {
            l.trim().parse::<f64>().map_err(|_| {
                BenchError::Parse(format!(
                    "{}: line {} is not a number: {:?}",
                    path.display(),
                    i + 1,
                    l
                ))
            })
        })
        .collect()
}

/// `%.18e`, the layout NumPy's `savetxt` uses by default.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    let s = format!("{:.18e}", v);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => s,
    }
}
