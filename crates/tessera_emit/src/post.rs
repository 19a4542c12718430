//! Post-processing of finished index and result files.
//!
//! Large result sets are often consumed only partially, so these helpers
//! remove ordering bias: [`shuffle_lines`] reorders a file in place and
//! [`pick_lines`] copies a random subset of its lines.

use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EmitError;

fn read_lines(path: &Path) -> Result<Vec<String>, EmitError> {
    let content = fs::read_to_string(path).map_err(|e| EmitError::io(path, e))?;
    Ok(content.lines().map(str::to_string).collect())
}

fn write_lines(path: &Path, lines: &[impl AsRef<str>]) -> Result<(), EmitError> {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    fs::write(path, out).map_err(|e| EmitError::io(path, e))
}

/// Rewrites `path` with its lines in random order. Returns the line count.
pub fn shuffle_lines(path: &Path, rng: &mut impl Rng) -> Result<usize, EmitError> {
    let mut lines = read_lines(path)?;
    lines.shuffle(rng);
    write_lines(path, &lines)?;
    tracing::debug!(lines = lines.len(), "shuffled {}", path.display());
    Ok(lines.len())
}

/// Copies `count` distinct random lines of `input` to `output`.
///
/// Fails with [`EmitError::NotEnoughLines`] if `input` is shorter than `count`.
pub fn pick_lines(
    input: &Path,
    output: &Path,
    count: usize,
    rng: &mut impl Rng,
) -> Result<(), EmitError> {
    let lines = read_lines(input)?;
    if count > lines.len() {
        return Err(EmitError::NotEnoughLines {
            requested: count,
            available: lines.len(),
        });
    }
    let picked: Vec<&String> = lines.choose_multiple(rng, count).collect();
    write_lines(output, &picked)?;
    tracing::info!(
        "{count} random lines copied from {} to {}",
        input.display(),
        output.display()
    );
    Ok(())
}
