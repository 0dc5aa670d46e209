//! Output file naming.
//!
//! Default outputs land in the current directory under the input's base
//! name: `report.pdf` encrypts to `report.pdf.enc`, which decrypts back to
//! `report.pdf`.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Extension appended to encrypted files.
pub const ENC_EXTENSION: &str = ".enc";

fn base_name(input: &Path) -> Result<String> {
    match input.file_name() {
        Some(name) => Ok(name.to_string_lossy().into_owned()),
        None => bail!("Input path has no file name: {}", input.display()),
    }
}

/// Default output for `encrypt`: base name plus `.enc`, never doubled.
pub fn sealed_name(input: &Path) -> Result<PathBuf> {
    let base = base_name(input)?;
    if base.ends_with(ENC_EXTENSION) {
        Ok(PathBuf::from(base))
    } else {
        Ok(PathBuf::from(base + ENC_EXTENSION))
    }
}

/// Default output for `decrypt`: base name with a trailing `.enc` removed.
pub fn opened_name(input: &Path) -> Result<PathBuf> {
    let base = base_name(input)?;
    let stem = base.strip_suffix(ENC_EXTENSION).unwrap_or(base.as_str());
    if stem.is_empty() {
        bail!(
            "Cannot derive an output name from {}; pass --output",
            input.display()
        );
    }
    Ok(PathBuf::from(stem))
}

/// Default output for `decrypt` when `--output` is not given.
///
/// Unlike an explicit `--output`, a derived name is never allowed to
/// replace an existing file. An input without the `.enc` suffix keeps its
/// own base name, so this also logs a warning.
pub fn default_opened_output(input: &Path) -> Result<PathBuf> {
    let output = opened_name(input)?;
    if !base_name(input)?.ends_with(ENC_EXTENSION) {
        warn!(
            input = %input.display(),
            output = %output.display(),
            "Input has no {} suffix; output keeps the same name",
            ENC_EXTENSION
        );
    }
    if output.exists() {
        bail!(
            "Default output {} already exists; pass --output to choose a destination",
            output.display()
        );
    }
    Ok(output)
}

/// Refuse to write the result over the file being read.
pub fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    let same = match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };
    if same {
        bail!(
            "Output would overwrite the input file {}; pass --output",
            input.display()
        );
    }
    Ok(())
}
