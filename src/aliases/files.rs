//! Reading and updating the alias file and the shell rc file.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::alias::{Alias, ExistingAliases};

/// Errors that can occur while touching alias or rc files.
#[derive(Debug, Error)]
pub enum AliasFileError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AliasFileError {
    fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Load the aliases already defined in `path`. `Ok(None)` if the file does
/// not exist.
pub fn read_existing(path: &Path) -> Result<Option<ExistingAliases>, AliasFileError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(ExistingAliases::parse(&content))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AliasFileError::read(path, e)),
    }
}

/// Append aliases to `path`, one per line, creating the file if needed.
pub fn append_aliases(path: &Path, aliases: &[Alias]) -> Result<(), AliasFileError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AliasFileError::write(path, e))?;
    for alias in aliases {
        write!(file, "\n{}", alias).map_err(|e| AliasFileError::write(path, e))?;
    }
    file.flush().map_err(|e| AliasFileError::write(path, e))
}

/// The rc line that sources `aliases`, using `~/` for paths under `home`.
pub fn source_line(aliases: &Path, home: Option<&Path>) -> String {
    match home.and_then(|h| aliases.strip_prefix(h).ok()) {
        Some(relative) => format!("source ~/{}", relative.display()),
        None => format!("source {}", aliases.display()),
    }
}

/// Make sure the rc file at `path` contains `line`, appending it if absent.
///
/// Returns whether the file was changed. The rc file must already exist.
pub fn ensure_sourced(path: &Path, line: &str) -> Result<bool, AliasFileError> {
    let content = fs::read_to_string(path).map_err(|e| AliasFileError::read(path, e))?;
    if content.contains(line) {
        return Ok(false);
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| AliasFileError::write(path, e))?;
    write!(file, "\n# Source aliases\n{}\n", line).map_err(|e| AliasFileError::write(path, e))?;
    Ok(true)
}
