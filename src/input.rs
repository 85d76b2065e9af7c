//! Loading the planning document from disk

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::InputError;
use crate::outline::line::BOM;

const STAGED_SUFFIX: &str = ".tmp";

/// `<path>.tmp`, the staged copy of a planning document
pub fn staged_path(path: &Path) -> PathBuf {
    let mut staged = OsString::from(path.as_os_str());
    staged.push(STAGED_SUFFIX);
    PathBuf::from(staged)
}

/// Read the planning document as lines.
///
/// With staging on, an existing document is first moved to `<path>.tmp` so a
/// fresh download can land at the original name. Whenever the document is
/// missing, a previously staged copy is read instead.
pub fn load_lines(path: &Path, stage: bool) -> Result<Vec<String>, InputError> {
    let staged = staged_path(path);

    let source = if path.exists() {
        if stage {
            fs::rename(path, &staged).map_err(|e| InputError::Stage {
                path: path.to_path_buf(),
                source: e,
            })?;
            info!("Staged {} as {}", path.display(), staged.display());
            staged
        } else {
            path.to_path_buf()
        }
    } else if staged.exists() {
        debug!("{} missing, reading staged copy", path.display());
        staged
    } else {
        return Err(InputError::NotFound(path.to_path_buf()));
    };

    let bytes = fs::read(&source).map_err(|e| InputError::Read {
        path: source.clone(),
        source: e,
    })?;
    let content = String::from_utf8_lossy(&bytes);
    let content = content.strip_prefix(BOM).unwrap_or(&content);

    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    debug!("Read {} lines from {}", lines.len(), source.display());
    Ok(lines)
}
