use std::fs;

use crate::error::{MshError, MshResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub name: String,
    pub is_dir: bool,
}

impl LocalEntry {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// List `path`, sorted by name. Symlinks are classified by their target;
/// a dangling link counts as a file.
pub fn local_readdir(path: &str) -> MshResult<Vec<LocalEntry>> {
    let mut entries = fs::read_dir(path)
        .map_err(|e| MshError::from_io(path, e))?
        .map(|entry| {
            let entry = entry.map_err(|e| MshError::from_io(path, e))?;
            let is_dir = fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
            Ok(LocalEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            })
        })
        .collect::<MshResult<Vec<_>>>()?;

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

pub fn local_read_to_string(path: &str) -> MshResult<String> {
    fs::read_to_string(path).map_err(|e| MshError::from_io(path, e))
}

/// Create `path` if it is missing. An existing file keeps its content.
pub fn local_touch(path: &str) -> MshResult<()> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|e| MshError::from_io(path, e))
}

/// Remove the directory entry `path`. A symlink is unlinked even when it
/// points to a directory; a real directory is refused.
pub fn local_remove_file(path: &str) -> MshResult<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| MshError::from_io(path, e))?;
    if metadata.is_dir() {
        return Err(MshError::IsADirectory(path.to_string()));
    }
    fs::remove_file(path).map_err(|e| MshError::from_io(path, e))
}
