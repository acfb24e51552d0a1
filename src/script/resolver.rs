use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::manifest::{self, ChangeLog};
use crate::error::{Error, Result};

/// Resolves the ordered list of script files to run from a scripts folder.
///
/// If the folder holds a manifest (the first one by name, if several), its includes are returned
/// in document order, joined onto the folder, and nothing else in the folder is looked at.
/// Otherwise entries are visited in byte-wise name order, recursing depth-first into
/// subdirectories, which apply the same rule. Included files are not checked for existence.
pub fn resolve<P: AsRef<Path>>(folder: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    resolve_into(folder.as_ref(), &mut files)?;
    Ok(files)
}

fn resolve_into(folder: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = read_sorted(folder)?;

    if let Some(entry) = entries.iter().find(|entry| manifest::is_manifest(Path::new(&entry.file_name()))) {
        let path = entry.path();
        info!("Using manifest {}", path.display());
        let changelog = ChangeLog::load(&path)?;
        files.extend(changelog.files().map(|file| folder.join(file)));
        return Ok(());
    }

    debug!("Walking {} ({} entries)", folder.display(), entries.len());
    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|err| Error::IO(format!("Failed to stat {}: {}", path.display(), err)))?;
        if file_type.is_dir() {
            resolve_into(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

/// Lists a folder's entries sorted by name.
fn read_sorted(folder: &Path) -> Result<Vec<DirEntry>> {
    let io_error = |err: std::io::Error| Error::IO(format!("Failed to read {}: {}", folder.display(), err));
    let mut entries = fs::read_dir(folder)
        .map_err(io_error)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_error)?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}
