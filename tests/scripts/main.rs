mod extract;
mod resolve;

use std::fs;
use std::path::Path;

use dbinit::error::Result;
use tempfile::TempDir;

/// Sets up a scratch scripts folder with the given files, creating parent folders as needed.
fn setup(files: &[(&str, &str)]) -> Result<TempDir> {
    let dir = tempfile::tempdir()?;
    for (name, content) in files {
        write(dir.path(), name, content)?;
    }
    Ok(dir)
}

fn write(root: &Path, name: &str, content: &str) -> Result<()> {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
