//! Module for locating artifact files inside an artifacts directory.

use {
    std::{
        io,
        path::{Path, PathBuf},
    },
    walkdir::WalkDir,
};

/// Directory Hardhat uses for build metadata. Never contains artifacts.
const BUILD_INFO_DIR: &str = "build-info";

/// Returns whether `name` can be used as a file stem. Names that would
/// escape the artifacts directory never resolve.
pub fn is_valid_contract_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

/// Path of an artifact stored directly at the root of the artifacts
/// directory (`<root>/<name>.json`).
pub fn flat_artifact_file(root: &Path, name: &str) -> PathBuf {
    root.join(format!("{name}.json"))
}

/// Finds all `<name>.json` files below `root`, which is where Hardhat
/// puts them (`contracts/<Source>.sol/<name>.json`). Symlinked directories
/// are followed.
pub fn find_artifact_files(root: &Path, name: &str) -> io::Result<Vec<PathBuf>> {
    let file_name = format!("{name}.json");
    let mut found = Vec::new();
    let entries = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != BUILD_INFO_DIR);
    for entry in entries {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == file_name.as_str() {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}
