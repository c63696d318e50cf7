//! Vault discovery and vault-wide file resolution.
use std::path::{Path, PathBuf};

use log::trace;
use walkdir::WalkDir;

use crate::error::ConvertError;

/// Directory that marks the root of an Obsidian vault.
pub const VAULT_MARKER: &str = ".obsidian";

/// Locates the vault root for `path` by walking its ancestors until one
/// contains a `.obsidian` directory.
///
/// # Errors
///
/// Returns [`ConvertError::VaultRootNotFound`] if the filesystem root is
/// reached without finding the marker.
pub fn find_vault_root(path: &Path) -> Result<PathBuf, ConvertError> {
  for dir in path.ancestors() {
    if dir.join(VAULT_MARKER).is_dir() {
      trace!("Vault root: {}", dir.display());
      return Ok(dir.to_path_buf());
    }
  }

  Err(ConvertError::VaultRootNotFound {
    start: path.to_path_buf(),
  })
}

/// Searches `root` and all of its subdirectories for a file whose name
/// matches `file_name` exactly.
///
/// Entries are visited in lexicographically sorted order, so when two files
/// share a name the lookup always resolves to the same one.
///
/// # Errors
///
/// Returns [`ConvertError::FileNotFound`] if no match exists anywhere under
/// `root`.
pub fn find_file(
  root: &Path,
  file_name: &str,
) -> Result<PathBuf, ConvertError> {
  for entry in WalkDir::new(root)
    .follow_links(true)
    .sort_by_file_name()
    .into_iter()
    .filter_map(Result::ok)
  {
    let path = entry.path();
    if path.is_file() && entry.file_name().to_str() == Some(file_name) {
      trace!("Resolved `{file_name}` to {}", path.display());
      return Ok(path.to_owned());
    }
  }

  Err(ConvertError::FileNotFound {
    name: file_name.to_string(),
    root: root.to_path_buf(),
  })
}
