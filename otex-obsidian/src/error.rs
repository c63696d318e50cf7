use std::{io, path::PathBuf};

use thiserror::Error;

/// Top-level error type for the otex-obsidian crate.
///
/// Every variant is fatal for the conversion that raised it: the converter
/// produces no partial output, and the message carries the offending
/// reference or path so the user can fix the document.
#[derive(Debug, Error)]
pub enum ConvertError {
  #[error("unable to locate a `.obsidian` folder above `{}`", .start.display())]
  VaultRootNotFound { start: PathBuf },

  #[error("unable to locate `{name}` under `{}`", .root.display())]
  FileNotFound { name: String, root: PathBuf },

  #[error("malformed embed line: `{line}`")]
  MalformedEmbed { line: String },

  #[error("cyclic embed: `{name}` is already being transcluded")]
  CyclicEmbed { name: String },

  #[error("embed nesting exceeded the maximum depth of {limit}")]
  MaxDepthExceeded { limit: usize },

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),
}
