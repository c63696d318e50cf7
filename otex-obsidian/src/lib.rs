//! # otex-obsidian — Obsidian markdown to LaTeX
//!
//! A line-oriented processor that turns Obsidian-flavored markdown into a
//! LaTeX document body: headings become sectioning commands, `![[...]]`
//! embeds are resolved against the vault and expanded (documents are
//! transcluded recursively with their headings shifted down; images become
//! `\includegraphics` commands with computed dimensions), and all other
//! lines pass through with LaTeX-reserved characters escaped.
//!
//! ## Quick Start
//!
//! ```rust
//! use otex_obsidian::{ConvertOptions, Converter};
//!
//! let converter = Converter::new("/path/to/vault", ConvertOptions::default());
//! let result = converter
//!   .convert("# User Guide\nIntro text.\n## Getting Started\nInstall it.")
//!   .expect("conversion failed");
//!
//! assert_eq!(result.title.as_deref(), Some("User Guide"));
//! assert_eq!(
//!   result.body,
//!   "\nIntro text.\n\\section{Getting Started}\nInstall it.\n"
//! );
//! ```
//!
//! ## Vault resolution
//!
//! Embed references are bare names (`![[Other Note]]`) or file names
//! (`![[figure.png|500]]`); both are located by exhaustive search of the
//! vault, the ancestor directory containing `.obsidian` (see [`vault`]).
//! Every lookup must resolve somewhere under that root or conversion fails
//! with [`ConvertError::FileNotFound`].

pub mod error;
pub mod escape;
pub mod processor;
pub mod types;
pub mod utils;
pub mod vault;

pub use crate::{
  error::ConvertError,
  processor::Converter,
  types::{
    ConvertOptions,
    ConvertOptionsBuilder,
    ConvertResult,
    ModifierStyle,
  },
};
