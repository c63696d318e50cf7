//! Types for the otex-obsidian public API.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Result of converting one Obsidian document to LaTeX.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConvertResult {
  /// Rendered LaTeX body.
  pub body: String,

  /// Title of the document, if found (text of a heading on the first line).
  pub title: Option<String>,

  /// Files pulled in while converting, in the order they were embedded
  /// (transcluded documents and images alike).
  pub included_files: Vec<PathBuf>,
}

/// How to treat an embed modifier that is not a recognized dimension
/// specifier (a non-numeric width, or an uppercase `X` separator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModifierStyle {
  /// Fall back to full-column-width sizing and log a warning.
  #[default]
  Lenient,
  /// Reject the embed line as malformed.
  Strict,
}

/// Options for configuring the converter.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
  /// Upper bound on transclusion nesting. Cycles are caught separately;
  /// this guards against degenerate-but-acyclic embed chains.
  pub max_embed_depth: usize,

  /// How to handle unparsable image dimension modifiers.
  pub modifier_style: ModifierStyle,
}

impl Default for ConvertOptions {
  fn default() -> Self {
    Self {
      max_embed_depth: 32,
      modifier_style:  ModifierStyle::Lenient,
    }
  }
}

/// Builder for constructing [`ConvertOptions`] with method chaining.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptionsBuilder {
  options: ConvertOptions,
}

impl ConvertOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the maximum transclusion nesting depth.
  #[must_use]
  pub const fn max_embed_depth(mut self, depth: usize) -> Self {
    self.options.max_embed_depth = depth;
    self
  }

  /// Set how to handle unparsable image dimension modifiers.
  #[must_use]
  pub const fn modifier_style(mut self, style: ModifierStyle) -> Self {
    self.options.modifier_style = style;
    self
  }

  /// Build the final [`ConvertOptions`].
  #[must_use]
  pub fn build(self) -> ConvertOptions {
    self.options
  }
}
