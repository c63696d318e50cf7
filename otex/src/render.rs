//! LaTeX wrapper rendering and build-directory population.
use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result};
use log::debug;
use otex_obsidian::escape::tex_escape;

use crate::config::Config;

/// Default LaTeX wrapper shipped with otex.
const DEFAULT_TEMPLATE: &str = include_str!("../templates/document.tex");

/// Placeholder in the wrapper template replaced by the document title.
pub const TITLE_PLACEHOLDER: &str = "TheTitleOfTheDocument";

/// File name of the converted body inside the build directory. The wrapper
/// template `\input`s it by this name.
pub const BODY_FILE: &str = "body.tex";

/// File name of the rendered wrapper inside the build directory.
pub const WRAPPER_FILE: &str = "document.tex";

/// Render the LaTeX wrapper for `title`, from the configured template or
/// the embedded default.
///
/// The title is escaped before substitution; a first heading like
/// `my_notes` would otherwise break the compile.
pub fn render_wrapper(config: &Config, title: &str) -> Result<String> {
  let template = match &config.template_path {
    Some(path) => {
      debug!("Using wrapper template {}", path.display());
      fs::read_to_string(path).wrap_err_with(|| {
        format!("Failed to read wrapper template: {}", path.display())
      })?
    },
    None => DEFAULT_TEMPLATE.to_string(),
  };

  Ok(template.replace(TITLE_PLACEHOLDER, &tex_escape(title)))
}

/// Write the converted body and the rendered wrapper into the build
/// directory, returning the wrapper path for the compiler.
pub fn write_build_files(
  build_dir: &Path,
  body: &str,
  wrapper: &str,
) -> Result<PathBuf> {
  fs::create_dir_all(build_dir).wrap_err_with(|| {
    format!("Failed to create build directory: {}", build_dir.display())
  })?;

  let body_path = build_dir.join(BODY_FILE);
  fs::write(&body_path, body).wrap_err_with(|| {
    format!("Failed to write LaTeX body: {}", body_path.display())
  })?;

  let wrapper_path = build_dir.join(WRAPPER_FILE);
  fs::write(&wrapper_path, wrapper).wrap_err_with(|| {
    format!("Failed to write wrapper: {}", wrapper_path.display())
  })?;

  Ok(wrapper_path)
}
