//! Out-of-process LaTeX compilation and artifact placement.
use std::{
  fs,
  path::{Path, PathBuf},
  process::Command,
};

use color_eyre::eyre::{Context, Result, bail};
use log::{info, warn};

use crate::config::Config;

/// Run the LaTeX compiler over the rendered wrapper: the configured number
/// of draft passes to settle cross-references, then one final pass.
///
/// Draft-pass failures are logged but not fatal (unresolved references are
/// expected there); the final pass must succeed. Returns the path of the
/// produced PDF.
///
/// # Errors
///
/// Fails when the compiler cannot be spawned (e.g. not installed) or the
/// final pass exits with a non-zero status.
pub fn compile(config: &Config, wrapper_path: &Path) -> Result<PathBuf> {
  let build_dir = wrapper_path.parent().unwrap_or_else(|| Path::new("."));

  for pass in 1..=config.draft_passes {
    info!("Draft pass {pass}/{}", config.draft_passes);
    let status = latex_command(config, wrapper_path, true)
      .current_dir(build_dir)
      .status()
      .wrap_err_with(|| format!("Failed to run `{}`", config.latex_bin))?;

    if !status.success() {
      warn!("Draft pass {pass} exited with {status}");
    }
  }

  info!("Final pass");
  let status = latex_command(config, wrapper_path, false)
    .current_dir(build_dir)
    .status()
    .wrap_err_with(|| format!("Failed to run `{}`", config.latex_bin))?;

  if !status.success() {
    bail!(
      "`{}` failed with {status} while compiling {}",
      config.latex_bin,
      wrapper_path.display()
    );
  }

  Ok(wrapper_path.with_extension("pdf"))
}

fn latex_command(
  config: &Config,
  wrapper_path: &Path,
  draft: bool,
) -> Command {
  let mut command = Command::new(&config.latex_bin);
  command.arg(wrapper_path).arg("-interaction=nonstopmode");

  if config.shell_escape {
    command.arg("-shell-escape");
  }
  if draft {
    command.arg("-draftmode");
  }

  command
}

/// Copy the rendered PDF into the output directory, named after the input
/// note, and return the destination path.
pub fn copy_artifact(
  config: &Config,
  input: &Path,
  pdf: &Path,
) -> Result<PathBuf> {
  fs::create_dir_all(&config.output_dir).wrap_err_with(|| {
    format!(
      "Failed to create output directory: {}",
      config.output_dir.display()
    )
  })?;

  let file_name = input
    .file_name()
    .map_or_else(|| PathBuf::from("document"), PathBuf::from)
    .with_extension("pdf");
  let out_pdf = config.output_dir.join(file_name);

  let options = fs_extra::file::CopyOptions::new().overwrite(true);
  fs_extra::file::copy(pdf, &out_pdf, &options).wrap_err_with(|| {
    format!(
      "Failed to copy {} to {}",
      pdf.display(),
      out_pdf.display()
    )
  })?;

  Ok(out_pdf)
}
