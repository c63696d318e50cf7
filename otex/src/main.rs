use std::{
  fs,
  io::Write as _,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};

mod cli;
mod compile;
mod config;
mod render;

use cli::{Cli, Commands};
use config::Config;
use otex_obsidian::{ConvertResult, Converter, vault};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      // Check if file already exists and that we're not forcing overwrite
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      // Create parent directories if needed
      if let Some(parent) = output.parent() {
        if !parent.exists() {
          fs::create_dir_all(parent).wrap_err_with(|| {
            format!("Failed to create directory: {}", parent.display())
          })?;
          info!("Created directory: {}", parent.display());
        }
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!(
          "Failed to generate configuration file: {}",
          output.display()
        )
      })?;

      info!("Configuration file created. Edit it to customize rendering.");
      Ok(())
    },

    Commands::Tex { file, output } => {
      let config = Config::load(&cli)?;
      let (result, _input) = convert_note(&config, file)?;

      match output {
        Some(path) => {
          fs::write(path, &result.body).wrap_err_with(|| {
            format!("Failed to write LaTeX body: {}", path.display())
          })?;
          info!("Wrote LaTeX body to {}", path.display());
        },
        None => {
          std::io::stdout()
            .write_all(result.body.as_bytes())
            .wrap_err("Failed to write LaTeX body to stdout")?;
        },
      }

      Ok(())
    },

    Commands::Pdf { file, .. } => {
      let config = Config::load(&cli)?;
      generate_pdf(&config, file)
    },
  }
}

/// Resolve the note against its vault and convert it to a LaTeX body.
fn convert_note(
  config: &Config,
  file: &Path,
) -> Result<(ConvertResult, PathBuf)> {
  let input = file.canonicalize().wrap_err_with(|| {
    format!("Failed to resolve input file: {}", file.display())
  })?;

  let vault_root = vault::find_vault_root(&input)?;
  info!("Vault root: {}", vault_root.display());

  let content = fs::read_to_string(&input).wrap_err_with(|| {
    format!("Failed to read markdown file: {}", input.display())
  })?;

  let converter = Converter::new(vault_root, config.convert_options());
  let result = converter.convert(&content)?;
  info!(
    "Converted {} ({} embedded files)",
    input.display(),
    result.included_files.len()
  );

  Ok((result, input))
}

/// Full rendering pipeline: convert the note, render the wrapper, compile,
/// and place the PDF in the output directory.
fn generate_pdf(config: &Config, file: &Path) -> Result<()> {
  let (result, input) = convert_note(config, file)?;

  // Fall back to the file stem when the note does not open with a heading
  let title = result.title.clone().unwrap_or_else(|| {
    input
      .file_stem()
      .unwrap_or_default()
      .to_string_lossy()
      .to_string()
  });

  let build_dir = config.build_dir_for(&input);
  let wrapper = render::render_wrapper(config, &title)?;
  let wrapper_path =
    render::write_build_files(&build_dir, &result.body, &wrapper)?;

  let pdf = compile::compile(config, &wrapper_path)?;
  let out_pdf = compile::copy_artifact(config, &input, &pdf)?;
  info!("Rendered {}", out_pdf.display());

  if !config.keep_build {
    fs::remove_dir_all(&build_dir).wrap_err_with(|| {
      format!(
        "Failed to remove build directory: {}",
        build_dir.display()
      )
    })?;
  }

  Ok(())
}
