use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for otex
#[derive(Parser, Debug)]
#[command(author, version, about = "otex: Obsidian notes to LaTeX and PDF")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON). When omitted, an
  /// `otex.toml` in the current directory is used if present.
  #[arg(short = 'c', long = "config-file", global = true)]
  pub config_file: Option<PathBuf>,
}

/// All supported subcommands for the otex CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new otex configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "otex.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Convert a note to a LaTeX body without compiling it.
  Tex {
    /// Path to the markdown note to convert. The note must live inside an
    /// Obsidian vault (an ancestor directory containing `.obsidian`).
    file: PathBuf,

    /// Output file for the LaTeX body. Written to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Convert a note and compile it to a PDF.
  Pdf {
    /// Path to the markdown note to convert. The note must live inside an
    /// Obsidian vault (an ancestor directory containing `.obsidian`).
    file: PathBuf,

    /// Output directory for the rendered PDF.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Build directory for intermediate artifacts. Defaults to a `temp`
    /// directory next to the input file.
    #[arg(short, long)]
    build_dir: Option<PathBuf>,

    /// Path to a custom LaTeX wrapper template.
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// LaTeX compiler binary to invoke.
    #[arg(long)]
    latex_bin: Option<String>,

    /// Keep the build directory after a successful run.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    keep_build: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
