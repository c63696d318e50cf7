use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, eyre};
use otex_obsidian::{ConvertOptionsBuilder, ModifierStyle};
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Commands};

// Serde default values have to be functions, not literals; keeping them in
// one place makes the effective defaults easy to audit.
fn default_output_dir() -> PathBuf {
  PathBuf::from("output")
}

fn default_latex_bin() -> String {
  "pdflatex".to_string()
}

const fn default_draft_passes() -> usize {
  2
}

const fn default_max_embed_depth() -> usize {
  32
}

const fn default_true() -> bool {
  true
}

/// Configuration options for otex
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Output directory for rendered PDFs
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  /// Build directory for intermediate artifacts. When unset, a `temp`
  /// directory next to the input file is used.
  #[serde(default)]
  pub build_dir: Option<PathBuf>,

  /// Path to a custom LaTeX wrapper template
  #[serde(default)]
  pub template_path: Option<PathBuf>,

  /// LaTeX compiler binary to invoke
  #[serde(default = "default_latex_bin")]
  pub latex_bin: String,

  /// Number of draft passes run before the final compile, to settle
  /// cross-references
  #[serde(default = "default_draft_passes")]
  pub draft_passes: usize,

  /// Whether to pass `-shell-escape` to the compiler
  #[serde(default = "default_true")]
  pub shell_escape: bool,

  /// Maximum transclusion nesting depth
  #[serde(default = "default_max_embed_depth")]
  pub max_embed_depth: usize,

  /// Whether an unparsable image dimension modifier aborts the conversion
  /// instead of falling back to full-width sizing
  #[serde(default)]
  pub strict_dimensions: bool,

  /// Keep the build directory after a successful run
  #[serde(default)]
  pub keep_build: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      output_dir:        default_output_dir(),
      build_dir:         None,
      template_path:     None,
      latex_bin:         default_latex_bin(),
      draft_passes:      default_draft_passes(),
      shell_escape:      true,
      max_embed_depth:   default_max_embed_depth(),
      strict_dimensions: false,
      keep_build:        false,
    }
  }
}

/// Default configuration file contents written by `otex init`.
const DEFAULT_CONFIG_TOML: &str = r#"# otex configuration

# Output directory for rendered PDFs
output_dir = "output"

# LaTeX compiler binary and how it is invoked
latex_bin = "pdflatex"
draft_passes = 2
shell_escape = true

# Conversion behavior
max_embed_depth = 32
strict_dimensions = false

# Keep the build directory after a successful run
keep_build = false

# Uncomment to use a custom LaTeX wrapper template:
# template_path = "templates/document.tex"
"#;

const DEFAULT_CONFIG_JSON: &str = r#"{
  "output_dir": "output",
  "latex_bin": "pdflatex",
  "draft_passes": 2,
  "shell_escape": true,
  "max_embed_depth": 32,
  "strict_dimensions": false,
  "keep_build": false
}
"#;

impl Config {
  /// Create a new configuration from a file
  /// Only TOML and JSON are supported for the time being.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).with_context(|| {
      format!("Failed to read config file: {}", path.display())
    })?;

    path.extension().map_or_else(
      || {
        Err(eyre!(
          "Config file has no extension: {}",
          path.display()
        ))
      },
      |ext| {
        match ext.to_str().unwrap_or("").to_lowercase().as_str() {
          "json" => {
            serde_json::from_str(&content).with_context(|| {
              format!("Failed to parse JSON config from {}", path.display())
            })
          },
          "toml" => {
            toml::from_str(&content).with_context(|| {
              format!("Failed to parse TOML config from {}", path.display())
            })
          },
          _ => {
            Err(eyre!(
              "Unsupported config file format: {}",
              path.display()
            ))
          },
        }
      },
    )
  }

  /// Look for an `otex.toml` in the current working directory.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let candidate = PathBuf::from("otex.toml");
    candidate.is_file().then_some(candidate)
  }

  /// Load config from file and CLI arguments
  pub fn load(cli: &Cli) -> Result<Self> {
    let mut config = if let Some(config_path) = &cli.config_file {
      // Config file explicitly specified via CLI
      Self::from_file(config_path).with_context(|| {
        format!("Failed to load config from {}", config_path.display())
      })?
    } else if let Some(discovered_config) = Self::find_config_file() {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config).with_context(|| {
        format!(
          "Failed to load discovered config from {}",
          discovered_config.display()
        )
      })?
    } else {
      Self::default()
    };

    config.merge_with_cli(cli);
    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    if let Commands::Pdf {
      output_dir,
      build_dir,
      template,
      latex_bin,
      keep_build,
      ..
    } = &cli.command
    {
      if let Some(output_dir) = output_dir {
        self.output_dir.clone_from(output_dir);
      }

      if let Some(build_dir) = build_dir {
        self.build_dir = Some(build_dir.clone());
      }

      if let Some(template) = template {
        self.template_path = Some(template.clone());
      }

      if let Some(latex_bin) = latex_bin {
        self.latex_bin.clone_from(latex_bin);
      }

      if *keep_build {
        self.keep_build = true;
      }
    }
  }

  /// Generate a default configuration file at `path`.
  pub fn generate_default_config(format: &str, path: &Path) -> Result<()> {
    let config_content = match format {
      "json" => DEFAULT_CONFIG_JSON,
      _ => DEFAULT_CONFIG_TOML,
    };

    fs::write(path, config_content).with_context(|| {
      format!("Failed to write default config to {}", path.display())
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Converter options derived from this configuration.
  #[must_use]
  pub fn convert_options(&self) -> otex_obsidian::ConvertOptions {
    ConvertOptionsBuilder::new()
      .max_embed_depth(self.max_embed_depth)
      .modifier_style(if self.strict_dimensions {
        ModifierStyle::Strict
      } else {
        ModifierStyle::Lenient
      })
      .build()
  }

  /// The build directory to use for `input`: the configured one, or a
  /// `temp` directory next to the input file.
  #[must_use]
  pub fn build_dir_for(&self, input: &Path) -> PathBuf {
    self.build_dir.as_ref().map_or_else(
      || {
        input
          .parent()
          .unwrap_or_else(|| Path::new("."))
          .join("temp")
      },
      Clone::clone,
    )
  }
}
