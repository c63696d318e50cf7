//! Line-oriented conversion of Obsidian-flavored markdown to LaTeX.
//!
//! The converter walks a document one line at a time: heading lines become
//! sectioning commands, `![[...]]` embed lines expand into transcluded
//! documents or `\includegraphics` commands, and everything else passes
//! through with reserved characters escaped. Transclusion re-enters the
//! converter recursively, shifting the embedded document's headings down so
//! its outline slots in under the inclusion point.
use std::{
  fs,
  path::{Path, PathBuf},
  sync::LazyLock,
};

use log::{debug, warn};
use regex::Regex;

use crate::{
  error::ConvertError,
  escape::tex_escape,
  types::{ConvertOptions, ConvertResult, ModifierStyle},
  utils::{extract_title, never_matching_regex},
  vault,
};

/// Leading heading markers and the remaining heading text.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(#+)\s*(.*)$").unwrap_or_else(|e| {
    log::error!("Failed to compile HEADING_RE regex: {e}");
    never_matching_regex()
  })
});

/// `![[reference]]` embed lines.
static EMBED_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^!\[\[(.*)\]\]").unwrap_or_else(|e| {
    log::error!("Failed to compile EMBED_RE regex: {e}");
    never_matching_regex()
  })
});

/// Dimension modifiers: `500` or `500x100`. The separator is a lowercase
/// `x` only; `500X100` is not a dimension modifier.
static DIMENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(\d+)(?:x(\d+))?$").unwrap_or_else(|e| {
    log::error!("Failed to compile DIMENSION_RE regex: {e}");
    never_matching_regex()
  })
});

/// LaTeX sectioning commands, indexed by heading depth minus two. Depth 1
/// is the document title and renders as nothing.
const SECTION_COMMANDS: [&str; 5] = [
  "section",
  "subsection",
  "subsubsection",
  "paragraph",
  "subparagraph",
];

/// Extension appended to extensionless embed references.
const DOC_EXTENSION: &str = "md";

/// Sizing arguments used when an image carries no usable dimensions.
const FULL_WIDTH_SIZING: &str = "width=\\columnwidth,keepaspectratio";

/// Per-conversion mutable state.
///
/// Each call to [`Converter::convert`] owns a fresh context, so conversions
/// never leak nesting depth or visited files into one another. The depth
/// and stack are restored on every exit path, including failed recursions.
#[derive(Debug)]
struct Context {
  /// Current transclusion nesting depth; 1 while in the top-level document.
  depth:    usize,
  /// Canonical paths of the documents currently being transcluded.
  stack:    Vec<PathBuf>,
  /// Every file embedded so far, in encounter order.
  included: Vec<PathBuf>,
}

impl Context {
  const fn new() -> Self {
    Self {
      depth:    1,
      stack:    Vec::new(),
      included: Vec::new(),
    }
  }
}

/// Obsidian markdown to LaTeX converter, scoped to a single vault.
///
/// # Examples
///
/// ```
/// use otex_obsidian::{ConvertOptions, Converter};
///
/// let converter = Converter::new("/path/to/vault", ConvertOptions::default());
/// let result = converter
///   .convert("# My Note\nplain body text")
///   .expect("conversion failed");
///
/// assert_eq!(result.title.as_deref(), Some("My Note"));
/// assert_eq!(result.body, "\nplain body text\n");
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
  options:    ConvertOptions,
  vault_root: PathBuf,
}

impl Converter {
  /// Create a converter that resolves embed references under `vault_root`.
  pub fn new(vault_root: impl Into<PathBuf>, options: ConvertOptions) -> Self {
    Self {
      options,
      vault_root: vault_root.into(),
    }
  }

  /// The vault root this converter resolves references against.
  #[must_use]
  pub fn vault_root(&self) -> &Path {
    &self.vault_root
  }

  /// Convert a full document to a LaTeX body.
  ///
  /// # Errors
  ///
  /// Fails on unresolvable or malformed embed references, transclusion
  /// cycles, nesting beyond the configured depth, and I/O errors while
  /// reading transcluded files. No partial output is produced.
  pub fn convert(&self, content: &str) -> Result<ConvertResult, ConvertError> {
    let mut ctx = Context::new();
    let body = self.convert_body(content, &mut ctx)?;

    Ok(ConvertResult {
      body,
      title: extract_title(content),
      included_files: ctx.included,
    })
  }

  /// Convert a block of markdown one line at a time. The output always ends
  /// with a newline.
  fn convert_body(
    &self,
    content: &str,
    ctx: &mut Context,
  ) -> Result<String, ConvertError> {
    let mut lines = Vec::with_capacity(content.lines().count());
    for line in content.lines() {
      lines.push(self.line_to_tex(line, ctx)?);
    }

    let mut body = lines.join("\n");
    body.push('\n');
    Ok(body)
  }

  /// Classify one source line and return its rendered form.
  fn line_to_tex(
    &self,
    line: &str,
    ctx: &mut Context,
  ) -> Result<String, ConvertError> {
    if line.starts_with('#') {
      return Ok(heading_to_tex(line));
    }
    if line.starts_with("![[") {
      return self.embed(line, ctx);
    }

    Ok(tex_escape(line))
  }

  /// Expand an embed line into a transcluded document or an image
  /// inclusion command, depending on whether the reference carries a file
  /// extension.
  fn embed(
    &self,
    line: &str,
    ctx: &mut Context,
  ) -> Result<String, ConvertError> {
    let Some(caps) = EMBED_RE.captures(line) else {
      return Err(ConvertError::MalformedEmbed {
        line: line.to_string(),
      });
    };
    let reference = caps[1].to_string();

    // Split off the pipe-delimited modifier segment, if any
    let (name, modifier) = match reference.split_once('|') {
      Some((name, modifier)) => (name, Some(modifier)),
      None => (reference.as_str(), None),
    };

    if Path::new(name).extension().is_some() {
      self.include_image(line, name, modifier, ctx)
    } else {
      self.transclude(&format!("{name}.{DOC_EXTENSION}"), ctx)
    }
  }

  /// Transclude `file_name`, shifting its headings down by the current
  /// nesting depth so the embedded outline stays coherent.
  ///
  /// The single embed line expands into the whole converted document, with
  /// trailing newlines trimmed so the splice does not introduce blank
  /// lines.
  fn transclude(
    &self,
    file_name: &str,
    ctx: &mut Context,
  ) -> Result<String, ConvertError> {
    if ctx.depth > self.options.max_embed_depth {
      return Err(ConvertError::MaxDepthExceeded {
        limit: self.options.max_embed_depth,
      });
    }

    let path = vault::find_file(&self.vault_root, file_name)?;
    let canonical = path.canonicalize()?;
    if ctx.stack.contains(&canonical) {
      return Err(ConvertError::CyclicEmbed {
        name: file_name.to_string(),
      });
    }

    debug!("Transcluding {} at depth {}", path.display(), ctx.depth);
    let text = fs::read_to_string(&path)?;
    let shifted = shift_headings(&text, ctx.depth);

    ctx.included.push(path);
    ctx.stack.push(canonical);
    ctx.depth += 1;
    let result = self.convert_body(&shifted, ctx);
    ctx.depth -= 1;
    ctx.stack.pop();

    Ok(result?.trim_end_matches('\n').to_string())
  }

  /// Emit an `\includegraphics` command for an image reference.
  ///
  /// The resolved path is stripped of its extension and normalized to
  /// forward slashes regardless of host path conventions. Dimension
  /// modifiers are pixel-like units halved into LaTeX points; an
  /// unparsable modifier either falls back to full-width sizing or fails,
  /// per [`ModifierStyle`].
  fn include_image(
    &self,
    line: &str,
    file_name: &str,
    modifier: Option<&str>,
    ctx: &mut Context,
  ) -> Result<String, ConvertError> {
    let path = vault::find_file(&self.vault_root, file_name)?;
    ctx.included.push(path.clone());

    let sizing = match modifier {
      None => FULL_WIDTH_SIZING.to_string(),
      Some(modifier) => {
        match parse_dimensions(modifier) {
          Some((width, None)) => {
            format!("width={}pt,keepaspectratio", width / 2)
          },
          Some((width, Some(height))) => {
            format!("width={}pt,height={}pt", width / 2, height / 2)
          },
          None => {
            match self.options.modifier_style {
              ModifierStyle::Lenient => {
                warn!(
                  "Ignoring unrecognized dimension modifier `{modifier}` on \
                   `{file_name}`"
                );
                FULL_WIDTH_SIZING.to_string()
              },
              ModifierStyle::Strict => {
                return Err(ConvertError::MalformedEmbed {
                  line: line.to_string(),
                });
              },
            }
          },
        }
      },
    };

    Ok(format!("\\includegraphics[{sizing}]{{{}}}", format_path(&path)))
  }
}

/// Render a heading line to its LaTeX sectioning command.
///
/// Depth 1 is the document title, extracted separately and suppressed from
/// the body; depths past `subparagraph` are dropped with a warning.
fn heading_to_tex(line: &str) -> String {
  let Some(caps) = HEADING_RE.captures(line) else {
    return tex_escape(line);
  };

  let depth = caps[1].len();
  if depth == 1 {
    return String::new();
  }

  SECTION_COMMANDS.get(depth - 2).map_or_else(
    || {
      warn!("Dropping heading deeper than subparagraph: {line}");
      String::new()
    },
    |command| format!("\\{command}{{{}}}", tex_escape(&caps[2])),
  )
}

/// Prepend `by` extra markers to every heading line, so a document embedded
/// at nesting level N renders its depth-D headings as depth D+N.
fn shift_headings(content: &str, by: usize) -> String {
  content
    .lines()
    .map(|line| {
      if line.starts_with('#') {
        format!("{}{line}", "#".repeat(by))
      } else {
        line.to_string()
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Parse a `W` or `WxH` dimension modifier. Returns `None` for anything
/// else, including an uppercase `X` separator and out-of-range values.
fn parse_dimensions(modifier: &str) -> Option<(u64, Option<u64>)> {
  let caps = DIMENSION_RE.captures(modifier)?;
  let width = caps[1].parse().ok()?;
  let height = match caps.get(2) {
    Some(m) => Some(m.as_str().parse().ok()?),
    None => None,
  };

  Some((width, height))
}

/// Strip the extension and normalize separators to the forward slashes the
/// LaTeX toolchain expects, regardless of host conventions.
fn format_path(path: &Path) -> String {
  path.with_extension("").to_string_lossy().replace('\\', "/")
}
