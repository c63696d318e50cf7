//! Reserved-character escaping for emitted LaTeX.
use std::{collections::HashMap, sync::LazyLock};

/// Map of characters that must be escaped before LaTeX sees them.
///
/// Only `#` and `_` are handled: this converter passes markdown lines
/// through mostly verbatim, and these two are the characters LaTeX would
/// otherwise treat as parameter and subscript markers.
pub static TEX_ESCAPES: LazyLock<HashMap<char, &'static str>> =
  LazyLock::new(|| {
    let mut map = HashMap::with_capacity(2);
    map.insert('#', "\\#");
    map.insert('_', "\\_");
    map
  });

/// Escapes a string for use in a LaTeX document body.
///
/// Escaping is applied exactly once; input is assumed not to be
/// pre-escaped.
#[must_use]
pub fn tex_escape(s: &str) -> String {
  let mut result = String::with_capacity(s.len() * 2);

  for c in s.chars() {
    if let Some(escape) = TEX_ESCAPES.get(&c) {
      result.push_str(escape);
    } else {
      result.push(c);
    }
  }

  result
}
