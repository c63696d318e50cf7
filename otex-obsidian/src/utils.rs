//! Small helpers shared across the crate.
use regex::Regex;

/// Extracts the document title from markdown content.
///
/// The title is the text of a heading on the first line, with its markers
/// and leading whitespace stripped. A document that does not open with a
/// heading has no title.
#[must_use]
pub fn extract_title(content: &str) -> Option<String> {
  let first = content.lines().next()?;
  if !first.starts_with('#') {
    return None;
  }

  Some(first.trim_start_matches('#').trim_start().to_string())
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile. It
/// will never match any input, which is safer than a trivial pattern like
/// `^$` that would match empty strings.
#[must_use]
pub fn never_matching_regex() -> Regex {
  // Use a pattern that will never match anything because it asserts
  // something impossible - this pattern is guaranteed to be valid
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    // As an ultimate fallback, use an empty pattern that matches nothing
    #[allow(
      clippy::unwrap_used,
      reason = "This pattern is guaranteed to be valid"
    )]
    Regex::new(r"^\b$").unwrap()
  })
}
