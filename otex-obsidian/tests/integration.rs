#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::{
  fs,
  path::{Path, PathBuf},
};

use otex_obsidian::{
  ConvertError,
  ConvertOptions,
  ConvertOptionsBuilder,
  Converter,
  vault,
};
use tempfile::{TempDir, tempdir};

/// Lay out an empty vault (a directory containing `.obsidian`) and return
/// the tempdir guard together with the vault root.
fn vault_fixture() -> (TempDir, PathBuf) {
  let temp = tempdir().expect("Failed to create temp dir in test");
  let root = temp.path().join("vault");
  fs::create_dir_all(root.join(".obsidian"))
    .expect("Failed to create vault marker in test");
  (temp, root)
}

fn write_file(root: &Path, rel: &str, content: &str) {
  let path = root.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).expect("Failed to create dir in test");
  }
  fs::write(path, content).expect("Failed to write fixture in test");
}

fn converter(root: &Path) -> Converter {
  Converter::new(root, ConvertOptions::default())
}

#[test]
fn transclusion_shifts_headings_by_one() {
  let (_temp, root) = vault_fixture();
  write_file(&root, "Hello.md", "# Hello\nlorem ipsum\n");

  let result = converter(&root)
    .convert("![[Hello]]")
    .expect("conversion failed");

  assert_eq!(result.body, "\\section{Hello}\nlorem ipsum\n");
}

#[test]
fn nested_transclusion_shifts_by_two() {
  let (_temp, root) = vault_fixture();
  write_file(&root, "Hello.md", "# Hello\nlorem ipsum\n![[World]]\n");
  write_file(&root, "notes/World.md", "# World\ndolor sit\n");

  let result = converter(&root)
    .convert("![[Hello]]")
    .expect("conversion failed");

  assert_eq!(
    result.body,
    "\\section{Hello}\nlorem ipsum\n\\subsection{World}\ndolor sit\n"
  );
}

#[test]
fn transcluded_files_are_recorded() {
  let (_temp, root) = vault_fixture();
  write_file(&root, "Hello.md", "# Hello\n![[World]]\n");
  write_file(&root, "notes/World.md", "dolor sit\n");

  let result = converter(&root)
    .convert("intro\n![[Hello]]")
    .expect("conversion failed");

  assert_eq!(result.included_files, vec![
    root.join("Hello.md"),
    root.join("notes/World.md"),
  ]);
}

#[test]
fn missing_reference_fails_with_its_name() {
  let (_temp, root) = vault_fixture();

  let err = converter(&root)
    .convert("![[Nope]]")
    .expect_err("missing reference should fail");

  assert!(matches!(err, ConvertError::FileNotFound { .. }));
  assert!(err.to_string().contains("Nope.md"), "error was: {err}");
}

#[test]
fn cyclic_embeds_are_detected() {
  let (_temp, root) = vault_fixture();
  write_file(&root, "A.md", "a text\n![[B]]\n");
  write_file(&root, "B.md", "b text\n![[A]]\n");

  let err = converter(&root)
    .convert("![[A]]")
    .expect_err("cycle should fail");

  assert!(matches!(err, ConvertError::CyclicEmbed { .. }));
  assert!(err.to_string().contains("A.md"), "error was: {err}");
}

#[test]
fn depth_limit_bounds_acyclic_chains() {
  let (_temp, root) = vault_fixture();
  write_file(&root, "A.md", "a text\n![[B]]\n");
  write_file(&root, "B.md", "b text\n");

  let options = ConvertOptionsBuilder::new().max_embed_depth(1).build();
  let shallow = Converter::new(&root, options);

  let err = shallow
    .convert("![[A]]")
    .expect_err("chain deeper than the limit should fail");
  assert!(matches!(err, ConvertError::MaxDepthExceeded { limit: 1 }));

  // A single level stays within the limit
  let result = shallow.convert("![[B]]").expect("conversion failed");
  assert_eq!(result.body, "b text\n");
}

#[test]
fn duplicate_names_resolve_in_sorted_walk_order() {
  let (_temp, root) = vault_fixture();
  write_file(&root, "alpha/dup.md", "from alpha\n");
  write_file(&root, "beta/dup.md", "from beta\n");

  let result = converter(&root)
    .convert("![[dup]]")
    .expect("conversion failed");

  assert_eq!(result.body, "from alpha\n");
}

#[test]
fn converter_is_reusable_after_a_failed_conversion() {
  let (_temp, root) = vault_fixture();
  write_file(&root, "Hello.md", "# Hello\nlorem ipsum\n");
  let conv = converter(&root);

  conv
    .convert("![[Missing]]")
    .expect_err("missing reference should fail");

  // A failed run must not leak depth or visited state into the next one
  let result = conv.convert("![[Hello]]").expect("conversion failed");
  assert_eq!(result.body, "\\section{Hello}\nlorem ipsum\n");
}

#[test]
fn vault_root_found_from_nested_path() {
  let (_temp, root) = vault_fixture();
  write_file(&root, "docs/deep/note.md", "text\n");

  let found = vault::find_vault_root(&root.join("docs/deep/note.md"))
    .expect("vault root should be found");
  assert_eq!(found, root);
}

#[test]
fn vault_root_missing_is_an_error() {
  let temp = tempdir().expect("Failed to create temp dir in test");

  let err = vault::find_vault_root(temp.path())
    .expect_err("no marker anywhere above the temp dir");
  assert!(matches!(err, ConvertError::VaultRootNotFound { .. }));
}

#[test]
fn find_file_searches_all_subdirectories() {
  let (_temp, root) = vault_fixture();
  write_file(&root, "a/b/c/target.md", "found\n");

  let path = vault::find_file(&root, "target.md").expect("lookup failed");
  assert_eq!(path, root.join("a/b/c/target.md"));

  let err = vault::find_file(&root, "absent.md")
    .expect_err("absent file should fail");
  assert!(err.to_string().contains("absent.md"), "error was: {err}");
}
