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
  ModifierStyle,
};
use tempfile::{TempDir, tempdir};

fn vault_with_image(rel: &str) -> (TempDir, PathBuf) {
  let temp = tempdir().expect("Failed to create temp dir in test");
  let root = temp.path().join("vault");
  fs::create_dir_all(root.join(".obsidian"))
    .expect("Failed to create vault marker in test");

  let image = root.join(rel);
  if let Some(parent) = image.parent() {
    fs::create_dir_all(parent).expect("Failed to create dir in test");
  }
  fs::write(image, b"not really pixels")
    .expect("Failed to write fixture in test");

  (temp, root)
}

/// Extension-stripped, slash-normalized form of `root/rel`, as it should
/// appear inside the emitted `\includegraphics` command.
fn graphics_path(root: &Path, rel: &str) -> String {
  root
    .join(rel)
    .with_extension("")
    .to_string_lossy()
    .replace('\\', "/")
}

fn convert(root: &Path, line: &str) -> Result<String, ConvertError> {
  Converter::new(root, ConvertOptions::default())
    .convert(line)
    .map(|result| result.body)
}

#[test]
fn image_without_modifier_uses_column_width() {
  let (_temp, root) = vault_with_image("images/foo.png");

  let body = convert(&root, "![[foo.png]]").expect("conversion failed");
  assert_eq!(
    body,
    format!(
      "\\includegraphics[width=\\columnwidth,keepaspectratio]{{{}}}\n",
      graphics_path(&root, "images/foo.png")
    )
  );
}

#[test]
fn width_modifier_halves_into_points() {
  let (_temp, root) = vault_with_image("resources/bar.bmp");

  let body = convert(&root, "![[bar.bmp|500]]").expect("conversion failed");
  assert_eq!(
    body,
    format!(
      "\\includegraphics[width=250pt,keepaspectratio]{{{}}}\n",
      graphics_path(&root, "resources/bar.bmp")
    )
  );
}

#[test]
fn width_and_height_modifier_halves_both() {
  let (_temp, root) = vault_with_image("resources/bar.bmp");

  let body =
    convert(&root, "![[bar.bmp|500x100]]").expect("conversion failed");
  assert_eq!(
    body,
    format!(
      "\\includegraphics[width=250pt,height=50pt]{{{}}}\n",
      graphics_path(&root, "resources/bar.bmp")
    )
  );
}

#[test]
fn uppercase_separator_is_not_a_dimension_modifier() {
  let (_temp, root) = vault_with_image("resources/bar.bmp");

  // `500X100` is not recognized; lenient mode falls back to full width
  let body =
    convert(&root, "![[bar.bmp|500X100]]").expect("conversion failed");
  assert!(
    body.contains("width=\\columnwidth,keepaspectratio"),
    "body was: {body}"
  );
}

#[test]
fn strict_mode_rejects_unparsable_modifiers() {
  let (_temp, root) = vault_with_image("resources/bar.bmp");
  let strict = Converter::new(
    &root,
    ConvertOptionsBuilder::new()
      .modifier_style(ModifierStyle::Strict)
      .build(),
  );

  let err = strict
    .convert("![[bar.bmp|500X100]]")
    .expect_err("strict mode should reject the modifier");
  assert!(matches!(err, ConvertError::MalformedEmbed { .. }));
}

#[test]
fn missing_image_fails_with_its_name() {
  let (_temp, root) = vault_with_image("images/foo.png");

  let err = convert(&root, "![[ghost.png|200]]")
    .expect_err("missing image should fail");
  assert!(matches!(err, ConvertError::FileNotFound { .. }));
  assert!(err.to_string().contains("ghost.png"), "error was: {err}");
}

#[test]
fn image_embedded_from_transcluded_document() {
  let (_temp, root) = vault_with_image("resources/World.bmp");
  fs::write(root.join("Hello.md"), "# Hello\nlorem ipsum\n![[World.bmp]]\n")
    .expect("Failed to write fixture in test");

  let body = convert(&root, "![[Hello]]").expect("conversion failed");
  assert_eq!(
    body,
    format!(
      "\\section{{Hello}}\nlorem ipsum\n\\includegraphics[width=\\\
       columnwidth,keepaspectratio]{{{}}}\n",
      graphics_path(&root, "resources/World.bmp")
    )
  );
}
