use std::path::PathBuf;

/// An image referenced by textures.
/// The host supplies either a source file path, already encoded bytes, or both.
pub struct HalaImageData {
  pub name: String,
  /// The path of the source file on disk, if any.
  pub path: Option<PathBuf>,
  /// Encoded image bytes (PNG/JPEG as stored by the host), if any.
  pub bytes: Option<Vec<u8>>,
  /// The MIME type of `bytes`.
  pub mime_type: Option<String>,
  pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The implementation of the image data.
impl HalaImageData {
  /// Create a new image referencing a file on disk.
  /// param name: The name of the image.
  /// param path: The path of the source file.
  /// return: The image data.
  pub fn new_with_file(name: &str, path: PathBuf) -> Self {
    Self {
      name: name.to_string(),
      path: Some(path),
      bytes: None,
      mime_type: None,
      extras: None,
    }
  }

  /// Create a new image from encoded bytes.
  /// param name: The name of the image.
  /// param bytes: The encoded image bytes.
  /// param mime_type: The MIME type of the bytes.
  /// return: The image data.
  pub fn new_with_bytes(name: &str, bytes: Vec<u8>, mime_type: &str) -> Self {
    Self {
      name: name.to_string(),
      path: None,
      bytes: Some(bytes),
      mime_type: Some(mime_type.to_string()),
      extras: None,
    }
  }
}
