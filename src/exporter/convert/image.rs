use std::path::Path;

use base64::Engine as _;
use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use crate::scene::HalaImageData;
use crate::settings::HalaImageStorage;
use super::super::{
  HalaAuxFile,
  HalaExportState,
};
use super::apply_extras;

/// Get the MIME type matching a file extension, if it is one glTF viewers
/// accept without transcoding.
/// param path: The file path.
/// return: The MIME type, if known.
fn mime_from_extension(path: &Path) -> Option<&'static str> {
  match path.extension().and_then(|ext| ext.to_str())?.to_ascii_lowercase().as_str() {
    "png" => Some("image/png"),
    "jpg" | "jpeg" => Some("image/jpeg"),
    _ => None,
  }
}

/// Re-encode decoded pixels as PNG bytes.
/// param name: The image name, for diagnostics.
/// param decoded: The decoded image.
/// return: The PNG bytes.
fn encode_png(name: &str, decoded: image::DynamicImage) -> Result<Vec<u8>, HalaGltfError> {
  let mut encoded = std::io::Cursor::new(Vec::new());
  decoded
    .write_to(&mut encoded, image::ImageFormat::Png)
    .map_err(|err| {
      HalaGltfError::new(
        &format!("Failed to re-encode image \"{}\".", name),
        Some(Box::new(err)),
      )
    })?;
  Ok(encoded.into_inner())
}

/// Get the encoded bytes and MIME type of an image, transcoding formats
/// glTF viewers do not accept.
/// param image_data: The image.
/// return: The (bytes, mime type) pair.
fn encoded_bytes(image_data: &HalaImageData) -> Result<(Vec<u8>, String), HalaGltfError> {
  if let Some(bytes) = &image_data.bytes {
    if let Some(mime_type) = &image_data.mime_type {
      if mime_type == "image/png" || mime_type == "image/jpeg" {
        return Ok((bytes.clone(), mime_type.clone()));
      }
    }
    let decoded = image::load_from_memory(bytes).map_err(|err| {
      HalaGltfError::new(
        &format!("Failed to decode image \"{}\".", image_data.name),
        Some(Box::new(err)),
      )
    })?;
    return Ok((encode_png(&image_data.name, decoded)?, "image/png".to_string()));
  }

  let path = image_data.path.as_ref().ok_or_else(|| {
    HalaGltfError::new(
      &format!("Image \"{}\" has neither bytes nor a source file.", image_data.name),
      None,
    )
  })?;
  if let Some(mime_type) = mime_from_extension(path) {
    let bytes = std::fs::read(path).map_err(|err| {
      HalaGltfError::new(
        &format!("Failed to read image \"{}\".", image_data.name),
        Some(Box::new(err)),
      )
    })?;
    return Ok((bytes, mime_type.to_string()));
  }
  let decoded = image::open(path).map_err(|err| {
    HalaGltfError::new(
      &format!("Failed to decode image \"{}\".", image_data.name),
      Some(Box::new(err)),
    )
  })?;
  Ok((encode_png(&image_data.name, decoded)?, "image/png".to_string()))
}

/// Get the sidecar file name of an image copied next to the document.
/// param image_data: The image.
/// return: The file name.
fn sidecar_name(image_data: &HalaImageData) -> String {
  if let Some(name) = image_data
    .path
    .as_ref()
    .and_then(|path| path.file_name())
    .and_then(|name| name.to_str())
  {
    return name.to_string();
  }
  let extension = match image_data.mime_type.as_deref() {
    Some("image/jpeg") => "jpg",
    _ => "png",
  };
  format!("{}.{}", image_data.name, extension)
}

/// Export an image.
/// param state: The export state.
/// param image_data: The image.
/// return: The image record.
pub fn export_image(
  state: &mut HalaExportState,
  image_data: &HalaImageData,
) -> Result<Value, HalaGltfError> {
  log::debug!("Exporting image \"{}\".", image_data.name);

  let uri = match state.settings.images_data_storage {
    HalaImageStorage::Embed => {
      let (bytes, mime_type) = encoded_bytes(image_data)?;
      format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(&bytes)
      )
    },
    HalaImageStorage::Reference => {
      let path = image_data.path.as_ref().ok_or_else(|| {
        HalaGltfError::new(
          &format!("Image \"{}\" has no source file to reference.", image_data.name),
          None,
        )
      })?;
      path.to_string_lossy().into_owned()
    },
    HalaImageStorage::Copy => {
      let name = sidecar_name(image_data);
      let file = match (&image_data.bytes, &image_data.path) {
        (Some(bytes), _) => HalaAuxFile::Bytes {
          name: name.clone(),
          data: bytes.clone(),
        },
        (None, Some(path)) => HalaAuxFile::Copy {
          name: name.clone(),
          source: path.clone(),
        },
        (None, None) => {
          return Err(HalaGltfError::new(
            &format!("Image \"{}\" has neither bytes nor a source file.", image_data.name),
            None,
          ));
        },
      };
      state.files.push(file);
      name
    },
  };

  let mut record = json!({
    "name": image_data.name,
    "uri": uri,
  });
  apply_extras(&mut record, &image_data.extras);

  Ok(record)
}
