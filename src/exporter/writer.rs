use std::path::Path;

use base64::Engine as _;
use serde::Serialize;
use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use super::{
  HalaAuxFile,
  HalaExportOutput,
  HalaExportState,
};

const GLB_MAGIC: u32 = 0x4654_6C67;
const GLB_VERSION: u32 = 2;
const GLB_CHUNK_JSON: u32 = 0x4E4F_534A;
const GLB_CHUNK_BIN: u32 = 0x004E_4942;

/// Serialize the document JSON, either compact or indented.
/// param document: The document JSON.
/// param pretty: Whether to indent the output.
/// return: The serialized bytes.
fn to_text(document: &Value, pretty: bool) -> Result<Vec<u8>, HalaGltfError> {
  if !pretty {
    return Ok(serde_json::to_vec(document)?);
  }
  let mut bytes = Vec::new();
  let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
  let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
  document.serialize(&mut serializer)?;
  bytes.push(b'\n');
  Ok(bytes)
}

/// Build a GLB container from the serialized document and the combined
/// binary buffer. The JSON chunk is space padded, the binary chunk zero
/// padded, both to four bytes.
/// param json_bytes: The serialized document.
/// param bin: The combined buffer bytes.
/// return: The container bytes.
fn build_glb(json_bytes: &[u8], bin: &[u8]) -> Vec<u8> {
  let mut json_chunk = json_bytes.to_vec();
  while json_chunk.len() % 4 != 0 {
    json_chunk.push(b' ');
  }
  let mut bin_chunk = bin.to_vec();
  while bin_chunk.len() % 4 != 0 {
    bin_chunk.push(0);
  }

  let mut total = 12 + 8 + json_chunk.len();
  if !bin.is_empty() {
    total += 8 + bin_chunk.len();
  }

  let mut out = Vec::with_capacity(total);
  out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
  out.extend_from_slice(&GLB_VERSION.to_le_bytes());
  out.extend_from_slice(&(total as u32).to_le_bytes());
  out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
  out.extend_from_slice(&GLB_CHUNK_JSON.to_le_bytes());
  out.extend_from_slice(&json_chunk);
  if !bin.is_empty() {
    out.extend_from_slice(&(bin_chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(&GLB_CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin_chunk);
  }
  out
}

/// Finalize the buffer records and serialize the document.
/// param state: The export state, consumed.
/// return: The export output.
pub fn build(state: HalaExportState) -> Result<HalaExportOutput, HalaGltfError> {
  let HalaExportState {
    settings,
    packer,
    mut document,
    mut files,
    ..
  } = state;

  if settings.gltf_export_binary {
    let bytes = packer.combined_bytes();
    if !bytes.is_empty() {
      // The GLB binary chunk is the buffer without a URI.
      document.buffers.push(json!({ "byteLength": bytes.len() }));
    }
  } else if settings.buffers_embed_data {
    for buffer in packer.buffers() {
      if buffer.data.is_empty() {
        continue;
      }
      document.buffers.push(json!({
        "name": buffer.name,
        "byteLength": buffer.data.len(),
        "uri": format!(
          "data:application/octet-stream;base64,{}",
          base64::engine::general_purpose::STANDARD.encode(&buffer.data)
        ),
      }));
    }
  } else {
    for buffer in packer.buffers() {
      if buffer.data.is_empty() {
        continue;
      }
      let file_name = format!("{}.bin", buffer.name);
      document.buffers.push(json!({
        "name": buffer.name,
        "byteLength": buffer.data.len(),
        "uri": file_name,
      }));
      files.push(HalaAuxFile::Bytes {
        name: file_name,
        data: buffer.data.clone(),
      });
    }
  }

  let path = settings.output_path();
  let document = document.into_json(settings.asset_version, settings.asset_profile);
  let bytes = if settings.gltf_export_binary {
    build_glb(&to_text(&document, false)?, packer.combined_bytes())
  } else {
    to_text(&document, settings.pretty_print)?
  };

  log::debug!("Built \"{}\" ({} bytes, {} sidecar file(s)).", path.display(), bytes.len(), files.len());
  Ok(HalaExportOutput { path, bytes, files })
}

/// Write the document and its sidecar files to disk.
/// param output: The export output.
pub fn write(output: &HalaExportOutput) -> Result<(), HalaGltfError> {
  if let Some(parent) = output.path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent)?;
    }
  }
  std::fs::write(&output.path, &output.bytes)?;

  let dir = output.path.parent().unwrap_or_else(|| Path::new("."));
  for file in output.files.iter() {
    match file {
      HalaAuxFile::Bytes { name, data } => {
        std::fs::write(dir.join(name), data)?;
      },
      HalaAuxFile::Copy { name, source } => {
        std::fs::copy(source, dir.join(name))?;
      },
    }
  }
  Ok(())
}
