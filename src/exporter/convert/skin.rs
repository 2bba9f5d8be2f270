use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use crate::scene::HalaSkin;
use super::super::accessor::{
  f32_bytes,
  HalaComponentType,
  HalaElementType,
};
use super::super::buffer::HalaBufferTarget;
use super::super::resolver::{
  HalaAccessorRole,
  HalaEntityKind,
};
use super::super::HalaExportState;
use super::apply_extras;

/// Export a skin.
/// param state: The export state.
/// param skin: The skin.
/// return: The skin record.
pub fn export_skin(state: &mut HalaExportState, skin: &HalaSkin) -> Result<Value, HalaGltfError> {
  log::debug!("Exporting skin \"{}\".", skin.name);

  if skin.inverse_bind_matrices.len() != skin.joints.len() {
    return Err(HalaGltfError::new(
      &format!(
        "Skin \"{}\" has {} inverse bind matrices for {} joints.",
        skin.name, skin.inverse_bind_matrices.len(), skin.joints.len()
      ),
      None,
    ));
  }

  let mut joints = Vec::with_capacity(skin.joints.len());
  for joint in skin.joints.iter() {
    joints.push(state.require(HalaEntityKind::Object, *joint, &skin.name)?);
  }

  let mut record = json!({
    "name": skin.name,
    "joints": joints,
  });

  if !skin.inverse_bind_matrices.is_empty() {
    let matrices: Vec<f32> = skin
      .inverse_bind_matrices
      .iter()
      .flat_map(|m| m.to_cols_array())
      .collect();
    let index = state.push_payload(
      HalaAccessorRole::InverseBindMatrices,
      "skins",
      &f32_bytes(&matrices),
      HalaBufferTarget::NONE,
      HalaComponentType::FLOAT,
      HalaElementType::Mat4,
      skin.inverse_bind_matrices.len(),
      false,
      None,
    )?;
    record["inverseBindMatrices"] = json!(index);
  }

  if let Some(skeleton_root) = skin.skeleton_root {
    record["skeleton"] = json!(state.require(HalaEntityKind::Object, skeleton_root, &skin.name)?);
  }
  apply_extras(&mut record, &skin.extras);

  Ok(record)
}
