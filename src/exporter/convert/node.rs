use glam::{
  Quat,
  Vec3,
};
use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use crate::scene::HalaObject;
use crate::settings::HalaGltfVersion;
use super::super::resolver::HalaEntityKind;
use super::super::HalaExportState;
use super::apply_extras;

/// Export an object as a node.
/// param state: The export state.
/// param object: The object.
/// return: The node record.
pub fn export_object(state: &HalaExportState, object: &HalaObject) -> Result<Value, HalaGltfError> {
  log::debug!("Exporting object \"{}\".", object.name);

  let mut record = json!({ "name": object.name });

  if !object.children.is_empty() {
    let mut children = Vec::with_capacity(object.children.len());
    for child in object.children.iter() {
      children.push(state.require(HalaEntityKind::Object, *child, &object.name)?);
    }
    record["children"] = json!(children);
  }

  match object.matrix {
    Some(matrix) => {
      record["matrix"] = json!(matrix
        .to_cols_array()
        .iter()
        .map(|v| *v as f64)
        .collect::<Vec<_>>());
    },
    None => {
      if object.translation != Vec3::ZERO {
        let t = object.translation;
        record["translation"] = json!([t.x as f64, t.y as f64, t.z as f64]);
      }
      if object.rotation != Quat::IDENTITY {
        let r = object.rotation;
        record["rotation"] = json!([r.x as f64, r.y as f64, r.z as f64, r.w as f64]);
      }
      if object.scale != Vec3::ONE {
        let s = object.scale;
        record["scale"] = json!([s.x as f64, s.y as f64, s.z as f64]);
      }
    },
  }

  let mesh_index = if state.settings.meshes_apply_modifiers && object.modified_mesh_index != u32::MAX {
    object.modified_mesh_index
  } else {
    object.mesh_index
  };
  if mesh_index != u32::MAX {
    let index = state.require(HalaEntityKind::Mesh, mesh_index, &object.name)?;
    if state.version() >= HalaGltfVersion::V2_0 {
      record["mesh"] = json!(index);
    } else {
      record["meshes"] = json!([index]);
    }
  }

  if object.camera_index != u32::MAX {
    record["camera"] = json!(state.require(HalaEntityKind::Camera, object.camera_index, &object.name)?);
  }
  if object.skin_index != u32::MAX {
    record["skin"] = json!(state.require(HalaEntityKind::Skin, object.skin_index, &object.name)?);
  }
  if object.light_index != u32::MAX {
    // Staged at the top level, relocated by the punctual lights processor.
    record["light"] = json!(state.require(HalaEntityKind::Light, object.light_index, &object.name)?);
  }
  apply_extras(&mut record, &object.extras);

  Ok(record)
}

#[cfg(test)]
mod tests {
  use glam::Mat4;

  use super::*;
  use crate::scene::HalaExportData;
  use crate::settings::HalaExportSettings;

  #[test]
  fn test_node_trs_only_when_non_default() {
    let data = HalaExportData::new();
    let state = HalaExportState::new(&data, HalaExportSettings::default());

    let object = HalaObject::new("Empty");
    let record = export_object(&state, &object).unwrap();
    assert!(record.get("translation").is_none());
    assert!(record.get("rotation").is_none());
    assert!(record.get("scale").is_none());
    assert!(record.get("matrix").is_none());

    let mut object = HalaObject::new("Moved");
    object.translation = Vec3::new(1.0, 2.0, 3.0);
    let record = export_object(&state, &object).unwrap();
    assert_eq!(record["translation"], json!([1.0, 2.0, 3.0]));
  }

  #[test]
  fn test_node_matrix_wins_over_trs() {
    let data = HalaExportData::new();
    let state = HalaExportState::new(&data, HalaExportSettings::default());

    let mut object = HalaObject::new("Posed");
    object.translation = Vec3::X;
    object.matrix = Some(Mat4::IDENTITY);
    let record = export_object(&state, &object).unwrap();

    assert_eq!(record["matrix"].as_array().unwrap().len(), 16);
    assert!(record.get("translation").is_none());
  }

  #[test]
  fn test_node_modified_mesh_selection() {
    let mut data = HalaExportData::new();
    data.meshes.push(crate::scene::HalaMesh::new("base"));
    data.meshes.push(crate::scene::HalaMesh::new("modified"));

    let mut object = HalaObject::new("Cube");
    object.mesh_index = 0;
    object.modified_mesh_index = 1;

    let mut state = HalaExportState::new(&data, HalaExportSettings::default());
    state.resolver.insert(HalaEntityKind::Mesh, 0, 0);
    state.resolver.insert(HalaEntityKind::Mesh, 1, 1);

    let record = export_object(&state, &object).unwrap();
    assert_eq!(record["mesh"], 1);

    let mut settings = HalaExportSettings::default();
    settings.meshes_apply_modifiers = false;
    let mut state = HalaExportState::new(&data, settings);
    state.resolver.insert(HalaEntityKind::Mesh, 0, 0);
    state.resolver.insert(HalaEntityKind::Mesh, 1, 1);

    let record = export_object(&state, &object).unwrap();
    assert_eq!(record["mesh"], 0);
  }

  #[test]
  fn test_node_legacy_meshes_array() {
    let mut data = HalaExportData::new();
    data.meshes.push(crate::scene::HalaMesh::new("base"));
    let mut object = HalaObject::new("Cube");
    object.mesh_index = 0;

    let settings = HalaExportSettings {
      asset_version: crate::settings::HalaGltfVersion::V1_0,
      ..Default::default()
    };
    let mut state = HalaExportState::new(&data, settings);
    state.resolver.insert(HalaEntityKind::Mesh, 0, 0);

    let record = export_object(&state, &object).unwrap();
    assert_eq!(record["meshes"], json!([0]));
    assert!(record.get("mesh").is_none());
  }

  #[test]
  fn test_node_unknown_child_fails() {
    let data = HalaExportData::new();
    let state = HalaExportState::new(&data, HalaExportSettings::default());
    let mut object = HalaObject::new("Parent");
    object.children.push(5);
    assert!(export_object(&state, &object).is_err());
  }
}
