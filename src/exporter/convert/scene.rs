use serde_json::{
  json,
  Map,
  Value,
};

use crate::error::HalaGltfError;
use crate::scene::HalaSceneDesc;
use super::super::resolver::HalaEntityKind;
use super::super::HalaExportState;

/// Export a scene.
/// Render metadata with no glTF counterpart travels in the extras block.
/// param state: The export state.
/// param scene: The scene.
/// return: The scene record.
pub fn export_scene(
  state: &HalaExportState,
  scene: &HalaSceneDesc,
) -> Result<Value, HalaGltfError> {
  log::debug!("Exporting scene \"{}\".", scene.name);

  let mut nodes = Vec::with_capacity(scene.root_objects.len());
  for root in scene.root_objects.iter() {
    nodes.push(state.require(HalaEntityKind::Object, *root, &scene.name)?);
  }

  let mut extras = scene.extras.clone().unwrap_or_else(Map::new);
  if let Some(active_camera) = scene.active_camera {
    let node = state.require(HalaEntityKind::Object, active_camera, &scene.name)?;
    extras.insert("active_camera".to_string(), json!(node));
  }
  extras.insert(
    "background_color".to_string(),
    json!(scene.background_color.iter().map(|v| *v as f64).collect::<Vec<_>>()),
  );
  extras.insert("frames_per_second".to_string(), json!(scene.frames_per_second as f64));

  Ok(json!({
    "name": scene.name,
    "nodes": nodes,
    "extras": extras,
  }))
}
