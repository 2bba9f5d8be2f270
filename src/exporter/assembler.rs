use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use super::HalaExportState;

/// Get the default value of a GL uniform type, used when a technique
/// parameter carries no explicit value.
/// param gl_type: The GL type code.
/// return: The default value, if the type is known.
fn default_value_for_gl_type(gl_type: u64) -> Option<Value> {
  match gl_type {
    5124 => Some(json!(1)),
    5126 => Some(json!(1.0)),
    35664 => Some(json!([1.0, 1.0])),
    35665 => Some(json!([1.0, 1.0, 1.0])),
    35666 => Some(json!([1.0, 1.0, 1.0, 1.0])),
    35674 => Some(json!([1.0, 0.0, 0.0, 1.0])),
    35675 => Some(json!([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])),
    35676 => Some(json!([
      1.0, 0.0, 0.0, 0.0,
      0.0, 1.0, 0.0, 0.0,
      0.0, 0.0, 1.0, 0.0,
      0.0, 0.0, 0.0, 1.0,
    ])),
    _ => None,
  }
}

/// Pick the default scene: the scene whose name sorts first.
fn pick_default_scene(state: &mut HalaExportState) {
  let mut best: Option<(u32, &str)> = None;
  for (index, scene) in state.document.scenes.iter().enumerate() {
    let name = scene["name"].as_str().unwrap_or("");
    match best {
      Some((_, best_name)) if best_name <= name => {},
      _ => best = Some((index as u32, name)),
    }
  }
  state.document.scene = best.map(|(index, _)| index);
}

/// Wrap the root nodes of every scene in a synthetic node carrying the
/// global transform.
fn wrap_scene_roots(state: &mut HalaExportState) {
  let matrix: Vec<f64> = state
    .settings
    .nodes_global_matrix
    .to_cols_array()
    .iter()
    .map(|v| *v as f64)
    .collect();
  for scene in state.document.scenes.iter_mut() {
    let name = scene["name"].as_str().unwrap_or("scene").to_string();
    let children = scene["nodes"].take();
    let wrapper = state.document.nodes.len() as u32;
    state.document.nodes.push(json!({
      "name": format!("{}_root", name),
      "children": children,
      "matrix": matrix,
    }));
    scene["nodes"] = json!([wrapper]);
  }
}

/// Fill the unset technique parameter values from the GL defaults.
fn fill_technique_defaults(state: &mut HalaExportState) -> Result<(), HalaGltfError> {
  for technique in state.document.techniques.iter_mut() {
    let name = technique["name"].as_str().unwrap_or("").to_string();
    let Some(parameters) = technique["parameters"].as_object_mut() else {
      continue;
    };
    for (parameter_name, parameter) in parameters.iter_mut() {
      if parameter.get("value") != Some(&Value::Null) {
        continue;
      }
      let gl_type = parameter["type"].as_u64().unwrap_or(0);
      let value = default_value_for_gl_type(gl_type).ok_or_else(|| {
        HalaGltfError::new(
          &format!(
            "Technique \"{}\" parameter \"{}\" has unknown GL type {}.",
            name, parameter_name, gl_type
          ),
          None,
        )
      })?;
      parameter["value"] = value;
    }
  }
  Ok(())
}

/// Drop the staged light records when no processor claimed them.
fn drop_unclaimed_lights(state: &mut HalaExportState) {
  if state.document.extensions_used.iter().any(|n| n == "KHR_lights_punctual") {
    return;
  }
  if !state.document.lights.is_empty() {
    log::warn!(
      "Dropping {} light(s): KHR_lights_punctual is not enabled.",
      state.document.lights.len()
    );
    state.document.lights.clear();
  }
  for node in state.document.nodes.iter_mut() {
    if let Some(node) = node.as_object_mut() {
      node.remove("light");
    }
  }
}

/// Finalize the converted document: pick the default scene, apply the
/// global transform, fill technique defaults and drop unclaimed lights.
/// param state: The export state.
pub fn assemble(state: &mut HalaExportState) -> Result<(), HalaGltfError> {
  pick_default_scene(state);
  if state.settings.nodes_global_matrix != glam::Mat4::IDENTITY {
    wrap_scene_roots(state);
  }
  fill_technique_defaults(state)?;
  drop_unclaimed_lights(state);
  Ok(())
}

#[cfg(test)]
mod tests {
  use glam::Mat4;

  use super::*;
  use crate::scene::HalaExportData;
  use crate::settings::HalaExportSettings;

  #[test]
  fn test_default_scene_sorts_by_name() {
    let data = HalaExportData::new();
    let mut state = HalaExportState::new(&data, HalaExportSettings::default());
    state.document.scenes.push(json!({ "name": "Zulu", "nodes": [] }));
    state.document.scenes.push(json!({ "name": "Alpha", "nodes": [] }));

    assemble(&mut state).unwrap();
    assert_eq!(state.document.scene, Some(1));
  }

  #[test]
  fn test_global_matrix_wraps_roots() {
    let data = HalaExportData::new();
    let settings = HalaExportSettings {
      nodes_global_matrix: Mat4::from_scale(glam::Vec3::splat(2.0)),
      ..Default::default()
    };
    let mut state = HalaExportState::new(&data, settings);
    state.document.nodes.push(json!({ "name": "Cube" }));
    state.document.scenes.push(json!({ "name": "Scene", "nodes": [0] }));

    assemble(&mut state).unwrap();

    assert_eq!(state.document.nodes.len(), 2);
    let wrapper = &state.document.nodes[1];
    assert_eq!(wrapper["name"], "Scene_root");
    assert_eq!(wrapper["children"], json!([0]));
    assert_eq!(wrapper["matrix"][0], 2.0);
    assert_eq!(state.document.scenes[0]["nodes"], json!([1]));
  }

  #[test]
  fn test_identity_matrix_adds_no_wrapper() {
    let data = HalaExportData::new();
    let mut state = HalaExportState::new(&data, HalaExportSettings::default());
    state.document.nodes.push(json!({ "name": "Cube" }));
    state.document.scenes.push(json!({ "name": "Scene", "nodes": [0] }));

    assemble(&mut state).unwrap();
    assert_eq!(state.document.nodes.len(), 1);
    assert_eq!(state.document.scenes[0]["nodes"], json!([0]));
  }

  #[test]
  fn test_technique_defaults_are_filled() {
    let data = HalaExportData::new();
    let mut state = HalaExportState::new(&data, HalaExportSettings::default());
    state.document.techniques.push(json!({
      "name": "t",
      "parameters": {
        "diffuse": { "type": 35666, "value": null },
        "shininess": { "type": 5126, "value": null },
        "position": { "semantic": "POSITION", "type": 35665 },
      },
    }));

    assemble(&mut state).unwrap();
    let parameters = &state.document.techniques[0]["parameters"];
    assert_eq!(parameters["diffuse"]["value"], json!([1.0, 1.0, 1.0, 1.0]));
    assert_eq!(parameters["shininess"]["value"], 1.0);
    assert!(parameters["position"].get("value").is_none());
  }

  #[test]
  fn test_unknown_gl_type_fails() {
    let data = HalaExportData::new();
    let mut state = HalaExportState::new(&data, HalaExportSettings::default());
    state.document.techniques.push(json!({
      "name": "t",
      "parameters": { "weird": { "type": 1234, "value": null } },
    }));
    assert!(assemble(&mut state).is_err());
  }

  #[test]
  fn test_unclaimed_lights_are_dropped() {
    let data = HalaExportData::new();
    let mut state = HalaExportState::new(&data, HalaExportSettings::default());
    state.document.lights.push(json!({ "name": "Lamp" }));
    state.document.nodes.push(json!({ "name": "Lamp", "light": 0 }));

    assemble(&mut state).unwrap();
    assert!(state.document.lights.is_empty());
    assert!(state.document.nodes[0].get("light").is_none());
  }
}
