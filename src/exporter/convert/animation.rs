use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use crate::scene::{
  HalaAction,
  HalaActionTarget,
  HalaAnimPath,
  HalaObject,
};
use crate::settings::HalaAnimExport;
use super::super::accessor::{
  compute_bounds,
  f32_bytes,
  HalaComponentType,
  HalaElementType,
};
use super::super::buffer::HalaBufferTarget;
use super::super::resolver::HalaAccessorRole;
use super::super::HalaExportState;

/// Bake the sample frames of an action, one per host frame. The end frame
/// is always included so the clip covers its full range.
/// param action: The action.
/// return: The frame numbers to sample at.
fn bake_frames(action: &HalaAction) -> Vec<f32> {
  let mut frames = Vec::new();
  let mut frame = action.frame_start;
  while frame < action.frame_end {
    frames.push(frame);
    frame += 1.0;
  }
  frames.push(action.frame_end);
  frames
}

/// Export one action of one node as an animation record.
/// param state: The export state.
/// param object: The animated object.
/// param node_index: The node output index of the object.
/// param action: The action.
/// return: The animation record, or None if no curve produced samples.
fn export_action(
  state: &mut HalaExportState,
  object: &HalaObject,
  node_index: u32,
  action: &HalaAction,
) -> Result<Option<Value>, HalaGltfError> {
  let frames = bake_frames(action);
  let times: Vec<f32> = frames
    .iter()
    .map(|frame| (frame - action.frame_start) * state.animation_dt)
    .collect();

  let mut samplers = Vec::new();
  let mut channels = Vec::new();
  for curve in action.curves.iter() {
    let mut values: Vec<f32> = Vec::new();
    let mut width = curve.path.component_count();
    let mut complete = true;
    for frame in frames.iter() {
      match curve.evaluate(*frame) {
        Some(value) => {
          if width == 0 {
            width = value.len();
          }
          values.extend_from_slice(&value);
        },
        None => {
          complete = false;
          break;
        },
      }
    }
    if !complete || values.is_empty() {
      continue;
    }

    let input = state.push_payload(
      HalaAccessorRole::AnimTime,
      "animations",
      &f32_bytes(&times),
      HalaBufferTarget::NONE,
      HalaComponentType::FLOAT,
      HalaElementType::Scalar,
      times.len(),
      false,
      compute_bounds(&times, 1),
    )?;

    let (element_type, count) = match curve.path {
      HalaAnimPath::Translation | HalaAnimPath::Scale => (HalaElementType::Vec3, frames.len()),
      HalaAnimPath::Rotation => (HalaElementType::Vec4, frames.len()),
      HalaAnimPath::Weights => (HalaElementType::Scalar, frames.len() * width),
    };
    let output = state.push_payload(
      HalaAccessorRole::AnimValue,
      "animations",
      &f32_bytes(&values),
      HalaBufferTarget::NONE,
      HalaComponentType::FLOAT,
      element_type,
      count,
      false,
      None,
    )?;

    let sampler_index = samplers.len();
    samplers.push(json!({
      "input": input,
      "interpolation": "LINEAR",
      "output": output,
    }));
    channels.push(json!({
      "sampler": sampler_index,
      "target": {
        "node": node_index,
        "path": curve.path.path_name(),
      },
    }));
  }

  if channels.is_empty() {
    return Ok(None);
  }
  Ok(Some(json!({
    "name": format!("{}_{}", object.name, action.name),
    "channels": channels,
    "samplers": samplers,
  })))
}

/// Export the animations of one object, honoring the per-category policy.
/// param state: The export state.
/// param object: The object.
/// param node_index: The node output index of the object.
pub fn export_object_animations(
  state: &mut HalaExportState,
  object: &HalaObject,
  node_index: u32,
) -> Result<(), HalaGltfError> {
  let data = state.data;
  let target = if object.is_armature() {
    HalaActionTarget::ARMATURE
  } else {
    HalaActionTarget::OBJECT
  };
  let policy = if object.is_armature() {
    state.settings.animations_armature_export
  } else {
    state.settings.animations_object_export
  };

  let action_indices: Vec<usize> = match policy {
    HalaAnimExport::Active => {
      if object.active_action_index == u32::MAX {
        return Ok(());
      }
      vec![object.active_action_index as usize]
    },
    HalaAnimExport::Eligible => data
      .actions
      .iter()
      .enumerate()
      .filter(|(_, action)| action.target == target)
      .map(|(index, _)| index)
      .collect(),
  };

  for action_index in action_indices {
    let action = data.actions.get(action_index).ok_or_else(|| {
      HalaGltfError::new(
        &format!(
          "\"{}\" references action {} which is not part of the export.",
          object.name, action_index
        ),
        None,
      )
    })?;
    log::debug!("Exporting action \"{}\" of object \"{}\".", action.name, object.name);
    if let Some(record) = export_action(state, object, node_index, action)? {
      state.document.animations.push(record);
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::scene::{HalaCurve, HalaExportData, HalaSceneDesc};
  use crate::settings::HalaExportSettings;

  fn slide_action() -> HalaAction {
    HalaAction {
      name: "Slide".to_string(),
      target: HalaActionTarget::OBJECT,
      frame_start: 1.0,
      frame_end: 3.0,
      curves: vec![HalaCurve {
        path: HalaAnimPath::Translation,
        keyframes: vec![
          (1.0, vec![0.0, 0.0, 0.0]),
          (3.0, vec![2.0, 0.0, 0.0]),
        ],
      }],
      extras: None,
    }
  }

  fn data_with_action() -> HalaExportData {
    let mut data = HalaExportData::new();
    data.scenes.push(HalaSceneDesc {
      name: "Scene".to_string(),
      frames_per_second: 25.0,
      ..Default::default()
    });
    data.actions.push(slide_action());
    let mut object = HalaObject::new("Cube");
    object.active_action_index = 0;
    data.objects.push(object);
    data
  }

  #[test]
  fn test_active_action_is_baked() {
    let data = data_with_action();
    let mut state = HalaExportState::new(&data, HalaExportSettings::default());
    export_object_animations(&mut state, &data.objects[0], 0).unwrap();

    assert_eq!(state.document.animations.len(), 1);
    let animation = &state.document.animations[0];
    assert_eq!(animation["name"], "Cube_Slide");
    assert_eq!(animation["channels"][0]["target"]["path"], "translation");
    assert_eq!(animation["channels"][0]["target"]["node"], 0);
    assert_eq!(animation["samplers"][0]["interpolation"], "LINEAR");

    // Three baked frames at 25 fps: the time accessor ends at 2/25 s.
    let input = animation["samplers"][0]["input"].as_u64().unwrap() as usize;
    let accessor = &state.document.accessors[input];
    assert_eq!(accessor["count"], 3);
    assert!((accessor["max"][0].as_f64().unwrap() - 0.08).abs() < 1e-6);
  }

  #[test]
  fn test_no_active_action_exports_nothing() {
    let mut data = data_with_action();
    data.objects[0].active_action_index = u32::MAX;
    let mut state = HalaExportState::new(&data, HalaExportSettings::default());
    export_object_animations(&mut state, &data.objects[0], 0).unwrap();
    assert!(state.document.animations.is_empty());
  }

  #[test]
  fn test_eligible_policy_filters_by_target() {
    let mut data = data_with_action();
    data.actions.push(HalaAction {
      name: "Pose".to_string(),
      target: HalaActionTarget::ARMATURE,
      frame_start: 1.0,
      frame_end: 2.0,
      curves: Vec::new(),
      extras: None,
    });
    let settings = HalaExportSettings {
      animations_object_export: HalaAnimExport::Eligible,
      ..Default::default()
    };
    let mut state = HalaExportState::new(&data, settings);
    export_object_animations(&mut state, &data.objects[0], 0).unwrap();

    // Only the object action is eligible; the armature action is skipped.
    assert_eq!(state.document.animations.len(), 1);
    assert_eq!(state.document.animations[0]["name"], "Cube_Slide");
  }

  #[test]
  fn test_fixed_sample_rate_overrides_fps() {
    let data = data_with_action();
    let settings = HalaExportSettings {
      animations_sample_rate: Some(0.5),
      ..Default::default()
    };
    let mut state = HalaExportState::new(&data, settings);
    export_object_animations(&mut state, &data.objects[0], 0).unwrap();

    let animation = &state.document.animations[0];
    let input = animation["samplers"][0]["input"].as_u64().unwrap() as usize;
    let accessor = &state.document.accessors[input];
    assert!((accessor["max"][0].as_f64().unwrap() - 1.0).abs() < 1e-6);
  }
}
