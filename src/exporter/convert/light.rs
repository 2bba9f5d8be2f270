use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use crate::scene::{
  HalaLight,
  HalaLightType,
};
use super::super::HalaExportState;
use super::apply_extras;

/// Export a light.
/// The record is staged in the document's light table; the punctual lights
/// processor relocates it into the extension block, or the assembler drops
/// it when the extension is not enabled.
/// param state: The export state.
/// param light: The light.
/// return: The staged light record.
pub fn export_light(_state: &HalaExportState, light: &HalaLight) -> Result<Value, HalaGltfError> {
  log::debug!("Exporting light \"{}\".", light.name);

  let mut record = json!({
    "name": light.name,
    "type": light.light_type.type_name(),
    "color": [light.color.x as f64, light.color.y as f64, light.color.z as f64],
    "intensity": light.intensity as f64,
  });
  if light.light_type == HalaLightType::SPOT {
    record["spot"] = json!({
      "innerConeAngle": light.cone_angles.0 as f64,
      "outerConeAngle": light.cone_angles.1 as f64,
    });
  }
  apply_extras(&mut record, &light.extras);

  Ok(record)
}
