use serde_json::json;

use crate::error::HalaGltfError;
use crate::exporter::document::HalaDocument;
use crate::scene::HalaExportData;
use crate::settings::{
  HalaExportSettings,
  HalaGltfVersion,
};
use super::HalaExtensionProcessor;

/// The KHR_lights_punctual processor moves the staged light records into
/// the extension block and rewrites node light references accordingly.
pub struct HalaLightsPunctual;

impl HalaExtensionProcessor for HalaLightsPunctual {
  fn name(&self) -> &'static str {
    "KHR_lights_punctual"
  }

  fn enabled(&self, version: HalaGltfVersion) -> bool {
    version >= HalaGltfVersion::V2_0
  }

  fn process(
    &self,
    _data: &HalaExportData,
    document: &mut HalaDocument,
    _settings: &HalaExportSettings,
  ) -> Result<(), HalaGltfError> {
    if document.lights.is_empty() {
      return Ok(());
    }

    document.use_extension(self.name());
    let lights = std::mem::take(&mut document.lights);
    document
      .extensions
      .insert(self.name().to_string(), json!({ "lights": lights }));

    for node in document.nodes.iter_mut() {
      let Some(light) = node.as_object_mut().and_then(|n| n.remove("light")) else {
        continue;
      };
      node["extensions"]["KHR_lights_punctual"] = json!({ "light": light });
    }

    Ok(())
  }
}
