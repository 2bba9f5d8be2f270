use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use crate::exporter::document::HalaDocument;
use crate::scene::HalaExportData;
use crate::settings::{
  HalaExportSettings,
  HalaGltfVersion,
};
use super::HalaExtensionProcessor;

/// The KHR_materials_unlit processor marks materials whose host metadata
/// flags them as unlit (an `unlit` extras property set to true).
pub struct HalaMaterialsUnlit;

impl HalaExtensionProcessor for HalaMaterialsUnlit {
  fn name(&self) -> &'static str {
    "KHR_materials_unlit"
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
    let mut used = false;
    for material in document.materials.iter_mut() {
      if material["extras"]["unlit"] != Value::Bool(true) {
        continue;
      }
      material["extensions"]["KHR_materials_unlit"] = json!({});
      used = true;
    }
    if used {
      document.use_extension(self.name());
    }
    Ok(())
  }
}
