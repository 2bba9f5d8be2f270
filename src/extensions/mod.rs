pub mod lights_punctual;
pub mod materials_unlit;
pub mod technique_webgl;

pub use lights_punctual::HalaLightsPunctual;
pub use materials_unlit::HalaMaterialsUnlit;
pub use technique_webgl::HalaTechniqueWebgl;

use crate::error::HalaGltfError;
use crate::exporter::document::HalaDocument;
use crate::exporter::HalaExportState;
use crate::scene::HalaExportData;
use crate::settings::{
  HalaExportSettings,
  HalaGltfVersion,
};

/// An extension processor rewrites document records after conversion and
/// before assembly. Processors run in the order they are registered.
pub trait HalaExtensionProcessor {
  /// Get the extension name as it appears in extensionsUsed.
  /// return: The extension name.
  fn name(&self) -> &'static str;

  /// Check whether the extension applies to the target version.
  /// param version: The target glTF version.
  /// return: True if the processor should run.
  fn enabled(&self, version: HalaGltfVersion) -> bool;

  /// Rewrite document records in place.
  /// param data: The host entities, for values conversion dropped.
  /// param document: The document under construction.
  /// param settings: The normalized export settings.
  fn process(
    &self,
    data: &HalaExportData,
    document: &mut HalaDocument,
    settings: &HalaExportSettings,
  ) -> Result<(), HalaGltfError>;
}

/// Run the registered extension processors over the converted document.
/// A glTF 1.0 export always gets the legacy technique processor, since a
/// 1.0 document without techniques does not validate.
/// param state: The export state.
pub fn run_pipeline(state: &mut HalaExportState) -> Result<(), HalaGltfError> {
  let version = state.version();
  let mut processors = std::mem::take(&mut state.settings.extensions);
  if version < HalaGltfVersion::V2_0
    && !processors.iter().any(|p| p.name() == HalaTechniqueWebgl.name())
  {
    processors.push(Box::new(HalaTechniqueWebgl));
  }

  for processor in processors.iter() {
    if !processor.enabled(version) {
      log::debug!("Skipping extension \"{}\".", processor.name());
      continue;
    }
    log::debug!("Running extension \"{}\".", processor.name());
    processor.process(state.data, &mut state.document, &state.settings)?;
  }

  state.settings.extensions = processors;
  Ok(())
}
