pub use crate::error::HalaGltfError;
pub use crate::settings::{
  HalaAnimExport,
  HalaExportSettings,
  HalaGltfVersion,
  HalaImageStorage,
  HalaShaderProfile,
};
pub use crate::scene::{
  HalaAction,
  HalaActionTarget,
  HalaAnimPath,
  HalaCamera,
  HalaCurve,
  HalaExportData,
  HalaImageData,
  HalaLight,
  HalaLightType,
  HalaMaterial,
  HalaMesh,
  HalaObject,
  HalaPrimitive,
  HalaProjection,
  HalaSceneDesc,
  HalaShapeKey,
  HalaSkin,
  HalaTexture,
  HalaTextureBinding,
  HalaTextureFilter,
  HalaWrapMode,
};
pub use crate::exporter::{
  HalaAuxFile,
  HalaExportOutput,
  HalaGltfExporter,
};
pub use crate::extensions::{
  HalaExtensionProcessor,
  HalaLightsPunctual,
  HalaMaterialsUnlit,
  HalaTechniqueWebgl,
};
