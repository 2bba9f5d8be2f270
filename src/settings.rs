use std::path::PathBuf;

use glam::Mat4;

use crate::extensions::HalaExtensionProcessor;

/// The target glTF version of the export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HalaGltfVersion {
  V1_0,
  V2_0,
}

/// The implementation of the glTF version.
impl HalaGltfVersion {
  /// Get the asset version string.
  /// return: The version string.
  pub fn as_str(&self) -> &'static str {
    match self {
      HalaGltfVersion::V1_0 => "1.0",
      HalaGltfVersion::V2_0 => "2.0",
    }
  }
}

/// The shader profile of a glTF 1.0 export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalaShaderProfile {
  /// WebGL 1.0 shaders (version 100).
  Web,
  /// OpenGL 3.0 shaders (version 130).
  Desktop,
}

/// How image data is stored in the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalaImageStorage {
  /// Embed image data into the glTF file as a data URI.
  Embed,
  /// Reference the host file path unchanged.
  Reference,
  /// Copy images to the output directory and reference them relatively.
  Copy,
}

/// Which actions are exported per entity category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalaAnimExport {
  /// Export the active action per object only.
  Active,
  /// Export all actions that can be used by an object.
  Eligible,
}

/// The flat settings record of one export call.
pub struct HalaExportSettings {
  pub gltf_output_dir: PathBuf,
  pub gltf_name: String,
  pub gltf_export_binary: bool,
  pub pretty_print: bool,

  pub buffers_embed_data: bool,
  pub buffers_combine_data: bool,

  pub meshes_apply_modifiers: bool,
  pub meshes_interleave_vertex_data: bool,

  pub images_data_storage: HalaImageStorage,

  pub asset_version: HalaGltfVersion,
  pub asset_profile: HalaShaderProfile,

  pub animations_object_export: HalaAnimExport,
  pub animations_armature_export: HalaAnimExport,
  /// A fixed sample timestep in seconds. None samples at the scene frame rate.
  pub animations_sample_rate: Option<f32>,

  /// Filters already applied upstream, passed through for converters.
  pub nodes_export_hidden: bool,
  pub nodes_selected_only: bool,

  /// A global transform applied once at a synthetic root node per scene.
  pub nodes_global_matrix: Mat4,

  /// The enabled extension processors, in pipeline order.
  pub extensions: Vec<Box<dyn HalaExtensionProcessor>>,
}

/// The default implementation of the export settings.
impl Default for HalaExportSettings {
  fn default() -> Self {
    Self {
      gltf_output_dir: PathBuf::new(),
      gltf_name: "scene".to_string(),
      gltf_export_binary: false,
      pretty_print: true,
      buffers_embed_data: false,
      buffers_combine_data: true,
      meshes_apply_modifiers: true,
      meshes_interleave_vertex_data: false,
      images_data_storage: HalaImageStorage::Copy,
      asset_version: HalaGltfVersion::V2_0,
      asset_profile: HalaShaderProfile::Web,
      animations_object_export: HalaAnimExport::Active,
      animations_armature_export: HalaAnimExport::Eligible,
      animations_sample_rate: None,
      nodes_export_hidden: false,
      nodes_selected_only: false,
      nodes_global_matrix: Mat4::IDENTITY,
      extensions: Vec::new(),
    }
  }
}

/// The implementation of the export settings.
impl HalaExportSettings {
  /// Resolve configuration conflicts before conversion begins.
  /// Binary export with embedded buffers always combines them, since a GLB
  /// container holds exactly one binary chunk.
  pub fn normalize(&mut self) {
    if self.gltf_export_binary && self.buffers_embed_data && !self.buffers_combine_data {
      log::warn!("Binary export with embedded buffers forces combined buffers.");
      self.buffers_combine_data = true;
    }
    if self.gltf_export_binary && !self.buffers_combine_data {
      self.buffers_combine_data = true;
    }
  }

  /// Get the output file path, rewriting a stale extension instead of
  /// appending a second one.
  /// return: The output path.
  pub fn output_path(&self) -> PathBuf {
    let mut name = self.gltf_name.clone();
    if let Some(stripped) = name.strip_suffix(".gltf").or_else(|| name.strip_suffix(".glb")) {
      name = stripped.to_string();
    }
    let extension = if self.gltf_export_binary { "glb" } else { "gltf" };
    self.gltf_output_dir.join(format!("{}.{}", name, extension))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_binary_forces_combined_buffers() {
    let mut settings = HalaExportSettings {
      gltf_export_binary: true,
      buffers_embed_data: true,
      buffers_combine_data: false,
      ..Default::default()
    };
    settings.normalize();
    assert!(settings.buffers_combine_data);
  }

  #[test]
  fn test_output_path_rewrites_extension() {
    let settings = HalaExportSettings {
      gltf_output_dir: PathBuf::from("/tmp/out"),
      gltf_name: "model.gltf".to_string(),
      gltf_export_binary: true,
      ..Default::default()
    };
    assert_eq!(settings.output_path(), PathBuf::from("/tmp/out/model.glb"));

    let settings = HalaExportSettings {
      gltf_output_dir: PathBuf::from("/tmp/out"),
      gltf_name: "model.glb".to_string(),
      gltf_export_binary: false,
      ..Default::default()
    };
    assert_eq!(settings.output_path(), PathBuf::from("/tmp/out/model.gltf"));
  }

  #[test]
  fn test_output_path_plain_name() {
    let settings = HalaExportSettings {
      gltf_output_dir: PathBuf::from("/tmp/out"),
      gltf_name: "model".to_string(),
      ..Default::default()
    };
    assert_eq!(settings.output_path(), PathBuf::from("/tmp/out/model.gltf"));
  }
}
