pub mod buffer;
pub mod accessor;
pub mod resolver;
pub mod document;
pub mod convert;
pub mod assembler;
pub mod writer;

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::json;

use crate::error::HalaGltfError;
use crate::scene::HalaExportData;
use crate::settings::{
  HalaExportSettings,
  HalaGltfVersion,
};
use accessor::{
  HalaComponentType,
  HalaElementType,
};
use buffer::{
  HalaBufferPacker,
  HalaBufferTarget,
};
use document::HalaDocument;
use resolver::{
  HalaAccessorRole,
  HalaEntityKind,
  HalaFingerprint,
  HalaReferenceResolver,
};

/// A file to be written next to the document, produced during conversion
/// and persisted by the writer only after assembly succeeds.
#[derive(Debug)]
pub enum HalaAuxFile {
  /// Raw bytes written under the given file name.
  Bytes { name: String, data: Vec<u8> },
  /// A host file copied under the given file name.
  Copy { name: String, source: PathBuf },
}

/// The state of one export call. Created per call, never shared.
pub struct HalaExportState<'a> {
  pub data: &'a HalaExportData,
  pub settings: HalaExportSettings,
  /// Seconds per animation sample.
  pub animation_dt: f32,
  pub packer: HalaBufferPacker,
  pub resolver: HalaReferenceResolver,
  pub document: HalaDocument,
  /// Sampler dedup keyed by (wrap_s, wrap_t, mag_filter, min_filter).
  pub samplers: HashMap<(u32, u32, u32, u32), u32>,
  pub files: Vec<HalaAuxFile>,
}

/// The implementation of the export state.
impl<'a> HalaExportState<'a> {
  /// Create the state of one export call.
  /// param data: The host entities to export.
  /// param settings: The normalized settings.
  /// return: The state.
  pub fn new(data: &'a HalaExportData, settings: HalaExportSettings) -> Self {
    let fps = data
      .scenes
      .first()
      .map(|scene| scene.frames_per_second)
      .unwrap_or(24.0);
    let animation_dt = settings.animations_sample_rate.unwrap_or(1.0 / fps);
    let packer = HalaBufferPacker::new(settings.buffers_combine_data, &settings.gltf_name);
    Self {
      data,
      settings,
      animation_dt,
      packer,
      resolver: HalaReferenceResolver::new(),
      document: HalaDocument::new(),
      samplers: HashMap::new(),
      files: Vec::new(),
    }
  }

  /// Push a buffer view record for the given view.
  /// param view: The view descriptor.
  /// return: The buffer view output index.
  pub fn push_view(&mut self, view: &buffer::HalaBufferView) -> u32 {
    let mut record = json!({
      "buffer": view.buffer,
      "byteOffset": view.byte_offset,
      "byteLength": view.byte_length,
    });
    if view.byte_stride > 0 {
      record["byteStride"] = json!(view.byte_stride);
    }
    if view.target != HalaBufferTarget::NONE {
      record["target"] = json!(view.target.to_u32());
    }
    let index = self.document.buffer_views.len() as u32;
    self.document.buffer_views.push(record);
    index
  }

  /// Pack a payload and emit its buffer view and accessor, deduplicating
  /// byte-identical payloads of the same semantic role.
  /// param role: The semantic role of the payload.
  /// param stream: The logical stream name.
  /// param bytes: The payload bytes.
  /// param target: The GL target of the view.
  /// param component_type: The accessor component type.
  /// param element_type: The accessor element type.
  /// param count: The element count.
  /// param normalized: Whether integer components are normalized.
  /// param bounds: Optional per-component (min, max) bounds.
  /// return: The accessor output index.
  #[allow(clippy::too_many_arguments)]
  pub fn push_payload(
    &mut self,
    role: HalaAccessorRole,
    stream: &str,
    bytes: &[u8],
    target: HalaBufferTarget,
    component_type: HalaComponentType,
    element_type: HalaElementType,
    count: usize,
    normalized: bool,
    bounds: Option<(Vec<f64>, Vec<f64>)>,
  ) -> Result<u32, HalaGltfError> {
    let fingerprint = HalaFingerprint::new(role, component_type, element_type, count, normalized, bytes);
    if let Some(index) = self.resolver.find_accessor(&fingerprint) {
      return Ok(index);
    }

    let stream = self.packer.stream(stream);
    let view = self
      .packer
      .append(stream, bytes, component_type.alignment(), 0, target);
    let view_index = self.push_view(&view);
    let record = accessor::make_accessor(
      &view,
      view_index,
      0,
      component_type,
      element_type,
      count,
      normalized,
      bounds,
    )?;
    let index = self.document.accessors.len() as u32;
    self.document.accessors.push(record);
    self.resolver.insert_accessor(fingerprint, index);
    Ok(index)
  }

  /// Resolve a host entity reference, failing with a structural error when
  /// the reference points outside the exported set.
  /// param kind: The entity kind.
  /// param input_index: The host entity index.
  /// param context: The name of the referencing entity, for diagnostics.
  /// return: The output index.
  pub fn require(
    &self,
    kind: HalaEntityKind,
    input_index: u32,
    context: &str,
  ) -> Result<u32, HalaGltfError> {
    self.resolver.resolve(kind, input_index).ok_or_else(|| {
      HalaGltfError::new(
        &format!(
          "\"{}\" references {:?} {} which is not part of the export.",
          context, kind, input_index
        ),
        None,
      )
    })
  }

  /// Get the target glTF version.
  /// return: The version.
  pub fn version(&self) -> HalaGltfVersion {
    self.settings.asset_version
  }
}

/// The glTF exporter entry point.
pub struct HalaGltfExporter;

/// The in-memory result of one export call.
#[derive(Debug)]
pub struct HalaExportOutput {
  /// The output file path derived from the settings.
  pub path: PathBuf,
  /// The document bytes (JSON text or GLB container).
  pub bytes: Vec<u8>,
  /// Sidecar files (external buffers, copied images).
  pub files: Vec<HalaAuxFile>,
}

/// The implementation of the exporter.
impl HalaGltfExporter {
  /// Convert the given host entities into a glTF asset in memory.
  /// param data: The already-filtered host entities.
  /// param settings: The export settings.
  /// return: The export output.
  pub fn build(
    data: &HalaExportData,
    mut settings: HalaExportSettings,
  ) -> Result<HalaExportOutput, HalaGltfError> {
    settings.normalize();
    let mut state = HalaExportState::new(data, settings);

    Self::run_converters(&mut state)?;
    crate::extensions::run_pipeline(&mut state)?;
    assembler::assemble(&mut state)?;
    writer::build(state)
  }

  /// Convert the given host entities and write the asset to disk.
  /// param data: The already-filtered host entities.
  /// param settings: The export settings.
  /// return: The path of the written document.
  pub fn export(
    data: &HalaExportData,
    settings: HalaExportSettings,
  ) -> Result<PathBuf, HalaGltfError> {
    let output = Self::build(data, settings)?;
    writer::write(&output)?;
    Ok(output.path.clone())
  }

  /// Run the per-entity converter passes in dependency order.
  /// param state: The export state.
  fn run_converters(state: &mut HalaExportState) -> Result<(), HalaGltfError> {
    let data = state.data;

    // Images, textures and materials first, since meshes reference them.
    for (index, image) in data.images.iter().enumerate() {
      let record = convert::image::export_image(state, image)?;
      let output = state.document.images.len() as u32;
      state.document.images.push(record);
      state.resolver.insert(HalaEntityKind::Image, index as u32, output);
    }
    for (index, texture) in data.textures.iter().enumerate() {
      let record = convert::texture::export_texture(state, texture)?;
      let output = state.document.textures.len() as u32;
      state.document.textures.push(record);
      state.resolver.insert(HalaEntityKind::Texture, index as u32, output);
    }
    for (index, material) in data.materials.iter().enumerate() {
      let record = convert::material::export_material(state, material)?;
      let output = state.document.materials.len() as u32;
      state.document.materials.push(record);
      state.resolver.insert(HalaEntityKind::Material, index as u32, output);
    }
    for (index, camera) in data.cameras.iter().enumerate() {
      let record = convert::camera::export_camera(state, camera)?;
      let output = state.document.cameras.len() as u32;
      state.document.cameras.push(record);
      state.resolver.insert(HalaEntityKind::Camera, index as u32, output);
    }
    for (index, light) in data.lights.iter().enumerate() {
      let record = convert::light::export_light(state, light)?;
      let output = state.document.lights.len() as u32;
      state.document.lights.push(record);
      state.resolver.insert(HalaEntityKind::Light, index as u32, output);
    }
    for (index, mesh) in data.meshes.iter().enumerate() {
      let record = convert::mesh::export_mesh(state, mesh)?;
      let output = state.document.meshes.len() as u32;
      state.document.meshes.push(record);
      state.resolver.insert(HalaEntityKind::Mesh, index as u32, output);
    }

    // Nodes keep the input order, so indices can be assigned up front and
    // children/joints resolve forward references.
    for index in 0..data.objects.len() {
      state
        .resolver
        .insert(HalaEntityKind::Object, index as u32, index as u32);
    }

    // Skins only need object indices, which are preassigned above, and
    // must be registered before the nodes that reference them.
    for (index, skin) in data.skins.iter().enumerate() {
      let record = convert::skin::export_skin(state, skin)?;
      let output = state.document.skins.len() as u32;
      state.document.skins.push(record);
      state.resolver.insert(HalaEntityKind::Skin, index as u32, output);
    }

    for object in data.objects.iter() {
      let record = convert::node::export_object(state, object)?;
      state.document.nodes.push(record);
    }

    for (index, object) in data.objects.iter().enumerate() {
      convert::animation::export_object_animations(state, object, index as u32)?;
    }

    for (index, scene) in data.scenes.iter().enumerate() {
      let record = convert::scene::export_scene(state, scene)?;
      let output = state.document.scenes.len() as u32;
      state.document.scenes.push(record);
      state.resolver.insert(HalaEntityKind::Scene, index as u32, output);
    }

    Ok(())
  }
}
