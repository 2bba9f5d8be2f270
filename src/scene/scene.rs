use super::animation::HalaAction;
use super::camera::HalaCamera;
use super::image_data::HalaImageData;
use super::light::HalaLight;
use super::material::HalaMaterial;
use super::mesh::HalaMesh;
use super::node::HalaObject;
use super::skin::HalaSkin;
use super::texture::HalaTexture;

/// A scene is a named set of root objects plus render metadata.
pub struct HalaSceneDesc {
  pub name: String,
  /// The root object indices of the scene.
  pub root_objects: Vec<u32>,
  /// The object index of the active camera, if any.
  pub active_camera: Option<u32>,
  pub background_color: [f32; 3],
  pub frames_per_second: f32,
  pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The default implementation of the scene.
impl Default for HalaSceneDesc {
  fn default() -> Self {
    Self {
      name: String::new(),
      root_objects: Vec::new(),
      active_camera: None,
      background_color: [0.0, 0.0, 0.0],
      frames_per_second: 24.0,
      extras: None,
    }
  }
}

/// The already-filtered host entities handed to one export call.
/// All cross references between entities are indices into these arrays.
#[derive(Default)]
pub struct HalaExportData {
  pub scenes: Vec<HalaSceneDesc>,
  pub objects: Vec<HalaObject>,
  pub meshes: Vec<HalaMesh>,
  pub materials: Vec<HalaMaterial>,
  pub cameras: Vec<HalaCamera>,
  pub lights: Vec<HalaLight>,
  pub images: Vec<HalaImageData>,
  pub textures: Vec<HalaTexture>,
  pub actions: Vec<HalaAction>,
  pub skins: Vec<HalaSkin>,
}

/// The implementation of the export data.
impl HalaExportData {
  /// Create a new empty export data record.
  /// return: The export data.
  pub fn new() -> Self {
    Self::default()
  }
}
