use glam::{
  Mat4,
  Quat,
  Vec3,
};

/// An object is a node in the host scene hierarchy.
pub struct HalaObject {
  pub name: String,
  pub parent: Option<u32>,
  pub children: Vec<u32>,

  /// The local TRS transform, used when `matrix` is None.
  pub translation: Vec3,
  pub rotation: Quat,
  pub scale: Vec3,
  /// An explicit local matrix. Mutually exclusive with TRS in the output.
  pub matrix: Option<Mat4>,

  pub mesh_index: u32,
  /// The host-evaluated "modifiers applied" variant of the mesh.
  pub modified_mesh_index: u32,
  pub camera_index: u32,
  pub light_index: u32,
  pub skin_index: u32,
  pub active_action_index: u32,

  pub hidden: bool,
  pub selected: bool,

  pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The default implementation of the object.
impl Default for HalaObject {
  fn default() -> Self {
    Self {
      name: String::new(),
      parent: None,
      children: Vec::new(),
      translation: Vec3::ZERO,
      rotation: Quat::IDENTITY,
      scale: Vec3::ONE,
      matrix: None,
      mesh_index: u32::MAX,
      modified_mesh_index: u32::MAX,
      camera_index: u32::MAX,
      light_index: u32::MAX,
      skin_index: u32::MAX,
      active_action_index: u32::MAX,
      hidden: false,
      selected: false,
      extras: None,
    }
  }
}

/// The implementation of the object.
impl HalaObject {
  /// Create a new object with the given name.
  /// param name: The name of the object.
  /// return: The object.
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      ..Default::default()
    }
  }

  /// Check if the object is an armature root (it owns a skin).
  /// return: True if the object owns a skin, false otherwise.
  pub fn is_armature(&self) -> bool {
    self.skin_index != u32::MAX
  }
}
