use glam::Mat4;

/// A skin binds a mesh to the joints of an armature.
pub struct HalaSkin {
  pub name: String,
  /// The joint object indices, in bind order.
  pub joints: Vec<u32>,
  /// One inverse bind matrix per joint, in joint order.
  pub inverse_bind_matrices: Vec<Mat4>,
  /// The object index of the skeleton root, if any.
  pub skeleton_root: Option<u32>,
  pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}
