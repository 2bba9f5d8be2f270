use glam::{
  Vec2,
  Vec3,
  Vec4,
};

/// A primitive is one drawable batch of a mesh bound to one material.
pub struct HalaPrimitive {
  pub indices: Vec<u32>,
  pub positions: Vec<Vec3>,
  pub normals: Vec<Vec3>,
  pub tex_coords: Vec<Vec<Vec2>>,
  pub colors: Vec<Vec4>,
  /// Per-vertex joint indices, present only for skinned meshes.
  pub joints: Vec<[u16; 4]>,
  /// Per-vertex joint weights, present only for skinned meshes.
  pub weights: Vec<[f32; 4]>,
  pub material_index: u32,
}

/// The default implementation of the primitive.
impl Default for HalaPrimitive {
  fn default() -> Self {
    Self {
      indices: Vec::new(),
      positions: Vec::new(),
      normals: Vec::new(),
      tex_coords: Vec::new(),
      colors: Vec::new(),
      joints: Vec::new(),
      weights: Vec::new(),
      material_index: u32::MAX,
    }
  }
}

/// The implementation of the primitive.
impl HalaPrimitive {
  /// Check if the primitive has normals.
  /// return: True if the primitive has normals, false otherwise.
  pub fn has_normals(&self) -> bool {
    !self.normals.is_empty()
  }

  /// Check if the primitive is skinned.
  /// return: True if the primitive has joints and weights, false otherwise.
  pub fn is_skinned(&self) -> bool {
    !self.joints.is_empty() && !self.weights.is_empty()
  }
}

/// A shape key is a morph target deforming the base mesh.
pub struct HalaShapeKey {
  pub name: String,
  /// Position deltas relative to the base mesh, one per vertex.
  pub position_deltas: Vec<Vec3>,
  /// Optional normal deltas, one per vertex.
  pub normal_deltas: Vec<Vec3>,
}

/// A mesh is a collection of primitives that define a 3D object.
pub struct HalaMesh {
  pub name: String,
  pub primitives: Vec<HalaPrimitive>,
  pub shape_keys: Vec<HalaShapeKey>,
  /// The current weight of each shape key.
  pub shape_key_weights: Vec<f32>,
  pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The implementation of the mesh.
impl HalaMesh {
  /// Create a new mesh with the given name.
  /// param name: The name of the mesh.
  /// return: The mesh.
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      primitives: Vec::new(),
      shape_keys: Vec::new(),
      shape_key_weights: Vec::new(),
      extras: None,
    }
  }
}
