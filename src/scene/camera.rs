/// The projection of a camera.
pub enum HalaProjection {
  /// A perspective projection described by the two field-of-view angles.
  Perspective {
    angle_x: f32,
    angle_y: f32,
  },
  /// An orthographic projection described by the view extent.
  Orthographic {
    ortho_scale: f32,
  },
}

/// A camera in the host scene.
pub struct HalaCamera {
  pub name: String,
  pub projection: HalaProjection,
  pub clip_start: f32,
  pub clip_end: f32,
  pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The implementation of the camera.
impl HalaCamera {
  /// Create a new perspective camera.
  /// param name: The name of the camera.
  /// param angle_x: The horizontal field of view in radians.
  /// param angle_y: The vertical field of view in radians.
  /// param clip_start: The near clip distance.
  /// param clip_end: The far clip distance.
  /// return: The camera.
  pub fn new_perspective(name: &str, angle_x: f32, angle_y: f32, clip_start: f32, clip_end: f32) -> Self {
    Self {
      name: name.to_string(),
      projection: HalaProjection::Perspective { angle_x, angle_y },
      clip_start,
      clip_end,
      extras: None,
    }
  }

  /// Create a new orthographic camera.
  /// param name: The name of the camera.
  /// param ortho_scale: The orthographic view extent.
  /// param clip_start: The near clip distance.
  /// param clip_end: The far clip distance.
  /// return: The camera.
  pub fn new_orthographic(name: &str, ortho_scale: f32, clip_start: f32, clip_end: f32) -> Self {
    Self {
      name: name.to_string(),
      projection: HalaProjection::Orthographic { ortho_scale },
      clip_start,
      clip_end,
      extras: None,
    }
  }
}
