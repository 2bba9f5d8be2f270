/// The kind of data-block an action animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalaActionTarget(u8);
impl HalaActionTarget {
  pub const OBJECT: Self = Self(0);
  pub const ARMATURE: Self = Self(1);

  pub fn from_u8(value: u8) -> Self {
    match value {
      0 => Self::OBJECT,
      1 => Self::ARMATURE,
      _ => panic!("Invalid action target."),
    }
  }

  pub fn to_u8(&self) -> u8 {
    self.0
  }
}

/// The animated property path of a curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalaAnimPath {
  Translation,
  Rotation,
  Scale,
  Weights,
}

/// The implementation of the animated property path.
impl HalaAnimPath {
  /// Get the glTF target path name.
  /// return: The path name.
  pub fn path_name(&self) -> &'static str {
    match self {
      HalaAnimPath::Translation => "translation",
      HalaAnimPath::Rotation => "rotation",
      HalaAnimPath::Scale => "scale",
      HalaAnimPath::Weights => "weights",
    }
  }

  /// Get the number of components of one keyframe value.
  /// return: The component count.
  pub fn component_count(&self) -> usize {
    match self {
      HalaAnimPath::Translation => 3,
      HalaAnimPath::Rotation => 4,
      HalaAnimPath::Scale => 3,
      // Weights curves carry one value per shape key, the host decides the width.
      HalaAnimPath::Weights => 0,
    }
  }
}

/// One keyframed curve of an action.
pub struct HalaCurve {
  pub path: HalaAnimPath,
  /// Keyframes as (frame, value) pairs, sorted by frame.
  /// The value width is fixed per path (3 for translation/scale, 4 for
  /// rotation, shape key count for weights).
  pub keyframes: Vec<(f32, Vec<f32>)>,
}

/// The implementation of the curve.
impl HalaCurve {
  /// Evaluate the curve at the given frame with linear interpolation.
  /// Frames outside the keyframe range clamp to the first/last value.
  /// param frame: The frame to evaluate at.
  /// return: The interpolated value, or None if the curve has no keyframes.
  pub fn evaluate(&self, frame: f32) -> Option<Vec<f32>> {
    let first = self.keyframes.first()?;
    let last = self.keyframes.last()?;
    if frame <= first.0 {
      return Some(first.1.clone());
    }
    if frame >= last.0 {
      return Some(last.1.clone());
    }
    let next = self.keyframes.iter().position(|(f, _)| *f >= frame)?;
    let (f1, v1) = &self.keyframes[next];
    let (f0, v0) = &self.keyframes[next - 1];
    let t = if (f1 - f0).abs() < f32::EPSILON { 0.0 } else { (frame - f0) / (f1 - f0) };
    Some(
      v0.iter()
        .zip(v1.iter())
        .map(|(a, b)| a + (b - a) * t)
        .collect(),
    )
  }
}

/// An action is a named set of curves animating one data-block.
pub struct HalaAction {
  pub name: String,
  pub target: HalaActionTarget,
  pub frame_start: f32,
  pub frame_end: f32,
  pub curves: Vec<HalaCurve>,
  pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}
