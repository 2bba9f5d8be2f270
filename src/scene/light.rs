use glam::Vec3;

/// The type of the light.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalaLightType(u8);
impl HalaLightType {
  pub const POINT: Self = Self(0);
  pub const DIRECTIONAL: Self = Self(1);
  pub const SPOT: Self = Self(2);

  pub fn from_u8(value: u8) -> Self {
    match value {
      0 => Self::POINT,
      1 => Self::DIRECTIONAL,
      2 => Self::SPOT,
      _ => panic!("Invalid light type."),
    }
  }

  pub fn to_u8(&self) -> u8 {
    self.0
  }

  /// Get the KHR_lights_punctual type name.
  /// return: The type name.
  pub fn type_name(&self) -> &'static str {
    match self.0 {
      0 => "point",
      1 => "directional",
      2 => "spot",
      _ => unreachable!(),
    }
  }
}

/// A light source in the host scene.
pub struct HalaLight {
  pub name: String,
  pub color: Vec3,
  pub intensity: f32,
  pub light_type: HalaLightType,
  /// For spot light, the inner and outer cone angles in radians.
  pub cone_angles: (f32, f32),
  pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The default implementation of the light.
impl Default for HalaLight {
  fn default() -> Self {
    Self {
      name: String::new(),
      color: Vec3::ONE,
      intensity: 1.0,
      light_type: HalaLightType::POINT,
      cone_angles: (0.0, std::f32::consts::FRAC_PI_4),
      extras: None,
    }
  }
}
