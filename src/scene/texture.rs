/// The wrap mode of a texture, as a GL enum value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalaWrapMode(u32);
impl HalaWrapMode {
  pub const CLAMP_TO_EDGE: Self = Self(33071);
  pub const MIRRORED_REPEAT: Self = Self(33648);
  pub const REPEAT: Self = Self(10497);

  pub fn to_u32(&self) -> u32 {
    self.0
  }
}

/// The filter of a texture, as a GL enum value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalaTextureFilter(u32);
impl HalaTextureFilter {
  pub const NEAREST: Self = Self(9728);
  pub const LINEAR: Self = Self(9729);
  pub const LINEAR_MIPMAP_LINEAR: Self = Self(9987);

  pub fn to_u32(&self) -> u32 {
    self.0
  }
}

/// A texture binds an image to sampling parameters.
pub struct HalaTexture {
  pub name: String,
  pub image_index: u32,
  pub wrap_s: HalaWrapMode,
  pub wrap_t: HalaWrapMode,
  pub mag_filter: HalaTextureFilter,
  pub min_filter: HalaTextureFilter,
  pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The implementation of the texture.
impl HalaTexture {
  /// Create a new texture with default repeat/linear sampling.
  /// param name: The name of the texture.
  /// param image_index: The index of the image.
  /// return: The texture.
  pub fn new(name: &str, image_index: u32) -> Self {
    Self {
      name: name.to_string(),
      image_index,
      wrap_s: HalaWrapMode::REPEAT,
      wrap_t: HalaWrapMode::REPEAT,
      mag_filter: HalaTextureFilter::LINEAR,
      min_filter: HalaTextureFilter::LINEAR_MIPMAP_LINEAR,
      extras: None,
    }
  }
}
