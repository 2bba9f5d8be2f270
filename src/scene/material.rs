/// A texture binding of a material: the texture and the UV set it samples.
#[derive(Clone, Copy)]
pub struct HalaTextureBinding {
  pub texture_index: u32,
  pub tex_coord: u32,
}

/// A PBR metallic-roughness material.
pub struct HalaMaterial {
  pub name: String,
  pub base_color_factor: [f32; 4],
  pub metallic_factor: f32,
  pub roughness_factor: f32,
  pub emissive_factor: [f32; 3],
  pub double_sided: bool,

  pub base_color_texture: Option<HalaTextureBinding>,
  pub metallic_roughness_texture: Option<HalaTextureBinding>,
  pub normal_texture: Option<HalaTextureBinding>,
  pub occlusion_texture: Option<HalaTextureBinding>,
  pub emissive_texture: Option<HalaTextureBinding>,

  pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}

/// The default implementation of the material.
impl Default for HalaMaterial {
  fn default() -> Self {
    Self {
      name: String::new(),
      base_color_factor: [0.8, 0.8, 0.8, 1.0],
      metallic_factor: 0.0,
      roughness_factor: 0.5,
      emissive_factor: [0.0, 0.0, 0.0],
      double_sided: false,
      base_color_texture: None,
      metallic_roughness_texture: None,
      normal_texture: None,
      occlusion_texture: None,
      emissive_texture: None,
      extras: None,
    }
  }
}

/// The implementation of the material.
impl HalaMaterial {
  /// Create a new material with the given name.
  /// param name: The name of the material.
  /// return: The material.
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      ..Default::default()
    }
  }
}
