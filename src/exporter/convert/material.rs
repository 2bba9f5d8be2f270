use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use crate::scene::{
  HalaMaterial,
  HalaTextureBinding,
};
use crate::settings::HalaGltfVersion;
use super::super::resolver::HalaEntityKind;
use super::super::HalaExportState;
use super::apply_extras;

/// Build a texture reference record.
/// param state: The export state.
/// param binding: The texture binding.
/// param context: The material name, for diagnostics.
/// return: The texture reference record.
fn texture_ref(
  state: &HalaExportState,
  binding: &HalaTextureBinding,
  context: &str,
) -> Result<Value, HalaGltfError> {
  let index = state.require(HalaEntityKind::Texture, binding.texture_index, context)?;
  Ok(json!({
    "index": index,
    "texCoord": binding.tex_coord,
  }))
}

/// Export a material.
/// For glTF 1.0 only the name is emitted here; the legacy technique
/// processor fills in the technique, program and shaders.
/// param state: The export state.
/// param material: The material.
/// return: The material record.
pub fn export_material(
  state: &HalaExportState,
  material: &HalaMaterial,
) -> Result<Value, HalaGltfError> {
  log::debug!("Exporting material \"{}\".", material.name);

  let mut record = json!({ "name": material.name });
  if state.version() >= HalaGltfVersion::V2_0 {
    let mut pbr = json!({
      "baseColorFactor": material.base_color_factor.iter().map(|v| *v as f64).collect::<Vec<_>>(),
      "metallicFactor": material.metallic_factor as f64,
      "roughnessFactor": material.roughness_factor as f64,
    });
    if let Some(binding) = &material.base_color_texture {
      pbr["baseColorTexture"] = texture_ref(state, binding, &material.name)?;
    }
    if let Some(binding) = &material.metallic_roughness_texture {
      pbr["metallicRoughnessTexture"] = texture_ref(state, binding, &material.name)?;
    }
    record["pbrMetallicRoughness"] = pbr;
    record["emissiveFactor"] = json!(material
      .emissive_factor
      .iter()
      .map(|v| *v as f64)
      .collect::<Vec<_>>());
    if let Some(binding) = &material.emissive_texture {
      record["emissiveTexture"] = texture_ref(state, binding, &material.name)?;
    }
    if let Some(binding) = &material.normal_texture {
      record["normalTexture"] = texture_ref(state, binding, &material.name)?;
    }
    if let Some(binding) = &material.occlusion_texture {
      record["occlusionTexture"] = texture_ref(state, binding, &material.name)?;
    }
    if material.double_sided {
      record["doubleSided"] = json!(true);
    }
  }
  apply_extras(&mut record, &material.extras);

  Ok(record)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::scene::{HalaExportData, HalaTexture};
  use crate::settings::HalaExportSettings;

  fn default_material() -> HalaMaterial {
    HalaMaterial {
      name: "Material".to_string(),
      base_color_factor: [0.64, 0.64, 0.64, 1.0],
      metallic_factor: 0.0,
      roughness_factor: 1.0,
      emissive_factor: [0.0, 0.0, 0.0],
      ..Default::default()
    }
  }

  #[test]
  fn test_material_default() {
    let data = HalaExportData::new();
    let state = HalaExportState::new(&data, HalaExportSettings::default());
    let record = export_material(&state, &default_material()).unwrap();

    assert_eq!(record["name"], "Material");
    let pbr = &record["pbrMetallicRoughness"];
    assert!((pbr["baseColorFactor"][0].as_f64().unwrap() - 0.64).abs() < 1e-6);
    assert_eq!(pbr["baseColorFactor"][3].as_f64().unwrap(), 1.0);
    assert_eq!(pbr["metallicFactor"].as_f64().unwrap(), 0.0);
    assert_eq!(pbr["roughnessFactor"].as_f64().unwrap(), 1.0);
    assert_eq!(record["emissiveFactor"], json!([0.0, 0.0, 0.0]));
    assert!(record.get("technique").is_none());
  }

  #[test]
  fn test_material_1_0_emits_name_only() {
    let data = HalaExportData::new();
    let settings = HalaExportSettings {
      asset_version: HalaGltfVersion::V1_0,
      ..Default::default()
    };
    let state = HalaExportState::new(&data, settings);
    let record = export_material(&state, &default_material()).unwrap();
    assert_eq!(record, json!({ "name": "Material" }));
  }

  #[test]
  fn test_material_textured() {
    let mut data = HalaExportData::new();
    for name in ["base_color", "metal_roughness", "emissive", "normal", "occlusion"] {
      data.textures.push(HalaTexture::new(name, u32::MAX));
    }
    let mut state = HalaExportState::new(&data, HalaExportSettings::default());
    for index in 0..5 {
      state.resolver.insert(HalaEntityKind::Texture, index, index);
    }

    let mut material = default_material();
    material.base_color_texture = Some(HalaTextureBinding { texture_index: 0, tex_coord: 0 });
    material.metallic_roughness_texture = Some(HalaTextureBinding { texture_index: 1, tex_coord: 1 });
    material.emissive_texture = Some(HalaTextureBinding { texture_index: 2, tex_coord: 2 });
    material.normal_texture = Some(HalaTextureBinding { texture_index: 3, tex_coord: 3 });
    material.occlusion_texture = Some(HalaTextureBinding { texture_index: 4, tex_coord: 4 });

    let record = export_material(&state, &material).unwrap();
    assert_eq!(record["pbrMetallicRoughness"]["baseColorTexture"], json!({ "index": 0, "texCoord": 0 }));
    assert_eq!(
      record["pbrMetallicRoughness"]["metallicRoughnessTexture"],
      json!({ "index": 1, "texCoord": 1 })
    );
    assert_eq!(record["emissiveTexture"], json!({ "index": 2, "texCoord": 2 }));
    assert_eq!(record["normalTexture"], json!({ "index": 3, "texCoord": 3 }));
    assert_eq!(record["occlusionTexture"], json!({ "index": 4, "texCoord": 4 }));
  }

  #[test]
  fn test_material_unknown_texture_fails() {
    let data = HalaExportData::new();
    let state = HalaExportState::new(&data, HalaExportSettings::default());
    let mut material = default_material();
    material.base_color_texture = Some(HalaTextureBinding { texture_index: 9, tex_coord: 0 });
    assert!(export_material(&state, &material).is_err());
  }
}
