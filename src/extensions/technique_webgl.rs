use base64::Engine as _;
use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use crate::exporter::document::HalaDocument;
use crate::scene::HalaExportData;
use crate::settings::{
  HalaExportSettings,
  HalaGltfVersion,
  HalaShaderProfile,
};
use super::HalaExtensionProcessor;

const GL_DEPTH_TEST: u32 = 2929;
const GL_CULL_FACE: u32 = 2884;
const GL_VERTEX_SHADER: u32 = 35633;
const GL_FRAGMENT_SHADER: u32 = 35632;

/// The legacy technique processor generates the techniques, programs and
/// shaders a glTF 1.0 document requires, one set per material, and fills
/// the material values from the host material factors.
pub struct HalaTechniqueWebgl;

/// The implementation of the legacy technique processor.
impl HalaTechniqueWebgl {
  /// Get the GLSL version header of the shader profile.
  /// param profile: The shader profile.
  /// return: The header lines.
  fn shader_header(profile: HalaShaderProfile) -> &'static str {
    match profile {
      HalaShaderProfile::Web => "#version 100\nprecision highp float;\n",
      HalaShaderProfile::Desktop => "#version 130\n",
    }
  }

  /// Build a shader record embedding the given source as a data URI.
  /// param name: The shader name.
  /// param shader_type: The GL shader type.
  /// param source: The GLSL source.
  /// return: The shader record.
  fn shader_record(name: &str, shader_type: u32, source: &str) -> Value {
    json!({
      "name": name,
      "type": shader_type,
      "uri": format!(
        "data:text/plain;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(source.as_bytes())
      ),
    })
  }

  fn vertex_source(profile: HalaShaderProfile) -> String {
    format!(
      "{}attribute vec3 a_position;\n\
       attribute vec3 a_normal;\n\
       uniform mat4 u_modelViewMatrix;\n\
       uniform mat4 u_projectionMatrix;\n\
       varying vec3 v_normal;\n\
       void main() {{\n\
       \x20 v_normal = mat3(u_modelViewMatrix) * a_normal;\n\
       \x20 gl_Position = u_projectionMatrix * u_modelViewMatrix * vec4(a_position, 1.0);\n\
       }}\n",
      Self::shader_header(profile)
    )
  }

  fn fragment_source(profile: HalaShaderProfile) -> String {
    format!(
      "{}uniform vec4 u_diffuse;\n\
       uniform vec4 u_emission;\n\
       varying vec3 v_normal;\n\
       void main() {{\n\
       \x20 vec3 normal = normalize(v_normal);\n\
       \x20 float lambert = max(dot(normal, vec3(0.0, 0.0, 1.0)), 0.0);\n\
       \x20 gl_FragColor = vec4(u_diffuse.rgb * lambert + u_emission.rgb, u_diffuse.a);\n\
       }}\n",
      Self::shader_header(profile)
    )
  }
}

impl HalaExtensionProcessor for HalaTechniqueWebgl {
  fn name(&self) -> &'static str {
    "techniques_webgl"
  }

  fn enabled(&self, version: HalaGltfVersion) -> bool {
    version < HalaGltfVersion::V2_0
  }

  fn process(
    &self,
    data: &HalaExportData,
    document: &mut HalaDocument,
    settings: &HalaExportSettings,
  ) -> Result<(), HalaGltfError> {
    let profile = settings.asset_profile;
    for (index, material) in document.materials.iter_mut().enumerate() {
      let host = data.materials.get(index).ok_or_else(|| {
        HalaGltfError::new(
          &format!("Material record {} has no host material.", index),
          None,
        )
      })?;
      let name = host.name.as_str();

      let vertex_shader = document.shaders.len() as u32;
      document.shaders.push(Self::shader_record(
        &format!("{}_vs", name),
        GL_VERTEX_SHADER,
        &Self::vertex_source(profile),
      ));
      let fragment_shader = document.shaders.len() as u32;
      document.shaders.push(Self::shader_record(
        &format!("{}_fs", name),
        GL_FRAGMENT_SHADER,
        &Self::fragment_source(profile),
      ));

      let program = document.programs.len() as u32;
      document.programs.push(json!({
        "name": format!("{}_program", name),
        "attributes": ["a_position", "a_normal"],
        "vertexShader": vertex_shader,
        "fragmentShader": fragment_shader,
      }));

      let mut states = vec![GL_DEPTH_TEST];
      if !host.double_sided {
        states.push(GL_CULL_FACE);
      }
      let technique = document.techniques.len() as u32;
      document.techniques.push(json!({
        "name": format!("{}_technique", name),
        "program": program,
        "attributes": {
          "a_position": "position",
          "a_normal": "normal",
        },
        "uniforms": {
          "u_modelViewMatrix": "modelViewMatrix",
          "u_projectionMatrix": "projectionMatrix",
          "u_diffuse": "diffuse",
          "u_emission": "emission",
          "u_shininess": "shininess",
        },
        "parameters": {
          "position": { "semantic": "POSITION", "type": 35665 },
          "normal": { "semantic": "NORMAL", "type": 35665 },
          "modelViewMatrix": { "semantic": "MODELVIEW", "type": 35676 },
          "projectionMatrix": { "semantic": "PROJECTION", "type": 35676 },
          "diffuse": { "type": 35666, "value": null },
          "emission": { "type": 35666, "value": null },
          "shininess": { "type": 5126, "value": null },
        },
        "states": { "enable": states },
      }));

      material["technique"] = json!(technique);
      material["values"] = json!({
        "diffuse": host.base_color_factor.iter().map(|v| *v as f64).collect::<Vec<_>>(),
      });
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::scene::HalaMaterial;

  fn legacy_settings() -> HalaExportSettings {
    HalaExportSettings {
      asset_version: HalaGltfVersion::V1_0,
      ..Default::default()
    }
  }

  #[test]
  fn test_technique_per_material() {
    let mut data = HalaExportData::new();
    data.materials.push(HalaMaterial {
      name: "Red".to_string(),
      base_color_factor: [1.0, 0.0, 0.0, 1.0],
      ..Default::default()
    });
    let mut document = HalaDocument::new();
    document.materials.push(json!({ "name": "Red" }));

    HalaTechniqueWebgl.process(&data, &mut document, &legacy_settings()).unwrap();

    assert_eq!(document.techniques.len(), 1);
    assert_eq!(document.programs.len(), 1);
    assert_eq!(document.shaders.len(), 2);
    assert_eq!(document.materials[0]["technique"], 0);
    assert_eq!(document.materials[0]["values"]["diffuse"], json!([1.0, 0.0, 0.0, 1.0]));
    assert_eq!(document.techniques[0]["parameters"]["diffuse"]["value"], Value::Null);
  }

  #[test]
  fn test_double_sided_disables_culling() {
    let mut data = HalaExportData::new();
    data.materials.push(HalaMaterial {
      name: "TwoSided".to_string(),
      double_sided: true,
      ..Default::default()
    });
    let mut document = HalaDocument::new();
    document.materials.push(json!({ "name": "TwoSided" }));

    HalaTechniqueWebgl.process(&data, &mut document, &legacy_settings()).unwrap();

    assert_eq!(document.techniques[0]["states"]["enable"], json!([GL_DEPTH_TEST]));
  }

  #[test]
  fn test_desktop_profile_header() {
    let source = HalaTechniqueWebgl::vertex_source(HalaShaderProfile::Desktop);
    assert!(source.starts_with("#version 130"));
    let source = HalaTechniqueWebgl::vertex_source(HalaShaderProfile::Web);
    assert!(source.starts_with("#version 100"));
  }

  #[test]
  fn test_only_enabled_for_legacy() {
    assert!(HalaTechniqueWebgl.enabled(HalaGltfVersion::V1_0));
    assert!(!HalaTechniqueWebgl.enabled(HalaGltfVersion::V2_0));
  }
}
