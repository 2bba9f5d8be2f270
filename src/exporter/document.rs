use serde_json::{
  json,
  Map,
  Value,
};

use crate::settings::{
  HalaGltfVersion,
  HalaShaderProfile,
};

/// The in-progress output document: one ordered record list per glTF
/// top-level section. Records are JSON values so extension processors can
/// attach blocks without the core knowing their schemas.
#[derive(Default)]
pub struct HalaDocument {
  pub scenes: Vec<Value>,
  pub nodes: Vec<Value>,
  pub meshes: Vec<Value>,
  pub materials: Vec<Value>,
  pub accessors: Vec<Value>,
  pub buffer_views: Vec<Value>,
  pub buffers: Vec<Value>,
  pub cameras: Vec<Value>,
  pub animations: Vec<Value>,
  pub skins: Vec<Value>,
  pub images: Vec<Value>,
  pub textures: Vec<Value>,
  pub samplers: Vec<Value>,

  /// Staged light records, relocated by the KHR_lights_punctual processor.
  pub lights: Vec<Value>,

  /// glTF 1.0 only sections.
  pub techniques: Vec<Value>,
  pub programs: Vec<Value>,
  pub shaders: Vec<Value>,

  /// The default scene index.
  pub scene: Option<u32>,
  pub extensions_used: Vec<String>,
  pub extensions: Map<String, Value>,
  pub extras: Map<String, Value>,
}

/// The implementation of the document.
impl HalaDocument {
  /// Create a new empty document.
  /// return: The document.
  pub fn new() -> Self {
    Self::default()
  }

  /// Declare an extension as used, once.
  /// param name: The extension name.
  pub fn use_extension(&mut self, name: &str) {
    if !self.extensions_used.iter().any(|n| n == name) {
      self.extensions_used.push(name.to_string());
    }
  }

  /// Assemble the final JSON object. Only non-empty sections are emitted.
  /// param version: The target glTF version.
  /// param profile: The shader profile (1.0 only).
  /// return: The document JSON.
  pub fn into_json(self, version: HalaGltfVersion, profile: HalaShaderProfile) -> Value {
    let mut root = Map::new();

    let mut asset = Map::new();
    asset.insert("version".to_string(), json!(version.as_str()));
    asset.insert("generator".to_string(), json!("hala-gltf-exporter"));
    if version < HalaGltfVersion::V2_0 {
      let shader_version = match profile {
        HalaShaderProfile::Web => "1.0",
        HalaShaderProfile::Desktop => "3.0",
      };
      asset.insert(
        "profile".to_string(),
        json!({ "api": "WebGL", "version": shader_version }),
      );
    }
    root.insert("asset".to_string(), Value::Object(asset));

    let sections: [(&str, Vec<Value>); 16] = [
      ("scenes", self.scenes),
      ("nodes", self.nodes),
      ("meshes", self.meshes),
      ("materials", self.materials),
      ("accessors", self.accessors),
      ("bufferViews", self.buffer_views),
      ("buffers", self.buffers),
      ("cameras", self.cameras),
      ("animations", self.animations),
      ("skins", self.skins),
      ("images", self.images),
      ("textures", self.textures),
      ("samplers", self.samplers),
      ("techniques", self.techniques),
      ("programs", self.programs),
      ("shaders", self.shaders),
    ];
    for (name, records) in sections {
      if !records.is_empty() {
        root.insert(name.to_string(), Value::Array(records));
      }
    }

    if let Some(scene) = self.scene {
      root.insert("scene".to_string(), json!(scene));
    }
    if !self.extensions_used.is_empty() {
      let mut used = self.extensions_used;
      used.sort();
      root.insert("extensionsUsed".to_string(), json!(used));
    }
    if !self.extensions.is_empty() {
      root.insert("extensions".to_string(), Value::Object(self.extensions));
    }
    if !self.extras.is_empty() {
      root.insert("extras".to_string(), Value::Object(self.extras));
    }

    Value::Object(root)
  }
}
