use glam::{Mat4, Vec3};
use serde_json::Value;

use hala_gltf_exporter::prelude::*;

fn triangle_mesh(name: &str) -> HalaMesh {
  let mut mesh = HalaMesh::new(name);
  mesh.primitives.push(HalaPrimitive {
    indices: vec![0, 1, 2],
    positions: vec![
      Vec3::new(0.0, 0.0, 0.0),
      Vec3::new(1.0, 0.0, 0.0),
      Vec3::new(0.5, 1.0, 0.0),
    ],
    normals: vec![Vec3::Z, Vec3::Z, Vec3::Z],
    material_index: 0,
    ..Default::default()
  });
  mesh
}

/// One scene with a mesh object, a camera object and a light object.
fn simple_scene() -> HalaExportData {
  let mut data = HalaExportData::new();

  data.materials.push(HalaMaterial {
    name: "Material".to_string(),
    base_color_factor: [0.8, 0.8, 0.8, 1.0],
    ..Default::default()
  });
  data.meshes.push(triangle_mesh("Triangle"));
  data.cameras.push(HalaCamera::new_perspective("Camera", 0.857_556, 0.503_379_9, 0.1, 100.0));
  data.lights.push(HalaLight {
    name: "Lamp".to_string(),
    ..Default::default()
  });

  let mut cube = HalaObject::new("Cube");
  cube.mesh_index = 0;
  cube.translation = Vec3::new(0.0, 0.0, 1.0);
  data.objects.push(cube);

  let mut camera = HalaObject::new("Camera");
  camera.camera_index = 0;
  data.objects.push(camera);

  let mut lamp = HalaObject::new("Lamp");
  lamp.light_index = 0;
  data.objects.push(lamp);

  data.scenes.push(HalaSceneDesc {
    name: "Scene".to_string(),
    root_objects: vec![0, 1, 2],
    active_camera: Some(1),
    ..Default::default()
  });

  data
}

fn parse(output: &HalaExportOutput) -> Value {
  serde_json::from_slice(&output.bytes).unwrap()
}

#[test]
fn test_export_simple_scene() {
  let data = simple_scene();
  let output = HalaGltfExporter::build(&data, HalaExportSettings::default()).unwrap();
  let document = parse(&output);

  assert_eq!(document["asset"]["version"], "2.0");
  assert_eq!(document["scene"], 0);
  assert_eq!(document["scenes"][0]["name"], "Scene");
  assert_eq!(document["scenes"][0]["nodes"].as_array().unwrap().len(), 3);
  assert_eq!(document["nodes"].as_array().unwrap().len(), 3);
  assert_eq!(document["nodes"][0]["mesh"], 0);
  assert_eq!(document["nodes"][1]["camera"], 0);
  assert_eq!(document["meshes"][0]["primitives"][0]["material"], 0);
  assert_eq!(document["scenes"][0]["extras"]["active_camera"], 1);

  // Default settings combine everything into one external buffer.
  assert_eq!(document["buffers"].as_array().unwrap().len(), 1);
  assert_eq!(document["buffers"][0]["uri"], "scene.bin");
  assert_eq!(output.files.len(), 1);
}

#[test]
fn test_export_skinned_object() {
  let mut data = HalaExportData::new();

  let mut mesh = triangle_mesh("Skinned");
  mesh.primitives[0].material_index = u32::MAX;
  mesh.primitives[0].joints = vec![[0, 0, 0, 0]; 3];
  mesh.primitives[0].weights = vec![[1.0, 0.0, 0.0, 0.0]; 3];
  data.meshes.push(mesh);

  data.skins.push(HalaSkin {
    name: "Armature".to_string(),
    joints: vec![0],
    inverse_bind_matrices: vec![Mat4::IDENTITY],
    skeleton_root: Some(0),
    extras: None,
  });

  let mut bone = HalaObject::new("Bone");
  bone.translation = Vec3::Y;
  data.objects.push(bone);

  let mut cube = HalaObject::new("Cube");
  cube.mesh_index = 0;
  cube.skin_index = 0;
  data.objects.push(cube);

  data.scenes.push(HalaSceneDesc {
    name: "Scene".to_string(),
    root_objects: vec![0, 1],
    ..Default::default()
  });

  let output = HalaGltfExporter::build(&data, HalaExportSettings::default()).unwrap();
  let document = parse(&output);

  assert_eq!(document["nodes"][1]["skin"], 0);
  assert_eq!(document["skins"][0]["joints"], serde_json::json!([0]));
  assert_eq!(document["skins"][0]["skeleton"], 0);
  let attributes = &document["meshes"][0]["primitives"][0]["attributes"];
  assert!(attributes.get("JOINTS_0").is_some());
  assert!(attributes.get("WEIGHTS_0").is_some());
}

#[test]
fn test_export_is_reproducible() {
  let data = simple_scene();
  let first = HalaGltfExporter::build(&data, HalaExportSettings::default()).unwrap();
  let second = HalaGltfExporter::build(&data, HalaExportSettings::default()).unwrap();
  assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_lights_require_the_punctual_extension() {
  let data = simple_scene();

  // Without the processor the staged lights are dropped.
  let output = HalaGltfExporter::build(&data, HalaExportSettings::default()).unwrap();
  let document = parse(&output);
  assert!(document.get("extensions").is_none());
  assert!(document["nodes"][2].get("light").is_none());

  let mut settings = HalaExportSettings::default();
  settings.extensions.push(Box::new(HalaLightsPunctual));
  let output = HalaGltfExporter::build(&data, settings).unwrap();
  let document = parse(&output);
  assert_eq!(document["extensionsUsed"], serde_json::json!(["KHR_lights_punctual"]));
  assert_eq!(document["extensions"]["KHR_lights_punctual"]["lights"][0]["name"], "Lamp");
  assert_eq!(
    document["nodes"][2]["extensions"]["KHR_lights_punctual"]["light"],
    0
  );
}

#[test]
fn test_legacy_export_carries_techniques() {
  let data = simple_scene();
  let settings = HalaExportSettings {
    asset_version: HalaGltfVersion::V1_0,
    ..Default::default()
  };
  let output = HalaGltfExporter::build(&data, settings).unwrap();
  let document = parse(&output);

  assert_eq!(document["asset"]["version"], "1.0");
  assert_eq!(document["asset"]["profile"]["api"], "WebGL");
  assert_eq!(document["techniques"].as_array().unwrap().len(), 1);
  assert_eq!(document["programs"].as_array().unwrap().len(), 1);
  assert_eq!(document["shaders"].as_array().unwrap().len(), 2);
  assert_eq!(document["materials"][0]["technique"], 0);
  assert_eq!(document["nodes"][0]["meshes"], serde_json::json!([0]));
  // The assembler fills the unset parameter defaults.
  assert_eq!(
    document["techniques"][0]["parameters"]["shininess"]["value"],
    1.0
  );
}

#[test]
fn test_modern_export_has_no_techniques() {
  let data = simple_scene();
  let output = HalaGltfExporter::build(&data, HalaExportSettings::default()).unwrap();
  let document = parse(&output);
  assert!(document.get("techniques").is_none());
  assert!(document.get("programs").is_none());
  assert!(document.get("shaders").is_none());
}

#[test]
fn test_global_matrix_adds_root_wrapper() {
  let data = simple_scene();
  let settings = HalaExportSettings {
    nodes_global_matrix: Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2),
    ..Default::default()
  };
  let output = HalaGltfExporter::build(&data, settings).unwrap();
  let document = parse(&output);

  let nodes = document["nodes"].as_array().unwrap();
  assert_eq!(nodes.len(), 4);
  let wrapper = &nodes[3];
  assert_eq!(wrapper["name"], "Scene_root");
  assert_eq!(wrapper["children"].as_array().unwrap().len(), 3);
  assert_eq!(wrapper["matrix"].as_array().unwrap().len(), 16);
  assert_eq!(document["scenes"][0]["nodes"], serde_json::json!([3]));
}

#[test]
fn test_binary_export_is_a_glb_container() {
  let data = simple_scene();
  let settings = HalaExportSettings {
    gltf_export_binary: true,
    buffers_combine_data: false,
    ..Default::default()
  };
  let output = HalaGltfExporter::build(&data, settings).unwrap();

  assert_eq!(&output.bytes[0..4], b"glTF");
  let total = u32::from_le_bytes(output.bytes[8..12].try_into().unwrap()) as usize;
  assert_eq!(total, output.bytes.len());
  assert_eq!(total % 4, 0);
  assert_eq!(&output.bytes[16..20], b"JSON");
  assert!(output.files.is_empty());

  let json_length = u32::from_le_bytes(output.bytes[12..16].try_into().unwrap()) as usize;
  let document: Value = serde_json::from_slice(&output.bytes[20..20 + json_length]).unwrap();
  assert!(document["buffers"][0].get("uri").is_none());
}

#[test]
fn test_embedded_buffers_need_no_sidecar_files() {
  let data = simple_scene();
  let settings = HalaExportSettings {
    buffers_embed_data: true,
    ..Default::default()
  };
  let output = HalaGltfExporter::build(&data, settings).unwrap();
  let document = parse(&output);

  let uri = document["buffers"][0]["uri"].as_str().unwrap();
  assert!(uri.starts_with("data:application/octet-stream;base64,"));
  assert!(output.files.is_empty());
}

#[test]
fn test_export_writes_document_and_sidecars() {
  let dir = tempfile::tempdir().unwrap();
  let data = simple_scene();
  let settings = HalaExportSettings {
    gltf_output_dir: dir.path().to_path_buf(),
    gltf_name: "triangle".to_string(),
    ..Default::default()
  };
  let path = HalaGltfExporter::export(&data, settings).unwrap();

  assert_eq!(path, dir.path().join("triangle.gltf"));
  let text = std::fs::read_to_string(&path).unwrap();
  let document: Value = serde_json::from_str(&text).unwrap();
  assert_eq!(document["asset"]["version"], "2.0");
  assert!(dir.path().join("triangle.bin").exists());
}

#[test]
fn test_dangling_reference_fails_cleanly() {
  let mut data = simple_scene();
  data.objects[0].mesh_index = 9;
  let error = HalaGltfExporter::build(&data, HalaExportSettings::default()).unwrap_err();
  assert!(error.message().contains("Cube"));
}
