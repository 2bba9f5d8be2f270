use serde_json::{
  json,
  Map,
  Value,
};

use crate::error::HalaGltfError;
use crate::scene::{
  HalaMesh,
  HalaPrimitive,
};
use super::super::accessor::{
  compute_bounds,
  f32_bytes,
  make_accessor,
  u16_bytes,
  u32_bytes,
  HalaComponentType,
  HalaElementType,
};
use super::super::buffer::HalaBufferTarget;
use super::super::resolver::{
  HalaAccessorRole,
  HalaEntityKind,
};
use super::super::HalaExportState;
use super::apply_extras;

/// Normalize the weights of one vertex so they sum to 1.
/// A vertex with zero total weight is bound as unskinned.
/// param joints: The joint indices of the vertex.
/// param weights: The raw weights of the vertex.
/// return: The (joints, weights) pair to export.
pub fn normalize_vertex_weights(joints: [u16; 4], weights: [f32; 4]) -> ([u16; 4], [f32; 4]) {
  let total: f32 = weights.iter().sum();
  if total <= 0.0 {
    return ([0; 4], [0.0; 4]);
  }
  let mut normalized = weights;
  for w in normalized.iter_mut() {
    *w /= total;
  }
  (joints, normalized)
}

/// Emit the vertex attribute accessors of one primitive in planar layout.
/// param state: The export state.
/// param primitive: The primitive.
/// param stream: The stream name.
/// return: The attribute map.
fn export_planar_attributes(
  state: &mut HalaExportState,
  primitive: &HalaPrimitive,
  stream: &str,
) -> Result<Map<String, Value>, HalaGltfError> {
  let count = primitive.positions.len();
  let mut attributes = Map::new();

  let positions: Vec<f32> = primitive
    .positions
    .iter()
    .flat_map(|p| [p.x, p.y, p.z])
    .collect();
  let index = state.push_payload(
    HalaAccessorRole::Position,
    stream,
    &f32_bytes(&positions),
    HalaBufferTarget::ARRAY_BUFFER,
    HalaComponentType::FLOAT,
    HalaElementType::Vec3,
    count,
    false,
    compute_bounds(&positions, 3),
  )?;
  attributes.insert("POSITION".to_string(), json!(index));

  if primitive.has_normals() {
    let normals: Vec<f32> = primitive
      .normals
      .iter()
      .flat_map(|n| [n.x, n.y, n.z])
      .collect();
    let index = state.push_payload(
      HalaAccessorRole::Normal,
      stream,
      &f32_bytes(&normals),
      HalaBufferTarget::ARRAY_BUFFER,
      HalaComponentType::FLOAT,
      HalaElementType::Vec3,
      count,
      false,
      None,
    )?;
    attributes.insert("NORMAL".to_string(), json!(index));
  }

  for (set, tex_coords) in primitive.tex_coords.iter().enumerate() {
    let uvs: Vec<f32> = tex_coords.iter().flat_map(|uv| [uv.x, uv.y]).collect();
    let index = state.push_payload(
      HalaAccessorRole::TexCoord,
      stream,
      &f32_bytes(&uvs),
      HalaBufferTarget::ARRAY_BUFFER,
      HalaComponentType::FLOAT,
      HalaElementType::Vec2,
      count,
      false,
      None,
    )?;
    attributes.insert(format!("TEXCOORD_{}", set), json!(index));
  }

  if !primitive.colors.is_empty() {
    let colors: Vec<f32> = primitive
      .colors
      .iter()
      .flat_map(|c| [c.x, c.y, c.z, c.w])
      .collect();
    let index = state.push_payload(
      HalaAccessorRole::Color,
      stream,
      &f32_bytes(&colors),
      HalaBufferTarget::ARRAY_BUFFER,
      HalaComponentType::FLOAT,
      HalaElementType::Vec4,
      count,
      false,
      None,
    )?;
    attributes.insert("COLOR_0".to_string(), json!(index));
  }

  Ok(attributes)
}

/// Emit position/normal/texcoord accessors of one primitive sharing a single
/// interleaved, strided buffer view.
/// param state: The export state.
/// param primitive: The primitive.
/// param stream: The stream name.
/// return: The attribute map.
fn export_interleaved_attributes(
  state: &mut HalaExportState,
  primitive: &HalaPrimitive,
  stream: &str,
) -> Result<Map<String, Value>, HalaGltfError> {
  let count = primitive.positions.len();
  let has_normals = primitive.has_normals();
  let uv_sets = primitive.tex_coords.len();
  let stride = 12 + if has_normals { 12 } else { 0 } + uv_sets * 8;

  let mut vertex_data: Vec<f32> = Vec::with_capacity(count * stride / 4);
  for i in 0..count {
    let p = primitive.positions[i];
    vertex_data.extend_from_slice(&[p.x, p.y, p.z]);
    if has_normals {
      let n = primitive.normals[i];
      vertex_data.extend_from_slice(&[n.x, n.y, n.z]);
    }
    for tex_coords in primitive.tex_coords.iter() {
      let uv = tex_coords[i];
      vertex_data.extend_from_slice(&[uv.x, uv.y]);
    }
  }

  let stream_index = state.packer.stream(stream);
  let view = state.packer.append(
    stream_index,
    &f32_bytes(&vertex_data),
    HalaComponentType::FLOAT.alignment(),
    stride,
    HalaBufferTarget::ARRAY_BUFFER,
  );
  let view_index = state.push_view(&view);

  let mut attributes = Map::new();
  let mut byte_offset = 0;

  let positions: Vec<f32> = primitive
    .positions
    .iter()
    .flat_map(|p| [p.x, p.y, p.z])
    .collect();
  let record = make_accessor(
    &view,
    view_index,
    byte_offset,
    HalaComponentType::FLOAT,
    HalaElementType::Vec3,
    count,
    false,
    compute_bounds(&positions, 3),
  )?;
  let index = state.document.accessors.len() as u32;
  state.document.accessors.push(record);
  attributes.insert("POSITION".to_string(), json!(index));
  byte_offset += 12;

  if has_normals {
    let record = make_accessor(
      &view,
      view_index,
      byte_offset,
      HalaComponentType::FLOAT,
      HalaElementType::Vec3,
      count,
      false,
      None,
    )?;
    let index = state.document.accessors.len() as u32;
    state.document.accessors.push(record);
    attributes.insert("NORMAL".to_string(), json!(index));
    byte_offset += 12;
  }

  for set in 0..uv_sets {
    let record = make_accessor(
      &view,
      view_index,
      byte_offset,
      HalaComponentType::FLOAT,
      HalaElementType::Vec2,
      count,
      false,
      None,
    )?;
    let index = state.document.accessors.len() as u32;
    state.document.accessors.push(record);
    attributes.insert(format!("TEXCOORD_{}", set), json!(index));
    byte_offset += 8;
  }

  Ok(attributes)
}

/// Export one primitive.
/// param state: The export state.
/// param mesh_name: The mesh name, for diagnostics and stream naming.
/// param primitive_index: The primitive index within the mesh.
/// param primitive: The primitive.
/// param mesh: The owning mesh, for shape keys.
/// return: The primitive record.
fn export_primitive(
  state: &mut HalaExportState,
  mesh_name: &str,
  primitive_index: usize,
  primitive: &HalaPrimitive,
  mesh: &HalaMesh,
) -> Result<Value, HalaGltfError> {
  let count = primitive.positions.len();
  if count == 0 {
    return Err(HalaGltfError::new(
      &format!("Mesh \"{}\" primitive {} has no vertices.", mesh_name, primitive_index),
      None,
    ));
  }
  if primitive.has_normals() && primitive.normals.len() != count {
    return Err(HalaGltfError::new(
      &format!(
        "Mesh \"{}\" primitive {} has {} normals for {} vertices.",
        mesh_name, primitive_index, primitive.normals.len(), count
      ),
      None,
    ));
  }

  let stream = format!("{}_mesh", mesh_name);
  let mut attributes = if state.settings.meshes_interleave_vertex_data {
    export_interleaved_attributes(state, primitive, &stream)?
  } else {
    export_planar_attributes(state, primitive, &stream)?
  };

  // Skinning attributes stay planar in both layouts.
  if primitive.is_skinned() {
    if primitive.joints.len() != count || primitive.weights.len() != count {
      return Err(HalaGltfError::new(
        &format!(
          "Mesh \"{}\" primitive {} has mismatched skinning data for {} vertices.",
          mesh_name, primitive_index, count
        ),
        None,
      ));
    }

    let mut joints: Vec<u16> = Vec::with_capacity(count * 4);
    let mut weights: Vec<f32> = Vec::with_capacity(count * 4);
    for i in 0..count {
      let (j, w) = normalize_vertex_weights(primitive.joints[i], primitive.weights[i]);
      joints.extend_from_slice(&j);
      weights.extend_from_slice(&w);
    }

    let index = state.push_payload(
      HalaAccessorRole::Joints,
      &stream,
      &u16_bytes(&joints),
      HalaBufferTarget::ARRAY_BUFFER,
      HalaComponentType::UNSIGNED_SHORT,
      HalaElementType::Vec4,
      count,
      false,
      None,
    )?;
    attributes.insert("JOINTS_0".to_string(), json!(index));

    let index = state.push_payload(
      HalaAccessorRole::Weights,
      &stream,
      &f32_bytes(&weights),
      HalaBufferTarget::ARRAY_BUFFER,
      HalaComponentType::FLOAT,
      HalaElementType::Vec4,
      count,
      false,
      None,
    )?;
    attributes.insert("WEIGHTS_0".to_string(), json!(index));
  }

  let mut record = json!({
    "attributes": Value::Object(attributes),
    "mode": 4,
  });

  if !primitive.indices.is_empty() {
    let index = state.push_payload(
      HalaAccessorRole::Index,
      &stream,
      &u32_bytes(&primitive.indices),
      HalaBufferTarget::ELEMENT_ARRAY_BUFFER,
      HalaComponentType::UNSIGNED_INT,
      HalaElementType::Scalar,
      primitive.indices.len(),
      false,
      None,
    )?;
    record["indices"] = json!(index);
  }

  if primitive.material_index != u32::MAX {
    let index = state.require(HalaEntityKind::Material, primitive.material_index, mesh_name)?;
    record["material"] = json!(index);
  }

  // Shape keys become morph targets on every primitive.
  if !mesh.shape_keys.is_empty() {
    let mut targets = Vec::with_capacity(mesh.shape_keys.len());
    for shape_key in mesh.shape_keys.iter() {
      if shape_key.position_deltas.len() != count {
        return Err(HalaGltfError::new(
          &format!(
            "Shape key \"{}\" of mesh \"{}\" has {} deltas for {} vertices.",
            shape_key.name, mesh_name, shape_key.position_deltas.len(), count
          ),
          None,
        ));
      }
      let deltas: Vec<f32> = shape_key
        .position_deltas
        .iter()
        .flat_map(|d| [d.x, d.y, d.z])
        .collect();
      let position_index = state.push_payload(
        HalaAccessorRole::MorphTarget,
        &stream,
        &f32_bytes(&deltas),
        HalaBufferTarget::ARRAY_BUFFER,
        HalaComponentType::FLOAT,
        HalaElementType::Vec3,
        count,
        false,
        compute_bounds(&deltas, 3),
      )?;
      let mut target = json!({ "POSITION": position_index });
      if !shape_key.normal_deltas.is_empty() {
        let normals: Vec<f32> = shape_key
          .normal_deltas
          .iter()
          .flat_map(|d| [d.x, d.y, d.z])
          .collect();
        let normal_index = state.push_payload(
          HalaAccessorRole::MorphTarget,
          &stream,
          &f32_bytes(&normals),
          HalaBufferTarget::ARRAY_BUFFER,
          HalaComponentType::FLOAT,
          HalaElementType::Vec3,
          count,
          false,
          None,
        )?;
        target["NORMAL"] = json!(normal_index);
      }
      targets.push(target);
    }
    record["targets"] = json!(targets);
  }

  Ok(record)
}

/// Export a mesh.
/// param state: The export state.
/// param mesh: The mesh.
/// return: The mesh record.
pub fn export_mesh(state: &mut HalaExportState, mesh: &HalaMesh) -> Result<Value, HalaGltfError> {
  log::debug!("Exporting mesh \"{}\".", mesh.name);

  let mut primitives = Vec::with_capacity(mesh.primitives.len());
  for (index, primitive) in mesh.primitives.iter().enumerate() {
    primitives.push(export_primitive(state, &mesh.name, index, primitive, mesh)?);
  }

  let mut record = json!({
    "name": mesh.name,
    "primitives": primitives,
  });
  if !mesh.shape_key_weights.is_empty() {
    record["weights"] = json!(mesh
      .shape_key_weights
      .iter()
      .map(|w| *w as f64)
      .collect::<Vec<_>>());
  }
  apply_extras(&mut record, &mesh.extras);

  Ok(record)
}
