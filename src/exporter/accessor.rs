use serde_json::json;

use crate::error::HalaGltfError;
use super::buffer::HalaBufferView;

/// The component type of an accessor, as a GL enum value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalaComponentType(u32);
impl HalaComponentType {
  pub const BYTE: Self = Self(5120);
  pub const UNSIGNED_BYTE: Self = Self(5121);
  pub const SHORT: Self = Self(5122);
  pub const UNSIGNED_SHORT: Self = Self(5123);
  pub const UNSIGNED_INT: Self = Self(5125);
  pub const FLOAT: Self = Self(5126);

  pub fn to_u32(&self) -> u32 {
    self.0
  }

  /// Get the size of one component in bytes.
  /// return: The component size.
  pub fn byte_size(&self) -> usize {
    match self.0 {
      5120 | 5121 => 1,
      5122 | 5123 => 2,
      5125 | 5126 => 4,
      _ => unreachable!(),
    }
  }

  /// Get the minimum byte alignment of this component type.
  /// return: The alignment.
  pub fn alignment(&self) -> usize {
    self.byte_size()
  }
}

/// The element type of an accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HalaElementType {
  Scalar,
  Vec2,
  Vec3,
  Vec4,
  Mat2,
  Mat3,
  Mat4,
}

/// The implementation of the element type.
impl HalaElementType {
  /// Get the glTF type name.
  /// return: The type name.
  pub fn type_name(&self) -> &'static str {
    match self {
      HalaElementType::Scalar => "SCALAR",
      HalaElementType::Vec2 => "VEC2",
      HalaElementType::Vec3 => "VEC3",
      HalaElementType::Vec4 => "VEC4",
      HalaElementType::Mat2 => "MAT2",
      HalaElementType::Mat3 => "MAT3",
      HalaElementType::Mat4 => "MAT4",
    }
  }

  /// Get the number of components of one element.
  /// return: The component count.
  pub fn component_count(&self) -> usize {
    match self {
      HalaElementType::Scalar => 1,
      HalaElementType::Vec2 => 2,
      HalaElementType::Vec3 => 3,
      HalaElementType::Vec4 => 4,
      HalaElementType::Mat2 => 4,
      HalaElementType::Mat3 => 9,
      HalaElementType::Mat4 => 16,
    }
  }
}

/// Build an accessor record over the given buffer view.
/// Fails when the declared element range overruns the view.
/// param view: The buffer view the accessor reads from.
/// param view_index: The output index of the buffer view.
/// param byte_offset: The accessor offset within the view.
/// param component_type: The component type.
/// param element_type: The element type.
/// param count: The element count.
/// param normalized: Whether integer components map to [0, 1]/[-1, 1].
/// param bounds: Optional per-component (min, max) bounds.
/// return: The accessor record.
#[allow(clippy::too_many_arguments)]
pub fn make_accessor(
  view: &HalaBufferView,
  view_index: u32,
  byte_offset: usize,
  component_type: HalaComponentType,
  element_type: HalaElementType,
  count: usize,
  normalized: bool,
  bounds: Option<(Vec<f64>, Vec<f64>)>,
) -> Result<serde_json::Value, HalaGltfError> {
  let element_size = component_type.byte_size() * element_type.component_count();
  let stride = if view.byte_stride > 0 { view.byte_stride } else { element_size };
  let needed = if count > 0 {
    byte_offset + (count - 1) * stride + element_size
  } else {
    byte_offset
  };
  if needed > view.byte_length {
    return Err(HalaGltfError::new(
      &format!(
        "Accessor overruns its buffer view: {} elements of {} bytes need {} bytes but the view holds {}.",
        count, element_size, needed, view.byte_length
      ),
      None,
    ));
  }

  let mut record = json!({
    "bufferView": view_index,
    "byteOffset": byte_offset,
    "componentType": component_type.to_u32(),
    "type": element_type.type_name(),
    "count": count,
  });
  if normalized {
    record["normalized"] = json!(true);
  }
  if let Some((min, max)) = bounds {
    record["min"] = json!(min);
    record["max"] = json!(max);
  }
  Ok(record)
}

/// Compute per-component min/max bounds over tightly packed f32 elements.
/// param values: The element values, `width` components per element.
/// param width: The number of components per element.
/// return: The (min, max) bounds, or None when there are no elements.
pub fn compute_bounds(values: &[f32], width: usize) -> Option<(Vec<f64>, Vec<f64>)> {
  if values.is_empty() || width == 0 {
    return None;
  }
  let mut min = vec![f64::INFINITY; width];
  let mut max = vec![f64::NEG_INFINITY; width];
  for element in values.chunks(width) {
    for (i, v) in element.iter().enumerate() {
      let v = *v as f64;
      if v < min[i] {
        min[i] = v;
      }
      if v > max[i] {
        max[i] = v;
      }
    }
  }
  Some((min, max))
}

/// Cast a f32 slice to little-endian bytes.
/// param values: The values.
/// return: The bytes.
pub fn f32_bytes(values: &[f32]) -> Vec<u8> {
  let mut bytes = Vec::with_capacity(values.len() * 4);
  for v in values {
    bytes.extend_from_slice(&v.to_le_bytes());
  }
  bytes
}

/// Cast a u32 slice to little-endian bytes.
/// param values: The values.
/// return: The bytes.
pub fn u32_bytes(values: &[u32]) -> Vec<u8> {
  let mut bytes = Vec::with_capacity(values.len() * 4);
  for v in values {
    bytes.extend_from_slice(&v.to_le_bytes());
  }
  bytes
}

/// Cast a u16 slice to little-endian bytes.
/// param values: The values.
/// return: The bytes.
pub fn u16_bytes(values: &[u16]) -> Vec<u8> {
  let mut bytes = Vec::with_capacity(values.len() * 2);
  for v in values {
    bytes.extend_from_slice(&v.to_le_bytes());
  }
  bytes
}
