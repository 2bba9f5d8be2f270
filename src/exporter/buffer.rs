use std::collections::HashMap;

/// The GL target a buffer view is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalaBufferTarget(u32);
impl HalaBufferTarget {
  pub const NONE: Self = Self(0);
  pub const ARRAY_BUFFER: Self = Self(34962);
  pub const ELEMENT_ARRAY_BUFFER: Self = Self(34963);

  pub fn to_u32(&self) -> u32 {
    self.0
  }
}

/// A contiguous byte range within one binary buffer.
#[derive(Clone, Copy, Debug)]
pub struct HalaBufferView {
  /// The index of the buffer this view belongs to.
  pub buffer: u32,
  pub byte_offset: usize,
  pub byte_length: usize,
  /// The element stride in bytes, 0 means tightly packed.
  pub byte_stride: usize,
  pub target: HalaBufferTarget,
}

/// One binary buffer under construction.
pub struct HalaBuffer {
  pub name: String,
  pub data: Vec<u8>,
}

/// Accumulates raw binary payloads into one or more append-only buffers.
pub struct HalaBufferPacker {
  combine: bool,
  buffers: Vec<HalaBuffer>,
  stream_indices: HashMap<String, u32>,
}

/// The implementation of the buffer packer.
impl HalaBufferPacker {
  /// Create a new buffer packer.
  /// param combine: Whether all streams share a single buffer.
  /// param combined_name: The buffer name used when combining.
  /// return: The buffer packer.
  pub fn new(combine: bool, combined_name: &str) -> Self {
    let mut packer = Self {
      combine,
      buffers: Vec::new(),
      stream_indices: HashMap::new(),
    };
    if combine {
      packer.buffers.push(HalaBuffer {
        name: combined_name.to_string(),
        data: Vec::new(),
      });
    }
    packer
  }

  /// Get or create the buffer index of the given logical stream.
  /// param name: The name of the stream.
  /// return: The buffer index.
  pub fn stream(&mut self, name: &str) -> u32 {
    if self.combine {
      return 0;
    }
    if let Some(index) = self.stream_indices.get(name) {
      return *index;
    }
    let index = self.buffers.len() as u32;
    self.buffers.push(HalaBuffer {
      name: name.to_string(),
      data: Vec::new(),
    });
    self.stream_indices.insert(name.to_string(), index);
    index
  }

  /// Append a payload to the given buffer, padding so the returned offset
  /// honors the required alignment.
  /// param buffer: The buffer index returned by `stream`.
  /// param bytes: The payload.
  /// param alignment: The minimum alignment of the payload in bytes.
  /// param byte_stride: The element stride in bytes, 0 for tightly packed.
  /// param target: The GL target of the resulting view.
  /// return: The buffer view describing the appended range.
  pub fn append(
    &mut self,
    buffer: u32,
    bytes: &[u8],
    alignment: usize,
    byte_stride: usize,
    target: HalaBufferTarget,
  ) -> HalaBufferView {
    let data = &mut self.buffers[buffer as usize].data;
    if alignment > 1 {
      while data.len() % alignment != 0 {
        data.push(0);
      }
    }
    let byte_offset = data.len();
    data.extend_from_slice(bytes);
    HalaBufferView {
      buffer,
      byte_offset,
      byte_length: bytes.len(),
      byte_stride,
      target,
    }
  }

  /// Get the buffers built so far.
  /// return: The buffers.
  pub fn buffers(&self) -> &[HalaBuffer] {
    &self.buffers
  }

  /// Take the bytes of the combined buffer.
  /// return: The combined buffer bytes, or empty if nothing was appended.
  pub fn combined_bytes(&self) -> &[u8] {
    self.buffers.first().map(|b| b.data.as_slice()).unwrap_or(&[])
  }

  /// Check whether streams are combined into a single buffer.
  /// return: True when combining.
  pub fn is_combined(&self) -> bool {
    self.combine
  }
}
