use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{
  Hash,
  Hasher,
};

use super::accessor::{
  HalaComponentType,
  HalaElementType,
};

/// The kind of a host entity, used to key identity resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HalaEntityKind {
  Scene,
  Object,
  Mesh,
  Material,
  Camera,
  Light,
  Image,
  Texture,
  Action,
  Skin,
}

/// The semantic role of a deduplicated payload. Payloads with different
/// roles never merge even when their bytes coincide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HalaAccessorRole {
  Index,
  Position,
  Normal,
  TexCoord,
  Color,
  Joints,
  Weights,
  InverseBindMatrices,
  AnimTime,
  AnimValue,
  MorphTarget,
}

/// A structural fingerprint of an accessor payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalaFingerprint {
  pub role: HalaAccessorRole,
  pub component_type: HalaComponentType,
  pub element_type: HalaElementType,
  pub count: usize,
  pub normalized: bool,
  pub content_hash: u64,
}

/// The implementation of the fingerprint.
impl HalaFingerprint {
  /// Compute the fingerprint of a payload.
  /// param role: The semantic role of the payload.
  /// param component_type: The component type.
  /// param element_type: The element type.
  /// param count: The element count.
  /// param normalized: Whether integer components are normalized.
  /// param bytes: The payload bytes.
  /// return: The fingerprint.
  pub fn new(
    role: HalaAccessorRole,
    component_type: HalaComponentType,
    element_type: HalaElementType,
    count: usize,
    normalized: bool,
    bytes: &[u8],
  ) -> Self {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    Self {
      role,
      component_type,
      element_type,
      count,
      normalized,
      content_hash: hasher.finish(),
    }
  }
}

/// Maps host entity identities to stable output indices and deduplicates
/// structurally identical payloads.
#[derive(Default)]
pub struct HalaReferenceResolver {
  indices: HashMap<(HalaEntityKind, u32), u32>,
  accessors: HashMap<HalaFingerprint, u32>,
}

/// The implementation of the reference resolver.
impl HalaReferenceResolver {
  /// Create a new resolver.
  /// return: The resolver.
  pub fn new() -> Self {
    Self::default()
  }

  /// Record the output index assigned to a host entity.
  /// param kind: The entity kind.
  /// param input_index: The host entity index.
  /// param output_index: The assigned output index.
  pub fn insert(&mut self, kind: HalaEntityKind, input_index: u32, output_index: u32) {
    self.indices.insert((kind, input_index), output_index);
  }

  /// Resolve a host entity to its output index.
  /// Repeated calls for the same identity return the same index.
  /// param kind: The entity kind.
  /// param input_index: The host entity index.
  /// return: The output index, or None when the entity was not exported.
  pub fn resolve(&self, kind: HalaEntityKind, input_index: u32) -> Option<u32> {
    self.indices.get(&(kind, input_index)).copied()
  }

  /// Look up an already emitted accessor with the same fingerprint.
  /// param fingerprint: The payload fingerprint.
  /// return: The accessor output index, or None.
  pub fn find_accessor(&self, fingerprint: &HalaFingerprint) -> Option<u32> {
    self.accessors.get(fingerprint).copied()
  }

  /// Record an emitted accessor under its fingerprint.
  /// param fingerprint: The payload fingerprint.
  /// param output_index: The accessor output index.
  pub fn insert_accessor(&mut self, fingerprint: HalaFingerprint, output_index: u32) {
    self.accessors.insert(fingerprint, output_index);
  }
}
