use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use crate::scene::HalaTexture;
use super::super::resolver::HalaEntityKind;
use super::super::HalaExportState;
use super::apply_extras;

/// Export a texture, sharing one sampler record per distinct
/// wrap/filter combination.
/// param state: The export state.
/// param texture: The texture.
/// return: The texture record.
pub fn export_texture(
  state: &mut HalaExportState,
  texture: &HalaTexture,
) -> Result<Value, HalaGltfError> {
  log::debug!("Exporting texture \"{}\".", texture.name);

  let key = (
    texture.wrap_s.to_u32(),
    texture.wrap_t.to_u32(),
    texture.mag_filter.to_u32(),
    texture.min_filter.to_u32(),
  );
  let sampler = match state.samplers.get(&key) {
    Some(index) => *index,
    None => {
      let index = state.document.samplers.len() as u32;
      state.document.samplers.push(json!({
        "magFilter": key.2,
        "minFilter": key.3,
        "wrapS": key.0,
        "wrapT": key.1,
      }));
      state.samplers.insert(key, index);
      index
    },
  };

  let source = state.require(HalaEntityKind::Image, texture.image_index, &texture.name)?;
  let mut record = json!({
    "name": texture.name,
    "sampler": sampler,
    "source": source,
  });
  apply_extras(&mut record, &texture.extras);

  Ok(record)
}
