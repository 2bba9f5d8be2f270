pub mod node;
pub mod mesh;
pub mod material;
pub mod camera;
pub mod light;
pub mod animation;
pub mod skin;
pub mod image;
pub mod texture;
pub mod scene;

use serde_json::Value;

/// Copy host metadata verbatim into a record's extras field.
/// param record: The entity record.
/// param extras: The host metadata, if any.
pub fn apply_extras(record: &mut Value, extras: &Option<serde_json::Map<String, Value>>) {
  if let Some(extras) = extras {
    if !extras.is_empty() {
      record["extras"] = Value::Object(extras.clone());
    }
  }
}
