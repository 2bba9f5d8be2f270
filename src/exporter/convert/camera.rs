use serde_json::{
  json,
  Value,
};

use crate::error::HalaGltfError;
use crate::scene::{
  HalaCamera,
  HalaProjection,
};
use super::super::HalaExportState;
use super::apply_extras;

/// The smallest vertical field of view that still yields a finite aspect ratio.
const MIN_YFOV: f64 = 1e-6;

/// Export a camera.
/// param state: The export state.
/// param camera: The camera.
/// return: The camera record.
pub fn export_camera(_state: &HalaExportState, camera: &HalaCamera) -> Result<Value, HalaGltfError> {
  log::debug!("Exporting camera \"{}\".", camera.name);

  let znear = camera.clip_start as f64;
  let zfar = camera.clip_end as f64;
  let mut record = match camera.projection {
    HalaProjection::Perspective { angle_x, angle_y } => {
      let yfov = (angle_y as f64).max(MIN_YFOV);
      let aspect_ratio = angle_x as f64 / yfov;
      json!({
        "name": camera.name,
        "type": "perspective",
        "perspective": {
          "aspectRatio": aspect_ratio,
          "yfov": yfov,
          "zfar": zfar,
          "znear": znear,
        },
      })
    },
    HalaProjection::Orthographic { ortho_scale } => {
      json!({
        "name": camera.name,
        "type": "orthographic",
        "orthographic": {
          "xmag": ortho_scale as f64,
          "ymag": ortho_scale as f64,
          "zfar": zfar,
          "znear": znear,
        },
      })
    },
  };
  apply_extras(&mut record, &camera.extras);

  Ok(record)
}
