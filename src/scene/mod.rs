pub mod node;
pub mod mesh;
pub mod material;
pub mod camera;
pub mod light;
pub mod image_data;
pub mod texture;
pub mod animation;
pub mod skin;
pub mod scene;

pub use animation::{HalaAction, HalaActionTarget, HalaAnimPath, HalaCurve};
pub use camera::{HalaCamera, HalaProjection};
pub use image_data::HalaImageData;
pub use light::{HalaLight, HalaLightType};
pub use material::{HalaMaterial, HalaTextureBinding};
pub use mesh::{HalaMesh, HalaPrimitive, HalaShapeKey};
pub use node::HalaObject;
pub use scene::{HalaExportData, HalaSceneDesc};
pub use skin::HalaSkin;
pub use texture::{HalaTexture, HalaTextureFilter, HalaWrapMode};
