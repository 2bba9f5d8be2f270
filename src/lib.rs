pub mod prelude;
pub mod error;
pub mod settings;
pub mod scene;
pub mod exporter;
pub mod extensions;
