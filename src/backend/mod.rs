mod noop;
mod traits;

#[cfg(feature = "avian3d")]
pub mod avian;

pub use noop::{NoOpBackendPlugin, TransformBackend};
pub use traits::WallRunBackend;

#[cfg(feature = "avian3d")]
pub use avian::Avian3dBackend;
