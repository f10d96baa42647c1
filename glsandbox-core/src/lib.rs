//! The core of the glsandbox renderer. This crate holds everything that
//! does not need a GL context: procedural mesh generation, transforms,
//! the scene graph and the fly camera.

pub mod camera;
pub mod geometry;
pub mod scene;
pub mod transform;

pub use camera::{Camera, CameraInput};
pub use geometry::{MeshData, MeshVertex};
pub use scene::{NodeContent, SceneNode};
pub use transform::Transform;
