//! Thin wrappers over the OpenGL objects the sandbox needs:
//! application/window setup, shaders, meshes and textures.

pub mod app;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
