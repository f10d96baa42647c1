//! Drawing the scene graph.
//!
//! The CPU side describes what to draw as a tree of [`Shape`]s. [`Renderer::upload`]
//! turns it into a tree of [`Model`]s once, and [`Renderer::render`] walks that
//! tree every frame issuing one indexed draw call per mesh.

use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;
use glsandbox_core::{Camera, MeshData, SceneNode};

use crate::abs::{Mesh, ShaderProgram, Texture, checkerboard};

/// Compiles the program in `shaders/<name>/{vert,frag}.glsl`, relative
/// to the invoking file.
#[macro_export]
macro_rules! shader_program {
    ($name:ident, $gl:expr, $path_prefix:literal) => {
        $crate::abs::ShaderProgram::from_sources(
            &$gl,
            include_str!(concat!(
                $path_prefix,
                "/shaders/",
                stringify!($name),
                "/vert.glsl"
            )),
            include_str!(concat!(
                $path_prefix,
                "/shaders/",
                stringify!($name),
                "/frag.glsl"
            )),
        )
    };
}

/// Generated geometry plus how to colour it.
#[derive(Clone, Debug)]
pub struct Shape {
    pub data: MeshData,
    pub tint: Vec4,
}

impl Shape {
    pub fn new(data: MeshData, tint: Vec4) -> Self {
        Self { data, tint }
    }
}

/// An uploaded [`Shape`].
pub struct Model {
    pub mesh: Mesh,
    pub tint: Vec4,
}

/// Per-frame values shared by every draw call.
pub struct FrameParams<'a> {
    pub camera: &'a Camera,
    pub aspect: f32,
    pub time: f32,
}

pub struct Renderer {
    gl: Arc<glow::Context>,
    program: ShaderProgram,
    texture: Texture,
    pub clear_color: Vec4,
    pub light_dir: Vec3,
    pub wireframe: bool,
}

impl Renderer {
    pub fn new(gl: &Arc<glow::Context>, clear_color: Vec4, wireframe: bool) -> Result<Self, String> {
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.enable(glow::CULL_FACE);
            gl.cull_face(glow::BACK);
            gl.front_face(glow::CCW);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }

        let program = shader_program!(mesh, gl, ".")?;
        let texture = Texture::new(gl, &checkerboard(256, 8))?;
        log::debug!("Created {}x{} checker texture", texture.width(), texture.height());

        Ok(Self {
            gl: Arc::clone(gl),
            program,
            texture,
            clear_color,
            light_dir: Vec3::new(-0.4, -1.0, -0.3).normalize(),
            wireframe,
        })
    }

    /// Uploads every shape in the tree to the GPU.
    pub fn upload(&self, scene: &SceneNode<Shape>) -> Result<SceneNode<Model>, String> {
        let mut vertices = 0;
        let mut triangles = 0;
        let models = scene.try_map(&mut |shape: &Shape| {
            vertices += shape.data.vertex_count();
            triangles += shape.data.triangle_count();
            Ok::<_, String>(Model {
                mesh: Mesh::from_data(&self.gl, &shape.data)?,
                tint: shape.tint,
            })
        })?;
        log::info!(
            "Uploaded {} meshes ({vertices} vertices, {triangles} triangles)",
            models.mesh_count()
        );
        Ok(models)
    }

    pub fn set_viewport(&self, width: u32, height: u32) {
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    /// Draws one frame of `scene`.
    pub fn render(&self, scene: &SceneNode<Model>, frame: &FrameParams) {
        unsafe {
            let c = self.clear_color;
            self.gl.clear_color(c.x, c.y, c.z, c.w);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            self.gl.polygon_mode(
                glow::FRONT_AND_BACK,
                if self.wireframe { glow::LINE } else { glow::FILL },
            );
        }

        self.program.use_program();
        self.texture.bind(0);
        self.program.set_uniform("u_texture", 0);
        self.program.set_uniform("u_view", frame.camera.view_matrix());
        self.program
            .set_uniform("u_projection", frame.camera.projection_matrix(frame.aspect));
        self.program.set_uniform("u_camera_pos", frame.camera.position);
        self.program.set_uniform("u_light_dir", self.light_dir);
        self.program.set_uniform("u_time", frame.time);
        self.program.set_uniform("u_wireframe", self.wireframe);

        scene.draw(Mat4::IDENTITY, &mut |model: &Model, world: Mat4| {
            self.program.set_uniform("u_model", world);
            self.program.set_uniform("u_tint", model.tint);
            model.mesh.draw();
        });
    }
}

#[cfg(test)]
mod tests {
    const MESH_FRAG: &str = include_str!("shaders/mesh/frag.glsl");

    #[test]
    fn test_face_zero_is_untinted() {
        // plane, sphere and the cylinder wall all use face 0
        let mut lines = MESH_FRAG
            .lines()
            .skip_while(|line| !line.contains("FACE_COLORS[6] = vec3[6]("));
        assert!(lines.next().is_some());
        assert_eq!(lines.next().map(str::trim), Some("vec3(1.0),"));
    }
}
