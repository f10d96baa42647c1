//! Procedural mesh generation.
//!
//! Every generator returns a [`MeshData`]: a list of [`MeshVertex`] records and a
//! triangle index list with counter-clockwise front faces. The vertex layout is
//! what the GPU side uploads as-is, so it is `#[repr(C)]` and exactly
//! [`FLOATS_PER_VERTEX`] floats wide.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

/// Number of `f32` values making up one [`MeshVertex`].
pub const FLOATS_PER_VERTEX: usize = 9;

/// Upper bound for any segment count. Keeps every vertex index of every
/// generator well inside `u32`.
pub const MAX_SEGMENTS: u32 = 4096;

/// A single vertex: position, normal, texture coordinate and face id.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    /// Which face of the primitive the vertex belongs to. Stored as a float so
    /// it can be fed straight into a float attribute.
    pub face: f32,
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2, face: u32) -> Self {
        Self {
            position,
            normal,
            uv,
            face: face as f32,
        }
    }
}

/// CPU side mesh: vertices plus a triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Returns the attributes as one flat array, [`FLOATS_PER_VERTEX`] floats per vertex.
    pub fn flatten(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertices.len() * FLOATS_PER_VERTEX);
        for v in &self.vertices {
            out.extend_from_slice(&[
                v.position.x,
                v.position.y,
                v.position.z,
                v.normal.x,
                v.normal.y,
                v.normal.z,
                v.uv.x,
                v.uv.y,
                v.face,
            ]);
        }
        out
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends another mesh, offsetting its indices past the current vertices.
    pub fn append(&mut self, other: &MeshData) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Clamps a segment count into `min..=MAX_SEGMENTS`, warning when the caller
/// asked for something outside it.
fn clamp_segments(what: &str, requested: u32, min: u32) -> u32 {
    if requested < min {
        log::warn!("{what} segments {requested} below minimum, using {min}");
        min
    } else if requested > MAX_SEGMENTS {
        log::warn!("{what} segments {requested} above maximum, using {MAX_SEGMENTS}");
        MAX_SEGMENTS
    } else {
        requested
    }
}

/// Creates a plane in the XY plane facing `+Z`, centred on the origin and split
/// into `segments` x `segments` cells.
pub fn create_plane(width: f32, height: f32, segments: u32) -> MeshData {
    let segments = clamp_segments("plane", segments, 1);
    let row = segments + 1;

    let cells = segments as usize;
    let mut vertices = Vec::with_capacity((cells + 1) * (cells + 1));
    let mut indices = Vec::with_capacity(cells * cells * 6);

    for y in 0..=segments {
        for x in 0..=segments {
            let u = x as f32 / segments as f32;
            let v = y as f32 / segments as f32;
            vertices.push(MeshVertex::new(
                Vec3::new((u - 0.5) * width, (v - 0.5) * height, 0.0),
                Vec3::Z,
                Vec2::new(u, v),
                0,
            ));
        }
    }

    for y in 0..segments {
        for x in 0..segments {
            let bottom_left = y * row + x;
            let bottom_right = bottom_left + 1;
            let top_left = bottom_left + row;
            let top_right = top_left + 1;

            indices.extend_from_slice(&[
                bottom_left,
                bottom_right,
                top_left,
                bottom_right,
                top_right,
                top_left,
            ]);
        }
    }

    MeshData { vertices, indices }
}

/// Creates an axis aligned cube with edge length `size`, centred on the origin.
///
/// Faces are emitted in the order `+X, -X, +Y, -Y, +Z, -Z` and their face ids
/// follow that order, so a shader can tell the sides apart.
pub fn create_cube(size: f32) -> MeshData {
    let h = size * 0.5;

    // (normal, u axis, v axis) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, (normal, u, v)) in faces.into_iter().enumerate() {
        let base = vertices.len() as u32;
        let center = normal * h;
        let corners = [
            (center - u * h - v * h, Vec2::new(0.0, 0.0)),
            (center + u * h - v * h, Vec2::new(1.0, 0.0)),
            (center + u * h + v * h, Vec2::new(1.0, 1.0)),
            (center - u * h + v * h, Vec2::new(0.0, 1.0)),
        ];
        for (position, uv) in corners {
            vertices.push(MeshVertex::new(position, normal, uv, face as u32));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Creates a UV sphere.
///
/// The seam column is duplicated so texture coordinates wrap cleanly, which
/// gives `(latitude_segments + 1) * (longitude_segments + 1)` vertices.
pub fn create_sphere(radius: f32, latitude_segments: u32, longitude_segments: u32) -> MeshData {
    let lat_segments = clamp_segments("sphere latitude", latitude_segments, 2);
    let lon_segments = clamp_segments("sphere longitude", longitude_segments, 3);
    let row = lon_segments + 1;

    let (rows, columns) = (lat_segments as usize, lon_segments as usize);
    let mut vertices = Vec::with_capacity((rows + 1) * (columns + 1));
    let mut indices = Vec::with_capacity(rows * columns * 6);

    for lat in 0..=lat_segments {
        let theta = PI * lat as f32 / lat_segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=lon_segments {
            let phi = 2.0 * PI * lon as f32 / lon_segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = Vec3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
            vertices.push(MeshVertex::new(
                normal * radius,
                normal,
                Vec2::new(
                    lon as f32 / lon_segments as f32,
                    lat as f32 / lat_segments as f32,
                ),
                0,
            ));
        }
    }

    for lat in 0..lat_segments {
        for lon in 0..lon_segments {
            let first = lat * row + lon;
            let second = first + row;

            indices.extend_from_slice(&[first, first + 1, second, second, first + 1, second + 1]);
        }
    }

    MeshData { vertices, indices }
}

/// Creates a cylinder around the Y axis, centred on the origin.
///
/// The side wall has face id 0, the top cap 1 and the bottom cap 2.
pub fn create_cylinder(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = clamp_segments("cylinder", segments, 3);
    let half = height * 0.5;
    let n = segments as usize;

    let mut mesh = MeshData {
        vertices: Vec::with_capacity(4 * n + 6),
        indices: Vec::with_capacity(12 * n),
    };

    // Side wall, bottom/top pairs.
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (sin_phi, cos_phi) = (2.0 * PI * u).sin_cos();
        let normal = Vec3::new(cos_phi, 0.0, sin_phi);
        let rim = normal * radius;

        mesh.vertices.push(MeshVertex::new(
            rim - Vec3::Y * half,
            normal,
            Vec2::new(u, 0.0),
            0,
        ));
        mesh.vertices.push(MeshVertex::new(
            rim + Vec3::Y * half,
            normal,
            Vec2::new(u, 1.0),
            0,
        ));
    }
    for i in 0..segments {
        let bottom = 2 * i;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        mesh.indices
            .extend_from_slice(&[bottom, top, next_bottom, next_bottom, top, next_top]);
    }

    mesh.append(&cylinder_cap(radius, half, segments, true));
    mesh.append(&cylinder_cap(radius, -half, segments, false));

    mesh
}

/// A triangle fan cap at height `y`.
fn cylinder_cap(radius: f32, y: f32, segments: u32, top: bool) -> MeshData {
    let (normal, face) = if top { (Vec3::Y, 1) } else { (Vec3::NEG_Y, 2) };

    let mut vertices = Vec::with_capacity(segments as usize + 2);
    let mut indices = Vec::with_capacity(segments as usize * 3);

    vertices.push(MeshVertex::new(
        Vec3::new(0.0, y, 0.0),
        normal,
        Vec2::splat(0.5),
        face,
    ));
    for i in 0..=segments {
        let phi = 2.0 * PI * i as f32 / segments as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        vertices.push(MeshVertex::new(
            Vec3::new(cos_phi * radius, y, sin_phi * radius),
            normal,
            Vec2::new(0.5 + 0.5 * cos_phi, 0.5 + 0.5 * sin_phi),
            face,
        ));
    }

    for i in 1..=segments {
        if top {
            indices.extend_from_slice(&[0, i + 1, i]);
        } else {
            indices.extend_from_slice(&[0, i, i + 1]);
        }
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(mesh: &MeshData) {
        assert_eq!(mesh.indices.len() % 3, 0);
        for &i in &mesh.indices {
            assert!((i as usize) < mesh.vertex_count(), "index {i} out of range");
        }
        for v in &mesh.vertices {
            assert!(
                (v.normal.length() - 1.0).abs() < 1e-4,
                "normal {:?} is not unit length",
                v.normal
            );
        }
    }

    /// Every non-degenerate triangle must wind counter-clockwise when seen from
    /// the side its vertex normals point to.
    fn assert_ccw(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let cross = (b.position - a.position).cross(c.position - a.position);
            if cross.length() < 1e-6 {
                continue;
            }
            let normal = a.normal + b.normal + c.normal;
            assert!(cross.dot(normal) > 0.0, "triangle {tri:?} winds clockwise");
        }
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(
            std::mem::size_of::<MeshVertex>(),
            FLOATS_PER_VERTEX * std::mem::size_of::<f32>()
        );

        let mesh = create_plane(1.0, 1.0, 1);
        let flat = mesh.flatten();
        assert_eq!(flat.len(), mesh.vertex_count() * FLOATS_PER_VERTEX);
        assert_eq!(&flat[0..9], &[-0.5, -0.5, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_plane() {
        let mesh = create_plane(4.0, 2.0, 2);
        assert_well_formed(&mesh);
        assert_ccw(&mesh);
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.indices.len(), 24);

        assert_eq!(mesh.vertices[0].position, Vec3::new(-2.0, -1.0, 0.0));
        assert_eq!(mesh.vertices[4].position, Vec3::ZERO);
        assert_eq!(mesh.vertices[8].position, Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(mesh.vertices[8].uv, Vec2::ONE);
        assert!(mesh.vertices.iter().all(|v| v.normal == Vec3::Z));
    }

    #[test]
    fn test_plane_index_order() {
        // bottom row is 0,1 and the top row 2,3
        let mesh = create_plane(1.0, 1.0, 1);
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 3, 2]);
        assert_eq!(mesh.vertices[2].position, Vec3::new(-0.5, 0.5, 0.0));
    }

    #[test]
    fn test_plane_clamps_segments() {
        let mesh = create_plane(1.0, 1.0, 0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_cube() {
        let mesh = create_cube(2.0);
        assert_well_formed(&mesh);
        assert_ccw(&mesh);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices.len(), 36);

        for v in &mesh.vertices {
            assert_eq!(v.position.abs().max_element(), 1.0);
            // vertex lies on the face its normal points at
            assert_eq!(v.position.dot(v.normal), 1.0);
        }

        let expected = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        for (face, chunk) in mesh.vertices.chunks(4).enumerate() {
            for v in chunk {
                assert_eq!(v.face, face as f32);
                assert_eq!(v.normal, expected[face]);
            }
        }
    }

    #[test]
    fn test_sphere() {
        let mesh = create_sphere(2.0, 8, 16);
        assert_well_formed(&mesh);
        assert_ccw(&mesh);
        assert_eq!(mesh.vertex_count(), 9 * 17);
        assert_eq!(mesh.indices.len(), 6 * 8 * 16);

        for v in &mesh.vertices {
            assert!((v.position.length() - 2.0).abs() < 1e-4);
            assert!((v.position / 2.0 - v.normal).length() < 1e-5);
        }

        assert!((mesh.vertices[0].position - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        let last = mesh.vertices.last().unwrap();
        assert!((last.position - Vec3::new(0.0, -2.0, 0.0)).length() < 1e-5);
        assert_eq!(last.uv, Vec2::ONE);
    }

    #[test]
    fn test_sphere_clamps_segments() {
        let mesh = create_sphere(1.0, 1, 1);
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 3 * 4);
        assert_eq!(mesh.triangle_count(), 2 * 2 * 3);
    }

    #[test]
    fn test_cylinder() {
        let segments = 12;
        let mesh = create_cylinder(0.5, 3.0, segments);
        assert_well_formed(&mesh);
        assert_ccw(&mesh);
        assert_eq!(mesh.vertex_count() as u32, 4 * segments + 6);
        assert_eq!(mesh.indices.len() as u32, 12 * segments);

        for v in &mesh.vertices {
            assert!(v.position.y.abs() <= 1.5 + 1e-6);
            match v.face as u32 {
                0 => {
                    assert_eq!(v.normal.y, 0.0);
                    assert!((v.position.with_y(0.0).length() - 0.5).abs() < 1e-5);
                }
                1 => assert_eq!(v.normal, Vec3::Y),
                2 => assert_eq!(v.normal, Vec3::NEG_Y),
                other => panic!("unexpected face id {other}"),
            }
        }
    }

    #[test]
    fn test_cylinder_clamps_segments() {
        let mesh = create_cylinder(1.0, 1.0, 0);
        assert_well_formed(&mesh);
        assert_ccw(&mesh);
        assert_eq!(mesh.vertex_count(), 4 * 3 + 6);
        assert_eq!(mesh.indices.len(), 36);
    }

    #[test]
    fn test_segment_upper_bound() {
        assert_eq!(clamp_segments("plane", u32::MAX, 1), MAX_SEGMENTS);
        assert_eq!(clamp_segments("plane", MAX_SEGMENTS, 1), MAX_SEGMENTS);
        assert_eq!(clamp_segments("plane", 7, 1), 7);

        // index arithmetic at the bound stays inside u32
        let row = MAX_SEGMENTS as u64 + 1;
        assert!(row * row <= u32::MAX as u64);
    }

    #[test]
    fn test_degenerate_dimensions() {
        for mesh in [
            create_plane(0.0, -1.0, 3),
            create_cube(0.0),
            create_sphere(0.0, 4, 4),
            create_cylinder(0.0, 0.0, 5),
        ] {
            assert_well_formed(&mesh);
        }
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut mesh = create_plane(1.0, 1.0, 1);
        let cube = create_cube(1.0);
        mesh.append(&cube);

        assert_eq!(mesh.vertex_count(), 4 + 24);
        assert_eq!(mesh.triangle_count(), 2 + 12);
        assert_eq!(mesh.indices[6], 4);
        assert_well_formed(&mesh);
    }
}
