use crate::math::Vec3;

/// A lit vertex: position followed by normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    /// Interleaved layout uploaded to the GPU
    pub fn to_array(&self) -> [f32; VERTEX_STRIDE] {
        let [px, py, pz] = self.position.to_array();
        let [nx, ny, nz] = self.normal.to_array();
        [px, py, pz, nx, ny, nz]
    }
}

/// Floats per interleaved vertex
pub const VERTEX_STRIDE: usize = 6;

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Get vertex buffer data as flat f32 array
    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| v.to_array())
            .collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Ring of `segments + 1` vertices around the Y axis at height `y`.
///
/// The seam vertex is duplicated so side quads index both rings uniformly.
/// `normal_y` tilts the outward normals for cones.
pub fn create_ring(y: f32, radius: f32, segments: usize, normal_y: f32) -> Vec<Vertex> {
    (0..=segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin_a, cos_a) = angle.sin_cos();

            let position = Vec3::new(radius * sin_a, y, radius * cos_a);
            let normal = Vec3::new(sin_a, normal_y, cos_a).normalize();

            Vertex::new(position, normal)
        })
        .collect()
}

/// Connect two rings created by `create_ring` with outward-facing quads
pub fn connect_rings(mesh: &mut Mesh, lower_start: u32, upper_start: u32, segments: usize) {
    for i in 0..segments as u32 {
        let a = lower_start + i;
        let b = lower_start + i + 1;
        let c = upper_start + i + 1;
        let d = upper_start + i;

        mesh.add_quad(a, b, c, d);
    }
}
