//! Tessellation of scene geometry descriptors into triangle meshes

use crate::math::Vec3;
use crate::scene::Geometry;
use super::buffer::{Mesh, Vertex, create_ring, connect_rings};

/// Minimum radial segments for a closed cylinder
pub const MIN_RADIAL_SEGMENTS: u32 = 3;

/// Build the triangle mesh for a geometry descriptor
pub fn tessellate(geometry: &Geometry) -> Mesh {
    match *geometry {
        Geometry::Box { width, height, depth } => box_mesh(width, height, depth),
        Geometry::Cylinder { radius_top, radius_bottom, height, radial_segments } => {
            cylinder_mesh(radius_top, radius_bottom, height, radial_segments)
        }
    }
}

/// Axis-aligned box centered on the origin, 4 vertices per face so normals stay flat
pub fn box_mesh(width: f32, height: f32, depth: f32) -> Mesh {
    let half = Vec3::new(width / 2.0, height / 2.0, depth / 2.0);

    // (normal, u, v) with u x v == normal so the quads wind counter-clockwise
    let faces = [
        (Vec3::RIGHT, -Vec3::FORWARD, Vec3::UP),
        (-Vec3::RIGHT, Vec3::FORWARD, Vec3::UP),
        (Vec3::UP, Vec3::RIGHT, -Vec3::FORWARD),
        (-Vec3::UP, Vec3::RIGHT, Vec3::FORWARD),
        (Vec3::FORWARD, Vec3::RIGHT, Vec3::UP),
        (-Vec3::FORWARD, -Vec3::RIGHT, Vec3::UP),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut mesh = Mesh::new();
    for (normal, u, v) in faces {
        let verts = corners.iter().map(|&(su, sv)| {
            let p = normal + u.scale(su) + v.scale(sv);
            Vertex::new(p * half, normal)
        });
        let start = mesh.add_vertices(verts);
        mesh.add_quad(start, start + 1, start + 2, start + 3);
    }
    mesh
}

/// Truncated cone centered on the origin with its axis along Y
pub fn cylinder_mesh(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Mesh {
    let segments = radial_segments.max(MIN_RADIAL_SEGMENTS) as usize;
    let half_height = height / 2.0;
    let slope = if height > 0.0 { (radius_bottom - radius_top) / height } else { 0.0 };

    let mut mesh = Mesh::new();

    let lower = mesh.add_vertices(create_ring(-half_height, radius_bottom, segments, slope));
    let upper = mesh.add_vertices(create_ring(half_height, radius_top, segments, slope));
    connect_rings(&mut mesh, lower, upper, segments);

    if radius_top > 0.0 {
        add_cap(&mut mesh, half_height, radius_top, segments, true);
    }
    if radius_bottom > 0.0 {
        add_cap(&mut mesh, -half_height, radius_bottom, segments, false);
    }

    mesh
}

fn add_cap(mesh: &mut Mesh, y: f32, radius: f32, segments: usize, top: bool) {
    let normal = if top { Vec3::UP } else { -Vec3::UP };

    let center = mesh.add_vertices(std::iter::once(
        Vertex::new(Vec3::new(0.0, y, 0.0), normal),
    ));

    let rim = create_ring(y, radius, segments, 0.0)
        .into_iter()
        .map(|v| Vertex::new(v.position, normal));
    let ring = mesh.add_vertices(rim);

    for i in 0..segments as u32 {
        if top {
            mesh.add_triangle(center, ring + i, ring + i + 1);
        } else {
            mesh.add_triangle(center, ring + i + 1, ring + i);
        }
    }
}
