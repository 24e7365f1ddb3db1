//! Icosphere: a subdivided icosahedron projected onto a sphere.
//!
//! Level 1 is the bare icosahedron (20 triangles). Each further level splits
//! every triangle into four:
//!
//! ```text
//!        a
//!       / \
//!     ab---ca        (a, ab, ca) (b, bc, ab) (c, ca, bc) (ab, bc, ca)
//!     / \ / \
//!    b---bc--c
//! ```
//!
//! Midpoints are appended per triangle without sharing them between
//! neighbours, so `point_count` grows by three per split triangle.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec2, Vec3};

use super::{emit_vertex, GeometryState};
use crate::error::GeometryError;
use crate::topology::Topology;
use crate::vertex_buffer::VertexSink;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 6;

/// Golden ratio.
const T: f32 = 1.618_034;

#[rustfmt::skip]
const ICOSAHEDRON_POINTS: [[f32; 3]; 12] = [
    [-1.0,  T, 0.0], [ 1.0,  T, 0.0], [-1.0, -T, 0.0], [ 1.0, -T, 0.0],
    [ 0.0, -1.0,  T], [ 0.0,  1.0,  T], [ 0.0, -1.0, -T], [ 0.0,  1.0, -T],
    [  T, 0.0, -1.0], [  T, 0.0,  1.0], [ -T, 0.0, -1.0], [ -T, 0.0,  1.0],
];

#[rustfmt::skip]
const ICOSAHEDRON_TRIANGLES: [[u32; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Points and triangles of an icosphere of radius [`IcosphereMesh::RADIUS`].
#[derive(Debug, Clone, PartialEq)]
pub struct IcosphereMesh {
    level: u32,
    points: Vec<Vec3>,
    /// Triangles of every level, coarsest first.
    triangles: Vec<[u32; 3]>,
    /// First triangle of the finest level.
    triangle_index: usize,
}

impl IcosphereMesh {
    pub const RADIUS: f32 = 0.5;

    pub fn clamp_level(level: u32) -> u32 {
        level.clamp(MIN_LEVEL, MAX_LEVEL)
    }

    /// `20 · 4^(level − 1)`.
    pub fn triangle_count(level: u32) -> usize {
        20 * 4usize.pow(Self::clamp_level(level) - 1)
    }

    /// `12 + Σ_{i=1}^{level−1} 3 · triangle_count(i)`.
    pub fn point_count(level: u32) -> usize {
        let level = Self::clamp_level(level);
        12 + (1..level).map(|i| 3 * Self::triangle_count(i)).sum::<usize>()
    }

    pub fn new(level: u32) -> Self {
        let level = Self::clamp_level(level);
        let mut points = Vec::with_capacity(Self::point_count(level));
        points.extend(
            ICOSAHEDRON_POINTS
                .iter()
                .map(|p| Vec3::from(*p).normalize() * Self::RADIUS),
        );

        let all_triangles = (1..=level).map(Self::triangle_count).sum();
        let mut triangles = Vec::with_capacity(all_triangles);
        triangles.extend_from_slice(&ICOSAHEDRON_TRIANGLES);

        let mut triangle_index = 0;
        for _ in 1..level {
            let end = triangles.len();
            for t in triangle_index..end {
                let [a, b, c] = triangles[t];
                let ab = Self::push_midpoint(&mut points, a, b);
                let bc = Self::push_midpoint(&mut points, b, c);
                let ca = Self::push_midpoint(&mut points, c, a);
                triangles.push([a, ab, ca]);
                triangles.push([b, bc, ab]);
                triangles.push([c, ca, bc]);
                triangles.push([ab, bc, ca]);
            }
            triangle_index = end;
        }

        Self {
            level,
            points,
            triangles,
            triangle_index,
        }
    }

    fn push_midpoint(points: &mut Vec<Vec3>, a: u32, b: u32) -> u32 {
        let mid = (points[a as usize] + points[b as usize]) * 0.5;
        points.push(mid.normalize() * Self::RADIUS);
        (points.len() - 1) as u32
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Triangles of the finest level.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles[self.triangle_index..]
    }
}

/// Equirectangular mapping of a unit direction.
fn spherical_uv(n: Vec3) -> Vec2 {
    Vec2::new(
        0.5 + n.z.atan2(n.x) / TAU,
        0.5 + n.y.clamp(-1.0, 1.0).asin() / PI,
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub(super) state: GeometryState,
    radius: f32,
    level: u32,
}

impl Sphere {
    pub fn new(state: GeometryState, subdivisions: u32) -> Self {
        Self {
            state,
            radius: IcosphereMesh::RADIUS,
            level: IcosphereMesh::clamp_level(subdivisions),
        }
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Subdivision level, clamped to `1..=6`.
    pub fn subdivisions(mut self, level: u32) -> Self {
        let clamped = IcosphereMesh::clamp_level(level);
        if clamped != level {
            log::debug!("sphere subdivisions {level} clamped to {clamped}");
        }
        self.level = clamped;
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn topology(&self) -> Topology {
        Topology::Triangles
    }

    pub fn vertex_count(&self, _model: Mat4, _view: Mat4, _projection: Mat4) -> usize {
        3 * IcosphereMesh::triangle_count(self.level)
    }

    pub fn write_to_vertex_buffer(&self, sink: &mut dyn VertexSink) -> Result<(), GeometryError> {
        let mesh = IcosphereMesh::new(self.level);
        let scale = self.radius / IcosphereMesh::RADIUS;
        for triangle in mesh.triangles() {
            for &i in triangle {
                let p = mesh.points()[i as usize];
                let normal = p.normalize();
                emit_vertex(sink, p * scale, normal, self.state.color, spherical_uv(normal))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeFlags, Channel};
    use crate::vertex_buffer::VertexBuffer;

    #[test]
    fn closed_form_counts() {
        assert_eq!(IcosphereMesh::triangle_count(1), 20);
        assert_eq!(IcosphereMesh::triangle_count(2), 80);
        assert_eq!(IcosphereMesh::triangle_count(3), 320);
        assert_eq!(IcosphereMesh::point_count(1), 12);
        assert_eq!(IcosphereMesh::point_count(3), 12 + 60 + 240);
        // out-of-range levels clamp
        assert_eq!(IcosphereMesh::triangle_count(0), 20);
        assert_eq!(IcosphereMesh::triangle_count(9), 20 * 4usize.pow(5));
    }

    #[test]
    fn mesh_matches_closed_form() {
        for level in 1..=4 {
            let mesh = IcosphereMesh::new(level);
            assert_eq!(mesh.points().len(), IcosphereMesh::point_count(level));
            assert_eq!(mesh.triangles().len(), IcosphereMesh::triangle_count(level));
            for p in mesh.points() {
                assert!((p.length() - 0.5).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn triangles_face_outward() {
        let mesh = IcosphereMesh::new(2);
        for [a, b, c] in mesh.triangles() {
            let [a, b, c] = [*a, *b, *c].map(|i| mesh.points()[i as usize]);
            let n = (b - a).cross(c - a);
            assert!(n.dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn writes_normals_and_uvs() -> anyhow::Result<()> {
        let sphere = Sphere::new(GeometryState::default(), 1).radius(2.0);
        let mut buf = VertexBuffer::new(AttributeFlags::default(), 60);
        sphere.write_to_vertex_buffer(&mut buf)?;
        assert_eq!(buf.used_elements(), 60);
        for v in 0..60 {
            let p = Vec3::from_slice(buf.channel(v, Channel::Position0).unwrap());
            let n = Vec3::from_slice(buf.channel(v, Channel::Normal0).unwrap());
            assert!((p.length() - 2.0).abs() < 1e-5);
            assert!((p.normalize() - n).length() < 1e-5);
            let uv = buf.channel(v, Channel::Uv0).unwrap();
            assert!(uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
        Ok(())
    }

    #[test]
    fn subdivisions_clamp() {
        let s = Sphere::new(GeometryState::default(), 3).subdivisions(12);
        assert_eq!(s.level(), MAX_LEVEL);
        assert_eq!(s.subdivisions(0).level(), MIN_LEVEL);
    }
}
