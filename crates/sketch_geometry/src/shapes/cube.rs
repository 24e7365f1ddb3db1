//! Axis-aligned box centred at the origin, unrolled into 36 vertices so each
//! face gets its own normal and uv set.

use glam::{Mat4, Vec2, Vec3};

use super::{emit_vertex, GeometryState};
use crate::error::GeometryError;
use crate::topology::Topology;
use crate::vertex_buffer::VertexSink;

/// Corner signs; scaled by the half extents.
#[rustfmt::skip]
const CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
    [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],
];

/// Corner indices, two counter-clockwise triangles per face.
#[rustfmt::skip]
const FACE_INDICES: [usize; 36] = [
    0, 1, 2,  0, 2, 3, // front  (z+)
    5, 4, 7,  5, 7, 6, // back   (z-)
    1, 5, 6,  1, 6, 2, // right  (x+)
    4, 0, 3,  4, 3, 7, // left   (x-)
    3, 2, 6,  3, 6, 7, // top    (y+)
    4, 5, 1,  4, 1, 0, // bottom (y-)
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
];

/// Per-face uvs, indexed by `vertex % 6`.
const FACE_UVS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

pub const CUBE_VERTEX_COUNT: usize = FACE_INDICES.len();

#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    pub(super) state: GeometryState,
    size: Vec3,
}

impl Cube {
    /// Unit cube.
    pub fn new(state: GeometryState) -> Self {
        Self {
            state,
            size: Vec3::ONE,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.size.x = width;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.size.y = height;
        self
    }

    pub fn depth(mut self, depth: f32) -> Self {
        self.size.z = depth;
        self
    }

    pub fn topology(&self) -> Topology {
        Topology::Triangles
    }

    pub fn vertex_count(&self, _model: Mat4, _view: Mat4, _projection: Mat4) -> usize {
        CUBE_VERTEX_COUNT
    }

    pub fn write_to_vertex_buffer(&self, sink: &mut dyn VertexSink) -> Result<(), GeometryError> {
        let half = self.size * 0.5;
        for (vertex, &corner) in FACE_INDICES.iter().enumerate() {
            let position = Vec3::from(CORNERS[corner]) * half;
            let normal = Vec3::from(FACE_NORMALS[vertex / 6]);
            let uv = Vec2::from(FACE_UVS[vertex % 6]);
            emit_vertex(sink, position, normal, self.state.color, uv)?;
        }
        Ok(())
    }
}
