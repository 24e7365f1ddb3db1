//! Four-corner shapes drawn as a triangle strip.
//!
//! Corner order is bottom-left, bottom-right, top-left, top-right, which
//! gives two counter-clockwise triangles. Texture space has its origin at the
//! bottom-left corner.

use glam::{Mat4, Vec2, Vec3};

use super::{emit_vertex, GeometryState};
use crate::error::GeometryError;
use crate::topology::Topology;
use crate::vertex_buffer::VertexSink;

const DEFAULT_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

const UNIT_CORNERS: [[f32; 3]; 4] = [
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
    [-0.5, 0.5, 0.0],
    [0.5, 0.5, 0.0],
];

fn write_corners(
    state: &GeometryState,
    corners: &[Vec3; 4],
    uvs: &[Vec2; 4],
    sink: &mut dyn VertexSink,
) -> Result<(), GeometryError> {
    for (p, uv) in corners.iter().zip(uvs) {
        emit_vertex(sink, *p, state.normal, state.color, *uv)?;
    }
    Ok(())
}

// ── Rectangle ─────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle centred at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(super) state: GeometryState,
    width: f32,
    height: f32,
}

impl Rectangle {
    pub fn new(state: GeometryState) -> Self {
        Self {
            state,
            width: 1.0,
            height: 1.0,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn corners(&self) -> [Vec3; 4] {
        let scale = Vec3::new(self.width, self.height, 1.0);
        UNIT_CORNERS.map(|c| Vec3::from(c) * scale)
    }

    pub fn topology(&self) -> Topology {
        Topology::TriangleStrip
    }

    pub fn vertex_count(&self, _model: Mat4, _view: Mat4, _projection: Mat4) -> usize {
        4
    }

    pub fn write_to_vertex_buffer(&self, sink: &mut dyn VertexSink) -> Result<(), GeometryError> {
        write_corners(&self.state, &self.corners(), &DEFAULT_UVS.map(Vec2::from), sink)
    }
}

// ── Quad ──────────────────────────────────────────────────────────────────────

/// Quadrilateral with caller-supplied corners, in strip order.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    pub(super) state: GeometryState,
    corners: [Vec3; 4],
    uvs: [Vec2; 4],
}

impl Quad {
    /// Unit square until [`points`](Self::points) is called.
    pub fn new(state: GeometryState) -> Self {
        Self {
            state,
            corners: UNIT_CORNERS.map(Vec3::from),
            uvs: DEFAULT_UVS.map(Vec2::from),
        }
    }

    /// Flat corner list: 8 floats (x, y per corner, z = 0) or 12 floats
    /// (x, y, z per corner).
    pub fn points(mut self, flat: &[f32]) -> Result<Self, GeometryError> {
        let width = match flat.len() {
            8 => 2,
            12 => 3,
            len => return Err(GeometryError::InvalidPointData { len }),
        };
        for (corner, chunk) in self.corners.iter_mut().zip(flat.chunks_exact(width)) {
            *corner = Self::corner(chunk);
        }
        Ok(self)
    }

    /// Four corners given as rows of 2 or 3 components.
    pub fn points_table<P: AsRef<[f32]>>(mut self, table: &[P]) -> Result<Self, GeometryError> {
        let total: usize = table.iter().map(|p| p.as_ref().len()).sum();
        let well_formed = table.len() == 4
            && table
                .iter()
                .all(|p| matches!(p.as_ref().len(), 2 | 3));
        if !well_formed {
            return Err(GeometryError::InvalidPointData { len: total });
        }
        for (corner, row) in self.corners.iter_mut().zip(table) {
            *corner = Self::corner(row.as_ref());
        }
        Ok(self)
    }

    /// Replaces the texture coordinates of the four corners.
    pub fn uvs(mut self, uvs: [[f32; 2]; 4]) -> Self {
        self.uvs = uvs.map(Vec2::from);
        self
    }

    fn corner(c: &[f32]) -> Vec3 {
        Vec3::new(c[0], c[1], c.get(2).copied().unwrap_or(0.0))
    }

    pub fn corners(&self) -> [Vec3; 4] {
        self.corners
    }

    pub fn topology(&self) -> Topology {
        Topology::TriangleStrip
    }

    pub fn vertex_count(&self, _model: Mat4, _view: Mat4, _projection: Mat4) -> usize {
        4
    }

    pub fn write_to_vertex_buffer(&self, sink: &mut dyn VertexSink) -> Result<(), GeometryError> {
        write_corners(&self.state, &self.corners, &self.uvs, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeFlags, Channel};
    use crate::vertex_buffer::VertexBuffer;

    #[test]
    fn rectangle_corners_are_centred() {
        let r = Rectangle::new(GeometryState::default()).width(4.0).height(2.0);
        assert_eq!(
            r.corners(),
            [
                Vec3::new(-2.0, -1.0, 0.0),
                Vec3::new(2.0, -1.0, 0.0),
                Vec3::new(-2.0, 1.0, 0.0),
                Vec3::new(2.0, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn rectangle_uv_origin_is_bottom_left() -> anyhow::Result<()> {
        let mut buf = VertexBuffer::new(AttributeFlags::default(), 4);
        Rectangle::new(GeometryState::default()).write_to_vertex_buffer(&mut buf)?;
        assert_eq!(buf.channel(0, Channel::Uv0), Some(&[0.0, 0.0][..]));
        assert_eq!(buf.channel(3, Channel::Uv0), Some(&[1.0, 1.0][..]));
        Ok(())
    }

    #[test]
    fn quad_accepts_flat_lists() -> anyhow::Result<()> {
        let q = Quad::new(GeometryState::default())
            .points(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0])?;
        assert_eq!(q.corners()[3], Vec3::new(1.0, 1.0, 0.0));

        let q = q.points(&[0.0, 0.0, 1.0, 2.0, 0.0, 1.0, 0.0, 3.0, 1.0, 2.0, 3.0, 1.0])?;
        assert_eq!(q.corners()[1], Vec3::new(2.0, 0.0, 1.0));
        Ok(())
    }

    #[test]
    fn quad_accepts_point_tables() -> anyhow::Result<()> {
        let table: [&[f32]; 4] = [&[0.0, 0.0], &[1.0, 0.0, 0.5], &[0.0, 1.0], &[1.0, 1.0]];
        let q = Quad::new(GeometryState::default()).points_table(&table)?;
        assert_eq!(q.corners()[1], Vec3::new(1.0, 0.0, 0.5));
        assert_eq!(q.corners()[2], Vec3::new(0.0, 1.0, 0.0));
        Ok(())
    }

    #[test]
    fn quad_rejects_malformed_points() {
        let q = Quad::new(GeometryState::default());
        assert_eq!(
            q.clone().points(&[0.0; 9]),
            Err(GeometryError::InvalidPointData { len: 9 })
        );
        let short: [&[f32]; 3] = [&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]];
        assert!(q.clone().points_table(&short).is_err());
        let wide: [&[f32]; 4] = [&[0.0; 4], &[0.0; 2], &[0.0; 2], &[0.0; 2]];
        assert_eq!(
            q.points_table(&wide),
            Err(GeometryError::InvalidPointData { len: 10 })
        );
    }

    #[test]
    fn quad_custom_uvs() -> anyhow::Result<()> {
        let q = Quad::new(GeometryState::default())
            .uvs([[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]]);
        let mut buf = VertexBuffer::new(AttributeFlags::default(), 4);
        q.write_to_vertex_buffer(&mut buf)?;
        assert_eq!(buf.channel(0, Channel::Uv0), Some(&[0.0, 1.0][..]));
        Ok(())
    }
}
