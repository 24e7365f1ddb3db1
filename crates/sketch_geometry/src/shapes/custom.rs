//! General-purpose container of explicit vertices.
//!
//! Unlike the procedural builders a `CustomGeometry` is meant to live across
//! frames: fill it once, draw it as often as needed, `clear` and refill when
//! the data changes.

use glam::{Mat4, Vec2, Vec3};
use sketch_core::Color;

use super::GeometryState;
use crate::attributes::Channel;
use crate::error::GeometryError;
use crate::topology::Topology;
use crate::vertex_buffer::VertexSink;

/// One explicit vertex. Channels left `None` get the packer's defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomVertex {
    pub position: Vec3,
    pub normal: Option<Vec3>,
    pub color: Option<Color>,
    pub uvs: [Option<Vec2>; 4],
}

impl CustomVertex {
    fn at(position: Vec3) -> Self {
        Self {
            position,
            normal: None,
            color: None,
            uvs: [None; 4],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomGeometry {
    pub(super) state: GeometryState,
    topology: Topology,
    vertex_size: usize,
    vertices: Vec<CustomVertex>,
}

impl CustomGeometry {
    /// Empty container holding at most `vertex_size` vertices.
    pub fn new(state: GeometryState, topology: Topology, vertex_size: usize) -> Self {
        Self {
            state,
            topology,
            vertex_size,
            vertices: Vec::with_capacity(vertex_size),
        }
    }

    /// Appends a vertex at `(x, y, z)`.
    pub fn vertex(&mut self, x: f32, y: f32, z: f32) -> Result<&mut Self, GeometryError> {
        if self.vertices.len() == self.vertex_size {
            return Err(GeometryError::CapacityExceeded {
                requested: self.vertex_size + 1,
                capacity: self.vertex_size,
            });
        }
        self.vertices.push(CustomVertex::at(Vec3::new(x, y, z)));
        Ok(self)
    }

    fn last(&mut self) -> Option<&mut CustomVertex> {
        let last = self.vertices.last_mut();
        if last.is_none() {
            log::warn!("vertex attribute set on an empty custom geometry; ignored");
        }
        last
    }

    pub fn vertex_color(&mut self, color: impl Into<Color>) -> &mut Self {
        let color = color.into();
        if let Some(v) = self.last() {
            v.color = Some(color);
        }
        self
    }

    pub fn vertex_normal(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        if let Some(v) = self.last() {
            v.normal = Some(Vec3::new(x, y, z));
        }
        self
    }

    /// Sets texture coordinates of uv `set` (0..=3) on the last vertex.
    pub fn vertex_uv(&mut self, set: usize, u: f32, v: f32) -> Result<&mut Self, GeometryError> {
        Channel::uv(set)?;
        if let Some(vertex) = self.last() {
            vertex.uvs[set] = Some(Vec2::new(u, v));
        }
        Ok(self)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[CustomVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex capacity fixed at construction.
    pub fn vertex_size(&self) -> usize {
        self.vertex_size
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertex_count(&self, _model: Mat4, _view: Mat4, _projection: Mat4) -> usize {
        self.vertices.len()
    }

    pub fn write_to_vertex_buffer(&self, sink: &mut dyn VertexSink) -> Result<(), GeometryError> {
        for v in &self.vertices {
            sink.write_fixed(Channel::Position0, &v.position.to_array())?;
            if let Some(n) = v.normal {
                sink.write_fixed(Channel::Normal0, &n.to_array())?;
            }
            if let Some(c) = v.color {
                sink.write_fixed(Channel::Color0, &c.to_array())?;
            }
            for (set, uv) in v.uvs.iter().enumerate() {
                if let Some(uv) = uv {
                    sink.write_fixed(Channel::uv(set)?, &uv.to_array())?;
                }
            }
            sink.write_default_values_until(Channel::End)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeFlags;
    use crate::vertex_buffer::VertexBuffer;

    fn triangle() -> Result<CustomGeometry, GeometryError> {
        let mut g = CustomGeometry::new(GeometryState::default(), Topology::Triangles, 3);
        g.vertex(0.0, 0.0, 0.0)?.vertex_color(Color::RED);
        g.vertex(1.0, 0.0, 0.0)?.vertex_uv(0, 1.0, 0.0)?;
        g.vertex(0.0, 1.0, 0.0)?.vertex_normal(0.0, 1.0, 0.0);
        Ok(g)
    }

    #[test]
    fn rejects_vertices_past_capacity() -> anyhow::Result<()> {
        let mut g = triangle()?;
        assert_eq!(g.len(), g.vertex_size());
        assert!(matches!(
            g.vertex(2.0, 2.0, 2.0),
            Err(GeometryError::CapacityExceeded { requested: 4, capacity: 3 })
        ));
        g.clear();
        assert!(g.is_empty());
        g.vertex(2.0, 2.0, 2.0)?;
        Ok(())
    }

    #[test]
    fn unset_channels_get_defaults() -> anyhow::Result<()> {
        let g = triangle()?;
        let mut buf = VertexBuffer::new(AttributeFlags::default(), 3);
        g.write_to_vertex_buffer(&mut buf)?;

        assert_eq!(buf.channel(0, Channel::Color0), Some(&[1.0, 0.0, 0.0, 1.0][..]));
        assert_eq!(buf.channel(1, Channel::Color0), Some(&[0.0, 0.0, 0.0, 1.0][..]));
        assert_eq!(buf.channel(1, Channel::Uv0), Some(&[1.0, 0.0][..]));
        assert_eq!(buf.channel(1, Channel::Normal0), Some(&[0.0, 0.0, 1.0][..]));
        assert_eq!(buf.channel(2, Channel::Normal0), Some(&[0.0, 1.0, 0.0][..]));
        Ok(())
    }

    #[test]
    fn invalid_uv_set() -> anyhow::Result<()> {
        let mut g = triangle()?;
        assert!(matches!(
            g.vertex_uv(4, 0.0, 0.0),
            Err(GeometryError::InvalidUvSet { set: 4 })
        ));
        Ok(())
    }
}
