//! Polylines expanded into a triangle-strip ribbon.
//!
//! Each point carries its own colour and width. A new line starts with one
//! pending point at the origin; `from` places it, `to` appends after it.
//! Colour and width setters always target the most recent point, and new
//! points inherit them.

use glam::{Mat4, Vec2, Vec3};
use sketch_core::Color;

use super::{emit_vertex, GeometryBuilder, GeometryState};
use crate::error::GeometryError;
use crate::topology::Topology;
use crate::vertex_buffer::VertexSink;

const DEGENERATE: f32 = 1e-12;
/// Longest joint offset, in half widths.
const MITER_LIMIT: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePoint {
    pub position: Vec3,
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(super) state: GeometryState,
    points: Vec<LinePoint>,
    first_placed: bool,
}

impl Line {
    pub fn new(state: GeometryState, width: f32) -> Self {
        let pending = LinePoint {
            position: Vec3::ZERO,
            color: state.color,
            width,
        };
        Self {
            state,
            points: vec![pending],
            first_placed: false,
        }
    }

    fn last_mut(&mut self) -> &mut LinePoint {
        // never empty: `new` seeds the pending point
        let last = self.points.len() - 1;
        &mut self.points[last]
    }

    fn push(&mut self, position: Vec3) {
        let prev = self.points[self.points.len() - 1];
        self.points.push(LinePoint { position, ..prev });
        self.first_placed = true;
    }

    /// Places the pending first point, or starts a new point if the line
    /// already has one.
    pub fn from(mut self, x: f32, y: f32, z: f32) -> Self {
        let position = Vec3::new(x, y, z);
        if self.points.len() == 1 && !self.first_placed {
            self.points[0].position = position;
            self.first_placed = true;
        } else {
            self.push(position);
        }
        self
    }

    pub fn to(mut self, x: f32, y: f32, z: f32) -> Self {
        self.push(Vec3::new(x, y, z));
        self
    }

    /// Closes the line back onto its first point.
    pub fn to_first(mut self) -> Self {
        let first = self.points[0];
        self.points.push(first);
        self.first_placed = true;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.last_mut().width = width;
        self
    }

    pub fn points(&self) -> &[LinePoint] {
        &self.points
    }

    pub fn topology(&self) -> Topology {
        Topology::TriangleStrip
    }

    pub fn vertex_count(&self, _model: Mat4, _view: Mat4, _projection: Mat4) -> usize {
        if self.points.len() < 2 {
            0
        } else {
            self.points.len() * 2
        }
    }

    /// Offset direction at point `i` for a half width of 1. At a joint it
    /// runs along the miter, lengthened by `1 / cos(turn / 2)` so the ribbon
    /// keeps its width on both adjacent segments, up to [`MITER_LIMIT`].
    fn side(&self, i: usize) -> Vec3 {
        let p = self.points[i].position;
        let incoming = i
            .checked_sub(1)
            .map(|j| (p - self.points[j].position).normalize_or_zero())
            .unwrap_or(Vec3::ZERO);
        let outgoing = self
            .points
            .get(i + 1)
            .map(|n| (n.position - p).normalize_or_zero())
            .unwrap_or(Vec3::ZERO);
        let segment = if outgoing != Vec3::ZERO { outgoing } else { incoming };
        let mut dir = incoming + outgoing;
        if dir.length_squared() < DEGENERATE {
            // reversal or repeated point: fall back to a single segment
            dir = segment;
        }

        let side = Vec3::Z.cross(dir);
        if side.length_squared() < DEGENERATE {
            // segment runs along Z
            return Vec3::Y.cross(dir).normalize_or(Vec3::X);
        }
        let side = side.normalize();

        let normal = Vec3::Z.cross(segment).normalize_or_zero();
        if normal == Vec3::ZERO {
            return side;
        }
        side / side.dot(normal).max(1.0 / MITER_LIMIT)
    }

    pub fn write_to_vertex_buffer(&self, sink: &mut dyn VertexSink) -> Result<(), GeometryError> {
        if self.points.len() < 2 {
            return Ok(());
        }

        let mut arc = Vec::with_capacity(self.points.len());
        let mut total = 0.0;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                total += p.position.distance(self.points[i - 1].position);
            }
            arc.push(total);
        }
        if total <= 0.0 {
            log::warn!("line of {} points has zero length", self.points.len());
        }

        for (i, point) in self.points.iter().enumerate() {
            let offset = self.side(i) * (point.width * 0.5);
            let u = if total > 0.0 { arc[i] / total } else { 0.0 };
            let normal = self.state.normal;
            emit_vertex(sink, point.position + offset, normal, point.color, Vec2::new(u, 0.0))?;
            emit_vertex(sink, point.position - offset, normal, point.color, Vec2::new(u, 1.0))?;
        }
        Ok(())
    }
}

impl GeometryBuilder for Line {
    fn state(&self) -> &GeometryState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GeometryState {
        &mut self.state
    }

    /// Colours the most recent point and every point added after it.
    fn color(mut self, color: impl Into<Color>) -> Self {
        let color = color.into();
        self.state.color = color;
        self.last_mut().color = color;
        self
    }
}
