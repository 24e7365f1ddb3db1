//! Circles and ellipses, drawn as triangle fans.
//!
//! Fan layout for `n` segments: point 0 is the centre, points `1..=n` walk
//! the perimeter at `phase + i · 2π/n`, and point `n + 1` repeats point 1 to
//! close the fan.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat4, Vec2, Vec3};

use super::{emit_vertex, GeometryState};
use crate::error::GeometryError;
use crate::topology::Topology;
use crate::vertex_buffer::VertexSink;

pub const DEFAULT_SEGMENTS: u32 = 24;
pub const MIN_SEGMENTS: u32 = 3;

/// Perimeter tessellation shared by both fan shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fan {
    segments: u32,
    /// Segment count restored by `auto_segments`.
    default_segments: u32,
}

impl Fan {
    fn new(default_segments: u32) -> Self {
        let segments = default_segments.max(MIN_SEGMENTS);
        Self {
            segments,
            default_segments: segments,
        }
    }

    fn set_segments(&mut self, segments: u32) -> Result<(), GeometryError> {
        if segments < MIN_SEGMENTS {
            return Err(GeometryError::InvalidSegments { segments });
        }
        self.segments = segments;
        Ok(())
    }

    fn auto(&mut self) {
        // screen-size driven tessellation is not available
        log::debug!(
            "auto segments requested, using default of {}",
            self.default_segments
        );
        self.segments = self.default_segments;
    }

    fn vertex_count(&self) -> usize {
        self.segments as usize + 2
    }

    /// Angles of the `segments + 2` fan points; the centre gets `None`.
    fn angles(&self, phase: f32) -> impl Iterator<Item = Option<f32>> {
        let n = self.segments;
        let step = TAU / n as f32;
        std::iter::once(None).chain((1..=n + 1).map(move |i| {
            // the closing point repeats the first
            let i = if i == n + 1 { 1 } else { i };
            Some(phase + step * i as f32)
        }))
    }

    fn points(&self, half_extent: Vec2, phase: f32) -> Vec<Vec3> {
        self.angles(phase)
            .map(|a| match a {
                None => Vec3::ZERO,
                Some(a) => Vec3::new(a.cos() * half_extent.x, a.sin() * half_extent.y, 0.0),
            })
            .collect()
    }

    fn uvs(&self, phase: f32) -> Vec<Vec2> {
        self.angles(phase)
            .map(|a| match a {
                None => Vec2::splat(0.5),
                Some(a) => Vec2::new(a.cos() * 0.5 + 0.5, a.sin() * 0.5 + 0.5),
            })
            .collect()
    }

    fn write(
        &self,
        state: &GeometryState,
        half_extent: Vec2,
        phase: f32,
        sink: &mut dyn VertexSink,
    ) -> Result<(), GeometryError> {
        let points = self.points(half_extent, phase);
        let uvs = self.uvs(phase);
        for (p, uv) in points.into_iter().zip(uvs) {
            emit_vertex(sink, p, state.normal, state.color, uv)?;
        }
        Ok(())
    }
}

// ── Circle ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub(super) state: GeometryState,
    radius: f32,
    fan: Fan,
}

impl Circle {
    /// Circle of radius 0.5 centred at the origin in the XY plane.
    pub fn new(state: GeometryState, segments: u32) -> Self {
        Self {
            state,
            radius: 0.5,
            fan: Fan::new(segments),
        }
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn segments(mut self, segments: u32) -> Result<Self, GeometryError> {
        self.fan.set_segments(segments)?;
        Ok(self)
    }

    /// Falls back to the default segment count.
    pub fn auto_segments(mut self) -> Self {
        self.fan.auto();
        self
    }

    pub fn segment_count(&self) -> u32 {
        self.fan.segments
    }

    /// Fan points in object space.
    pub fn points(&self) -> Vec<Vec3> {
        self.fan.points(Vec2::splat(self.radius), 0.0)
    }

    pub fn uvs(&self) -> Vec<Vec2> {
        self.fan.uvs(0.0)
    }

    pub fn topology(&self) -> Topology {
        Topology::TriangleFan
    }

    pub fn vertex_count(&self, _model: Mat4, _view: Mat4, _projection: Mat4) -> usize {
        self.fan.vertex_count()
    }

    pub fn write_to_vertex_buffer(&self, sink: &mut dyn VertexSink) -> Result<(), GeometryError> {
        self.fan
            .write(&self.state, Vec2::splat(self.radius), 0.0, sink)
    }
}

// ── Ellipse ───────────────────────────────────────────────────────────────────

/// Ellipse inscribed in a `width × height` box; the perimeter starts at the
/// top (phase π/2).
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub(super) state: GeometryState,
    width: f32,
    height: f32,
    fan: Fan,
}

impl Ellipse {
    pub fn new(state: GeometryState, segments: u32) -> Self {
        Self {
            state,
            width: 1.0,
            height: 1.0,
            fan: Fan::new(segments),
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

    pub fn segments(mut self, segments: u32) -> Result<Self, GeometryError> {
        self.fan.set_segments(segments)?;
        Ok(self)
    }

    pub fn auto_segments(mut self) -> Self {
        self.fan.auto();
        self
    }

    pub fn segment_count(&self) -> u32 {
        self.fan.segments
    }

    fn half_extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    pub fn points(&self) -> Vec<Vec3> {
        self.fan.points(self.half_extent(), FRAC_PI_2)
    }

    pub fn uvs(&self) -> Vec<Vec2> {
        self.fan.uvs(FRAC_PI_2)
    }

    pub fn topology(&self) -> Topology {
        Topology::TriangleFan
    }

    pub fn vertex_count(&self, _model: Mat4, _view: Mat4, _projection: Mat4) -> usize {
        self.fan.vertex_count()
    }

    pub fn write_to_vertex_buffer(&self, sink: &mut dyn VertexSink) -> Result<(), GeometryError> {
        self.fan
            .write(&self.state, self.half_extent(), FRAC_PI_2, sink)
    }
}
