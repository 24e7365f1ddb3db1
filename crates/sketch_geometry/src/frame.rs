//! Immediate-mode front: one `Frame` per rendered frame.
//!
//! The frame owns the vertex buffer, hands out builders seeded from the
//! [`SketchConfig`] and records one batch per `draw` call. [`Frame::finish`]
//! packages everything for the renderer and rewinds the buffer.

use glam::{Mat4, Vec3};
use sketch_core::{CameraView, Color, SketchConfig};

use crate::attributes::{AttributeFlags, VertexLayout};
use crate::batch::{assemble, RenderBatch};
use crate::error::GeometryError;
use crate::material::Material;
use crate::shapes::{
    Circle, Cube, CustomGeometry, Ellipse, Geometry, GeometryState, Line, Quad, Rectangle,
    Sphere,
};
use crate::topology::Topology;
use crate::vertex_buffer::{VertexBuffer, VertexSink};

/// Camera state of the most recent draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPacket {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_proj: Mat4,
    pub eye: Vec3,
}

impl CameraPacket {
    pub fn capture(camera: &dyn CameraView) -> Self {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        Self {
            view,
            projection,
            view_proj: projection * view,
            eye: camera.position(),
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug)]
pub struct FramePacket {
    /// `None` when nothing was drawn.
    pub camera: Option<CameraPacket>,
    /// In draw order; ranges index into `vertices`.
    pub batches: Vec<RenderBatch>,
    /// Interleaved vertex data.
    pub vertices: Vec<f32>,
    pub layout: VertexLayout,
}

impl FramePacket {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

pub struct Frame {
    config: SketchConfig,
    schema: AttributeFlags,
    buffer: VertexBuffer,
    material: Material,
    batches: Vec<RenderBatch>,
    camera: Option<CameraPacket>,
}

impl Frame {
    /// Validates `config`, then sizes the vertex buffer and its schema from it.
    pub fn new(config: &SketchConfig) -> Result<Self, GeometryError> {
        config.validate()?;
        let schema = AttributeFlags::from_names(&config.attributes)?;
        log::debug!(
            "frame buffer: {} vertices of {:?} ({} floats each)",
            config.vertex_capacity,
            schema,
            schema.stride()
        );
        Ok(Self {
            config: config.clone(),
            schema,
            buffer: VertexBuffer::new(schema, config.vertex_capacity),
            material: Material::default(),
            batches: Vec::new(),
            camera: None,
        })
    }

    pub fn schema(&self) -> AttributeFlags {
        self.schema
    }

    pub fn buffer(&self) -> &VertexBuffer {
        &self.buffer
    }

    pub fn batches(&self) -> &[RenderBatch] {
        &self.batches
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Material used by subsequent draws.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    // ── Builders ──────────────────────────────────────────────────────────────

    fn state(&self) -> GeometryState {
        GeometryState::new(
            self.schema,
            Color::from(self.config.default_color),
            Vec3::from(self.config.default_normal),
        )
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.state(), self.config.circle_segments)
    }

    pub fn ellipse(&self) -> Ellipse {
        Ellipse::new(self.state(), self.config.circle_segments)
    }

    pub fn rect(&self) -> Rectangle {
        Rectangle::new(self.state())
    }

    pub fn quad(&self) -> Quad {
        Quad::new(self.state())
    }

    pub fn cube(&self) -> Cube {
        Cube::new(self.state())
    }

    pub fn line(&self) -> Line {
        Line::new(self.state(), self.config.line_width)
    }

    pub fn sphere(&self) -> Sphere {
        Sphere::new(self.state(), self.config.sphere_subdivisions)
    }

    /// Persistent container; keep it and draw it across frames.
    pub fn custom(&self, topology: Topology, vertex_size: usize) -> CustomGeometry {
        CustomGeometry::new(self.state(), topology, vertex_size)
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    /// Packs `geometry` and records its batch. Returns the number of batches
    /// recorded so far.
    pub fn draw(
        &mut self,
        geometry: &Geometry,
        camera: &dyn CameraView,
    ) -> Result<usize, GeometryError> {
        let batches = assemble(geometry, &mut self.buffer, camera, &self.material)?;
        self.camera = Some(CameraPacket::capture(camera));
        self.batches.extend(batches);
        Ok(self.batches.len())
    }

    /// Hands the frame's batches and vertices over and starts a new frame.
    pub fn finish(&mut self) -> FramePacket {
        let packet = FramePacket {
            camera: self.camera.take(),
            batches: std::mem::take(&mut self.batches),
            vertices: self.buffer.as_floats().to_vec(),
            layout: self.schema.vertex_layout(),
        };
        log::debug!(
            "frame finished: {} batches, {} vertices",
            packet.batches.len(),
            self.buffer.used_elements()
        );
        self.buffer.reset();
        packet
    }
}
