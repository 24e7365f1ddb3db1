//! Render batch assembly.
//!
//! A [`RenderBatch`] is the complete, immutable description of one draw
//! call: which vertex range to read, with which matrices, shader and
//! textures. The renderer consumes it; nothing here touches the GPU.

use glam::{Mat4, Vec3};
use sketch_core::CameraView;

use crate::attributes::AttributeFlags;
use crate::error::GeometryError;
use crate::material::{Material, RenderState, ShaderHandle, TextureSlots};
use crate::shapes::Geometry;
use crate::topology::Topology;
use crate::vertex_buffer::VertexSink;

/// One draw call, fully resolved.
#[derive(Debug, PartialEq)]
pub struct RenderBatch {
    pub topology: Topology,
    /// First vertex in the sink.
    pub element_index: usize,
    pub element_count: usize,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    /// World-space camera position at draw time.
    pub camera_position: Vec3,
    pub attributes: AttributeFlags,
    pub textures: TextureSlots,
    pub shader: ShaderHandle,
    pub state: RenderState,
}

impl RenderBatch {
    /// `projection · view · model`, as uploaded to the vertex shader.
    pub fn model_view_projection(&self) -> Mat4 {
        self.projection * self.view * self.model
    }

    pub fn vertex_range(&self) -> std::ops::Range<usize> {
        self.element_index..self.element_index + self.element_count
    }
}

/// Writes `geometry` into `sink` and describes the result.
///
/// Nothing is written unless the whole geometry fits, so a failed call
/// leaves no partial batch behind.
pub fn assemble(
    geometry: &Geometry,
    sink: &mut dyn VertexSink,
    camera: &dyn CameraView,
    material: &Material,
) -> Result<Vec<RenderBatch>, GeometryError> {
    let state = geometry.state();
    if state.attributes != sink.schema() {
        return Err(GeometryError::SchemaMismatch {
            geometry: state.attributes,
            buffer: sink.schema(),
        });
    }

    let model = state.model_matrix();
    let view = camera.view_matrix();
    let projection = camera.projection_matrix();

    let vertex_count = geometry.vertex_count(model, view, projection);
    if let Some(capacity) = sink.capacity() {
        let requested = sink.used_elements() + vertex_count;
        if requested > capacity {
            return Err(GeometryError::CapacityExceeded {
                requested,
                capacity,
            });
        }
    }

    geometry.write_to_vertex_buffer(sink)?;

    let element_index = sink.used_elements() - vertex_count;
    log::trace!(
        "{} batch: vertices {}..{}",
        geometry.kind(),
        element_index,
        element_index + vertex_count
    );

    Ok(vec![RenderBatch {
        topology: geometry.topology(),
        element_index,
        element_count: vertex_count,
        model,
        view,
        projection,
        camera_position: camera.position(),
        attributes: state.attributes,
        textures: state.textures,
        shader: material.shader,
        state: material.state,
    }])
}

impl Geometry {
    /// Same as [`assemble`].
    pub fn to_render_batch(
        &self,
        sink: &mut dyn VertexSink,
        camera: &dyn CameraView,
        material: &Material,
    ) -> Result<Vec<RenderBatch>, GeometryError> {
        assemble(self, sink, camera, material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::BlendMode;
    use crate::shapes::{Circle, Cube, GeometryBuilder, GeometryState, Line, Rectangle, Sphere};
    use crate::vertex_buffer::VertexBuffer;
    use sketch_core::{Camera, Color};

    fn state() -> GeometryState {
        GeometryState::default()
    }

    #[test]
    fn batches_follow_call_order() -> anyhow::Result<()> {
        let camera = Camera::default();
        let additive = RenderState {
            blend: BlendMode::Additive,
            ..RenderState::default()
        };
        let material = Material::new(ShaderHandle(7)).with_state(additive);
        let mut buf = VertexBuffer::new(AttributeFlags::default(), 1024);

        let circle: Geometry = Circle::new(state(), 24).into();
        let cube: Geometry = Cube::new(state()).translate(1.0, 0.0, 0.0).into();

        let first = assemble(&circle, &mut buf, &camera, &material)?;
        let second = assemble(&cube, &mut buf, &camera, &material)?;

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].vertex_range(), 0..26);
        assert_eq!(second[0].vertex_range(), 26..62);
        assert_eq!(second[0].topology, Topology::Triangles);
        assert_eq!(second[0].shader, ShaderHandle(7));
        assert_eq!(second[0].state.blend, BlendMode::Additive);
        assert_eq!(second[0].camera_position, camera.eye);
        assert!((second[0].model.w_axis.x - 1.0).abs() < 1e-6);

        // the batch's combined matrix places the cube where the camera sees it
        let expected = camera.build_view_projection_matrix().project_point3(Vec3::X);
        let got = second[0].model_view_projection().project_point3(Vec3::ZERO);
        assert!((got - expected).length() < 1e-5);
        Ok(())
    }

    #[test]
    fn identical_geometry_writes_identical_ranges() -> anyhow::Result<()> {
        let camera = Camera::default();
        let material = Material::default();
        let mut buf = VertexBuffer::new(AttributeFlags::default(), 1024);
        let sphere: Geometry = Sphere::new(state(), 2).color(Color::RED).into();

        let a = sphere.to_render_batch(&mut buf, &camera, &material)?;
        let b = sphere.to_render_batch(&mut buf, &camera, &material)?;
        let ra = buf.range(a[0].element_index, a[0].element_count).unwrap();
        let rb = buf.range(b[0].element_index, b[0].element_count).unwrap();
        assert_eq!(bytemuck::cast_slice::<f32, u8>(ra), bytemuck::cast_slice::<f32, u8>(rb));
        Ok(())
    }

    #[test]
    fn schema_must_match() {
        let camera = Camera::default();
        let mut buf = VertexBuffer::new(AttributeFlags::POSITION0, 16);
        let rect: Geometry = Rectangle::new(state()).into();
        assert!(matches!(
            assemble(&rect, &mut buf, &camera, &Material::default()),
            Err(GeometryError::SchemaMismatch { .. })
        ));

        let rect: Geometry = Rectangle::new(state())
            .attributes(AttributeFlags::POSITION0)
            .into();
        assert!(assemble(&rect, &mut buf, &camera, &Material::default()).is_ok());
    }

    #[test]
    fn overflow_leaves_no_partial_batch() -> anyhow::Result<()> {
        let camera = Camera::default();
        let mut buf = VertexBuffer::new(AttributeFlags::default(), 40);
        let cube: Geometry = Cube::new(state()).into();
        assemble(&cube, &mut buf, &camera, &Material::default())?;

        assert_eq!(
            assemble(&cube, &mut buf, &camera, &Material::default()),
            Err(GeometryError::CapacityExceeded {
                requested: 72,
                capacity: 40
            })
        );
        assert_eq!(buf.used_elements(), 36);
        Ok(())
    }

    #[test]
    fn empty_line_gives_empty_batch() -> anyhow::Result<()> {
        let camera = Camera::default();
        let mut buf = VertexBuffer::new(AttributeFlags::default(), 8);
        let line: Geometry = Line::new(state(), 1.0).into();
        let batches = assemble(&line, &mut buf, &camera, &Material::default())?;
        assert_eq!(batches[0].element_count, 0);
        Ok(())
    }
}
