//! Procedural geometry builders.
//!
//! | Builder          | Topology        | Vertices               |
//! |------------------|-----------------|------------------------|
//! | `Circle`         | triangle fan    | `segments + 2`         |
//! | `Ellipse`        | triangle fan    | `segments + 2`         |
//! | `Rectangle`      | triangle strip  | 4                      |
//! | `Quad`           | triangle strip  | 4                      |
//! | `Cube`           | triangle list   | 36                     |
//! | `Line`           | triangle strip  | 2 per point            |
//! | `Sphere`         | triangle list   | `3 · 20 · 4^(L-1)`     |
//! | `CustomGeometry` | any             | caller supplied        |
//!
//! Every builder owns a [`GeometryState`] (pose, colour, textures, schema)
//! and shares the fluent setters of [`GeometryBuilder`].

pub mod circle;
pub mod cube;
pub mod custom;
pub mod line;
pub mod rectangle;
pub mod sphere;

pub use circle::{Circle, Ellipse};
pub use cube::Cube;
pub use custom::CustomGeometry;
pub use line::{Line, LinePoint};
pub use rectangle::{Quad, Rectangle};
pub use sphere::{IcosphereMesh, Sphere};

use glam::{Mat4, Vec2, Vec3};
use sketch_core::{Color, TransformStack};

use crate::attributes::{AttributeFlags, Channel};
use crate::error::GeometryError;
use crate::material::{TextureHandle, TextureSlots};
use crate::topology::Topology;
use crate::vertex_buffer::VertexSink;

// ── Shared state ──────────────────────────────────────────────────────────────

/// State every geometry kind carries regardless of its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryState {
    /// Pose operations; the base matrix is the translation to `position`.
    pub transform: TransformStack,
    pub color: Color,
    pub normal: Vec3,
    pub textures: TextureSlots,
    pub attributes: AttributeFlags,
}

impl Default for GeometryState {
    fn default() -> Self {
        Self::new(AttributeFlags::default(), Color::WHITE, Vec3::Z)
    }
}

impl GeometryState {
    pub fn new(attributes: AttributeFlags, color: Color, normal: Vec3) -> Self {
        Self {
            transform: TransformStack::new(),
            color,
            normal,
            textures: TextureSlots::default(),
            attributes,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.base().w_axis.truncate()
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.transform.model_matrix()
    }
}

/// Fluent setters common to every builder.
pub trait GeometryBuilder: Sized {
    fn state(&self) -> &GeometryState;
    fn state_mut(&mut self) -> &mut GeometryState;

    /// Places the geometry's origin; pose operations apply on top of it.
    fn position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.state_mut()
            .transform
            .set_base(Mat4::from_translation(Vec3::new(x, y, z)));
        self
    }

    fn translate(mut self, x: f32, y: f32, z: f32) -> Self {
        self.state_mut().transform.translate(Vec3::new(x, y, z));
        self
    }

    fn scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.state_mut().transform.scale(Vec3::new(x, y, z));
        self
    }

    /// Rotates by `degrees` around the axis `(x, y, z)`.
    fn rotate(mut self, degrees: f32, x: f32, y: f32, z: f32) -> Self {
        self.state_mut().transform.rotate(degrees, Vec3::new(x, y, z));
        self
    }

    fn color(mut self, color: impl Into<Color>) -> Self {
        self.state_mut().color = color.into();
        self
    }

    fn normal(mut self, x: f32, y: f32, z: f32) -> Self {
        self.state_mut().normal = Vec3::new(x, y, z);
        self
    }

    /// Non-consuming form of [`texture`](Self::texture).
    fn attach_texture(&mut self, texture: TextureHandle) -> Result<(), GeometryError> {
        self.state_mut().textures.attach(texture)
    }

    fn texture(mut self, texture: TextureHandle) -> Result<Self, GeometryError> {
        self.attach_texture(texture)?;
        Ok(self)
    }

    /// Overrides the vertex schema; it must match the target buffer's.
    fn attributes(mut self, attributes: AttributeFlags) -> Self {
        self.state_mut().attributes = attributes;
        self
    }
}

macro_rules! impl_geometry_builder {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl GeometryBuilder for $ty {
                fn state(&self) -> &GeometryState {
                    &self.state
                }
                fn state_mut(&mut self) -> &mut GeometryState {
                    &mut self.state
                }
            }
        )+
    };
}

impl_geometry_builder!(Circle, Ellipse, Rectangle, Quad, Cube, Sphere, CustomGeometry);

// ── Vertex emission ───────────────────────────────────────────────────────────

/// Writes one full vertex in canonical order.
pub(crate) fn emit_vertex(
    sink: &mut dyn VertexSink,
    position: Vec3,
    normal: Vec3,
    color: Color,
    uv: Vec2,
) -> Result<(), GeometryError> {
    sink.write_fixed(Channel::Position0, &position.to_array())?;
    sink.write_fixed(Channel::Normal0, &normal.to_array())?;
    sink.write_fixed(Channel::Color0, &color.to_array())?;
    sink.write_fixed(Channel::Uv0, &uv.to_array())?;
    sink.write_default_values_until(Channel::End)
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Any drawable geometry, as consumed by [`assemble`](crate::batch::assemble).
#[derive(Debug, Clone)]
pub enum Geometry {
    Circle(Circle),
    Ellipse(Ellipse),
    Rectangle(Rectangle),
    Quad(Quad),
    Cube(Cube),
    Line(Line),
    Sphere(Sphere),
    Custom(CustomGeometry),
}

macro_rules! dispatch {
    ($self:expr, $g:ident => $body:expr) => {
        match $self {
            Geometry::Circle($g) => $body,
            Geometry::Ellipse($g) => $body,
            Geometry::Rectangle($g) => $body,
            Geometry::Quad($g) => $body,
            Geometry::Cube($g) => $body,
            Geometry::Line($g) => $body,
            Geometry::Sphere($g) => $body,
            Geometry::Custom($g) => $body,
        }
    };
}

impl Geometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Circle(_) => "circle",
            Geometry::Ellipse(_) => "ellipse",
            Geometry::Rectangle(_) => "rectangle",
            Geometry::Quad(_) => "quad",
            Geometry::Cube(_) => "cube",
            Geometry::Line(_) => "line",
            Geometry::Sphere(_) => "sphere",
            Geometry::Custom(_) => "custom",
        }
    }

    pub fn state(&self) -> &GeometryState {
        dispatch!(self, g => g.state())
    }

    pub fn topology(&self) -> Topology {
        dispatch!(self, g => g.topology())
    }

    /// Vertices the next write will produce. The matrices are available for
    /// screen-size dependent tessellation.
    pub fn vertex_count(&self, model: Mat4, view: Mat4, projection: Mat4) -> usize {
        dispatch!(self, g => g.vertex_count(model, view, projection))
    }

    pub fn write_to_vertex_buffer(&self, sink: &mut dyn VertexSink) -> Result<(), GeometryError> {
        dispatch!(self, g => g.write_to_vertex_buffer(sink))
    }

    /// Persistent container access, for refilling between frames.
    pub fn as_custom_mut(&mut self) -> Option<&mut CustomGeometry> {
        match self {
            Geometry::Custom(g) => Some(g),
            _ => None,
        }
    }
}

macro_rules! impl_from_builder {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Geometry {
                fn from(g: $ty) -> Self {
                    Geometry::$variant(g)
                }
            }
        )+
    };
}

impl_from_builder!(
    Circle => Circle,
    Ellipse => Ellipse,
    Rectangle => Rectangle,
    Quad => Quad,
    Cube => Cube,
    Line => Line,
    Sphere => Sphere,
    Custom => CustomGeometry,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_the_transform_base() {
        let c = Circle::new(GeometryState::default(), 24)
            .position(1.0, 2.0, 3.0)
            .translate(1.0, 0.0, 0.0);
        assert_eq!(c.state().position(), Vec3::new(1.0, 2.0, 3.0));
        let origin = c.state().model_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(2.0, 2.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn fifth_texture_leaves_first_four() {
        let mut cube = Cube::new(GeometryState::default());
        for id in 0..4 {
            cube = cube.texture(TextureHandle(id)).unwrap();
        }
        assert!(matches!(
            cube.attach_texture(TextureHandle(4)),
            Err(GeometryError::TooManyTextures { max: 4 })
        ));
        let ids: Vec<_> = cube.state().textures.iter().map(|t| t.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn geometry_dispatches_to_builder() {
        let mut g: Geometry = Cube::new(GeometryState::default()).into();
        assert_eq!(g.kind(), "cube");
        assert_eq!(g.topology(), Topology::Triangles);
        assert_eq!(g.vertex_count(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY), 36);
        assert!(g.as_custom_mut().is_none());
    }

    #[test]
    fn custom_geometry_refills_in_place() -> Result<(), GeometryError> {
        let mut g: Geometry =
            CustomGeometry::new(GeometryState::default(), Topology::Points, 3).into();
        for frame in 1..=3 {
            let custom = g.as_custom_mut().expect("custom geometry");
            custom.clear();
            for i in 0..frame {
                custom.vertex(i as f32, 0.0, 0.0)?;
            }
            let none = Mat4::IDENTITY;
            assert_eq!(g.vertex_count(none, none, none), frame);
        }
        Ok(())
    }
}
