//! `sketch_geometry` — procedural geometry and vertex packing for immediate-mode
//! drawing.
//!
//! # Module layout
//!
//! | Module          | Responsibility                                          |
//! |-----------------|---------------------------------------------------------|
//! | `attributes`    | `AttributeFlags` schema, `Channel` order, wgpu layout   |
//! | `vertex_buffer` | `VertexSink` contract + fixed-capacity `VertexBuffer`   |
//! | `topology`      | Primitive assembly modes                                |
//! | `material`      | Shader / texture handles, `RenderState`                 |
//! | `shapes`        | Builders: circle, ellipse, rect, quad, cube, line, ...  |
//! | `batch`         | `RenderBatch` + `assemble`                              |
//! | `frame`         | `Frame` front end, `FramePacket` hand-off               |
//!
//! ```rust
//! use sketch_core::{Camera, SketchConfig};
//! use sketch_geometry::{Frame, Geometry, GeometryBuilder};
//!
//! # fn main() -> Result<(), sketch_geometry::GeometryError> {
//! let camera = Camera::default();
//! let mut frame = Frame::new(&SketchConfig::default())?;
//!
//! let disc: Geometry = frame.circle().radius(2.0).color([0u8, 128, 128]).into();
//! frame.draw(&disc, &camera)?;
//!
//! let packet = frame.finish();
//! assert_eq!(packet.batches[0].element_count, 26);
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod batch;
pub mod error;
pub mod frame;
pub mod material;
pub mod shapes;
pub mod topology;
pub mod vertex_buffer;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use attributes::{AttributeFlags, Channel, VertexLayout};
pub use batch::{assemble, RenderBatch};
pub use error::GeometryError;
pub use frame::{CameraPacket, Frame, FramePacket};
pub use material::{
    BlendMode, Material, RenderState, ShaderHandle, TextureHandle, TextureSlots, MAX_TEXTURES,
};
pub use shapes::{
    Circle, Cube, CustomGeometry, Ellipse, Geometry, GeometryBuilder, GeometryState,
    IcosphereMesh, Line, LinePoint, Quad, Rectangle, Sphere,
};
pub use topology::Topology;
pub use vertex_buffer::{VertexBuffer, VertexSink};
