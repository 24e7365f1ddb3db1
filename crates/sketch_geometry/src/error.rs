use sketch_core::ConfigError;
use thiserror::Error;

use crate::attributes::{AttributeFlags, Channel};

/// Everything that can go wrong while building or packing a geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("segment count must be at least 3, got {segments}")]
    InvalidSegments { segments: u32 },

    #[error("expected 8 or 12 floats, or 4 points of 2 or 3 components; got {len} values")]
    InvalidPointData { len: usize },

    #[error("channel {channel:?} takes {expected} components, got {got}")]
    InvalidChannelData {
        channel: Channel,
        expected: usize,
        got: usize,
    },

    #[error("uv set {set} does not exist (valid sets are 0..=3)")]
    InvalidUvSet { set: usize },

    #[error("unknown vertex attribute `{name}`")]
    UnknownAttribute { name: String },

    #[error("vertex capacity exceeded: {requested} vertices requested, capacity is {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },

    #[error("a geometry holds at most {max} textures")]
    TooManyTextures { max: usize },

    #[error("geometry attributes {geometry:?} do not match vertex buffer schema {buffer:?}")]
    SchemaMismatch {
        geometry: AttributeFlags,
        buffer: AttributeFlags,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
