//! Vertex attribute schema.
//!
//! A draw call's vertices carry the channels named in an [`AttributeFlags`]
//! set, interleaved in the fixed [`Channel::ORDER`]. That order is a contract
//! with the vertex shader: the packer never reorders channels.

use bitflags::bitflags;
use sketch_core::config::{channel_index, CHANNEL_NAMES};

use crate::error::GeometryError;

bitflags! {
    /// Channels present in every vertex of a draw call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttributeFlags: u32 {
        /// Object-space position, `vec3<f32>`.
        const POSITION0 = 1 << 0;
        /// Surface normal, `vec3<f32>`.
        const NORMAL0 = 1 << 1;
        /// Linear RGBA colour, `vec4<f32>`.
        const COLOR0 = 1 << 2;
        /// Texture coordinate sets, `vec2<f32>` each.
        const UV0 = 1 << 3;
        const UV1 = 1 << 4;
        const UV2 = 1 << 5;
        const UV3 = 1 << 6;
    }
}

/// One vertex channel. `End` marks the end of a vertex and is never part of
/// a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Position0,
    Normal0,
    Color0,
    Uv0,
    Uv1,
    Uv2,
    Uv3,
    End,
}

const NORMAL_DEFAULT: [f32; 3] = [0.0, 0.0, 1.0];
const COLOR_DEFAULT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const UV_DEFAULT: [f32; 2] = [0.0, 0.0];
const POSITION_DEFAULT: [f32; 3] = [0.0, 0.0, 0.0];

impl Channel {
    /// Canonical write order.
    pub const ORDER: [Channel; 7] = [
        Channel::Position0,
        Channel::Normal0,
        Channel::Color0,
        Channel::Uv0,
        Channel::Uv1,
        Channel::Uv2,
        Channel::Uv3,
    ];

    /// Texture coordinate channel for `set` (0..=3).
    pub fn uv(set: usize) -> Result<Channel, GeometryError> {
        match set {
            0 => Ok(Channel::Uv0),
            1 => Ok(Channel::Uv1),
            2 => Ok(Channel::Uv2),
            3 => Ok(Channel::Uv3),
            _ => Err(GeometryError::InvalidUvSet { set }),
        }
    }

    pub fn flag(self) -> AttributeFlags {
        match self {
            Channel::Position0 => AttributeFlags::POSITION0,
            Channel::Normal0 => AttributeFlags::NORMAL0,
            Channel::Color0 => AttributeFlags::COLOR0,
            Channel::Uv0 => AttributeFlags::UV0,
            Channel::Uv1 => AttributeFlags::UV1,
            Channel::Uv2 => AttributeFlags::UV2,
            Channel::Uv3 => AttributeFlags::UV3,
            Channel::End => AttributeFlags::empty(),
        }
    }

    /// Number of `f32` components.
    pub fn components(self) -> usize {
        match self {
            Channel::Position0 | Channel::Normal0 => 3,
            Channel::Color0 => 4,
            Channel::Uv0 | Channel::Uv1 | Channel::Uv2 | Channel::Uv3 => 2,
            Channel::End => 0,
        }
    }

    /// Value written for a schema channel the generator left unset.
    pub fn default_value(self) -> &'static [f32] {
        match self {
            Channel::Position0 => &POSITION_DEFAULT,
            Channel::Normal0 => &NORMAL_DEFAULT,
            Channel::Color0 => &COLOR_DEFAULT,
            Channel::Uv0 | Channel::Uv1 | Channel::Uv2 | Channel::Uv3 => &UV_DEFAULT,
            Channel::End => &[],
        }
    }

    /// Schema name as written in `SketchConfig::attributes`.
    pub fn name(self) -> &'static str {
        Channel::ORDER
            .iter()
            .position(|&c| c == self)
            .map_or("end", |i| CHANNEL_NAMES[i])
    }

    /// Inverse of [`Channel::name`], ignoring case and surrounding
    /// whitespace. `End` has no name in a schema.
    pub fn from_name(name: &str) -> Option<Channel> {
        channel_index(name).map(|i| Channel::ORDER[i])
    }

    fn format(self) -> wgpu::VertexFormat {
        match self.components() {
            2 => wgpu::VertexFormat::Float32x2,
            3 => wgpu::VertexFormat::Float32x3,
            _ => wgpu::VertexFormat::Float32x4,
        }
    }
}

impl Default for AttributeFlags {
    /// Position, normal, colour and the first uv set.
    fn default() -> Self {
        AttributeFlags::POSITION0
            | AttributeFlags::NORMAL0
            | AttributeFlags::COLOR0
            | AttributeFlags::UV0
    }
}

impl AttributeFlags {
    /// Present channels in canonical order.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ORDER
            .into_iter()
            .filter(move |c| self.contains(c.flag()))
    }

    pub fn has(self, channel: Channel) -> bool {
        channel != Channel::End && self.contains(channel.flag())
    }

    /// Floats per interleaved vertex.
    pub fn stride(self) -> usize {
        self.channels().map(Channel::components).sum()
    }

    /// Float offset of `channel` inside one vertex, if present.
    pub fn offset_of(self, channel: Channel) -> Option<usize> {
        if !self.has(channel) {
            return None;
        }
        Some(
            self.channels()
                .take_while(|c| *c != channel)
                .map(Channel::components)
                .sum(),
        )
    }

    /// Builds a schema from channel names such as `"position0"` or `"uv1"`.
    pub fn from_names<I, S>(names: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(AttributeFlags::empty(), |acc, name| {
            let name = name.as_ref();
            Channel::from_name(name)
                .map(|c| acc | c.flag())
                .ok_or_else(|| GeometryError::UnknownAttribute {
                    name: name.to_string(),
                })
        })
    }

    /// wgpu attribute list matching the interleaved layout. Shader locations
    /// are assigned in canonical order, starting at 0.
    pub fn vertex_layout(self) -> VertexLayout {
        let mut offset = 0u64;
        let attributes = self
            .channels()
            .enumerate()
            .map(|(location, channel)| {
                let attr = wgpu::VertexAttribute {
                    format: channel.format(),
                    offset,
                    shader_location: location as u32,
                };
                offset += channel.format().size();
                attr
            })
            .collect();
        VertexLayout {
            array_stride: (self.stride() * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
            attributes,
        }
    }
}

/// Owned description of one interleaved vertex buffer.
///
/// `wgpu::VertexBufferLayout` borrows its attribute slice, so the attributes
/// live here and [`VertexLayout::buffer_layout`] lends them out.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexLayout {
    pub array_stride: wgpu::BufferAddress,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

impl VertexLayout {
    /// Pass this to `wgpu::VertexState::buffers` when building a pipeline.
    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}
