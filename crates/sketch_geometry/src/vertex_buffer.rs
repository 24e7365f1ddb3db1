//! Interleaved vertex packer.
//!
//! Generators push one vertex at a time: any number of
//! [`VertexSink::write_fixed`] calls for the channels they know, then
//! [`VertexSink::write_default_values_until`] with [`Channel::End`], which
//! back-fills the rest of the schema and moves on to the next vertex. Every
//! vertex in the buffer therefore carries the same set of channels.

use crate::attributes::{AttributeFlags, Channel};
use crate::error::GeometryError;

/// Destination of generated vertices.
pub trait VertexSink {
    /// Channels every vertex carries.
    fn schema(&self) -> AttributeFlags;

    /// Writes `data` for `channel` of the current vertex. Channels outside the
    /// schema are ignored.
    fn write_fixed(&mut self, channel: Channel, data: &[f32]) -> Result<(), GeometryError>;

    /// Fills every unwritten schema channel ordered before `channel` with its
    /// default, then advances to the next vertex.
    fn write_default_values_until(&mut self, channel: Channel) -> Result<(), GeometryError>;

    /// Complete vertices written so far.
    fn used_elements(&self) -> usize;

    /// Maximum number of vertices, if bounded.
    fn capacity(&self) -> Option<usize>;
}

/// Fixed-capacity, append-only interleaved `f32` store.
#[derive(Debug, Clone)]
pub struct VertexBuffer {
    schema: AttributeFlags,
    stride: usize,
    capacity: usize,
    data: Vec<f32>,
    /// Channels already written for the vertex under the cursor.
    written: AttributeFlags,
    used: usize,
}

impl VertexBuffer {
    /// Reserves room for `capacity` vertices of `schema`. The buffer never
    /// grows past that.
    pub fn new(schema: AttributeFlags, capacity: usize) -> Self {
        let stride = schema.stride();
        Self {
            schema,
            stride,
            capacity,
            data: Vec::with_capacity(capacity * stride),
            written: AttributeFlags::empty(),
            used: 0,
        }
    }

    /// Floats per vertex.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    /// All complete vertices, interleaved.
    pub fn as_floats(&self) -> &[f32] {
        &self.data[..self.used * self.stride]
    }

    /// Same as [`as_floats`](Self::as_floats), ready for `queue.write_buffer`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_floats())
    }

    /// Floats of `count` vertices starting at vertex `start`.
    pub fn range(&self, start: usize, count: usize) -> Option<&[f32]> {
        let end = start.checked_add(count)?;
        if end > self.used {
            return None;
        }
        Some(&self.data[start * self.stride..end * self.stride])
    }

    /// One complete vertex.
    pub fn vertex(&self, index: usize) -> Option<&[f32]> {
        self.range(index, 1)
    }

    /// `channel` of the complete vertex at `index`.
    pub fn channel(&self, index: usize, channel: Channel) -> Option<&[f32]> {
        let offset = self.schema.offset_of(channel)?;
        let vertex = self.vertex(index)?;
        Some(&vertex[offset..offset + channel.components()])
    }

    /// Drops every vertex, keeping the allocation for the next frame.
    pub fn reset(&mut self) {
        log::trace!("vertex buffer reset after {} vertices", self.used);
        self.data.clear();
        self.written = AttributeFlags::empty();
        self.used = 0;
    }

    /// Makes sure the vertex under the cursor has backing storage.
    fn open_vertex(&mut self) -> Result<&mut [f32], GeometryError> {
        if self.used >= self.capacity {
            return Err(GeometryError::CapacityExceeded {
                requested: self.used + 1,
                capacity: self.capacity,
            });
        }
        let start = self.used * self.stride;
        let end = start + self.stride;
        if self.data.len() < end {
            self.data.resize(end, 0.0);
        }
        Ok(&mut self.data[start..end])
    }
}

impl VertexSink for VertexBuffer {
    fn schema(&self) -> AttributeFlags {
        self.schema
    }

    fn write_fixed(&mut self, channel: Channel, data: &[f32]) -> Result<(), GeometryError> {
        let Some(offset) = self.schema.offset_of(channel) else {
            return Ok(());
        };
        let expected = channel.components();
        if data.len() != expected {
            return Err(GeometryError::InvalidChannelData {
                channel,
                expected,
                got: data.len(),
            });
        }
        let vertex = self.open_vertex()?;
        vertex[offset..offset + expected].copy_from_slice(data);
        self.written |= channel.flag();
        Ok(())
    }

    fn write_default_values_until(&mut self, channel: Channel) -> Result<(), GeometryError> {
        let schema = self.schema;
        let written = self.written;
        let vertex = self.open_vertex()?;
        let mut offset = 0;
        for ch in schema.channels() {
            let len = ch.components();
            if ch < channel && !written.contains(ch.flag()) {
                vertex[offset..offset + len].copy_from_slice(ch.default_value());
            }
            offset += len;
        }
        self.written = AttributeFlags::empty();
        self.used += 1;
        Ok(())
    }

    fn used_elements(&self) -> usize {
        self.used
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_vertex(buf: &mut VertexBuffer, x: f32) -> Result<(), GeometryError> {
        buf.write_fixed(Channel::Position0, &[x, 0.0, 0.0])?;
        buf.write_default_values_until(Channel::End)
    }

    #[test]
    fn back_fills_missing_channels() -> anyhow::Result<()> {
        let mut buf = VertexBuffer::new(AttributeFlags::default(), 4);
        buf.write_fixed(Channel::Position0, &[1.0, 2.0, 3.0])?;
        buf.write_fixed(Channel::Uv0, &[0.25, 0.75])?;
        buf.write_default_values_until(Channel::End)?;

        assert_eq!(buf.used_elements(), 1);
        assert_eq!(buf.channel(0, Channel::Position0), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(buf.channel(0, Channel::Normal0), Some(&[0.0, 0.0, 1.0][..]));
        assert_eq!(buf.channel(0, Channel::Color0), Some(&[0.0, 0.0, 0.0, 1.0][..]));
        assert_eq!(buf.channel(0, Channel::Uv0), Some(&[0.25, 0.75][..]));
        Ok(())
    }

    #[test]
    fn channels_outside_schema_are_ignored() -> anyhow::Result<()> {
        let mut buf = VertexBuffer::new(AttributeFlags::POSITION0, 2);
        buf.write_fixed(Channel::Color0, &[1.0, 0.0, 0.0, 1.0])?;
        buf.write_fixed(Channel::Position0, &[4.0, 5.0, 6.0])?;
        buf.write_default_values_until(Channel::End)?;
        assert_eq!(buf.as_floats(), &[4.0, 5.0, 6.0]);
        assert_eq!(buf.as_bytes().len(), 12);
        Ok(())
    }

    #[test]
    fn partial_fill_stops_before_channel() -> anyhow::Result<()> {
        let mut buf = VertexBuffer::new(AttributeFlags::POSITION0 | AttributeFlags::NORMAL0, 1);
        buf.write_default_values_until(Channel::Normal0)?;
        // position was defaulted, normal left untouched (zeroed storage)
        assert_eq!(buf.vertex(0), Some(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0][..]));
        Ok(())
    }

    #[test]
    fn wrong_component_count_is_rejected() {
        let mut buf = VertexBuffer::new(AttributeFlags::default(), 1);
        assert_eq!(
            buf.write_fixed(Channel::Normal0, &[0.0, 1.0]),
            Err(GeometryError::InvalidChannelData {
                channel: Channel::Normal0,
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn never_grows_past_capacity() -> anyhow::Result<()> {
        let mut buf = VertexBuffer::new(AttributeFlags::POSITION0, 2);
        full_vertex(&mut buf, 0.0)?;
        full_vertex(&mut buf, 1.0)?;
        assert_eq!(buf.remaining(), 0);
        assert_eq!(
            full_vertex(&mut buf, 2.0),
            Err(GeometryError::CapacityExceeded {
                requested: 3,
                capacity: 2
            })
        );
        assert_eq!(buf.used_elements(), 2);
        Ok(())
    }

    #[test]
    fn reset_reuses_storage() -> anyhow::Result<()> {
        let mut buf = VertexBuffer::new(AttributeFlags::POSITION0, 3);
        full_vertex(&mut buf, 7.0)?;
        buf.reset();
        assert_eq!(buf.used_elements(), 0);
        assert!(buf.as_floats().is_empty());
        full_vertex(&mut buf, 8.0)?;
        assert_eq!(buf.range(0, 1), Some(&[8.0, 0.0, 0.0][..]));
        assert_eq!(buf.range(0, 2), None);
        Ok(())
    }
}
