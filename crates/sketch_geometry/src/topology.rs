/// How consecutive vertices of a batch are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineStrip,
    /// Line strip closed back to its first vertex.
    LineLoop,
    Triangles,
    TriangleStrip,
    /// Every triangle shares vertex 0.
    TriangleFan,
}

impl Topology {
    /// The matching wgpu primitive topology.
    ///
    /// wgpu has no fans or line loops; renderers must expand those (e.g.
    /// into an index list) and get `None` here.
    pub fn to_wgpu(self) -> Option<wgpu::PrimitiveTopology> {
        match self {
            Topology::Points => Some(wgpu::PrimitiveTopology::PointList),
            Topology::Lines => Some(wgpu::PrimitiveTopology::LineList),
            Topology::LineStrip => Some(wgpu::PrimitiveTopology::LineStrip),
            Topology::Triangles => Some(wgpu::PrimitiveTopology::TriangleList),
            Topology::TriangleStrip => Some(wgpu::PrimitiveTopology::TriangleStrip),
            Topology::LineLoop | Topology::TriangleFan => None,
        }
    }

    /// Number of primitives `vertex_count` vertices form.
    pub fn primitive_count(self, vertex_count: usize) -> usize {
        match self {
            Topology::Points => vertex_count,
            Topology::Lines => vertex_count / 2,
            Topology::LineStrip => vertex_count.saturating_sub(1),
            Topology::LineLoop => {
                if vertex_count < 2 {
                    0
                } else {
                    vertex_count
                }
            }
            Topology::Triangles => vertex_count / 3,
            Topology::TriangleStrip | Topology::TriangleFan => vertex_count.saturating_sub(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fans_and_loops_have_no_wgpu_equivalent() {
        assert_eq!(Topology::TriangleFan.to_wgpu(), None);
        assert_eq!(Topology::LineLoop.to_wgpu(), None);
        assert_eq!(
            Topology::TriangleStrip.to_wgpu(),
            Some(wgpu::PrimitiveTopology::TriangleStrip)
        );
    }

    #[test]
    fn primitive_counts() {
        assert_eq!(Topology::Triangles.primitive_count(36), 12);
        assert_eq!(Topology::TriangleFan.primitive_count(26), 24);
        assert_eq!(Topology::TriangleStrip.primitive_count(4), 2);
        assert_eq!(Topology::LineLoop.primitive_count(1), 0);
        assert_eq!(Topology::LineStrip.primitive_count(0), 0);
    }
}
