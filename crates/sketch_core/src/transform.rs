//! Per-geometry transform stack.
//!
//! A `TransformStack` records translate / scale / rotate operations in call
//! order and folds them onto a base matrix when the model matrix is needed.
//! Order matters: `translate` then `scale` does not equal `scale` then
//! `translate`.

use glam::{Mat4, Vec3};

/// One recorded pose operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate(Vec3),
    Scale(Vec3),
    /// Rotation around `axis`; the angle is stored in radians.
    Rotate { axis: Vec3, radians: f32 },
}

impl TransformOp {
    /// Matrix for this single operation.
    pub fn matrix(&self) -> Mat4 {
        match *self {
            TransformOp::Translate(v) => Mat4::from_translation(v),
            TransformOp::Scale(v) => Mat4::from_scale(v),
            TransformOp::Rotate { axis, radians } => {
                // A zero axis has no rotation to express.
                let axis = axis.normalize_or_zero();
                if axis == Vec3::ZERO {
                    Mat4::IDENTITY
                } else {
                    Mat4::from_axis_angle(axis, radians)
                }
            }
        }
    }
}

/// Ordered, append-only list of pose operations owned by one geometry.
///
/// # Example
/// ```rust
/// use sketch_core::TransformStack;
/// use sketch_core::glam::Vec3;
///
/// let mut stack = TransformStack::new();
/// stack.translate(Vec3::new(5.0, 0.0, 0.0));
/// stack.rotate(90.0, Vec3::Z);
/// let m = stack.model_matrix();
/// assert!((m.w_axis.x - 5.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    base: Mat4,
    ops: Vec<TransformOp>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// Empty stack over the identity base.
    pub fn new() -> Self {
        Self {
            base: Mat4::IDENTITY,
            ops: Vec::new(),
        }
    }

    /// Empty stack over an explicit base matrix.
    pub fn with_base(base: Mat4) -> Self {
        Self {
            base,
            ops: Vec::new(),
        }
    }

    /// Replaces the base matrix. Recorded ops are kept.
    pub fn set_base(&mut self, base: Mat4) {
        self.base = base;
    }

    pub fn base(&self) -> Mat4 {
        self.base
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.ops.push(TransformOp::Translate(offset));
    }

    pub fn scale(&mut self, factor: Vec3) {
        self.ops.push(TransformOp::Scale(factor));
    }

    /// Records a rotation of `degrees` around `axis`.
    pub fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.ops.push(TransformOp::Rotate {
            axis,
            radians: degrees.to_radians(),
        });
    }

    /// Recorded operations in insertion order.
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Folds every op left-to-right onto the base: `base · op₁ · … · opₙ`.
    pub fn model_matrix(&self) -> Mat4 {
        self.ops
            .iter()
            .fold(self.base, |acc, op| acc * op.matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_is_identity() {
        let s = TransformStack::new();
        assert!(s.model_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn base_is_applied_first() {
        let mut s = TransformStack::with_base(Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        s.scale(Vec3::splat(3.0));
        let p = s.model_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn order_changes_the_result() {
        let mut a = TransformStack::new();
        a.translate(Vec3::new(5.0, 0.0, 0.0));
        a.scale(Vec3::splat(2.0));

        let mut b = TransformStack::new();
        b.scale(Vec3::splat(2.0));
        b.translate(Vec3::new(5.0, 0.0, 0.0));

        let ma = a.model_matrix();
        let mb = b.model_matrix();
        assert!(!ma.abs_diff_eq(mb, 1e-4));
        // the scaled translation offset differs by the scale factor
        assert!((ma.w_axis.x - 5.0).abs() < 1e-5);
        assert!((mb.w_axis.x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn rotate_converts_degrees() {
        let mut s = TransformStack::new();
        s.rotate(90.0, Vec3::Z);
        match s.ops()[0] {
            TransformOp::Rotate { radians, .. } => {
                assert!((radians - std::f32::consts::FRAC_PI_2).abs() < 1e-6)
            }
            other => panic!("unexpected op {other:?}"),
        }
        let p = s.model_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn zero_axis_rotation_is_ignored() {
        let mut s = TransformStack::new();
        s.rotate(45.0, Vec3::ZERO);
        assert!(s.model_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
        assert_eq!(s.len(), 1);
    }
}
