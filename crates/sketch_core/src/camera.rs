use glam::{Mat4, Vec3};

/// What the geometry core needs from the active camera.
///
/// The core never computes view or projection math itself; it only snapshots
/// these three values into each render batch.
pub trait CameraView {
    fn view_matrix(&self) -> Mat4;
    fn projection_matrix(&self) -> Mat4;
    /// World-space eye position.
    fn position(&self) -> Vec3;
}

/// Perspective camera used by hosts and by tests.  Applications can inspect
/// or modify it directly; any other type implementing [`CameraView`] works
/// just as well.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // --- view parameters --------------------------------------------------
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    // --- projection parameters --------------------------------------------
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 45.0f32.to_radians(),
            aspect: 1.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera {
    /// Build the combined view-projection matrix from the current parameters.
    pub fn build_view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio when viewport dimensions change.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

impl CameraView for Camera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }

    fn position(&self) -> Vec3 {
        self.eye
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_projects_to_screen_centre() {
        let camera = Camera {
            eye: Vec3::new(3.0, 2.0, 4.0),
            target: Vec3::new(1.0, 0.0, -1.0),
            ..Camera::default()
        };
        let ndc = camera.build_view_projection_matrix().project_point3(camera.target);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..1.0).contains(&ndc.z));
    }

    #[test]
    fn wider_aspect_squeezes_x() {
        let mut camera = Camera::default();
        let point = Vec3::new(1.0, 1.0, 0.0);
        let square = camera.build_view_projection_matrix().project_point3(point);
        camera.set_aspect(2.0);
        let wide = camera.build_view_projection_matrix().project_point3(point);
        assert!((wide.x - square.x * 0.5).abs() < 1e-5);
        assert!((wide.y - square.y).abs() < 1e-5);
    }
}
