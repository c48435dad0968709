//! Fixed viewing rig

use tinsel_core::Vec3;

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2.0, 16.0);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 5.0, 0.0);

/// Camera pose in world space. Orbit input is handled by the host; the scene
/// only needs where the camera is and where it looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: CAMERA_POSITION,
            target: CAMERA_TARGET,
        }
    }
}

impl CameraRig {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Unit view direction; straight down -Z if position and target coincide
    pub fn view_dir(&self) -> Vec3 {
        let d = self.target - self.position;
        if d.length() > f32::EPSILON {
            d.normalized()
        } else {
            Vec3::new(0.0, 0.0, -1.0)
        }
    }

    pub fn distance(&self) -> f32 {
        (self.target - self.position).length()
    }
}
