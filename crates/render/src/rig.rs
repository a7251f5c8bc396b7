use glam::{Mat4, Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;
use voxelbox_kernel::Ray;

/// Radians of rotation per pixel of pointer motion, both axes.
pub const LOOK_SENSITIVITY: f32 = 0.002;
/// Walking and flying speed in units per second.
pub const MOVE_SPEED: f32 = 7.0;

/// Two-level camera rig: an outer pivot carrying position and yaw, an inner
/// pivot carrying pitch. The viewpoint sits on the inner pivot with no offset.
#[derive(Debug, Clone)]
pub struct PlayerRig {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for PlayerRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 5.0),
            yaw: 0.0,
            pitch: 0.0,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            speed: MOVE_SPEED,
            sensitivity: LOOK_SENSITIVITY,
        }
    }
}

impl PlayerRig {
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Apply raw pointer motion. Yaw is unbounded; pitch is clamped to ±90°.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Outer pivot rotation.
    pub fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Combined world rotation of the viewpoint.
    pub fn orientation(&self) -> Quat {
        self.yaw_rotation() * Quat::from_rotation_x(self.pitch)
    }

    /// Ground-plane forward; ignores pitch.
    pub fn forward(&self) -> Vec3 {
        self.yaw_rotation() * Vec3::NEG_Z
    }

    /// Ground-plane right; ignores pitch.
    pub fn right(&self) -> Vec3 {
        self.yaw_rotation() * Vec3::X
    }

    /// Where the camera is looking.
    pub fn look_direction(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    pub fn eye(&self) -> Vec3 {
        self.position
    }

    /// Ray from the player along the look direction, used for both
    /// previewing and removing blocks.
    pub fn look_ray(&self) -> Ray {
        Ray::new(self.eye(), self.look_direction())
    }

    /// Move for one frame.
    ///
    /// `intent.x` steps along `right()` and `intent.y` along `forward()`; both
    /// are turned by yaw only. Vertical movement bypasses the rotation entirely.
    pub fn advance(&mut self, intent: Vec2, ascend: bool, descend: bool, dt: f32) {
        let step = self.speed * dt;
        let local = Vec3::new(intent.x, 0.0, -intent.y);
        self.position += self.yaw_rotation() * local * step;
        if ascend {
            self.position.y += step;
        }
        if descend {
            self.position.y -= step;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_rig() {
        let rig = PlayerRig::default();
        assert_eq!(rig.position, Vec3::new(0.0, 2.0, 5.0));
        assert!(close(rig.look_direction(), Vec3::NEG_Z));
        let vp = rig.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn pitch_is_clamped_for_any_input() {
        let mut rig = PlayerRig::default();
        rig.look(0.0, -1.0e9);
        assert_eq!(rig.pitch(), FRAC_PI_2);
        rig.look(0.0, 3.0e9);
        assert_eq!(rig.pitch(), -FRAC_PI_2);
        for dy in [-500.0, 120.0, 7777.0, -3.0] {
            rig.look(13.0, dy);
            assert!(rig.pitch().abs() <= FRAC_PI_2);
        }
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut rig = PlayerRig::default();
        rig.look(-10_000.0, 0.0);
        assert!((rig.yaw() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn mouse_right_turns_right() {
        let mut rig = PlayerRig::default();
        rig.look(FRAC_PI_2 / LOOK_SENSITIVITY, 0.0);
        assert!(close(rig.forward(), Vec3::X));
    }

    #[test]
    fn pitch_does_not_change_walking_direction() {
        let mut rig = PlayerRig::default();
        rig.look(100.0, -400.0);
        let flat = rig.forward();
        assert!(flat.y.abs() < 1e-6);
        assert!(rig.look_direction().y > 0.5);

        let start = rig.position;
        rig.advance(Vec2::new(0.0, 1.0), false, false, 1.0);
        let moved = rig.position - start;
        assert!(moved.y.abs() < 1e-5);
        assert!(close(moved, flat * MOVE_SPEED));
    }

    #[test]
    fn joystick_intent_maps_to_local_axes() {
        let mut rig = PlayerRig::default();
        rig.advance(Vec2::new(0.8, 0.6), false, false, 0.5);
        let expected = Vec3::new(0.0, 2.0, 5.0) + Vec3::new(0.8, 0.0, -0.6) * 3.5;
        assert!(close(rig.position, expected));
    }

    #[test]
    fn vertical_keys_ignore_orientation() {
        let mut rig = PlayerRig::default();
        rig.look(321.0, 200.0);
        rig.advance(Vec2::ZERO, true, false, 0.25);
        assert!(close(rig.position, Vec3::new(0.0, 2.0 + 1.75, 5.0)));
        rig.advance(Vec2::ZERO, true, true, 0.25);
        assert!(close(rig.position, Vec3::new(0.0, 3.75, 5.0)));
        rig.advance(Vec2::ZERO, false, true, 0.25);
        assert!(close(rig.position, Vec3::new(0.0, 2.0, 5.0)));
    }

    #[test]
    fn look_ray_starts_at_eye() {
        let mut rig = PlayerRig::default();
        rig.look(0.0, 785.0);
        let ray = rig.look_ray();
        assert_eq!(ray.origin, rig.eye());
        assert!(ray.direction.y < 0.0);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let mut rig = PlayerRig::default();
        rig.look(50.0, 785.0);
        let p = rig.view_matrix().transform_point3(rig.eye());
        assert!(p.length() < 1e-4);
        let ahead = rig.view_matrix().transform_point3(rig.eye() + rig.look_direction());
        assert!(close(ahead, Vec3::NEG_Z));
    }
}
