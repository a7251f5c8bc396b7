use glam::Vec2;

/// Maximum stick travel from the anchor, in logical pixels.
pub const JOYSTICK_RADIUS: f32 = 50.0;

/// Virtual thumb stick.
///
/// The anchor is wherever the touch started. The stick offset is the vector
/// from the anchor to the touch, clamped to the travel radius. The intent is
/// that offset divided by the radius: +x is right, +y (screen-down) is
/// forward.
#[derive(Debug, Clone)]
pub struct Joystick {
    anchor: Option<Vec2>,
    offset: Vec2,
    radius: f32,
}

impl Default for Joystick {
    fn default() -> Self {
        Self::new(JOYSTICK_RADIUS)
    }
}

impl Joystick {
    pub fn new(radius: f32) -> Self {
        Self {
            anchor: None,
            offset: Vec2::ZERO,
            radius,
        }
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn begin(&mut self, at: Vec2) {
        self.anchor = Some(at);
        self.offset = Vec2::ZERO;
    }

    pub fn drag(&mut self, to: Vec2) {
        let Some(anchor) = self.anchor else {
            return;
        };
        self.offset = (to - anchor).clamp_length_max(self.radius);
    }

    /// Touch ended: zero the intent and recentre the stick.
    pub fn release(&mut self) {
        self.anchor = None;
        self.offset = Vec2::ZERO;
    }

    /// Clamped stick displacement in screen space, for drawing.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Movement intent, each axis in [-1, 1] and magnitude at most 1.
    pub fn intent(&self) -> Vec2 {
        self.offset / self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_radius_passes_through() {
        let mut j = Joystick::default();
        j.begin(Vec2::new(100.0, 400.0));
        j.drag(Vec2::new(140.0, 430.0));
        let v = j.intent();
        assert!((v.x - 0.8).abs() < 1e-6);
        assert!((v.y - 0.6).abs() < 1e-6);
        assert_eq!(j.offset(), Vec2::new(40.0, 30.0));
    }

    #[test]
    fn beyond_radius_is_clamped_preserving_direction() {
        let mut j = Joystick::default();
        j.begin(Vec2::ZERO);
        j.drag(Vec2::new(300.0, -400.0));
        let v = j.intent();
        assert!((v.length() - 1.0).abs() < 1e-5);
        assert!((v.x - 0.6).abs() < 1e-5);
        assert!((v.y + 0.8).abs() < 1e-5);
    }

    #[test]
    fn release_recenters() {
        let mut j = Joystick::default();
        j.begin(Vec2::ZERO);
        j.drag(Vec2::new(10.0, 10.0));
        j.release();
        assert!(!j.is_active());
        assert_eq!(j.intent(), Vec2::ZERO);
        assert_eq!(j.offset(), Vec2::ZERO);
    }

    #[test]
    fn drag_without_anchor_is_ignored() {
        let mut j = Joystick::default();
        j.drag(Vec2::new(30.0, 0.0));
        assert_eq!(j.intent(), Vec2::ZERO);
    }
}
