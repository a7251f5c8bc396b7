use crate::action::Action;
use crate::collector::FrameInput;
use crate::event::{InputEvent, Key, PointerButton, TouchPhase};
use crate::joystick::Joystick;
use crate::radial::RadialSelector;
use glam::Vec2;

/// Viewports narrower than this (logical pixels) get the touch layout.
pub const TOUCH_WIDTH_THRESHOLD: f32 = 900.0;

/// Which control layout the session runs with. Decided once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Touch,
}

impl DeviceClass {
    /// Narrow viewports and mobile platforms are touch devices.
    pub fn detect(viewport_width: f32, mobile_platform: bool) -> Self {
        if viewport_width < TOUCH_WIDTH_THRESHOLD || mobile_platform {
            DeviceClass::Touch
        } else {
            DeviceClass::Desktop
        }
    }

    /// Whether the build target is a phone or tablet OS.
    pub fn mobile_target() -> bool {
        cfg!(any(target_os = "android", target_os = "ios"))
    }

    /// Build the input scheme for this class.
    pub fn scheme(self, viewport: Vec2) -> Box<dyn InputScheme> {
        match self {
            DeviceClass::Desktop => Box::new(PointerLockScheme::new()),
            DeviceClass::Touch => Box::new(TouchScheme::new(viewport)),
        }
    }
}

/// Strategy for turning raw events into look deltas, movement intent and
/// actions. Keys, wheel and mouse buttons are handled by the collector for
/// every scheme; a scheme only sees events after that.
pub trait InputScheme {
    fn device_class(&self) -> DeviceClass;

    /// Apply one event. Look deltas and actions go into `frame`.
    fn handle(&mut self, event: &InputEvent, frame: &mut FrameInput);

    /// Current movement intent (+x right, +y forward).
    fn movement(&self) -> Vec2;

    fn pointer_captured(&self) -> bool {
        false
    }

    /// Touch controls to draw, if this scheme has any.
    fn touch_controls(&self) -> Option<&TouchScheme> {
        None
    }
}

/// Desktop scheme: mouse look while the pointer is captured.
///
/// A left click captures, `Escape` or focus loss releases. There is no
/// keyboard walking; only the vertical keys move the player.
#[derive(Debug, Clone, Default)]
pub struct PointerLockScheme {
    captured: bool,
}

impl PointerLockScheme {
    pub fn new() -> Self {
        Self::default()
    }

    fn release(&mut self, frame: &mut FrameInput) {
        if self.captured {
            self.captured = false;
            frame.actions.push(Action::ReleasePointer);
            tracing::debug!("pointer released");
        }
    }
}

impl InputScheme for PointerLockScheme {
    fn device_class(&self) -> DeviceClass {
        DeviceClass::Desktop
    }

    fn handle(&mut self, event: &InputEvent, frame: &mut FrameInput) {
        match *event {
            InputEvent::PointerButton {
                button: PointerButton::Left,
                pressed: true,
            } if !self.captured => {
                self.captured = true;
                frame.actions.push(Action::CapturePointer);
                tracing::debug!("pointer captured");
            }
            InputEvent::PointerMotion { dx, dy } if self.captured => {
                frame.look += Vec2::new(dx, dy);
            }
            InputEvent::Key {
                key: Key::Escape,
                pressed: true,
            }
            | InputEvent::FocusLost => self.release(frame),
            _ => {}
        }
    }

    fn movement(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn pointer_captured(&self) -> bool {
        self.captured
    }
}

/// Where the touch controls sit for a given viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchLayout {
    pub viewport: Vec2,
}

impl TouchLayout {
    pub const JOYSTICK_BASE_RADIUS: f32 = 60.0;
    pub const JOYSTICK_STICK_RADIUS: f32 = 25.0;
    pub const JOYSTICK_MARGIN: f32 = 30.0;
    pub const RADIAL_INSET: f32 = 60.0;
    pub const RADIAL_BUTTON_RADIUS: f32 = 35.0;
    pub const RADIAL_MENU_RADIUS: f32 = 160.0;
    pub const RADIAL_LABEL_RADIUS: f32 = 110.0;

    pub fn new(viewport: Vec2) -> Self {
        Self { viewport }
    }

    /// Joystick base centre, bottom-left.
    pub fn joystick_center(&self) -> Vec2 {
        let inset = Self::JOYSTICK_MARGIN + Self::JOYSTICK_BASE_RADIUS;
        Vec2::new(inset, self.viewport.y - inset)
    }

    /// Radial button and menu centre, bottom-right.
    pub fn radial_center(&self) -> Vec2 {
        self.viewport - Vec2::splat(Self::RADIAL_INSET)
    }

    pub fn in_joystick_base(&self, p: Vec2) -> bool {
        p.distance(self.joystick_center()) <= Self::JOYSTICK_BASE_RADIUS
    }

    pub fn on_radial_button(&self, p: Vec2) -> bool {
        p.distance(self.radial_center()) <= Self::RADIAL_BUTTON_RADIUS
    }
}

/// Touch scheme: virtual joystick for movement, radial menu for block
/// choice, and taps elsewhere act as a left click.
#[derive(Debug, Clone)]
pub struct TouchScheme {
    layout: TouchLayout,
    joystick: Joystick,
    radial: RadialSelector,
    joystick_touch: Option<u64>,
    radial_touch: Option<u64>,
    active_touches: usize,
}

impl TouchScheme {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            layout: TouchLayout::new(viewport),
            joystick: Joystick::default(),
            radial: RadialSelector::new(),
            joystick_touch: None,
            radial_touch: None,
            active_touches: 0,
        }
    }

    pub fn layout(&self) -> &TouchLayout {
        &self.layout
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn radial(&self) -> &RadialSelector {
        &self.radial
    }

    fn touch_started(&mut self, id: u64, position: Vec2, frame: &mut FrameInput) {
        self.active_touches += 1;
        if self.joystick_touch.is_none() && self.layout.in_joystick_base(position) {
            self.joystick_touch = Some(id);
            self.joystick.begin(position);
        } else if self.radial_touch.is_none() && self.layout.on_radial_button(position) {
            self.radial_touch = Some(id);
            self.radial.open();
        } else {
            frame.actions.push(Action::Place);
        }
    }

    fn touch_moved(&mut self, id: u64, position: Vec2) {
        if self.joystick_touch == Some(id) {
            self.joystick.drag(position);
        }
        if self.radial.is_open() && self.active_touches == 1 {
            self.radial.track(position - self.layout.radial_center());
        }
    }

    fn touch_ended(&mut self, id: u64, frame: &mut FrameInput) {
        self.active_touches = self.active_touches.saturating_sub(1);
        if self.joystick_touch == Some(id) {
            self.joystick_touch = None;
            self.joystick.release();
        }
        if self.radial_touch == Some(id) {
            self.radial_touch = None;
            let block = self.radial.commit();
            frame.actions.push(Action::SelectBlock(block));
        }
    }
}

impl InputScheme for TouchScheme {
    fn device_class(&self) -> DeviceClass {
        DeviceClass::Touch
    }

    fn handle(&mut self, event: &InputEvent, frame: &mut FrameInput) {
        match *event {
            InputEvent::Touch {
                id,
                phase,
                position,
            } => match phase {
                TouchPhase::Started => self.touch_started(id, position, frame),
                TouchPhase::Moved => self.touch_moved(id, position),
                TouchPhase::Ended | TouchPhase::Cancelled => self.touch_ended(id, frame),
            },
            InputEvent::Resized { width, height } => {
                self.layout = TouchLayout::new(Vec2::new(width, height));
            }
            _ => {}
        }
    }

    fn movement(&self) -> Vec2 {
        self.joystick.intent()
    }

    fn touch_controls(&self) -> Option<&TouchScheme> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelbox_common::BlockType;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> InputEvent {
        InputEvent::Touch {
            id,
            phase,
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn detect_device_class() {
        assert_eq!(DeviceClass::detect(1280.0, false), DeviceClass::Desktop);
        assert_eq!(DeviceClass::detect(899.0, false), DeviceClass::Touch);
        assert_eq!(DeviceClass::detect(1920.0, true), DeviceClass::Touch);
        assert_eq!(
            DeviceClass::Touch.scheme(VIEWPORT).device_class(),
            DeviceClass::Touch
        );
    }

    #[test]
    fn pointer_look_only_while_captured() {
        let mut s = PointerLockScheme::new();
        let mut f = FrameInput::default();
        s.handle(&InputEvent::PointerMotion { dx: 5.0, dy: 3.0 }, &mut f);
        assert_eq!(f.look, Vec2::ZERO);

        s.handle(
            &InputEvent::PointerButton {
                button: PointerButton::Left,
                pressed: true,
            },
            &mut f,
        );
        assert!(s.pointer_captured());
        assert_eq!(f.actions, vec![Action::CapturePointer]);

        s.handle(&InputEvent::PointerMotion { dx: 5.0, dy: 3.0 }, &mut f);
        s.handle(&InputEvent::PointerMotion { dx: 1.0, dy: -1.0 }, &mut f);
        assert_eq!(f.look, Vec2::new(6.0, 2.0));
    }

    #[test]
    fn escape_and_focus_loss_release_capture() {
        let mut s = PointerLockScheme { captured: true };
        let mut f = FrameInput::default();
        s.handle(
            &InputEvent::Key {
                key: Key::Escape,
                pressed: true,
            },
            &mut f,
        );
        assert!(!s.pointer_captured());
        assert_eq!(f.actions, vec![Action::ReleasePointer]);

        s.handle(&InputEvent::FocusLost, &mut f);
        assert_eq!(f.actions.len(), 1);
    }

    #[test]
    fn joystick_touch_drives_movement() {
        let mut s = TouchScheme::new(VIEWPORT);
        let mut f = FrameInput::default();
        let c = s.layout().joystick_center();
        s.handle(&touch(1, TouchPhase::Started, c.x, c.y), &mut f);
        s.handle(&touch(1, TouchPhase::Moved, c.x + 40.0, c.y + 30.0), &mut f);
        let m = s.movement();
        assert!((m.x - 0.8).abs() < 1e-6 && (m.y - 0.6).abs() < 1e-6);
        assert!(f.actions.is_empty());

        s.handle(&touch(1, TouchPhase::Ended, c.x + 40.0, c.y + 30.0), &mut f);
        assert_eq!(s.movement(), Vec2::ZERO);
    }

    #[test]
    fn radial_touch_selects_block_on_release() {
        let mut s = TouchScheme::new(VIEWPORT);
        let mut f = FrameInput::default();
        let c = s.layout().radial_center();
        s.handle(&touch(7, TouchPhase::Started, c.x, c.y), &mut f);
        assert!(s.radial().is_open());
        // Up-left of centre: sector 3.
        s.handle(&touch(7, TouchPhase::Moved, c.x - 100.0, c.y - 10.0), &mut f);
        assert_eq!(s.radial().highlighted(), BlockType::Wood);
        s.handle(&touch(7, TouchPhase::Ended, c.x - 100.0, c.y - 10.0), &mut f);
        assert!(!s.radial().is_open());
        assert_eq!(f.actions, vec![Action::SelectBlock(BlockType::Wood)]);
    }

    #[test]
    fn radial_ignores_multi_touch_tracking() {
        let mut s = TouchScheme::new(VIEWPORT);
        let mut f = FrameInput::default();
        let c = s.layout().radial_center();
        let j = s.layout().joystick_center();
        s.handle(&touch(1, TouchPhase::Started, j.x, j.y), &mut f);
        s.handle(&touch(2, TouchPhase::Started, c.x, c.y), &mut f);
        s.handle(&touch(2, TouchPhase::Moved, c.x, c.y - 100.0), &mut f);
        assert_eq!(s.radial().highlighted(), BlockType::Grass);
    }

    #[test]
    fn tap_elsewhere_places() {
        let mut s = TouchScheme::new(VIEWPORT);
        let mut f = FrameInput::default();
        s.handle(&touch(3, TouchPhase::Started, 400.0, 200.0), &mut f);
        s.handle(&touch(3, TouchPhase::Ended, 400.0, 200.0), &mut f);
        assert_eq!(f.actions, vec![Action::Place]);
        assert_eq!(s.movement(), Vec2::ZERO);
    }

    #[test]
    fn resize_moves_controls() {
        let mut s = TouchScheme::new(VIEWPORT);
        let mut f = FrameInput::default();
        s.handle(
            &InputEvent::Resized {
                width: 400.0,
                height: 700.0,
            },
            &mut f,
        );
        assert_eq!(s.layout().radial_center(), Vec2::new(340.0, 640.0));
        assert_eq!(s.layout().joystick_center(), Vec2::new(90.0, 610.0));
    }
}
