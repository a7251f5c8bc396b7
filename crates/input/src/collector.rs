use crate::action::Action;
use crate::event::{InputEvent, Key, PointerButton};
use crate::scheme::InputScheme;
use glam::Vec2;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Everything one frame needs from input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Movement intent: +x right, +y forward.
    pub movement: Vec2,
    /// Accumulated raw pointer motion while captured.
    pub look: Vec2,
    pub ascend: bool,
    pub descend: bool,
    /// Discrete actions in the order their events arrived.
    pub actions: Vec<Action>,
}

/// Held keys.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    /// Record a key transition. Returns true on a fresh press (not a repeat).
    pub fn set(&mut self, key: Key, pressed: bool) -> bool {
        if pressed {
            self.held.insert(key)
        } else {
            self.held.remove(&key);
            false
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Queues platform events and turns them into one [`FrameInput`] per frame.
pub struct InputCollector {
    queue: VecDeque<InputEvent>,
    keys: KeyState,
    scheme: Box<dyn InputScheme>,
}

impl InputCollector {
    pub fn new(scheme: Box<dyn InputScheme>) -> Self {
        Self {
            queue: VecDeque::new(),
            keys: KeyState::default(),
            scheme,
        }
    }

    /// Queue an event for the next frame.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn scheme(&self) -> &dyn InputScheme {
        self.scheme.as_ref()
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    /// Apply every queued event in order and return this frame's input.
    pub fn drain(&mut self) -> FrameInput {
        let mut frame = FrameInput::default();
        while let Some(event) = self.queue.pop_front() {
            self.apply_common(&event, &mut frame);
            self.scheme.handle(&event, &mut frame);
        }
        frame.movement = self.scheme.movement();
        frame.ascend = self.keys.is_down(Key::Space);
        frame.descend = self.keys.is_down(Key::ShiftLeft);
        frame
    }

    fn apply_common(&mut self, event: &InputEvent, frame: &mut FrameInput) {
        match *event {
            InputEvent::Key { key, pressed } => {
                let fresh = self.keys.set(key, pressed);
                if fresh && key == Key::F1 {
                    frame.actions.push(Action::ToggleInspector);
                }
            }
            InputEvent::PointerButton {
                button,
                pressed: true,
            } => match button {
                PointerButton::Left => frame.actions.push(Action::Place),
                PointerButton::Right => frame.actions.push(Action::Remove),
                PointerButton::Middle => {}
            },
            InputEvent::Wheel { delta_y } => {
                if delta_y > 0.0 {
                    frame.actions.push(Action::CycleBlock(1));
                } else if delta_y < 0.0 {
                    frame.actions.push(Action::CycleBlock(-1));
                } else {
                    debug!("ignoring zero wheel delta");
                }
            }
            InputEvent::FocusLost => {
                debug!("focus lost, releasing held keys");
                self.keys.clear();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::{PointerLockScheme, TouchScheme};

    fn desktop() -> InputCollector {
        InputCollector::new(Box::new(PointerLockScheme::new()))
    }

    #[test]
    fn drain_empties_queue() {
        let mut c = desktop();
        c.push(InputEvent::Wheel { delta_y: 1.0 });
        c.push(InputEvent::Wheel { delta_y: -3.0 });
        assert_eq!(c.pending(), 2);
        let f = c.drain();
        assert_eq!(f.actions, vec![Action::CycleBlock(1), Action::CycleBlock(-1)]);
        assert_eq!(c.pending(), 0);
        assert!(c.drain().actions.is_empty());
    }

    #[test]
    fn zero_wheel_is_ignored() {
        let mut c = desktop();
        c.push(InputEvent::Wheel { delta_y: 0.0 });
        assert!(c.drain().actions.is_empty());
    }

    #[test]
    fn vertical_keys_follow_held_state() {
        let mut c = desktop();
        c.push(InputEvent::Key {
            key: Key::Space,
            pressed: true,
        });
        let f = c.drain();
        assert!(f.ascend && !f.descend);
        // still held next frame with no new events
        assert!(c.drain().ascend);

        c.push(InputEvent::Key {
            key: Key::Space,
            pressed: false,
        });
        c.push(InputEvent::Key {
            key: Key::ShiftLeft,
            pressed: true,
        });
        let f = c.drain();
        assert!(!f.ascend && f.descend);
    }

    #[test]
    fn first_click_captures_and_places() {
        let mut c = desktop();
        c.push(InputEvent::PointerButton {
            button: PointerButton::Left,
            pressed: true,
        });
        c.push(InputEvent::PointerButton {
            button: PointerButton::Left,
            pressed: false,
        });
        c.push(InputEvent::PointerButton {
            button: PointerButton::Right,
            pressed: true,
        });
        let f = c.drain();
        assert_eq!(
            f.actions,
            vec![Action::Place, Action::CapturePointer, Action::Remove]
        );
        assert!(c.scheme().pointer_captured());
    }

    #[test]
    fn inspector_toggle_ignores_key_repeat() {
        let mut c = desktop();
        for _ in 0..3 {
            c.push(InputEvent::Key {
                key: Key::F1,
                pressed: true,
            });
        }
        c.push(InputEvent::Key {
            key: Key::F1,
            pressed: false,
        });
        c.push(InputEvent::Key {
            key: Key::F1,
            pressed: true,
        });
        let f = c.drain();
        assert_eq!(
            f.actions,
            vec![Action::ToggleInspector, Action::ToggleInspector]
        );
    }

    #[test]
    fn focus_loss_drops_held_keys() {
        let mut c = desktop();
        c.push(InputEvent::Key {
            key: Key::ShiftLeft,
            pressed: true,
        });
        c.push(InputEvent::FocusLost);
        assert!(!c.drain().descend);
    }

    #[test]
    fn touch_scheme_movement_reaches_frame() {
        let scheme = TouchScheme::new(Vec2::new(800.0, 600.0));
        let anchor = scheme.layout().joystick_center();
        let mut c = InputCollector::new(Box::new(scheme));
        c.push(InputEvent::Touch {
            id: 1,
            phase: crate::TouchPhase::Started,
            position: anchor,
        });
        c.push(InputEvent::Touch {
            id: 1,
            phase: crate::TouchPhase::Moved,
            position: anchor + Vec2::new(0.0, -50.0),
        });
        let f = c.drain();
        assert_eq!(f.movement, Vec2::new(0.0, -1.0));
        assert!(c.scheme().touch_controls().is_some());
    }
}
