//! winit events to [`InputEvent`]s.

use glam::Vec2;
use voxelbox_input::{InputEvent, Key, PointerButton, TouchPhase};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, Touch};
use winit::keyboard::KeyCode;
use winit::window::{CursorGrabMode, Window};

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Space => Some(Key::Space),
        KeyCode::ShiftLeft => Some(Key::ShiftLeft),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F1 => Some(Key::F1),
        _ => None,
    }
}

pub fn key_event(code: KeyCode, state: ElementState) -> Option<InputEvent> {
    map_key(code).map(|key| InputEvent::Key {
        key,
        pressed: state == ElementState::Pressed,
    })
}

pub fn button_event(button: MouseButton, state: ElementState) -> Option<InputEvent> {
    let button = match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Middle => PointerButton::Middle,
        _ => return None,
    };
    Some(InputEvent::PointerButton {
        button,
        pressed: state == ElementState::Pressed,
    })
}

/// winit reports scrolling up as positive; the input layer expects
/// positive for scrolling down.
pub fn wheel_event(delta: MouseScrollDelta) -> InputEvent {
    let delta_y = match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(p) => -(p.y as f32),
    };
    InputEvent::Wheel { delta_y }
}

fn logical(position: PhysicalPosition<f64>, scale_factor: f64) -> Vec2 {
    let p = position.to_logical::<f32>(scale_factor);
    Vec2::new(p.x, p.y)
}

pub fn touch_event(touch: &Touch, scale_factor: f64) -> InputEvent {
    let phase = match touch.phase {
        winit::event::TouchPhase::Started => TouchPhase::Started,
        winit::event::TouchPhase::Moved => TouchPhase::Moved,
        winit::event::TouchPhase::Ended => TouchPhase::Ended,
        winit::event::TouchPhase::Cancelled => TouchPhase::Cancelled,
    };
    InputEvent::Touch {
        id: touch.id,
        phase,
        position: logical(touch.location, scale_factor),
    }
}

/// Grab and hide the cursor, or give it back. Locking is preferred; some
/// platforms only support confining.
pub fn set_pointer_capture(window: &Window, captured: bool) {
    if captured {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab unavailable: {e}");
        }
        window.set_cursor_visible(false);
    } else {
        if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
            tracing::warn!("cursor release failed: {e}");
        }
        window.set_cursor_visible(true);
    }
}
