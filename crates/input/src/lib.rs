//! Input: platform events are queued, then drained once per frame into a
//! [`FrameInput`] through the input scheme chosen at startup.
//!
//! # Invariants
//! - The scheme (pointer lock or touch) is chosen once and never swapped.
//! - Events are applied in arrival order, all before the frame that reads them.

pub mod action;
pub mod collector;
pub mod event;
pub mod joystick;
pub mod radial;
pub mod scheme;

pub use action::Action;
pub use collector::{FrameInput, InputCollector, KeyState};
pub use event::{InputEvent, Key, PointerButton, TouchPhase};
pub use joystick::{JOYSTICK_RADIUS, Joystick};
pub use radial::RadialSelector;
pub use scheme::{DeviceClass, InputScheme, PointerLockScheme, TouchLayout, TouchScheme};
