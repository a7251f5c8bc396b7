//! Rendering Adapter: the player camera rig and a renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers cannot mutate the world.
//! - Render state derives from world state and the rig.
//! - Pitch never affects horizontal movement.

mod renderer;
mod rig;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use rig::{LOOK_SENSITIVITY, MOVE_SPEED, PlayerRig};
