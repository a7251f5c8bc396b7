//! wgpu render backend for voxelbox.
//!
//! Draws the rippled ground, the placed blocks as textured instanced cubes
//! and the preview outline. Glass goes through a second, alpha-blended
//! pipeline after all opaque geometry.
//!
//! # Invariants
//! - Renderer never mutates world state.
//! - Camera state lives in [`voxelbox_render::PlayerRig`]; this crate only
//!   reads it.

mod gpu;
mod mesh;
pub mod palette;
mod shaders;

pub use gpu::WgpuRenderer;
