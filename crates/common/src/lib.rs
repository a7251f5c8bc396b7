//! Shared types for voxelbox: the fixed block table and persisted block records.
//!
//! # Invariants
//! - The block table is static data; it never changes at runtime.
//! - A block type's index is its persisted identity.

pub mod block;
pub mod record;

pub use block::{BlockType, Face, InvalidBlockIndex};
pub use record::BlockRecord;
