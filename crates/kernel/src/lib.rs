//! World Kernel: the placed-block list, the terrain it sits on, and the rules
//! for placing and removing blocks.
//!
//! # Invariants
//! - The record list and the mesh list are index-aligned at all times.
//! - All block mutations flow through [`World::place`] and [`World::remove_at`]
//!   and are recorded as [`WorldEvent`]s.

pub mod placement;
pub mod raycast;
pub mod terrain;
pub mod world;

pub use placement::{Placement, REACH};
pub use raycast::{Aabb, Ray, RayHit};
pub use terrain::Terrain;
pub use world::{BlockMesh, World, WorldEvent};
