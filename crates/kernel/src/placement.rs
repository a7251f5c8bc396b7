//! Preview cursor, block placement and block removal.

use crate::raycast::{Ray, RayHit};
use crate::terrain::Terrain;
use crate::world::World;
use glam::IVec3;
use voxelbox_common::{BlockRecord, BlockType};

/// Maximum reach of the look ray. Hits must be strictly closer than this.
pub const REACH: f32 = 6.0;

/// Nearest placed block hit by `ray` within `reach`, with its index.
pub fn raycast_blocks(world: &World, ray: &Ray, reach: f32) -> Option<(usize, RayHit)> {
    world
        .meshes()
        .iter()
        .enumerate()
        .filter_map(|(i, mesh)| mesh.bounds().intersect(ray).map(|hit| (i, hit)))
        .filter(|(_, hit)| hit.distance < reach)
        .min_by(|(_, x), (_, y)| x.distance.total_cmp(&y.distance))
}

/// Cell a new block goes into for a surface hit: one unit out along the
/// normal, rounded to the nearest integer on each axis.
///
/// A point on a cube face sits on a half-integer plane, so the offset lands
/// exactly on a tie there; ties round towards the hit surface.
pub fn placement_cell(hit: &RayHit) -> IVec3 {
    let target = hit.point + hit.normal;
    IVec3::new(
        snap_axis(target.x, hit.normal.x),
        snap_axis(target.y, hit.normal.y),
        snap_axis(target.z, hit.normal.z),
    )
}

fn snap_axis(value: f32, normal: f32) -> i32 {
    let tie = (value - value.floor() - 0.5).abs() <= f32::EPSILON * value.abs().max(1.0);
    let snapped = if tie && normal > 0.0 {
        value.floor()
    } else if tie && normal < 0.0 {
        value.ceil()
    } else {
        (value + 0.5).floor()
    };
    snapped as i32
}

/// The transient placement cursor and the place/remove rules around it.
#[derive(Debug, Clone)]
pub struct Placement {
    preview: Option<IVec3>,
    reach: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            preview: None,
            reach: REACH,
        }
    }
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current preview cell, or `None` when the cursor is hidden.
    pub fn preview(&self) -> Option<IVec3> {
        self.preview
    }

    pub fn reach(&self) -> f32 {
        self.reach
    }

    /// Recompute the preview from the nearest terrain or block surface.
    pub fn update_preview(&mut self, world: &World, terrain: &Terrain, ray: &Ray) -> Option<IVec3> {
        let ground = terrain.raycast(ray, self.reach);
        let block = raycast_blocks(world, ray, self.reach).map(|(_, hit)| hit);
        let nearest = match (ground, block) {
            (Some(g), Some(b)) => Some(if b.distance <= g.distance { b } else { g }),
            (g, b) => g.or(b),
        };
        self.preview = nearest.as_ref().map(placement_cell);
        self.preview
    }

    /// Place `block` at the preview cell. No-op while the preview is hidden.
    pub fn place(&self, world: &mut World, block: BlockType) -> Option<usize> {
        let cell = self.preview?;
        let index = world.place(BlockRecord::new(cell, block));
        tracing::debug!(?cell, %block, index, "placed block");
        Some(index)
    }

    /// Remove the nearest block along `ray` within reach. Terrain is ignored.
    pub fn remove(&self, world: &mut World, ray: &Ray) -> Option<BlockRecord> {
        let (index, hit) = raycast_blocks(world, ray, self.reach)?;
        let record = world.remove_at(index)?;
        tracing::debug!(
            cell = ?record.position(),
            block = %record.block,
            distance = hit.distance,
            "removed block"
        );
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn world_with(cells: &[(IVec3, BlockType)]) -> World {
        World::from_records(
            cells
                .iter()
                .map(|&(c, b)| BlockRecord::new(c, b))
                .collect(),
        )
    }

    #[test]
    fn preview_on_ground_snaps_above_surface() {
        let terrain = Terrain::default();
        let world = World::new();
        let mut placement = Placement::new();
        // Straight down onto the ground near (3, 0.38, 4).
        let ray = Ray::new(Vec3::new(3.1, 3.0, 4.1), Vec3::NEG_Y);
        let cell = placement.update_preview(&world, &terrain, &ray).unwrap();
        assert_eq!(cell, IVec3::new(3, 1, 4));
    }

    #[test]
    fn preview_hidden_when_nothing_in_reach() {
        let terrain = Terrain::default();
        let world = World::new();
        let mut placement = Placement::new();
        let ray = Ray::new(Vec3::new(0.0, 2.0, 5.0), Vec3::Y);
        assert!(placement.update_preview(&world, &terrain, &ray).is_none());
        assert!(placement.preview().is_none());
    }

    #[test]
    fn preview_on_block_face_is_adjacent_cell() {
        let terrain = Terrain::default();
        let world = world_with(&[(IVec3::new(0, 1, 0), BlockType::Stone)]);
        let mut placement = Placement::new();

        // +Z face
        let ray = Ray::new(Vec3::new(0.1, 1.2, 4.0), Vec3::NEG_Z);
        assert_eq!(
            placement.update_preview(&world, &terrain, &ray),
            Some(IVec3::new(0, 1, 1))
        );
        // -X face
        let ray = Ray::new(Vec3::new(-4.0, 0.9, -0.2), Vec3::X);
        assert_eq!(
            placement.update_preview(&world, &terrain, &ray),
            Some(IVec3::new(-1, 1, 0))
        );
        // top face
        let ray = Ray::new(Vec3::new(0.2, 5.0, 0.3), Vec3::NEG_Y);
        assert_eq!(
            placement.update_preview(&world, &terrain, &ray),
            Some(IVec3::new(0, 2, 0))
        );
    }

    #[test]
    fn place_without_preview_is_noop() {
        let mut world = World::new();
        let placement = Placement::new();
        assert!(placement.place(&mut world, BlockType::Dirt).is_none());
        assert!(world.is_empty());
        assert!(world.events().is_empty());
    }

    #[test]
    fn place_uses_preview_cell_and_block() {
        let terrain = Terrain::default();
        let mut world = World::new();
        let mut placement = Placement::new();
        let ray = Ray::new(Vec3::new(3.1, 3.0, 4.1), Vec3::NEG_Y);
        placement.update_preview(&world, &terrain, &ray);
        let index = placement.place(&mut world, BlockType::Stone).unwrap();
        assert_eq!(index, 0);
        assert_eq!(
            world.records(),
            &[BlockRecord::new(IVec3::new(3, 1, 4), BlockType::Stone)]
        );
    }

    #[test]
    fn remove_nearest_block_in_reach() {
        let mut world = world_with(&[
            (IVec3::new(0, 1, -4), BlockType::Wood),
            (IVec3::new(0, 1, -2), BlockType::Sand),
        ]);
        let placement = Placement::new();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z);
        let removed = placement.remove(&mut world, &ray).unwrap();
        assert_eq!(removed.block, BlockType::Sand);
        assert_eq!(world.len(), 1);
        assert_eq!(world.meshes().len(), 1);
        assert_eq!(world.records()[0].block, BlockType::Wood);
    }

    #[test]
    fn remove_out_of_reach_is_noop() {
        let mut world = world_with(&[(IVec3::new(0, 1, -7), BlockType::Wood)]);
        let placement = Placement::new();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z);
        assert!(placement.remove(&mut world, &ray).is_none());
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn remove_ignores_terrain() {
        let terrain = Terrain::default();
        let mut world = World::new();
        let placement = Placement::new();
        let ray = Ray::new(Vec3::new(3.1, 3.0, 4.1), Vec3::NEG_Y);
        assert!(terrain.raycast(&ray, REACH).is_some());
        assert!(placement.remove(&mut world, &ray).is_none());
    }

    #[test]
    fn snapping_rounds_half_up_off_tie_planes() {
        assert_eq!(snap_axis(1.378, 0.99), 1);
        assert_eq!(snap_axis(-2.5, 0.0), -2);
        assert_eq!(snap_axis(2.5, 0.0), 3);
        assert_eq!(snap_axis(4.5, 1.0), 4);
        assert_eq!(snap_axis(1.5, -1.0), 2);
    }
}
