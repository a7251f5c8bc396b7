use crate::rig::PlayerRig;
use glam::{IVec3, Vec3};
use std::fmt::Write;
use voxelbox_kernel::World;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Unit look direction.
    pub direction: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Cell the preview outline sits on, if anything is in reach.
    pub preview: Option<IVec3>,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_rig(&PlayerRig::default(), None)
    }
}

impl RenderView {
    pub fn from_rig(rig: &PlayerRig, preview: Option<IVec3>) -> Self {
        Self {
            eye: rig.eye(),
            direction: rig.look_direction(),
            fov_degrees: rig.fov.to_degrees(),
            preview,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads world state and a view configuration, then produces
/// output. It never mutates the world.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given world state and view.
    fn render(&self, world: &World, view: &RenderView) -> Self::Output;
}

/// Human-readable dump of the world, used by the inspector panel and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Stop listing records after this many. `None` lists everything.
    pub max_records: Option<usize>,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_records: usize) -> Self {
        Self {
            max_records: Some(max_records),
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &World, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== World State ===");
        let _ = writeln!(out, "Blocks: {}", world.len());
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) dir=({:.2}, {:.2}, {:.2}) fov={:.0}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.direction.x,
            view.direction.y,
            view.direction.z,
            view.fov_degrees
        );
        match view.preview {
            Some(cell) => {
                let _ = writeln!(out, "Preview: ({}, {}, {})", cell.x, cell.y, cell.z);
            }
            None => {
                let _ = writeln!(out, "Preview: none");
            }
        }

        let limit = self.max_records.unwrap_or(usize::MAX);
        for (index, record) in world.records().iter().enumerate().take(limit) {
            let _ = writeln!(
                out,
                "  [{index}] {} at ({}, {}, {})",
                record.block, record.x, record.y, record.z
            );
        }
        if world.len() > limit {
            let _ = writeln!(out, "  ... {} more", world.len() - limit);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelbox_common::{BlockRecord, BlockType};

    #[test]
    fn debug_renderer_empty_world() {
        let world = World::new();
        let output = DebugTextRenderer::new().render(&world, &RenderView::default());

        assert!(output.contains("Blocks: 0"));
        assert!(output.contains("Preview: none"));
        assert!(output.contains("fov=75"));
    }

    #[test]
    fn debug_renderer_lists_records_in_order() {
        let mut world = World::new();
        world.place(BlockRecord::new(IVec3::new(3, 1, 4), BlockType::Stone));
        world.place(BlockRecord::new(IVec3::new(-2, 0, 7), BlockType::Glass));

        let view = RenderView::from_rig(&PlayerRig::default(), Some(IVec3::new(3, 2, 4)));
        let output = DebugTextRenderer::new().render(&world, &view);

        assert!(output.contains("Blocks: 2"));
        assert!(output.contains("Preview: (3, 2, 4)"));
        let stone = output.find("[0] Stone at (3, 1, 4)");
        let glass = output.find("[1] Glass at (-2, 0, 7)");
        assert!(stone.is_some() && glass.is_some());
        assert!(stone < glass);
    }

    #[test]
    fn debug_renderer_truncates_long_lists() {
        let mut world = World::new();
        for x in 0..5 {
            world.place(BlockRecord::new(IVec3::new(x, 0, 0), BlockType::Dirt));
        }
        let output = DebugTextRenderer::with_limit(2).render(&world, &RenderView::default());
        assert!(output.contains("[1] Dirt"));
        assert!(!output.contains("[2] Dirt"));
        assert!(output.contains("... 3 more"));
    }

    #[test]
    fn render_view_follows_rig() {
        let view = RenderView::default();
        assert_eq!(view.eye, Vec3::new(0.0, 2.0, 5.0));
        assert!((view.direction - Vec3::NEG_Z).length() < 1e-5);
        assert!((view.fov_degrees - 75.0).abs() < 1e-3);
    }
}
