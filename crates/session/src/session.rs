use glam::{IVec3, Vec2};
use tracing::{debug, error, info};
use voxelbox_common::BlockType;
use voxelbox_input::{Action, InputCollector, InputEvent, InputScheme};
use voxelbox_kernel::{Placement, Terrain, World};
use voxelbox_persist::{KvStore, WorldStore};
use voxelbox_render::{DebugTextRenderer, PlayerRig, RenderView, Renderer};

/// Something only the platform layer can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformRequest {
    /// Grab and hide the cursor.
    CapturePointer,
    /// Give the cursor back.
    ReleasePointer,
}

/// What happened during one [`Session::frame`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub requests: Vec<PlatformRequest>,
    /// The block list changed and a write was attempted.
    pub saved: bool,
}

/// All mutable state of one run.
pub struct Session<S: KvStore> {
    world: World,
    terrain: Terrain,
    placement: Placement,
    rig: PlayerRig,
    input: InputCollector,
    store: WorldStore<S>,
    active_block: BlockType,
    show_inspector: bool,
}

impl<S: KvStore> Session<S> {
    /// Load the stored world and start with the default camera.
    pub fn new(store: WorldStore<S>, scheme: Box<dyn InputScheme>) -> Self {
        let world = store.load_world();
        info!(
            blocks = world.len(),
            scheme = ?scheme.device_class(),
            "session started"
        );
        let mut session = Self {
            world,
            terrain: Terrain::default(),
            placement: Placement::new(),
            rig: PlayerRig::default(),
            input: InputCollector::new(scheme),
            store,
            active_block: BlockType::default(),
            show_inspector: false,
        };
        session.refresh_preview();
        session
    }

    /// Queue a platform event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// New logical viewport size. Updates the projection now and the input
    /// layout on the next frame.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.rig.aspect = width / height;
        }
        self.input.push(InputEvent::Resized { width, height });
    }

    /// Advance one frame of `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        let input = self.input.drain();

        if input.look != Vec2::ZERO {
            self.rig.look(input.look.x, input.look.y);
        }
        for action in &input.actions {
            self.apply(*action, &mut outcome);
        }

        self.rig
            .advance(input.movement, input.ascend, input.descend, dt);
        self.refresh_preview();

        let events = self.world.drain_events();
        if !events.is_empty() {
            debug!(events = events.len(), "block list changed");
            if let Err(e) = self.store.save(self.world.records()) {
                error!("failed to save world: {e}");
            }
            outcome.saved = true;
        }
        outcome
    }

    fn apply(&mut self, action: Action, outcome: &mut FrameOutcome) {
        match action {
            Action::Place => {
                self.placement.place(&mut self.world, self.active_block);
            }
            Action::Remove => {
                let ray = self.rig.look_ray();
                self.placement.remove(&mut self.world, &ray);
            }
            Action::CycleBlock(step) => {
                self.active_block = self.active_block.cycled(step);
                debug!(block = %self.active_block, "active block");
            }
            Action::SelectBlock(block) => {
                self.active_block = block;
                debug!(block = %self.active_block, "active block");
            }
            Action::ToggleInspector => self.show_inspector = !self.show_inspector,
            Action::CapturePointer => outcome.requests.push(PlatformRequest::CapturePointer),
            Action::ReleasePointer => outcome.requests.push(PlatformRequest::ReleasePointer),
        }
    }

    fn refresh_preview(&mut self) {
        let ray = self.rig.look_ray();
        self.placement
            .update_preview(&self.world, &self.terrain, &ray);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn rig(&self) -> &PlayerRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut PlayerRig {
        &mut self.rig
    }

    pub fn preview(&self) -> Option<IVec3> {
        self.placement.preview()
    }

    pub fn active_block(&self) -> BlockType {
        self.active_block
    }

    pub fn show_inspector(&self) -> bool {
        self.show_inspector
    }

    pub fn input(&self) -> &InputCollector {
        &self.input
    }

    pub fn store(&self) -> &WorldStore<S> {
        &self.store
    }

    pub fn render_view(&self) -> RenderView {
        RenderView::from_rig(&self.rig, self.preview())
    }

    /// Text dump for the inspector panel.
    pub fn inspector_text(&self) -> String {
        let dump = DebugTextRenderer::with_limit(64).render(&self.world, &self.render_view());
        format!("Active block: {}\n{dump}", self.active_block)
    }
}
