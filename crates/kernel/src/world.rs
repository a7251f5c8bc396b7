use crate::raycast::Aabb;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use voxelbox_common::{BlockRecord, BlockType};

/// An event record produced by every mutation to the block list.
///
/// The session drains these each frame; any event means the stored world is
/// out of date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A block was appended at `index`.
    Placed { index: usize, record: BlockRecord },
    /// The block at `index` was removed. Carries the record it had.
    Removed { index: usize, record: BlockRecord },
}

/// Renderable counterpart of a [`BlockRecord`]: a unit cube with the
/// appearance of its block type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockMesh {
    pub center: Vec3,
    pub block: BlockType,
}

impl BlockMesh {
    /// Build the mesh for a record. Appearance comes from the block table.
    pub fn new(record: &BlockRecord) -> Self {
        Self {
            center: record.center(),
            block: record.block,
        }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.center)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::unit_cube(self.center)
    }

    pub fn is_translucent(&self) -> bool {
        self.block.is_translucent()
    }
}

/// The authoritative set of placed blocks.
///
/// Records and meshes live in two parallel vectors so the persisted order and
/// the draw order stay in lockstep.
#[derive(Debug, Clone, Default)]
pub struct World {
    records: Vec<BlockRecord>,
    meshes: Vec<BlockMesh>,
    /// Append-only log of mutations since the last drain.
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a world from stored records, one mesh per record.
    ///
    /// Loading is not a mutation and records no events.
    pub fn from_records(records: Vec<BlockRecord>) -> Self {
        let meshes = records.iter().map(BlockMesh::new).collect();
        Self {
            records,
            meshes,
            event_log: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BlockRecord] {
        &self.records
    }

    pub fn meshes(&self) -> &[BlockMesh] {
        &self.meshes
    }

    /// Append a block. Returns its index.
    pub fn place(&mut self, record: BlockRecord) -> usize {
        let index = self.records.len();
        self.records.push(record);
        self.meshes.push(BlockMesh::new(&record));
        self.event_log.push(WorldEvent::Placed { index, record });
        index
    }

    /// Remove the block at `index` from both lists.
    pub fn remove_at(&mut self, index: usize) -> Option<BlockRecord> {
        if index >= self.records.len() {
            return None;
        }
        let record = self.records.remove(index);
        self.meshes.remove(index);
        self.event_log.push(WorldEvent::Removed { index, record });
        Some(record)
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }
}
