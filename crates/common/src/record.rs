use crate::BlockType;
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// One placed block as it is persisted: integer cell coordinates plus type.
///
/// The serialized form is `{"x":3,"y":1,"z":4,"type":2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRecord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    #[serde(rename = "type")]
    pub block: BlockType,
}

impl BlockRecord {
    pub fn new(position: IVec3, block: BlockType) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            block,
        }
    }

    pub fn position(&self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// World-space centre of the unit cube occupying this cell.
    pub fn center(&self) -> Vec3 {
        self.position().as_vec3()
    }
}
