use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the six faces of a unit cube, in texture-slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Slot of this face in a [`BlockType::face_textures`] array.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Outward unit normal.
    pub fn normal(self) -> Vec3 {
        match self {
            Face::PosX => Vec3::X,
            Face::NegX => Vec3::NEG_X,
            Face::PosY => Vec3::Y,
            Face::NegY => Vec3::NEG_Y,
            Face::PosZ => Vec3::Z,
            Face::NegZ => Vec3::NEG_Z,
        }
    }
}

/// Static appearance data for one block type.
struct BlockSpec {
    name: &'static str,
    faces: [&'static str; 6],
    opacity: f32,
}

const fn uniform(name: &'static str, texture: &'static str) -> BlockSpec {
    BlockSpec {
        name,
        faces: [texture; 6],
        opacity: 1.0,
    }
}

const TABLE: [BlockSpec; BlockType::COUNT] = [
    BlockSpec {
        name: "Grass",
        faces: [
            "grass_side.png",
            "grass_side.png",
            "grass_top.png",
            "grass_bottom.png",
            "grass_side.png",
            "grass_side.png",
        ],
        opacity: 1.0,
    },
    uniform("Dirt", "dirt.png"),
    uniform("Stone", "stone.png"),
    uniform("Wood", "wood.png"),
    uniform("Sand", "sand.png"),
    BlockSpec {
        name: "Glass",
        faces: ["glass.png"; 6],
        opacity: 0.55,
    },
];

/// A placeable block type. The discriminant is the persisted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Grass = 0,
    Dirt = 1,
    Stone = 2,
    Wood = 3,
    Sand = 4,
    Glass = 5,
}

/// A stored block index that names no entry in the block table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("block index {0} is outside the block table (0..{count})", count = BlockType::COUNT)]
pub struct InvalidBlockIndex(pub usize);

impl BlockType {
    pub const COUNT: usize = 6;

    pub const ALL: [BlockType; Self::COUNT] = [
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Wood,
        BlockType::Sand,
        BlockType::Glass,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self, InvalidBlockIndex> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(InvalidBlockIndex(index))
    }

    pub fn name(self) -> &'static str {
        TABLE[self.index()].name
    }

    /// Texture file names per face, indexed by [`Face::slot`].
    pub fn face_textures(self) -> [&'static str; 6] {
        TABLE[self.index()].faces
    }

    pub fn face_texture(self, face: Face) -> &'static str {
        TABLE[self.index()].faces[face.slot()]
    }

    pub fn opacity(self) -> f32 {
        TABLE[self.index()].opacity
    }

    /// Whether the block is alpha-blended rather than opaque.
    pub fn is_translucent(self) -> bool {
        self.opacity() < 1.0
    }

    /// Step circularly through the table; negative steps go backwards.
    pub fn cycled(self, step: i32) -> Self {
        let n = Self::COUNT as i64;
        let next = (self.index() as i64 + step as i64).rem_euclid(n);
        Self::ALL[next as usize]
    }

    /// Every distinct texture name referenced by the table, in first-use order.
    pub fn texture_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for block in Self::ALL {
            for name in block.face_textures() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl TryFrom<u8> for BlockType {
    type Error = InvalidBlockIndex;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value as usize)
    }
}

impl From<BlockType> for u8 {
    fn from(block: BlockType) -> u8 {
        block as u8
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
