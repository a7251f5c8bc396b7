//! Block textures.
//!
//! Every texture file named in the block table is decoded, resized to a
//! [`TILE_SIZE`] square with nearest-neighbour filtering and stored as one
//! layer. The GPU renderer uploads the layers as a texture array and looks
//! them up per face through [`TextureLibrary::block_layers`].
//!
//! A file that cannot be read or decoded never stops the game: its layer is
//! an opaque white tile and the failure is logged.

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use voxelbox_common::{BlockType, Face};

/// Edge length of every layer, in texels.
pub const TILE_SIZE: u32 = 16;

/// Errors from loading a single texture file.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read texture {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode texture {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Read one image file and resize it to a tile.
pub fn load_tile(path: impl AsRef<Path>) -> Result<RgbaImage, AssetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(to_tile(decoded.to_rgba8()))
}

fn to_tile(image: RgbaImage) -> RgbaImage {
    if image.dimensions() == (TILE_SIZE, TILE_SIZE) {
        return image;
    }
    image::imageops::resize(&image, TILE_SIZE, TILE_SIZE, FilterType::Nearest)
}

/// Stand-in for a texture that failed to load.
pub fn placeholder_tile() -> RgbaImage {
    RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, Rgba([255, 255, 255, 255]))
}

/// One decoded layer per distinct texture name.
#[derive(Debug, Clone)]
pub struct TextureLibrary {
    names: Vec<String>,
    tiles: Vec<RgbaImage>,
    missing: Vec<String>,
}

impl TextureLibrary {
    /// Load every texture the block table references from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        Self::load_names(dir, &BlockType::texture_names())
    }

    /// Load the given file names from `dir`, in order. Layer `i` is `names[i]`.
    pub fn load_names(dir: impl AsRef<Path>, names: &[&str]) -> Self {
        let dir = dir.as_ref();
        let mut library = Self {
            names: Vec::with_capacity(names.len()),
            tiles: Vec::with_capacity(names.len()),
            missing: Vec::new(),
        };

        for name in names {
            let tile = match load_tile(dir.join(name)) {
                Ok(tile) => {
                    debug!(texture = %name, "loaded texture");
                    tile
                }
                Err(e) => {
                    warn!(error = %e, "texture unavailable, using blank tile");
                    library.missing.push((*name).to_string());
                    placeholder_tile()
                }
            };
            library.names.push((*name).to_string());
            library.tiles.push(tile);
        }

        info!(
            dir = %dir.display(),
            layers = library.tiles.len(),
            missing = library.missing.len(),
            "texture library ready"
        );
        library
    }

    /// A library where every block texture is the placeholder tile.
    pub fn blank() -> Self {
        let names: Vec<String> = BlockType::texture_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            tiles: vec![placeholder_tile(); names.len()],
            missing: names.clone(),
            names,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile_size(&self) -> u32 {
        TILE_SIZE
    }

    /// Names that fell back to the placeholder.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn layer(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| i as u32)
    }

    pub fn tile(&self, layer: u32) -> Option<&RgbaImage> {
        self.tiles.get(layer as usize)
    }

    pub fn tiles(&self) -> &[RgbaImage] {
        &self.tiles
    }

    /// Texture-array layer per face, indexed by [`Face::slot`]. Names the
    /// library does not hold map to layer 0.
    pub fn block_layers(&self, block: BlockType) -> [u32; 6] {
        let mut layers = [0; 6];
        for face in Face::ALL {
            layers[face.slot()] = self.layer(block.face_texture(face)).unwrap_or(0);
        }
        layers
    }
}
