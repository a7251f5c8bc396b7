use crate::kv::KvStore;
use voxelbox_common::BlockRecord;
use voxelbox_kernel::World;

/// Key the placed-block list is stored under.
pub const WORLD_KEY: &str = "voxelbox-world";

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Serialize the full ordered block list.
pub fn encode_records(records: &[BlockRecord]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(records)?)
}

/// Parse a stored block list. Any record with an unknown type index fails
/// the whole value.
pub fn decode_records(text: &str) -> Result<Vec<BlockRecord>, StoreError> {
    Ok(serde_json::from_str(text)?)
}

/// Saves and loads the placed-block list under one key of a [`KvStore`].
#[derive(Debug)]
pub struct WorldStore<S> {
    kv: S,
    key: String,
}

impl<S: KvStore> WorldStore<S> {
    /// Store under [`WORLD_KEY`].
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, WORLD_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    /// Rewrite the whole stored list.
    pub fn save(&mut self, records: &[BlockRecord]) -> Result<(), StoreError> {
        let text = encode_records(records)?;
        self.kv.set(&self.key, &text)?;
        tracing::debug!(key = %self.key, blocks = records.len(), "world saved");
        Ok(())
    }

    /// Load the stored list. Absent, unreadable or malformed data is an
    /// empty world.
    pub fn load(&self) -> Vec<BlockRecord> {
        let text = match self.kv.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored world");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, "failed to read stored world: {e}");
                return Vec::new();
            }
        };
        match decode_records(&text) {
            Ok(records) => {
                tracing::info!(key = %self.key, blocks = records.len(), "world loaded");
                records
            }
            Err(e) => {
                tracing::warn!(key = %self.key, "discarding malformed stored world: {e}");
                Vec::new()
            }
        }
    }

    /// Load the stored list and rebuild one mesh per record.
    pub fn load_world(&self) -> World {
        World::from_records(self.load())
    }
}
