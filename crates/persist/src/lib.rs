//! Persistence: a text key-value store standing in for browser local storage,
//! and the JSON codec for the placed-block list.
//!
//! # Invariants
//! - The whole block list is rewritten on every save; there are no deltas.
//! - A missing, unreadable or malformed stored value loads as an empty world.

mod kv;
mod store;

pub use kv::{FileKvStore, KvStore, MemoryKvStore};
pub use store::{StoreError, WORLD_KEY, WorldStore, decode_records, encode_records};
