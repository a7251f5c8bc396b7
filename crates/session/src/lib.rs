//! The running toy: one [`Session`] owns every piece of mutable state and
//! advances it one frame at a time.
//!
//! # Invariants
//! - Input is applied only inside [`Session::frame`], never from platform
//!   callbacks directly.
//! - Any frame that changes the block list rewrites the stored list before
//!   it returns.

mod session;

pub use session::{FrameOutcome, PlatformRequest, Session};
