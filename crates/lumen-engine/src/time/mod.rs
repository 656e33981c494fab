//! Frame timing.
//!
//! One `FrameClock` per render loop; `tick()` once per presented frame.

mod frame_clock;
mod pacing;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacing::FramePacer;
