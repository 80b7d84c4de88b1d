//! Animation frame scheduling
//!
//! The render loop is a cooperative task: a tick callback rescheduled
//! through a `FrameScheduler` until its `CancellationToken` is cancelled.

mod frame_loop;

pub use frame_loop::{
    CancellationToken, FrameCallback, FrameLoop, FrameScheduler, ManualScheduler,
};
