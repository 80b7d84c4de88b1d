//! Self-rescheduling frame loop with cooperative cancellation
//!
//! Each frame runs the tick callback and then asks the scheduler for the
//! next frame. Cancelling the token stops the chain: a frame that was
//! already requested fires as a no-op and schedules nothing further.
//! A tick that returns an error cancels the token itself.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Callback for one frame, receiving the host timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Source of animation frames
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<(), String>;
}

/// Shared stop flag for a running loop
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

type Tick = Rc<RefCell<dyn FnMut(f64) -> Result<(), String>>>;

/// Handle to a running loop
pub struct FrameLoop {
    token: CancellationToken,
    frames: Rc<Cell<u64>>,
}

impl FrameLoop {
    /// Request the first frame and keep rescheduling until stopped
    pub fn start<S, F>(scheduler: Rc<S>, tick: F) -> Result<Self, String>
    where
        S: FrameScheduler + 'static,
        F: FnMut(f64) -> Result<(), String> + 'static,
    {
        let token = CancellationToken::new();
        let frames = Rc::new(Cell::new(0));
        let tick: Tick = Rc::new(RefCell::new(tick));

        schedule_next(scheduler, token.clone(), frames.clone(), tick)?;

        Ok(Self { token, frames })
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Frames executed so far
    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

fn schedule_next<S>(
    scheduler: Rc<S>,
    token: CancellationToken,
    frames: Rc<Cell<u64>>,
    tick: Tick,
) -> Result<(), String>
where
    S: FrameScheduler + 'static,
{
    if token.is_cancelled() {
        return Ok(());
    }

    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move |timestamp| {
        if token.is_cancelled() {
            return;
        }

        let result = (*tick.borrow_mut())(timestamp);
        frames.set(frames.get() + 1);

        if let Err(e) = result {
            crate::console_log!("Frame failed, stopping loop: {}", e);
            token.cancel();
            return;
        }

        if let Err(e) = schedule_next(next, token.clone(), frames, tick) {
            crate::console_log!("Frame loop stopped: {}", e);
            token.cancel();
        }
    }))
}

/// Scheduler driven by hand, one frame per `step`
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<VecDeque<FrameCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run the oldest pending frame; false when nothing was queued
    pub fn step(&self, timestamp: f64) -> bool {
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some(callback) => {
                callback(timestamp);
                true
            }
            None => false,
        }
    }

    /// Run up to `count` frames spaced `interval` milliseconds apart, returning how many ran
    pub fn run(&self, count: usize, start: f64, interval: f64) -> usize {
        (0..count)
            .take_while(|&i| self.step(start + interval * i as f64))
            .count()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<(), String> {
        self.pending.borrow_mut().push_back(callback);
        Ok(())
    }
}
