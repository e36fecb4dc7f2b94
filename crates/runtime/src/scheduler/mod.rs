//! Timed task scheduling.
//!
//! The ability engine never owns a thread or a timer. Every deferred or
//! repeating behaviour is handed to a [`Scheduler`] as a task body and
//! identified afterwards by its [`TaskHandle`].
//!
//! # Execution model
//!
//! - Single logical timeline: tasks never run concurrently with each other or
//!   with event dispatch, only interleaved between host frames
//! - Loop bodies decide for themselves whether to keep running by returning
//!   [`ControlFlow::Continue`] or [`ControlFlow::Break`]
//! - Cancellation is only needed for forced teardown; a cancelled task never
//!   resumes again
//!
//! [`TickScheduler`] is a deterministic, frame-driven implementation; hosts
//! with their own task system implement the trait over it.

mod tick;

pub use tick::TickScheduler;

use std::fmt;
use std::ops::ControlFlow;
use std::time::Duration;

use ability_core::{Timestamp, World};

/// Body of a repeating task. Receives the world and the current time.
pub type LoopBody = Box<dyn FnMut(&mut dyn World, Timestamp) -> ControlFlow<()>>;

/// Body of a single-shot task.
pub type OnceBody = Box<dyn FnOnce(&mut dyn World, Timestamp)>;

/// Opaque identifier of a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Wraps a scheduler-specific identifier.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task:{}", self.0)
    }
}

/// Host-provided task runner.
pub trait Scheduler {
    /// Current position on the simulation timeline.
    fn now(&self) -> Timestamp;

    /// Runs `body` on the next tick and then every `interval` until it breaks.
    ///
    /// A zero interval resumes the body on every tick.
    fn run_looping(&mut self, name: &'static str, interval: Duration, body: LoopBody)
    -> TaskHandle;

    /// Runs `body` once, `delay` after now.
    fn run_deferred(&mut self, name: &'static str, delay: Duration, body: OnceBody) -> TaskHandle;

    /// Runs `body` once on the next tick.
    fn run_next_tick(&mut self, name: &'static str, body: OnceBody) -> TaskHandle;

    /// Cancels the task. Returns false if it already finished or never existed.
    fn cancel(&mut self, handle: TaskHandle) -> bool;

    /// Returns true while the task is still scheduled to run.
    fn is_active(&self, handle: TaskHandle) -> bool;
}
