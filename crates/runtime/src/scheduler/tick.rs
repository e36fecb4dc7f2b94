//! Deterministic frame-driven scheduler.

use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::time::Duration;

use ability_core::{Timestamp, World};
use tracing::trace;

use super::{LoopBody, OnceBody, Scheduler, TaskHandle};

enum TaskBody {
    Looping { interval: Duration, body: LoopBody },
    Once(OnceBody),
}

struct ScheduledTask {
    name: &'static str,
    due: Timestamp,
    body: TaskBody,
}

/// Scheduler advanced explicitly by the host once per frame.
///
/// Tasks due at the same time run in the order they were scheduled. Work
/// scheduled while a frame is being processed runs on the following frame at
/// the earliest.
pub struct TickScheduler {
    now: Timestamp,
    next_handle: u64,
    tasks: BTreeMap<TaskHandle, ScheduledTask>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            now: Timestamp::ZERO,
            next_handle: 0,
            tasks: BTreeMap::new(),
        }
    }

    /// Moves the clock forward by `dt` and runs every task that became due.
    ///
    /// Returns the number of task bodies executed.
    pub fn advance(&mut self, dt: Duration, world: &mut dyn World) -> usize {
        self.now = self.now + dt;
        let now = self.now;

        let due: Vec<TaskHandle> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.due <= now)
            .map(|(handle, _)| *handle)
            .collect();

        let mut executed = 0;
        for handle in due {
            let Some(task) = self.tasks.remove(&handle) else {
                continue;
            };
            executed += 1;

            match task.body {
                TaskBody::Once(body) => body(world, now),
                TaskBody::Looping { interval, mut body } => match body(world, now) {
                    ControlFlow::Continue(()) => {
                        self.tasks.insert(
                            handle,
                            ScheduledTask {
                                name: task.name,
                                due: now + interval,
                                body: TaskBody::Looping { interval, body },
                            },
                        );
                    }
                    ControlFlow::Break(()) => {
                        trace!(
                            target: "ability::scheduler",
                            %handle,
                            task = task.name,
                            "loop finished"
                        );
                    }
                },
            }
        }

        executed
    }

    /// Number of tasks still scheduled.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    fn schedule(&mut self, name: &'static str, due: Timestamp, body: TaskBody) -> TaskHandle {
        let handle = TaskHandle::from_raw(self.next_handle);
        self.next_handle += 1;
        trace!(target: "ability::scheduler", %handle, task = name, due = %due, "scheduled");
        self.tasks.insert(handle, ScheduledTask { name, due, body });
        handle
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TickScheduler {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn run_looping(
        &mut self,
        name: &'static str,
        interval: Duration,
        body: LoopBody,
    ) -> TaskHandle {
        self.schedule(name, self.now, TaskBody::Looping { interval, body })
    }

    fn run_deferred(&mut self, name: &'static str, delay: Duration, body: OnceBody) -> TaskHandle {
        self.schedule(name, self.now + delay, TaskBody::Once(body))
    }

    fn run_next_tick(&mut self, name: &'static str, body: OnceBody) -> TaskHandle {
        self.schedule(name, self.now, TaskBody::Once(body))
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let cancelled = self.tasks.remove(&handle);
        if let Some(task) = &cancelled {
            trace!(target: "ability::scheduler", %handle, task = task.name, "cancelled");
        }
        cancelled.is_some()
    }

    fn is_active(&self, handle: TaskHandle) -> bool {
        self.tasks.contains_key(&handle)
    }
}
