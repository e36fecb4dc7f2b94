//! Real-time tick driver for hosts without their own frame loop.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Calls back once per frame at a fixed rate until shut down.
#[derive(Clone, Copy, Debug)]
pub struct TickDriver {
    period: Duration,
}

impl TickDriver {
    pub const DEFAULT_TICK_RATE: u32 = 60;

    /// Creates a driver running `tick_rate` frames per second (at least one).
    pub fn new(tick_rate: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / tick_rate.max(1),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Runs frames until `shutdown` resolves or `on_tick` breaks.
    ///
    /// `on_tick` receives the time elapsed since the previous frame; the first
    /// frame fires immediately with a zero delta. Late frames are skipped
    /// rather than replayed in a burst. Returns the number of frames run.
    pub async fn run<F>(
        &self,
        shutdown: impl Future<Output = ()>,
        mut on_tick: F,
    ) -> u64
    where
        F: FnMut(Duration) -> ControlFlow<()>,
    {
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut last = Instant::now();
        let mut ticks = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!(target: "ability::driver", ticks, "shutdown requested");
                    break;
                }
                now = interval.tick() => {
                    let dt = now.saturating_duration_since(last);
                    last = now;
                    ticks += 1;
                    if on_tick(dt).is_break() {
                        debug!(target: "ability::driver", ticks, "tick callback finished");
                        break;
                    }
                }
            }
        }
        ticks
    }
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TICK_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future;

    #[tokio::test(start_paused = true)]
    async fn runs_until_shutdown() {
        let driver = TickDriver::new(10);
        let mut elapsed = Duration::ZERO;

        let ticks = driver
            .run(time::sleep(Duration::from_millis(950)), |dt| {
                elapsed += dt;
                ControlFlow::Continue(())
            })
            .await;

        assert_eq!(ticks, 10);
        assert_eq!(elapsed, Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn callback_can_stop_the_loop() {
        let driver = TickDriver::new(20);
        let mut remaining = 3;

        let ticks = driver
            .run(future::pending(), |_| {
                remaining -= 1;
                if remaining == 0 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .await;

        assert_eq!(ticks, 3);
    }
}
