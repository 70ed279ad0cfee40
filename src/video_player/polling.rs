// SPDX-License-Identifier: MPL-2.0
//! Time polling loop.
//!
//! While playing, the session republishes the resource's playhead and
//! buffered ranges once per display frame. The loop is an explicit,
//! cancellable task:
//!
//! - every `start()` hands out a fresh [`PollTick`] generation
//! - `stop()` retires the generation, so ticks already queued are dropped
//! - with [`PollDriver::Interval`], a tokio task produces the ticks and is
//!   aborted on stop or drop
//! - with [`PollDriver::External`], the host produces ticks (for example a
//!   `window::frames` subscription that only exists while polling)

use super::session::SessionInput;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Liveness token carried by every poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollTick {
    generation: u64,
}

impl PollTick {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Who produces poll ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDriver {
    /// The host calls [`MediaSession::tick`](super::MediaSession::tick).
    External,
    /// A tokio task posts ticks into the session inbox at this period.
    Interval(Duration),
}

/// Cancellable frame-cadence loop.
#[derive(Debug)]
pub struct PollLoop {
    driver: PollDriver,
    generation: u64,
    running: bool,
    task: Option<JoinHandle<()>>,
}

impl PollLoop {
    #[must_use]
    pub fn new(driver: PollDriver) -> Self {
        Self {
            driver,
            generation: 0,
            running: false,
            task: None,
        }
    }

    /// Starts (or restarts) the loop under a new generation.
    pub fn start(&mut self, inbox: &mpsc::UnboundedSender<SessionInput>) -> PollTick {
        self.abort_task();
        self.generation += 1;
        self.running = true;
        let tick = PollTick {
            generation: self.generation,
        };

        if let PollDriver::Interval(period) = self.driver {
            self.task = spawn_interval(period, tick, inbox.clone());
        }

        tracing::debug!(generation = self.generation, "polling started");
        tick
    }

    /// Stops the loop. Ticks of the retired generation are ignored from now on.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.abort_task();
        self.generation += 1;
        self.running = false;
        tracing::debug!(generation = self.generation, "polling stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Token for the live generation, if the loop is running.
    #[must_use]
    pub fn current_tick(&self) -> Option<PollTick> {
        self.running.then_some(PollTick {
            generation: self.generation,
        })
    }

    /// Liveness check applied to every tick before it touches state.
    #[must_use]
    pub fn accepts(&self, tick: PollTick) -> bool {
        self.running && tick.generation == self.generation
    }

    #[must_use]
    pub fn driver(&self) -> PollDriver {
        self.driver
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PollLoop {
    fn drop(&mut self) {
        self.abort_task();
    }
}

fn spawn_interval(
    period: Duration,
    tick: PollTick,
    inbox: mpsc::UnboundedSender<SessionInput>,
) -> Option<JoinHandle<()>> {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::warn!("no tokio runtime; poll ticks must be delivered by the host");
        return None;
    };

    Some(runtime.spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if inbox.send(SessionInput::Tick(tick)).is_err() {
                break;
            }
        }
    }))
}
