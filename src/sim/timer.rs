//! Tick-driven timers
//!
//! Timers advance with simulation time, never wall-clock time, so a run is
//! reproducible from its seed and inputs. Every schedule call hands back a
//! [`TimerHandle`] with a fresh generation number. Once cancelled, that handle
//! can never fire, even if a later timer of the same kind is scheduled.

use serde::{Deserialize, Serialize};

/// Fired timers within this many seconds of zero count as due
const DUE_EPSILON: f32 = 1e-4;

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Session countdown, repeats every second
    Countdown,
    /// One-shot delay until a fish bites
    Bite,
}

/// Cancellation token for one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle {
    pub kind: TimerKind,
    pub generation: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    handle: TimerHandle,
    /// Seconds until the next firing
    remaining: f32,
    /// Re-arm interval for repeating timers
    period: Option<f32>,
}

/// Pending timers for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
    next_generation: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self, kind: TimerKind) -> TimerHandle {
        self.next_generation += 1;
        TimerHandle {
            kind,
            generation: self.next_generation,
        }
    }

    /// Fire once after `delay` seconds
    pub fn schedule_once(&mut self, kind: TimerKind, delay: f32) -> TimerHandle {
        let handle = self.next_handle(kind);
        self.pending.push(Scheduled {
            handle,
            remaining: delay.max(0.0),
            period: None,
        });
        handle
    }

    /// Fire every `period` seconds until cancelled
    pub fn schedule_repeating(&mut self, kind: TimerKind, period: f32) -> TimerHandle {
        let handle = self.next_handle(kind);
        // A zero period would fire forever within one advance
        let period = period.max(DUE_EPSILON * 10.0);
        self.pending.push(Scheduled {
            handle,
            remaining: period,
            period: Some(period),
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|s| s.handle == handle)
    }

    /// Number of pending timers of `kind`
    pub fn pending(&self, kind: TimerKind) -> usize {
        self.pending.iter().filter(|s| s.handle.kind == kind).count()
    }

    /// Seconds until `handle` next fires
    pub fn remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.pending
            .iter()
            .find(|s| s.handle == handle)
            .map(|s| s.remaining)
    }

    /// Move time forward by `dt` seconds and collect what fired.
    ///
    /// Handles come back in the order they fell due. One-shot timers are
    /// removed; repeating timers fire once per whole period elapsed.
    pub fn advance(&mut self, dt: f32) -> Vec<TimerHandle> {
        // (seconds into this step at which it fired, handle)
        let mut fired: Vec<(f32, TimerHandle)> = Vec::new();

        for scheduled in &mut self.pending {
            scheduled.remaining -= dt;
            match scheduled.period {
                Some(period) => {
                    while scheduled.remaining <= DUE_EPSILON {
                        fired.push((dt + scheduled.remaining, scheduled.handle));
                        scheduled.remaining += period;
                    }
                }
                None => {
                    if scheduled.remaining <= DUE_EPSILON {
                        fired.push((dt + scheduled.remaining, scheduled.handle));
                    }
                }
            }
        }

        self.pending
            .retain(|s| s.period.is_some() || s.remaining > DUE_EPSILON);

        fired.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        fired.into_iter().map(|(_, handle)| handle).collect()
    }
}
