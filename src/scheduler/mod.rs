//! # Maintenance Pause Protocol
//!
//! Requests that mutate a job suspend background maintenance sweeps for the
//! duration of the engine call. The bracket is a scoped acquisition: pausing
//! yields a [`PauseGuard`] and dropping it resumes, so every pause has a
//! matching resume on all exit paths. Brackets from concurrent requests
//! overlap freely; this is advisory signaling, not a lock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Process-wide pause signal the background scheduler polls.
#[derive(Debug, Default)]
pub struct SchedulerPauseState {
    depth: AtomicUsize,
    entered: AtomicUsize,
}

impl SchedulerPauseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scheduler may admit a new maintenance sweep. In-flight
    /// sweeps are never aborted; only admission is gated.
    pub fn should_admit_sweep(&self) -> bool {
        self.depth.load(Ordering::SeqCst) == 0
    }

    /// Number of pause brackets currently held.
    pub fn pause_depth(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }

    /// Cumulative number of brackets entered since process start.
    pub fn pause_count(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }
}

/// Request-facing handle for bracketing engine calls with pause/resume.
#[derive(Debug, Clone, Default)]
pub struct MaintenancePauseController {
    state: Arc<SchedulerPauseState>,
}

impl MaintenancePauseController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a controller over an existing shared pause state.
    pub fn with_state(state: Arc<SchedulerPauseState>) -> Self {
        Self { state }
    }

    /// The shared state a scheduler should poll.
    pub fn state(&self) -> Arc<SchedulerPauseState> {
        Arc::clone(&self.state)
    }

    /// Enter a pause bracket. The matching resume happens when the returned
    /// guard drops.
    pub fn pause(&self) -> PauseGuard {
        self.state.entered.fetch_add(1, Ordering::SeqCst);
        let depth = self.state.depth.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(pause_depth = depth, "maintenance sweeps paused");
        PauseGuard {
            state: Arc::clone(&self.state),
        }
    }
}

/// Open pause bracket; resumes on drop.
#[derive(Debug)]
pub struct PauseGuard {
    state: Arc<SchedulerPauseState>,
}

impl Drop for PauseGuard {
    fn drop(&mut self) {
        let depth = self.state.depth.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(pause_depth = depth, "maintenance pause released");
    }
}
