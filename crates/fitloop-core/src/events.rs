use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::playback::PlaybackState;

/// Every playback and stopwatch transition produces an Event.
/// The CLI prints them as JSON; a GUI would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PlaybackStarted {
        series_id: String,
        series_name: String,
        step_count: usize,
        at: DateTime<Utc>,
    },
    /// One step's duration elapsed. Fired exactly once per step, in order.
    StepBoundary {
        series_id: String,
        step_index: usize,
        step_name: String,
        at: DateTime<Utc>,
    },
    /// The final step's boundary was crossed; the session is over.
    SeriesCompleted {
        series_id: String,
        at: DateTime<Utc>,
    },
    /// Explicit user stop. No boundary notification accompanies this.
    PlaybackStopped {
        series_id: String,
        step_index: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: PlaybackState,
        series_id: Option<String>,
        series_name: Option<String>,
        step_index: usize,
        step_name: String,
        remaining_ms: u64,
        total_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchStarted {
        at: DateTime<Utc>,
    },
    StopwatchPaused {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchResumed {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    LapRecorded {
        lap_index: usize,
        split_ms: u64,
        total_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchReset {
        at: DateTime<Utc>,
    },
}
