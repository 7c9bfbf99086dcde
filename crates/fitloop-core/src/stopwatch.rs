//! Stopwatch and lap timer.
//!
//! Same wall-clock discipline as the playback engine: elapsed time is
//! recomputed from absolute timestamps on every query, never accumulated
//! per tick, so it stays correct across arbitrarily long gaps between
//! calls. Commands return the [`Event`] they produced, `None` when the
//! command was a no-op in the current state. Serializable so a CLI
//! invocation can pick up where the previous one left off.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::clock::now_ms;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwatchState {
    Idle,
    Running,
    Paused,
}

/// One recorded lap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// 1-based lap number.
    pub index: usize,
    /// Time since the previous lap (or since start, for the first lap).
    pub split_ms: u64,
    /// Total elapsed time when the lap was recorded.
    pub total_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stopwatch {
    state: StopwatchState,
    /// Elapsed time flushed up to the last pause.
    accumulated_ms: u64,
    /// Wall-clock timestamp of the last start/resume, while running.
    #[serde(default)]
    resumed_at_ms: Option<u64>,
    #[serde(default)]
    laps: Vec<Lap>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            state: StopwatchState::Idle,
            accumulated_ms: 0,
            resumed_at_ms: None,
            laps: Vec::new(),
        }
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms_at(now_ms())
    }

    /// Deterministic variant of [`elapsed_ms`](Self::elapsed_ms).
    pub fn elapsed_ms_at(&self, now_ms: u64) -> u64 {
        let running = self
            .resumed_at_ms
            .map(|t| now_ms.saturating_sub(t))
            .unwrap_or(0);
        self.accumulated_ms.saturating_add(running)
    }

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            StopwatchState::Idle => {
                self.state = StopwatchState::Running;
                self.resumed_at_ms = Some(now_ms);
                Some(Event::StopwatchStarted { at: Utc::now() })
            }
            StopwatchState::Paused => self.resume_at(now_ms),
            StopwatchState::Running => None, // Already running.
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != StopwatchState::Running {
            return None;
        }
        self.accumulated_ms = self.elapsed_ms_at(now_ms);
        self.resumed_at_ms = None;
        self.state = StopwatchState::Paused;
        Some(Event::StopwatchPaused {
            elapsed_ms: self.accumulated_ms,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.resume_at(now_ms())
    }

    pub fn resume_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != StopwatchState::Paused {
            return None;
        }
        self.state = StopwatchState::Running;
        self.resumed_at_ms = Some(now_ms);
        Some(Event::StopwatchResumed {
            elapsed_ms: self.accumulated_ms,
            at: Utc::now(),
        })
    }

    /// Record a lap at the current elapsed time. No-op unless running.
    pub fn lap(&mut self) -> Option<Event> {
        self.lap_at(now_ms())
    }

    pub fn lap_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != StopwatchState::Running {
            return None;
        }
        let total_ms = self.elapsed_ms_at(now_ms);
        let previous_total = self.laps.last().map(|l| l.total_ms).unwrap_or(0);
        let lap = Lap {
            index: self.laps.len() + 1,
            split_ms: total_ms.saturating_sub(previous_total),
            total_ms,
        };
        let event = Event::LapRecorded {
            lap_index: lap.index,
            split_ms: lap.split_ms,
            total_ms: lap.total_ms,
            at: Utc::now(),
        };
        self.laps.push(lap);
        Some(event)
    }

    pub fn reset(&mut self) -> Option<Event> {
        *self = Self::new();
        Some(Event::StopwatchReset { at: Utc::now() })
    }
}
