//! Playback engine implementation.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads - the caller (or a [`Ticker`](super::Ticker)) is responsible for
//! calling `tick()` periodically. Each tick recomputes elapsed time from
//! absolute timestamps, never from accumulated tick counts, so arbitrarily
//! delayed ticks (app backgrounding, a suspended laptop) cannot drift the
//! engine away from wall-clock step durations.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Completed | Idle)
//! ```
//!
//! `Completed` behaves like `Idle` for the purpose of starting a new run.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PlaybackEngine::new();
//! engine.play(&series)?;
//! // In a loop:
//! engine.tick(&mut sink); // Fires boundary notifications as steps elapse
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::clock::now_ms;
use crate::error::PlaybackError;
use crate::events::Event;
use crate::series::{Series, Step};

use super::notify::NotificationSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Idle,
    Running,
    Completed,
}

/// One in-progress run of a series.
///
/// Holds its own snapshot of the series, taken at `play()`. Edits to the
/// stored series while the session runs do not affect it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlaybackSession {
    series: Series,
    step_index: usize,
    /// Wall-clock timestamp (ms since epoch) when the current step began.
    step_started_at_ms: u64,
}

/// Core playback engine.
///
/// Operates on wall-clock deltas -- no internal thread. At most one session
/// is active at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackEngine {
    state: PlaybackState,
    #[serde(default)]
    session: Option<PlaybackSession>,
    /// Bumped on every play/stop/completion. Ticks scheduled against an
    /// older generation are stale and must not act (see `tick_scheduled`).
    #[serde(default)]
    generation: u64,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackEngine {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
            session: None,
            generation: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Identity of the current session; stale-tick guard token.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn series(&self) -> Option<&Series> {
        self.session.as_ref().map(|s| &s.series)
    }

    pub fn step_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.step_index)
    }

    pub fn current_step(&self) -> Option<&Step> {
        let session = self.session.as_ref()?;
        session.series.steps.get(session.step_index)
    }

    /// Remaining time of the current step, clamped to `0..=duration`.
    /// Only meaningful while `Running`; `None` otherwise.
    pub fn remaining_ms(&self) -> Option<u64> {
        self.remaining_ms_at(now_ms())
    }

    /// Deterministic variant of [`remaining_ms`](Self::remaining_ms).
    pub fn remaining_ms_at(&self, now_ms: u64) -> Option<u64> {
        if self.state != PlaybackState::Running {
            return None;
        }
        let session = self.session.as_ref()?;
        let step = session.series.steps.get(session.step_index)?;
        let elapsed = now_ms.saturating_sub(session.step_started_at_ms);
        Some(step.duration_ms.saturating_sub(elapsed))
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let step = self.current_step();
        Event::StateSnapshot {
            state: self.state,
            series_id: self.series().map(|s| s.id.clone()),
            series_name: self.series().map(|s| s.name.clone()),
            step_index: self.step_index().unwrap_or(0),
            step_name: step.map(|s| s.name.clone()).unwrap_or_default(),
            remaining_ms: self.remaining_ms().unwrap_or(0),
            total_ms: step.map(|s| s.duration_ms).unwrap_or(0),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a fresh session from the given series.
    ///
    /// Snapshots the series, so later edits to the stored copy cannot touch
    /// the running session. Any previous session (running or completed) is
    /// replaced and its pending ticks invalidated.
    ///
    /// # Errors
    /// `EmptySeries` if the series has no steps; rejected before any state
    /// transition, the engine stays exactly as it was.
    pub fn play(&mut self, series: &Series) -> Result<Event, PlaybackError> {
        self.play_at(series, now_ms())
    }

    /// Deterministic variant of [`play`](Self::play).
    pub fn play_at(&mut self, series: &Series, now_ms: u64) -> Result<Event, PlaybackError> {
        if series.steps.is_empty() {
            return Err(PlaybackError::EmptySeries {
                name: series.name.clone(),
            });
        }
        self.generation = self.generation.wrapping_add(1);
        self.session = Some(PlaybackSession {
            series: series.clone(),
            step_index: 0,
            step_started_at_ms: now_ms,
        });
        self.state = PlaybackState::Running;
        Ok(Event::PlaybackStarted {
            series_id: series.id.clone(),
            series_name: series.name.clone(),
            step_count: series.steps.len(),
            at: Utc::now(),
        })
    }

    /// Stop the active session. No notification fires; pending scheduled
    /// ticks for the session become stale the moment this returns.
    pub fn stop(&mut self) -> Option<Event> {
        match self.state {
            PlaybackState::Running => {
                let session = self.session.take()?;
                self.state = PlaybackState::Idle;
                self.generation = self.generation.wrapping_add(1);
                Some(Event::PlaybackStopped {
                    series_id: session.series.id,
                    step_index: session.step_index,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Call periodically while `Running`.
    ///
    /// Recomputes elapsed time from the absolute step start timestamp and
    /// walks forward across every boundary that is due: zero-duration steps
    /// are each visited and notified exactly once, never coalesced, while a
    /// non-zero step restarts its countdown from `now` (drift within a tick
    /// is absorbed, not carried into the next step). Boundary notifications
    /// fire in step order, each before the next step's start is established.
    pub fn tick(&mut self, sink: &mut dyn NotificationSink) -> Vec<Event> {
        self.tick_at(now_ms(), sink)
    }

    /// Deterministic variant of [`tick`](Self::tick).
    pub fn tick_at(&mut self, now_ms: u64, sink: &mut dyn NotificationSink) -> Vec<Event> {
        let mut events = Vec::new();
        if self.state != PlaybackState::Running {
            return events;
        }
        while let Some(session) = self.session.as_mut() {
            let Some(step) = session.series.steps.get(session.step_index) else {
                break;
            };
            let elapsed = now_ms.saturating_sub(session.step_started_at_ms);
            if elapsed < step.duration_ms {
                break;
            }

            sink.on_step_boundary(&step.name);
            events.push(Event::StepBoundary {
                series_id: session.series.id.clone(),
                step_index: session.step_index,
                step_name: step.name.clone(),
                at: Utc::now(),
            });

            if session.step_index + 1 == session.series.steps.len() {
                sink.on_series_complete(&session.series.name);
                events.push(Event::SeriesCompleted {
                    series_id: session.series.id.clone(),
                    at: Utc::now(),
                });
                self.state = PlaybackState::Completed;
                self.generation = self.generation.wrapping_add(1);
                self.session = None;
            } else {
                session.step_index += 1;
                session.step_started_at_ms = now_ms;
            }
        }
        events
    }

    /// Tick on behalf of a scheduled task.
    ///
    /// `generation` is the value of [`generation`](Self::generation) at the
    /// time the task was scheduled. A mismatch means the session the task
    /// was driving is gone (stopped, completed, or replaced) and the tick is
    /// ignored, so a stale in-flight tick can never fire notifications for a
    /// dead session.
    pub fn tick_scheduled(&mut self, generation: u64, sink: &mut dyn NotificationSink) -> Vec<Event> {
        if generation != self.generation {
            return Vec::new();
        }
        self.tick(sink)
    }

    #[cfg(test)]
    pub(crate) fn tick_scheduled_at(
        &mut self,
        generation: u64,
        now_ms: u64,
        sink: &mut dyn NotificationSink,
    ) -> Vec<Event> {
        if generation != self.generation {
            return Vec::new();
        }
        self.tick_at(now_ms, sink)
    }
}
