//! # Fitloop Core Library
//!
//! Core business logic for the Fitloop fitness companion: the alarm-series
//! engine (user-authored sequences of named, timed steps with accurate
//! playback), a stopwatch/lap timer, and local persistence. All state lives
//! on-device; there is no backend.
//!
//! The CLI binary is a thin layer over this library; a GUI would be another.
//!
//! ## Architecture
//!
//! - **Playback Engine**: a wall-clock-based state machine that requires the
//!   caller (or a [`Ticker`]) to periodically invoke `tick()`; elapsed time
//!   is always recomputed from absolute timestamps, so delayed ticks cannot
//!   desynchronize it from authored step durations
//! - **Series Store / Editor**: JSON single-slot persistence of the series
//!   collection, with a clone-on-begin draft editor and commit/discard
//!   semantics
//! - **Notification Sink**: the haptic/audio boundary the engine signals at
//!   each step transition; best-effort, never a playback error
//!
//! ## Key Components
//!
//! - [`PlaybackEngine`]: series playback state machine
//! - [`SeriesStore`] / [`SeriesEditor`]: persistence and draft editing
//! - [`Stopwatch`]: lap timer
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod playback;
pub mod series;
pub mod stopwatch;
pub mod storage;
pub mod view;

mod clock;

pub use error::{ConfigError, CoreError, EditorError, PlaybackError, StoreError};
pub use events::Event;
pub use playback::{ConsoleSink, NotificationSink, NullSink, PlaybackEngine, PlaybackState, Ticker};
pub use series::{Series, SeriesEditor, SeriesStore, Step, StepPatch, DEFAULT_STEP_DURATION_MS};
pub use stopwatch::{Lap, Stopwatch, StopwatchState};
pub use storage::Config;
pub use view::{format_mm_ss, PlaybackStatus, SeriesSummary};
