//! Playback: the alarm-series state machine, its notification contract and
//! the scheduling task that drives it.

mod engine;
mod notify;
mod ticker;

pub use engine::{PlaybackEngine, PlaybackState};
pub use notify::{ConsoleSink, NotificationSink, NullSink};
pub use ticker::Ticker;
