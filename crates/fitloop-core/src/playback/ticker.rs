//! Cancellable repeating tick task.
//!
//! The engine itself is tick-driven and thread-free; the ticker is the
//! scheduling abstraction around it: a tokio task that drives a shared
//! engine handle at a fixed period until the session ends or the ticker is
//! cancelled. The task captures the session generation at spawn time and
//! ticks through [`PlaybackEngine::tick_scheduled`], so a tick that was
//! already in flight when the session was stopped or replaced acts on
//! nothing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::engine::{PlaybackEngine, PlaybackState};
use super::notify::NotificationSink;

/// Handle to a running tick task.
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a repeating task that ticks `engine` every `period` on behalf
    /// of the engine's current session. The task exits on its own when the
    /// session is no longer running.
    pub fn spawn<S>(engine: Arc<Mutex<PlaybackEngine>>, sink: Arc<Mutex<S>>, period: Duration) -> Self
    where
        S: NotificationSink + Send + 'static,
    {
        let generation = match engine.lock() {
            Ok(engine) => engine.generation(),
            Err(poisoned) => poisoned.into_inner().generation(),
        };

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // Delivery is best-effort; a late tick recomputes from wall
            // clock, so there is nothing to catch up on.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Ok(mut engine) = engine.lock() else { break };
                let Ok(mut sink) = sink.lock() else { break };
                engine.tick_scheduled(generation, &mut *sink);
                if engine.state() != PlaybackState::Running || engine.generation() != generation {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Cancel the task. Combined with the generation guard this means no
    /// sink call can occur for the session after cancellation.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to exit on its own (session completed or stopped).
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{Series, Step};

    #[derive(Default)]
    struct CountingSink {
        boundaries: usize,
        completions: usize,
    }

    impl NotificationSink for CountingSink {
        fn on_step_boundary(&mut self, _step_name: &str) {
            self.boundaries += 1;
        }
        fn on_series_complete(&mut self, _series_name: &str) {
            self.completions += 1;
        }
    }

    fn short_series() -> Series {
        let mut s = Series::new("Quick");
        s.steps.push(Step::new("A", 20));
        s.steps.push(Step::new("B", 20));
        s
    }

    #[tokio::test]
    async fn ticker_drives_session_to_completion() {
        let engine = Arc::new(Mutex::new(PlaybackEngine::new()));
        let sink = Arc::new(Mutex::new(CountingSink::default()));

        engine.lock().unwrap().play(&short_series()).unwrap();
        let ticker = Ticker::spawn(engine.clone(), sink.clone(), Duration::from_millis(5));
        ticker.join().await;

        assert_eq!(engine.lock().unwrap().state(), PlaybackState::Completed);
        let sink = sink.lock().unwrap();
        assert_eq!(sink.boundaries, 2);
        assert_eq!(sink.completions, 1);
    }

    #[tokio::test]
    async fn stop_prevents_further_notifications() {
        let engine = Arc::new(Mutex::new(PlaybackEngine::new()));
        let sink = Arc::new(Mutex::new(CountingSink::default()));

        let mut long = Series::new("Long");
        long.steps.push(Step::new("Only", 60_000));
        engine.lock().unwrap().play(&long).unwrap();

        let ticker = Ticker::spawn(engine.clone(), sink.clone(), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(20)).await;
        engine.lock().unwrap().stop();
        ticker.join().await;

        let sink = sink.lock().unwrap();
        assert_eq!(sink.boundaries, 0);
        assert_eq!(sink.completions, 0);
    }

    #[tokio::test]
    async fn cancel_aborts_the_task() {
        let engine = Arc::new(Mutex::new(PlaybackEngine::new()));
        let sink = Arc::new(Mutex::new(CountingSink::default()));

        let mut long = Series::new("Long");
        long.steps.push(Step::new("Only", 60_000));
        engine.lock().unwrap().play(&long).unwrap();

        let ticker = Ticker::spawn(engine.clone(), sink.clone(), Duration::from_millis(5));
        ticker.cancel();
        ticker.join().await;
        assert_eq!(sink.lock().unwrap().boundaries, 0);
    }
}
