//! Notification sink contract.
//!
//! The playback engine calls into a sink synchronously at each step boundary
//! and at series completion. Sinks are best-effort: a failed haptic or audio
//! trigger is logged by the sink itself and never surfaces as a playback
//! error, and a sink must not block the tick loop for more than a bounded,
//! small duration.

/// Receiver for playback boundary signals.
pub trait NotificationSink {
    /// One step's duration elapsed and the next is about to begin (or the
    /// series is about to end). Fired exactly once per step, in step order.
    fn on_step_boundary(&mut self, step_name: &str);

    /// The final step's duration elapsed; the session is over.
    fn on_series_complete(&mut self, series_name: &str);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn on_step_boundary(&mut self, step_name: &str) {
        (**self).on_step_boundary(step_name);
    }
    fn on_series_complete(&mut self, series_name: &str) {
        (**self).on_series_complete(series_name);
    }
}

/// Sink that does nothing. Headless playback and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn on_step_boundary(&mut self, _step_name: &str) {}
    fn on_series_complete(&mut self, _series_name: &str) {}
}

/// Terminal bell plus a one-line message. Used by the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn on_step_boundary(&mut self, step_name: &str) {
        // \x07 rings the terminal bell where the terminal supports it.
        eprintln!("\x07>> step done: {step_name}");
    }

    fn on_series_complete(&mut self, series_name: &str) {
        eprintln!("\x07\x07== series complete: {series_name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_accepts_calls() {
        let mut sink = NullSink;
        sink.on_step_boundary("Work");
        sink.on_series_complete("Pomodoro");
    }
}
