//! UI-facing read models.

use serde::{Deserialize, Serialize};

use crate::playback::{PlaybackEngine, PlaybackState};
use crate::series::Series;

/// One row of the series list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub id: String,
    pub name: String,
    pub step_count: usize,
    pub total_duration_ms: u64,
}

impl From<&Series> for SeriesSummary {
    fn from(series: &Series) -> Self {
        Self {
            id: series.id.clone(),
            name: series.name.clone(),
            step_count: series.steps.len(),
            total_duration_ms: series.total_duration_ms(),
        }
    }
}

/// Current playback state as the UI shows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub series_id: Option<String>,
    pub series_name: Option<String>,
    pub step_name: Option<String>,
    /// Countdown of the current step, `MM:SS`.
    pub remaining: String,
}

impl PlaybackStatus {
    pub fn of(engine: &PlaybackEngine) -> Self {
        Self {
            state: engine.state(),
            series_id: engine.series().map(|s| s.id.clone()),
            series_name: engine.series().map(|s| s.name.clone()),
            step_name: engine.current_step().map(|s| s.name.clone()),
            remaining: format_mm_ss(engine.remaining_ms().unwrap_or(0)),
        }
    }
}

/// Countdown formatting: whole seconds, rounded up so the display only
/// shows `00:00` once the step is actually over. Minutes overflow past 99
/// rather than truncating.
pub fn format_mm_ss(ms: u64) -> String {
    let total_secs = ms.div_ceil(1000);
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Step;

    #[test]
    fn formats_mm_ss() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(1), "00:01");
        assert_eq!(format_mm_ss(59_999), "01:00");
        assert_eq!(format_mm_ss(300_000), "05:00");
        assert_eq!(format_mm_ss(1_500_000), "25:00");
        assert_eq!(format_mm_ss(99 * 60_000 + 61_000), "100:01");
    }

    #[test]
    fn summary_reflects_series() {
        let mut s = Series::new("Pomodoro");
        s.steps.push(Step::new("Work", 1_500_000));
        s.steps.push(Step::new("Break", 300_000));
        let summary = SeriesSummary::from(&s);
        assert_eq!(summary.step_count, 2);
        assert_eq!(summary.total_duration_ms, 1_800_000);
    }

    #[test]
    fn idle_status_is_blank() {
        let status = PlaybackStatus::of(&PlaybackEngine::new());
        assert_eq!(status.state, PlaybackState::Idle);
        assert!(status.series_id.is_none());
        assert_eq!(status.remaining, "00:00");
    }
}
