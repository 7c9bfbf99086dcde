use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Duration assigned to a freshly added step: one minute.
pub const DEFAULT_STEP_DURATION_MS: u64 = 60_000;

/// One timed phase of an alarm series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Stable across edits and reorders; assigned at creation.
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Authored length in milliseconds. A zero-duration step completes on
    /// the next tick but is still visited and notified like any other.
    #[serde(default)]
    pub duration_ms: u64,
}

impl Step {
    pub fn new(name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            duration_ms,
        }
    }
}

/// An ordered, named collection of steps. Insertion order is playback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Stable for the lifetime of the series; assigned at creation.
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Series {
    /// Create a new, empty series with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.duration_ms))
    }

    /// Step ids must be unique within a series; the store rejects records
    /// that violate this.
    pub fn has_unique_step_ids(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.steps.len());
        self.steps.iter().all(|s| seen.insert(s.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_series_is_empty() {
        let s = Series::new("Morning");
        assert!(s.steps.is_empty());
        assert_eq!(s.total_duration_ms(), 0);
        assert!(!s.id.is_empty());
    }

    #[test]
    fn total_duration_sums_steps() {
        let mut s = Series::new("Intervals");
        s.steps.push(Step::new("Sprint", 30_000));
        s.steps.push(Step::new("Walk", 90_000));
        assert_eq!(s.total_duration_ms(), 120_000);
    }

    #[test]
    fn total_duration_saturates() {
        let mut s = Series::new("Huge");
        s.steps.push(Step::new("a", u64::MAX));
        s.steps.push(Step::new("b", 1));
        assert_eq!(s.total_duration_ms(), u64::MAX);
    }

    #[test]
    fn duplicate_step_ids_detected() {
        let mut s = Series::new("Bad");
        let step = Step::new("Work", 1000);
        s.steps.push(step.clone());
        s.steps.push(step);
        assert!(!s.has_unique_step_ids());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let s: Series = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(s.id, "abc");
        assert_eq!(s.name, "");
        assert!(s.steps.is_empty());
    }
}
