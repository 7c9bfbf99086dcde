//! Draft editing for a single series.
//!
//! The editor owns one in-memory draft at a time: a clone of the stored
//! series (or a fresh one), mutated freely, then committed through the store
//! or discarded. Nothing here touches persisted storage except `commit` and
//! `delete_series`.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::series::{Series, SeriesStore, Step, DEFAULT_STEP_DURATION_MS};

/// Partial step update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepPatch {
    pub name: Option<String>,
    pub duration_ms: Option<u64>,
}

/// Editor for one in-progress draft series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesEditor {
    draft: Option<Series>,
}

impl SeriesEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing. With `Some(series)` the draft is a clone of it; with
    /// `None` a fresh series with a generated id and no steps.
    ///
    /// Any previous draft is dropped.
    pub fn begin_edit(&mut self, series: Option<Series>) -> &Series {
        self.draft
            .insert(series.unwrap_or_else(|| Series::new("New series")))
    }

    pub fn draft(&self) -> Option<&Series> {
        self.draft.as_ref()
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), EditorError> {
        self.draft_mut()?.name = name.into();
        Ok(())
    }

    /// Append a step with a generated id, a one-minute default duration and
    /// a name derived from the current step count.
    pub fn add_step(&mut self) -> Result<&Step, EditorError> {
        let draft = self.draft_mut()?;
        let name = format!("Step {}", draft.steps.len() + 1);
        draft.steps.push(Step::new(name, DEFAULT_STEP_DURATION_MS));
        match draft.steps.last() {
            Some(step) => Ok(step),
            None => unreachable!(),
        }
    }

    /// Remove a step by id. Unknown ids are a successful no-op; returns
    /// whether a step was removed.
    pub fn remove_step(&mut self, step_id: &str) -> Result<bool, EditorError> {
        let draft = self.draft_mut()?;
        let before = draft.steps.len();
        draft.steps.retain(|s| s.id != step_id);
        Ok(draft.steps.len() != before)
    }

    /// Apply a partial update to a step. Unknown ids are a successful no-op
    /// (UI callbacks may race with deletion); returns whether a step was
    /// updated.
    pub fn update_step(&mut self, step_id: &str, patch: StepPatch) -> Result<bool, EditorError> {
        let draft = self.draft_mut()?;
        let Some(step) = draft.steps.iter_mut().find(|s| s.id == step_id) else {
            return Ok(false);
        };
        if let Some(name) = patch.name {
            step.name = name;
        }
        if let Some(duration_ms) = patch.duration_ms {
            step.duration_ms = duration_ms;
        }
        Ok(true)
    }

    /// Replace the step sequence with the supplied permutation of step ids.
    ///
    /// The new order must contain exactly the draft's step ids, each once;
    /// anything else is rejected with `InvalidReorder` and the draft is left
    /// unchanged.
    pub fn reorder_steps(&mut self, new_order: &[String]) -> Result<(), EditorError> {
        let draft = self.draft_mut()?;
        if new_order.len() != draft.steps.len() {
            return Err(EditorError::InvalidReorder(format!(
                "expected {} step ids, got {}",
                draft.steps.len(),
                new_order.len()
            )));
        }

        let mut remaining: std::collections::HashMap<&str, &Step> =
            draft.steps.iter().map(|s| (s.id.as_str(), s)).collect();
        let mut reordered = Vec::with_capacity(new_order.len());
        for id in new_order {
            match remaining.remove(id.as_str()) {
                Some(step) => reordered.push(step.clone()),
                None => {
                    return Err(EditorError::InvalidReorder(format!(
                        "unknown or duplicated step id: {id}"
                    )))
                }
            }
        }
        draft.steps = reordered;
        Ok(())
    }

    /// Upsert the draft into the store. On success the draft is cleared and
    /// the committed series returned; on failure the draft is retained so
    /// the caller can retry.
    pub fn commit(&mut self, store: &SeriesStore) -> Result<Series, EditorError> {
        let draft = self.draft.take().ok_or(EditorError::NoDraft)?;
        if let Err(e) = store.upsert(draft.clone()) {
            self.draft = Some(draft);
            return Err(e.into());
        }
        Ok(draft)
    }

    /// Drop the draft without persisting anything.
    pub fn discard(&mut self) {
        self.draft = None;
    }

    /// Delete a series from the store immediately, bypassing the draft.
    /// A missing id is a successful no-op. If the current draft is the
    /// deleted series it is discarded too. Callers are responsible for
    /// stopping playback of the deleted series.
    pub fn delete_series(&mut self, store: &SeriesStore, series_id: &str) -> Result<bool, EditorError> {
        let removed = store.remove(series_id)?;
        if self.draft.as_ref().is_some_and(|d| d.id == series_id) {
            self.draft = None;
        }
        Ok(removed)
    }

    fn draft_mut(&mut self) -> Result<&mut Series, EditorError> {
        self.draft.as_mut().ok_or(EditorError::NoDraft)
    }
}
