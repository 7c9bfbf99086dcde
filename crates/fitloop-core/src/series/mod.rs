//! Alarm series: data model, durable store and draft editor.

mod editor;
mod model;
mod store;

pub use editor::{SeriesEditor, StepPatch};
pub use model::{Series, Step, DEFAULT_STEP_DURATION_MS};
pub use store::SeriesStore;
