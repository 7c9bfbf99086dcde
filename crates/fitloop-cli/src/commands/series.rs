use clap::Subcommand;
use fitloop_core::{
    format_mm_ss, Series, SeriesEditor, SeriesStore, SeriesSummary, StepPatch, StoreError,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Subcommand)]
pub enum SeriesAction {
    /// List all series
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one series with its steps
    Show {
        id: String,
    },
    /// Create a new series
    Create {
        name: String,
    },
    /// Rename a series
    Rename {
        id: String,
        name: String,
    },
    /// Delete a series; stops playback if it is the one playing
    Delete {
        id: String,
    },
    /// Append a step (one-minute default duration)
    AddStep {
        id: String,
        /// Step name; defaults to "Step N"
        #[arg(long)]
        name: Option<String>,
        /// Step duration in milliseconds
        #[arg(long)]
        duration_ms: Option<u64>,
    },
    /// Remove a step
    RemoveStep {
        id: String,
        step_id: String,
    },
    /// Update a step's name and/or duration
    UpdateStep {
        id: String,
        step_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        duration_ms: Option<u64>,
    },
    /// Reorder steps; pass every step id in the new order
    Reorder {
        id: String,
        step_ids: Vec<String>,
    },
    /// Remove every stored series
    Clear,
}

/// Load the collection, degrading a corrupt slot to empty with a visible
/// warning. Unavailable storage still propagates.
pub(crate) fn load_collection(store: &SeriesStore) -> Result<Vec<Series>, Box<dyn std::error::Error>> {
    match store.load_all() {
        Ok(all) => Ok(all),
        Err(e @ StoreError::Corrupt(_)) => {
            eprintln!("warning: {e}; treating the collection as empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

fn find_series(store: &SeriesStore, id: &str) -> Result<Series, Box<dyn std::error::Error>> {
    load_collection(store)?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| format!("no series with id {id}").into())
}

/// Edit one stored series through a fresh draft and commit.
fn edit<F>(store: &SeriesStore, id: &str, mutate: F) -> Result<Series, Box<dyn std::error::Error>>
where
    F: FnOnce(&mut SeriesEditor) -> Result<(), Box<dyn std::error::Error>>,
{
    let series = find_series(store, id)?;
    let mut editor = SeriesEditor::new();
    editor.begin_edit(Some(series));
    mutate(&mut editor)?;
    Ok(editor.commit(store)?)
}

pub fn run(action: SeriesAction) -> CliResult {
    let store = SeriesStore::open()?;

    match action {
        SeriesAction::List { json } => {
            let summaries: Vec<SeriesSummary> = load_collection(&store)?
                .iter()
                .map(SeriesSummary::from)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for s in &summaries {
                    println!(
                        "{}  {}  ({} steps, {})",
                        s.id,
                        s.name,
                        s.step_count,
                        format_mm_ss(s.total_duration_ms)
                    );
                }
            }
        }
        SeriesAction::Show { id } => {
            let series = find_series(&store, &id)?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
        SeriesAction::Create { name } => {
            let mut editor = SeriesEditor::new();
            editor.begin_edit(None);
            editor.rename(name)?;
            let series = editor.commit(&store)?;
            println!("Series created: {}", series.id);
        }
        SeriesAction::Rename { id, name } => {
            let series = edit(&store, &id, |editor| Ok(editor.rename(name)?))?;
            println!("Series renamed: {}", series.name);
        }
        SeriesAction::Delete { id } => {
            // Deleting the series that is currently playing stops playback.
            let mut engine = super::play::load_engine();
            if engine.series().is_some_and(|s| s.id == id) {
                engine.stop();
                super::play::save_engine(&engine)?;
            }
            let mut editor = SeriesEditor::new();
            if editor.delete_series(&store, &id)? {
                println!("Series deleted: {id}");
            } else {
                println!("No series with id {id}, nothing to delete");
            }
        }
        SeriesAction::AddStep { id, name, duration_ms } => {
            let series = edit(&store, &id, |editor| {
                let step_id = editor.add_step()?.id.clone();
                editor.update_step(&step_id, StepPatch { name, duration_ms })?;
                Ok(())
            })?;
            let step = series.steps.last().ok_or("step was not added")?;
            println!("Step added: {} ({})", step.id, step.name);
        }
        SeriesAction::RemoveStep { id, step_id } => {
            let mut removed = false;
            edit(&store, &id, |editor| {
                removed = editor.remove_step(&step_id)?;
                Ok(())
            })?;
            if removed {
                println!("Step removed: {step_id}");
            } else {
                println!("No step with id {step_id}, nothing to remove");
            }
        }
        SeriesAction::UpdateStep { id, step_id, name, duration_ms } => {
            let mut updated = false;
            edit(&store, &id, |editor| {
                updated = editor.update_step(&step_id, StepPatch { name, duration_ms })?;
                Ok(())
            })?;
            if updated {
                println!("Step updated: {step_id}");
            } else {
                println!("No step with id {step_id}, nothing to update");
            }
        }
        SeriesAction::Reorder { id, step_ids } => {
            edit(&store, &id, |editor| Ok(editor.reorder_steps(&step_ids)?))?;
            println!("Steps reordered");
        }
        SeriesAction::Clear => {
            store.clear_all()?;
            println!("All series removed");
        }
    }

    Ok(())
}
