use clap::Subcommand;
use fitloop_core::{format_mm_ss, Stopwatch};
use serde::Serialize;

const STOPWATCH_SLOT: &str = "stopwatch.json";

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Subcommand)]
pub enum StopwatchAction {
    /// Start (or resume) the stopwatch
    Start,
    /// Record a lap
    Lap,
    /// Pause the stopwatch
    Pause,
    /// Resume a paused stopwatch
    Resume,
    /// Reset to zero
    Reset,
    /// Print current stopwatch state as JSON
    Status,
}

#[derive(Serialize)]
struct StopwatchView<'a> {
    state: fitloop_core::StopwatchState,
    elapsed_ms: u64,
    elapsed: String,
    laps: &'a [fitloop_core::Lap],
}

fn print_status(sw: &Stopwatch) -> CliResult {
    let elapsed_ms = sw.elapsed_ms();
    let view = StopwatchView {
        state: sw.state(),
        elapsed_ms,
        elapsed: format_mm_ss(elapsed_ms),
        laps: sw.laps(),
    };
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

pub fn run(action: StopwatchAction) -> CliResult {
    let mut sw: Stopwatch = super::load_state(STOPWATCH_SLOT);

    let event = match action {
        StopwatchAction::Start => sw.start(),
        StopwatchAction::Lap => {
            let event = sw.lap();
            if event.is_none() {
                println!("Stopwatch is not running, no lap recorded");
            }
            event
        }
        StopwatchAction::Pause => sw.pause(),
        StopwatchAction::Resume => sw.resume(),
        StopwatchAction::Reset => sw.reset(),
        StopwatchAction::Status => None,
    };

    if let Some(event) = event {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }
    print_status(&sw)?;
    super::save_state(STOPWATCH_SLOT, &sw)
}
