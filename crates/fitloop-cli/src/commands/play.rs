use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Subcommand;
use fitloop_core::{
    Config, ConsoleSink, NotificationSink, NullSink, PlaybackEngine, PlaybackStatus, SeriesStore,
    Ticker,
};

const ENGINE_SLOT: &str = "playback.json";

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Subcommand)]
pub enum PlayAction {
    /// Start a playback session for a series
    Start { series_id: String },
    /// Print current playback status as JSON (advances the session first)
    Status,
    /// Stop the active session
    Stop,
    /// Play a series in the foreground until it completes
    Run {
        series_id: String,
        /// Tick period in milliseconds; defaults to the configured value
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

pub(crate) fn load_engine() -> PlaybackEngine {
    super::load_state(ENGINE_SLOT)
}

pub(crate) fn save_engine(engine: &PlaybackEngine) -> CliResult {
    super::save_state(ENGINE_SLOT, engine)
}

fn sink_from_config(config: &Config) -> Box<dyn NotificationSink + Send> {
    if config.notifications.enabled {
        Box::new(ConsoleSink)
    } else {
        Box::new(NullSink)
    }
}

pub fn run(action: PlayAction) -> CliResult {
    let config = Config::load_or_default();

    match action {
        PlayAction::Start { series_id } => {
            let store = SeriesStore::open()?;
            let series = super::series::load_collection(&store)?
                .into_iter()
                .find(|s| s.id == series_id)
                .ok_or_else(|| format!("no series with id {series_id}"))?;

            let mut engine = load_engine();
            let event = engine.play(&series)?;
            save_engine(&engine)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        PlayAction::Status => {
            let mut engine = load_engine();
            let mut sink = sink_from_config(&config);
            // Catch up on any boundaries crossed since the last invocation.
            let events = engine.tick(&mut sink);
            save_engine(&engine)?;

            println!("{}", serde_json::to_string_pretty(&PlaybackStatus::of(&engine))?);
            for event in events {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        PlayAction::Stop => {
            let mut engine = load_engine();
            match engine.stop() {
                Some(event) => {
                    save_engine(&engine)?;
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
                None => println!("Nothing is playing"),
            }
        }
        PlayAction::Run { series_id, interval_ms } => {
            let store = SeriesStore::open()?;
            let series = super::series::load_collection(&store)?
                .into_iter()
                .find(|s| s.id == series_id)
                .ok_or_else(|| format!("no series with id {series_id}"))?;

            let period =
                Duration::from_millis(interval_ms.unwrap_or(config.playback.tick_interval_ms).max(1));

            let engine = Arc::new(Mutex::new(load_engine()));
            let sink = Arc::new(Mutex::new(sink_from_config(&config)));

            let started = {
                let mut engine = engine.lock().map_err(|_| "engine lock poisoned")?;
                engine.play(&series)?
            };
            println!("{}", serde_json::to_string_pretty(&started)?);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let ticker = Ticker::spawn(engine.clone(), sink, period);
                ticker.join().await;
            });

            let engine = engine.lock().map_err(|_| "engine lock poisoned")?;
            save_engine(&engine)?;
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }

    Ok(())
}
