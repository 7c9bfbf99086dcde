pub mod config;
pub mod play;
pub mod series;
pub mod stopwatch;

use fitloop_core::storage::data_dir;

/// Load a JSON state slot from the data dir, falling back to the default
/// when the slot is absent or unreadable.
pub(crate) fn load_state<T>(slot: &str) -> T
where
    T: Default + serde::de::DeserializeOwned,
{
    let Ok(dir) = data_dir() else {
        return T::default();
    };
    match std::fs::read_to_string(dir.join(slot)) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Persist a JSON state slot in the data dir.
pub(crate) fn save_state<T: serde::Serialize>(
    slot: &str,
    state: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = data_dir()?.join(slot);
    std::fs::write(path, serde_json::to_string(state)?)?;
    Ok(())
}
