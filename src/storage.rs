use crate::errors::AppError;
use crate::models::TrackerData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("TRACKER_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/tracker.json"))
}

/// Load failures degrade to an empty store; the session proceeds as
/// authoritative either way.
pub async fn load_data(path: &Path) -> TrackerData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse tracker file: {err}");
                TrackerData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => TrackerData::default(),
        Err(err) => {
            error!("failed to read tracker file: {err}");
            TrackerData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &TrackerData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Fire-and-forget save of a store snapshot. The caller never waits on
/// durability; a failed write leaves the durable copy stale until the
/// next save, and is only logged. Overlapping saves are not coalesced.
pub fn save_in_background(path: PathBuf, data: TrackerData) {
    tokio::spawn(async move {
        if let Err(err) = persist_data(&path, &data).await {
            error!("failed to persist tracker data: {}", err.message);
        }
    });
}
