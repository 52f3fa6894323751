//! JSON file persistence for [`MemoryStore`]

use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

use super::memory::{MemoryStore, StoreSnapshot};
use crate::error::AppError;

/// Loads the store from `path`. A missing file gives an empty store.
#[instrument]
pub async fn load_snapshot(path: &str) -> Result<MemoryStore, AppError> {
    if !Path::new(path).exists() {
        info!("No league data at {path}, starting with an empty store");
        return Ok(MemoryStore::new());
    }
    let content = fs::read_to_string(path).await?;
    let snapshot: StoreSnapshot = serde_json::from_str(&content)
        .map_err(|e| AppError::data_file_error(path, e.to_string()))?;
    info!(
        "Loaded {} leagues, {} teams and {} players from {path}",
        snapshot.leagues.len(),
        snapshot.teams.len(),
        snapshot.players.len()
    );
    Ok(MemoryStore::from_snapshot(snapshot))
}

fn temp_path(path: &str) -> String {
    format!("{path}.tmp")
}

/// Writes the store to `path` as pretty JSON, creating the parent directory if needed.
///
/// The JSON goes to a sibling `.tmp` file first and is renamed over `path`,
/// so an interrupted save leaves the previous file intact.
#[instrument(skip(store))]
pub async fn save_snapshot(store: &MemoryStore, path: &str) -> Result<(), AppError> {
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(&store.snapshot().await)?;
    let tmp_path = temp_path(path);
    let mut file = fs::File::create(&tmp_path).await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(&tmp_path, path).await?;
    info!("Saved league data to {path}");
    Ok(())
}
