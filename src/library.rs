use crate::model::Track;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

pub fn load_track_list(path: &Path) -> Result<Vec<Track>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read track list {}", path.display()))?;
    let tracks: Vec<Track> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse track list {}", path.display()))?;
    debug!("loaded {} tracks from {}", tracks.len(), path.display());
    Ok(tracks)
}
