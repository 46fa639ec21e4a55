//! CSV loading for the candidate and position record sets

use crate::engine::profiles::{Candidate, Position};
use crate::error::Result;
use log::info;
use std::path::Path;

/// Load the candidate record set. Missing text fields deserialize to empty
/// strings; they contribute nothing to the corpus.
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    info!("loaded {} candidates from {}", records.len(), path.display());
    Ok(records)
}

/// Load the position record set.
pub fn load_positions(path: &Path) -> Result<Vec<Position>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    info!("loaded {} positions from {}", records.len(), path.display());
    Ok(records)
}
