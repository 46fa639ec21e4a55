//! Serializable report envelopes for engine results

use crate::engine::analytics::{DemandSupplyEntry, Heatmap};
use crate::engine::gap_analyzer::SkillGapReport;
use crate::engine::{CandidateMatch, PositionMatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generation info attached to every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub generation: u64,
}

impl ReportMetadata {
    pub fn new(generation: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            generation,
        }
    }
}

/// Ranked positions for one candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub metadata: ReportMetadata,
    pub candidate_name: String,
    pub matches: Vec<PositionMatch>,
}

/// Ranked candidates for one position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopCandidatesReport {
    pub metadata: ReportMetadata,
    pub position_id: u32,
    pub company: String,
    pub matches: Vec<CandidateMatch>,
}

/// Skill gap between one candidate and one position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapReport {
    pub metadata: ReportMetadata,
    pub candidate_name: String,
    pub position_id: u32,
    pub company: String,
    pub gap: SkillGapReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandSupplyReport {
    pub metadata: ReportMetadata,
    pub entries: Vec<DemandSupplyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapReport {
    pub metadata: ReportMetadata,
    pub heatmap: Heatmap,
}

/// Display form of a canonical skill token: `machine_learning` renders as
/// "machine learning". Engine output stays canonical.
pub fn display_skill(token: &str) -> String {
    token.replace('_', " ")
}
