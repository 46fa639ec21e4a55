//! Matching engine: generation-stamped vector snapshots over candidate and
//! position tables
//!
//! The engine owns append-only entity tables and a copy-on-write [`Snapshot`]
//! holding everything derived from one corpus generation: both vector spaces
//! and all four vector tables. Readers pin a snapshot and never observe a
//! rebuild in progress; structural mutations serialize behind a write lock
//! and swap the snapshot atomically.

pub mod analytics;
pub mod gap_analyzer;
pub mod preprocessor;
pub mod profiles;
pub mod ranker;
pub mod vectorizer;

use crate::error::{MatcherError, Result};
use analytics::{DemandSupplyEntry, Heatmap};
use gap_analyzer::SkillGapReport;
use log::{error, info};
use ndarray::Array1;
use profiles::{Candidate, CandidateSource, NewCandidate, NewPosition, Position};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use vectorizer::{SpaceKind, TfidfVectorizer, VectorSpace};

/// A position annotated with its similarity score against the query profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionMatch {
    pub position: Position,
    pub score: f32,
}

/// A candidate annotated with its similarity score against the query position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub candidate: Candidate,
    pub score: f32,
}

/// Ranking controls. Filters are equality checks applied to the full ranked
/// list before truncation; `None` means unfiltered.
#[derive(Debug, Clone)]
pub struct RankOptions {
    pub top_n: usize,
    pub state: Option<String>,
    pub location: Option<String>,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            state: None,
            location: None,
        }
    }
}

/// One corpus generation's entities and derived vector tables.
///
/// Immutable once built. All vectors inside a snapshot share its generation,
/// so operations running against one snapshot can never mix dimensions from
/// two generations.
pub struct Snapshot {
    generation: u64,
    candidates: Vec<Candidate>,
    positions: Vec<Position>,
    candidate_tokens: Vec<Vec<String>>,
    position_tokens: Vec<Vec<String>>,
    profile_space: VectorSpace,
    skill_space: VectorSpace,
    candidate_profile_vectors: Vec<Array1<f32>>,
    position_profile_vectors: Vec<Array1<f32>>,
    candidate_skill_vectors: Vec<Array1<f32>>,
    position_skill_vectors: Vec<Array1<f32>>,
}

impl Snapshot {
    fn build(generation: u64, candidates: Vec<Candidate>, positions: Vec<Position>) -> Result<Self> {
        let candidate_tokens: Vec<Vec<String>> =
            candidates.iter().map(Candidate::skill_tokens).collect();
        let position_tokens: Vec<Vec<String>> =
            positions.iter().map(Position::skill_tokens).collect();

        let candidate_profile_texts: Vec<String> = candidates
            .iter()
            .zip(&candidate_tokens)
            .map(|(candidate, tokens)| candidate.profile_text(tokens))
            .collect();
        let position_profile_texts: Vec<String> = positions
            .iter()
            .zip(&position_tokens)
            .map(|(position, tokens)| position.profile_text(tokens))
            .collect();

        // Both spaces are fit over the union of the two populations so that
        // candidate and position vectors land in the same dimensions.
        let profile_corpus: Vec<String> = candidate_profile_texts
            .iter()
            .chain(&position_profile_texts)
            .cloned()
            .collect();
        let skill_corpus: Vec<String> = candidate_tokens
            .iter()
            .chain(&position_tokens)
            .map(|tokens| tokens.join(" "))
            .collect();

        let vectorizer = TfidfVectorizer::new();
        let profile_space = vectorizer.fit(&profile_corpus, SpaceKind::Profile)?;
        let skill_space = vectorizer.fit(&skill_corpus, SpaceKind::Skill)?;

        let candidate_profile_vectors = candidate_profile_texts
            .iter()
            .map(|text| profile_space.transform(text))
            .collect();
        let position_profile_vectors = position_profile_texts
            .iter()
            .map(|text| profile_space.transform(text))
            .collect();
        let candidate_skill_vectors = candidate_tokens
            .iter()
            .map(|tokens| skill_space.transform(&tokens.join(" ")))
            .collect();
        let position_skill_vectors = position_tokens
            .iter()
            .map(|tokens| skill_space.transform(&tokens.join(" ")))
            .collect();

        Ok(Self {
            generation,
            candidates,
            positions,
            candidate_tokens,
            position_tokens,
            profile_space,
            skill_space,
            candidate_profile_vectors,
            position_profile_vectors,
            candidate_skill_vectors,
            position_skill_vectors,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn candidate_by_id(&self, id: u32) -> Result<&Candidate> {
        self.candidate_index(id).map(|index| &self.candidates[index])
    }

    pub fn position_by_id(&self, id: u32) -> Result<&Position> {
        self.position_index(id).map(|index| &self.positions[index])
    }

    fn candidate_index(&self, id: u32) -> Result<usize> {
        self.candidates
            .iter()
            .position(|candidate| candidate.id == id)
            .ok_or(MatcherError::NotFound {
                kind: "candidate",
                id,
            })
    }

    fn position_index(&self, id: u32) -> Result<usize> {
        self.positions
            .iter()
            .position(|position| position.id == id)
            .ok_or(MatcherError::NotFound {
                kind: "position",
                id,
            })
    }

    /// Profile-space query vector for a stored or ephemeral candidate.
    fn candidate_profile_vector(&self, source: CandidateSource) -> Result<Array1<f32>> {
        match source {
            CandidateSource::Stored(id) => {
                let index = self.candidate_index(id)?;
                Ok(self.candidate_profile_vectors[index].clone())
            }
            CandidateSource::Ephemeral(new) => {
                new.validate()?;
                let tokens = new.skill_tokens();
                Ok(self.profile_space.transform(&new.profile_text(&tokens)))
            }
        }
    }

    /// Skill-space vector for a stored or ephemeral candidate.
    fn candidate_skill_vector(&self, source: CandidateSource) -> Result<Array1<f32>> {
        match source {
            CandidateSource::Stored(id) => {
                let index = self.candidate_index(id)?;
                Ok(self.candidate_skill_vectors[index].clone())
            }
            CandidateSource::Ephemeral(new) => {
                new.validate()?;
                Ok(self.skill_space.transform(&new.skill_tokens().join(" ")))
            }
        }
    }

    /// Rank every position against the candidate's profile vector, apply the
    /// filters to the full ranked list, then truncate to `top_n`.
    ///
    /// Filtering never rescales scores. Fewer than `top_n` survivors is a
    /// normal outcome, not an error.
    pub fn recommend_positions(
        &self,
        source: CandidateSource,
        options: &RankOptions,
    ) -> Result<Vec<PositionMatch>> {
        let query = self.candidate_profile_vector(source)?;
        let ranked = ranker::rank(&query, &self.position_profile_vectors);

        Ok(ranked
            .into_iter()
            .filter(|entry| {
                let position = &self.positions[entry.index];
                options
                    .state
                    .as_deref()
                    .map_or(true, |state| position.state == state)
                    && options
                        .location
                        .as_deref()
                        .map_or(true, |location| position.location == location)
            })
            .take(options.top_n)
            .map(|entry| PositionMatch {
                position: self.positions[entry.index].clone(),
                score: entry.score,
            })
            .collect())
    }

    /// Rank every candidate against a position's profile vector: the same
    /// ranking in the reverse direction.
    pub fn top_candidates(&self, position_id: u32, top_n: usize) -> Result<Vec<CandidateMatch>> {
        let index = self.position_index(position_id)?;
        let ranked = ranker::rank(
            &self.position_profile_vectors[index],
            &self.candidate_profile_vectors,
        );

        Ok(ranked
            .into_iter()
            .take(top_n)
            .map(|entry| CandidateMatch {
                candidate: self.candidates[entry.index].clone(),
                score: entry.score,
            })
            .collect())
    }

    /// Skill gap between a stored or ephemeral candidate and a stored
    /// position, in skill space.
    pub fn skill_gap(&self, source: CandidateSource, position_id: u32) -> Result<SkillGapReport> {
        let position_index = self.position_index(position_id)?;
        let candidate_vector = self.candidate_skill_vector(source)?;
        Ok(gap_analyzer::analyze(
            &candidate_vector,
            &self.position_skill_vectors[position_index],
            &self.skill_space,
        ))
    }

    /// Demand/supply token-frequency gap across the whole corpus.
    pub fn demand_supply_gap(&self, top_k: usize) -> Vec<DemandSupplyEntry> {
        analytics::demand_supply_gap(&self.position_tokens, &self.candidate_tokens, top_k)
    }

    /// Location-by-skill candidate counts for the selected tokens.
    pub fn skill_heatmap(&self, selected: &[String]) -> Heatmap {
        analytics::skill_heatmap(&self.candidates, &self.candidate_tokens, selected)
    }
}

struct EngineInner {
    candidates: Vec<Candidate>,
    positions: Vec<Position>,
    generation: u64,
    snapshot: Option<Arc<Snapshot>>,
}

/// The engine's state machine is `Unbuilt -> Built(gen 1) -> Built(gen 2) ...`:
/// every structural mutation rebuilds both spaces synchronously under the
/// write lock and bumps the generation. Read operations go through
/// [`MatchingEngine::snapshot`] and fail fast with `EngineUnbuilt` before the
/// first successful build.
pub struct MatchingEngine {
    inner: RwLock<EngineInner>,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    /// An empty, unbuilt engine.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(EngineInner {
                candidates: Vec::new(),
                positions: Vec::new(),
                generation: 0,
                snapshot: None,
            }),
        }
    }

    /// Build an engine over the given record sets. Fails with `EmptyCorpus`
    /// when the corpus is degenerate (no entities, or no vocabulary).
    pub fn with_data(candidates: Vec<Candidate>, positions: Vec<Position>) -> Result<Self> {
        let engine = Self::new();
        {
            let mut inner = engine.inner.write().expect("engine lock poisoned");
            inner.candidates = candidates;
            inner.positions = positions;
            Self::rebuild(&mut inner)?;
        }
        Ok(engine)
    }

    fn rebuild(inner: &mut EngineInner) -> Result<()> {
        let generation = inner.generation + 1;
        let snapshot = Snapshot::build(
            generation,
            inner.candidates.clone(),
            inner.positions.clone(),
        )?;
        info!(
            "vector spaces built: generation {}, {} candidates, {} positions, {} profile terms, {} skill terms",
            generation,
            snapshot.candidates.len(),
            snapshot.positions.len(),
            snapshot.profile_space.len(),
            snapshot.skill_space.len(),
        );
        inner.generation = generation;
        inner.snapshot = Some(Arc::new(snapshot));
        Ok(())
    }

    /// Pin the current generation. The returned snapshot stays valid for the
    /// caller even while the engine rebuilds concurrently.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        let inner = self.inner.read().expect("engine lock poisoned");
        inner.snapshot.clone().ok_or(MatcherError::EngineUnbuilt)
    }

    /// Check a pinned snapshot against the engine's current generation.
    /// Returns `StaleVectorSpace` after any intervening structural mutation.
    pub fn verify_current(&self, snapshot: &Snapshot) -> Result<()> {
        let inner = self.inner.read().expect("engine lock poisoned");
        match &inner.snapshot {
            None => Err(MatcherError::EngineUnbuilt),
            Some(current) if current.generation == snapshot.generation => Ok(()),
            Some(current) => Err(MatcherError::StaleVectorSpace {
                pinned: snapshot.generation,
                current: current.generation,
            }),
        }
    }

    /// Append a candidate and rebuild. The append and the rebuild form one
    /// transaction: if the rebuild fails the table is restored and the
    /// previous snapshot stays current.
    pub fn add_candidate(&self, new: NewCandidate) -> Result<u32> {
        new.validate()?;
        let mut inner = self.inner.write().expect("engine lock poisoned");
        let id = inner
            .candidates
            .iter()
            .map(|candidate| candidate.id)
            .max()
            .unwrap_or(0)
            + 1;
        inner.candidates.push(Candidate::from_new(id, new));
        if let Err(err) = Self::rebuild(&mut inner) {
            let _ = inner.candidates.pop();
            error!("failed to add candidate: {err}");
            return Err(err);
        }
        info!("added candidate {id}");
        Ok(id)
    }

    /// Append a position and rebuild, with the same transaction discipline
    /// as [`MatchingEngine::add_candidate`].
    pub fn add_position(&self, new: NewPosition) -> Result<u32> {
        new.validate()?;
        let mut inner = self.inner.write().expect("engine lock poisoned");
        let id = inner
            .positions
            .iter()
            .map(|position| position.id)
            .max()
            .unwrap_or(0)
            + 1;
        inner.positions.push(Position::from_new(id, new));
        if let Err(err) = Self::rebuild(&mut inner) {
            let _ = inner.positions.pop();
            error!("failed to add position: {err}");
            return Err(err);
        }
        info!("added position {id}");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbuilt_engine_fails_fast() {
        let engine = MatchingEngine::new();
        assert!(matches!(
            engine.snapshot(),
            Err(MatcherError::EngineUnbuilt)
        ));
    }

    #[test]
    fn test_empty_corpus_fails_at_build() {
        let result = MatchingEngine::with_data(Vec::new(), Vec::new());
        assert!(matches!(result, Err(MatcherError::EmptyCorpus)));
    }
}
