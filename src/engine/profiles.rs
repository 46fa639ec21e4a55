//! Candidate and position records and their derived profile texts

use crate::engine::preprocessor::{build_profile_text, normalize_skills};
use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};

/// A candidate profile as loaded from the candidate record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "candidate_id")]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub branch: String,
    pub cgpa: f32,
    #[serde(default)]
    pub location_preference: String,
    #[serde(default)]
    pub skills: String,
}

/// An open position as loaded from the position record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "position_id")]
    pub id: u32,
    pub company: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub state: String,
    pub stipend: u32,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub required_skills: String,
}

/// Insertion payload for a candidate; the engine assigns the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub cgpa: f32,
    #[serde(default)]
    pub location_preference: String,
    #[serde(default)]
    pub skills: String,
}

/// Insertion payload for a position; the engine assigns the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPosition {
    pub company: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub stipend: u32,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub required_skills: String,
}

/// Which candidate profile an operation runs against: a persisted row or an
/// ephemeral, not-yet-stored record. Both are routed through the same
/// preprocessing and transform path, so saved and unsaved profiles get
/// identical semantics.
#[derive(Debug, Clone, Copy)]
pub enum CandidateSource<'a> {
    Stored(u32),
    Ephemeral(&'a NewCandidate),
}

impl Candidate {
    pub fn skill_tokens(&self) -> Vec<String> {
        normalize_skills(&self.skills)
    }

    /// Composite profile text: branch, location preference, then skills.
    pub fn profile_text(&self, skill_tokens: &[String]) -> String {
        build_profile_text(&[&self.branch, &self.location_preference], skill_tokens)
    }

    pub fn from_new(id: u32, new: NewCandidate) -> Self {
        Self {
            id,
            name: new.name,
            branch: new.branch,
            cgpa: new.cgpa,
            location_preference: new.location_preference,
            skills: new.skills,
        }
    }
}

impl Position {
    pub fn skill_tokens(&self) -> Vec<String> {
        normalize_skills(&self.required_skills)
    }

    /// Composite profile text: domain, location, state, then skills.
    pub fn profile_text(&self, skill_tokens: &[String]) -> String {
        build_profile_text(&[&self.domain, &self.location, &self.state], skill_tokens)
    }

    pub fn from_new(id: u32, new: NewPosition) -> Self {
        Self {
            id,
            company: new.company,
            domain: new.domain,
            location: new.location,
            state: new.state,
            stipend: new.stipend,
            duration: new.duration,
            required_skills: new.required_skills,
        }
    }
}

impl NewCandidate {
    pub fn skill_tokens(&self) -> Vec<String> {
        normalize_skills(&self.skills)
    }

    pub fn profile_text(&self, skill_tokens: &[String]) -> String {
        build_profile_text(&[&self.branch, &self.location_preference], skill_tokens)
    }

    /// An ephemeral profile must carry a name and at least one matchable
    /// field, otherwise every comparison would be against a zero vector.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MatcherError::InvalidProfile(
                "name must not be empty".to_string(),
            ));
        }
        if self.branch.trim().is_empty()
            && self.location_preference.trim().is_empty()
            && self.skills.trim().is_empty()
        {
            return Err(MatcherError::InvalidProfile(
                "branch, location preference, and skills are all empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl NewPosition {
    pub fn validate(&self) -> Result<()> {
        if self.company.trim().is_empty() {
            return Err(MatcherError::InvalidProfile(
                "company must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_profile_text() {
        let candidate = Candidate {
            id: 101,
            name: "Asha Rao".to_string(),
            branch: "Computer Science".to_string(),
            cgpa: 8.4,
            location_preference: "Bangalore".to_string(),
            skills: "Python, Machine Learning".to_string(),
        };
        let tokens = candidate.skill_tokens();
        assert_eq!(
            candidate.profile_text(&tokens),
            "computer science bangalore python machine_learning"
        );
    }

    #[test]
    fn test_position_profile_text() {
        let position = Position {
            id: 5001,
            company: "NVIDIA".to_string(),
            domain: "Deep Learning".to_string(),
            location: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            stipend: 40000,
            duration: "6 Months".to_string(),
            required_skills: "Python, SQL".to_string(),
        };
        let tokens = position.skill_tokens();
        assert_eq!(
            position.profile_text(&tokens),
            "deep learning pune maharashtra python sql"
        );
    }

    #[test]
    fn test_new_candidate_requires_name() {
        let new = NewCandidate {
            skills: "Python".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            new.validate(),
            Err(MatcherError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_new_candidate_requires_matchable_field() {
        let new = NewCandidate {
            name: "Dev Patel".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            new.validate(),
            Err(MatcherError::InvalidProfile(_))
        ));

        let with_skills = NewCandidate {
            name: "Dev Patel".to_string(),
            skills: "Python".to_string(),
            ..Default::default()
        };
        assert!(with_skills.validate().is_ok());
    }
}
