//! Per-pair skill gap analysis over skill-space vectors

use crate::engine::vectorizer::{SpaceKind, VectorSpace};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Result of comparing one candidate against one position in skill space.
///
/// `matching_skills` and `missing_skills` partition the position's required
/// token set; both lists are in dimension (lexical) order. Tokens are
/// canonical; display prettification belongs to the output layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub match_percentage: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Compare the nonzero dimensions of a candidate/position pair of
/// skill-space vectors.
///
/// The required set is the position vector's nonzero dimensions. An empty
/// required set is a vacuous match: `match_percentage` is 100 regardless of
/// the candidate. Both vectors must come from the given skill space; a
/// mismatch is an invariant violation and panics.
pub fn analyze(
    candidate: &Array1<f32>,
    position: &Array1<f32>,
    space: &VectorSpace,
) -> SkillGapReport {
    assert_eq!(
        space.kind(),
        SpaceKind::Skill,
        "skill gap analysis requires skill-space vectors"
    );
    assert_eq!(
        candidate.len(),
        space.len(),
        "candidate vector does not belong to this skill space"
    );
    assert_eq!(
        position.len(),
        space.len(),
        "position vector does not belong to this skill space"
    );

    let mut matching_skills = Vec::new();
    let mut missing_skills = Vec::new();
    for (dim, name) in space.feature_names().iter().enumerate() {
        if position[dim] > 0.0 {
            if candidate[dim] > 0.0 {
                matching_skills.push(name.clone());
            } else {
                missing_skills.push(name.clone());
            }
        }
    }

    let required = matching_skills.len() + missing_skills.len();
    let match_percentage = if required == 0 {
        100.0
    } else {
        matching_skills.len() as f64 / required as f64 * 100.0
    };

    SkillGapReport {
        match_percentage,
        matching_skills,
        missing_skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::vectorizer::TfidfVectorizer;

    fn skill_space(docs: &[&str]) -> VectorSpace {
        let corpus: Vec<String> = docs.iter().map(|d| d.to_string()).collect();
        TfidfVectorizer::new().fit(&corpus, SpaceKind::Skill).unwrap()
    }

    #[test]
    fn test_partial_match() {
        let space = skill_space(&["python machine_learning", "python sql"]);
        let candidate = space.transform("python machine_learning");
        let position = space.transform("python sql");

        let report = analyze(&candidate, &position, &space);
        assert!((report.match_percentage - 50.0).abs() < 1e-9);
        assert_eq!(report.matching_skills, vec!["python"]);
        assert_eq!(report.missing_skills, vec!["sql"]);
    }

    #[test]
    fn test_empty_requirements_match_vacuously() {
        let space = skill_space(&["python sql", "aws"]);
        let candidate = space.transform("aws");
        let position = space.transform("");

        let report = analyze(&candidate, &position, &space);
        assert_eq!(report.match_percentage, 100.0);
        assert!(report.matching_skills.is_empty());
        assert!(report.missing_skills.is_empty());
    }

    #[test]
    fn test_matching_and_missing_partition_required() {
        let space = skill_space(&["python sql aws react", "python machine_learning"]);
        let candidate = space.transform("python react");
        let position = space.transform("python sql aws react");

        let report = analyze(&candidate, &position, &space);
        let required = report.matching_skills.len() + report.missing_skills.len();
        assert_eq!(required, 4);
        for skill in &report.matching_skills {
            assert!(!report.missing_skills.contains(skill));
        }
        assert!((0.0..=100.0).contains(&report.match_percentage));
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let space = skill_space(&["python sql", "react aws"]);
        let candidate = space.transform("react aws");
        let position = space.transform("python sql");

        let report = analyze(&candidate, &position, &space);
        assert_eq!(report.match_percentage, 0.0);
        assert!(report.matching_skills.is_empty());
        assert_eq!(report.missing_skills, vec!["python", "sql"]);
    }

    #[test]
    #[should_panic(expected = "skill-space vectors")]
    fn test_profile_space_is_rejected() {
        let corpus = vec!["python sql".to_string()];
        let profile_space = TfidfVectorizer::new()
            .fit(&corpus, SpaceKind::Profile)
            .unwrap();
        let v = profile_space.transform("python");
        analyze(&v, &v, &profile_space);
    }
}
