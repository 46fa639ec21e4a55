//! Aggregate analytics over normalized skill token sets

use crate::engine::profiles::Candidate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default token list for the talent heatmap.
pub const DEFAULT_HEATMAP_SKILLS: [&str; 6] = [
    "machine_learning",
    "python",
    "react",
    "web_development",
    "cloud_computing",
    "aws",
];

/// One row of the demand/supply gap table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSupplyEntry {
    pub skill: String,
    pub demand: u32,
    pub supply: u32,
    pub gap: i64,
}

/// Location-by-skill candidate counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub skills: Vec<String>,
    pub rows: Vec<HeatmapRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub location: String,
    pub counts: Vec<u32>,
}

/// Token-frequency gap between position demand and candidate supply.
///
/// Counts every token occurrence on each side, joins the two counts over
/// the token union (missing side defaults to 0), and returns the top `top_k`
/// entries by descending `gap = demand - supply`, ties in lexical token
/// order.
pub fn demand_supply_gap(
    position_tokens: &[Vec<String>],
    candidate_tokens: &[Vec<String>],
    top_k: usize,
) -> Vec<DemandSupplyEntry> {
    // BTreeMap accumulation gives the lexical base order that the stable
    // sort below preserves for equal gaps.
    let mut joined: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for tokens in position_tokens {
        for token in tokens {
            joined.entry(token.as_str()).or_insert((0, 0)).0 += 1;
        }
    }
    for tokens in candidate_tokens {
        for token in tokens {
            joined.entry(token.as_str()).or_insert((0, 0)).1 += 1;
        }
    }

    let mut entries: Vec<DemandSupplyEntry> = joined
        .into_iter()
        .map(|(skill, (demand, supply))| DemandSupplyEntry {
            skill: skill.to_string(),
            demand,
            supply,
            gap: i64::from(demand) - i64::from(supply),
        })
        .collect();
    entries.sort_by(|a, b| b.gap.cmp(&a.gap));
    entries.truncate(top_k);
    entries
}

/// Count, per location preference, how many candidates carry each selected
/// skill token.
///
/// Presence is exact-token membership in the candidate's normalized token
/// set, not substring containment: `react` does not count a candidate whose
/// only related token is `reactive_programming`. Rows are in lexical
/// location order.
pub fn skill_heatmap(
    candidates: &[Candidate],
    candidate_tokens: &[Vec<String>],
    selected: &[String],
) -> Heatmap {
    let mut grouped: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for (candidate, tokens) in candidates.iter().zip(candidate_tokens) {
        let counts = grouped
            .entry(candidate.location_preference.as_str())
            .or_insert_with(|| vec![0; selected.len()]);
        for (slot, skill) in selected.iter().enumerate() {
            if tokens.iter().any(|token| token == skill) {
                counts[slot] += 1;
            }
        }
    }

    Heatmap {
        skills: selected.to_vec(),
        rows: grouped
            .into_iter()
            .map(|(location, counts)| HeatmapRow {
                location: location.to_string(),
                counts,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(sets: &[&[&str]]) -> Vec<Vec<String>> {
        sets.iter()
            .map(|set| set.iter().map(|t| t.to_string()).collect())
            .collect()
    }

    fn candidate(id: u32, location: &str, skills: &str) -> Candidate {
        Candidate {
            id,
            name: format!("Candidate {id}"),
            branch: "IT".to_string(),
            cgpa: 8.0,
            location_preference: location.to_string(),
            skills: skills.to_string(),
        }
    }

    #[test]
    fn test_demand_supply_counts_and_gap() {
        let demand = tokens(&[&["python", "sql"], &["python"]]);
        let supply = tokens(&[&["python"]]);

        let entries = demand_supply_gap(&demand, &supply, 10);
        let python = entries.iter().find(|e| e.skill == "python").unwrap();
        assert_eq!((python.demand, python.supply, python.gap), (2, 1, 1));
        let sql = entries.iter().find(|e| e.skill == "sql").unwrap();
        assert_eq!((sql.demand, sql.supply, sql.gap), (1, 0, 1));
    }

    #[test]
    fn test_demand_supply_includes_supply_only_tokens() {
        let demand = tokens(&[&["python"]]);
        let supply = tokens(&[&["react"], &["react"]]);

        let entries = demand_supply_gap(&demand, &supply, 10);
        let react = entries.iter().find(|e| e.skill == "react").unwrap();
        assert_eq!((react.demand, react.supply, react.gap), (0, 2, -2));
    }

    #[test]
    fn test_demand_supply_sorted_desc_ties_lexical() {
        let demand = tokens(&[&["zig", "ada", "python"]]);
        let supply = tokens(&[&["python"]]);

        let entries = demand_supply_gap(&demand, &supply, 10);
        let order: Vec<&str> = entries.iter().map(|e| e.skill.as_str()).collect();
        // ada and zig both have gap 1 and sort lexically; python's gap is 0.
        assert_eq!(order, vec!["ada", "zig", "python"]);
    }

    #[test]
    fn test_demand_supply_truncates_to_top_k() {
        let demand = tokens(&[&["a1", "b2", "c3", "d4"]]);
        let entries = demand_supply_gap(&demand, &[], 2);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_heatmap_exact_token_matching() {
        let candidates = vec![
            candidate(1, "Pune", "Reactive Programming"),
            candidate(2, "Pune", "React"),
        ];
        let candidate_tokens = tokens(&[&["reactive_programming"], &["react"]]);
        let selected = vec!["react".to_string()];

        let heatmap = skill_heatmap(&candidates, &candidate_tokens, &selected);
        assert_eq!(heatmap.rows.len(), 1);
        // Only the exact token counts; the substring hit does not.
        assert_eq!(heatmap.rows[0].counts, vec![1]);
    }

    #[test]
    fn test_heatmap_groups_and_sorts_by_location() {
        let candidates = vec![
            candidate(1, "Pune", "Python"),
            candidate(2, "Bangalore", "Python, AWS"),
            candidate(3, "Pune", "AWS"),
        ];
        let candidate_tokens = tokens(&[&["python"], &["python", "aws"], &["aws"]]);
        let selected = vec!["aws".to_string(), "python".to_string()];

        let heatmap = skill_heatmap(&candidates, &candidate_tokens, &selected);
        let locations: Vec<&str> = heatmap.rows.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locations, vec!["Bangalore", "Pune"]);
        assert_eq!(heatmap.rows[0].counts, vec![1, 1]);
        assert_eq!(heatmap.rows[1].counts, vec![1, 1]);
    }

    #[test]
    fn test_heatmap_cells_bounded_by_group_size() {
        let candidates = vec![
            candidate(1, "Delhi", "Python"),
            candidate(2, "Delhi", "Python"),
        ];
        let candidate_tokens = tokens(&[&["python"], &["python"]]);
        let selected = vec!["python".to_string()];

        let heatmap = skill_heatmap(&candidates, &candidate_tokens, &selected);
        for row in &heatmap.rows {
            for &count in &row.counts {
                assert!(count as usize <= candidates.len());
            }
        }
    }
}
