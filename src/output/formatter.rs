//! Console and JSON rendering of engine reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{
    display_skill, DemandSupplyReport, GapReport, HeatmapReport, RecommendationReport,
    TopCandidatesReport,
};
use colored::Colorize;
use std::fmt::Write;

/// Renders reports in the configured output format.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn recommendations(&self, report: &RecommendationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Console => {
                let mut out = String::new();
                let _ = writeln!(
                    out,
                    "{} {}",
                    "Recommended positions for".bold(),
                    report.candidate_name.bold()
                );
                for (rank, m) in report.matches.iter().enumerate() {
                    let _ = writeln!(
                        out,
                        "{:>3}. {} — {} ({}, {})  {} {}",
                        rank + 1,
                        m.position.company.cyan(),
                        m.position.domain,
                        m.position.location,
                        m.position.state,
                        "score".dimmed(),
                        format!("{:.3}", m.score).green()
                    );
                }
                if report.matches.is_empty() {
                    let _ = writeln!(out, "  no positions matched the filters");
                }
                Ok(out)
            }
        }
    }

    pub fn top_candidates(&self, report: &TopCandidatesReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Console => {
                let mut out = String::new();
                let _ = writeln!(
                    out,
                    "{} {} ({})",
                    "Top candidates for position".bold(),
                    report.position_id,
                    report.company
                );
                for (rank, m) in report.matches.iter().enumerate() {
                    let _ = writeln!(
                        out,
                        "{:>3}. {} — {} ({})  {} {}",
                        rank + 1,
                        m.candidate.name.cyan(),
                        m.candidate.branch,
                        m.candidate.location_preference,
                        "score".dimmed(),
                        format!("{:.3}", m.score).green()
                    );
                }
                Ok(out)
            }
        }
    }

    pub fn skill_gap(&self, report: &GapReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Console => {
                let mut out = String::new();
                let percentage = format!("{:.2}%", report.gap.match_percentage);
                let colored_percentage = if report.gap.match_percentage >= 70.0 {
                    percentage.green()
                } else if report.gap.match_percentage >= 40.0 {
                    percentage.yellow()
                } else {
                    percentage.red()
                };
                let _ = writeln!(
                    out,
                    "{} {} → position {} ({}): {}",
                    "Skill match".bold(),
                    report.candidate_name,
                    report.position_id,
                    report.company,
                    colored_percentage
                );
                let _ = writeln!(
                    out,
                    "  matching: {}",
                    join_skills(&report.gap.matching_skills).green()
                );
                let _ = writeln!(
                    out,
                    "  missing:  {}",
                    join_skills(&report.gap.missing_skills).red()
                );
                Ok(out)
            }
        }
    }

    pub fn demand_supply(&self, report: &DemandSupplyReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Console => {
                let mut out = String::new();
                let _ = writeln!(
                    out,
                    "{:<24} {:>8} {:>8} {:>6}",
                    "skill".bold(),
                    "demand".bold(),
                    "supply".bold(),
                    "gap".bold()
                );
                for entry in &report.entries {
                    let _ = writeln!(
                        out,
                        "{:<24} {:>8} {:>8} {:>6}",
                        display_skill(&entry.skill),
                        entry.demand,
                        entry.supply,
                        entry.gap
                    );
                }
                Ok(out)
            }
        }
    }

    pub fn heatmap(&self, report: &HeatmapReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Console => {
                let mut out = String::new();
                let _ = write!(out, "{:<16}", "location".bold());
                for skill in &report.heatmap.skills {
                    let _ = write!(out, " {:>18}", display_skill(skill));
                }
                let _ = writeln!(out);
                for row in &report.heatmap.rows {
                    let location = if row.location.is_empty() {
                        "(unspecified)"
                    } else {
                        &row.location
                    };
                    let _ = write!(out, "{:<16}", location);
                    for count in &row.counts {
                        let _ = write!(out, " {:>18}", count);
                    }
                    let _ = writeln!(out);
                }
                Ok(out)
            }
        }
    }
}

fn join_skills(tokens: &[String]) -> String {
    if tokens.is_empty() {
        return "(none)".to_string();
    }
    tokens
        .iter()
        .map(|token| display_skill(token))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::gap_analyzer::SkillGapReport;
    use crate::output::report::ReportMetadata;

    #[test]
    fn test_gap_json_round_trips() {
        let report = GapReport {
            metadata: ReportMetadata::new(1),
            candidate_name: "Asha Rao".to_string(),
            position_id: 5001,
            company: "NVIDIA".to_string(),
            gap: SkillGapReport {
                match_percentage: 50.0,
                matching_skills: vec!["python".to_string()],
                missing_skills: vec!["sql".to_string()],
            },
        };
        let formatter = Formatter::new(OutputFormat::Json);
        let json = formatter.skill_gap(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["gap"]["match_percentage"], 50.0);
        assert_eq!(parsed["gap"]["missing_skills"][0], "sql");
    }

    #[test]
    fn test_gap_console_prettifies_tokens() {
        colored::control::set_override(false);
        let report = GapReport {
            metadata: ReportMetadata::new(1),
            candidate_name: "Asha Rao".to_string(),
            position_id: 5001,
            company: "NVIDIA".to_string(),
            gap: SkillGapReport {
                match_percentage: 50.0,
                matching_skills: vec!["machine_learning".to_string()],
                missing_skills: vec![],
            },
        };
        let formatter = Formatter::new(OutputFormat::Console);
        let text = formatter.skill_gap(&report).unwrap();
        assert!(text.contains("machine learning"));
        assert!(text.contains("50.00%"));
    }
}
