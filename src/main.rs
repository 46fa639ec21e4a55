//! Talent matcher: profile matching and skill gap analysis for
//! candidate-position recommendations

use clap::Parser;
use log::error;
use std::path::Path;
use std::process;
use talent_matcher::cli::{self, AnalyticsAction, Cli, Commands, ConfigAction};
use talent_matcher::config::{Config, OutputFormat};
use talent_matcher::engine::profiles::{CandidateSource, NewCandidate};
use talent_matcher::engine::{MatchingEngine, RankOptions};
use talent_matcher::error::{MatcherError, Result};
use talent_matcher::input::{demo_data, loader};
use talent_matcher::output::formatter::Formatter;
use talent_matcher::output::report::{
    DemandSupplyReport, GapReport, HeatmapReport, RecommendationReport, ReportMetadata,
    TopCandidatesReport,
};

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    let candidates_file = cli
        .candidates_file
        .clone()
        .unwrap_or_else(|| config.data.candidates_file.clone());
    let positions_file = cli
        .positions_file
        .clone()
        .unwrap_or_else(|| config.data.positions_file.clone());

    if let Err(e) = run_command(cli.command, config, &candidates_file, &positions_file) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(
    command: Commands,
    config: Config,
    candidates_file: &Path,
    positions_file: &Path,
) -> Result<()> {
    match command {
        Commands::Recommend {
            candidate,
            top_n,
            state,
            city,
            output,
        } => {
            let engine = load_engine(candidates_file, positions_file)?;
            let snapshot = engine.snapshot()?;
            let candidate_name = snapshot.candidate_by_id(candidate)?.name.clone();

            let options = RankOptions {
                top_n: top_n.unwrap_or(config.engine.default_top_n),
                state,
                location: city,
            };
            let matches = snapshot.recommend_positions(CandidateSource::Stored(candidate), &options)?;

            let report = RecommendationReport {
                metadata: ReportMetadata::new(snapshot.generation()),
                candidate_name,
                matches,
            };
            let format = resolve_format(output.as_deref(), &config)?;
            print!("{}", Formatter::new(format).recommendations(&report)?);
        }

        Commands::Candidates {
            position,
            top_n,
            output,
        } => {
            let engine = load_engine(candidates_file, positions_file)?;
            let snapshot = engine.snapshot()?;
            let company = snapshot.position_by_id(position)?.company.clone();

            let matches =
                snapshot.top_candidates(position, top_n.unwrap_or(config.engine.default_top_n))?;

            let report = TopCandidatesReport {
                metadata: ReportMetadata::new(snapshot.generation()),
                position_id: position,
                company,
                matches,
            };
            let format = resolve_format(output.as_deref(), &config)?;
            print!("{}", Formatter::new(format).top_candidates(&report)?);
        }

        Commands::Gap {
            candidate,
            position,
            name,
            branch,
            location,
            skills,
            output,
        } => {
            let engine = load_engine(candidates_file, positions_file)?;
            let snapshot = engine.snapshot()?;

            let ephemeral;
            let (source, candidate_name) = match candidate {
                Some(id) => (
                    CandidateSource::Stored(id),
                    snapshot.candidate_by_id(id)?.name.clone(),
                ),
                None => {
                    ephemeral = NewCandidate {
                        name: name.unwrap_or_default(),
                        branch: branch.unwrap_or_default(),
                        cgpa: 0.0,
                        location_preference: location.unwrap_or_default(),
                        skills: skills.unwrap_or_default(),
                    };
                    let name = ephemeral.name.clone();
                    (CandidateSource::Ephemeral(&ephemeral), name)
                }
            };

            let gap = snapshot.skill_gap(source, position)?;
            let company = snapshot.position_by_id(position)?.company.clone();

            let report = GapReport {
                metadata: ReportMetadata::new(snapshot.generation()),
                candidate_name,
                position_id: position,
                company,
                gap,
            };
            let format = resolve_format(output.as_deref(), &config)?;
            print!("{}", Formatter::new(format).skill_gap(&report)?);
        }

        Commands::Analytics { action } => match action {
            AnalyticsAction::DemandSupply { top_k, output } => {
                let engine = load_engine(candidates_file, positions_file)?;
                let snapshot = engine.snapshot()?;
                let entries =
                    snapshot.demand_supply_gap(top_k.unwrap_or(config.engine.demand_supply_top_k));

                let report = DemandSupplyReport {
                    metadata: ReportMetadata::new(snapshot.generation()),
                    entries,
                };
                let format = resolve_format(output.as_deref(), &config)?;
                print!("{}", Formatter::new(format).demand_supply(&report)?);
            }
            AnalyticsAction::Heatmap { skills, output } => {
                let engine = load_engine(candidates_file, positions_file)?;
                let snapshot = engine.snapshot()?;
                let selected = if skills.is_empty() {
                    config.engine.heatmap_skills.clone()
                } else {
                    skills
                };
                let heatmap = snapshot.skill_heatmap(&selected);

                let report = HeatmapReport {
                    metadata: ReportMetadata::new(snapshot.generation()),
                    heatmap,
                };
                let format = resolve_format(output.as_deref(), &config)?;
                print!("{}", Formatter::new(format).heatmap(&report)?);
            }
        },

        Commands::DemoData {
            num_candidates,
            num_positions,
            out_dir,
            seed,
        } => {
            let (candidates_path, positions_path) =
                demo_data::generate(&out_dir, num_candidates, num_positions, seed)?;
            println!(
                "Wrote {} and {}",
                candidates_path.display(),
                positions_path.display()
            );
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    MatcherError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}

fn load_engine(candidates_file: &Path, positions_file: &Path) -> Result<MatchingEngine> {
    let candidates = loader::load_candidates(candidates_file)?;
    let positions = loader::load_positions(positions_file)?;
    MatchingEngine::with_data(candidates, positions)
}

fn resolve_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(value) => cli::parse_output_format(value).map_err(MatcherError::InvalidInput),
        None => Ok(config.output.format),
    }
}
