//! Seeded demo dataset generation
//!
//! Writes a candidate/position CSV pair drawn from fixed pools. The RNG is
//! seeded, so the same seed always produces the same files.

use crate::engine::profiles::{Candidate, Position};
use crate::error::Result;
use log::info;
use rand::prelude::SliceRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

const CITY_STATE_MAP: [(&str, &str); 8] = [
    ("Bangalore", "Karnataka"),
    ("Pune", "Maharashtra"),
    ("Hyderabad", "Telangana"),
    ("Delhi", "Delhi"),
    ("Mumbai", "Maharashtra"),
    ("Chennai", "Tamil Nadu"),
    ("Noida", "Uttar Pradesh"),
    ("Gurgaon", "Haryana"),
];

const DURATIONS: [&str; 3] = ["2 Months", "3 Months", "6 Months"];

const BRANCHES: [&str; 9] = [
    "Computer Science",
    "IT",
    "Electronics",
    "Mechanical",
    "Civil",
    "Electrical",
    "Chemical",
    "Biotechnology",
    "Aerospace",
];

const SKILLS_POOL: [&str; 24] = [
    "Python",
    "Machine Learning",
    "Data Analysis",
    "SQL",
    "Scikit-learn",
    "Web Development",
    "React",
    "Node.js",
    "JavaScript",
    "MongoDB",
    "C++",
    "Microcontrollers",
    "Embedded Systems",
    "IoT",
    "Java",
    "Cloud Computing",
    "AWS",
    "Azure",
    "DevOps",
    "CAD",
    "SolidWorks",
    "MATLAB",
    "Ansys",
    "AutoCAD",
];

const COMPANIES: [&str; 12] = [
    "Google",
    "Microsoft",
    "Amazon",
    "Tata Motors",
    "Intel",
    "Larsen & Toubro",
    "NVIDIA",
    "Flipkart",
    "Reliance Jio",
    "Zomato",
    "Siemens",
    "Salesforce",
];

const DOMAINS: [&str; 10] = [
    "AI Research",
    "Software Development",
    "Cloud Engineering",
    "Mechanical Design",
    "Chip Design",
    "Civil Engineering",
    "Deep Learning",
    "Data Science",
    "Network Engineering",
    "Backend Development",
];

const FIRST_NAMES: [&str; 12] = [
    "Aarav", "Asha", "Dev", "Diya", "Ishaan", "Kavya", "Meera", "Nikhil", "Priya", "Rahul",
    "Sanya", "Vikram",
];

const LAST_NAMES: [&str; 12] = [
    "Sharma", "Patel", "Rao", "Iyer", "Khan", "Gupta", "Nair", "Singh", "Mehta", "Joshi", "Das",
    "Verma",
];

/// Generate `candidates.csv` and `positions.csv` under `out_dir` and return
/// their paths.
pub fn generate(
    out_dir: &Path,
    num_candidates: usize,
    num_positions: usize,
    seed: u64,
) -> Result<(PathBuf, PathBuf)> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut locations: Vec<&str> = CITY_STATE_MAP.iter().map(|(city, _)| *city).collect();
    locations.push("Remote");

    let candidates_path = out_dir.join("candidates.csv");
    let mut writer = csv::Writer::from_path(&candidates_path)?;
    for offset in 0..num_candidates {
        let record = Candidate {
            id: 101 + offset as u32,
            name: format!(
                "{} {}",
                FIRST_NAMES.choose(&mut rng).unwrap(),
                LAST_NAMES.choose(&mut rng).unwrap()
            ),
            branch: BRANCHES.choose(&mut rng).unwrap().to_string(),
            cgpa: (rng.gen_range(7.0_f32..10.0) * 100.0).round() / 100.0,
            location_preference: locations.choose(&mut rng).unwrap().to_string(),
            skills: sample_skills(&mut rng, 4, 7),
        };
        writer.serialize(record)?;
    }
    writer.flush()?;

    let positions_path = out_dir.join("positions.csv");
    let mut writer = csv::Writer::from_path(&positions_path)?;
    for offset in 0..num_positions {
        let location = *locations.choose(&mut rng).unwrap();
        let state = CITY_STATE_MAP
            .iter()
            .find(|(city, _)| *city == location)
            .map(|(_, state)| *state)
            .unwrap_or("N/A");
        let record = Position {
            id: 5001 + offset as u32,
            company: COMPANIES.choose(&mut rng).unwrap().to_string(),
            domain: DOMAINS.choose(&mut rng).unwrap().to_string(),
            location: location.to_string(),
            state: state.to_string(),
            stipend: rng.gen_range(15..=80) * 1000,
            duration: DURATIONS.choose(&mut rng).unwrap().to_string(),
            required_skills: sample_skills(&mut rng, 3, 5),
        };
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(
        "wrote {} candidates and {} positions to {}",
        num_candidates,
        num_positions,
        out_dir.display()
    );
    Ok((candidates_path, positions_path))
}

fn sample_skills(rng: &mut StdRng, min: usize, max: usize) -> String {
    let count = rng.gen_range(min..=max);
    SKILLS_POOL
        .choose_multiple(rng, count)
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}
