pub mod config;
pub mod extract;
pub mod parser;
pub mod results;

pub use crate::config::Config;
pub use crate::parser::{LineParser, MatchRecord, PatternParser};
pub use crate::results::ResultRow;

use anyhow::{anyhow, Context, Result};
use std::fmt;
use std::path::PathBuf;

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub results_csv: PathBuf,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported {} matches into {}",
            self.imported,
            self.results_csv.display()
        )
    }
}

/// Number `matches` after `start`, in order.
pub fn build_rows(
    matches: Vec<MatchRecord>,
    start: u64,
    round: i64,
    prefix: &str,
) -> Result<Vec<ResultRow>> {
    matches
        .into_iter()
        .zip(1u64..)
        .map(|(record, offset)| -> Result<ResultRow> {
            let num = start.checked_add(offset).ok_or_else(|| {
                anyhow!(
                    "Match id {}{} is the largest possible, can't number new matches",
                    prefix,
                    start
                )
            })?;
            Ok(ResultRow::new(format!("{}{}", prefix, num), round, record))
        })
        .collect()
}

pub fn run(config: &Config) -> Result<ImportSummary> {
    let parser = match &config.patterns {
        Some(path) => PatternParser::from_file(path)?,
        None => PatternParser::default(),
    };

    let text = std::fs::read_to_string(&config.text_file)
        .with_context(|| format!("Can't read {}", config.text_file.display()))?;
    let text = text.strip_prefix(BOM).unwrap_or(&text);

    let extraction = extract::extract_matches(&parser, text.lines())?;
    let skipped = extraction.skipped.len();

    let mut rows = results::load_existing(&config.results_csv)?;
    let start = results::next_match_number(&rows, &config.match_prefix);
    log::debug!("Numbering after {}{}", config.match_prefix, start);

    let new_rows = build_rows(extraction.matches, start, config.round, &config.match_prefix)?;
    let imported = new_rows.len();
    rows.extend(new_rows);

    results::write_results(&config.results_csv, &rows)?;

    Ok(ImportSummary {
        imported,
        skipped,
        results_csv: config.results_csv.clone(),
    })
}

#[test]
fn numbering() {
    let matches = vec![
        MatchRecord {
            home_team: "Lions".into(),
            away_team: "Tigers".into(),
            home_goals: 3,
            away_goals: 1,
        },
        MatchRecord {
            home_team: "Bears".into(),
            away_team: "Wolves".into(),
            home_goals: 0,
            away_goals: 0,
        },
    ];

    let rows = build_rows(matches, 7, -2, "M").unwrap();

    assert_eq!(
        rows.iter().map(|r| r.match_id.as_str()).collect::<Vec<_>>(),
        vec!["M8", "M9"]
    );
    assert!(rows.iter().all(|r| r.round == "-2"));
    assert_eq!(rows[1].home_team, "Bears");
    assert_eq!(rows[1].home_goals, "0");
}

#[test]
fn numbering_overflow() {
    let record = MatchRecord {
        home_team: "Lions".into(),
        away_team: "Tigers".into(),
        home_goals: 3,
        away_goals: 1,
    };

    let err = build_rows(vec![record.clone()], u64::MAX, 1, "M").unwrap_err();
    assert!(err.to_string().contains("M18446744073709551615"));

    let rows = build_rows(vec![record.clone()], u64::MAX - 1, 1, "M").unwrap();
    assert_eq!(rows[0].match_id, "M18446744073709551615");
    assert!(build_rows(vec![record.clone(), record], u64::MAX - 1, 1, "M").is_err());
}

#[test]
fn summary_message() {
    let summary = ImportSummary {
        imported: 2,
        skipped: 1,
        results_csv: PathBuf::from("data/results.csv"),
    };

    assert_eq!(summary.to_string(), "Imported 2 matches into data/results.csv");
}
