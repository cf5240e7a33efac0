use crate::parser::MatchRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const RESULT_COLUMNS: [&str; 6] = [
    "match_id",
    "round",
    "home_team",
    "away_team",
    "home_goals",
    "away_goals",
];

/// One line of the results CSV. Field order is column order.
///
/// Cells are kept as read so stored rows are written back unchanged; a column
/// missing from an older file comes back empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultRow {
    pub match_id: String,
    pub round: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: String,
    pub away_goals: String,
}

impl ResultRow {
    pub fn new(match_id: String, round: i64, record: MatchRecord) -> Self {
        Self {
            match_id,
            round: round.to_string(),
            home_team: record.home_team,
            away_team: record.away_team,
            home_goals: record.home_goals.to_string(),
            away_goals: record.away_goals.to_string(),
        }
    }
}

/// Rows already stored at `path`, or nothing when the file doesn't exist yet.
pub fn load_existing(path: &Path) -> Result<Vec<ResultRow>> {
    if !path.exists() {
        log::debug!("{} not found, starting empty", path.display());
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Can't open {}", path.display()))?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<ResultRow>, _>>()
        .with_context(|| format!("Can't read results from {}", path.display()))?;

    log::debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn match_number(match_id: &str, prefix: &str) -> Option<u64> {
    let digits = match_id.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match digits.parse() {
        Ok(num) => Some(num),
        Err(_) => {
            log::warn!("Ignore out of range match id {}", match_id);
            None
        }
    }
}

/// Highest number among ids of the form `<prefix><digits>`, 0 if there are none.
pub fn next_match_number(rows: &[ResultRow], prefix: &str) -> u64 {
    rows.iter()
        .filter_map(|row| match_number(&row.match_id, prefix))
        .max()
        .unwrap_or(0)
}

pub fn write_results(path: &Path, rows: &[ResultRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .with_context(|| format!("Can't create {}", path.display()))?;

    writer.write_record(&RESULT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
fn row(match_id: &str) -> ResultRow {
    ResultRow {
        match_id: match_id.into(),
        round: "1".into(),
        home_team: "Lions".into(),
        away_team: "Tigers".into(),
        home_goals: "3".into(),
        away_goals: "1".into(),
    }
}

#[test]
fn next_number() {
    assert_eq!(next_match_number(&[], "M"), 0);

    let rows = vec![row("M3"), row("M7"), row("M5")];
    assert_eq!(next_match_number(&rows, "M"), 7);
}

#[test]
fn next_number_is_anchored() {
    let rows = vec![
        row("M2"),
        row("X90"),
        row("MM40"),
        row("M12a"),
        row("M"),
        row("M+30"),
        row("xM50"),
    ];
    assert_eq!(next_match_number(&rows, "M"), 2);
    assert_eq!(next_match_number(&rows, "X"), 90);
    assert_eq!(next_match_number(&rows, "MM"), 40);
    assert_eq!(next_match_number(&rows, "Q"), 0);
}

#[test]
fn next_number_ignores_overflow() {
    let rows = vec![row("M4"), row("M99999999999999999999999")];
    assert_eq!(next_match_number(&rows, "M"), 4);
}

#[test]
fn missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let rows = load_existing(&dir.path().join("results.csv")).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn write_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    let rows = vec![row("M1"), row("M2")];

    write_results(&path, &rows).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "match_id,round,home_team,away_team,home_goals,away_goals\r\n\
         M1,1,Lions,Tigers,3,1\r\n\
         M2,1,Lions,Tigers,3,1\r\n"
    );
    assert_eq!(load_existing(&path).unwrap(), rows);
}

#[test]
fn load_ignores_extra_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    std::fs::write(
        &path,
        "match_id,round,home_team,away_team,home_goals,away_goals,venue\n\
         M1,1,Lions,Tigers,3,1,Arena\n",
    )
    .unwrap();

    assert_eq!(load_existing(&path).unwrap(), vec![row("M1")]);
}

#[test]
fn load_rejects_ragged_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    std::fs::write(
        &path,
        "match_id,round,home_team,away_team,home_goals,away_goals\nM1,1,Lions\n",
    )
    .unwrap();

    assert!(load_existing(&path).is_err());
}

#[test]
fn load_keeps_cells_as_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    std::fs::write(
        &path,
        "match_id,round,home_team,away_team,home_goals,away_goals\n\
         M1,05,A,B,01,+2\n\
         M2,1,C,D,,\n",
    )
    .unwrap();

    let rows = load_existing(&path).unwrap();
    assert_eq!(rows[0].round, "05");
    assert_eq!(rows[0].home_goals, "01");
    assert_eq!(rows[0].away_goals, "+2");
    assert_eq!(rows[1].home_goals, "");

    write_results(&path, &rows).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "match_id,round,home_team,away_team,home_goals,away_goals\r\n\
         M1,05,A,B,01,+2\r\n\
         M2,1,C,D,,\r\n"
    );
}

#[test]
fn load_fills_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    std::fs::write(&path, "match_id,home_team,away_team\nM4,Owls,Hawks\n").unwrap();

    let rows = load_existing(&path).unwrap();
    assert_eq!(
        rows,
        vec![ResultRow {
            match_id: "M4".into(),
            home_team: "Owls".into(),
            away_team: "Hawks".into(),
            ..ResultRow::default()
        }]
    );
    assert_eq!(next_match_number(&rows, "M"), 4);
}
