use match_import::{run, Config};
use std::fs;
use std::path::Path;

fn config(text_file: &Path, results_csv: &Path, round: i64, prefix: &str) -> Config {
    Config {
        text_file: text_file.into(),
        results_csv: results_csv.into(),
        round,
        match_prefix: prefix.into(),
        patterns: None,
    }
}

fn existing(path: &Path, rows: &str) {
    fs::write(
        path,
        format!(
            "match_id,round,home_team,away_team,home_goals,away_goals\n{}",
            rows
        ),
    )
    .unwrap();
}

fn csv_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn imports_into_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("week5.txt");
    let results = dir.path().join("results.csv");
    fs::write(&text, "Lions 3-1 Tigers\n\nnot a match line\nBears 0-0 Wolves\n").unwrap();

    let summary = run(&config(&text, &results, 5, "M")).unwrap();

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        summary.to_string(),
        format!("Imported 2 matches into {}", results.display())
    );
    assert_eq!(
        csv_lines(&results),
        vec![
            "match_id,round,home_team,away_team,home_goals,away_goals",
            "M1,5,Lions,Tigers,3,1",
            "M2,5,Bears,Wolves,0,0",
        ]
    );
}

#[test]
fn appends_after_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("week6.txt");
    let results = dir.path().join("results.csv");
    fs::write(
        &results,
        "match_id,round,home_team,away_team,home_goals,away_goals\n\
         M7,4,Sharks,\"Eagles, FC\",2,2\n\
         X12,4,Owls,Hawks,1,0\n\
         M3,4,Foxes,Bulls,0,1\n",
    )
    .unwrap();
    fs::write(&text, "\u{feff}Lions vs Tigers 4-2\r\nBears 1 : 0 Wolves\r\n").unwrap();

    run(&config(&text, &results, 6, "M")).unwrap();

    assert_eq!(
        csv_lines(&results),
        vec![
            "match_id,round,home_team,away_team,home_goals,away_goals",
            "M7,4,Sharks,\"Eagles, FC\",2,2",
            "X12,4,Owls,Hawks,1,0",
            "M3,4,Foxes,Bulls,0,1",
            "M8,6,Lions,Tigers,4,2",
            "M9,6,Bears,Wolves,1,0",
        ]
    );
}

#[test]
fn nothing_parsed_leaves_csv_alone() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("notes.txt");
    let results = dir.path().join("results.csv");
    let existing = "match_id,round,home_team,away_team,home_goals,away_goals\nM1,1,A,B,1,1\n";
    fs::write(&results, existing).unwrap();
    fs::write(&text, "Round 7\n\nkick-off at noon\n").unwrap();

    let err = run(&config(&text, &results, 7, "M")).unwrap_err();

    assert_eq!(
        err.to_string(),
        "No matches were found in the provided text file."
    );
    assert_eq!(fs::read_to_string(&results).unwrap(), existing);
}

#[test]
fn nothing_parsed_creates_no_csv() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("empty.txt");
    let results = dir.path().join("results.csv");
    fs::write(&text, "\n   \n").unwrap();

    assert!(run(&config(&text, &results, 1, "M")).is_err());
    assert!(!results.exists());
}

#[test]
fn custom_patterns() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("cup.txt");
    let results = dir.path().join("results.csv");
    let patterns = dir.path().join("patterns.yml");
    fs::write(
        &patterns,
        "patterns:\n  - '^(?P<home>.+?) beat (?P<away>.+?) by (?P<home_goals>\\d+) to (?P<away_goals>\\d+)$'\n",
    )
    .unwrap();
    fs::write(&text, "Lions beat Tigers by 2 to 0\nBears 1-1 Wolves\n").unwrap();

    let mut config = config(&text, &results, 1, "CUP");
    config.patterns = Some(patterns);
    run(&config).unwrap();

    assert_eq!(
        csv_lines(&results)[1..],
        [
            "CUP1,1,Lions,Tigers,2,0".to_string(),
            "CUP2,1,Bears,Wolves,1,1".to_string(),
        ]
    );
}

#[test]
fn missing_text_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = run(&config(
        &dir.path().join("missing.txt"),
        &dir.path().join("results.csv"),
        1,
        "M",
    ))
    .unwrap_err();

    assert!(err.to_string().starts_with("Can't read"));
}

#[test]
fn existing_rows_written_back_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("week2.txt");
    let results = dir.path().join("results.csv");
    existing(&results, "M1,05,A,B,01,+2\nM2,1,C,D,,\n");
    fs::write(&text, "Lions 3-1 Tigers\n").unwrap();

    run(&config(&text, &results, 5, "M")).unwrap();

    assert_eq!(
        fs::read_to_string(&results).unwrap(),
        "match_id,round,home_team,away_team,home_goals,away_goals\r\n\
         M1,05,A,B,01,+2\r\n\
         M2,1,C,D,,\r\n\
         M3,5,Lions,Tigers,3,1\r\n"
    );
}

#[test]
fn largest_match_id_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("week2.txt");
    let results = dir.path().join("results.csv");
    existing(&results, "M18446744073709551615,1,A,B,1,0\n");
    let before = fs::read_to_string(&results).unwrap();
    fs::write(&text, "Lions 3-1 Tigers\n").unwrap();

    let err = run(&config(&text, &results, 2, "M")).unwrap_err();

    assert!(err.to_string().contains("can't number new matches"));
    assert_eq!(fs::read_to_string(&results).unwrap(), before);
}
