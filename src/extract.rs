use crate::parser::{LineParser, MatchRecord};
use anyhow::{bail, Result};

const SKIPPED_PREVIEW: usize = 3;

#[derive(Debug, Default)]
pub struct Extraction {
    pub matches: Vec<MatchRecord>,
    /// Trimmed text of non-blank lines the parser didn't recognise
    pub skipped: Vec<String>,
}

impl Extraction {
    fn preview(&self) -> String {
        let mut preview = self
            .skipped
            .iter()
            .take(SKIPPED_PREVIEW)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if self.skipped.len() > SKIPPED_PREVIEW {
            preview.push_str("...");
        }
        preview
    }

    pub fn skipped_message(&self) -> String {
        format!(
            "Skipped {} non-match lines: {}",
            self.skipped.len(),
            self.preview()
        )
    }
}

pub fn scan_lines<'a>(
    parser: &impl LineParser,
    lines: impl IntoIterator<Item = &'a str>,
) -> Extraction {
    let mut ret = Extraction::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parser.parse_line(line) {
            Some(record) => ret.matches.push(record),
            None => {
                log::debug!("no match: [{}]", line);
                ret.skipped.push(line.into());
            }
        }
    }

    ret
}

/// Like [`scan_lines`], but warns about skipped lines and fails when nothing matched.
pub fn extract_matches<'a>(
    parser: &impl LineParser,
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<Extraction> {
    let extraction = scan_lines(parser, lines);

    if !extraction.skipped.is_empty() {
        log::warn!("{}", extraction.skipped_message());
    }

    if extraction.matches.is_empty() {
        bail!("No matches were found in the provided text file.");
    }

    Ok(extraction)
}

#[test]
fn keeps_order_and_skips_blanks() {
    let parser = crate::parser::PatternParser::default();
    let lines = vec![
        "Lions 3-1 Tigers",
        "",
        "   ",
        "  not a match line  ",
        "Bears 0-0 Wolves",
    ];

    let extraction = extract_matches(&parser, lines).unwrap();

    let teams: Vec<_> = extraction
        .matches
        .iter()
        .map(|m| (m.home_team.as_str(), m.away_team.as_str()))
        .collect();
    assert_eq!(teams, vec![("Lions", "Tigers"), ("Bears", "Wolves")]);
    assert_eq!(extraction.skipped, vec!["not a match line".to_string()]);
    assert_eq!(
        extraction.skipped_message(),
        "Skipped 1 non-match lines: not a match line"
    );
}

#[test]
fn uses_given_parser() {
    let parser = |line: &str| {
        let (home, away) = line.split_at(line.find('/')?);
        Some(MatchRecord {
            home_team: home.into(),
            away_team: away[1..].into(),
            home_goals: 1,
            away_goals: 2,
        })
    };

    let extraction = extract_matches(&parser, "A/B\nnope\nC/D".lines()).unwrap();

    assert_eq!(extraction.matches.len(), 2);
    assert_eq!(extraction.matches[1].home_team, "C");
    assert_eq!(extraction.matches[1].away_team, "D");
    assert_eq!(extraction.skipped, vec!["nope".to_string()]);
}

#[test]
fn nothing_matched() {
    let parser = crate::parser::PatternParser::default();

    let err = extract_matches(&parser, vec!["", "hello", "world"]).unwrap_err();

    assert_eq!(
        err.to_string(),
        "No matches were found in the provided text file."
    );
}

#[test]
fn preview_truncates() {
    let extraction = Extraction {
        matches: Vec::new(),
        skipped: vec!["a".into(), "b".into(), "c".into(), "d".into()],
    };
    assert_eq!(extraction.preview(), "a, b, c...");
    assert_eq!(
        extraction.skipped_message(),
        "Skipped 4 non-match lines: a, b, c..."
    );

    let extraction = Extraction {
        matches: Vec::new(),
        skipped: vec!["a".into()],
    };
    assert_eq!(extraction.preview(), "a");
}
