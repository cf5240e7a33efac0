use anyhow::{bail, Context, Result};
use conquer_once::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::path::Path;

/// One game recognised in a line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
}

/// Recognises a match description in a single line.
pub trait LineParser {
    fn parse_line(&self, line: &str) -> Option<MatchRecord>;
}

impl<F> LineParser for F
where
    F: Fn(&str) -> Option<MatchRecord>,
{
    fn parse_line(&self, line: &str) -> Option<MatchRecord> {
        self(line)
    }
}

const GROUPS: [&str; 4] = ["home", "away", "home_goals", "away_goals"];

// "Lions 3-1 Tigers", "1. Lions 3 : 1 Tigers"
static SCORE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[-*•]\s*|\d+[.)]\s+)?(?P<home>.+?)\s+(?P<home_goals>\d+)\s*[-:–]\s*(?P<away_goals>\d+)\s+(?P<away>.+?)$",
    )
    .unwrap()
});
// "Lions vs Tigers 3-1", "Lions v. Tigers: 3-1"
static VERSUS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[-*•]\s*|\d+[.)]\s+)?(?P<home>.+?)\s+(?i:versus|vs?\.?)\s+(?P<away>.+?)(?:\s*[,:]\s*|\s+)(?P<home_goals>\d+)\s*[-:–]\s*(?P<away_goals>\d+)$",
    )
    .unwrap()
});

#[derive(Deserialize)]
struct PatternFile {
    #[serde(with = "serde_regex")]
    patterns: Vec<Regex>,
}

/// Regex driven [`LineParser`]. Patterns are tried in order and the first hit wins.
#[derive(Debug, Clone)]
pub struct PatternParser {
    patterns: Vec<Regex>,
}

impl Default for PatternParser {
    fn default() -> Self {
        Self {
            patterns: vec![Regex::clone(&SCORE_LINE), Regex::clone(&VERSUS_LINE)],
        }
    }
}

impl PatternParser {
    /// Custom patterns go in front of the built-in ones.
    pub fn with_patterns(custom: Vec<Regex>) -> Result<Self> {
        for pattern in &custom {
            let names: Vec<&str> = pattern.capture_names().flatten().collect();
            if let Some(missing) = GROUPS.iter().find(|&&group| !names.contains(&group)) {
                bail!(
                    "Pattern `{}` has no named group `{}`",
                    pattern.as_str(),
                    missing
                );
            }
        }

        let mut patterns = custom;
        patterns.extend(Self::default().patterns);
        Ok(Self { patterns })
    }

    /// Load extra patterns from a YAML file of the form `patterns: [<regex>, ...]`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Can't open pattern file {}", path.display()))?;
        let PatternFile { patterns } = serde_yaml::from_reader(file)
            .with_context(|| format!("Invalid pattern file {}", path.display()))?;
        log::debug!(
            "Loaded {} custom patterns from {}",
            patterns.len(),
            path.display()
        );
        Self::with_patterns(patterns)
    }
}

fn team(caps: &Captures, name: &str) -> Option<String> {
    let team = caps.name(name)?.as_str().trim();
    if team.is_empty() {
        None
    } else {
        Some(team.into())
    }
}

fn goals(caps: &Captures, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().trim().parse().ok()
}

impl LineParser for PatternParser {
    fn parse_line(&self, line: &str) -> Option<MatchRecord> {
        self.patterns.iter().find_map(|pattern| {
            let caps = pattern.captures(line)?;
            Some(MatchRecord {
                home_team: team(&caps, "home")?,
                away_team: team(&caps, "away")?,
                home_goals: goals(&caps, "home_goals")?,
                away_goals: goals(&caps, "away_goals")?,
            })
        })
    }
}

#[cfg(test)]
fn record(home: &str, hg: u32, ag: u32, away: &str) -> MatchRecord {
    MatchRecord {
        home_team: home.into(),
        away_team: away.into(),
        home_goals: hg,
        away_goals: ag,
    }
}

#[test]
fn score_lines() {
    let parser = PatternParser::default();

    assert_eq!(
        parser.parse_line("Lions 3-1 Tigers"),
        Some(record("Lions", 3, 1, "Tigers"))
    );
    assert_eq!(
        parser.parse_line("Real Madrid 2 : 2 Atletico Madrid"),
        Some(record("Real Madrid", 2, 2, "Atletico Madrid"))
    );
    assert_eq!(
        parser.parse_line("3. FC 1860 1 – 0 Rovers"),
        Some(record("FC 1860", 1, 0, "Rovers"))
    );
    assert_eq!(
        parser.parse_line("- Bears 0-0 Wolves"),
        Some(record("Bears", 0, 0, "Wolves"))
    );
}

#[test]
fn versus_lines() {
    let parser = PatternParser::default();

    assert_eq!(
        parser.parse_line("Lions vs Tigers 3-1"),
        Some(record("Lions", 3, 1, "Tigers"))
    );
    assert_eq!(
        parser.parse_line("Lions V. Tigers: 0:2"),
        Some(record("Lions", 0, 2, "Tigers"))
    );
}

#[test]
fn rejects_non_matches() {
    let parser = PatternParser::default();

    assert_eq!(parser.parse_line("not a match line"), None);
    assert_eq!(parser.parse_line("Round 5"), None);
    assert_eq!(parser.parse_line("3-1"), None);
    assert_eq!(parser.parse_line("Lions 99999999999-1 Tigers"), None);
}

#[test]
fn custom_patterns_first() {
    let custom = Regex::new(
        r"^(?P<home>\w+) beat (?P<away>\w+) (?P<home_goals>\d+) to (?P<away_goals>\d+)$",
    )
    .unwrap();
    let parser = PatternParser::with_patterns(vec![custom]).unwrap();

    assert_eq!(
        parser.parse_line("Lions beat Tigers 3 to 1"),
        Some(record("Lions", 3, 1, "Tigers"))
    );
    assert_eq!(
        parser.parse_line("Bears 0-0 Wolves"),
        Some(record("Bears", 0, 0, "Wolves"))
    );
}

#[test]
fn custom_pattern_needs_all_groups() {
    let custom = Regex::new(r"^(?P<home>\w+) (?P<home_goals>\d+)$").unwrap();
    let err = PatternParser::with_patterns(vec![custom]).unwrap_err();

    assert!(err.to_string().contains("`away`"));
}

#[test]
fn pattern_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "patterns:\n  - '^(?P<away>\\w+) lost to (?P<home>\\w+) (?P<away_goals>\\d+)-(?P<home_goals>\\d+)$'"
    )
    .unwrap();

    let parser = PatternParser::from_file(file.path()).unwrap();

    assert_eq!(
        parser.parse_line("Tigers lost to Lions 1-3"),
        Some(record("Lions", 3, 1, "Tigers"))
    );
}
