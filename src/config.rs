use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "match-import",
    about = "Append matches described in a text file to a results CSV."
)]
pub struct Config {
    /// Plain-text file with match lines
    #[structopt(parse(from_os_str))]
    pub text_file: PathBuf,

    /// CSV file to create or update
    #[structopt(parse(from_os_str))]
    pub results_csv: PathBuf,

    /// Round number assigned to every imported match
    #[structopt(long, allow_hyphen_values = true)]
    pub round: i64,

    /// Prefix for generated match_id values
    #[structopt(long, default_value = "M")]
    pub match_prefix: String,

    /// YAML file with extra line patterns, tried before the built-in ones
    #[structopt(long, parse(from_os_str))]
    pub patterns: Option<PathBuf>,
}

#[test]
fn parse_args() {
    let config =
        Config::from_iter_safe(&["match-import", "week5.txt", "results.csv", "--round", "5"])
            .unwrap();

    assert_eq!(config.text_file, PathBuf::from("week5.txt"));
    assert_eq!(config.results_csv, PathBuf::from("results.csv"));
    assert_eq!(config.round, 5);
    assert_eq!(config.match_prefix, "M");
    assert_eq!(config.patterns, None);

    let config = Config::from_iter_safe(&[
        "match-import",
        "week5.txt",
        "results.csv",
        "--round",
        "5",
        "--match-prefix",
        "CUP-",
        "--patterns",
        "lines.yml",
    ])
    .unwrap();

    assert_eq!(config.match_prefix, "CUP-");
    assert_eq!(config.patterns, Some(PathBuf::from("lines.yml")));
}

#[test]
fn negative_round() {
    let config =
        Config::from_iter_safe(&["match-import", "a.txt", "b.csv", "--round", "-1"]).unwrap();
    assert_eq!(config.round, -1);
}

#[test]
fn round_is_required() {
    assert!(Config::from_iter_safe(&["match-import", "week5.txt", "results.csv"]).is_err());
    assert!(
        Config::from_iter_safe(&["match-import", "a.txt", "b.csv", "--round", "five"]).is_err()
    );
}
