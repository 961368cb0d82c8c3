use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "matcher",
    version,
    about = "Scores resumes against job descriptions and ranks job matches",
    rename_all = "kebab"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one resume against one job description.
    Score {
        #[arg(long, short = 'r', value_name = "FILE")]
        resume: PathBuf,
        #[arg(long, short = 'j', value_name = "FILE")]
        job: PathBuf,
        #[arg(long, value_enum, default_value_t = ScoreMode::Composite)]
        mode: ScoreMode,
    },
    /// Show the skills, experience and education detected in a document.
    Profile {
        #[arg(value_name = "FILE")]
        document: PathBuf,
    },
    /// List or search postings in a job catalog (.csv or .json).
    Jobs {
        #[arg(long, short = 'c', value_name = "FILE")]
        catalog: PathBuf,
        #[arg(long, short = 'q')]
        query: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, value_name = "N", default_value_t = 0)]
        skip: usize,
        #[arg(long, value_name = "N", default_value_t = 20)]
        limit: usize,
        /// Max rows imported from a CSV catalog.
        #[arg(long, value_name = "N", default_value_t = 100)]
        import_limit: usize,
    },
    /// Rank catalog postings for a resume.
    Rank {
        #[arg(long, short = 'r', value_name = "FILE")]
        resume: PathBuf,
        #[arg(long, short = 'c', value_name = "FILE")]
        catalog: PathBuf,
        /// Overrides MATCH_TOP_N.
        #[arg(long, value_name = "N")]
        top: Option<usize>,
        #[arg(long, value_name = "N", default_value_t = 100)]
        import_limit: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScoreMode {
    /// Weighted skill / experience / education / semantic score.
    Composite,
    /// Skill overlap only.
    Baseline,
    /// TF-IDF cosine over the two texts.
    Lexical,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_score_with_mode() {
        let cli = Cli::try_parse_from([
            "matcher", "score", "--resume", "r.txt", "--job", "j.txt", "--mode", "lexical",
        ])
        .unwrap();
        match cli.command {
            Command::Score { mode, .. } => assert_eq!(mode, ScoreMode::Lexical),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_rank_defaults() {
        let cli = Cli::try_parse_from(["matcher", "rank", "-r", "r.pdf", "-c", "jobs.csv"]).unwrap();
        match cli.command {
            Command::Rank { top, import_limit, .. } => {
                assert_eq!(top, None);
                assert_eq!(import_limit, 100);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
