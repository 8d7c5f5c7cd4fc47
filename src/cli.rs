//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slotword")]
#[command(about = "Spell the word behind the picture from a pool of letter tiles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Progress database (defaults to the OS data directory)
    #[arg(long, conflicts_with = "memory")]
    pub db: Option<PathBuf>,

    /// Keep progress in memory only
    #[arg(long)]
    pub memory: bool,

    /// Puzzle catalog JSON to use instead of the built-in one
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Seed for tile shuffling and hints
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log file (defaults to slotword.log in the data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["slotword"]).unwrap();
        assert!(cli.db.is_none());
        assert!(!cli.memory);
        assert!(cli.seed.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["slotword", "--seed", "42", "-c", "cats.json"]).unwrap();
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.catalog, Some(PathBuf::from("cats.json")));
    }

    #[test]
    fn test_db_conflicts_with_memory() {
        assert!(Cli::try_parse_from(["slotword", "--db", "x.db", "--memory"]).is_err());
    }
}
