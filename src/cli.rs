use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Hierarchical task tracker.
/// Storage defaults to ~/.tasktree/tasks.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "tt", version, about = "Hierarchical task tracker with live progress")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true, env = "TASKTREE_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_db_flag_is_global() {
        let cli = Cli::try_parse_from(["tt", "list", "--db", "/tmp/x.json"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.json")));
    }

    #[test]
    fn test_status_values_use_kebab_case_names() {
        let cli = Cli::try_parse_from(["tt", "add", "Notes", "--parent", "1", "--status", "in-qa"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Add { status: Some(crate::fields::Status::InQa), parent: Some(1), .. }
        ));
        assert!(Cli::try_parse_from(["tt", "add", "Notes", "--status", "qa-pending"]).is_err());
    }
}
