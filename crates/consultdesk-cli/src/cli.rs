//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// consultdesk - Consultancy schedules by date range
#[derive(Debug, Parser)]
#[command(name = "consultdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "CONSULTDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the JSON schedule file (overrides the configuration)
    #[arg(long, global = true, env = "CONSULTDESK_DATA")]
    pub data: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List schedules, optionally within a date range
    List(ListArgs),

    /// Show the next occurrence of a recurring schedule
    Next {
        /// Schedule id
        id: String,

        /// Reference date (defaults to now)
        #[arg(long)]
        after: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Expand every schedule into occurrences within a date range
    Agenda {
        /// Range start (RFC 3339, `YYYY-MM-DD HH:MM[:SS]` or `YYYY-MM-DD`)
        #[arg(long)]
        from: String,

        /// Range end
        #[arg(long)]
        to: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the next occurrence of every schedule
    Upcoming {
        /// Maximum number of entries (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `list`.
#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Range start; requires --to
    #[arg(long)]
    pub from: Option<String>,

    /// Range end; requires --from
    #[arg(long)]
    pub to: Option<String>,

    /// Only schedules with this status
    #[arg(long)]
    pub status: Option<String>,

    /// Only schedules for this client
    #[arg(long)]
    pub client: Option<String>,

    /// Only schedules for this project
    #[arg(long)]
    pub project: Option<String>,

    /// Only schedules for this service
    #[arg(long)]
    pub service: Option<String>,

    /// Only schedules assigned to this user
    #[arg(long)]
    pub assignee: Option<String>,

    /// Case-insensitive text in title, description or location
    #[arg(long)]
    pub search: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the current configuration
    Dump,

    /// Validate the configuration
    Validate,

    /// Show the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list_with_range() {
        let cli = Cli::try_parse_from([
            "consultdesk",
            "list",
            "--from",
            "2025-03-01",
            "--to",
            "2025-03-31",
            "--client",
            "acme",
            "--json",
        ])
        .unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.from.as_deref(), Some("2025-03-01"));
        assert_eq!(args.to.as_deref(), Some("2025-03-31"));
        assert_eq!(args.client.as_deref(), Some("acme"));
        assert!(args.json);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["consultdesk", "upcoming", "-v", "--data", "/tmp/s.json"])
            .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(
            cli.command,
            Command::Upcoming {
                limit: None,
                json: false
            }
        ));
    }

    #[test]
    fn agenda_requires_both_bounds() {
        assert!(Cli::try_parse_from(["consultdesk", "agenda", "--from", "2025-03-01"]).is_err());
    }

    #[test]
    fn parse_config_action() {
        let cli = Cli::try_parse_from(["consultdesk", "config", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Validate
            }
        ));
    }
}
