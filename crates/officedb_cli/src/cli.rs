//! Command-line surface of the officedb client.

use clap::{Args, Parser, Subcommand};
use officedb_rpc::config::parse_deadline_ms;
use officedb_rpc::{ConfigError, GatewayConfig};
use std::path::PathBuf;

/// Query and edit the office people/ticket/project store.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store file; overrides OFFICEDB_DB_PATH.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Per-call deadline in milliseconds, 0 disables; overrides OFFICEDB_DEADLINE_MS.
    #[arg(long, global = true)]
    pub deadline_ms: Option<String>,

    /// Absolute log directory; overrides OFFICEDB_LOG_DIR.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error; overrides OFFICEDB_LOG_LEVEL.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print responses as JSON instead of text lines.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Insert the demo people, tickets and projects.
    Seed,
    /// List or look up people.
    People(PeopleArgs),
    /// List or look up tickets.
    Tickets(TicketArgs),
    /// List or look up projects.
    Projects(ProjectArgs),
    /// Run the create/get/update/delete walkthrough and print each step.
    Demo,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PeopleArgs {
    /// Lower age bound, inclusive.
    #[arg(long)]
    pub min_age: Option<i32>,

    /// Upper age bound, inclusive.
    #[arg(long)]
    pub max_age: Option<i32>,

    /// People holding this ticket number.
    #[arg(long, conflicts_with_all = ["min_age", "max_age", "name", "id"])]
    pub ticket: Option<i32>,

    /// One person with this exact name.
    #[arg(long, conflicts_with_all = ["min_age", "max_age", "id"])]
    pub name: Option<String>,

    /// One person by store id.
    #[arg(long, conflicts_with_all = ["min_age", "max_age"])]
    pub id: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TicketArgs {
    /// One ticket with this number.
    #[arg(long, conflicts_with = "owner")]
    pub number: Option<i32>,

    /// One ticket owned by this person.
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// One project listing this collaborator.
    #[arg(long, conflicts_with = "members_of")]
    pub collaborator: Option<String>,

    /// Collaborator names of the project with this name.
    #[arg(long)]
    pub members_of: Option<String>,
}

impl Cli {
    /// Layers command-line overrides on top of `config`.
    pub fn apply_overrides(
        &self,
        mut config: GatewayConfig,
    ) -> Result<GatewayConfig, ConfigError> {
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(raw) = &self.deadline_ms {
            config.default_deadline = parse_deadline_ms(raw)?;
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use officedb_rpc::GatewayConfig;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn parses_people_range_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "officedb",
            "people",
            "--min-age",
            "25",
            "--max-age",
            "40",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::People(args) => {
                assert_eq!(args.min_age, Some(25));
                assert_eq!(args.max_age, Some(40));
                assert_eq!(args.ticket, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn conflicting_people_lookups_are_rejected() {
        let result =
            Cli::try_parse_from(["officedb", "people", "--ticket", "100", "--name", "Ana"]);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_replace_environment_values() {
        let cli = Cli::try_parse_from([
            "officedb",
            "--db",
            "/tmp/other.sqlite3",
            "--deadline-ms",
            "0",
            "--log-level",
            "warn",
            "seed",
        ])
        .unwrap();
        let config = cli.apply_overrides(GatewayConfig::default()).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.sqlite3"));
        assert_eq!(config.default_deadline, None);
        assert_eq!(config.log_level, "warn");

        let untouched = Cli::try_parse_from(["officedb", "demo"])
            .unwrap()
            .apply_overrides(GatewayConfig::default())
            .unwrap();
        assert_eq!(untouched.default_deadline, Some(Duration::from_millis(5_000)));
    }

    #[test]
    fn malformed_deadline_override_is_an_error() {
        let cli = Cli::try_parse_from(["officedb", "--deadline-ms", "later", "seed"]).unwrap();
        assert!(cli.apply_overrides(GatewayConfig::default()).is_err());
    }
}
