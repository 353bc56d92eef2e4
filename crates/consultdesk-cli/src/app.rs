//! Command dispatch.

use chrono::{DateTime, Utc};
use consultdesk_core::ScheduleRangeEngine;
use consultdesk_store::{JsonFileStore, ScheduleService};

use crate::cli::{Cli, Command, ConfigAction};
use crate::commands::{config as config_cmd, schedules};
use crate::config::CliConfig;
use crate::error::CliResult;

/// Loads configuration and runs one command, returning its output.
///
/// Schedule commands refuse to run on a configuration that fails
/// [`CliConfig::validate`]; `config` subcommands still work so the file
/// can be inspected.
pub fn run(cli: Cli, now: DateTime<Utc>) -> CliResult<String> {
    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);
    let config = match cli.config {
        Some(ref path) => CliConfig::load_from(path)?,
        None => CliConfig::load()?,
    };

    let service = || -> CliResult<_> {
        config.validate()?;
        Ok(ScheduleService::new(
            JsonFileStore::new(config.store_path(cli.data.as_deref())),
            ScheduleRangeEngine::new(config.engine.to_engine_config()),
        ))
    };

    match cli.command {
        Command::List(ref args) => schedules::list(&service()?, &config, args),
        Command::Next {
            ref id,
            ref after,
            json,
        } => schedules::next(&service()?, &config, id, after.as_deref(), json, now),
        Command::Agenda {
            ref from,
            ref to,
            json,
        } => schedules::agenda(&service()?, &config, from, to, json),
        Command::Upcoming { limit, json } => {
            schedules::upcoming(&service()?, &config, limit, json, now)
        }
        Command::Config { ref action } => match action {
            ConfigAction::Dump => config_cmd::dump(&config, &config_path),
            ConfigAction::Validate => config_cmd::validate(&config),
            ConfigAction::Path => config_cmd::path(&config, &config_path, cli.data.as_deref()),
        },
    }
}
