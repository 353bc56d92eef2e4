//! Configuration commands.

use std::path::Path;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Dumps the effective configuration as TOML.
pub fn dump(config: &CliConfig, path: &Path) -> CliResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    Ok(format!("# config.toml ({})\n{}", path.display(), toml_str))
}

/// Validates the configuration.
pub fn validate(config: &CliConfig) -> CliResult<String> {
    config.validate()?;
    Ok("Configuration is valid.".to_string())
}

/// Shows the configuration file path and the schedule file it resolves to.
pub fn path(config: &CliConfig, config_path: &Path, data: Option<&Path>) -> CliResult<String> {
    Ok(format!(
        "config: {}\ndata: {}",
        config_path.display(),
        config.store_path(data).display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn dump_includes_path_and_sections() {
        let output = dump(&CliConfig::default(), Path::new("/etc/consultdesk.toml")).unwrap();
        assert!(output.starts_with("# config.toml (/etc/consultdesk.toml)\n"));
        assert!(output.contains("[engine]"));
        assert!(output.contains("upcoming_limit = 10"));
    }

    #[test]
    fn validate_reports() {
        assert_eq!(
            validate(&CliConfig::default()).unwrap(),
            "Configuration is valid."
        );

        let mut config = CliConfig::default();
        config.engine.max_occurrences = 0;
        assert!(matches!(validate(&config), Err(CliError::Config(_))));
    }

    #[test]
    fn path_shows_resolved_store() {
        let mut config = CliConfig::default();
        config.store.path = Some(PathBuf::from("/srv/schedules.json"));
        let output = path(&config, Path::new("/etc/c.toml"), None).unwrap();
        assert_eq!(output, "config: /etc/c.toml\ndata: /srv/schedules.json");
    }
}
