//! Output formatting utilities
//!
//! This module provides formatters for CLI output in both human-readable
//! and JSON formats. It also handles progress spinners and confirmation
//! prompts.

mod formatter;
mod progress;
mod prompt;

pub use formatter::Formatter;
pub use progress::ProgressBar;
pub use prompt::confirm;

use s3t_core::Config;

use crate::commands::Cli;

/// Output configuration derived from CLI flags and config defaults
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable progress spinners
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

impl OutputConfig {
    /// Combine command line flags with the `[defaults]` table
    ///
    /// Flags can only switch features off; the config decides the starting point.
    pub fn from_flags(cli: &Cli, config: &Config) -> Self {
        let defaults = &config.defaults;
        Self {
            json: cli.json || defaults.output == "json",
            no_color: cli.no_color || defaults.color == "never",
            no_progress: cli.no_progress || !defaults.progress,
            quiet: cli.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from(["s3t", "--json", "--no-color", "list-buckets"]).unwrap();
        let config = OutputConfig::from_flags(&cli, &Config::default());
        assert!(config.json);
        assert!(config.no_color);
        assert!(!config.no_progress);
        assert!(!config.quiet);
    }

    #[test]
    fn test_config_defaults_apply() {
        let cli = Cli::try_parse_from(["s3t", "list-buckets"]).unwrap();
        let mut config = Config::default();
        config.defaults.output = "json".into();
        config.defaults.color = "never".into();
        config.defaults.progress = false;

        let output = OutputConfig::from_flags(&cli, &config);
        assert!(output.json);
        assert!(output.no_color);
        assert!(output.no_progress);
    }
}
