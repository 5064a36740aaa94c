use clap::Parser;
use std::path::PathBuf;

use crate::error::{AnalyzerError, Result};
use crate::models::{MalformedPolicy, DEFAULT_LOG_FILE};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Hourly access histogram for web-server logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "loghist",
    about = "Hourly access histogram for web-server logs",
    version
)]
pub struct Settings {
    /// Log file to analyse
    #[arg(long, short = 'f', env = "LOGHIST_FILE", default_value = DEFAULT_LOG_FILE)]
    pub file: PathBuf,

    /// What to do with lines that cannot be parsed
    #[arg(long, default_value = "strict", value_parser = ["strict", "skip"])]
    pub policy: String,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub output: String,

    /// Echo the raw log lines after the analysis
    #[arg(long)]
    pub print_data: bool,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (diagnostics go to stderr when unset)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments, exiting with usage on error.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let settings =
            Settings::try_parse_from(args).map_err(|e| AnalyzerError::Config(e.to_string()))?;
        Ok(Self::resolve(settings))
    }

    /// The malformed-line policy selected by `--policy`.
    pub fn malformed_policy(&self) -> Result<MalformedPolicy> {
        self.policy.parse()
    }

    /// `true` when `--output json` was requested.
    pub fn json_output(&self) -> bool {
        self.output == "json"
    }

    /// `--debug` overrides log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::try_parse_from(["loghist"]).unwrap();

        // LOGHIST_FILE may be set in the environment running the tests.
        if std::env::var_os("LOGHIST_FILE").is_none() {
            assert_eq!(settings.file, PathBuf::from("demo.log"));
        }
        assert_eq!(settings.policy, "strict");
        assert_eq!(settings.output, "text");
        assert!(!settings.print_data);
        assert_eq!(settings.log_level, "WARNING");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_file() {
        let settings = Settings::load_from_args(["loghist", "--file", "/tmp/access.log"]).unwrap();
        assert_eq!(settings.file, PathBuf::from("/tmp/access.log"));

        let settings = Settings::load_from_args(["loghist", "-f", "weblog.txt"]).unwrap();
        assert_eq!(settings.file, PathBuf::from("weblog.txt"));
    }

    #[test]
    fn test_settings_policy() {
        let settings = Settings::load_from_args(["loghist", "--policy", "skip"]).unwrap();
        assert_eq!(settings.malformed_policy().unwrap(), MalformedPolicy::Skip);

        let settings = Settings::load_from_args(["loghist"]).unwrap();
        assert_eq!(settings.malformed_policy().unwrap(), MalformedPolicy::Strict);
    }

    #[test]
    fn test_settings_rejects_unknown_policy() {
        let err = Settings::load_from_args(["loghist", "--policy", "lenient"]).unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(_)));
    }

    #[test]
    fn test_settings_json_output() {
        let settings = Settings::load_from_args(["loghist", "--output", "json"]).unwrap();
        assert!(settings.json_output());
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings =
            Settings::load_from_args(["loghist", "--log-level", "ERROR", "--debug"]).unwrap();
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_settings_print_data_and_log_file() {
        let settings = Settings::load_from_args([
            "loghist",
            "--print-data",
            "--log-file",
            "/tmp/loghist.log",
        ])
        .unwrap();
        assert!(settings.print_data);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/loghist.log")));
    }
}
