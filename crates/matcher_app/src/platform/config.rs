use std::fs;
use std::path::Path;
use std::time::Duration;

use matcher_engine::BackendSettings;
use serde::Deserialize;

use super::logging::LogDestination;

pub(crate) const CONFIG_FILENAME: &str = "resume_matcher.ron";

/// User settings read from `resume_matcher.ron`; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub base_url: String,
    /// Whole-request timeout in seconds. Absent means requests may run indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: BackendSettings::default().base_url,
            request_timeout_secs: None,
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    pub(crate) fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..BackendSettings::default()
        }
    }
}

/// Loads the config from `dir`, falling back to defaults.
///
/// Runs before the logger exists, so a problem with the file is returned as a
/// warning for the caller to log once logging is up.
pub(crate) fn load_config(dir: &Path) -> (AppConfig, Option<String>) {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), None);
        }
        Err(err) => {
            return (
                AppConfig::default(),
                Some(format!("Failed to read config from {:?}: {}", path, err)),
            );
        }
    };

    match ron::from_str(&content) {
        Ok(config) => (config, None),
        Err(err) => (
            AppConfig::default(),
            Some(format!("Failed to parse config from {:?}: {}", path, err)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, content: &str) {
        fs::write(dir.join(CONFIG_FILENAME), content).expect("write config");
    }

    #[test]
    fn missing_file_gives_defaults_silently() {
        let dir = tempfile::tempdir().expect("tempdir");

        let (config, warning) = load_config(dir.path());

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(dir.path(), r#"(base_url: "http://matcher.internal:8080")"#);

        let (config, warning) = load_config(dir.path());

        assert!(warning.is_none());
        assert_eq!(config.base_url, "http://matcher.internal:8080");
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.log_destination, LogDestination::File);
    }

    #[test]
    fn full_file_is_applied() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(
            dir.path(),
            r#"(
                base_url: "https://example.test/matcher",
                request_timeout_secs: Some(45),
                log_destination: Both,
            )"#,
        );

        let (config, warning) = load_config(dir.path());

        assert!(warning.is_none());
        assert_eq!(config.log_destination, LogDestination::Both);
        let settings = config.backend_settings();
        assert_eq!(settings.base_url, "https://example.test/matcher");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(45)));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn invalid_file_warns_and_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(dir.path(), "(base_url: 42");

        let (config, warning) = load_config(dir.path());

        assert_eq!(config, AppConfig::default());
        let warning = warning.expect("warning for invalid config");
        assert!(warning.contains(CONFIG_FILENAME));
    }

    #[test]
    fn default_settings_have_no_request_timeout() {
        assert_eq!(AppConfig::default().backend_settings().request_timeout, None);
    }
}
