//! Client configuration loaded via OrthoConfig.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::OperatorName;

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
/// Offline store used when none is configured, relative to the working
/// directory.
pub const DEFAULT_OFFLINE_STORE: &str = "medimanager-doctors.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings controlling how the client reaches the clinic API.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MEDIMANAGER")]
pub struct ClientSettings {
    /// Root of the clinic REST API, e.g. `http://localhost:8080/api`.
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Display name of the signed-in operator.
    pub operator: Option<String>,
    /// Keep doctors in a local JSON file instead of calling the API.
    #[ortho_config(default = false)]
    pub offline: bool,
    /// JSON file backing the offline directory.
    pub offline_store: Option<PathBuf>,
}

impl ClientSettings {
    /// Return the configured base URL, falling back to the default.
    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Return the request timeout; zero is raised to one second.
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .max(1);
        Duration::from_secs(secs)
    }

    /// Return the offline store path, falling back to the default file.
    pub fn offline_store(&self) -> &Path {
        self.offline_store
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(DEFAULT_OFFLINE_STORE))
    }

    /// Return the operator display name, `Guest` when unset or blank.
    pub fn operator(&self) -> OperatorName {
        OperatorName::from_setting(self.operator.as_deref())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "MEDIMANAGER_API_BASE_URL",
        "MEDIMANAGER_REQUEST_TIMEOUT_SECS",
        "MEDIMANAGER_OPERATOR",
        "MEDIMANAGER_OFFLINE",
        "MEDIMANAGER_OFFLINE_STORE",
    ];

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("medimanager")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.operator().as_ref(), "Guest");
        assert!(!settings.offline);
        assert_eq!(settings.offline_store(), Path::new(DEFAULT_OFFLINE_STORE));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "MEDIMANAGER_API_BASE_URL",
                Some("https://clinic.example/api".to_owned()),
            ),
            ("MEDIMANAGER_REQUEST_TIMEOUT_SECS", Some("5".to_owned())),
            ("MEDIMANAGER_OPERATOR", Some("Subhajit".to_owned())),
            ("MEDIMANAGER_OFFLINE", Some("true".to_owned())),
            (
                "MEDIMANAGER_OFFLINE_STORE",
                Some("/var/lib/medimanager/doctors.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.api_base_url(), "https://clinic.example/api");
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
        assert_eq!(settings.operator().as_ref(), "Subhajit");
        assert!(settings.offline);
        assert_eq!(
            settings.offline_store(),
            Path::new("/var/lib/medimanager/doctors.json")
        );
    }

    #[rstest]
    fn zero_timeout_is_clamped_to_one_second() {
        let _guard = lock_env([
            ("MEDIMANAGER_API_BASE_URL", None),
            ("MEDIMANAGER_REQUEST_TIMEOUT_SECS", Some("0".to_owned())),
            ("MEDIMANAGER_OPERATOR", Some("   ".to_owned())),
            ("MEDIMANAGER_OFFLINE", None),
            ("MEDIMANAGER_OFFLINE_STORE", None),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.request_timeout(), Duration::from_secs(1));
        assert_eq!(settings.operator().as_ref(), "Guest");
    }
}
