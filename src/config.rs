//! Configuration constants and profile loading for mindline
//!
//! Connection settings live in an INI profile file, one section per profile:
//!
//! ```ini
//! [default]
//! server = https://api.example.com
//! timeout_secs = 30
//! clamp_page_window = false
//! login_redirect_ms = 500
//! ```

use anyhow::{anyhow, Context, Result};
use ini::Ini;
use std::path::Path;
use std::time::Duration;

/// Default profile file path for mindline
pub const DEFAULT_PROFILE_PATH: &str = "~/.mindline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "MINDLINE_PROFILE_PATH";

/// Environment variable backing `--server`
pub const API_URL_ENV_VAR: &str = "MINDLINE_API_URL";

/// Environment variable holding the log filter
pub const LOG_LEVEL_ENV_VAR: &str = "MINDLINE_LOG_LEVEL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOGIN_REDIRECT_MS: u64 = 500;

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Settings of one profile section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub server: Option<String>,
    pub insecure: bool,
    pub timeout: Duration,
    pub clamp_page_window: bool,
    pub login_redirect_delay: Duration,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            server: None,
            insecure: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            clamp_page_window: false,
            login_redirect_delay: Duration::from_millis(DEFAULT_LOGIN_REDIRECT_MS),
        }
    }
}

impl Profile {
    /// Pick the base URL: `--server` (or its environment variable), then profile
    pub fn resolve_server(&self, cli_override: Option<&str>) -> Result<String> {
        cli_override
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .or_else(|| self.server.clone())
            .ok_or_else(|| {
                anyhow!(
                    "no server configured: pass --server, set {} or add 'server' to the profile",
                    API_URL_ENV_VAR
                )
            })
    }
}

/// Profile file reader
pub struct IniProfileStore {
    path: String,
}

impl IniProfileStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: shellexpand::tilde(path).into_owned(),
        }
    }

    /// Load the named section; `None` if the file or section does not exist
    pub fn get_profile(&self, name: &str) -> Result<Option<Profile>> {
        if !Path::new(&self.path).exists() {
            tracing::debug!("Profile file {} not found", self.path);
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("failed to read profile file {}", self.path))?;
        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let defaults = Profile::default();
        let parse_bool = |key: &str, default: bool| -> Result<bool> {
            match section.get(key) {
                Some(raw) => parse_bool_value(raw)
                    .ok_or_else(|| anyhow!("profile '{name}': invalid boolean for {key}: '{raw}'")),
                None => Ok(default),
            }
        };
        let parse_u64 = |key: &str, default: u64| -> Result<u64> {
            match section.get(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("profile '{name}': invalid number for {key}: '{raw}'")),
                None => Ok(default),
            }
        };

        Ok(Some(Profile {
            server: section
                .get("server")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            insecure: parse_bool("insecure", defaults.insecure)?,
            timeout: Duration::from_secs(parse_u64("timeout_secs", DEFAULT_TIMEOUT_SECS)?),
            clamp_page_window: parse_bool("clamp_page_window", defaults.clamp_page_window)?,
            login_redirect_delay: Duration::from_millis(parse_u64(
                "login_redirect_ms",
                DEFAULT_LOGIN_REDIRECT_MS,
            )?),
        }))
    }
}

fn parse_bool_value(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Load a profile, falling back to a blank one if it is not configured
pub fn load_profile(name: &str, path: &str) -> Result<Profile> {
    tracing::debug!("Loading profile '{}' from '{}'", name, path);
    match IniProfileStore::new(path).get_profile(name)? {
        Some(profile) => {
            tracing::debug!("Profile loaded successfully, server: {:?}", profile.server);
            Ok(profile)
        }
        None => {
            tracing::debug!("Profile '{}' not found, using blank profile", name);
            Ok(Profile::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn profile_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.mindline/profile");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(PROFILE_PATH_ENV_VAR, "MINDLINE_PROFILE_PATH");
    }

    #[test]
    fn test_get_profile_path_default() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        // Restore original state
        if let Some(val) = original {
            std::env::set_var(PROFILE_PATH_ENV_VAR, val);
        }
    }

    #[test]
    fn get_profile_should_read_all_keys() {
        let file = profile_file(
            "[staging]\n\
             server = https://staging.example.com/api\n\
             insecure = yes\n\
             timeout_secs = 5\n\
             clamp_page_window = true\n\
             login_redirect_ms = 0\n",
        );
        let store = IniProfileStore::new(file.path().to_str().unwrap());

        let profile = store.get_profile("staging").unwrap().unwrap();
        assert_eq!(
            profile.server.as_deref(),
            Some("https://staging.example.com/api")
        );
        assert!(profile.insecure);
        assert_eq!(profile.timeout, Duration::from_secs(5));
        assert!(profile.clamp_page_window);
        assert_eq!(profile.login_redirect_delay, Duration::ZERO);
    }

    #[test]
    fn get_profile_should_apply_defaults() {
        let file = profile_file("[default]\nserver = http://localhost:3000\n");
        let store = IniProfileStore::new(file.path().to_str().unwrap());

        let profile = store.get_profile("default").unwrap().unwrap();
        assert_eq!(profile.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(!profile.clamp_page_window);
        assert_eq!(profile.login_redirect_delay, Duration::from_millis(500));
    }

    #[test]
    fn get_profile_should_return_none_for_missing_section_or_file() {
        let file = profile_file("[default]\nserver = http://localhost:3000\n");
        let store = IniProfileStore::new(file.path().to_str().unwrap());
        assert!(store.get_profile("prod").unwrap().is_none());

        let missing = IniProfileStore::new("/nonexistent/mindline/profile");
        assert!(missing.get_profile("default").unwrap().is_none());
    }

    #[test]
    fn get_profile_should_reject_invalid_values() {
        let file = profile_file("[default]\ntimeout_secs = soon\n");
        let store = IniProfileStore::new(file.path().to_str().unwrap());
        assert!(store.get_profile("default").is_err());

        let file = profile_file("[default]\nclamp_page_window = maybe\n");
        let store = IniProfileStore::new(file.path().to_str().unwrap());
        assert!(store.get_profile("default").is_err());
    }

    #[test]
    fn resolve_server_should_fall_back_to_profile() {
        let profile = Profile {
            server: Some("http://profile".to_string()),
            ..Profile::default()
        };
        assert_eq!(profile.resolve_server(None).unwrap(), "http://profile");
        assert_eq!(profile.resolve_server(Some("")).unwrap(), "http://profile");
        assert!(Profile::default().resolve_server(None).is_err());
    }

    #[test]
    fn resolve_server_should_prefer_cli_override() {
        let profile = Profile {
            server: Some("http://profile".to_string()),
            ..Profile::default()
        };
        assert_eq!(
            profile.resolve_server(Some("http://cli")).unwrap(),
            "http://cli"
        );
    }
}
