//! Client configuration.
//!
//! [`Config`] is the validated, immutable settings a client is built from.
//! [`ConfigSource`] is the loose, all-optional shape used for the external
//! defaults (a JSON file or the environment) and for per-instance overrides;
//! sources are merged first and then validated once into a `Config`.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{CoreError, RpcError};
use crate::rpc::parse_connection;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const ENV_ENDPOINT: &str = "ASMONEY_ENDPOINT";
const ENV_USERNAME: &str = "ASMONEY_USERNAME";
const ENV_API_NAME: &str = "ASMONEY_API_NAME";
const ENV_API_PASSWORD: &str = "ASMONEY_API_PASSWORD";
const ENV_TIMEOUT_SECS: &str = "ASMONEY_TIMEOUT_SECS";
const ENV_CONNECT_TIMEOUT_SECS: &str = "ASMONEY_CONNECT_TIMEOUT_SECS";

// ==============================================================================
// Validated Config
// ==============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub username: String,
    pub api_name: String,
    pub api_password: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

// Keep the password out of logs and panic messages.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("api_name", &self.api_name)
            .field("api_password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl Config {
    pub fn new(
        endpoint: &str,
        username: &str,
        api_name: &str,
        api_password: &str,
    ) -> Result<Self, CoreError> {
        ConfigSource {
            endpoint: Some(endpoint.to_owned()),
            username: Some(username.to_owned()),
            api_name: Some(api_name.to_owned()),
            api_password: Some(api_password.to_owned()),
            ..ConfigSource::default()
        }
        .into_config()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

// ==============================================================================
// Config Sources
// ==============================================================================

/// Partial settings from one source. Missing fields fall through to whatever
/// the source underneath provides when merged.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSource {
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub api_name: Option<String>,
    pub api_password: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSource")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("api_name", &self.api_name)
            .field("api_password", &self.api_password.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl ConfigSource {
    pub fn from_json_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CoreError::Config(format!("invalid config file {}: {e}", path.display()))
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self, CoreError> {
        serde_json::from_str(content)
            .map_err(|e| CoreError::Config(format!("invalid config JSON: {e}")))
    }

    /// Read `ASMONEY_*` variables from the process environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let secs = |key: &str| -> Result<Option<u64>, CoreError> {
            match lookup(key) {
                None => Ok(None),
                Some(raw) => raw.trim().parse::<u64>().map(Some).map_err(|e| {
                    CoreError::Config(format!("{key} must be whole seconds: {e}"))
                }),
            }
        };
        let timeout_secs = secs(ENV_TIMEOUT_SECS)?;
        let connect_timeout_secs = secs(ENV_CONNECT_TIMEOUT_SECS)?;

        Ok(Self {
            endpoint: lookup(ENV_ENDPOINT),
            username: lookup(ENV_USERNAME),
            api_name: lookup(ENV_API_NAME),
            api_password: lookup(ENV_API_PASSWORD),
            timeout_secs,
            connect_timeout_secs,
        })
    }

    /// Layer `overrides` on top of `self`; a field set in `overrides` wins.
    pub fn merge(self, overrides: ConfigSource) -> ConfigSource {
        ConfigSource {
            endpoint: overrides.endpoint.or(self.endpoint),
            username: overrides.username.or(self.username),
            api_name: overrides.api_name.or(self.api_name),
            api_password: overrides.api_password.or(self.api_password),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
            connect_timeout_secs: overrides.connect_timeout_secs.or(self.connect_timeout_secs),
        }
    }

    pub fn into_config(self) -> Result<Config, CoreError> {
        let endpoint = parse_endpoint(&required(self.endpoint, "endpoint")?)?;
        let username = required(self.username, "username")?;
        let api_name = required(self.api_name, "api_name")?;
        let api_password = required(self.api_password, "api_password")?;

        let timeout = positive_secs(self.timeout_secs, "timeout_secs")?.unwrap_or(DEFAULT_TIMEOUT);
        let connect_timeout = positive_secs(self.connect_timeout_secs, "connect_timeout_secs")?
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT);

        Ok(Config {
            endpoint,
            username,
            api_name,
            api_password,
            timeout,
            connect_timeout,
        })
    }
}

impl TryFrom<ConfigSource> for Config {
    type Error = CoreError;

    fn try_from(source: ConfigSource) -> Result<Self, Self::Error> {
        source.into_config()
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, CoreError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CoreError::Config(format!("missing required setting `{field}`")))
}

fn positive_secs(value: Option<u64>, field: &str) -> Result<Option<Duration>, CoreError> {
    match value {
        None => Ok(None),
        Some(0) => Err(CoreError::Config(format!("`{field}` must be at least 1"))),
        Some(secs) => Ok(Some(Duration::from_secs(secs))),
    }
}

fn parse_endpoint(endpoint: &str) -> Result<String, CoreError> {
    parse_connection(endpoint).map_err(|err| match err {
        RpcError::Configuration(message) => CoreError::Config(message),
        other => CoreError::Rpc(other),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn full_source() -> ConfigSource {
        ConfigSource {
            endpoint: Some("https://api.example.test/rpc".into()),
            username: Some("merchant".into()),
            api_name: Some("shop".into()),
            api_password: Some("secret".into()),
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }

    #[test]
    fn into_config_applies_default_timeouts() {
        let config = full_source().into_config().expect("complete source must validate");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.api_name, "shop");
    }

    #[test]
    fn into_config_reports_missing_field() {
        let source = ConfigSource {
            api_password: None,
            ..full_source()
        };
        let err = source.into_config().expect_err("password is required");
        assert!(err.to_string().contains("api_password"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let source = ConfigSource {
            username: Some("   ".into()),
            ..full_source()
        };
        assert!(source.into_config().is_err());
    }

    #[test]
    fn merge_prefers_overrides_per_field() {
        let overrides = ConfigSource {
            api_name: Some("other-shop".into()),
            timeout_secs: Some(5),
            ..ConfigSource::default()
        };
        let merged = full_source().merge(overrides);
        assert_eq!(merged.api_name.as_deref(), Some("other-shop"));
        assert_eq!(merged.username.as_deref(), Some("merchant"));
        assert_eq!(merged.timeout_secs, Some(5));

        let config = merged.into_config().expect("merged source must validate");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let source = ConfigSource {
            timeout_secs: Some(0),
            ..full_source()
        };
        let err = source.into_config().expect_err("zero timeout must fail");
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn endpoint_must_be_http() {
        let err = parse_endpoint("ftp://example.com").expect_err("must reject ftp");
        assert!(err.to_string().contains("unsupported endpoint scheme"));
        assert!(parse_endpoint("not a url").is_err());
    }

    #[test]
    fn from_lookup_reads_environment_names() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("ASMONEY_ENDPOINT", "http://127.0.0.1:9000"),
            ("ASMONEY_USERNAME", "merchant"),
            ("ASMONEY_TIMEOUT_SECS", "12"),
            ("ASMONEY_CONNECT_TIMEOUT_SECS", "4"),
        ]);
        let source =
            ConfigSource::from_lookup(|k| vars.get(k).map(|v| (*v).to_owned())).expect("env");
        assert_eq!(source.endpoint.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(source.username.as_deref(), Some("merchant"));
        assert_eq!(source.api_name, None);
        assert_eq!(source.timeout_secs, Some(12));
        assert_eq!(source.connect_timeout_secs, Some(4));

        let config = source
            .merge(ConfigSource {
                api_name: Some("shop".into()),
                api_password: Some("secret".into()),
                ..ConfigSource::default()
            })
            .into_config()
            .expect("env plus overrides must validate");
        assert_eq!(config.connect_timeout, Duration::from_secs(4));
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = ConfigSource::from_lookup(|k| {
            (k == "ASMONEY_TIMEOUT_SECS").then(|| "soon".to_owned())
        })
        .expect_err("non-numeric timeout must fail");
        assert!(err.to_string().contains("ASMONEY_TIMEOUT_SECS"));

        let err = ConfigSource::from_lookup(|k| {
            (k == "ASMONEY_CONNECT_TIMEOUT_SECS").then(|| "-1".to_owned())
        })
        .expect_err("negative connect timeout must fail");
        assert!(err.to_string().contains("ASMONEY_CONNECT_TIMEOUT_SECS"));
    }

    #[test]
    fn from_json_file_reads_partial_source() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time must be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("asmoney-config-{unique}.json"));
        fs::write(&path, r#"{"username": "merchant", "timeout_secs": 7}"#)
            .expect("config file must be writable");

        let source = ConfigSource::from_json_file(&path).expect("config must parse");
        assert_eq!(source.username.as_deref(), Some("merchant"));
        assert_eq!(source.timeout_secs, Some(7));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn from_json_rejects_unknown_keys() {
        assert!(ConfigSource::from_json_str(r#"{"user": "typo"}"#).is_err());
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = full_source().into_config().expect("valid");
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }
}
