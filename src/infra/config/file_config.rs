// Startup configuration: a JSON file (`config.json` by default) with the bot
// token, the application id and the report channel, each of which can be
// overridden from the environment (after `.env` has been loaded).

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

pub const TOKEN_ENV: &str = "DISCORD_TOKEN";
pub const CLIENT_ID_ENV: &str = "DISCORD_CLIENT_ID";
pub const REPORT_CHANNEL_ENV: &str = "REPORT_CHANNEL_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Missing required setting `{0}`")]
    Missing(&'static str),
    #[error("Setting `{0}` is not a valid Discord ID: {1}")]
    InvalidId(&'static str, String),
}

/// Validated settings the bot needs to start.
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub client_id: u64,
    pub report_channel_id: u64,
}

// Never print the token.
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("report_channel_id", &self.report_channel_id)
            .finish()
    }
}

/// Discord IDs show up both as strings and as bare numbers in config files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    token: Option<String>,
    client_id: Option<RawId>,
    report_channel_id: Option<RawId>,
}

impl BotConfig {
    /// Load from `path` (if it exists) and the process environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`BotConfig::load`] with an injectable environment lookup.
    pub fn load_with(
        path: impl AsRef<Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&contents)?
        } else {
            tracing::debug!("No config file at {}, using environment only", path.display());
            RawConfig::default()
        };

        Self::resolve(raw, env)
    }

    fn resolve(raw: RawConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let token = non_empty(env(TOKEN_ENV))
            .or_else(|| non_empty(raw.token))
            .ok_or(ConfigError::Missing("token"))?;
        let client_id = non_empty(env(CLIENT_ID_ENV))
            .or_else(|| non_empty(raw.client_id.map(RawId::into_string)))
            .ok_or(ConfigError::Missing("clientId"))?;
        let report_channel_id = non_empty(env(REPORT_CHANNEL_ENV))
            .or_else(|| non_empty(raw.report_channel_id.map(RawId::into_string)))
            .ok_or(ConfigError::Missing("reportChannelId"))?;

        Ok(Self {
            token: token.trim().to_string(),
            client_id: parse_snowflake("clientId", &client_id)?,
            report_channel_id: parse_snowflake("reportChannelId", &report_channel_id)?,
        })
    }
}

fn parse_snowflake(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(ConfigError::InvalidId(name, value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_string_and_numeric_ids_from_file() {
        let file = write_config(
            r#"{ "token": "abc", "clientId": "123456789", "reportChannelId": 987654321 }"#,
        );

        let config = BotConfig::load_with(file.path(), no_env).unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.client_id, 123456789);
        assert_eq!(config.report_channel_id, 987654321);
    }

    #[test]
    fn environment_overrides_file_values() {
        let file = write_config(r#"{ "token": "file", "clientId": "1", "reportChannelId": "2" }"#);
        let env: HashMap<&str, &str> =
            HashMap::from([(TOKEN_ENV, "from-env"), (REPORT_CHANNEL_ENV, "77")]);

        let config =
            BotConfig::load_with(file.path(), |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.token, "from-env");
        assert_eq!(config.client_id, 1);
        assert_eq!(config.report_channel_id, 77);
    }

    #[test]
    fn missing_file_falls_back_to_environment() {
        let dir = tempfile::tempdir().unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (TOKEN_ENV, "t"),
            (CLIENT_ID_ENV, "5"),
            (REPORT_CHANNEL_ENV, "6"),
        ]);

        let config = BotConfig::load_with(dir.path().join("config.json"), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.client_id, 5);
        assert_eq!(config.report_channel_id, 6);
    }

    #[test]
    fn missing_and_invalid_values_are_errors() {
        let file = write_config(r#"{ "token": "abc", "clientId": "1" }"#);
        let err = BotConfig::load_with(file.path(), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("reportChannelId")));

        let file = write_config(r#"{ "token": "  ", "clientId": "1", "reportChannelId": "2" }"#);
        let err = BotConfig::load_with(file.path(), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("token")));

        let file = write_config(r#"{ "token": "a", "clientId": "0", "reportChannelId": "x" }"#);
        let err = BotConfig::load_with(file.path(), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidId("clientId", _)));

        let file = write_config("not json");
        assert!(matches!(
            BotConfig::load_with(file.path(), no_env),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn debug_output_hides_token() {
        let config = BotConfig {
            token: "super-secret".to_string(),
            client_id: 1,
            report_channel_id: 2,
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("redacted"));
    }
}
