use std::env;
use std::time::Duration;

use url::Url;

const DEFAULT_SIMPLE_ENDPOINT: &str = "https://simple.wikipedia.org/w/api.php";
const DEFAULT_FULL_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const SIMPLE_ENDPOINT_VAR: &str = "WIKISEEK_SIMPLE_ENDPOINT";
const FULL_ENDPOINT_VAR: &str = "WIKISEEK_FULL_ENDPOINT";
const TIMEOUT_VAR: &str = "WIKISEEK_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("invalid timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Runtime settings for the wiki transport.
///
/// Resolution order: CLI flag → environment variable → built-in default.
#[derive(Debug, Clone)]
pub struct Config {
    pub simple_endpoint: Url,
    pub full_endpoint: Url,
    /// Whole-request timeout handed to the HTTP client.
    pub timeout: Duration,
}

/// Values supplied on the command line; `None` defers to the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub simple_endpoint: Option<String>,
    pub full_endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |key| env::var(key).ok())
    }

    fn resolve(
        overrides: Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let simple = overrides
            .simple_endpoint
            .or_else(|| read(SIMPLE_ENDPOINT_VAR))
            .unwrap_or_else(|| DEFAULT_SIMPLE_ENDPOINT.to_string());
        let full = overrides
            .full_endpoint
            .or_else(|| read(FULL_ENDPOINT_VAR))
            .unwrap_or_else(|| DEFAULT_FULL_ENDPOINT.to_string());

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => match read(TIMEOUT_VAR) {
                Some(raw) => raw
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(timeout_secs.to_string()));
        }

        Ok(Self {
            simple_endpoint: parse_endpoint(&simple)?,
            full_endpoint: parse_endpoint(&full)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            value: raw.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve_with(
        overrides: Overrides,
        vars: &[(&str, &str)],
    ) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::resolve(overrides, |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_wikipedia() {
        let config = resolve_with(Overrides::default(), &[]).unwrap();
        assert_eq!(config.simple_endpoint.as_str(), DEFAULT_SIMPLE_ENDPOINT);
        assert_eq!(config.full_endpoint.as_str(), DEFAULT_FULL_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn env_values_replace_defaults() {
        let config = resolve_with(
            Overrides::default(),
            &[
                (SIMPLE_ENDPOINT_VAR, "http://localhost:8080/simple"),
                (TIMEOUT_VAR, " 5 "),
            ],
        )
        .unwrap();
        assert_eq!(config.simple_endpoint.as_str(), "http://localhost:8080/simple");
        assert_eq!(config.full_endpoint.as_str(), DEFAULT_FULL_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn overrides_win_over_env() {
        let config = resolve_with(
            Overrides {
                full_endpoint: Some("https://mirror.example/w/api.php".into()),
                timeout_secs: Some(12),
                ..Default::default()
            },
            &[(FULL_ENDPOINT_VAR, "https://ignored.example"), (TIMEOUT_VAR, "3")],
        )
        .unwrap();
        assert_eq!(
            config.full_endpoint.as_str(),
            "https://mirror.example/w/api.php"
        );
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let config = resolve_with(Overrides::default(), &[(FULL_ENDPOINT_VAR, "  ")]).unwrap();
        assert_eq!(config.full_endpoint.as_str(), DEFAULT_FULL_ENDPOINT);
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = resolve_with(Overrides::default(), &[(SIMPLE_ENDPOINT_VAR, "ftp://x.org")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn rejects_unparsable_endpoint() {
        let err = resolve_with(Overrides::default(), &[(FULL_ENDPOINT_VAR, "not a url")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn rejects_zero_or_garbage_timeout() {
        assert!(matches!(
            resolve_with(Overrides::default(), &[(TIMEOUT_VAR, "abc")]),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            resolve_with(
                Overrides {
                    timeout_secs: Some(0),
                    ..Default::default()
                },
                &[]
            ),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }
}
