//! Service configuration sourced from the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable naming the remote summarization endpoint.
pub const ENDPOINT_VAR: &str = "CONDENSER_ENDPOINT";
/// Environment variable holding the bearer credential for the endpoint.
pub const API_KEY_VAR: &str = "CONDENSER_API_KEY";
/// Environment variable overriding the listening port.
pub const PORT_VAR: &str = "CONDENSER_PORT";

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    /// A value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// The endpoint URL does not parse.
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

/// Top-level service configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CondenserConfig {
    /// Remote summarization endpoint URL.
    pub endpoint: String,
    /// Optional bearer credential for the endpoint.
    pub api_key: Option<String>,
    /// HTTP listening port.
    pub port: u16,
    /// Reduction pipeline tuning.
    pub pipeline: PipelineConfig,
    /// Outbound fetch settings (model endpoint and web pages).
    pub fetch: FetchConfig,
}

impl Default for CondenserConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            port: DEFAULT_PORT,
            pipeline: PipelineConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl CondenserConfig {
    /// Build configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if the endpoint variable is missing or any value
    /// fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint =
            std::env::var(ENDPOINT_VAR).map_err(|_| ConfigError::MissingVar(ENDPOINT_VAR))?;
        let api_key = std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty());
        let port = std::env::var(PORT_VAR)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let config = Self {
            endpoint,
            api_key,
            port,
            pipeline: PipelineConfig::default(),
            fetch: FetchConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.endpoint)?;

        if self.pipeline.chunk_budget == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.chunk_budget must be > 0".to_string(),
            ));
        }
        if self.pipeline.token_threshold == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.token_threshold must be > 0".to_string(),
            ));
        }
        if self.pipeline.max_passes == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.max_passes must be > 0".to_string(),
            ));
        }
        if self.fetch.max_content_length == 0 {
            return Err(ConfigError::Invalid(
                "fetch.max_content_length must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Tuning for the chunking and reduction pipeline.
///
/// The chunk budget counts characters while the reduction threshold counts
/// whitespace-approximated tokens. The unit mismatch is deliberate; aligning
/// the two would change chunk sizing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum chunk size in characters.
    pub chunk_budget: usize,
    /// Token count above which the joined result is reduced again.
    pub token_threshold: usize,
    /// Maximum output length requested from the model, in model tokens.
    pub max_output_length: usize,
    /// Mandatory delay after each remote call.
    #[serde(with = "duration_millis")]
    pub request_delay: Duration,
    /// Maximum number of reduction passes before returning best-effort.
    pub max_passes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_budget: 450,
            token_threshold: 450,
            max_output_length: 200,
            request_delay: Duration::from_millis(300),
            max_passes: 6,
        }
    }
}

/// Settings for outbound HTTP requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout.
    #[serde(with = "duration_millis")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(with = "duration_millis")]
    pub connect_timeout: Duration,
    /// Maximum page size to download (bytes).
    pub max_content_length: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
            max_content_length: 10 * 1024 * 1024, // 10 MB
        }
    }
}

/// Serde module for Duration as milliseconds.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_millis())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mirror_service_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.chunk_budget, 450);
        assert_eq!(config.token_threshold, 450);
        assert_eq!(config.max_output_length, 200);
        assert_eq!(config.request_delay, Duration::from_millis(300));
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let mut config = CondenserConfig {
            endpoint: "https://models.example.com/summarize".to_string(),
            ..CondenserConfig::default()
        };
        assert!(config.validate().is_ok());

        config.pipeline.chunk_budget = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let config = CondenserConfig {
            endpoint: "not a url".to_string(),
            ..CondenserConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Url(_))));
    }
}
