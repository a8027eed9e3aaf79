use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

use crate::feed::{BoundingBox, FeedClient, FeedError, DEFAULT_FEED_URL};
use crate::flight::MatchRules;
use crate::geo::Viewport;
use crate::tracker::DEFAULT_POLL_INTERVAL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub feed: FeedConfig,
    pub matching: MatchRules,
    pub map: Viewport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            feed: FeedConfig::default(),
            matching: MatchRules::default(),
            map: default_viewport(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub poll_interval: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    pub user_agent: String,
    pub bounding_box: BoundingBox,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: Duration::from_secs(10),
            user_agent: concat!("flight-o-mat/", env!("CARGO_PKG_VERSION")).to_string(),
            bounding_box: BoundingBox::default(),
        }
    }
}

fn default_viewport() -> Viewport {
    Viewport {
        width: 800.0,
        height: 500.0,
        padding: 20.0,
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bbox = &self.feed.bounding_box;
        if bbox.lamin >= bbox.lamax || bbox.lomin >= bbox.lomax {
            return Err(ConfigError::Invalid(
                "bounding_box must have lamin < lamax and lomin < lomax".into(),
            ));
        }
        if self.feed.poll_interval.is_zero() {
            return Err(ConfigError::Invalid("poll_interval must be positive".into()));
        }
        if !self.map.is_drawable() {
            return Err(ConfigError::Invalid(
                "map dimensions must be finite and larger than twice the padding".into(),
            ));
        }
        Ok(())
    }

    pub fn feed_client(&self) -> Result<FeedClient, FeedError> {
        FeedClient::new(
            self.feed.url.clone(),
            self.feed.bounding_box,
            self.feed.timeout,
            &self.feed.user_agent,
        )
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.feed.url, DEFAULT_FEED_URL);
        assert_eq!(config.feed.poll_interval, Duration::from_secs(30));
        assert_eq!(config.feed.bounding_box, BoundingBox::LONDON_DHAKA);
        assert_eq!(config.matching, MatchRules::default());
        assert_eq!(config.map.width, 800.0);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
web:
  bind: 127.0.0.1:9000
feed:
  url: http://localhost:8081/states/all
  poll_interval: 1m 30s
  timeout: 5s
  user_agent: test-agent
  bounding_box: { lamin: 10.0, lomin: 0.0, lamax: 50.0, lomax: 100.0 }
matching:
  identifiers: [BAW117]
  carrier_prefix: BAW
  min_altitude_m: 3000
map:
  width: 1024
  height: 768
  padding: 32
"#;
        let config = Config::from_str(yaml).unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:9000");
        assert_eq!(config.feed.poll_interval, Duration::from_secs(90));
        assert_eq!(config.feed.timeout, Duration::from_secs(5));
        assert_eq!(config.feed.bounding_box.lomax, 100.0);
        assert_eq!(config.matching.identifiers, vec!["BAW117".to_string()]);
        assert_eq!(config.matching.min_altitude_m, 3000.0);
        assert_eq!(config.map.padding, 32.0);
    }

    #[test]
    fn test_partial_matching_keeps_defaults() {
        let config = Config::from_str("matching:\n  carrier_prefix: BBD\n").unwrap();
        assert_eq!(config.matching.carrier_prefix, "BBD");
        assert_eq!(config.matching.min_altitude_m, 6000.0);
        assert_eq!(config.matching.identifiers.len(), 2);
    }

    #[test]
    fn test_bad_duration() {
        let err = Config::from_str("feed:\n  poll_interval: soon\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_inverted_bounding_box() {
        let yaml = "feed:\n  bounding_box: { lamin: 60, lomin: 0, lamax: 20, lomax: 90 }\n";
        assert!(matches!(Config::from_str(yaml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_interval() {
        let err = Config::from_str("feed:\n  poll_interval: 0s\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_non_finite_map() {
        let err = Config::from_str("map:\n  width: .nan\n  height: 500\n  padding: 20\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
