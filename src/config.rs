use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL poster and backdrop paths are resolved against
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Language requested from the catalog API
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Directory holding the persisted records
    #[serde(default)]
    pub reelwave_data_dir: Option<PathBuf>,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

pub(crate) fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Directory for persisted records, falling back to the platform data dir
    pub fn data_dir(&self) -> PathBuf {
        self.reelwave_data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("reelwave")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(vars: Vec<(&str, &str)>) -> Result<Config, envy::Error> {
        envy::from_iter(
            vars.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_defaults_applied() {
        let config = parse(vec![("TMDB_API_KEY", "abc")]).unwrap();
        assert_eq!(config.tmdb_api_key, "abc");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb_image_base_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.tmdb_language, "en-US");
        assert!(config.reelwave_data_dir.is_none());
        assert!(config.data_dir().ends_with("reelwave"));
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        assert!(parse(vec![("TMDB_LANGUAGE", "fr-FR")]).is_err());
    }

    #[test]
    fn test_explicit_data_dir() {
        let config = parse(vec![
            ("TMDB_API_KEY", "abc"),
            ("REELWAVE_DATA_DIR", "/var/lib/reelwave"),
        ])
        .unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/reelwave"));
    }
}
