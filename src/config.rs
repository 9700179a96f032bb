use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the JSON catalog of movie records
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Number of recommendations returned when the request omits `num_rec`
    #[serde(default = "default_num_rec")]
    pub default_num_rec: i64,

    /// Stop-word set used by the vectorizer ("english" or "none")
    #[serde(default = "default_stop_words")]
    pub stop_words: String,

    /// How many times the genre labels are repeated in the combined text
    #[serde(default = "default_genre_weight")]
    pub genre_weight: u32,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_path() -> String {
    "data/movies.json".to_string()
}

fn default_num_rec() -> i64 {
    10
}

fn default_stop_words() -> String {
    "english".to_string()
}

fn default_genre_weight() -> u32 {
    2
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.catalog_path, "data/movies.json");
        assert_eq!(config.default_num_rec, 10);
        assert_eq!(config.stop_words, "english");
        assert_eq!(config.genre_weight, 2);
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("GENRE_WEIGHT".to_string(), "3".to_string()),
            ("STOP_WORDS".to_string(), "none".to_string()),
            ("PORT".to_string(), "9000".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.genre_weight, 3);
        assert_eq!(config.stop_words, "none");
        assert_eq!(config.port, 9000);
    }
}
