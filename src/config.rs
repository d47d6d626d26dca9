use serde::Deserialize;

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the CINEMATIQ API server
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Directory for persisted session state (session id + watch history).
    /// Defaults to a `cinematiq` folder under the platform data directory.
    #[serde(default)]
    pub storage_dir: Option<String>,
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
