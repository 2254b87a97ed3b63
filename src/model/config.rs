use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "ECO_ANALYZER_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_API_KEY: &str = "GOOGLE_API_KEY";
const ENV_TEXT_MODEL: &str = "TEXT_MODEL";
const ENV_VISION_MODEL: &str = "VISION_MODEL";

/// Default Gemini model for both text and image analysis
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Uploads above this size are rejected (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Generative model endpoint settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the Generative Language API
    pub base_url: String,
    /// Upper bound for a single model call
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Live marketplace lookup for alternative products. Disabled unless configured.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    pub enabled: bool,
    /// Store roots searched with `{store}/search?q=...`
    pub stores: Vec<String>,
    /// Only the first `max_stores` stores are queried per request
    pub max_stores: usize,
    pub timeout_secs: u64,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stores: vec![
                "https://earthhero.com".to_string(),
                "https://packagefreeshop.com".to_string(),
                "https://thegoodtrade.com".to_string(),
                "https://zerowastestore.com".to_string(),
            ],
            max_stores: 2,
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub marketplace: MarketplaceConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    /// Google API key; when absent every analysis request reports the model as unavailable
    pub api_key: Option<String>,
    pub text_model: String,
    pub vision_model: String,
    pub model: ModelConfig,
    pub marketplace: MarketplaceConfig,
    pub upload: UploadConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "127.0.0.1".to_string(),
            api_key: None,
            text_model: DEFAULT_MODEL.to_string(),
            vision_model: DEFAULT_MODEL.to_string(),
            model: ModelConfig::default(),
            marketplace: MarketplaceConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if api_key.is_none() {
            tracing::warn!(
                "{} not set, analysis endpoints will report the model as unavailable",
                ENV_API_KEY
            );
        }

        let text_model =
            std::env::var(ENV_TEXT_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let vision_model =
            std::env::var(ENV_VISION_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Self {
            port,
            host,
            api_key,
            text_model,
            vision_model,
            model: file.model,
            marketplace: file.marketplace,
            upload: file.upload,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents, path),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config(contents: &str, path: &Path) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str(contents) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded configuration from file");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
