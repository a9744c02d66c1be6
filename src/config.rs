use crate::constants;
use crate::error::{CollectorError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub languages: LanguageConfig,
    pub catalog: CatalogConfig,
    pub cards: CardsConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub pokemon_url: String,
    pub species_url: String,
    pub cards_url: String,
    /// Pokémon TCG API key; usually supplied through the environment.
    pub tcg_api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            pokemon_url: constants::POKEMON_API_URL.to_string(),
            species_url: constants::SPECIES_API_URL.to_string(),
            cards_url: constants::TCG_CARDS_API_URL.to_string(),
            tcg_api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    pub display: String,
    pub canonical: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            display: constants::DISPLAY_LANGUAGE.to_string(),
            canonical: constants::CANONICAL_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { page_size: constants::CATALOG_PAGE_SIZE }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CardsConfig {
    pub page_size: usize,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self { page_size: constants::CARD_PAGE_SIZE }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// No timeout unless set.
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: concat!("pokecollector/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, falling back to `POKECOLLECTOR_CONFIG`
    /// and then `config.toml`. A missing default file yields the built-in defaults;
    /// a missing explicitly-named file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(constants::CONFIG_PATH_ENV).ok();
        let (config_path, explicit) = match (path, env_path.as_deref()) {
            (Some(p), _) => (p.to_path_buf(), true),
            (None, Some(p)) if !p.trim().is_empty() => (Path::new(p).to_path_buf(), true),
            _ => (Path::new(constants::DEFAULT_CONFIG_PATH).to_path_buf(), false),
        };

        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else if explicit {
            return Err(CollectorError::Config(format!(
                "Config file '{}' does not exist",
                config_path.display()
            )));
        } else {
            debug!("No config file at {}, using defaults", config_path.display());
            Config::default()
        };

        if let Ok(key) = std::env::var(constants::TCG_API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api.tcg_api_key = Some(key.trim().to_string());
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CollectorError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalog.page_size == 0 {
            return Err(CollectorError::Config("catalog.page_size must be at least 1".into()));
        }
        if self.cards.page_size == 0 {
            return Err(CollectorError::Config("cards.page_size must be at least 1".into()));
        }
        if self.languages.display.trim().is_empty() || self.languages.canonical.trim().is_empty() {
            return Err(CollectorError::Config("language tags must not be empty".into()));
        }
        Ok(())
    }
}
