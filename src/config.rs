//! Runtime configuration
//!
//! Everything is read from the environment. The topic catalog can be
//! replaced by a JSON file so tests and players can bring their own topics.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("failed to read topic catalog {path:?}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse topic catalog {path:?}: {source}")]
    CatalogParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("topic catalog is invalid: {0}")]
    InvalidCatalog(String),
}

/// A named group of article titles the player can pick from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub topics: Vec<String>,
}

impl Category {
    pub fn new(name: &str, topics: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Ordered categories; the order is the menu order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Category>", try_from = "Vec<Category>")]
pub struct TopicCatalog {
    categories: Vec<Category>,
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self {
            categories: vec![
                Category::new(
                    "lifestyle",
                    &["Cooking", "Fashion", "Film", "Music", "Yoga", "Gardening"],
                ),
                Category::new(
                    "science",
                    &[
                        "Photosynthesis",
                        "Black hole",
                        "DNA",
                        "Gravitational wave",
                        "Theory of relativity",
                        "Volcano",
                        "Quantum computing",
                    ],
                ),
                Category::new(
                    "politics",
                    &[
                        "Democracy",
                        "Socialism",
                        "Capitalism",
                        "Communism",
                        "Monarchy",
                        "Republic",
                    ],
                ),
            ],
        }
    }
}

impl TryFrom<Vec<Category>> for TopicCatalog {
    type Error = ConfigError;

    fn try_from(categories: Vec<Category>) -> Result<Self, Self::Error> {
        Self::new(categories)
    }
}

impl From<TopicCatalog> for Vec<Category> {
    fn from(catalog: TopicCatalog) -> Self {
        catalog.categories
    }
}

impl TopicCatalog {
    /// Build a catalog, rejecting empty menus
    pub fn new(categories: Vec<Category>) -> Result<Self, ConfigError> {
        if categories.is_empty() {
            return Err(ConfigError::InvalidCatalog("no categories".to_string()));
        }
        if let Some(empty) = categories.iter().find(|c| c.topics.is_empty()) {
            return Err(ConfigError::InvalidCatalog(format!(
                "category {:?} has no topics",
                empty.name
            )));
        }
        Ok(Self { categories })
    }

    pub fn from_json(json: &str, path: PathBuf) -> Result<Self, ConfigError> {
        let categories: Vec<Category> = serde_json::from_str(json)
            .map_err(|source| ConfigError::CatalogParse { path, source })?;
        Self::new(categories)
    }

    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(&path).map_err(|source| ConfigError::CatalogRead {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&json, path)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

/// Gemini API settings
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base URL
    pub api_url: String,

    /// API key (from environment)
    pub api_key: String,

    /// Model to use (default: gemini-2.5-flash)
    pub model: String,

    pub temperature: f32,

    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

/// MediaWiki API settings
#[derive(Debug, Clone)]
pub struct WikipediaConfig {
    pub api_url: String,
    /// Wikimedia asks API clients to identify themselves
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            user_agent: format!(
                "fake-finder/{} (terminal trivia game)",
                env!("CARGO_PKG_VERSION")
            ),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    pub gemini: GeminiConfig,
    pub wikipedia: WikipediaConfig,
    pub catalog: TopicCatalog,
    /// Rejected answers tolerated per question; `None` re-prompts forever
    pub max_input_attempts: Option<u32>,
}

impl GameConfig {
    /// Read the process environment, after merging a `.env` file if present.
    ///
    /// Variables already set in the process win over the file.
    pub fn from_env() -> Result<Self, ConfigError> {
        log_dotenv(dotenvy::dotenv());
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an explicit env file
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        log_dotenv(dotenvy::from_path(path).map(|()| path.to_path_buf()));
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(key) = var("GEMINI_API_KEY").or_else(|| var("GOOGLE_API_KEY")) {
            config.gemini.api_key = key.trim().to_string();
        }

        if let Some(model) = var("FAKE_FINDER_MODEL") {
            config.gemini.model = model.trim().to_string();
        }

        if let Some(raw) = var("FAKE_FINDER_TIMEOUT_SECS") {
            let secs = parse_positive("FAKE_FINDER_TIMEOUT_SECS", &raw)?;
            config.gemini.timeout_secs = secs.into();
            config.wikipedia.timeout_secs = secs.into();
        }

        if let Some(raw) = var("FAKE_FINDER_MAX_ATTEMPTS") {
            config.max_input_attempts = Some(parse_positive("FAKE_FINDER_MAX_ATTEMPTS", &raw)?);
        }

        if let Some(path) = var("FAKE_FINDER_TOPICS") {
            config.catalog = TopicCatalog::load(PathBuf::from(path.trim()))?;
        }

        Ok(config)
    }
}

fn log_dotenv(result: Result<PathBuf, dotenvy::Error>) {
    match result {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string(),
        }),
    }
}
