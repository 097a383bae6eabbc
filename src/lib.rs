//! Fake Finder - spot the fabricated fact
//!
//! A terminal trivia game. Each round pulls an article from Wikipedia, asks
//! Gemini for three true statements from it plus one plausible fake, shuffles
//! the four, and scores the player on finding the fake.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fake_finder::{Game, GameConfig, GeminiClient, StdConsole, WikipediaClient};
//!
//! let config = GameConfig::from_env()?;
//! let articles = WikipediaClient::new(config.wikipedia.clone())?;
//! let generator = GeminiClient::new(config.gemini.clone())?;
//!
//! let mut game = Game::new(articles, generator, StdConsole::new(), config.catalog)
//!     .with_input_limit(config.max_input_attempts);
//! game.run().await?;
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   title    ┌──────────────────┐
//! │    Game      │──────────▶│  ArticleSource   │  Wikipedia
//! │ (rounds,     │   text     └──────────────────┘
//! │  session)    │──────────▶┌──────────────────┐
//! │              │   raw      │  FactGenerator   │  Gemini
//! │              │◀──────────└──────────────────┘
//! │              │ parse_facts → RoundSet → randomize → evaluate
//! └──────┬───────┘
//!        │ say / read_line
//!        ▼
//!   ┌─────────┐
//!   │ Console │
//!   └─────────┘
//! ```

pub mod config;
pub mod console;
pub mod display;
pub mod facts;
pub mod game;
pub mod generator;
pub mod round;
pub mod spinner;
pub mod types;
pub mod wiki;

// Core types
pub use types::*;

// Round logic
pub use facts::{parse_facts, RoundSet};
pub use round::{evaluate, randomize, Verdict};

// Collaborators
pub use config::{ConfigError, GameConfig, TopicCatalog};
pub use console::{Console, InputError, StdConsole};
pub use generator::{FactGenerator, GeminiClient, GenerateError};
pub use wiki::{ArticleSource, WikipediaClient};

// Orchestration
pub use game::{Game, GameError};
