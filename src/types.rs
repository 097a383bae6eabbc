//! Core types for Fake Finder
//!
//! A round shows four statements pulled from one article. Three are true,
//! one was fabricated by the model, and the player has to spot it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Most rounds a single game may be played for
pub const MAX_ROUNDS: u8 = 10;

/// A single statement shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub text: String,
    pub is_true: bool,
}

impl Statement {
    pub fn new(text: impl Into<String>, is_true: bool) -> Self {
        Self {
            text: text.into(),
            is_true,
        }
    }

    pub fn fact(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    pub fn fake(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }
}

/// How subtle the fabricated statement should be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// A simple sentence that is clearly true or false
    Easy,
    /// A fact that requires moderate knowledge
    Medium,
    /// A challenging fact where the fake is subtle
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Settings and running score for one play-through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub total_rounds: u8,
    pub score: u32,
}

impl SessionState {
    pub fn new(player_name: impl Into<String>, difficulty: Difficulty, total_rounds: u8) -> Self {
        Self {
            player_name: player_name.into(),
            difficulty,
            total_rounds,
            score: 0,
        }
    }

    /// Apply a finished round. Only a correct answer moves the score.
    pub fn record(&mut self, outcome: &RoundOutcome) {
        if matches!(outcome, RoundOutcome::Correct) {
            self.score += 1;
        }
    }
}

/// Why a round ended without a question being asked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The article was missing, ambiguous or unreachable
    ArticleUnavailable,
    /// The model output did not parse into four statements
    MalformedFacts { parsed: usize },
    /// Four statements parsed, but not exactly one of them is fake
    AmbiguousFake { fakes: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ArticleUnavailable => write!(f, "article unavailable"),
            SkipReason::MalformedFacts { parsed } => {
                write!(f, "expected 4 statements, parsed {parsed}")
            }
            SkipReason::AmbiguousFake { fakes } => {
                write!(f, "expected exactly 1 fake statement, found {fakes}")
            }
        }
    }
}

/// Result of one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Correct,
    Incorrect { fake: String },
    Skipped(SkipReason),
}

impl RoundOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RoundOutcome::Skipped(_))
    }
}
