//! Fake Finder
//!
//! Facts from Wikipedia, fakes by Gemini.
//!
//! Run with: GEMINI_API_KEY=... cargo run

use anyhow::Result;
use fake_finder::{
    display, Console, Game, GameConfig, GameError, GeminiClient, StdConsole, WikipediaClient,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the game on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<GameError>() {
                Some(GameError::Generation(err)) => {
                    let _ = StdConsole::new().say(&display::generation_failure(err));
                }
                _ => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = GameConfig::from_env()?;
    tracing::debug!(
        "Using model {} with {} categories",
        config.gemini.model,
        config.catalog.categories().len()
    );

    let articles = WikipediaClient::new(config.wikipedia.clone())?;
    let generator = GeminiClient::new(config.gemini.clone())?;

    let mut game = Game::new(articles, generator, StdConsole::new(), config.catalog)
        .with_input_limit(config.max_input_attempts);

    game.run().await?;
    Ok(())
}
