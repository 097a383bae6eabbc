//! Everything the player reads
//!
//! Text is built here and handed to a [`crate::console::Console`]. Colors are
//! applied only when stdout is a terminal and `NO_COLOR` is unset.

use crate::config::TopicCatalog;
use crate::types::{SessionState, SkipReason, Statement};
use owo_colors::{OwoColorize, Style};
use std::io::IsTerminal;
use std::sync::OnceLock;

const RULE: &str = "_________________________________________________________________";
const DOUBLE_RULE: &str = "=======================================================================";

fn colors_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
    })
}

fn paint(text: impl std::fmt::Display, style: Style) -> String {
    if colors_enabled() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

fn red() -> Style {
    Style::new().bright_red()
}

fn green() -> Style {
    Style::new().bright_green()
}

fn yellow() -> Style {
    Style::new().bright_yellow()
}

fn blue() -> Style {
    Style::new().bright_blue()
}

fn cyan() -> Style {
    Style::new().bright_cyan()
}

fn magenta() -> Style {
    Style::new().bright_magenta()
}

pub fn logo() -> String {
    let art = r"
  ███████╗ █████╗ ██╗  ██╗███████╗    ███████╗██╗███╗   ██╗██████╗ ███████╗██████╗
  ██╔════╝██╔══██╗██║ ██╔╝██╔════╝    ██╔════╝██║████╗  ██║██╔══██╗██╔════╝██╔══██╗
  █████╗  ███████║█████╔╝ █████╗      █████╗  ██║██╔██╗ ██║██║  ██║█████╗  ██████╔╝
  ██╔══╝  ██╔══██║██╔═██╗ ██╔══╝      ██╔══╝  ██║██║╚██╗██║██║  ██║██╔══╝  ██╔══██╗
  ██║     ██║  ██║██║  ██╗███████╗    ██║     ██║██║ ╚████║██████╔╝███████╗██║  ██║
  ╚═╝     ╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝    ╚═╝     ╚═╝╚═╝  ╚═══╝╚═════╝ ╚══════╝╚═╝  ╚═╝";

    [
        paint(DOUBLE_RULE, blue()),
        paint(art, blue().bold()),
        paint(
            "\n         🕵️  Facts from Wikipedia, Fakes by Gemini!\n",
            yellow().bold(),
        ),
        paint(DOUBLE_RULE, blue()),
    ]
    .join("\n")
}

pub fn welcome() -> String {
    format!(
        "\n{}\n{}",
        paint("⭐️ Welcome to FAKE FINDER! Test Your Knowledge! ⭐️", magenta().bold()),
        paint("--- Get Ready to Begin ---", cyan())
    )
}

pub fn setup_header() -> String {
    paint("\n--- Player Setup ---", yellow())
}

pub fn name_prompt() -> String {
    paint("👤 Enter your name: ", cyan().bold())
}

pub fn difficulty_prompt() -> String {
    format!(
        "{}{}{}{}",
        paint("🕹️ Choose difficulty (Easy/", blue().bold()),
        paint("Medium", yellow()),
        paint("/", blue().bold()),
        paint("Hard): ", red().bold())
    )
}

pub fn rounds_prompt(max: u8) -> String {
    paint(format!("🔢 How many rounds (1-{max})?: "), cyan().bold())
}

pub fn invalid(message: &str) -> String {
    paint(format!("❌ {message}\n"), red())
}

pub fn category_menu(catalog: &TopicCatalog) -> String {
    let palette = [cyan(), yellow(), blue()];
    let mut lines = vec![
        paint(format!("\n{DOUBLE_RULE}"), yellow()),
        paint("📚 Choose Your Challenge Category:", magenta().bold()),
    ];
    for (index, category) in catalog.categories().iter().enumerate() {
        lines.push(paint(
            format!("{}. {}", index + 1, capitalize(&category.name)),
            palette[index % palette.len()],
        ));
    }
    lines.push(paint(DOUBLE_RULE, yellow()));
    lines.join("\n")
}

pub fn category_prompt(count: usize) -> String {
    let choices: Vec<String> = (1..=count).map(|n| n.to_string()).collect();
    paint(
        format!("➡️ Provide your choice ({}): ", choices.join("/")),
        magenta().bold(),
    )
}

pub fn topic_menu(topics: &[String]) -> String {
    let mut lines = vec![
        paint("--- Topic Selection ---", cyan()),
        paint("Choose a specific topic to begin the round:", Style::new().bold()),
    ];
    for (index, topic) in topics.iter().enumerate() {
        lines.push(format!(
            "{} {}",
            paint(format!("{}.", index + 1), green()),
            paint(topic, yellow())
        ));
    }
    lines.join("\n")
}

pub fn topic_prompt() -> String {
    paint("➡️ Select one number: ", blue().bold())
}

pub fn round_header(state: &SessionState, round: u8) -> String {
    format!(
        "\n{}\n{} {} | {} {} | {} {}",
        paint(
            format!(
                "============================== ROUND {}/{} ==============================",
                round, state.total_rounds
            ),
            yellow()
        ),
        paint("PLAYER:", cyan().bold()),
        state.player_name,
        paint("LEVEL:", cyan().bold()),
        state.difficulty,
        paint("CURRENT SCORE:", cyan().bold()),
        state.score
    )
}

pub fn topic_selected(topic: &str) -> String {
    format!(
        "\n{}{}\n\n{}",
        paint("Topic Selected: ", Style::new().bold()),
        paint(topic, yellow()),
        paint(format!("--- Retrieving article on {topic} ---"), cyan())
    )
}

pub fn searching() -> &'static str {
    "Searching for facts ..."
}

pub fn skipped(reason: &SkipReason) -> String {
    let message = match reason {
        SkipReason::ArticleUnavailable => {
            "Skipping this round: the Wikipedia article could not be retrieved.".to_string()
        }
        SkipReason::MalformedFacts { .. } | SkipReason::AmbiguousFake { .. } => {
            format!(
                "Skipping: AI failed to generate 4 valid facts ({reason}). Try a different topic."
            )
        }
    };
    paint(message, red())
}

pub fn statements(statements: &[Statement]) -> String {
    let mut lines = vec![
        RULE.to_string(),
        paint("🔍 Which of these four statements is a FAKE story?", magenta().bold()),
    ];
    for (index, statement) in statements.iter().enumerate() {
        lines.push(format!(
            "{} {}",
            paint(format!("{}.", index + 1), green().bold()),
            statement.text
        ));
    }
    lines.join("\n")
}

pub fn answer_prompt() -> String {
    paint("➡️ Enter the number (1/2/3/4): ", yellow().bold())
}

pub fn correct() -> String {
    paint("\n🎉 That's CORRECT! You found the fake fact! ", green().bold())
}

pub fn incorrect(fake: &str) -> String {
    format!(
        "{}\n\nThe fake sentence was:\n{}",
        paint("\n🚫 Sorry, that's INCORRECT.", red().bold()),
        paint(format!("\"{fake}\""), cyan())
    )
}

pub fn round_score(state: &SessionState, round: u8) -> String {
    format!(
        "\n{} {} | {} {}/{}\n{}",
        paint("PLAYER:", cyan().bold()),
        state.player_name,
        paint("SCORE:", cyan().bold()),
        state.score,
        round,
        RULE
    )
}

pub fn game_over(state: &SessionState) -> String {
    format!(
        "\n{}\n{} {}/{}!",
        paint(
            "================================== GAME OVER ======================================",
            cyan()
        ),
        paint("FINAL SCORE:", green().bold()),
        state.score,
        state.total_rounds
    )
}

pub fn replay_prompt() -> String {
    paint("\nWould you like to play again? (Y/N): ", yellow().bold())
}

pub fn goodbye() -> String {
    paint("\nThank you for playing Fake Finder! Goodbye!", magenta())
}

pub fn generation_failure(error: &dyn std::fmt::Display) -> String {
    format!(
        "{}\n{}",
        paint(format!("\nAn error occurred with the Gemini API call: {error}"), red()),
        paint("Ensure GEMINI_API_KEY is set and the model is available.", red())
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
