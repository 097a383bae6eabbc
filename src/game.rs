//! Round orchestration and the session loop
//!
//! A round walks through: pick category, pick topic, fetch the article,
//! generate statements, parse, shuffle, ask, judge, score. A missing article
//! or unusable model output skips the round; it still counts toward the
//! rounds the player asked for. A generation failure ends the game.

use crate::config::TopicCatalog;
use crate::console::{ask, in_range, wants_replay, Console, InputError};
use crate::display;
use crate::facts::{parse_facts, RoundSet, ROUND_SIZE};
use crate::generator::{FactGenerator, GenerateError};
use crate::round::{evaluate, randomize, Verdict};
use crate::spinner::spin_while;
use crate::types::{Difficulty, RoundOutcome, SessionState, SkipReason, MAX_ROUNDS};
use crate::wiki::ArticleSource;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Generation(#[from] GenerateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The game, wired to its article source, fact generator and console
pub struct Game<A, G, C> {
    articles: A,
    generator: G,
    console: C,
    catalog: TopicCatalog,
    input_limit: Option<u32>,
    rng: StdRng,
}

impl<A, G, C> Game<A, G, C>
where
    A: ArticleSource,
    G: FactGenerator,
    C: Console,
{
    pub fn new(articles: A, generator: G, console: C, catalog: TopicCatalog) -> Self {
        Self {
            articles,
            generator,
            console,
            catalog,
            input_limit: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Give up on a question after `limit` rejected answers
    pub fn with_input_limit(mut self, limit: Option<u32>) -> Self {
        self.input_limit = limit;
        self
    }

    /// Make shuffling reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Play sessions until the player declines a replay or input ends
    pub async fn run(&mut self) -> Result<(), GameError> {
        self.console.say(&display::logo())?;
        self.console.say(&display::welcome())?;

        loop {
            match self.play_session().await {
                Ok(state) => {
                    tracing::info!(
                        "Session finished for {:?}: {}/{}",
                        state.player_name,
                        state.score,
                        state.total_rounds
                    );
                }
                Err(GameError::Input(InputError::Closed)) => {
                    tracing::info!("Input closed, leaving the game");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }

            let Some(answer) = self.console.read_line(&display::replay_prompt())? else {
                return Ok(());
            };
            if !wants_replay(&answer) {
                self.console.say(&display::goodbye())?;
                return Ok(());
            }
        }
    }

    /// Collect settings, play every round, report the final score
    pub async fn play_session(&mut self) -> Result<SessionState, GameError> {
        let mut state = self.setup()?;

        for round in 1..=state.total_rounds {
            self.console.say(&display::round_header(&state, round))?;

            let outcome = self.play_round(&state).await?;
            state.record(&outcome);

            if !outcome.is_skipped() {
                self.console.say(&display::round_score(&state, round))?;
            }
        }

        self.console.say(&display::game_over(&state))?;
        Ok(state)
    }

    /// Play one round. Skips are outcomes, not errors.
    pub async fn play_round(&mut self, state: &SessionState) -> Result<RoundOutcome, GameError> {
        let topics = self.choose_category()?;
        let topic = self.choose_topic(&topics)?;
        self.console.say(&display::topic_selected(&topic))?;

        let article = self
            .articles
            .fetch_article(&topic)
            .await
            .filter(|text| !text.trim().is_empty());
        let Some(article) = article else {
            return self.skip(SkipReason::ArticleUnavailable);
        };

        let raw = spin_while(
            display::searching(),
            self.generator.generate_facts(&article, state.difficulty),
        )
        .await?;

        let set = match RoundSet::try_from(parse_facts(&raw)) {
            Ok(set) => set,
            Err(reason) => return self.skip(reason),
        };

        let set = randomize(set, &mut self.rng);
        self.console.say(&display::statements(set.statements()))?;

        let selection = ask(
            &mut self.console,
            &display::answer_prompt(),
            &display::invalid(&format!("Please enter a valid number (1 to {ROUND_SIZE}).")),
            self.input_limit,
            in_range(1, ROUND_SIZE),
        )?;

        let outcome = match evaluate(set.statements(), selection) {
            Verdict::Correct => {
                self.console.say(&display::correct())?;
                RoundOutcome::Correct
            }
            Verdict::Incorrect { fake } => {
                self.console.say(&display::incorrect(&fake))?;
                RoundOutcome::Incorrect { fake }
            }
            // RoundSet always holds four statements
            Verdict::Undetermined => {
                RoundOutcome::Skipped(SkipReason::MalformedFacts { parsed: 0 })
            }
        };

        tracing::info!("Round on {:?}: {:?}", topic, outcome);
        Ok(outcome)
    }

    fn skip(&mut self, reason: SkipReason) -> Result<RoundOutcome, GameError> {
        tracing::warn!("Skipping round: {}", reason);
        self.console.say(&display::skipped(&reason))?;
        Ok(RoundOutcome::Skipped(reason))
    }

    fn setup(&mut self) -> Result<SessionState, GameError> {
        self.console.say(&display::setup_header())?;

        let name = self
            .console
            .read_line(&display::name_prompt())?
            .ok_or(InputError::Closed)?;

        let difficulty = ask(
            &mut self.console,
            &display::difficulty_prompt(),
            &display::invalid("Please enter 'easy', 'medium', or 'hard'."),
            self.input_limit,
            |s| s.parse::<Difficulty>().ok(),
        )?;

        let rounds = ask(
            &mut self.console,
            &display::rounds_prompt(MAX_ROUNDS),
            &display::invalid(&format!("Please enter a number between 1 and {MAX_ROUNDS}.")),
            self.input_limit,
            |s| s.parse::<u8>().ok().filter(|n| (1..=MAX_ROUNDS).contains(n)),
        )?;

        Ok(SessionState::new(name.trim(), difficulty, rounds))
    }

    fn choose_category(&mut self) -> Result<Vec<String>, GameError> {
        let count = self.catalog.categories().len();
        self.console.say(&display::category_menu(&self.catalog))?;

        let choice = ask(
            &mut self.console,
            &display::category_prompt(count),
            &display::invalid(&format!(
                "Invalid input. Please enter a number from 1 to {count}."
            )),
            self.input_limit,
            in_range(1, count),
        )?;

        Ok(self.catalog.categories()[choice - 1].topics.clone())
    }

    fn choose_topic(&mut self, topics: &[String]) -> Result<String, GameError> {
        self.console.say(&display::topic_menu(topics))?;

        let choice = ask(
            &mut self.console,
            &display::topic_prompt(),
            &display::invalid("Please enter a valid number from the list."),
            self.input_limit,
            in_range(1, topics.len()),
        )?;

        Ok(topics[choice - 1].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Category;
    use crate::console::testing::ScriptedConsole;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::io;

    const GOOD_FACTS: &str =
        "(Fabricated claim @ False) | (Fact one @ True) | (Fact two @ True) | (Fact three @ True)";

    /// Returns the same article for every title and remembers what was asked
    struct FakeArticles {
        text: Option<String>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeArticles {
        fn with(text: Option<&str>) -> Self {
            Self {
                text: text.map(str::to_string),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl ArticleSource for FakeArticles {
        async fn fetch_article(&self, title: &str) -> Option<String> {
            self.requested.borrow_mut().push(title.to_string());
            self.text.clone()
        }
    }

    /// Hands out canned responses in order, repeating the last one
    struct FakeGenerator {
        responses: RefCell<VecDeque<Result<String, GenerateError>>>,
        calls: Cell<usize>,
        difficulties: RefCell<Vec<Difficulty>>,
    }

    impl FakeGenerator {
        fn always(raw: &str) -> Self {
            Self::sequence(vec![Ok(raw.to_string())])
        }

        fn sequence(responses: Vec<Result<String, GenerateError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                calls: Cell::new(0),
                difficulties: RefCell::new(Vec::new()),
            }
        }
    }

    impl FactGenerator for FakeGenerator {
        async fn generate_facts(
            &self,
            _article: &str,
            difficulty: Difficulty,
        ) -> Result<String, GenerateError> {
            self.calls.set(self.calls.get() + 1);
            self.difficulties.borrow_mut().push(difficulty);
            let mut responses = self.responses.borrow_mut();
            if responses.len() == 1 {
                if let Some(Ok(raw)) = responses.front() {
                    return Ok(raw.clone());
                }
            }
            responses.pop_front().unwrap_or(Err(GenerateError::EmptyResponse))
        }
    }

    #[derive(Clone, Copy)]
    enum Strategy {
        AlwaysRight,
        AlwaysWrong,
    }

    /// Scripted console that answers each question by finding the fake on screen
    struct Player {
        script: ScriptedConsole,
        strategy: Strategy,
        last_statements: Vec<String>,
        answers_given: usize,
    }

    impl Player {
        fn new(script: &[&str], strategy: Strategy) -> Self {
            Self {
                script: ScriptedConsole::new(script),
                strategy,
                last_statements: Vec::new(),
                answers_given: 0,
            }
        }
    }

    impl Console for Player {
        fn say(&mut self, text: &str) -> io::Result<()> {
            if text.contains("Which of these four statements") {
                self.last_statements = text.lines().skip(2).map(str::to_string).collect();
            }
            self.script.say(text)
        }

        fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
            if !prompt.contains("Enter the number") {
                return self.script.read_line(prompt);
            }
            self.answers_given += 1;
            let fake = self
                .last_statements
                .iter()
                .position(|line| line.contains("Fabricated"))
                .unwrap_or(0);
            let pick = match self.strategy {
                Strategy::AlwaysRight => fake,
                Strategy::AlwaysWrong => (fake + 1) % ROUND_SIZE,
            };
            Ok(Some((pick + 1).to_string()))
        }
    }

    /// Setup answers followed by a category/topic pick for each round
    fn script(rounds: usize) -> Vec<&'static str> {
        let mut lines = vec!["Ada", "easy"];
        lines.push(match rounds {
            1 => "1",
            2 => "2",
            3 => "3",
            _ => "5",
        });
        for _ in 0..rounds {
            lines.extend(["2", "1"]);
        }
        lines
    }

    #[tokio::test]
    async fn test_all_correct_scores_every_round() {
        let articles = FakeArticles::with(Some("Photosynthesis converts light."));
        let generator = FakeGenerator::always(GOOD_FACTS);
        let player = Player::new(&script(5), Strategy::AlwaysRight);
        let mut game = Game::new(articles, generator, player, TopicCatalog::default()).with_seed(3);

        let state = game.play_session().await.unwrap();

        assert_eq!(state.score, 5);
        assert_eq!(state.total_rounds, 5);
        assert_eq!(game.console().answers_given, 5);
        assert_eq!(game.generator.calls.get(), 5);
        assert_eq!(
            game.articles.requested.borrow().as_slice(),
            vec!["Photosynthesis".to_string(); 5].as_slice()
        );
    }

    #[tokio::test]
    async fn test_wrong_answer_reveals_fake() {
        let articles = FakeArticles::with(Some("text"));
        let generator = FakeGenerator::always(GOOD_FACTS);
        let player = Player::new(&script(1), Strategy::AlwaysWrong);
        let mut game = Game::new(articles, generator, player, TopicCatalog::default());

        let state = game.play_session().await.unwrap();

        assert_eq!(state.score, 0);
        let transcript = game.console().script.transcript();
        assert!(transcript.contains("INCORRECT"));
        assert!(transcript.contains("\"Fabricated claim\""));
    }

    #[tokio::test]
    async fn test_missing_article_skips_without_generation() {
        let articles = FakeArticles::with(None);
        let generator = FakeGenerator::always(GOOD_FACTS);
        let player = Player::new(&script(2), Strategy::AlwaysRight);
        let mut game = Game::new(articles, generator, player, TopicCatalog::default());

        let state = game.play_session().await.unwrap();

        assert_eq!(state.score, 0);
        assert_eq!(game.generator.calls.get(), 0);
        assert_eq!(game.console().answers_given, 0);
        let transcript = game.console().script.transcript();
        assert!(transcript.contains("ROUND 2/2"));
        assert!(transcript.contains("could not be retrieved"));
    }

    #[tokio::test]
    async fn test_blank_article_counts_as_missing() {
        let mut game = Game::new(
            FakeArticles::with(Some("   \n")),
            FakeGenerator::always(GOOD_FACTS),
            Player::new(&script(1), Strategy::AlwaysRight),
            TopicCatalog::default(),
        );

        game.play_session().await.unwrap();
        assert_eq!(game.generator.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_malformed_output_skips_without_evaluation() {
        let articles = FakeArticles::with(Some("text"));
        let generator = FakeGenerator::always("(A @ False) | (B @ True)");
        let player = Player::new(&script(2), Strategy::AlwaysRight);
        let mut game = Game::new(articles, generator, player, TopicCatalog::default());

        let state = game.play_session().await.unwrap();

        assert_eq!(state.score, 0);
        assert_eq!(game.generator.calls.get(), 2);
        assert_eq!(game.console().answers_given, 0);
        let transcript = game.console().script.transcript();
        assert!(!transcript.contains("Which of these four statements"));
        assert!(transcript.contains("failed to generate 4 valid facts"));
    }

    #[tokio::test]
    async fn test_two_fakes_are_skipped() {
        let mut game = Game::new(
            FakeArticles::with(Some("text")),
            FakeGenerator::always("(A @ False) | (B @ False) | (C @ True) | (D @ True)"),
            Player::new(&script(1), Strategy::AlwaysRight),
            TopicCatalog::default(),
        );

        let state = game.play_session().await.unwrap();
        assert_eq!(state.score, 0);
        assert_eq!(game.console().answers_given, 0);
    }

    #[tokio::test]
    async fn test_skips_and_scores_mix() {
        let generator = FakeGenerator::sequence(vec![
            Ok("garbage".to_string()),
            Ok(GOOD_FACTS.to_string()),
        ]);
        let mut game = Game::new(
            FakeArticles::with(Some("text")),
            generator,
            Player::new(&script(3), Strategy::AlwaysRight),
            TopicCatalog::default(),
        );

        let state = game.play_session().await.unwrap();

        // First round skipped, the remaining two answered
        assert_eq!(state.score, 2);
        assert_eq!(game.console().answers_given, 2);
        assert!(game.console().script.transcript().contains("FINAL SCORE:"));
    }

    #[tokio::test]
    async fn test_generation_failure_is_fatal() {
        let generator = FakeGenerator::sequence(vec![Err(GenerateError::MissingApiKey)]);
        let mut game = Game::new(
            FakeArticles::with(Some("text")),
            generator,
            Player::new(&script(3), Strategy::AlwaysRight),
            TopicCatalog::default(),
        );

        let err = game.play_session().await.unwrap_err();

        assert!(matches!(err, GameError::Generation(GenerateError::MissingApiKey)));
        assert_eq!(game.generator.calls.get(), 1);
        assert!(!game.console().script.transcript().contains("ROUND 2/3"));
    }

    #[tokio::test]
    async fn test_invalid_inputs_are_reprompted() {
        let inputs = [
            "Ada", "impossible", "HARD", "0", "11", "1", // setup
            "4", "x", "3", // category
            "99", "6", // topic
        ];
        let articles = FakeArticles::with(Some("text"));
        let mut game = Game::new(
            articles,
            FakeGenerator::always(GOOD_FACTS),
            Player::new(&inputs, Strategy::AlwaysRight),
            TopicCatalog::default(),
        );

        let state = game.play_session().await.unwrap();

        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(game.generator.difficulties.borrow().as_slice(), [Difficulty::Hard]);
        assert_eq!(state.total_rounds, 1);
        assert_eq!(state.score, 1);
        assert_eq!(game.articles.requested.borrow()[0], "Republic");
    }

    #[tokio::test]
    async fn test_input_limit_stops_the_session() {
        let mut game = Game::new(
            FakeArticles::with(Some("text")),
            FakeGenerator::always(GOOD_FACTS),
            ScriptedConsole::new(&["Ada", "x", "y"]),
            TopicCatalog::default(),
        )
        .with_input_limit(Some(2));

        let err = game.play_session().await.unwrap_err();
        assert!(matches!(err, GameError::Input(InputError::TooManyAttempts(2))));
    }

    #[tokio::test]
    async fn test_injected_catalog() {
        let catalog = TopicCatalog::new(vec![Category::new("space", &["Mars", "Moon"])]).unwrap();
        let mut game = Game::new(
            FakeArticles::with(Some("text")),
            FakeGenerator::always(GOOD_FACTS),
            Player::new(&["Ada", "medium", "1", "1", "2"], Strategy::AlwaysRight),
            catalog,
        );

        let state = game.play_session().await.unwrap();

        assert_eq!(state.score, 1);
        assert_eq!(game.articles.requested.borrow().as_slice(), ["Moon".to_string()]);
        assert!(game.console().script.transcript().contains("Space"));
    }

    #[tokio::test]
    async fn test_run_replays_until_declined() {
        let mut inputs = script(1);
        inputs.push("yes");
        inputs.extend(["Grace", "medium", "1", "3", "2"]);
        inputs.push("No");

        let mut game = Game::new(
            FakeArticles::with(Some("text")),
            FakeGenerator::always(GOOD_FACTS),
            Player::new(&inputs, Strategy::AlwaysRight),
            TopicCatalog::default(),
        );

        game.run().await.unwrap();

        let console = game.console();
        assert_eq!(console.answers_given, 2);
        assert_eq!(console.script.remaining(), 0);
        let transcript = console.script.transcript();
        assert!(transcript.contains("Grace"));
        assert!(transcript.contains("Goodbye"));
        assert_eq!(
            game.articles.requested.borrow().as_slice(),
            ["Photosynthesis".to_string(), "Socialism".to_string()]
        );
    }

    #[tokio::test]
    async fn test_run_ends_cleanly_when_input_closes() {
        let mut game = Game::new(
            FakeArticles::with(Some("text")),
            FakeGenerator::always(GOOD_FACTS),
            ScriptedConsole::new(&["Ada", "easy"]),
            TopicCatalog::default(),
        );

        assert!(game.run().await.is_ok());
        assert_eq!(game.generator.calls.get(), 0);
    }
}
