//! Shuffling a round and judging the player's pick

use crate::facts::RoundSet;
use crate::types::Statement;
use rand::seq::SliceRandom;
use rand::Rng;

/// Outcome of comparing a selection against the statements on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    /// Wrong pick; carries the fake statement so it can be revealed
    Incorrect { fake: String },
    /// Nothing to judge against (no statements at all)
    Undetermined,
}

/// Put the four statements in a uniformly random order.
///
/// The returned order is the only record of where the fake ended up.
pub fn randomize<R: Rng + ?Sized>(mut set: RoundSet, rng: &mut R) -> RoundSet {
    set.statements_mut().shuffle(rng);
    set
}

/// Judge a 1-based `selection` against the first fake statement.
///
/// A set without any fake has no right answer, so every pick is incorrect
/// and the revealed fake is empty.
pub fn evaluate(statements: &[Statement], selection: usize) -> Verdict {
    if statements.is_empty() {
        return Verdict::Undetermined;
    }

    match statements.iter().position(|s| !s.is_true) {
        Some(fake_index) if selection.checked_sub(1) == Some(fake_index) => Verdict::Correct,
        Some(fake_index) => Verdict::Incorrect {
            fake: statements[fake_index].text.clone(),
        },
        None => Verdict::Incorrect {
            fake: String::new(),
        },
    }
}
