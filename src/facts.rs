//! Parsing model output into statements
//!
//! The model is asked for `(sentence @ Bool) | (sentence @ Bool) | ...`.
//! Nothing guarantees it complies, so parsing never fails: it returns what
//! it could recover and lets the caller decide whether that is a round.

use crate::types::{SkipReason, Statement};

/// Statements per round
pub const ROUND_SIZE: usize = 4;

const RECORD_SEPARATOR: char = '|';
const VALUE_SEPARATOR: char = '@';

/// Parse the pipe-delimited model output into statements.
///
/// Records that do not split into exactly `text @ bool` are dropped. When
/// exactly four records survive they are returned as-is, even if more than
/// one claims to be false. Any other count is a failure signal: only the
/// records with non-empty text are returned.
pub fn parse_facts(raw: &str) -> Vec<Statement> {
    let mut statements = Vec::new();

    for record in raw.trim().split(RECORD_SEPARATOR) {
        let parts: Vec<&str> = record.split(VALUE_SEPARATOR).collect();
        if parts.len() != 2 {
            tracing::debug!("Dropping malformed record: {:?}", record);
            continue;
        }

        let text = parts[0].trim().trim_start_matches('(').trim();
        let token = parts[1].trim().trim_end_matches(')').trim();

        statements.push(Statement::new(text, token.eq_ignore_ascii_case("true")));
    }

    if statements.len() != ROUND_SIZE {
        statements.retain(|s| !s.text.is_empty());
    }

    statements
}

/// Exactly four statements with exactly one fake among them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSet {
    statements: [Statement; ROUND_SIZE],
}

impl RoundSet {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub(crate) fn statements_mut(&mut self) -> &mut [Statement] {
        &mut self.statements
    }

    /// Position of the fake statement in the current order
    pub fn fake_index(&self) -> usize {
        self.statements
            .iter()
            .position(|s| !s.is_true)
            .unwrap_or_default()
    }
}

impl TryFrom<Vec<Statement>> for RoundSet {
    type Error = SkipReason;

    fn try_from(statements: Vec<Statement>) -> Result<Self, Self::Error> {
        let well_formed = statements.iter().filter(|s| !s.text.is_empty()).count();
        if statements.len() != ROUND_SIZE || well_formed != ROUND_SIZE {
            return Err(SkipReason::MalformedFacts {
                parsed: well_formed,
            });
        }

        let fakes = statements.iter().filter(|s| !s.is_true).count();
        if fakes != 1 {
            return Err(SkipReason::AmbiguousFake { fakes });
        }

        let statements: [Statement; ROUND_SIZE] = statements
            .try_into()
            .map_err(|_| SkipReason::MalformedFacts { parsed: well_formed })?;

        Ok(Self { statements })
    }
}
