//! Scoring strategies: positive evidence that a mention belongs to a chain.
//!
//! A [`Matcher`] inspects a candidate [`Mention`] against a [`MentionChain`]
//! and returns either its weight or [`NO_MATCH`]. Scores are integers where
//! higher means stronger evidence; they are not probabilities. A chain's
//! overall score is the maximum over its active matchers.
//!
//! | Matcher | Succeeds when |
//! |---------|---------------|
//! | [`ExactPhraseMatch`] | tokens equal some member's tokens |
//! | [`SequenceSubstringMatch`] | shares a contiguous run of `min_run` tokens |
//! | [`SynonymMatch`] | normalized phrase registered as a synonym of a member's |
//! | [`EntityTypeMatch`] | pronominal candidate of the accepted type |

use crate::{EntityType, Error, Mention, MentionChain, Result};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Integer match score. Higher is stronger evidence.
pub type Score = i32;

/// Sentinel score for "this matcher does not apply".
pub const NO_MATCH: Score = Score::MIN;

/// A scoring heuristic.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Score `candidate` against `chain`, or [`NO_MATCH`].
    fn score(&self, candidate: &Mention, chain: &MentionChain) -> Score;
}

fn check_weight(matcher: &str, weight: Score) -> Result<Score> {
    if weight <= 0 {
        return Err(Error::invalid_input(format!(
            "{} weight must be positive, got {}",
            matcher, weight
        )));
    }
    Ok(weight)
}

fn verdict(matched: bool, weight: Score) -> Score {
    if matched {
        weight
    } else {
        NO_MATCH
    }
}

// =============================================================================
// ExactPhraseMatch
// =============================================================================

/// Candidate tokens equal (ordered, same length) those of some member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactPhraseMatch {
    weight: Score,
}

impl ExactPhraseMatch {
    /// Create with the score returned on success.
    pub fn new(weight: Score) -> Result<Self> {
        Ok(Self {
            weight: check_weight("ExactPhraseMatch", weight)?,
        })
    }

    /// Score returned on success.
    #[must_use]
    pub fn weight(&self) -> Score {
        self.weight
    }
}

impl Matcher for ExactPhraseMatch {
    fn name(&self) -> &'static str {
        "exact_phrase"
    }

    fn score(&self, candidate: &Mention, chain: &MentionChain) -> Score {
        let tokens = candidate.normal_tokens();
        let matched = !tokens.is_empty()
            && chain
                .mentions()
                .iter()
                .any(|member| member.normal_tokens() == tokens);
        verdict(matched, self.weight)
    }
}

// =============================================================================
// SequenceSubstringMatch
// =============================================================================

/// Candidate shares a contiguous ordered token run of at least `min_run`
/// with some member, or equals a member's tokens outright.
///
/// This is substring matching over token sequences, not bag-of-words:
/// `[smith, john]` shares no run of length 2 with `[john, smith]`. The
/// whole-sequence case is what lets a short candidate (say `[ibm]`) match
/// once a member with exactly those tokens has joined, even though it can
/// never reach a longer `min_run` on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceSubstringMatch {
    min_run: usize,
    weight: Score,
}

impl SequenceSubstringMatch {
    /// Create with the minimum run length and the score returned on success.
    pub fn new(min_run: usize, weight: Score) -> Result<Self> {
        if min_run == 0 {
            return Err(Error::invalid_input(
                "SequenceSubstringMatch min_run must be at least 1",
            ));
        }
        Ok(Self {
            min_run,
            weight: check_weight("SequenceSubstringMatch", weight)?,
        })
    }

    /// Minimum shared run length.
    #[must_use]
    pub fn min_run(&self) -> usize {
        self.min_run
    }

    /// Score returned on success.
    #[must_use]
    pub fn weight(&self) -> Score {
        self.weight
    }

    fn matches_tokens(&self, candidate: &[String], member: &[String]) -> bool {
        if candidate.is_empty() || member.is_empty() {
            return false;
        }
        if candidate == member {
            return true;
        }
        longest_common_run(candidate, member) >= self.min_run
    }
}

impl Matcher for SequenceSubstringMatch {
    fn name(&self) -> &'static str {
        "sequence_substring"
    }

    fn score(&self, candidate: &Mention, chain: &MentionChain) -> Score {
        let tokens = candidate.normal_tokens();
        let matched = chain
            .mentions()
            .iter()
            .any(|member| self.matches_tokens(tokens, member.normal_tokens()));
        verdict(matched, self.weight)
    }
}

/// Length of the longest contiguous run shared by `a` and `b`.
pub fn longest_common_run<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    // Rolling row of the classic suffix-length table.
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best = 0;
    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y { prev[j] + 1 } else { 0 };
            best = best.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}

// =============================================================================
// SynonymMatch
// =============================================================================

/// Candidate's normalized phrase is a registered synonym of some member's.
///
/// The synonym table is shared: clones of a `SynonymMatch` see the same
/// pairs, so registering a synonym after chains exist affects their scoring
/// immediately. Pairs are unordered.
///
/// ```rust
/// use coref_chains::SynonymMatch;
///
/// let synonyms = SynonymMatch::new(3).unwrap();
/// synonyms.add_synonym("ibm", "international business machines");
/// assert!(synonyms.are_synonyms("international business machines", "ibm"));
/// ```
#[derive(Debug, Clone)]
pub struct SynonymMatch {
    weight: Score,
    table: Arc<RwLock<HashSet<(String, String)>>>,
}

impl SynonymMatch {
    /// Create with an empty table and the score returned on success.
    pub fn new(weight: Score) -> Result<Self> {
        Ok(Self {
            weight: check_weight("SynonymMatch", weight)?,
            table: Arc::new(RwLock::new(HashSet::new())),
        })
    }

    /// Score returned on success.
    #[must_use]
    pub fn weight(&self) -> Score {
        self.weight
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    /// Register `a` and `b` as synonyms (in both directions).
    pub fn add_synonym(&self, a: &str, b: &str) {
        self.table.write().insert(Self::key(a, b));
    }

    /// Remove the pair, whichever order it was registered in.
    pub fn remove_synonym(&self, a: &str, b: &str) {
        self.table.write().remove(&Self::key(a, b));
    }

    /// Remove every pair.
    pub fn clear_synonyms(&self) {
        self.table.write().clear();
    }

    /// True if the pair is registered.
    #[must_use]
    pub fn are_synonyms(&self, a: &str, b: &str) -> bool {
        self.table.read().contains(&Self::key(a, b))
    }

    /// Number of registered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// True if no pairs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }
}

impl Matcher for SynonymMatch {
    fn name(&self) -> &'static str {
        "synonym"
    }

    fn score(&self, candidate: &Mention, chain: &MentionChain) -> Score {
        let table = self.table.read();
        if table.is_empty() {
            return NO_MATCH;
        }
        let phrase = candidate.normal_phrase();
        let matched = chain
            .mentions()
            .iter()
            .any(|member| table.contains(&Self::key(phrase, member.normal_phrase())));
        verdict(matched, self.weight)
    }
}

// =============================================================================
// EntityTypeMatch
// =============================================================================

/// Which entity type an [`EntityTypeMatch`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptedType {
    /// Whatever the chain's own type is.
    SameAsChain,
    /// A fixed label, e.g. a pronoun type.
    Fixed(EntityType),
}

/// Candidate's entity type equals the accepted type.
///
/// Only pronominal candidates are scored. A named candidate never matches on
/// type alone, so two PERSON names with nothing else in common stay apart.
///
/// Chains of pronoun-antecedent types (PERSON by default) carry one instance
/// per pronoun type they still accept. Every other chain carries
/// [`EntityTypeMatch::same_as_chain`] instances; see
/// [`CompositionTable`](crate::CompositionTable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeMatch {
    accepted: AcceptedType,
    weight: Score,
}

impl EntityTypeMatch {
    /// Accept candidates whose type equals the chain's type.
    pub fn same_as_chain(weight: Score) -> Result<Self> {
        Ok(Self {
            accepted: AcceptedType::SameAsChain,
            weight: check_weight("EntityTypeMatch", weight)?,
        })
    }

    /// Accept candidates of one fixed type.
    pub fn accepting(entity_type: EntityType, weight: Score) -> Result<Self> {
        if entity_type.is_blank() {
            return Err(Error::invalid_input(
                "EntityTypeMatch needs a non-empty entity type",
            ));
        }
        Ok(Self {
            accepted: AcceptedType::Fixed(entity_type),
            weight: check_weight("EntityTypeMatch", weight)?,
        })
    }

    /// The accepted type.
    #[must_use]
    pub fn accepted(&self) -> &AcceptedType {
        &self.accepted
    }

    /// Score returned on success.
    #[must_use]
    pub fn weight(&self) -> Score {
        self.weight
    }
}

impl Matcher for EntityTypeMatch {
    fn name(&self) -> &'static str {
        "entity_type"
    }

    fn score(&self, candidate: &Mention, chain: &MentionChain) -> Score {
        if !candidate.is_pronominal() {
            return NO_MATCH;
        }
        let accepted = match &self.accepted {
            AcceptedType::SameAsChain => chain.entity_type(),
            AcceptedType::Fixed(t) => t,
        };
        verdict(candidate.entity_type() == accepted, self.weight)
    }
}
