//! Within-document coreference resolution.
//!
//! [`WithinDocCoref`] is a single-pass, append-only clusterer. Each incoming
//! mention is scored against every existing chain in creation order:
//!
//! 1. chains whose killers veto the mention are skipped;
//! 2. the chain with the strictly greatest score wins, so on a tie the
//!    earlier chain keeps the mention;
//! 3. if no chain scored above [`NO_MATCH`], a new chain is promoted.
//!
//! Assignments are final. Chains never merge or split.
//!
//! # Pronouns
//!
//! Pronoun candidates additionally prefer recent antecedents. Chains last
//! seen more than `max_pronoun_distance` sentences ago are not considered,
//! and each sentence of distance costs `pronoun_distance_penalty` points.
//! Named mentions are scored without regard to distance.
//!
//! # Example
//!
//! ```rust
//! use coref_chains::{EntityType, WithinDocCoref};
//!
//! let mut coref = WithinDocCoref::english();
//! let ids: Vec<usize> = [
//!     ("Mr. John Smith", EntityType::Person, 1),
//!     ("John Smith", EntityType::Person, 2),
//!     ("Johanna Smith", EntityType::Person, 3),
//!     ("he", EntityType::MalePronoun, 3),
//!     ("IBM", EntityType::Organization, 3),
//! ]
//! .into_iter()
//! .map(|(phrase, ty, sentence)| coref.resolve(phrase, ty, sentence))
//! .collect();
//!
//! assert_eq!(ids, [0, 0, 1, 1, 2]);
//! ```

use crate::chain::{ChainId, MentionChain};
use crate::matchers::{Score, NO_MATCH};
use crate::{EntityType, Gender, Mention, MentionFactory, SynonymMatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Coreference state for one document.
#[derive(Debug, Clone)]
pub struct WithinDocCoref {
    factory: MentionFactory,
    chains: Vec<MentionChain>,
    last_sentence_offset: Option<usize>,
}

impl WithinDocCoref {
    /// Start a document using `factory`'s configuration.
    ///
    /// The resolver keeps its own copy of the factory with chain ids starting
    /// at 0; the synonym table stays shared with `factory`.
    #[must_use]
    pub fn new(factory: &MentionFactory) -> Self {
        Self {
            factory: factory.for_document(),
            chains: Vec::new(),
            last_sentence_offset: None,
        }
    }

    /// Start a document with the built-in English configuration.
    #[must_use]
    pub fn english() -> Self {
        Self::new(&MentionFactory::english())
    }

    /// Factory used for this document.
    #[must_use]
    pub fn factory(&self) -> &MentionFactory {
        &self.factory
    }

    /// Shared synonym matcher.
    #[must_use]
    pub fn synonyms(&self) -> &SynonymMatch {
        self.factory.synonyms()
    }

    /// Chains in creation (= identifier) order.
    #[must_use]
    pub fn chains(&self) -> &[MentionChain] {
        &self.chains
    }

    /// Chain by identifier.
    #[must_use]
    pub fn chain(&self, id: ChainId) -> Option<&MentionChain> {
        self.chains.get(id)
    }

    /// Number of chains so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// True before the first mention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Build a mention from a raw phrase and resolve it.
    pub fn resolve(
        &mut self,
        phrase: &str,
        entity_type: impl Into<EntityType>,
        sentence_offset: usize,
    ) -> ChainId {
        let mention = self.factory.create(phrase, entity_type);
        self.resolve_mention(mention, sentence_offset)
    }

    /// Assign `mention` to an existing chain or found a new one, returning
    /// the chain identifier.
    ///
    /// Mentions must arrive in reading order with non-decreasing
    /// `sentence_offset`. A regression is logged and otherwise tolerated.
    pub fn resolve_mention(&mut self, mention: Mention, sentence_offset: usize) -> ChainId {
        if let Some(last) = self.last_sentence_offset {
            if sentence_offset < last {
                log::warn!(
                    "sentence offset went backwards ({} after {}) at {}",
                    sentence_offset,
                    last,
                    mention
                );
            }
        }
        self.last_sentence_offset = Some(
            self.last_sentence_offset
                .map_or(sentence_offset, |last| last.max(sentence_offset)),
        );

        let mut best: Option<(usize, Score)> = None;
        for (idx, chain) in self.chains.iter().enumerate() {
            let Some(score) = self.scored(&mention, chain, sentence_offset) else {
                continue;
            };
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((idx, score));
            }
        }

        match best {
            Some((idx, score)) if score > NO_MATCH => {
                let chain = &mut self.chains[idx];
                log::debug!(
                    "{} joins chain {} (score {})",
                    mention,
                    chain.identifier(),
                    score
                );
                chain.add(mention, sentence_offset);
                chain.identifier()
            }
            _ => {
                let chain = self.factory.promote(mention, sentence_offset);
                let id = chain.identifier();
                debug_assert_eq!(id, self.chains.len());
                self.chains.push(chain);
                id
            }
        }
    }

    /// Score of `mention` against `chain`, or `None` if the chain is out of
    /// consideration (vetoed, unmatched, or too far back for a pronoun).
    fn scored(&self, mention: &Mention, chain: &MentionChain, sentence_offset: usize) -> Option<Score> {
        let config = self.factory.config();
        let distance = sentence_offset.saturating_sub(chain.max_sentence_offset());
        if mention.is_pronominal() && distance > config.max_pronoun_distance as usize {
            return None;
        }
        // match_score runs the killers; a veto comes back as NO_MATCH.
        let score = chain.match_score(mention);
        if score == NO_MATCH {
            return None;
        }
        if !mention.is_pronominal() {
            return Some(score);
        }
        let penalty = i32::try_from(distance)
            .unwrap_or(i32::MAX)
            .saturating_mul(config.pronoun_distance_penalty);
        // A penalized match must stay a match.
        Some(score.saturating_sub(penalty).max(NO_MATCH + 1))
    }

    /// Plain-data view of every chain, in identifier order.
    #[must_use]
    pub fn summaries(&self) -> Vec<ChainSummary> {
        self.chains.iter().map(ChainSummary::from).collect()
    }
}

/// Serializable snapshot of a chain for downstream output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSummary {
    /// Chain identifier.
    pub id: ChainId,
    /// Entity type label of the founding mention.
    pub entity_type: EntityType,
    /// Longest named member phrase.
    pub canonical: String,
    /// Member phrases in insertion order.
    pub mentions: Vec<String>,
    /// Union of member honorifics.
    pub honorifics: BTreeSet<String>,
    /// Latched gender, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Largest sentence offset of any member.
    pub max_sentence_offset: usize,
}

impl From<&MentionChain> for ChainSummary {
    fn from(chain: &MentionChain) -> Self {
        Self {
            id: chain.identifier(),
            entity_type: chain.entity_type().clone(),
            canonical: chain.canonical_phrase().to_string(),
            mentions: chain.mentions().iter().map(|m| m.phrase().to_string()).collect(),
            honorifics: chain.honorifics().clone(),
            gender: chain.gender(),
            max_sentence_offset: chain.max_sentence_offset(),
        }
    }
}
