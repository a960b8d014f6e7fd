//! Accumulating clusters of co-referring mentions.

use crate::composition::{CompositionKey, CompositionTable};
use crate::matchers::{Score, NO_MATCH};
use crate::{EntityType, Gender, Killer, Matcher, Mention};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Dense, per-document chain identifier (0, 1, 2, ...).
pub type ChainId = usize;

/// An append-only cluster of mentions believed to denote one entity.
///
/// Chains are created by [`MentionFactory::promote`](crate::MentionFactory::promote)
/// and grow only through [`MentionChain::add`]. Their derived attributes are
/// monotone:
///
/// - `entity_type` is the founding mention's type, forever;
/// - `honorifics` only grow;
/// - `gender` is latched by the first mention that has one;
/// - `max_sentence_offset` never decreases.
#[derive(Debug, Clone)]
pub struct MentionChain {
    identifier: ChainId,
    entity_type: EntityType,
    honorifics: BTreeSet<String>,
    gender: Option<Gender>,
    max_sentence_offset: usize,
    mentions: Vec<Mention>,
    composition: CompositionKey,
    matchers: Vec<Arc<dyn Matcher>>,
    killers: Vec<Arc<dyn Killer>>,
    table: Arc<CompositionTable>,
}

impl MentionChain {
    pub(crate) fn new(
        identifier: ChainId,
        mention: Mention,
        sentence_offset: usize,
        table: Arc<CompositionTable>,
    ) -> Self {
        let mut chain = Self {
            identifier,
            entity_type: mention.entity_type().clone(),
            honorifics: BTreeSet::new(),
            gender: None,
            max_sentence_offset: sentence_offset,
            mentions: Vec::new(),
            composition: CompositionKey::PureEntity,
            matchers: Vec::new(),
            killers: Vec::new(),
            table,
        };
        chain.add(mention, sentence_offset);
        chain
    }

    /// Identifier assigned at creation.
    #[must_use]
    pub fn identifier(&self) -> ChainId {
        self.identifier
    }

    /// Entity type of the founding mention.
    #[must_use]
    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    /// Union of all members' honorifics.
    #[must_use]
    pub fn honorifics(&self) -> &BTreeSet<String> {
        &self.honorifics
    }

    /// Gender latched from the first member that had one.
    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Largest sentence offset of any member.
    #[must_use]
    pub fn max_sentence_offset(&self) -> usize {
        self.max_sentence_offset
    }

    /// Members in insertion order.
    #[must_use]
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// Always false: a chain is founded with one mention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// Current composition key.
    #[must_use]
    pub fn composition(&self) -> CompositionKey {
        self.composition
    }

    /// Active matchers.
    #[must_use]
    pub fn matchers(&self) -> &[Arc<dyn Matcher>] {
        &self.matchers
    }

    /// Active killers.
    #[must_use]
    pub fn killers(&self) -> &[Arc<dyn Killer>] {
        &self.killers
    }

    /// Longest named member phrase, for display and downstream output.
    ///
    /// Pronouns are skipped unless the chain has nothing else; on equal
    /// length the earlier member wins.
    #[must_use]
    pub fn canonical_phrase(&self) -> &str {
        let mut best: Option<&Mention> = None;
        for m in self.mentions.iter().filter(|m| !m.is_pronominal()) {
            if best.map_or(true, |b| m.phrase().len() > b.phrase().len()) {
                best = Some(m);
            }
        }
        best.or_else(|| self.mentions.first())
            .map_or("", Mention::phrase)
    }

    /// True if any killer vetoes `candidate`.
    #[must_use]
    pub fn killed(&self, candidate: &Mention) -> bool {
        match self.killers.iter().find(|k| k.kill(candidate, self)) {
            Some(killer) => {
                log::trace!(
                    "chain {} vetoes {} ({})",
                    self.identifier,
                    candidate,
                    killer.name()
                );
                true
            }
            None => false,
        }
    }

    /// Best matcher score for `candidate`, or [`NO_MATCH`] if vetoed or
    /// nothing applies.
    #[must_use]
    pub fn match_score(&self, candidate: &Mention) -> Score {
        if self.killed(candidate) {
            return NO_MATCH;
        }
        let best = self
            .matchers
            .iter()
            .map(|m| m.score(candidate, self))
            .max()
            .unwrap_or(NO_MATCH);
        log::trace!("chain {} scores {} at {}", self.identifier, candidate, best);
        best
    }

    /// Append a mention and refresh derived attributes.
    pub fn add(&mut self, mention: Mention, sentence_offset: usize) {
        self.honorifics.extend(mention.honorifics().iter().cloned());
        if self.gender.is_none() {
            self.gender = mention.gender();
        }
        self.max_sentence_offset = self.max_sentence_offset.max(sentence_offset);
        self.composition = self.composition.joined_by(&mention);
        self.mentions.push(mention);
        self.recompose();
    }

    fn recompose(&mut self) {
        self.matchers = self
            .table
            .matchers(self.composition, &self.entity_type, self.gender);
        self.killers = self.table.killers(self.composition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenderKiller, MentionFactory};

    #[test]
    fn test_promote_seeds_attributes() {
        let mut factory = MentionFactory::english();
        let chain = factory.promote(factory.create("Dr. Jane Doe", EntityType::Person), 4);
        assert_eq!(chain.identifier(), 0);
        assert_eq!(chain.entity_type(), &EntityType::Person);
        assert!(chain.honorifics().contains("dr"));
        assert_eq!(chain.gender(), None);
        assert_eq!(chain.max_sentence_offset(), 4);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.composition(), CompositionKey::PureEntity);
    }

    #[test]
    fn test_add_updates_monotone_attributes() {
        let mut factory = MentionFactory::english();
        let mut chain = factory.promote(factory.create("Mr. Smith", EntityType::Person), 2);

        chain.add(factory.create("Sir John Smith", EntityType::Person), 1);
        assert_eq!(chain.max_sentence_offset(), 2);
        assert!(chain.honorifics().contains("mr"));
        assert!(chain.honorifics().contains("sir"));

        chain.add(factory.create("he", EntityType::MalePronoun), 5);
        assert_eq!(chain.max_sentence_offset(), 5);
        assert_eq!(chain.gender(), Some(Gender::Male));
        assert_eq!(chain.composition(), CompositionKey::HasPronoun);

        chain.add(factory.create("she", EntityType::FemalePronoun), 6);
        assert_eq!(chain.gender(), Some(Gender::Male));
        assert_eq!(chain.entity_type(), &EntityType::Person);
    }

    #[test]
    fn test_entity_type_matcher_count_follows_membership() {
        let mut factory = MentionFactory::english();
        let mut chain = factory.promote(factory.create("John Smith", EntityType::Person), 0);
        let type_matchers =
            |c: &MentionChain| c.matchers().iter().filter(|m| m.name() == "entity_type").count();

        assert_eq!(type_matchers(&chain), 2);
        chain.add(factory.create("Smith", EntityType::Person), 0);
        assert_eq!(type_matchers(&chain), 2);
        chain.add(factory.create("he", EntityType::MalePronoun), 1);
        assert_eq!(type_matchers(&chain), 1);
    }

    #[test]
    fn test_composition_stays_has_pronoun() {
        let mut factory = MentionFactory::english();
        let mut chain = factory.promote(factory.create("Ann Lee", EntityType::Person), 0);
        chain.add(factory.create("she", EntityType::FemalePronoun), 0);
        for _ in 0..3 {
            chain.add(factory.create("Ann Lee", EntityType::Person), 1);
            assert_eq!(chain.composition(), CompositionKey::HasPronoun);
            assert_eq!(
                chain.composition(),
                CompositionKey::of(chain.mentions().iter())
            );
        }
    }

    #[test]
    fn test_pronoun_founded_chain_takes_same_pronoun() {
        let mut factory = MentionFactory::english();
        let chain = factory.promote(factory.create("he", EntityType::MalePronoun), 0);
        assert_eq!(chain.composition(), CompositionKey::HasPronoun);

        let him = factory.create("him", EntityType::MalePronoun);
        assert_eq!(chain.match_score(&him), factory.config().weights.entity_type);
        let named = factory.create("John", EntityType::MalePronoun);
        assert_eq!(chain.match_score(&named), NO_MATCH);
    }

    #[test]
    fn test_pronoun_chain_stops_accepting_other_gender() {
        let mut factory = MentionFactory::english();
        let mut chain = factory.promote(factory.create("Alex Kim", EntityType::Person), 0);
        chain.add(factory.create("she", EntityType::FemalePronoun), 0);

        let he = factory.create("he", EntityType::MalePronoun);
        assert!(GenderKiller.kill(&he, &chain));
        assert!(chain.killed(&he));
        assert_eq!(chain.match_score(&he), NO_MATCH);

        let her = factory.create("her", EntityType::FemalePronoun);
        assert!(chain.match_score(&her) > NO_MATCH);
    }

    #[test]
    fn test_match_score_is_max_over_matchers() {
        let mut factory = MentionFactory::english();
        let chain = factory.promote(
            factory.create("First National Bank of Chicago", EntityType::Organization),
            0,
        );
        let weights = factory.config().weights;

        let exact = factory.create("First National Bank of Chicago", EntityType::Organization);
        assert_eq!(chain.match_score(&exact), weights.exact.max(weights.substring));

        let partial = factory.create("National Bank of Chicago", EntityType::Organization);
        assert_eq!(chain.match_score(&partial), weights.substring);

        let other = factory.create("Chicago", EntityType::Location);
        assert_eq!(chain.match_score(&other), NO_MATCH);
    }

    #[test]
    fn test_canonical_phrase_prefers_longest_name() {
        let mut factory = MentionFactory::english();
        let mut chain = factory.promote(factory.create("he", EntityType::MalePronoun), 0);
        assert_eq!(chain.canonical_phrase(), "he");

        chain.add(factory.create("Smith", EntityType::Person), 1);
        chain.add(factory.create("John Smith", EntityType::Person), 1);
        chain.add(factory.create("Jim Smith", EntityType::Person), 2);
        assert_eq!(chain.canonical_phrase(), "John Smith");
    }
}
