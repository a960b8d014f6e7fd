//! Which matchers and killers a chain runs, as a function of its membership.
//!
//! A chain is classified by a [`CompositionKey`]: either every member is a
//! named mention, or at least one pronoun has joined. The
//! [`CompositionTable`] maps that key (plus the chain's fixed entity type
//! and latched gender) to the strategy lists the chain uses. Chains look the
//! lists up again after every `add`.
//!
//! Every chain carries one [`EntityTypeMatch`] per configured pronoun type
//! while it is purely named (two with the English configuration), and
//! exactly one once a pronoun has joined. For a PERSON chain those are the
//! MALE_PRONOUN and FEMALE_PRONOUN matchers, narrowed to the one matching
//! its gender. Chains of other types, chains founded by a pronoun, and
//! chains whose gender has no pronoun type use
//! [`EntityTypeMatch::same_as_chain`] in the same numbers. The counts follow
//! from `pronoun_types` in [`CorefConfig`].

use crate::{
    CorefConfig, EntityType, EntityTypeMatch, ExactPhraseMatch, Gender, GenderKiller,
    HonorificConflictKiller, Killer, Matcher, Mention, Result, SequenceSubstringMatch,
    SynonymMatch,
};
use std::sync::Arc;

/// Closed classification of a chain's membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositionKey {
    /// Every member is a named (non-pronominal) mention.
    PureEntity,
    /// At least one member is a pronoun.
    HasPronoun,
}

impl CompositionKey {
    /// Classify a set of members.
    pub fn of<'a>(mut members: impl Iterator<Item = &'a Mention>) -> Self {
        if members.any(Mention::is_pronominal) {
            CompositionKey::HasPronoun
        } else {
            CompositionKey::PureEntity
        }
    }

    /// Key after `mention` joins a chain with this key.
    ///
    /// `HasPronoun` is absorbing, so this agrees with [`CompositionKey::of`]
    /// over the grown membership.
    #[must_use]
    pub fn joined_by(self, mention: &Mention) -> Self {
        if mention.is_pronominal() {
            CompositionKey::HasPronoun
        } else {
            self
        }
    }
}

/// Lookup table from composition to strategy lists.
///
/// Built once per factory; chains share it through an `Arc`.
#[derive(Debug)]
pub struct CompositionTable {
    name_matchers: Vec<Arc<dyn Matcher>>,
    pronoun_matchers: Vec<(Gender, Arc<dyn Matcher>)>,
    same_type: Arc<dyn Matcher>,
    antecedent_types: Vec<EntityType>,
    killers: Vec<Arc<dyn Killer>>,
}

impl CompositionTable {
    /// Build the table for a configuration, wiring in a shared synonym matcher.
    pub fn from_config(config: &CorefConfig, synonyms: &SynonymMatch) -> Result<Self> {
        let weights = &config.weights;
        let name_matchers: Vec<Arc<dyn Matcher>> = vec![
            Arc::new(ExactPhraseMatch::new(weights.exact)?),
            Arc::new(SequenceSubstringMatch::new(
                config.min_substring_run,
                weights.substring,
            )?),
            Arc::new(synonyms.clone()),
        ];

        let mut pronoun_matchers: Vec<(Gender, Arc<dyn Matcher>)> = Vec::new();
        for pt in &config.pronoun_types {
            let matcher: Arc<dyn Matcher> = Arc::new(EntityTypeMatch::accepting(
                pt.entity_type.clone(),
                weights.entity_type,
            )?);
            pronoun_matchers.push((pt.gender, matcher));
        }

        let same_type: Arc<dyn Matcher> =
            Arc::new(EntityTypeMatch::same_as_chain(weights.entity_type)?);

        let killers: Vec<Arc<dyn Killer>> =
            vec![Arc::new(GenderKiller), Arc::new(HonorificConflictKiller)];

        Ok(Self {
            name_matchers,
            pronoun_matchers,
            same_type,
            antecedent_types: config.pronoun_antecedent_types.clone(),
            killers,
        })
    }

    /// Matchers for a chain with the given composition, type and gender.
    #[must_use]
    pub fn matchers(
        &self,
        key: CompositionKey,
        entity_type: &EntityType,
        gender: Option<Gender>,
    ) -> Vec<Arc<dyn Matcher>> {
        let typed: Vec<Arc<dyn Matcher>> = if self.antecedent_types.contains(entity_type) {
            self.pronoun_matchers
                .iter()
                .filter(|(g, _)| key == CompositionKey::PureEntity || Some(*g) == gender)
                .map(|(_, m)| Arc::clone(m))
                .collect()
        } else {
            Vec::new()
        };

        let mut matchers = self.name_matchers.clone();
        if typed.is_empty() {
            let count = match key {
                CompositionKey::PureEntity => self.pronoun_matchers.len().max(1),
                CompositionKey::HasPronoun => 1,
            };
            matchers.extend(std::iter::repeat_with(|| Arc::clone(&self.same_type)).take(count));
        } else {
            matchers.extend(typed);
        }
        matchers
    }

    /// Killers for a chain with the given composition.
    #[must_use]
    pub fn killers(&self, key: CompositionKey) -> Vec<Arc<dyn Killer>> {
        match key {
            CompositionKey::PureEntity | CompositionKey::HasPronoun => self.killers.clone(),
        }
    }
}
