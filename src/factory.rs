//! Building mentions from raw phrases and founding chains from mentions.

use crate::chain::{ChainId, MentionChain};
use crate::composition::CompositionTable;
use crate::config::trim_punctuation;
use crate::{CorefConfig, EntityType, Mention, Result, SynonymMatch};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Turns `(phrase, entity type)` pairs into [`Mention`]s and promotes
/// mentions into new [`MentionChain`]s.
///
/// All language-specific knowledge comes from the [`CorefConfig`] the
/// factory was built with. The factory also owns the per-document chain-id
/// counter: the n-th chain it promotes gets identifier n. Use
/// [`MentionFactory::for_document`] to get a copy with a fresh counter that
/// shares configuration and synonym table.
///
/// # Example
///
/// ```rust
/// use coref_chains::{EntityType, MentionFactory};
///
/// let factory = MentionFactory::english();
/// let m = factory.create("Mr. John Smith", EntityType::Person);
/// assert!(m.honorifics().contains("mr"));
/// assert_eq!(m.normal_tokens(), ["john", "smith"]);
///
/// let he = factory.create("He", EntityType::MalePronoun);
/// assert!(he.is_pronominal());
/// ```
#[derive(Debug, Clone)]
pub struct MentionFactory {
    config: Arc<CorefConfig>,
    synonyms: SynonymMatch,
    table: Arc<CompositionTable>,
    next_chain_id: ChainId,
}

impl MentionFactory {
    /// Validate `config` and build a factory for it.
    pub fn new(config: CorefConfig) -> Result<Self> {
        config.validate()?;
        let synonyms = SynonymMatch::new(config.weights.synonym)?;
        let table = CompositionTable::from_config(&config, &synonyms)?;
        Ok(Self {
            config: Arc::new(config),
            synonyms,
            table: Arc::new(table),
            next_chain_id: 0,
        })
    }

    /// Factory over the built-in English tables.
    #[must_use]
    pub fn english() -> Self {
        match Self::new(CorefConfig::english()) {
            Ok(factory) => factory,
            Err(e) => unreachable!("built-in English configuration rejected: {}", e),
        }
    }

    /// Same configuration and synonym table, chain ids restarting at 0.
    #[must_use]
    pub fn for_document(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            synonyms: self.synonyms.clone(),
            table: Arc::clone(&self.table),
            next_chain_id: 0,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &CorefConfig {
        &self.config
    }

    /// Shared synonym matcher; pairs registered here apply to every chain
    /// built by this factory and its [`for_document`](Self::for_document) copies.
    #[must_use]
    pub fn synonyms(&self) -> &SynonymMatch {
        &self.synonyms
    }

    /// Identifier the next promoted chain will receive.
    #[must_use]
    pub fn next_chain_id(&self) -> ChainId {
        self.next_chain_id
    }

    /// Build a mention from a raw phrase.
    ///
    /// Never fails: an empty or all-punctuation phrase yields a mention with
    /// no tokens.
    pub fn create(&self, phrase: &str, entity_type: impl Into<EntityType>) -> Mention {
        let entity_type = entity_type.into();

        if let Some(gender) = self.config.pronoun_gender(phrase) {
            let token = phrase.trim().to_lowercase();
            return Mention::from_parts(
                phrase.to_string(),
                entity_type,
                BTreeSet::new(),
                vec![token],
                Some(gender),
                true,
            );
        }

        let mut honorifics = BTreeSet::new();
        let mut raw = phrase.split_whitespace().peekable();
        while let Some(honorific) = raw.peek().and_then(|t| self.config.honorific(t)) {
            honorifics.insert(honorific.to_string());
            raw.next();
        }
        let tokens: Vec<String> = raw.filter_map(normalize_token).collect();

        Mention::from_parts(
            phrase.to_string(),
            entity_type,
            honorifics,
            tokens,
            None,
            false,
        )
    }

    /// Found a new chain with `mention` as its first member.
    pub fn promote(&mut self, mention: Mention, sentence_offset: usize) -> MentionChain {
        let id = self.next_chain_id;
        self.next_chain_id += 1;
        log::debug!("chain {} founded by {} at sentence {}", id, mention, sentence_offset);
        MentionChain::new(id, mention, sentence_offset, Arc::clone(&self.table))
    }
}

impl Default for MentionFactory {
    fn default() -> Self {
        Self::english()
    }
}

/// Lower-case a raw token and trim surrounding punctuation.
fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = trim_punctuation(raw);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
