//! A single occurrence of a referring expression.
//!
//! Mentions are compared by identity, not by content: two mentions built
//! from the same phrase are still two different occurrences. Every
//! construction draws a fresh [`MentionId`]; clones share it and therefore
//! denote the same occurrence.

use crate::{EntityType, Error, Gender, Result};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MENTION_ID: AtomicU64 = AtomicU64::new(0);

/// Per-occurrence identity of a [`Mention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MentionId(u64);

impl MentionId {
    fn fresh() -> Self {
        MentionId(NEXT_MENTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value (unique within the process).
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// One occurrence of a referring expression with its derived attributes.
///
/// Usually built by [`MentionFactory::create`](crate::MentionFactory::create).
/// Callers that already hold normalized tokens use [`Mention::builder`].
#[derive(Debug, Clone)]
pub struct Mention {
    id: MentionId,
    phrase: String,
    entity_type: EntityType,
    honorifics: BTreeSet<String>,
    normal_tokens: Vec<String>,
    normal_phrase: String,
    gender: Option<Gender>,
    pronominal: bool,
}

impl Mention {
    /// Start building a mention with explicit normalized attributes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use coref_chains::{EntityType, Mention};
    ///
    /// let m = Mention::builder("John Smith", EntityType::Person)
    ///     .tokens(["johan", "smith"])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(m.normal_phrase(), "johan smith");
    /// ```
    pub fn builder(phrase: impl Into<String>, entity_type: impl Into<EntityType>) -> MentionBuilder {
        MentionBuilder {
            phrase: phrase.into(),
            entity_type: entity_type.into(),
            honorifics: Vec::new(),
            tokens: Vec::new(),
            gender: None,
            pronominal: false,
        }
    }

    /// Unchecked constructor for the factory, whose normalization already
    /// guarantees the builder's invariants.
    pub(crate) fn from_parts(
        phrase: String,
        entity_type: EntityType,
        honorifics: BTreeSet<String>,
        normal_tokens: Vec<String>,
        gender: Option<Gender>,
        pronominal: bool,
    ) -> Self {
        let normal_phrase = normal_tokens.join(" ");
        Self {
            id: MentionId::fresh(),
            phrase,
            entity_type,
            honorifics,
            normal_tokens,
            normal_phrase,
            gender,
            pronominal,
        }
    }

    /// Identity of this occurrence.
    #[must_use]
    pub fn id(&self) -> MentionId {
        self.id
    }

    /// Raw phrase as it appeared in the text.
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Entity type supplied by the tagger.
    #[must_use]
    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    /// Normalized honorifics stripped from the front of the phrase.
    #[must_use]
    pub fn honorifics(&self) -> &BTreeSet<String> {
        &self.honorifics
    }

    /// Normalized content tokens, honorifics excluded.
    #[must_use]
    pub fn normal_tokens(&self) -> &[String] {
        &self.normal_tokens
    }

    /// Normalized tokens joined by single spaces.
    #[must_use]
    pub fn normal_phrase(&self) -> &str {
        &self.normal_phrase
    }

    /// Gender, known only for pronouns.
    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// True if the phrase is a pronoun.
    #[must_use]
    pub fn is_pronominal(&self) -> bool {
        self.pronominal
    }
}

impl PartialEq for Mention {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Mention {}

impl Hash for Mention {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Mention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}/{}", self.phrase, self.entity_type)
    }
}

/// Builder for [`Mention`] with validation at [`MentionBuilder::build`].
#[derive(Debug, Clone)]
pub struct MentionBuilder {
    phrase: String,
    entity_type: EntityType,
    honorifics: Vec<String>,
    tokens: Vec<String>,
    gender: Option<Gender>,
    pronominal: bool,
}

impl MentionBuilder {
    /// Set the normalized content tokens.
    #[must_use]
    pub fn tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Set the normalized honorifics.
    #[must_use]
    pub fn honorifics<I, S>(mut self, honorifics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.honorifics = honorifics.into_iter().map(Into::into).collect();
        self
    }

    /// Set the gender.
    #[must_use]
    pub fn gender(mut self, gender: Option<Gender>) -> Self {
        self.gender = gender;
        self
    }

    /// Mark the mention as a pronoun.
    #[must_use]
    pub fn pronominal(mut self, pronominal: bool) -> Self {
        self.pronominal = pronominal;
        self
    }

    /// Validate and build.
    ///
    /// Fails with [`Error::InvalidInput`] if the entity type label is blank,
    /// or if any token or honorific is empty or contains whitespace, or if
    /// an honorific is not lower-case.
    pub fn build(self) -> Result<Mention> {
        if self.entity_type.is_blank() {
            return Err(Error::invalid_input(format!(
                "mention {:?} has an empty entity type",
                self.phrase
            )));
        }
        for token in &self.tokens {
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                return Err(Error::invalid_input(format!(
                    "invalid token {:?} in mention {:?}",
                    token, self.phrase
                )));
            }
        }
        for honorific in &self.honorifics {
            if honorific.is_empty() || honorific.chars().any(char::is_whitespace) {
                return Err(Error::invalid_input(format!(
                    "invalid honorific {:?} in mention {:?}",
                    honorific, self.phrase
                )));
            }
            if honorific.to_lowercase() != *honorific {
                return Err(Error::invalid_input(format!(
                    "honorific {:?} must be lower-case",
                    honorific
                )));
            }
        }

        Ok(Mention::from_parts(
            self.phrase,
            self.entity_type,
            self.honorifics.into_iter().collect(),
            self.tokens,
            self.gender,
            self.pronominal,
        ))
    }
}
