//! Resolver configuration: lexicons, matcher weights and pronoun rules.
//!
//! Everything language-specific lives here and is handed to the
//! [`MentionFactory`](crate::MentionFactory) as data. [`CorefConfig::english`]
//! is one such table set; other languages or domains supply their own, either
//! in code or as JSON.
//!
//! ```rust
//! use coref_chains::CorefConfig;
//!
//! let json = r#"{
//!     "honorifics": { "herr": "herr", "frau": "frau", "dr": "dr" },
//!     "pronouns": { "er": "male", "sie": "female" },
//!     "weights": { "exact": 3, "substring": 2, "synonym": 3, "entity_type": 1 },
//!     "min_substring_run": 2,
//!     "pronoun_types": [
//!         { "entity_type": "MALE_PRONOUN", "gender": "male" },
//!         { "entity_type": "FEMALE_PRONOUN", "gender": "female" }
//!     ],
//!     "pronoun_antecedent_types": ["PERSON"],
//!     "max_pronoun_distance": 2,
//!     "pronoun_distance_penalty": 1
//! }"#;
//!
//! let config = CorefConfig::from_json(json).unwrap();
//! assert_eq!(config.honorific("Herr"), Some("herr"));
//! ```

use crate::{EntityType, Error, Gender, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Integer weight returned by each built-in matcher on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherWeights {
    /// [`ExactPhraseMatch`](crate::ExactPhraseMatch)
    pub exact: i32,
    /// [`SequenceSubstringMatch`](crate::SequenceSubstringMatch)
    pub substring: i32,
    /// [`SynonymMatch`](crate::SynonymMatch)
    pub synonym: i32,
    /// [`EntityTypeMatch`](crate::EntityTypeMatch)
    pub entity_type: i32,
}

impl Default for MatcherWeights {
    fn default() -> Self {
        Self {
            exact: 3,
            substring: 2,
            synonym: 3,
            entity_type: 1,
        }
    }
}

/// An entity type used for pronoun mentions, with the gender it denotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronounType {
    /// Label the tagger assigns to such pronouns (e.g. `MALE_PRONOUN`).
    pub entity_type: EntityType,
    /// Gender a chain must have (once latched) to keep accepting this type.
    pub gender: Gender,
}

/// Full configuration for mention construction and chain scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorefConfig {
    /// Honorific lexicon: lower-case surface form without trailing period
    /// mapped to its normalized form (`"mister" -> "mr"`).
    pub honorifics: BTreeMap<String, String>,
    /// Pronoun table: lower-case pronoun mapped to its gender.
    pub pronouns: BTreeMap<String, Gender>,
    /// Matcher weights.
    #[serde(default)]
    pub weights: MatcherWeights,
    /// Minimum shared run length for [`SequenceSubstringMatch`](crate::SequenceSubstringMatch).
    pub min_substring_run: usize,
    /// Entity types that mark pronoun mentions.
    pub pronoun_types: Vec<PronounType>,
    /// Chain entity types that pronoun mentions may attach to.
    pub pronoun_antecedent_types: Vec<EntityType>,
    /// Pronouns skip chains last seen more than this many sentences ago.
    pub max_pronoun_distance: u32,
    /// Score reduction per sentence of distance for pronoun candidates.
    pub pronoun_distance_penalty: i32,
}

impl Default for CorefConfig {
    fn default() -> Self {
        Self::english()
    }
}

impl CorefConfig {
    /// English honorifics and pronouns with the default weights.
    #[must_use]
    pub fn english() -> Self {
        let honorifics = [
            ("mr", "mr"),
            ("mister", "mr"),
            ("mrs", "mrs"),
            ("ms", "ms"),
            ("miss", "miss"),
            ("dr", "dr"),
            ("doctor", "dr"),
            ("prof", "prof"),
            ("professor", "prof"),
            ("sir", "sir"),
            ("dame", "dame"),
            ("lord", "lord"),
            ("lady", "lady"),
            ("rev", "rev"),
            ("reverend", "rev"),
            ("gen", "gen"),
            ("general", "gen"),
            ("col", "col"),
            ("colonel", "col"),
            ("capt", "capt"),
            ("captain", "capt"),
            ("lt", "lt"),
            ("sgt", "sgt"),
            ("sen", "sen"),
            ("senator", "sen"),
            ("rep", "rep"),
            ("gov", "gov"),
            ("governor", "gov"),
            ("pres", "pres"),
            ("president", "pres"),
            ("hon", "hon"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let pronouns = [
            ("he", Gender::Male),
            ("him", Gender::Male),
            ("his", Gender::Male),
            ("himself", Gender::Male),
            ("she", Gender::Female),
            ("her", Gender::Female),
            ("hers", Gender::Female),
            ("herself", Gender::Female),
            ("it", Gender::Neuter),
            ("its", Gender::Neuter),
            ("itself", Gender::Neuter),
        ]
        .into_iter()
        .map(|(k, g)| (k.to_string(), g))
        .collect();

        Self {
            honorifics,
            pronouns,
            weights: MatcherWeights::default(),
            min_substring_run: 3,
            pronoun_types: vec![
                PronounType {
                    entity_type: EntityType::MalePronoun,
                    gender: Gender::Male,
                },
                PronounType {
                    entity_type: EntityType::FemalePronoun,
                    gender: Gender::Female,
                },
            ],
            pronoun_antecedent_types: vec![EntityType::Person],
            max_pronoun_distance: 3,
            pronoun_distance_penalty: 1,
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builder: replace the matcher weights.
    #[must_use]
    pub fn with_weights(mut self, weights: MatcherWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Builder: set the minimum run for substring matching.
    #[must_use]
    pub fn with_min_substring_run(mut self, min_run: usize) -> Self {
        self.min_substring_run = min_run;
        self
    }

    /// Builder: set how far back (in sentences) pronouns may look.
    #[must_use]
    pub fn with_max_pronoun_distance(mut self, distance: u32) -> Self {
        self.max_pronoun_distance = distance;
        self
    }

    /// Normalized honorific for a raw token, if the token is one.
    ///
    /// Matching ignores case and surrounding punctuation, so `"Mr."`,
    /// `"(MR"` and `"mr,"` all resolve the same way.
    #[must_use]
    pub fn honorific(&self, token: &str) -> Option<&str> {
        let key = trim_punctuation(token).to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.honorifics.get(&key).map(String::as_str)
    }

    /// Gender of a phrase if the whole phrase is a known pronoun.
    #[must_use]
    pub fn pronoun_gender(&self, phrase: &str) -> Option<Gender> {
        self.pronouns.get(&phrase.trim().to_lowercase()).copied()
    }

    /// True if chains of this type accept pronoun candidates.
    #[must_use]
    pub fn is_pronoun_antecedent(&self, entity_type: &EntityType) -> bool {
        self.pronoun_antecedent_types.contains(entity_type)
    }

    /// Check every invariant the matchers and factory rely on.
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        for (name, weight) in [
            ("exact", w.exact),
            ("substring", w.substring),
            ("synonym", w.synonym),
            ("entity_type", w.entity_type),
        ] {
            if weight <= 0 {
                return Err(Error::invalid_config(format!(
                    "weight '{}' must be positive, got {}",
                    name, weight
                )));
            }
        }

        if self.min_substring_run == 0 {
            return Err(Error::invalid_config(
                "min_substring_run must be at least 1",
            ));
        }
        if self.pronoun_distance_penalty < 0 {
            return Err(Error::invalid_config(format!(
                "pronoun_distance_penalty must not be negative, got {}",
                self.pronoun_distance_penalty
            )));
        }

        for (surface, normal) in &self.honorifics {
            check_lexicon_key("honorific", surface)?;
            if surface.ends_with('.') {
                return Err(Error::invalid_config(format!(
                    "honorific '{}' must be given without its trailing period",
                    surface
                )));
            }
            if normal.trim().is_empty() {
                return Err(Error::invalid_config(format!(
                    "honorific '{}' has an empty normalized form",
                    surface
                )));
            }
        }
        for pronoun in self.pronouns.keys() {
            check_lexicon_key("pronoun", pronoun)?;
        }

        let mut types = BTreeSet::new();
        let mut genders = BTreeSet::new();
        for pt in &self.pronoun_types {
            if pt.entity_type.is_blank() {
                return Err(Error::invalid_config("pronoun type label is empty"));
            }
            if !types.insert(pt.entity_type.clone()) {
                return Err(Error::invalid_config(format!(
                    "pronoun type '{}' listed twice",
                    pt.entity_type
                )));
            }
            if !genders.insert(pt.gender) {
                return Err(Error::invalid_config(format!(
                    "more than one pronoun type for gender '{}'",
                    pt.gender
                )));
            }
        }

        Ok(())
    }
}

/// Strip leading and trailing non-alphanumeric characters from a raw token.
pub(crate) fn trim_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

fn check_lexicon_key(kind: &str, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::invalid_config(format!("empty {} entry", kind)));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(Error::invalid_config(format!(
            "{} '{}' must be a single token",
            kind, key
        )));
    }
    if key.to_lowercase() != *key {
        return Err(Error::invalid_config(format!(
            "{} '{}' must be lower-case",
            kind, key
        )));
    }
    Ok(())
}
