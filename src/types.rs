//! Entity-type and gender labels attached to mentions and chains.

use serde::{Deserialize, Serialize};

/// Entity type label supplied by the upstream tagger.
///
/// The named variants cover the labels the built-in English configuration
/// knows about. Any other label is carried verbatim in [`EntityType::Other`],
/// so taggers with their own inventories work without conversion.
///
/// Labels serialize as their canonical string form (`"PERSON"`,
/// `"MALE_PRONOUN"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// Person name (PERSON / PER).
    Person,
    /// Organization name (ORGANIZATION / ORG).
    Organization,
    /// Location or geo-political entity (LOCATION / LOC / GPE).
    Location,
    /// Masculine pronoun ("he", "him", ...).
    MalePronoun,
    /// Feminine pronoun ("she", "her", ...).
    FemalePronoun,
    /// Any other label, kept as supplied.
    Other(String),
}

impl EntityType {
    /// Canonical label string.
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            EntityType::Person => "PERSON",
            EntityType::Organization => "ORGANIZATION",
            EntityType::Location => "LOCATION",
            EntityType::MalePronoun => "MALE_PRONOUN",
            EntityType::FemalePronoun => "FEMALE_PRONOUN",
            EntityType::Other(s) => s.as_str(),
        }
    }

    /// Parse from a label string.
    ///
    /// Accepts both short CoNLL-style (`PER`) and long OntoNotes-style
    /// (`PERSON`) spellings, case-insensitively. Unknown labels are kept
    /// verbatim.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "PER" | "PERSON" => EntityType::Person,
            "ORG" | "ORGANIZATION" | "ORGANISATION" => EntityType::Organization,
            "LOC" | "LOCATION" | "GPE" => EntityType::Location,
            "MALE_PRONOUN" => EntityType::MalePronoun,
            "FEMALE_PRONOUN" => EntityType::FemalePronoun,
            _ => EntityType::Other(label.to_string()),
        }
    }

    /// True if the label is empty (only possible through [`EntityType::Other`]).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.as_label().trim().is_empty()
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

impl From<&str> for EntityType {
    fn from(label: &str) -> Self {
        EntityType::from_label(label)
    }
}

impl From<String> for EntityType {
    fn from(label: String) -> Self {
        EntityType::from_label(&label)
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        match entity_type {
            EntityType::Other(s) => s,
            other => other.as_label().to_string(),
        }
    }
}

/// Grammatical gender carried by pronouns.
///
/// Names never receive a gender; only the pronoun table assigns one. A
/// mention without gender is represented as `None` rather than a fourth
/// "unknown" variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// he / him / his
    Male,
    /// she / her / hers
    Female,
    /// it / its
    Neuter,
}

impl Gender {
    /// Lower-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Neuter => "neuter",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
