//! # coref-chains
//!
//! Within-document coreference for Rust.
//!
//! Mentions arrive one at a time, in reading order, as `(phrase, entity type,
//! sentence offset)`. Each is either attached to an existing chain of
//! co-referring mentions or founds a new one; the caller gets back a stable
//! chain identifier.
//!
//! - **Mentions**: honorific stripping, token normalization, pronoun detection
//! - **Matchers**: exact phrase, token-run substring, synonym, entity type
//! - **Killers**: gender conflict, honorific conflict
//! - **Resolver**: single pass, append-only, deterministic
//!
//! ## Quick Start
//!
//! ```rust
//! use coref_chains::{EntityType, WithinDocCoref};
//!
//! let mut coref = WithinDocCoref::english();
//!
//! let a = coref.resolve("Dr. Marie Curie", EntityType::Person, 0);
//! let b = coref.resolve("she", EntityType::FemalePronoun, 0);
//! let c = coref.resolve("the Sorbonne", EntityType::Organization, 1);
//! let d = coref.resolve("Marie Curie", EntityType::Person, 2);
//!
//! assert_eq!((a, b, c, d), (0, 0, 1, 0));
//! ```
//!
//! ## Configuration
//!
//! Honorific and pronoun lexicons, matcher weights and pronoun rules are data
//! in [`CorefConfig`]. [`CorefConfig::english`] ships English tables; load
//! other languages from JSON with [`CorefConfig::from_json`].
//!
//! ## Scoring
//!
//! | Strategy | Kind | Default weight |
//! |----------|------|----------------|
//! | [`ExactPhraseMatch`] | matcher | 3 |
//! | [`SequenceSubstringMatch`] (run ≥ 3) | matcher | 2 |
//! | [`SynonymMatch`] | matcher | 3 |
//! | [`EntityTypeMatch`] (pronouns only) | matcher | 1 |
//! | [`GenderKiller`] | veto | - |
//! | [`HonorificConflictKiller`] | veto | - |
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: `debug` for chain creation and
//! attachment, `trace` for individual scores and vetoes. Install any logger
//! to see them.

#![warn(missing_docs)]

pub mod chain;
pub mod composition;
pub mod config;
mod error;
pub mod factory;
pub mod killers;
pub mod matchers;
pub mod mention;
pub mod resolver;
mod types;

pub use chain::{ChainId, MentionChain};
pub use composition::{CompositionKey, CompositionTable};
pub use config::{CorefConfig, MatcherWeights, PronounType};
pub use error::{Error, Result};
pub use factory::MentionFactory;
pub use killers::{GenderKiller, HonorificConflictKiller, Killer};
pub use matchers::{
    AcceptedType, EntityTypeMatch, ExactPhraseMatch, Matcher, Score, SequenceSubstringMatch,
    SynonymMatch, NO_MATCH,
};
pub use mention::{Mention, MentionBuilder, MentionId};
pub use resolver::{ChainSummary, WithinDocCoref};
pub use types::{EntityType, Gender};
