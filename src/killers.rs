//! Veto strategies: evidence that a mention cannot belong to a chain.
//!
//! A single [`Killer`] returning `true` removes the chain from consideration
//! regardless of any matcher score.

use crate::{Mention, MentionChain};
use std::fmt;

/// A veto heuristic.
pub trait Killer: Send + Sync + fmt::Debug {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// True if `candidate` must not join `chain`.
    fn kill(&self, candidate: &Mention, chain: &MentionChain) -> bool;
}

/// Vetoes when both genders are known and differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderKiller;

impl Killer for GenderKiller {
    fn name(&self) -> &'static str {
        "gender"
    }

    fn kill(&self, candidate: &Mention, chain: &MentionChain) -> bool {
        matches!(
            (candidate.gender(), chain.gender()),
            (Some(a), Some(b)) if a != b
        )
    }
}

/// Vetoes when both sides carry honorifics and none are shared
/// ("Mr. Smith" vs. "Dr. Smith").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HonorificConflictKiller;

impl Killer for HonorificConflictKiller {
    fn name(&self) -> &'static str {
        "honorific_conflict"
    }

    fn kill(&self, candidate: &Mention, chain: &MentionChain) -> bool {
        let ours = candidate.honorifics();
        let theirs = chain.honorifics();
        !ours.is_empty() && !theirs.is_empty() && ours.is_disjoint(theirs)
    }
}
