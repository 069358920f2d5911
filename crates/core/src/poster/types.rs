//! Types for poster title resolution.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::normalize::file_name;

/// A single poster path with its lowercased form precomputed.
#[derive(Debug, Clone)]
pub struct Candidate {
    path: String,
    lowered: String,
    name_start: usize,
}

impl Candidate {
    fn new(path: String) -> Self {
        let lowered = path.to_lowercase();
        let name_start = lowered.len() - file_name(&lowered).len();
        Self {
            path,
            lowered,
            name_start,
        }
    }

    /// The path as supplied by the poster source.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Lowercased path.
    pub(crate) fn lowered(&self) -> &str {
        &self.lowered
    }

    /// Lowercased last path segment.
    pub(crate) fn name(&self) -> &str {
        &self.lowered[self.name_start..]
    }
}

/// Ordered set of poster paths a title is resolved against.
///
/// Order is the listing order of the poster source and only matters as a
/// tie-break: the earliest candidate satisfying a tier wins. Blank entries
/// are dropped on construction so they can never shadow a real poster.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    entries: Vec<Candidate>,
}

impl CandidateSet {
    /// Build a candidate set, skipping blank entries.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = paths
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.trim().is_empty())
            .map(Candidate::new)
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    /// Original paths in listing order.
    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|c| c.path.clone()).collect()
    }

    /// Index of the first candidate satisfying `pred`.
    pub(crate) fn position<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&Candidate) -> bool,
    {
        self.entries.iter().position(pred)
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// The priority rule that produced a match.
///
/// Variants are listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Apostrophe-leading title matched as written.
    ApostropheExact,
    /// Apostrophe-leading title matched with the apostrophe removed.
    ApostropheStripped,
    /// Apostrophe-leading title found anywhere in a path.
    ApostropheLoose,
    /// Title matched a whole path segment or filename stem.
    Direct,
    /// Title matched with a leading `#` added or removed.
    HashVariant,
    /// Sequel title found as `"{base} {number}"` or `"{base}{number}"`.
    SequelNumbered,
    /// Non-sequel title found in a filename with no sequel marker.
    NonSequelGuard,
    /// Title stripped of punctuation matched a whole segment.
    CleanedTitle,
    /// Title found anywhere in a path.
    LooseSubstring,
    /// One of the title's longer words found anywhere in a path.
    WordFallback,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::ApostropheExact => "apostrophe_exact",
            MatchTier::ApostropheStripped => "apostrophe_stripped",
            MatchTier::ApostropheLoose => "apostrophe_loose",
            MatchTier::Direct => "direct",
            MatchTier::HashVariant => "hash_variant",
            MatchTier::SequelNumbered => "sequel_numbered",
            MatchTier::NonSequelGuard => "non_sequel_guard",
            MatchTier::CleanedTitle => "cleaned_title",
            MatchTier::LooseSubstring => "loose_substring",
            MatchTier::WordFallback => "word_fallback",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved poster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterMatch {
    /// The matched candidate, exactly as listed.
    pub path: String,
    /// The rule that selected it.
    pub tier: MatchTier,
}

/// Outcome of resolving a title against a candidate set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// A candidate satisfied one of the tiers.
    Matched(PosterMatch),
    /// The title was valid but nothing matched.
    NoMatch,
    /// The title was empty or whitespace only.
    EmptyTitle,
}

impl Resolution {
    /// The matched path, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Resolution::Matched(m) => Some(&m.path),
            _ => None,
        }
    }

    pub fn tier(&self) -> Option<MatchTier> {
        match self {
            Resolution::Matched(m) => Some(m.tier),
            _ => None,
        }
    }

    /// Short label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Matched(m) => m.tier.as_str(),
            Resolution::NoMatch => "no_match",
            Resolution::EmptyTitle => "empty_title",
        }
    }
}

/// What happened when a tier was evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TierOutcome {
    /// The tier does not apply to this title.
    Skipped,
    /// The tier ran and found nothing.
    Missed,
    /// The tier selected this candidate.
    Matched { path: String },
}

/// One evaluated tier in a traced resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAttempt {
    pub tier: MatchTier,
    #[serde(flatten)]
    pub outcome: TierOutcome,
}

/// A resolution together with every tier evaluated on the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionTrace {
    /// The title as received.
    pub title: String,
    /// Number of candidates searched.
    pub candidate_count: usize,
    /// Whether the title was recognised as a numbered sequel.
    pub sequel: bool,
    /// Tiers in evaluation order, up to and including the winner.
    pub attempts: Vec<TierAttempt>,
    pub resolution: Resolution,
}

/// Errors from poster sources and the poster cache.
#[derive(Debug, Error)]
pub enum PosterError {
    #[error("Failed to list posters from {source_name}: {message}")]
    Listing {
        source_name: String,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_set_skips_blank_entries() {
        let set = CandidateSet::new(vec!["/a/Up.jpg", "", "   ", "/a/Cars.jpg"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.paths(), vec!["/a/Up.jpg", "/a/Cars.jpg"]);
    }

    #[test]
    fn test_candidate_lowered_name() {
        let set: CandidateSet = vec!["/Movie Posters/The THING.jpg"].into_iter().collect();
        let candidate = set.get(0).unwrap();
        assert_eq!(candidate.path(), "/Movie Posters/The THING.jpg");
        assert_eq!(candidate.lowered(), "/movie posters/the thing.jpg");
        assert_eq!(candidate.name(), "the thing.jpg");
    }

    #[test]
    fn test_resolution_serialization() {
        let matched = Resolution::Matched(PosterMatch {
            path: "/a/Up.jpg".to_string(),
            tier: MatchTier::Direct,
        });
        let json = serde_json::to_value(&matched).unwrap();
        assert_eq!(json["outcome"], "matched");
        assert_eq!(json["path"], "/a/Up.jpg");
        assert_eq!(json["tier"], "direct");

        let json = serde_json::to_value(Resolution::NoMatch).unwrap();
        assert_eq!(json["outcome"], "no_match");
    }

    #[test]
    fn test_tier_serde_matches_as_str() {
        for tier in [
            MatchTier::ApostropheExact,
            MatchTier::HashVariant,
            MatchTier::SequelNumbered,
            MatchTier::WordFallback,
        ] {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.as_str()));
        }
    }

    #[test]
    fn test_tier_attempt_flattens_outcome() {
        let attempt = TierAttempt {
            tier: MatchTier::Direct,
            outcome: TierOutcome::Matched {
                path: "/a/Up.jpg".to_string(),
            },
        };
        let json = serde_json::to_value(&attempt).unwrap();
        assert_eq!(json["tier"], "direct");
        assert_eq!(json["result"], "matched");
        assert_eq!(json["path"], "/a/Up.jpg");
    }
}
