//! The ordered matching tiers.
//!
//! Each tier is a plain function over a prepared [`TitleQuery`] and the
//! candidate set, returning the index of the first candidate it accepts.
//! [`PIPELINE`] fixes the evaluation order; the resolver walks it and stops
//! at the first hit.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::boundary::{is_boundary_match_lowered, is_filename_match_lowered};
use super::normalize::{fallback_tokens, strip_non_alnum_whitespace};
use super::types::{Candidate, CandidateSet, MatchTier};

/// Minimum length of a word used by the word-level fallback.
pub const MIN_FALLBACK_TOKEN_LEN: usize = 3;

/// `<base><spaces and/or colons><digits or roman numeral>` at end of title.
static SEQUEL_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.+?)[\s:]+(\d+|i|ii|iii|iv|v|vi|vii|viii|ix|x)$")
        .expect("sequel title pattern is valid")
});

/// A sequel number anywhere in a filename, preceded by a space or colon.
static SEQUEL_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\s:](\d+|i|ii|iii|iv|v|vi|vii|viii|ix|x)\b")
        .expect("sequel marker pattern is valid")
});

/// Base title and number of a numbered sequel, both lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequel {
    pub base: String,
    pub number: String,
}

/// Split `title` into base and number if it ends in a sequel marker.
pub fn parse_sequel(title: &str) -> Option<Sequel> {
    let caps = SEQUEL_TITLE.captures(title)?;
    let base = caps.get(1)?.as_str().trim();
    let number = caps.get(2)?.as_str();
    if base.is_empty() {
        return None;
    }
    Some(Sequel {
        base: base.to_lowercase(),
        number: number.to_lowercase(),
    })
}

/// True when a filename carries a trailing sequel indicator.
pub fn has_sequel_marker(name: &str) -> bool {
    SEQUEL_MARKER.is_match(name)
}

/// Every lowercased variant of a title the tiers need, computed once.
#[derive(Debug, Clone)]
pub struct TitleQuery {
    /// Trimmed, lowercased title.
    pub title: String,
    /// Title without its leading apostrophe, when it has one.
    pub without_apostrophe: Option<String>,
    pub with_hash: String,
    pub without_hash: String,
    pub sequel: Option<Sequel>,
    /// Title reduced to letters, digits and whitespace.
    pub cleaned: String,
}

impl TitleQuery {
    /// Prepare a query. `title` must already be trimmed and non-empty.
    pub fn new(title: &str) -> Self {
        let title = title.to_lowercase();

        let without_apostrophe = title.strip_prefix('\'').map(str::to_string);

        let (with_hash, without_hash) = match title.strip_prefix('#') {
            Some(rest) => (title.clone(), rest.to_string()),
            None => (format!("#{title}"), title.clone()),
        };

        let sequel = parse_sequel(&title);
        let cleaned = strip_non_alnum_whitespace(&title).trim().to_string();

        Self {
            title,
            without_apostrophe,
            with_hash,
            without_hash,
            sequel,
            cleaned,
        }
    }

    pub fn is_sequel(&self) -> bool {
        self.sequel.is_some()
    }
}

/// One tier of the pipeline.
pub struct Strategy {
    pub tier: MatchTier,
    /// Whether the tier runs at all for this title.
    pub applies: fn(&TitleQuery) -> bool,
    /// Index of the first accepted candidate.
    pub find: fn(&TitleQuery, &CandidateSet) -> Option<usize>,
}

/// Tiers in evaluation order.
pub static PIPELINE: [Strategy; 10] = [
    Strategy {
        tier: MatchTier::ApostropheExact,
        applies: has_leading_apostrophe,
        find: apostrophe_exact,
    },
    Strategy {
        tier: MatchTier::ApostropheStripped,
        applies: has_leading_apostrophe,
        find: apostrophe_stripped,
    },
    Strategy {
        tier: MatchTier::ApostropheLoose,
        applies: has_leading_apostrophe,
        find: apostrophe_loose,
    },
    Strategy {
        tier: MatchTier::Direct,
        applies: always,
        find: direct,
    },
    Strategy {
        tier: MatchTier::HashVariant,
        applies: always,
        find: hash_variant,
    },
    Strategy {
        tier: MatchTier::SequelNumbered,
        applies: TitleQuery::is_sequel,
        find: sequel_numbered,
    },
    Strategy {
        tier: MatchTier::NonSequelGuard,
        applies: is_not_sequel,
        find: non_sequel_guard,
    },
    Strategy {
        tier: MatchTier::CleanedTitle,
        applies: has_cleaned_title,
        find: cleaned_title,
    },
    Strategy {
        tier: MatchTier::LooseSubstring,
        applies: always,
        find: loose_substring,
    },
    Strategy {
        tier: MatchTier::WordFallback,
        applies: has_cleaned_title,
        find: word_fallback,
    },
];

fn always(_: &TitleQuery) -> bool {
    true
}

fn has_leading_apostrophe(query: &TitleQuery) -> bool {
    query.without_apostrophe.is_some()
}

fn is_not_sequel(query: &TitleQuery) -> bool {
    !query.is_sequel()
}

fn has_cleaned_title(query: &TitleQuery) -> bool {
    !query.cleaned.is_empty()
}

fn boundary(candidate: &Candidate, term: &str) -> bool {
    is_boundary_match_lowered(candidate.lowered(), candidate.name(), term)
}

/// First candidate boundary-matching any of `terms`.
///
/// A candidate whose filename is the term wins over an earlier candidate
/// that only matches through a directory segment.
fn first_boundary(candidates: &CandidateSet, terms: &[&str]) -> Option<usize> {
    candidates
        .position(|c| terms.iter().any(|t| is_filename_match_lowered(c.name(), t)))
        .or_else(|| candidates.position(|c| terms.iter().any(|t| boundary(c, t))))
}

fn apostrophe_exact(query: &TitleQuery, candidates: &CandidateSet) -> Option<usize> {
    first_boundary(candidates, &[query.title.as_str()])
}

fn apostrophe_stripped(query: &TitleQuery, candidates: &CandidateSet) -> Option<usize> {
    let stripped = query.without_apostrophe.as_deref()?;
    first_boundary(candidates, &[stripped])
}

fn apostrophe_loose(query: &TitleQuery, candidates: &CandidateSet) -> Option<usize> {
    let stripped = query
        .without_apostrophe
        .as_deref()
        .filter(|s| !s.is_empty());
    candidates.position(|c| {
        c.lowered().contains(&query.title) || stripped.is_some_and(|s| c.lowered().contains(s))
    })
}

fn direct(query: &TitleQuery, candidates: &CandidateSet) -> Option<usize> {
    first_boundary(candidates, &[query.title.as_str()])
}

fn hash_variant(query: &TitleQuery, candidates: &CandidateSet) -> Option<usize> {
    first_boundary(candidates, &[query.without_hash.as_str(), query.with_hash.as_str()])
}

fn sequel_numbered(query: &TitleQuery, candidates: &CandidateSet) -> Option<usize> {
    let sequel = query.sequel.as_ref()?;
    let spaced = format!("{} {}", sequel.base, sequel.number);
    let joined = format!("{}{}", sequel.base, sequel.number);
    candidates.position(|c| c.name().contains(&spaced) || c.name().contains(&joined))
}

fn non_sequel_guard(query: &TitleQuery, candidates: &CandidateSet) -> Option<usize> {
    let title = query.title.as_str();
    candidates.position(|c| {
        let name = c.name();
        name == title
            || name
                .strip_prefix(title)
                .is_some_and(|rest| rest.starts_with('.'))
            || (name.contains(title) && !has_sequel_marker(name))
    })
}

fn cleaned_title(query: &TitleQuery, candidates: &CandidateSet) -> Option<usize> {
    first_boundary(candidates, &[query.cleaned.as_str()])
}

fn loose_substring(query: &TitleQuery, candidates: &CandidateSet) -> Option<usize> {
    candidates.position(|c| c.lowered().contains(&query.title))
}

fn word_fallback(query: &TitleQuery, candidates: &CandidateSet) -> Option<usize> {
    fallback_tokens(&query.cleaned, MIN_FALLBACK_TOKEN_LEN)
        .iter()
        .find_map(|token| candidates.position(|c| c.lowered().contains(token.as_str())))
}
