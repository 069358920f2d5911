//! Poster title resolution.
//!
//! Maps a free-form movie title onto one poster path out of a listing of
//! thousands. Matching runs through a fixed chain of tiers, from exact
//! whole-segment matches down to single-word substring matches, and stops at
//! the first tier that accepts a candidate. Every match records the tier that
//! produced it.
//!
//! The listing itself comes from a [`PosterSource`] and is held by a
//! [`PosterCache`], which refreshes it on an interval and publishes each new
//! listing atomically.

mod boundary;
mod cache;
mod normalize;
mod resolver;
mod source;
pub mod strategy;
mod types;

pub use boundary::{is_boundary_match, POSTER_DIR_MARKER};
pub use cache::{PosterCache, PosterSnapshot, DEFAULT_REFRESH_INTERVAL};
pub use normalize::{file_name, normalize, strip_non_alnum_whitespace};
pub use resolver::{explain, resolve, resolve_paths};
pub use source::{DirectoryPosterSource, PosterSource, StaticPosterSource};
pub use types::{
    Candidate, CandidateSet, MatchTier, PosterError, PosterMatch, Resolution, ResolutionTrace,
    TierAttempt, TierOutcome,
};
