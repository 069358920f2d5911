//! Poster title resolution entry points.

use std::time::Instant;

use tracing::debug;

use super::normalize::normalize;
use super::strategy::{TitleQuery, PIPELINE};
use super::types::{
    CandidateSet, MatchTier, PosterMatch, Resolution, ResolutionTrace, TierAttempt, TierOutcome,
};
use crate::metrics::{POSTER_RESOLUTIONS, POSTER_RESOLUTION_DURATION};

/// Resolve `title` to the best matching poster in `candidates`.
///
/// Pure function of its inputs: the same title and candidate set always
/// produce the same result.
pub fn resolve(title: &str, candidates: &CandidateSet) -> Resolution {
    run(title, candidates, |_, _| {})
}

/// Convenience wrapper for callers holding plain path strings.
pub fn resolve_paths<S: AsRef<str>>(title: &str, candidates: &[S]) -> Resolution {
    let set = CandidateSet::new(candidates.iter().map(|c| c.as_ref().to_string()));
    resolve(title, &set)
}

/// Resolve `title` and record every tier evaluated along the way.
pub fn explain(title: &str, candidates: &CandidateSet) -> ResolutionTrace {
    let mut attempts = Vec::new();
    let resolution = run(title, candidates, |tier, outcome| {
        attempts.push(TierAttempt { tier, outcome });
    });

    let trimmed = normalize(title);
    let sequel = !trimmed.is_empty() && TitleQuery::new(trimmed).is_sequel();

    ResolutionTrace {
        title: title.to_string(),
        candidate_count: candidates.len(),
        sequel,
        attempts,
        resolution,
    }
}

fn run<F>(title: &str, candidates: &CandidateSet, mut on_attempt: F) -> Resolution
where
    F: FnMut(MatchTier, TierOutcome),
{
    let start = Instant::now();
    let resolution = evaluate(title, candidates, &mut on_attempt);

    POSTER_RESOLUTIONS
        .with_label_values(&[resolution.label()])
        .inc();
    POSTER_RESOLUTION_DURATION
        .with_label_values(&[])
        .observe(start.elapsed().as_secs_f64());

    resolution
}

fn evaluate<F>(title: &str, candidates: &CandidateSet, on_attempt: &mut F) -> Resolution
where
    F: FnMut(MatchTier, TierOutcome),
{
    let title = normalize(title);
    if title.is_empty() {
        return Resolution::EmptyTitle;
    }
    if candidates.is_empty() {
        debug!(title, "No poster candidates to search");
        return Resolution::NoMatch;
    }

    let query = TitleQuery::new(title);

    for strategy in PIPELINE.iter() {
        if !(strategy.applies)(&query) {
            on_attempt(strategy.tier, TierOutcome::Skipped);
            continue;
        }

        let found = (strategy.find)(&query, candidates).and_then(|idx| candidates.get(idx));
        match found {
            Some(candidate) => {
                let path = candidate.path().to_string();
                debug!(title, tier = %strategy.tier, path = %path, "Resolved poster");
                on_attempt(
                    strategy.tier,
                    TierOutcome::Matched { path: path.clone() },
                );
                return Resolution::Matched(PosterMatch {
                    path,
                    tier: strategy.tier,
                });
            }
            None => on_attempt(strategy.tier, TierOutcome::Missed),
        }
    }

    debug!(title, candidates = candidates.len(), "No poster matched");
    Resolution::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> CandidateSet {
        CandidateSet::new(paths.iter().copied())
    }

    #[test]
    fn test_empty_title_is_distinct_from_no_match() {
        let candidates = set(&["/p/Up.jpg"]);
        assert_eq!(resolve("", &candidates), Resolution::EmptyTitle);
        assert_eq!(resolve("   ", &candidates), Resolution::EmptyTitle);
        assert_eq!(resolve("   ", &CandidateSet::default()), Resolution::EmptyTitle);
    }

    #[test]
    fn test_empty_candidates_is_no_match() {
        assert_eq!(resolve("Up", &CandidateSet::default()), Resolution::NoMatch);
    }

    #[test]
    fn test_direct_match_beats_longer_title() {
        let candidates = set(&["/p/Movie Posters/Up and Away.jpg", "/p/Movie Posters/Up.jpg"]);
        let resolution = resolve("Up", &candidates);
        assert_eq!(resolution.path(), Some("/p/Movie Posters/Up.jpg"));
        assert_eq!(resolution.tier(), Some(MatchTier::Direct));
    }

    #[test]
    fn test_title_is_trimmed_before_matching() {
        let candidates = set(&["/p/Up.jpg"]);
        assert_eq!(resolve("  Up \n", &candidates).tier(), Some(MatchTier::Direct));
    }

    #[test]
    fn test_resolve_paths_matches_resolve() {
        let paths = vec!["/p/Cars.jpg".to_string(), "/p/Up.jpg".to_string()];
        let set = CandidateSet::new(paths.clone());
        assert_eq!(resolve_paths("up", &paths), resolve("up", &set));
    }

    #[test]
    fn test_explain_records_attempts_until_winner() {
        let candidates = set(&["/p/Selfie.jpg"]);
        let trace = explain("#Selfie", &candidates);

        assert_eq!(trace.candidate_count, 1);
        assert!(!trace.sequel);
        assert_eq!(
            trace.resolution.tier(),
            Some(MatchTier::HashVariant)
        );

        let tiers: Vec<MatchTier> = trace.attempts.iter().map(|a| a.tier).collect();
        assert_eq!(
            tiers,
            vec![
                MatchTier::ApostropheExact,
                MatchTier::ApostropheStripped,
                MatchTier::ApostropheLoose,
                MatchTier::Direct,
                MatchTier::HashVariant,
            ]
        );
        assert_eq!(trace.attempts[0].outcome, TierOutcome::Skipped);
        assert_eq!(trace.attempts[3].outcome, TierOutcome::Missed);
        assert_eq!(
            trace.attempts[4].outcome,
            TierOutcome::Matched {
                path: "/p/Selfie.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_explain_no_match_lists_every_tier() {
        let candidates = set(&["/p/Up.jpg"]);
        let trace = explain("Zzzznotreal Title Xyz", &candidates);
        assert_eq!(trace.resolution, Resolution::NoMatch);
        assert_eq!(trace.attempts.len(), PIPELINE.len());
    }

    #[test]
    fn test_explain_empty_title_has_no_attempts() {
        let trace = explain(" ", &set(&["/p/Up.jpg"]));
        assert_eq!(trace.resolution, Resolution::EmptyTitle);
        assert!(trace.attempts.is_empty());
    }
}
