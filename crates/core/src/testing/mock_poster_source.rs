//! Mock poster source for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::poster::{PosterError, PosterSource};

/// Mock implementation of the PosterSource trait.
///
/// Provides controllable behavior for testing:
/// - Swap the listing between calls
/// - Fail the next listing with a message
/// - Count how many times the source was listed
///
/// # Example
///
/// ```rust,ignore
/// use cineniche_core::testing::MockPosterSource;
///
/// let source = MockPosterSource::with_paths(vec!["/p/Up.jpg"]);
/// source.fail_next("storage offline");
/// assert!(source.list().await.is_err());
/// assert_eq!(source.list().await?.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockPosterSource {
    paths: Mutex<Vec<String>>,
    /// If set, the next listing fails with this message.
    next_error: Mutex<Option<String>>,
    list_calls: AtomicUsize,
}

impl MockPosterSource {
    /// Create a mock source with an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source that lists the given paths.
    pub fn with_paths(paths: Vec<&str>) -> Self {
        let source = Self::new();
        source.set_paths(paths);
        source
    }

    /// Replace the listing returned by later calls.
    pub fn set_paths(&self, paths: Vec<&str>) {
        let mut guard = self.paths.lock().unwrap_or_else(|e| e.into_inner());
        *guard = paths.into_iter().map(str::to_string).collect();
    }

    /// Make the next listing fail.
    pub fn fail_next(&self, message: &str) {
        let mut guard = self.next_error.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(message.to_string());
    }

    /// Number of times `list` has been called.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PosterSource for MockPosterSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list(&self) -> Result<Vec<String>, PosterError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let error = self
            .next_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(message) = error {
            return Err(PosterError::Listing {
                source_name: self.name().to_string(),
                message,
            });
        }

        Ok(self.paths.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}
