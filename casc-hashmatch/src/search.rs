use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::collector::MatchCollector;
use crate::error::Error;
use crate::index::HashIndex;
use crate::jenkins::hash_path;

/// State shared by every worker of a single search run.
///
/// The index is read-only, the collector takes concurrent appends and the
/// progress counter is bumped once per completed unit of work (a mask, a base
/// path).
#[derive(Debug)]
pub struct SearchContext {
    index: HashIndex,
    collector: MatchCollector,
    progress: Arc<AtomicU64>,
}

impl SearchContext {
    pub fn new(index: HashIndex) -> Self {
        Self {
            index,
            collector: MatchCollector::new(),
            progress: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Shares `progress` with an observer such as a progress bar.
    pub fn with_progress(mut self, progress: Arc<AtomicU64>) -> Self {
        self.progress = progress;
        self
    }

    /// Hashes a normalised candidate and records it if it is a target.
    #[inline]
    pub fn check(&self, candidate: &str) -> bool {
        let found = self.index.contains(hash_path(candidate));
        if found {
            self.collector.push(candidate.to_owned());
        }
        found
    }

    #[inline]
    pub fn advance(&self) {
        self.progress.fetch_add(1, Ordering::Relaxed);
    }

    pub fn progress(&self) -> u64 {
        self.progress.load(Ordering::Relaxed)
    }

    pub fn index(&self) -> &HashIndex {
        &self.index
    }

    pub fn collector(&self) -> &MatchCollector {
        &self.collector
    }

    /// Deduplicated matches in presentation form.
    pub fn into_matches(self) -> Vec<String> {
        self.collector.finish()
    }
}

/// A candidate-generation strategy driven to completion against a context.
pub trait CandidateSource {
    type Report;

    /// Units of work [`CandidateSource::run`] will report through
    /// [`SearchContext::advance`].
    fn total_units(&self) -> u64;

    fn run(&self, ctx: &SearchContext) -> Result<Self::Report, Error>;
}
