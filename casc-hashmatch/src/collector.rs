use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::path::display_form;

/// Append-only sink for confirmed candidates, shared by every search worker.
#[derive(Debug, Default)]
pub struct MatchCollector {
    matches: Mutex<Vec<String>>,
}

impl MatchCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a confirmed candidate. Safe to call from any thread.
    pub fn push(&self, candidate: String) {
        // A panicking worker can't leave a half-pushed Vec behind.
        self.matches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(candidate);
    }

    /// Raw hit count, duplicates included.
    pub fn len(&self) -> usize {
        self.matches.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the collector once every worker has joined.
    pub fn finish(self) -> Vec<String> {
        dedup_matches(self.matches.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Renders each match lower-case with forward slashes and drops duplicates,
/// keeping the first occurrence.
///
/// Applying it to its own output returns the same list.
pub fn dedup_matches(raw: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|m| display_form(&m))
        .filter(|m| seen.insert(m.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_finish_dedups_and_renders() {
        let collector = MatchCollector::new();
        collector.push("FOO\\BAR.BLP".to_string());
        collector.push("A\\B.M2".to_string());
        collector.push("FOO\\BAR.BLP".to_string());

        assert_eq!(collector.len(), 3);
        assert_eq!(collector.finish(), vec!["foo/bar.blp", "a/b.m2"]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let raw = vec![
            "X\\Y.BLP".to_string(),
            "x/y.blp".to_string(),
            "Z.WMO".to_string(),
        ];
        let once = dedup_matches(raw);
        let twice = dedup_matches(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once, vec!["x/y.blp", "z.wmo"]);
    }

    #[test]
    fn test_concurrent_push() {
        let collector = Arc::new(MatchCollector::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let collector = Arc::clone(&collector);
                thread::spawn(move || {
                    for i in 0..1_000 {
                        collector.push(format!("T{t}\\F{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(collector.len(), 8_000);
        let collector = Arc::into_inner(collector).unwrap();
        assert_eq!(collector.finish().len(), 8_000);
    }

    #[test]
    fn test_empty_collector() {
        let collector = MatchCollector::new();
        assert!(collector.is_empty());
        assert!(collector.finish().is_empty());
    }
}
