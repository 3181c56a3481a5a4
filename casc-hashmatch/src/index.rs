//! Flat bucketed membership index over the target hashes.
//!
//! All hashes live in one array ordered by `(bucket_key, value)`. A 256-entry
//! offset table points at the start of each bucket's run, and every probe
//! scans a fixed window of `scan_width` entries (the size of the largest
//! bucket) from that offset. Short buckets therefore spill into their
//! neighbours' entries, which is harmless since a hash can only equal values
//! from its own bucket.
//!
//! The array carries `scan_width` zero slots after the last real entry so the
//! window of the final bucket never runs off the end. Those zeros cannot
//! produce a false positive: the hash `0` probes bucket 0, whose window starts
//! at index 0 and is never wider than the real region.

use crate::error::Error;
use crate::jenkins::{BUCKET_COUNT, bucket_key};
use crate::targets::TargetSet;

/// Read-only membership structure built once per run.
#[derive(Debug, Clone)]
pub struct HashIndex {
    /// Real entries followed by `scan_width` zero sentinels.
    sorted: Vec<u64>,
    offsets: [usize; BUCKET_COUNT],
    scan_width: usize,
    len: usize,
}

impl HashIndex {
    /// Builds the index from a target set.
    pub fn build(targets: &TargetSet) -> Self {
        let mut counts = [0usize; BUCKET_COUNT];
        for &hash in targets.as_slice() {
            counts[bucket_key(hash) as usize] += 1;
        }

        let scan_width = counts.iter().copied().max().unwrap_or(0);

        // Empty buckets take the running count, i.e. the start of the next
        // populated bucket (or of the padding).
        let mut offsets = [0usize; BUCKET_COUNT];
        let mut running = 0usize;
        for (offset, count) in offsets.iter_mut().zip(counts) {
            *offset = running;
            running += count;
        }

        let len = targets.len();
        let mut sorted = Vec::with_capacity(len + scan_width);
        sorted.extend_from_slice(targets.as_slice());
        sorted.sort_unstable_by_key(|&hash| (bucket_key(hash), hash));
        sorted.resize(len + scan_width, 0);

        Self { sorted, offsets, scan_width, len }
    }

    /// Convenience for building straight from raw hashes.
    pub fn from_hashes(hashes: impl IntoIterator<Item = u64>) -> Result<Self, Error> {
        Ok(Self::build(&TargetSet::new(hashes)?))
    }

    /// Returns true if `hash` is one of the target hashes.
    ///
    /// Scans exactly `scan_width` entries starting at the bucket's offset.
    #[inline(always)]
    pub fn contains(&self, hash: u64) -> bool {
        let start = self.offsets[bucket_key(hash) as usize];
        self.sorted[start..start + self.scan_width].contains(&hash)
    }

    /// Number of real (non-padding) entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a target set is never empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the largest bucket, which is also the probe window.
    pub fn scan_width(&self) -> usize {
        self.scan_width
    }

    /// The real entries belonging to bucket `key`.
    pub fn bucket(&self, key: u8) -> &[u64] {
        let start = self.offsets[key as usize];
        let end = self
            .offsets
            .get(key as usize + 1)
            .copied()
            .unwrap_or(self.len);
        &self.sorted[start..end]
    }
}
