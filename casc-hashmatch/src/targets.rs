use crate::error::Error;

/// Parses a line as a bare hexadecimal hash (no `0x`, no sign).
#[inline]
pub fn parse_hex(line: &str) -> Option<u64> {
    if line.is_empty() || line.len() > 16 || !line.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(line, 16).ok()
}

/// Parses a line as a decimal hash.
#[inline]
pub fn parse_decimal(line: &str) -> Option<u64> {
    line.parse().ok()
}

/// The deduplicated set of hashes whose paths are still unknown.
///
/// Never empty; stored in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet {
    hashes: Vec<u64>,
}

impl TargetSet {
    /// Builds a set from raw hashes, dropping duplicates.
    pub fn new(hashes: impl IntoIterator<Item = u64>) -> Result<Self, Error> {
        let mut hashes: Vec<u64> = hashes.into_iter().collect();
        if hashes.is_empty() {
            return Err(Error::EmptyTargetSet);
        }
        hashes.sort_unstable();
        hashes.dedup();

        Ok(Self { hashes })
    }

    /// Parses an unknown-hash dump.
    ///
    /// Each trimmed line is read both as hexadecimal and as decimal; every
    /// successful reading is kept. A line of decimal digits therefore
    /// contributes two hashes. Lines that parse neither way are ignored.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let hashes = text.lines().map(str::trim).flat_map(|line| {
            [parse_hex(line), parse_decimal(line)].into_iter().flatten()
        });
        Self::new(hashes)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.hashes
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.hashes.binary_search(&hash).is_ok()
    }
}
