//! Mix-match search: recombine truncated base names with suffixes seen
//! elsewhere in the listfile.
//!
//! Listfile names mostly follow a `prefix_suffix` convention with the suffix
//! vocabulary shared across many files. The search harvests every trailing run
//! of underscore segments (up to the configured depth) into a suffix
//! catalogue, then takes each path picked out by the filter, cuts trailing
//! segments off its name and glues every catalogued suffix back on.

use std::collections::{BTreeSet, HashSet, VecDeque};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::dictionary::Dictionary;
use crate::error::Error;
use crate::path::{self, SEPARATOR, normalise, underscore_count};
use crate::search::{CandidateSource, SearchContext};
use crate::template::{WILDCARD, wildcard_count};

/// Depth used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Splits a trailing extension off a filter if its dot sits within the last
/// five characters.
fn split_extension(filter: &str) -> (&str, Option<&str>) {
    match filter.rfind('.') {
        Some(i) if i + 5 >= filter.len() => (&filter[..i], Some(&filter[i..])),
        _ => (filter, None),
    }
}

/// One or two literal pieces a listfile path must contain to be mixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pieces: Vec<String>,
}

impl Filter {
    /// A single piece matches by containment. Two pieces match when both
    /// occur and the first occurrence of the prefix is no later than the
    /// first occurrence of the suffix; they may overlap.
    pub fn matches(&self, path: &str) -> bool {
        match self.pieces.as_slice() {
            [piece] => path.contains(piece.as_str()),
            [prefix, suffix, ..] => match (path.find(prefix.as_str()), path.find(suffix.as_str())) {
                (Some(p), Some(s)) => p <= s,
                _ => false,
            },
            [] => false,
        }
    }

    pub fn pieces(&self) -> &[String] {
        &self.pieces
    }
}

/// The parsed filter patterns plus the extension they force, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<Filter>,
    extension: Option<String>,
}

impl FilterSet {
    /// Parses filter patterns, one per item; blank items are skipped.
    ///
    /// Each pattern may hold at most one wildcard. A trailing extension is
    /// stripped and becomes the forced extension, the last one seen winning.
    pub fn parse<I, S>(patterns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filters = Vec::new();
        let mut extension = None;

        for pattern in patterns {
            let pattern = normalise(pattern.as_ref());
            if pattern.is_empty() {
                continue;
            }
            if pattern.len() == 1 && pattern.starts_with(WILDCARD) {
                return Err(Error::NoFilter);
            }
            if wildcard_count(&pattern) > 1 {
                return Err(Error::TooManyWildcards { filter: pattern });
            }

            let (stem, ext) = split_extension(&pattern);
            if let Some(ext) = ext {
                extension = Some(ext.to_owned());
            }

            let pieces: Vec<String> = stem
                .split(WILDCARD)
                .filter(|p| !p.is_empty())
                .map(str::to_owned)
                .collect();
            if pieces.is_empty() {
                return Err(Error::EmptyFilter { filter: pattern });
            }

            filters.push(Filter { pieces });
        }

        if filters.is_empty() {
            return Err(Error::NoFilter);
        }

        Ok(Self { filters, extension })
    }

    /// Forces `extension` (with or without its dot), overriding any taken
    /// from the patterns. Blank input leaves the set unchanged.
    pub fn with_extension(mut self, extension: &str) -> Self {
        let extension = extension.trim().trim_start_matches('.');
        if !extension.is_empty() {
            self.extension = Some(normalise(&format!(".{extension}")));
        }
        self
    }

    pub fn matches(&self, path: &str) -> bool {
        self.filters.iter().any(|f| f.matches(path))
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixMatchReport {
    /// Distinct `(directory, base)` pairs mixed against the catalogue.
    pub bases_mixed: usize,
    /// Truncations skipped because an earlier path already produced them.
    pub bases_skipped: usize,
    pub candidates: u64,
}

/// A prepared mix-match search: suffix catalogue and base-path queue.
#[derive(Debug, Clone)]
pub struct MixMatchSearch {
    catalogue: Vec<String>,
    bases: Vec<String>,
    max_depth: usize,
}

impl MixMatchSearch {
    /// Prepares a search. `max_depth` is clamped to at least 1.
    pub fn new(filters: &FilterSet, dictionary: &Dictionary, max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        let catalogue = suffix_catalogue(dictionary, filters.extension(), max_depth);
        let bases = base_paths(filters, dictionary);

        debug!(
            fragments = catalogue.len(),
            bases = bases.len(),
            max_depth,
            "Prepared mix-match search"
        );

        Self { catalogue, bases, max_depth }
    }

    /// Catalogued suffix fragments, sorted.
    pub fn catalogue(&self) -> &[String] {
        &self.catalogue
    }

    /// The base-path queue in processing order.
    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Truncated base names of `path`, shallowest first.
    ///
    /// Each is a separator followed by the extension-less file name with its
    /// last `i` segments dropped, for `i` up to the path's underscore count
    /// (capped at the depth). Dropping every segment leaves a bare separator.
    pub fn truncations(&self, path: &str) -> Vec<String> {
        let segments: Vec<&str> = path::file_stem(path).split('_').collect();
        let depth = underscore_count(path).min(self.max_depth);

        (0..=depth)
            .map(|i| {
                let keep = segments.len().saturating_sub(i);
                format!("{SEPARATOR}{}", segments[..keep].join("_"))
            })
            .collect()
    }

    /// Every candidate for one `(directory, base)` pair, in catalogue order.
    /// `directory + base + fragment` comes first, then the same with an
    /// underscore between directory and base.
    pub fn candidates<'a>(
        &'a self,
        directory: &'a str,
        base: &'a str,
    ) -> impl Iterator<Item = String> + 'a {
        self.catalogue.iter().flat_map(move |fragment| {
            [
                format!("{directory}{base}{fragment}"),
                format!("{directory}_{base}{fragment}"),
            ]
        })
    }

    fn mix(&self, ctx: &SearchContext, directory: &str, base: &str) {
        self.catalogue.par_iter().for_each_init(String::new, |buf, fragment| {
            buf.clear();
            buf.push_str(directory);
            buf.push_str(base);
            buf.push_str(fragment);
            ctx.check(buf.as_str());

            buf.clear();
            buf.push_str(directory);
            buf.push('_');
            buf.push_str(base);
            buf.push_str(fragment);
            ctx.check(buf.as_str());
        });
    }
}

impl CandidateSource for MixMatchSearch {
    type Report = MixMatchReport;

    fn total_units(&self) -> u64 {
        self.bases.len() as u64
    }

    fn run(&self, ctx: &SearchContext) -> Result<MixMatchReport, Error> {
        if self.catalogue.is_empty() {
            warn!("Suffix catalogue is empty, nothing to mix");
        }
        info!(
            fragments = self.catalogue.len(),
            bases = self.bases.len(),
            "Starting mix-match search"
        );

        let mut report = MixMatchReport::default();
        let mut queue: VecDeque<&str> = self.bases.iter().map(String::as_str).collect();
        let mut processed: HashSet<String> = HashSet::new();

        while let Some(path) = queue.pop_front() {
            let directory = path::directory(path);

            for base in self.truncations(path) {
                let key = format!("{directory}{base}");
                if processed.contains(&key) {
                    report.bases_skipped += 1;
                    continue;
                }

                self.mix(ctx, directory, &base);

                report.bases_mixed += 1;
                report.candidates += 2 * self.catalogue.len() as u64;
                processed.insert(key);
            }

            ctx.advance();
        }

        Ok(report)
    }
}

/// Harvests trailing underscore segments of every listfile name.
///
/// For a path with `u` underscores, the last `i` segments of its file name
/// (extension included) are taken for each `i` in `1..=min(u, max_depth)` and
/// registered both bare and with a leading underscore. When `extension` is
/// set only paths with that extension contribute.
pub fn suffix_catalogue(
    dictionary: &Dictionary,
    extension: Option<&str>,
    max_depth: usize,
) -> Vec<String> {
    let mut catalogue = BTreeSet::new();

    for path in dictionary.paths() {
        if extension.is_some_and(|ext| path::extension(path) != ext) {
            continue;
        }

        let segments: Vec<&str> = path::file_name(path).split('_').collect();
        let depth = underscore_count(path).min(max_depth);

        for i in 1..=depth {
            let start = segments.len().saturating_sub(i);
            let fragment = segments[start..].join("_");
            catalogue.insert(format!("_{fragment}"));
            catalogue.insert(fragment);
        }
    }

    catalogue.into_iter().collect()
}

/// Listfile paths picked out by the filters followed by the filters' own
/// literal pieces, deduplicated in first-seen order.
pub fn base_paths(filters: &FilterSet, dictionary: &Dictionary) -> Vec<String> {
    let mut seen = HashSet::new();
    dictionary
        .paths()
        .iter()
        .filter(|p| filters.matches(p))
        .chain(filters.filters().iter().flat_map(Filter::pieces))
        .filter(|p| seen.insert(p.as_str()))
        .cloned()
        .collect()
}
