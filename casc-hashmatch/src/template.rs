//! Template ("wordlist") search: substitute every dictionary word into a mask.

use std::collections::HashSet;

use rayon::ThreadPool;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::dictionary::Dictionary;
use crate::error::Error;
use crate::path::normalise;
use crate::search::{CandidateSource, SearchContext};

/// Placeholder replaced by each word.
pub const WILDCARD: char = '%';

#[inline]
pub fn wildcard_count(mask: &str) -> usize {
    mask.chars().filter(|&c| c == WILDCARD).count()
}

/// Replaces the wildcard in `mask` with `word` and normalises the result.
#[inline]
pub fn substitute(mask: &str, word: &str) -> String {
    normalise(&mask.replacen(WILDCARD, word, 1))
}

/// Candidates produced by a single mask.
///
/// A mask without a wildcard yields only itself.
pub struct Candidates<'a> {
    mask: &'a str,
    literal: bool,
    words: std::slice::Iter<'a, String>,
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.literal {
            self.literal = false;
            return Some(self.mask.to_owned());
        }
        self.words.next().map(|word| substitute(self.mask, word))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateReport {
    /// Masks that were expanded.
    pub masks_run: usize,
    /// Masks skipped for having more than one wildcard.
    pub rejected: Vec<String>,
}

/// Expands masks against a word list.
///
/// With a fan-out of 0 everything runs on the calling thread. Otherwise up to
/// `fan_out` masks are expanded at once, each spreading its words over a
/// shared pool sized to the machine.
#[derive(Debug, Clone)]
pub struct TemplateSearch {
    masks: Vec<String>,
    words: Vec<String>,
    fan_out: usize,
}

impl TemplateSearch {
    /// Builds a search over `masks` using the words of `dictionary`.
    pub fn new<I, S>(masks: I, dictionary: &Dictionary) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_words(masks, dictionary.words())
    }

    /// Builds a search with an explicit word list.
    pub fn with_words<I, S>(masks: I, words: Vec<String>) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let masks: Vec<String> = masks
            .into_iter()
            .map(|m| normalise(m.as_ref()))
            .filter(|m| !m.is_empty())
            .filter(|m| seen.insert(m.clone()))
            .collect();

        if masks.is_empty() {
            return Err(Error::NoMasks);
        }

        Ok(Self { masks, words, fan_out: 0 })
    }

    /// Replaces the word list with the words of `dictionary`.
    pub fn dictionary(mut self, dictionary: &Dictionary) -> Self {
        self.words = dictionary.words();
        self
    }

    pub fn fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out;
        self
    }

    pub fn masks(&self) -> &[String] {
        &self.masks
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Candidates for `mask`, or `None` if it has more than one wildcard.
    pub fn candidates<'a>(&'a self, mask: &'a str) -> Option<Candidates<'a>> {
        let (literal, words) = match wildcard_count(mask) {
            0 => (true, self.words[..0].iter()),
            1 => (false, self.words.iter()),
            _ => return None,
        };
        Some(Candidates { mask, literal, words })
    }

    /// Runs one mask, returning it back if it had to be rejected.
    fn run_mask(&self, mask: &str, ctx: &SearchContext, pool: Option<&ThreadPool>) -> Option<String> {
        let Some(candidates) = self.candidates(mask) else {
            warn!(mask, "Templates must contain at most one '{WILDCARD}' character, skipping");
            ctx.advance();
            return Some(mask.to_owned());
        };

        match pool {
            Some(pool) if !candidates.literal => pool.install(|| {
                self.words.par_iter().for_each(|word| {
                    ctx.check(&substitute(mask, word));
                });
            }),
            _ => candidates.for_each(|candidate| {
                ctx.check(&candidate);
            }),
        }

        debug!(mask, "Mask complete");
        ctx.advance();
        None
    }
}

impl CandidateSource for TemplateSearch {
    type Report = TemplateReport;

    fn total_units(&self) -> u64 {
        self.masks.len() as u64
    }

    fn run(&self, ctx: &SearchContext) -> Result<TemplateReport, Error> {
        info!(
            masks = self.masks.len(),
            words = self.words.len(),
            fan_out = self.fan_out,
            "Starting wordlist search"
        );

        let rejected: Vec<String> = if self.fan_out == 0 {
            self.masks.iter().filter_map(|mask| self.run_mask(mask, ctx, None)).collect()
        } else {
            let masks_pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.fan_out)
                .thread_name(|i| format!("mask-{i}"))
                .build()?;
            let words_pool = rayon::ThreadPoolBuilder::new()
                .thread_name(|i| format!("words-{i}"))
                .build()?;

            masks_pool.install(|| {
                self.masks
                    .par_iter()
                    .filter_map(|mask| self.run_mask(mask, ctx, Some(&words_pool)))
                    .collect()
            })
        };

        Ok(TemplateReport { masks_run: self.masks.len() - rejected.len(), rejected })
    }
}
