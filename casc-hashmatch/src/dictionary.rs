use std::collections::HashSet;

use crate::error::Error;
use crate::path::normalise;

/// Characters the word list is split on. `/` is absent because normalised
/// paths only contain `\`.
pub const WORD_DELIMITERS: [char; 5] = ['_', '\\', ' ', '-', '.'];

/// Known listfile paths, normalised and deduplicated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    paths: Vec<String>,
}

impl Dictionary {
    /// Builds a dictionary from listfile text, one path per line.
    pub fn from_listfile(text: &str) -> Result<Self, Error> {
        Self::from_paths(text.lines())
    }

    pub fn from_paths<I, S>(paths: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let paths: Vec<String> = paths
            .into_iter()
            .map(|p| normalise(p.as_ref()))
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect();

        if paths.is_empty() {
            return Err(Error::EmptyDictionary);
        }

        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Substitution words for templates.
    ///
    /// Every whole path, every piece of a path split on [`WORD_DELIMITERS`],
    /// and each delimiter as a word of its own. Empty pieces from adjacent
    /// delimiters are kept, so the mask with its wildcard simply removed is
    /// tried too.
    pub fn words(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.paths
            .iter()
            .map(String::as_str)
            .chain(self.paths.iter().flat_map(|p| p.split(WORD_DELIMITERS)))
            .map(str::to_owned)
            .chain(WORD_DELIMITERS.iter().map(char::to_string))
            .filter(|w| seen.insert(w.clone()))
            .collect()
    }
}
