//! Recovers CASC listfile paths from their 64-bit Jenkins hashes.
//!
//! Blizzard's CASC root files key every file by the lookup3 hash of its
//! upper-cased, backslash-separated path. For files the community listfile
//! doesn't name yet, only that hash is known. This crate generates candidate
//! paths, hashes each one and checks it against the set of unknown hashes.
//!
//! The membership check runs once per candidate across search spaces of
//! billions of strings, so [`HashIndex`] keeps it to a single flat array scan
//! with no per-bucket bounds checks.
//!
//! Two strategies feed it:
//!
//! - [`TemplateSearch`]: masks with a single `%` wildcard expanded with every
//!   word found in the known listfile.
//! - [`MixMatchSearch`]: truncations of filtered listfile names recombined with
//!   every underscore-delimited suffix seen anywhere in the listfile.
//!
//! # Example
//!
//! ```
//! use casc_hashmatch::{
//!     CandidateSource, Dictionary, HashIndex, SearchContext, TemplateSearch, hash_path,
//! };
//!
//! let index = HashIndex::from_hashes([hash_path("FOO\\BAR.BLP")]).unwrap();
//! let dictionary = Dictionary::from_listfile("foo/bar.blp\n").unwrap();
//! let search = TemplateSearch::new(["foo/%.blp"], &dictionary).unwrap();
//!
//! let ctx = SearchContext::new(index);
//! search.run(&ctx).unwrap();
//! assert_eq!(ctx.into_matches(), vec!["foo/bar.blp"]);
//! ```

pub mod collector;
pub mod dictionary;
pub mod error;
pub mod index;
pub mod jenkins;
pub mod mixmatch;
pub mod path;
pub mod search;
pub mod targets;
pub mod template;

pub use collector::{MatchCollector, dedup_matches};
pub use dictionary::Dictionary;
pub use error::Error;
pub use index::HashIndex;
pub use jenkins::{BUCKET_COUNT, bucket_key, hash_path, hashlittle2};
pub use mixmatch::{DEFAULT_MAX_DEPTH, FilterSet, MixMatchReport, MixMatchSearch};
pub use path::{display_form, normalise};
pub use search::{CandidateSource, SearchContext};
pub use targets::TargetSet;
pub use template::{TemplateReport, TemplateSearch, WILDCARD};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_template() {
        let targets = TargetSet::parse(&format!("{:016X}\n", hash_path("FOO\\BAR.BLP"))).unwrap();
        let dictionary = Dictionary::from_listfile("FOO\\BAR.BLP\n").unwrap();
        let search = TemplateSearch::new(["%"], &dictionary).unwrap();

        let ctx = SearchContext::new(HashIndex::build(&targets));
        let report = search.run(&ctx).unwrap();

        assert!(report.rejected.is_empty());
        assert_eq!(ctx.into_matches(), vec!["foo/bar.blp"]);
    }

    #[test]
    fn test_end_to_end_mixmatch() {
        let wanted = "WORLD\\EXPANSION\\DOODADS\\CRATE_BROKEN_02.M2";
        let targets = TargetSet::new([hash_path(wanted), 0xDEAD]).unwrap();
        let dictionary = Dictionary::from_listfile(
            "world/expansion/doodads/crate_broken_01.m2\n\
             world/expansion/doodads/crate_intact_02.m2\n\
             world/other/barrel_02.m2\n",
        )
        .unwrap();
        let filters = FilterSet::parse(["world/expansion/%crate"]).unwrap();
        let search = MixMatchSearch::new(&filters, &dictionary, DEFAULT_MAX_DEPTH);

        let ctx = SearchContext::new(HashIndex::build(&targets));
        search.run(&ctx).unwrap();

        assert_eq!(
            ctx.into_matches(),
            vec!["world/expansion/doodads/crate_broken_02.m2"]
        );
    }
}
