//! Finds names for unknown CASC listfile hashes.
//!
//! This crate wires [`casc_hashmatch`] to the outside world: it fetches the
//! community listfile and the dump of still-unknown hashes (caching both on
//! disk), runs a search, then appends the recovered names to a local results
//! log and pushes them to a verification service on a best-effort basis.
//!
//! # Usage
//!
//! Substitute every listfile word into a mask:
//!
//! ```sh
//! casc-bruteforcer wordlist "world/maps/%/%.wdt" --listfile-url <URL> --unknown-url <URL>
//! ```
//!
//! Recombine names under a directory with known suffixes, forcing `.blp`:
//!
//! ```sh
//! casc-bruteforcer mixmatch "world/expansion02/doodads/%" --extension blp --depth 3
//! ```
//!
//! Both inputs are cached as `listfile.txt` and `unk_listfile.txt` under
//! `--cache-dir`, so later runs work offline.

pub mod error;
pub mod listfile;
pub mod output;
pub mod report;

pub use error::Error;
pub use listfile::{
    KNOWN_LISTFILE_NAME, ListfileSource, UNKNOWN_LISTFILE_NAME, load_dictionary, load_targets,
    read_patterns,
};
pub use output::{DEFAULT_OUTPUT, append_results, print_summary, publish};
pub use report::{CHECKFILES_URL, REPORT_CHUNK_LINES, report_best_effort};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("casc-bruteforcer/", env!("CARGO_PKG_VERSION"));
