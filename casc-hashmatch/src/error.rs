#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown hash list is missing or empty")]
    EmptyTargetSet,

    #[error("Known listfile contains no paths")]
    EmptyDictionary,

    #[error("No valid masks provided")]
    NoMasks,

    #[error("No filter provided")]
    NoFilter,

    #[error("Filter '{filter}' can't have more than one wildcard character")]
    TooManyWildcards { filter: String },

    #[error("Filter '{filter}' has no literal text to match on")]
    EmptyFilter { filter: String },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
