use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request to {url} failed: {source}")]
    HttpRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No listfile at '{path}' and none could be downloaded")]
    ListfileUnavailable { path: PathBuf },

    #[error(transparent)]
    Search(#[from] casc_hashmatch::Error),
}
