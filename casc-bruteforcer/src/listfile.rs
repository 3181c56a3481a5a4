use std::io;
use std::path::{Path, PathBuf};

use casc_hashmatch::{Dictionary, TargetSet};
use tokio::fs;
use tracing::{info, warn};

use crate::error::Error;

/// Cache file name for the known listfile.
pub const KNOWN_LISTFILE_NAME: &str = "listfile.txt";

/// Cache file name for the unknown-hash dump.
pub const UNKNOWN_LISTFILE_NAME: &str = "unk_listfile.txt";

/// A listfile fetched from an optional URL and cached on disk.
///
/// A successful download refreshes the cache. When there is no URL, or the
/// download fails, the cached copy is used instead.
#[derive(Debug, Clone)]
pub struct ListfileSource {
    url: Option<String>,
    cache: PathBuf,
}

impl ListfileSource {
    pub fn new(url: Option<String>, cache: PathBuf) -> Self {
        Self { url, cache }
    }

    pub fn cache(&self) -> &Path {
        &self.cache
    }

    /// Returns the listfile text, downloading it first if a URL is set.
    pub async fn load(&self, client: &reqwest::Client) -> Result<String, Error> {
        if let Some(url) = &self.url {
            match download(client, url).await {
                Ok(body) => {
                    info!(url = %url, bytes = body.len(), "Downloaded listfile");
                    if let Err(e) = write_cache(&self.cache, &body).await {
                        warn!(path = %self.cache.display(), error = %e, "Failed to cache listfile");
                    }
                    return Ok(body);
                }
                Err(e) => warn!(error = %e, "Listfile download failed, falling back to cache"),
            }
        }

        match fs::read_to_string(&self.cache).await {
            Ok(body) => {
                info!(path = %self.cache.display(), bytes = body.len(), "Using cached listfile");
                Ok(body)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(Error::ListfileUnavailable { path: self.cache.clone() })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Fetches `url` and returns the body as text. No retries.
pub async fn download(client: &reqwest::Client, url: &str) -> Result<String, Error> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| Error::HttpRequest { url: url.to_string(), source })?;

    if !response.status().is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| Error::HttpRequest { url: url.to_string(), source })
}

async fn write_cache(path: &Path, body: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, body).await
}

/// Loads and normalises the known listfile.
pub async fn load_dictionary(
    client: &reqwest::Client,
    source: &ListfileSource,
) -> Result<Dictionary, Error> {
    let text = source.load(client).await?;
    Ok(Dictionary::from_listfile(&text)?)
}

/// Loads and parses the unknown-hash dump.
pub async fn load_targets(
    client: &reqwest::Client,
    source: &ListfileSource,
) -> Result<TargetSet, Error> {
    let text = source.load(client).await?;
    Ok(TargetSet::parse(&text)?)
}

/// Reads masks or filters: the lines of `arg` if it names a file, otherwise
/// `arg` itself.
pub async fn read_patterns(arg: &str) -> Result<Vec<String>, Error> {
    let path = Path::new(arg);
    if fs::metadata(path).await.is_ok_and(|m| m.is_file()) {
        let text = fs::read_to_string(path).await?;
        return Ok(text.lines().map(str::to_owned).collect());
    }
    Ok(vec![arg.to_owned()])
}
