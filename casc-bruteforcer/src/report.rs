//! Best-effort push of recovered names to a remote verification service.

use tracing::{debug, info, warn};

use crate::error::Error;

/// Default verification endpoint.
pub const CHECKFILES_URL: &str = "https://bnet.marlam.in/checkFiles.php";

/// Maximum number of paths per request.
pub const REPORT_CHUNK_LINES: usize = 20_000;

/// Posts one chunk as `files=<paths joined by CRLF>`.
pub async fn post_chunk(client: &reqwest::Client, url: &str, chunk: &[String]) -> Result<(), Error> {
    let files = chunk.join("\r\n");
    let response = client
        .post(url)
        .form(&[("files", files.as_str())])
        .send()
        .await
        .map_err(|source| Error::HttpRequest { url: url.to_string(), source })?;

    if !response.status().is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    Ok(())
}

/// Posts `matches` in chunks of [`REPORT_CHUNK_LINES`].
///
/// A failed chunk is logged and dropped; later chunks are still sent and
/// nothing is retried. Returns how many paths were accepted.
pub async fn report_best_effort(client: &reqwest::Client, url: &str, matches: &[String]) -> usize {
    let mut accepted = 0;

    for (i, chunk) in matches.chunks(REPORT_CHUNK_LINES).enumerate() {
        match post_chunk(client, url, chunk).await {
            Ok(()) => {
                debug!(chunk = i, lines = chunk.len(), "Reported chunk");
                accepted += chunk.len();
            }
            Err(e) => warn!(chunk = i, error = %e, "Failed to report results, ignoring"),
        }
    }

    if accepted > 0 {
        info!(url, accepted, "Reported results");
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_is_swallowed() {
        let matches = vec!["world/a.wdt".to_string(), "world/b.wdt".to_string()];
        let accepted =
            report_best_effort(&reqwest::Client::new(), "http://127.0.0.1:9/checkFiles.php", &matches)
                .await;
        assert_eq!(accepted, 0);
    }

    #[tokio::test]
    async fn test_nothing_to_report() {
        let accepted =
            report_best_effort(&reqwest::Client::new(), "http://127.0.0.1:9/checkFiles.php", &[])
                .await;
        assert_eq!(accepted, 0);
    }
}
