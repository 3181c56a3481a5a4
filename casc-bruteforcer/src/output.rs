use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::Error;
use crate::report::report_best_effort;

/// Default local results log.
pub const DEFAULT_OUTPUT: &str = "Output.txt";

/// Prints the match count followed by every match.
pub fn print_summary(matches: &[String]) {
    println!("Found {}:", matches.len());
    for m in matches {
        println!("  {m}");
    }
    println!();
}

/// Appends one match per line to `path`, creating it if needed.
pub async fn append_results(path: &Path, matches: &[String]) -> Result<(), Error> {
    let mut body = String::with_capacity(matches.iter().map(|m| m.len() + 1).sum());
    for m in matches {
        body.push_str(m);
        body.push('\n');
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(body.as_bytes()).await?;
    file.flush().await?;

    info!(path = %path.display(), lines = matches.len(), "Appended results");
    Ok(())
}

/// Writes the final matches locally, then pushes them to `report_url` if set.
///
/// Only the local export can fail the run.
pub async fn publish(
    client: &reqwest::Client,
    output: &Path,
    report_url: Option<&str>,
    matches: &[String],
) -> Result<(), Error> {
    if matches.is_empty() {
        return Ok(());
    }

    append_results(output, matches).await?;

    if let Some(url) = report_url {
        report_best_effort(client, url, matches).await;
    }

    Ok(())
}
