use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use casc_hashmatch::{
    CandidateSource, DEFAULT_MAX_DEPTH, FilterSet, HashIndex, MixMatchSearch, SearchContext,
    TemplateSearch,
};
use casc_bruteforcer::{
    CHECKFILES_URL, DEFAULT_OUTPUT, Error, KNOWN_LISTFILE_NAME, ListfileSource,
    UNKNOWN_LISTFILE_NAME, USER_AGENT, load_dictionary, load_targets, print_summary, publish,
    read_patterns,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "casc-bruteforcer")]
#[command(about = "Recover unknown CASC listfile paths from their Jenkins hashes")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// URL of the known listfile (falls back to the cached copy)
    #[arg(long, env = "CASC_LISTFILE_URL", global = true)]
    listfile_url: Option<String>,

    /// URL of the unknown hash list (falls back to the cached copy)
    #[arg(long, env = "CASC_UNKNOWN_URL", global = true)]
    unknown_url: Option<String>,

    /// Directory holding the cached listfiles
    #[arg(long, env = "CASC_CACHE_DIR", default_value = ".", global = true)]
    cache_dir: PathBuf,

    /// File recovered paths are appended to
    #[arg(short, long, default_value = DEFAULT_OUTPUT, global = true)]
    output: PathBuf,

    /// Endpoint recovered paths are reported to
    #[arg(long, env = "CASC_REPORT_URL", default_value = CHECKFILES_URL, global = true)]
    report_url: String,

    /// Don't report recovered paths
    #[arg(long, global = true)]
    no_report: bool,

    /// Disable progress bar
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Substitute every listfile word into masks
    Wordlist {
        /// Mask with at most one '%', or a file of masks (one per line)
        masks: String,

        /// Number of masks searched concurrently (0 searches on one thread)
        #[arg(short = 'j', long, default_value_t = 0)]
        parallel: usize,
    },

    /// Recombine filtered listfile names with known underscore suffixes
    Mixmatch {
        /// Filter with at most one '%', or a file of filters (one per line)
        filter: String,

        /// Only harvest suffixes from files with this extension
        #[arg(short, long)]
        extension: Option<String>,

        /// Maximum number of underscore segments cut or appended
        #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,
    },
}

/// A validated search waiting for its inputs.
enum Plan {
    Wordlist(TemplateSearch),
    Mixmatch { filters: FilterSet, depth: usize },
}

impl Plan {
    async fn from_command(command: Command) -> Result<Self, Error> {
        match command {
            Command::Wordlist { masks, parallel } => {
                let masks = read_patterns(&masks).await?;
                let search = TemplateSearch::with_words(masks, Vec::new())?.fan_out(parallel);
                Ok(Plan::Wordlist(search))
            }
            Command::Mixmatch { filter, extension, depth } => {
                let mut filters = FilterSet::parse(read_patterns(&filter).await?)?;
                if let Some(extension) = extension {
                    filters = filters.with_extension(&extension);
                }
                Ok(Plan::Mixmatch { filters, depth })
            }
        }
    }
}

/// Runs `search` on a blocking thread while a progress bar tracks it.
async fn run_search<S>(search: S, index: HashIndex, no_progress: bool) -> Result<Vec<String>, Error>
where
    S: CandidateSource + Send + 'static,
    S::Report: std::fmt::Debug + Send + 'static,
{
    let total = search.total_units();
    let progress_counter = Arc::new(AtomicU64::new(0));
    let ctx = SearchContext::new(index).with_progress(Arc::clone(&progress_counter));

    // Set up progress bar
    let progress_bar = if !no_progress {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_counter_clone = Arc::clone(&progress_counter);
    let progress_bar_clone = progress_bar.clone();
    let progress_task = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let current = progress_counter_clone.load(Ordering::Relaxed);
            if let Some(ref pb) = progress_bar_clone {
                pb.set_position(current);
            }
            if current >= total {
                break;
            }
        }
    });

    let started = Instant::now();
    let outcome = tokio::task::spawn_blocking(move || {
        let report = search.run(&ctx)?;
        Ok::<_, Error>((report, ctx.into_matches()))
    })
    .await;

    progress_task.abort();
    if let Some(pb) = progress_bar {
        pb.set_position(progress_counter.load(Ordering::Relaxed));
        pb.finish_with_message("done");
    }

    let (report, matches) = outcome
        .map_err(|e| Error::Io(std::io::Error::other(format!("Search task panicked: {}", e))))??;

    info!(?report, elapsed = ?started.elapsed(), "Search complete");
    Ok(matches)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Reject bad masks and filters before downloading anything
    let plan = Plan::from_command(args.command).await?;

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(Error::HttpClient)?;

    let known = ListfileSource::new(args.listfile_url, args.cache_dir.join(KNOWN_LISTFILE_NAME));
    let unknown = ListfileSource::new(args.unknown_url, args.cache_dir.join(UNKNOWN_LISTFILE_NAME));
    let (dictionary, targets) =
        tokio::try_join!(load_dictionary(&client, &known), load_targets(&client, &unknown))?;

    let index = HashIndex::build(&targets);
    info!(
        known = dictionary.len(),
        unknown = targets.len(),
        scan_width = index.scan_width(),
        "Loaded listfiles"
    );

    let matches = match plan {
        Plan::Wordlist(search) => {
            run_search(search.dictionary(&dictionary), index, args.no_progress).await?
        }
        Plan::Mixmatch { filters, depth } => {
            let search = MixMatchSearch::new(&filters, &dictionary, depth);
            run_search(search, index, args.no_progress).await?
        }
    };

    print_summary(&matches);

    let report_url = (!args.no_report).then_some(args.report_url.as_str());
    publish(&client, &args.output, report_url, &matches).await?;

    Ok(())
}
