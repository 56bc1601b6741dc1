use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::Parser;
use kawaraban_core::item::AnnouncementItem;
use kawaraban_core::{
    Document, FetchConfig, FilterOptions, NullRenderer, Registry, filter, formatters, scrape_url,
    siteconfig,
};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod echo;
mod paths;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

/// Scrape announcement pages and emit an RSS feed plus a CSV table
#[derive(Parser, Debug)]
#[command(name = "kawaraban")]
#[command(author = "Kawaraban Contributors")]
#[command(version = VERSION)]
#[command(about = "Scrape announcement pages into RSS and CSV", long_about = None)]
struct Args {
    /// Target URL, "all" for every configured target, a local HTML file, or "-" for stdin
    #[arg(value_name = "TARGET")]
    target: String,

    /// Keep only items published on or after this date
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    since: Option<NaiveDate>,

    /// Keep only items published on or before this date
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    until: Option<NaiveDate>,

    /// Keep only items carrying this category
    #[arg(long, value_name = "NAME")]
    category: Option<String>,

    /// Drop items carrying this category
    #[arg(long, value_name = "NAME")]
    exclude_category: Option<String>,

    /// Feed output path (default: derived from the target URL)
    #[arg(long, value_name = "FILE")]
    feed_output: Option<PathBuf>,

    /// CSV output path (default: feed path with a .csv extension)
    #[arg(long, value_name = "FILE")]
    csv_output: Option<PathBuf>,

    /// Only emit items newer than the latest date in the existing feed
    #[arg(long)]
    diff_mode: bool,

    /// Append the run date to default output filenames
    #[arg(long)]
    with_date: bool,

    /// Base URL for resolving links when reading a file or stdin
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except the exit code
    #[arg(long)]
    silent: bool,
}

enum Source {
    Url,
    Stdin,
    File(PathBuf),
}

fn classify(target: &str) -> Source {
    if target == "-" {
        Source::Stdin
    } else if target.starts_with("http://") || target.starts_with("https://") {
        Source::Url
    } else {
        Source::File(PathBuf::from(target))
    }
}

fn init_tracing(verbose: bool, silent: bool) {
    if silent {
        return;
    }
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tfmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

struct Outcome {
    extracted: usize,
    written: usize,
    feed_path: PathBuf,
    csv_path: PathBuf,
}

/// Extract items from markup that did not come over the network.
fn extract_local(
    markup: &str, source_url: &str, registry: &Registry,
) -> anyhow::Result<(Vec<AnnouncementItem>, String, Option<String>, Option<String>)> {
    let site = siteconfig::lookup(source_url);
    let extractor = registry.resolve(source_url);
    let items = extractor.extract(markup, source_url, &site)?;

    let doc = Document::parse(markup)?;
    Ok((items, source_url.to_string(), doc.title(), doc.meta_description()))
}

async fn process_target(
    target: &str, args: &Args, registry: &Registry, fetch_config: &FetchConfig, multi: bool,
) -> anyhow::Result<Outcome> {
    let (items, source_url, page_title, page_description) = match classify(target) {
        Source::Url => {
            let items = scrape_url(target, registry, &NullRenderer, fetch_config).await?;
            (items, target.to_string(), None, None)
        }
        Source::Stdin => {
            let mut markup = String::new();
            io::stdin().read_to_string(&mut markup).context("failed to read stdin")?;
            let source_url = args.base_url.as_deref().unwrap_or("file:///dev/stdin");
            extract_local(&markup, source_url, registry)?
        }
        Source::File(path) => {
            let markup = fs::read_to_string(&path)
                .with_context(|| format!("failed to read file: {}", path.display()))?;
            let fallback_url = format!("file://{}", path.display());
            let source_url = args.base_url.as_deref().unwrap_or(&fallback_url);
            extract_local(&markup, source_url, registry)?
        }
    };

    let mut feed_path = match (&args.feed_output, multi) {
        (Some(path), true) => paths::host_suffixed(path, target),
        (Some(path), false) => path.clone(),
        (None, _) => PathBuf::from(paths::default_filename(&source_url, "xml", args.with_date)),
    };
    let mut csv_path = match (&args.csv_output, multi) {
        (Some(path), true) => paths::host_suffixed(path, target),
        (Some(path), false) => path.clone(),
        (None, _) => feed_path.with_extension("csv"),
    };

    // Differential mode: the previous feed's newest entry becomes the
    // lower date bound and the output moves aside instead of clobbering.
    let mut since_from_feed = None;
    if args.diff_mode {
        if let Some(latest) = formatters::latest_seen_in_file(&feed_path)? {
            let since = latest.date_naive();
            if !args.silent {
                echo::print_info(&format!("diff mode: keeping items from {} onwards", since));
            }
            since_from_feed = Some(since);
            feed_path = paths::next_available(&feed_path);
            csv_path = feed_path.with_extension("csv");
        }
    }

    let options = FilterOptions {
        since: args.since.or(since_from_feed),
        until: args.until,
        category: args.category.clone(),
        exclude_category: args.exclude_category.clone(),
    };

    let extracted = items.len();
    let filtered = filter::apply(items, &options);

    let feed = formatters::render_feed(
        &filtered,
        &source_url,
        page_title.as_deref(),
        page_description.as_deref(),
    )?;
    fs::write(&feed_path, feed)
        .with_context(|| format!("failed to write feed: {}", feed_path.display()))?;

    let table = formatters::render_table(&filtered);
    fs::write(&csv_path, table)
        .with_context(|| format!("failed to write csv: {}", csv_path.display()))?;

    Ok(Outcome { extracted, written: filtered.len(), feed_path, csv_path })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.silent);

    if args.verbose {
        echo::print_banner();
    }

    let targets = if args.target == "all" {
        siteconfig::configured_targets()
    } else {
        vec![args.target.clone()]
    };
    let multi = targets.len() > 1;

    let registry = Registry::with_defaults();
    let fetch_config = FetchConfig {
        timeout: args.timeout,
        user_agent: args
            .user_agent
            .clone()
            .unwrap_or_else(|| FetchConfig::default().user_agent),
    };

    let mut succeeded = 0usize;
    let mut last_extracted = 0usize;

    for target in &targets {
        if !args.silent {
            echo::print_target(target);
        }

        match process_target(target, &args, &registry, &fetch_config, multi).await {
            Ok(outcome) => {
                succeeded += 1;
                last_extracted = outcome.extracted;
                if outcome.extracted == 0 && !args.silent {
                    echo::print_warning("no items could be extracted");
                }
                if !args.silent {
                    echo::print_success(&format!(
                        "{} items extracted, {} written after filters",
                        outcome.extracted, outcome.written
                    ));
                    echo::print_success(&format!("feed: {}", outcome.feed_path.display()));
                    echo::print_success(&format!("csv:  {}", outcome.csv_path.display()));
                }
            }
            Err(e) => {
                if !args.silent {
                    echo::print_error(&format!("{}: {:#}", target, e));
                }
            }
        }
    }

    if succeeded == 0 {
        bail!("no target could be processed");
    }
    if !multi && last_extracted == 0 {
        bail!("no announcements could be extracted from {}", targets[0]);
    }

    Ok(())
}
