//! `search` and `parse` command handlers.
//!
//! This is the form layer: it validates the query before the pipeline runs,
//! renders the result table and triggers the optional CSV export.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, ValueEnum};
use mpscout_core::{AppConfig, MatchMode, ResultSet, SearchQuery};
use mpscout_scraper::{
    process_markup, BrowserConfig, ListingPipeline, PageAcquirer, WebDriverLauncher,
};

use crate::export;

/// Matching strategy selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Product must appear verbatim (case-insensitive)
    Exact,
    /// Product may differ slightly (partial-ratio similarity)
    Fuzzy,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Exact => MatchMode::Exact,
            ModeArg::Fuzzy => MatchMode::Fuzzy,
        }
    }
}

/// Terms every listing is matched against.
#[derive(Debug, Args)]
pub struct MatchArgs {
    /// City that must appear in the listing text
    #[arg(long)]
    pub city: String,

    /// Product to look for
    #[arg(long)]
    pub product: String,

    /// How the product term is matched
    #[arg(long, value_enum, default_value_t = ModeArg::Exact)]
    pub mode: ModeArg,

    /// Fuzzy score a listing must exceed (0-100); defaults to MPSCOUT_FUZZY_THRESHOLD
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Write the results to a CSV file
    #[arg(long)]
    pub csv: bool,

    /// Directory for the CSV file; defaults to MPSCOUT_EXPORT_DIR
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub terms: MatchArgs,

    /// Minimum price
    #[arg(long, default_value_t = 0)]
    pub min_price: u64,

    /// Maximum price
    #[arg(long, default_value_t = 1000)]
    pub max_price: u64,

    /// Marketplace location code used in the search path
    #[arg(long)]
    pub region_code: String,

    /// Seconds to wait after each scroll; defaults to MPSCOUT_SCROLL_DELAY_MS
    #[arg(long)]
    pub scroll_delay: Option<f64>,

    /// Maximum scroll steps; defaults to MPSCOUT_MAX_SCROLLS
    #[arg(long)]
    pub max_scrolls: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    #[command(flatten)]
    pub terms: MatchArgs,

    /// Saved HTML of a search results page
    #[arg(long)]
    pub html: PathBuf,
}

/// Builds and validates the query from command-line terms.
///
/// # Errors
///
/// Returns an error if city or product is blank, the price range is
/// inverted, or the threshold is above 100.
pub(crate) fn build_query(
    config: &AppConfig,
    terms: &MatchArgs,
    min_price: u64,
    max_price: u64,
    region_code: &str,
) -> anyhow::Result<SearchQuery> {
    let query = SearchQuery::new(
        terms.city.trim(),
        terms.product.trim(),
        min_price,
        max_price,
        region_code.trim(),
        terms.mode.into(),
    )
    .with_fuzzy_threshold(terms.threshold.unwrap_or(config.fuzzy_threshold));

    query.validate().with_context(|| {
        "please ensure all fields are filled correctly and that the minimum price is \
         less than or equal to the maximum price"
    })?;
    Ok(query)
}

/// Scroll delay from the flag (seconds) or the config (milliseconds).
///
/// # Errors
///
/// Returns an error for negative or non-finite values.
pub(crate) fn scroll_delay(
    config: &AppConfig,
    flag_secs: Option<f64>,
) -> anyhow::Result<Duration> {
    match flag_secs {
        Some(secs) => Duration::try_from_secs_f64(secs)
            .with_context(|| format!("invalid --scroll-delay {secs}")),
        None => Ok(Duration::from_millis(config.scroll_delay_ms)),
    }
}

/// Run a live marketplace search.
///
/// # Errors
///
/// Returns an error if the query is invalid, the configured listing base URL
/// is not absolute, or the CSV export cannot be written. Browser failures
/// are not errors: they surface as an empty result.
pub(crate) async fn run_search(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let query = build_query(
        config,
        &args.terms,
        args.min_price,
        args.max_price,
        &args.region_code,
    )?;

    let acquirer = PageAcquirer::new(scroll_delay(config, args.scroll_delay)?)
        .with_max_scrolls(args.max_scrolls.unwrap_or(config.max_scrolls))
        .with_deadline(Duration::from_secs(config.acquire_timeout_secs));
    let launcher = WebDriverLauncher::new(BrowserConfig::from_app_config(config));
    let pipeline = ListingPipeline::new(
        launcher,
        acquirer,
        config.marketplace_origin.as_str(),
        &config.listing_base_url,
    )?;

    eprintln!("Scraping matches...");
    let results = pipeline.run(&query).await;

    report(config, &args.terms, &query, &results)
}

/// Filter listings from a saved results page.
///
/// # Errors
///
/// Returns an error if the query is invalid, the HTML file cannot be read,
/// or the CSV export cannot be written.
pub(crate) fn run_parse(config: &AppConfig, args: &ParseArgs) -> anyhow::Result<()> {
    let query = build_query(config, &args.terms, 0, 0, "")?;
    let markup = std::fs::read_to_string(&args.html)
        .with_context(|| format!("failed to read {}", args.html.display()))?;
    let listing_base = url::Url::parse(&config.listing_base_url).with_context(|| {
        format!("invalid MPSCOUT_LISTING_BASE_URL {}", config.listing_base_url)
    })?;

    let results = process_markup(&markup, &query, &listing_base);

    report(config, &args.terms, &query, &results)
}

fn report(
    config: &AppConfig,
    terms: &MatchArgs,
    query: &SearchQuery,
    results: &ResultSet,
) -> anyhow::Result<()> {
    if results.is_empty() {
        println!("No match results found. Please try different parameters.");
        println!("({} links seen on the page)", results.total_candidates);
        return Ok(());
    }

    println!("Found {} match(es)!", results.len());
    println!();
    print!("{}", render_table(results));
    println!();
    println!("{} links seen on the page", results.total_candidates);
    if !results.complete {
        println!("warning: the page did not finish loading; results may be partial");
    }

    if terms.csv {
        let dir = terms.out_dir.as_deref().unwrap_or(&config.export_dir);
        let path = export::export_results(dir, query, results, chrono::Local::now())?;
        println!("saved {}", path.display());
    }

    Ok(())
}

const TITLE_WIDTH: usize = 40;
const LOCATION_WIDTH: usize = 24;

/// Renders records as a fixed-width table with a header row.
pub(crate) fn render_table(results: &ResultSet) -> String {
    use std::fmt::Write as _;

    let mut out = format!(
        "{:<w_title$}  {:>10}  {:<w_loc$}  URL\n",
        "TITLE",
        "PRICE",
        "LOCATION",
        w_title = TITLE_WIDTH,
        w_loc = LOCATION_WIDTH,
    );
    for record in &results.records {
        let price = record
            .price
            .map_or_else(|| "\u{2014}".to_string(), |p| format!("{p:.2}"));
        let _ = writeln!(
            out,
            "{:<w_title$}  {:>10}  {:<w_loc$}  {}",
            truncate(&record.title, TITLE_WIDTH),
            price,
            truncate(&record.location, LOCATION_WIDTH),
            record.url,
            w_title = TITLE_WIDTH,
            w_loc = LOCATION_WIDTH,
        );
    }
    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
