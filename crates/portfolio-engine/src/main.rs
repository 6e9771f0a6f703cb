//! `portfolio-browse`: print one page of a property portfolio
//!
//! Reads a JSON array of properties, applies the requested filter and sort,
//! and writes the selected page to stdout as JSON. A summary line goes to
//! stderr; logging is controlled through `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use portfolio_engine::error::FetchError;
use portfolio_engine::metrics::{self, DerivedMetrics};
use portfolio_engine::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Properties read from a JSON array on disk
struct JsonFileSource {
    path: PathBuf,
}

impl PropertySource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<Property>, FetchError> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| FetchError::Unavailable(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&raw).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

#[derive(Serialize)]
struct Row<'a> {
    #[serde(flatten)]
    property: &'a Property,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<DerivedMetrics>,
}

fn cli() -> Command {
    Command::new("portfolio-browse")
        .version(portfolio_engine::VERSION)
        .about("Filter, sort and page through a property portfolio")
        .arg(
            Arg::new("input")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON file containing an array of properties"),
        )
        .arg(
            Arg::new("bucket")
                .long("bucket")
                .default_value("available")
                .help("Lifecycle bucket to show (available, rented, maintenance, sold)"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .default_value("name")
                .help("Sort key, e.g. name, purchasePrice, grossYield"),
        )
        .arg(
            Arg::new("desc")
                .long("desc")
                .action(ArgAction::SetTrue)
                .help("Sort descending"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("1-based page number; clamped to the available pages"),
        )
        .arg(
            Arg::new("per-page")
                .long("per-page")
                .value_parser(value_parser!(usize))
                .help("Items per page (defaults to the configured page size)"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .help("Case-insensitive text search"),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .help("Only show one property type"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("TOML engine configuration"),
        )
        .arg(
            Arg::new("metrics")
                .long("metrics")
                .action(ArgAction::SetTrue)
                .help("Include derived metrics in the output"),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    EngineConfig::from_toml_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

fn criteria_from(args: &ArgMatches) -> Result<FilterCriteria> {
    let mut criteria = FilterCriteria::new();
    if let Some(search) = args.get_one::<String>("search") {
        criteria = criteria.with_search(search.as_str());
    }
    if let Some(raw) = args.get_one::<String>("type") {
        let property_type: PropertyType = raw.parse().context("invalid --type")?;
        criteria = criteria.with_type(property_type);
    }
    Ok(criteria)
}

fn run(args: &ArgMatches) -> Result<()> {
    let mut config = load_config(args.get_one::<PathBuf>("config"))?;
    if let Some(&per_page) = args.get_one::<usize>("per-page") {
        config = config.with_items_per_page(per_page);
    }

    let bucket: Bucket = args
        .get_one::<String>("bucket")
        .map_or("available", String::as_str)
        .parse()
        .context("invalid --bucket")?;
    let field: SortKey = args
        .get_one::<String>("sort")
        .map_or("name", String::as_str)
        .parse()
        .context("invalid --sort")?;
    let sort = if args.get_flag("desc") {
        SortSpec::descending(field)
    } else {
        SortSpec::ascending(field)
    };

    let input = args
        .get_one::<PathBuf>("input")
        .context("missing input file")?;

    let mut browser = PortfolioBrowser::new(config, MemoryStore::new(), TracingNotifier);
    let loaded = browser
        .load_from(&JsonFileSource {
            path: input.clone(),
        })
        .with_context(|| format!("loading {}", input.display()))?;

    browser.set_criteria(criteria_from(args)?);
    browser.set_sort(sort);
    browser.change_page(bucket, args.get_one::<usize>("page").copied().unwrap_or(1));

    let with_metrics = args.get_flag("metrics");
    let rows: Vec<Row<'_>> = browser
        .get_page(bucket)
        .iter()
        .map(|property| Row {
            property,
            metrics: with_metrics.then(|| metrics::compute(property)),
        })
        .collect();

    let json = serde_json::to_string_pretty(&rows).context("serialising page")?;
    println!("{json}");

    let state = browser.page_state(bucket);
    eprintln!(
        "{bucket}: page {}/{}, {} shown, {} in bucket, {} matched of {loaded}",
        state.current_page,
        browser.total_pages(bucket),
        rows.len(),
        browser.bucket(bucket).len(),
        browser.matched_count(),
    );
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let matches = cli().get_matches();
    run(&matches)
}
