//! The `resolve` command: ingest a sales CSV, geocode it, derive the
//! display set, and report stats.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;

use salemap_core::{
    aggregate, export_csv, magnitude_label, AppConfig, FilterState, Limit, SalesScale,
};
use salemap_geocode::{CoordinateCache, GeocodeClient, ResolveEvent, Resolver};

use crate::ingest::parse_sales_csv;

#[derive(Debug, clap::Args)]
pub(crate) struct ResolveArgs {
    /// CSV file of `pincode,sales[,lat,lon]` rows.
    #[arg(long)]
    pub input: PathBuf,
    /// Where to write the display-set export CSV.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Substring filter on the pincode.
    #[arg(long)]
    pub search: Option<String>,
    /// Inclusive lower sales bound.
    #[arg(long)]
    pub min_sales: Option<f64>,
    /// Inclusive upper sales bound.
    #[arg(long)]
    pub max_sales: Option<f64>,
    /// Row cap: a number, or "all". Anything unparseable means "all".
    #[arg(long)]
    pub limit: Option<String>,
}

/// Runs one resolution batch end to end.
///
/// Per-pincode resolution failures are tallied and reported, not propagated;
/// the only hard errors are unreadable input and unwritable output.
pub(crate) async fn run_resolve(config: &AppConfig, args: &ResolveArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let records = parse_sales_csv(&text);
    tracing::info!(records = records.len(), input = %args.input.display(), "ingested sales records");

    let cache = Arc::new(CoordinateCache::with_durable_path(&config.cache_path));
    let client = GeocodeClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        &config.geocode_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build geocode client: {e}"))?;
    let resolver = Resolver::new(
        client,
        cache,
        config.geocode_country.clone(),
        Duration::from_millis(config.lookup_delay_ms),
    );

    let token = resolver.begin_batch();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let progress_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ResolveEvent::Progress(p) => {
                    tracing::info!(
                        processed = p.processed,
                        total = p.total,
                        failures = p.failures,
                        "resolving"
                    );
                }
                ResolveEvent::Resolved(record) => {
                    tracing::debug!(pincode = %record.pincode, "resolved");
                }
                ResolveEvent::Completed(p) => {
                    if p.failures > 0 {
                        tracing::warn!(
                            failures = p.failures,
                            total = p.total,
                            "some pincodes could not be geocoded and were dropped"
                        );
                    }
                }
            }
        }
    });

    let resolved = resolver
        .resolve_batch(&records, &token, &tx)
        .await
        .context("resolution batch was superseded")?;
    drop(tx);
    progress_task.await.ok();

    let filter = FilterState {
        search_term: args.search.clone().unwrap_or_default(),
        min_sales: args.min_sales,
        max_sales: args.max_sales,
        limit: args.limit.as_deref().map_or(Limit::All, Limit::parse),
    };
    let agg = aggregate(&resolved, &filter);

    println!(
        "display set: {} of {} resolved records",
        agg.display_set.len(),
        resolved.len()
    );
    println!(
        "total {}  average {}  max {}",
        magnitude_label(agg.stats.total_sales, &config.currency_symbol),
        magnitude_label(agg.stats.average_sales, &config.currency_symbol),
        magnitude_label(agg.stats.max_sales, &config.currency_symbol),
    );
    for bucket in &agg.heat_buckets {
        println!("heat {:?}: {} points", bucket.id, bucket.points.len());
    }

    let min = agg
        .display_set
        .iter()
        .map(|r| r.sales)
        .fold(f64::INFINITY, f64::min);
    let scale = SalesScale::new(min, agg.stats.max_sales);
    for record in agg.display_set.iter().take(10) {
        println!(
            "  {}  {}  {}  r={:.1}",
            record.pincode,
            magnitude_label(record.sales, &config.currency_symbol),
            scale.color(record.sales).to_hex(),
            scale.radius(record.sales),
        );
    }

    if let Some(output) = &args.output {
        std::fs::write(output, export_csv(&agg.display_set))
            .with_context(|| format!("failed to write {}", output.display()))?;
        tracing::info!(output = %output.display(), rows = agg.display_set.len(), "wrote export CSV");
    }

    Ok(())
}
