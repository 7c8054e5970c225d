//! Fetch command implementation.
//!
//! Splits the requested years into provider-sized sub-ranges, fetches them in
//! order and writes the merged table.

use crate::config::FileConfig;
use crate::display::{Format, Layout, normalize_series_ids, write_table};
use anyhow::{Context, Result, bail};
use chrono::Datelike;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::Confirm;
use laborstat_lib::prelude::*;
use laborstat_lib::{RequestPlan, with_moving_average};
use std::path::PathBuf;

/// Options for the fetch command.
#[derive(Debug)]
pub(crate) struct FetchArgs {
    pub(crate) series: Vec<String>,
    pub(crate) start: Option<i32>,
    pub(crate) end: Option<i32>,
    pub(crate) max_span: Option<u32>,
    pub(crate) api_key: Option<String>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) format: Option<Format>,
    pub(crate) wide: bool,
    pub(crate) moving_average: Option<usize>,
    pub(crate) yes: bool,
}

/// Resolves the year range: `end` defaults to the current year and `start`
/// to the widest range a single request of `span` years can cover.
fn resolve_range(
    start: Option<i32>,
    end: Option<i32>,
    span: u32,
    this_year: i32,
) -> Result<YearRange> {
    let end = end.unwrap_or(this_year);
    let start = start.unwrap_or_else(|| {
        let back = i32::try_from(span.saturating_sub(1)).unwrap_or(i32::MAX);
        end.saturating_sub(back)
    });
    YearRange::new(start, end).with_context(|| format!("Invalid year range {start}-{end}"))
}

/// Fetch series and write them to a file or stdout.
pub(crate) async fn fetch(args: FetchArgs, file_config: &FileConfig, quiet: bool) -> Result<()> {
    let series_ids = normalize_series_ids(&args.series);
    if series_ids.is_empty() {
        bail!("No series ids given");
    }

    let registry = SeriesRegistry::global();
    for id in &series_ids {
        if registry.get(id).is_none() {
            tracing::warn!(series = %id, "series not in the catalog, requesting anyway");
        }
    }

    let mut config = ClientConfig::default();
    if let Some(key) = file_config.api_key(args.api_key) {
        config = config.with_api_key(key);
    }
    if let Some(base_url) = &file_config.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(annual_average) = file_config.annual_average {
        config.annual_average = annual_average;
    }
    let tier = config.tier();

    let max_span = args
        .max_span
        .or(file_config.max_span)
        .unwrap_or_else(|| tier.max_years());
    if max_span > tier.max_years() {
        bail!(
            "--max-span {max_span} exceeds the {tier} limit of {} years per request",
            tier.max_years()
        );
    }

    let range = resolve_range(args.start, args.end, max_span, chrono::Local::now().year())?;
    let plan = RequestPlan::new(series_ids.len(), range, max_span, tier)?;
    tracing::info!(
        %range,
        %tier,
        sub_ranges = plan.sub_ranges.len(),
        requests = plan.requests,
        "request plan"
    );

    if plan.exceeds_daily_quota() && !args.yes {
        let proceed = Confirm::new(&format!(
            "This fetch needs {} requests but the {tier} tier allows {} per day. Continue?",
            plan.requests,
            tier.daily_requests()
        ))
        .with_default(false)
        .prompt()
        .context("Confirmation cancelled")?;
        if !proceed {
            return Ok(());
        }
    }

    let client = BlsClient::new(config).context("Failed to create HTTP client")?;

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(plan.sub_ranges.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ranges {msg}")
                .context("Invalid progress template")?
                .progress_chars("=>-"),
        );
        pb.set_message(format!("{} series, {range}", series_ids.len()));
        pb
    };

    let fetched = fetch_series_with_progress(
        &client,
        &series_ids,
        range.start,
        range.end,
        max_span,
        |batch| {
            progress.set_message(format!("{} rows from {}", batch.len(), batch.range));
            progress.inc(1);
        },
    )
    .await;
    let mut table = match fetched {
        Ok(table) => table,
        Err(e) => {
            progress.abandon_with_message("failed");
            return Err(e).context("Fetch aborted, no output written");
        }
    };
    progress.finish_with_message(format!("{} observations", table.len()));

    if let Some(window) = args.moving_average {
        table = with_moving_average(table, window)?;
    }

    let format = args
        .format
        .unwrap_or_else(|| Format::infer(args.output.as_deref()));
    let layout = if args.wide { Layout::Wide } else { Layout::Tidy };
    write_table(&table, args.output.as_deref(), format, layout)?;

    if !quiet && let Some(output) = &args.output {
        eprintln!("Output written to: {}", output.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_range_defaults() {
        let range = resolve_range(None, None, 20, 2024).unwrap();
        assert_eq!(range, YearRange::new(2005, 2024).unwrap());

        let range = resolve_range(None, Some(2000), 10, 2024).unwrap();
        assert_eq!(range, YearRange::new(1991, 2000).unwrap());
    }

    #[test]
    fn test_resolve_range_explicit() {
        let range = resolve_range(Some(1948), Some(2024), 20, 2024).unwrap();
        assert_eq!(range.span(), 77);
        assert!(resolve_range(Some(2024), Some(2020), 20, 2024).is_err());
    }
}
