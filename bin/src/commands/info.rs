//! Info command implementation.
//!
//! Shows catalog metadata for a series and what fetching its full history
//! would cost in requests.

use anyhow::{Context, Result};
use chrono::Datelike;
use laborstat_lib::prelude::*;
use laborstat_lib::RequestPlan;

/// Show catalog details for a series and the request plan for its history.
pub(crate) fn show_info(series_id: &str, api_key: Option<&str>) -> Result<()> {
    let registry = SeriesRegistry::global();
    let info = registry
        .get(series_id)
        .with_context(|| format!("Unknown series: {series_id}"))?;

    println!("Series:     {}", info.name());
    println!("ID:         {}", info.id());
    println!("Survey:     {}", info.survey());
    println!("Frequency:  {}", info.frequency());
    println!(
        "Seasonally adjusted: {}",
        if info.is_seasonally_adjusted() { "yes" } else { "no" }
    );
    println!("Data available from: {}", info.start_year());

    let this_year = chrono::Local::now().year();
    let Ok(range) = YearRange::new(info.start_year(), this_year) else {
        return Ok(());
    };

    println!("\nRequests for full history ({range}):");
    println!(
        "{:<12} {:>10} {:>10} {:>12}",
        "TIER", "YEARS/REQ", "REQUESTS", "DAILY QUOTA"
    );
    println!("{}", "-".repeat(48));

    let current = ApiTier::for_key(api_key);
    for tier in [ApiTier::Public, ApiTier::Registered] {
        let plan = RequestPlan::new(1, range, tier.max_years(), tier)?;
        let marker = if tier == current { " *" } else { "" };
        println!(
            "{:<12} {:>10} {:>10} {:>12}{marker}",
            tier.to_string(),
            tier.max_years(),
            plan.requests,
            tier.daily_requests()
        );
    }

    println!("\n* tier used with the current configuration");
    Ok(())
}
