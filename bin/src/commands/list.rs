//! List command implementation.
//!
//! Lists catalogued series with an optional survey filter or search pattern.

use crate::display::parse_survey;
use anyhow::Result;
use laborstat_lib::prelude::*;

/// List catalogued series with optional survey filter or search pattern.
pub(crate) fn list_series(survey: Option<&str>, search: Option<&str>) -> Result<()> {
    let registry = SeriesRegistry::global();

    let mut series: Vec<_> = match (survey, search) {
        (Some(survey), _) => {
            let survey = parse_survey(survey)?;
            registry.by_survey(survey).collect()
        }
        (_, Some(pattern)) => registry.search(pattern),
        (None, None) => registry.all().collect(),
    };
    series.sort_by(|a, b| a.id().cmp(b.id()));

    if series.is_empty() {
        println!("No series found.");
        return Ok(());
    }

    println!("{:<22} {:<13} {:<10} {:>5}  NAME", "ID", "SURVEY", "FREQ", "FROM");
    println!("{}", "-".repeat(90));

    for info in &series {
        println!(
            "{:<22} {:<13} {:<10} {:>5}  {}",
            info.id(),
            info.survey(),
            info.frequency(),
            info.start_year(),
            info.name()
        );
    }

    println!("\nTotal: {} series", series.len());
    Ok(())
}
