//! # Coverage Command
//!
//! Lists served regions and districts with their delivery zone.

use std::io::Write;

use clap::Args;
use courier_core::coverage::{districts_in, regions, search_coverage, District, Region};
use courier_core::zones::zone_for;

use crate::error::AppResult;

/// Arguments for `courier coverage`.
#[derive(Debug, Clone, Args)]
pub struct CoverageArgs {
    /// Only districts in this region
    #[arg(short, long)]
    pub region: Option<Region>,

    /// Case-insensitive search over district and region names
    pub query: Option<String>,
}

pub fn run(args: &CoverageArgs, json: bool, out: &mut impl Write) -> AppResult<()> {
    let districts: Vec<&District> = match (&args.region, &args.query) {
        (Some(region), query) => {
            let needle = query.as_deref().unwrap_or("").trim().to_lowercase();
            districts_in(*region)
                .filter(|d| d.name.to_lowercase().contains(&needle))
                .collect()
        }
        (None, Some(query)) => search_coverage(query).collect(),
        (None, None) => regions().iter().flat_map(|r| districts_in(*r)).collect(),
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &districts)?;
        writeln!(out)?;
        return Ok(());
    }

    if districts.is_empty() {
        writeln!(out, "No served district matches")?;
        return Ok(());
    }

    let mut current = None;
    for district in &districts {
        if current != Some(district.region) {
            writeln!(out, "{}", district.region)?;
            current = Some(district.region);
        }
        let zone = zone_for(Some(district.name))
            .map(|z| format!("{} ({})", z, z.charge()))
            .unwrap_or_default();
        writeln!(out, "  {:<16} {}", district.name, zone)?;
    }
    writeln!(out, "{} district(s)", districts.len())?;
    Ok(())
}
