//! # Quote Command
//!
//! Prices a parcel without touching the network.
//!
//! ```text
//! $ courier quote --type document --weight 2 --to Dhaka
//!   Base charge          ৳50.00
//!   Weight (2 kg)        ৳20.00
//!   Delivery             ৳60.00   inside Dhaka metro
//!   Insurance            ৳0.00
//!   ─────────────────────────────
//!   Total                ৳130.00
//! ```

use std::io::Write;

use clap::Args;
use courier_core::pricing::quote;
use courier_core::validation::{validate_district, validate_weight};
use courier_core::{ParcelType, PriceBreakdown, Weight};

use crate::error::AppResult;

/// Arguments for `courier quote`.
#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    /// document or non-document
    #[arg(short = 't', long = "type", default_value = "document")]
    pub parcel_type: ParcelType,

    /// Weight in kilograms (0.1 - 50)
    #[arg(short, long)]
    pub weight: String,

    /// Receiver district
    #[arg(long = "to")]
    pub district: Option<String>,

    /// Add parcel insurance
    #[arg(long)]
    pub insurance: bool,
}

pub fn run(args: &QuoteArgs, json: bool, out: &mut impl Write) -> AppResult<()> {
    let weight = validate_weight(&args.weight)?;
    let district = match &args.district {
        Some(name) => Some(validate_district("receiver district", name)?.name),
        None => None,
    };
    let breakdown = quote(Some(args.parcel_type), Some(weight), district, args.insurance);

    if json {
        serde_json::to_writer_pretty(&mut *out, &breakdown)?;
        writeln!(out)?;
    } else {
        print_breakdown(out, &breakdown, weight)?;
    }
    Ok(())
}

/// Writes an itemised price table.
pub fn print_breakdown(
    out: &mut impl Write,
    breakdown: &PriceBreakdown,
    weight: Weight,
) -> std::io::Result<()> {
    writeln!(out, "  {:<20} {}", "Base charge", breakdown.base)?;
    writeln!(out, "  {:<20} {}", format!("Weight ({})", weight), breakdown.weight_cost)?;
    match breakdown.zone {
        Some(zone) => writeln!(
            out,
            "  {:<20} {:<9} {}",
            "Delivery", breakdown.delivery_charge.to_string(), zone
        )?,
        None => writeln!(out, "  {:<20} {:<9} no district selected", "Delivery", breakdown.delivery_charge.to_string())?,
    }
    writeln!(out, "  {:<20} {}", "Insurance", breakdown.insurance)?;
    writeln!(out, "  {}", "─".repeat(29))?;
    writeln!(out, "  {:<20} {}", "Total", breakdown.total)
}
