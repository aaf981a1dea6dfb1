//! # Parcels Command
//!
//! The signed-in user's parcels, or one parcel by id.

use std::io::Write;

use clap::Args;
use courier_client::ParcelSummary;
use courier_core::ParcelRecord;

use super::Context;
use crate::error::AppResult;

/// Arguments for `courier parcels`.
#[derive(Debug, Clone, Args)]
pub struct ParcelsArgs {
    /// Show a single parcel instead of the list
    pub id: Option<String>,
}

pub async fn run(ctx: &Context, args: &ParcelsArgs, json: bool, out: &mut impl Write) -> AppResult<()> {
    let dashboard = ctx.dashboard();

    if let Some(id) = &args.id {
        let record = dashboard.parcel(id).await?;
        if json {
            serde_json::to_writer_pretty(&mut *out, &record)?;
            writeln!(out)?;
        } else {
            print_detail(out, &record)?;
        }
        return Ok(());
    }

    let parcels = dashboard.my_parcels().await?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &parcels)?;
        writeln!(out)?;
        return Ok(());
    }
    print_table(out, &parcels)?;
    Ok(())
}

fn print_table(out: &mut impl Write, parcels: &[ParcelRecord]) -> std::io::Result<()> {
    if parcels.is_empty() {
        return writeln!(out, "No parcels yet");
    }
    writeln!(
        out,
        "{:<24} {:<12} {:<14} {:>10}  {:<14} {}",
        "TRACKING", "PICKUP", "TO", "COST", "PAYMENT", "STATUS"
    )?;
    for record in parcels {
        let p = &record.parcel;
        writeln!(
            out,
            "{:<24} {:<12} {:<14} {:>10}  {:<14} {}",
            p.tracking_id.as_str(),
            p.pickup_date.to_string(),
            p.receiver.district,
            p.cost().to_string(),
            p.payment_method.to_string(),
            p.status
        )?;
    }

    let summary = ParcelSummary::of(parcels);
    writeln!(
        out,
        "\n{} parcel(s): {} pending, {} in transit, {} delivered, {} cancelled; spent {}",
        summary.total,
        summary.pending,
        summary.in_transit,
        summary.delivered,
        summary.cancelled,
        summary.spent
    )
}

fn print_detail(out: &mut impl Write, record: &ParcelRecord) -> std::io::Result<()> {
    let p = &record.parcel;
    writeln!(out, "Parcel {} ({})", record.id, p.tracking_id)?;
    writeln!(out, "  {} - {} ({})", p.parcel_type, p.parcel_name, p.weight)?;
    writeln!(out, "  From: {} {}, {} ({})", p.sender.name, p.sender.phone, p.sender.location, p.sender.district)?;
    writeln!(out, "  To:   {} {}, {} ({})", p.receiver.name, p.receiver.phone, p.receiver.location, p.receiver.district)?;
    writeln!(out, "  Pickup {} {}", p.pickup_date, p.time_slot)?;
    writeln!(out, "  Cost {}{}", p.cost(), if p.insurance { " incl. insurance" } else { "" })?;
    writeln!(out, "  Payment {} / {}", p.payment_method, p.payment_status)?;
    writeln!(out, "  Status {}", p.status)
}
