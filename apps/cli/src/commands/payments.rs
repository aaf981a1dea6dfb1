//! # Payments Command
//!
//! Payment history of the signed-in user.

use std::io::Write;

use courier_core::Money;

use super::Context;
use crate::error::AppResult;

pub async fn run(ctx: &Context, json: bool, out: &mut impl Write) -> AppResult<()> {
    let payments = ctx.dashboard().my_payments().await?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &payments)?;
        writeln!(out)?;
        return Ok(());
    }
    if payments.is_empty() {
        writeln!(out, "No payments yet")?;
        return Ok(());
    }

    writeln!(out, "{:<20} {:<24} {:>10}  {}", "PAID AT", "TRACKING", "AMOUNT", "TRANSACTION")?;
    for payment in &payments {
        writeln!(
            out,
            "{:<20} {:<24} {:>10}  {}",
            payment.paid_at.format("%Y-%m-%d %H:%M"),
            payment.tracking_id.as_deref().unwrap_or(&payment.parcel_id),
            payment.amount().to_string(),
            payment.transaction_id
        )?;
    }
    let total: Money = payments.iter().map(|p| p.amount()).sum();
    writeln!(out, "\nTotal paid: {}", total)?;
    Ok(())
}
