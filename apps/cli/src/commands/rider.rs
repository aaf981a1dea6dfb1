//! # Rider Command
//!
//! Submits an application to ride for the service.

use std::io::Write;

use clap::Args;
use courier_core::rider::RiderApplication;

use super::Context;
use crate::error::{AppError, AppResult};

/// Arguments for `courier rider apply`.
#[derive(Debug, Clone, Args)]
pub struct RiderArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Contact email (defaults to the signed-in user)
    #[arg(long)]
    pub email: Option<String>,

    /// Mobile number, 01XXXXXXXXX
    #[arg(long)]
    pub phone: String,

    /// Age in years (18 - 60)
    #[arg(long)]
    pub age: u8,

    /// Region to ride in
    #[arg(long)]
    pub region: String,

    /// District within the region
    #[arg(long)]
    pub district: String,

    /// National ID number (10, 13 or 17 digits)
    #[arg(long = "nid")]
    pub national_id: String,

    /// Bike brand
    #[arg(long)]
    pub bike_brand: String,

    /// Bike registration number
    #[arg(long)]
    pub bike_registration: String,

    /// Anything else we should know
    #[arg(long)]
    pub note: Option<String>,
}

impl RiderArgs {
    fn into_application(self, fallback_email: Option<String>) -> AppResult<RiderApplication> {
        let email = self
            .email
            .or(fallback_email)
            .ok_or_else(|| AppError::validation("email is required: pass --email or --user"))?;
        Ok(RiderApplication {
            name: self.name,
            email,
            phone: self.phone,
            age: self.age,
            region: self.region,
            district: self.district,
            national_id: self.national_id,
            bike_brand: self.bike_brand,
            bike_registration: self.bike_registration,
            note: self.note.filter(|n| !n.trim().is_empty()),
        })
    }
}

pub async fn run(ctx: &Context, args: RiderArgs, out: &mut impl Write) -> AppResult<()> {
    let fallback = ctx.auth.current_user().map(|u| u.email);
    let application = args.into_application(fallback)?;
    let id = ctx.orchestrator().submit_rider_application(application).await?;
    writeln!(out, "Application {} received. We will contact you after review.", id)?;
    Ok(())
}
