//! # Dashboard Queries
//!
//! Read-only views for the signed-in user: their parcels and payment history.

use std::sync::Arc;

use courier_core::{Money, ParcelRecord, ParcelStatus, PaymentRecord};
use tracing::debug;

use crate::api::ParcelApi;
use crate::auth::AuthContext;
use crate::error::{ClientError, ClientResult};

/// Per-user parcel and payment lookups.
#[derive(Clone)]
pub struct Dashboard {
    api: Arc<dyn ParcelApi>,
    auth: AuthContext,
}

impl Dashboard {
    pub fn new(api: Arc<dyn ParcelApi>, auth: AuthContext) -> Self {
        Self { api, auth }
    }

    /// Parcels submitted by the signed-in user, newest first.
    pub async fn my_parcels(&self) -> ClientResult<Vec<ParcelRecord>> {
        let email = self.email()?;
        debug!(%email, "Loading parcels");
        let mut parcels = self.api.list_parcels(&email).await?;
        parcels.sort_by(|a, b| b.parcel.created_at.cmp(&a.parcel.created_at));
        Ok(parcels)
    }

    pub async fn parcel(&self, parcel_id: &str) -> ClientResult<ParcelRecord> {
        self.api.get_parcel(parcel_id).await
    }

    /// Settled payments of the signed-in user, newest first.
    pub async fn my_payments(&self) -> ClientResult<Vec<PaymentRecord>> {
        let email = self.email()?;
        debug!(%email, "Loading payment history");
        let mut payments = self.api.payment_history(&email).await?;
        payments.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        Ok(payments)
    }

    fn email(&self) -> ClientResult<String> {
        self.auth
            .current_user()
            .map(|user| user.email)
            .ok_or(ClientError::NotSignedIn)
    }
}

/// Counts and totals shown above the parcel table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParcelSummary {
    pub total: usize,
    pub pending: usize,
    pub in_transit: usize,
    pub delivered: usize,
    pub cancelled: usize,
    /// Sum of costs of all parcels that were not cancelled.
    pub spent: Money,
}

impl ParcelSummary {
    pub fn of(parcels: &[ParcelRecord]) -> Self {
        parcels.iter().fold(Self::default(), |mut s, record| {
            s.total += 1;
            match record.parcel.status {
                ParcelStatus::Pending => s.pending += 1,
                ParcelStatus::RiderAssigned | ParcelStatus::InTransit => s.in_transit += 1,
                ParcelStatus::Delivered => s.delivered += 1,
                ParcelStatus::Cancelled => s.cancelled += 1,
            }
            if record.parcel.status != ParcelStatus::Cancelled {
                s.spent = s.spent + record.parcel.cost();
            }
            s
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{ParcelRequest, ParcelType, PaymentMethod, PaymentStatus, Submitter, TimeSlot, TrackingId};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(id: &str, status: ParcelStatus, cost: i64) -> ParcelRecord {
        let contact = courier_core::Contact {
            name: "Rahim Uddin".into(),
            phone: "01712345678".into(),
            email: "rahim@example.com".into(),
            address: "House 12, Road 5, Dhanmondi".into(),
            region: courier_core::coverage::Region::Dhaka,
            district: "Dhaka".into(),
            location: "Dhanmondi".into(),
            instructions: None,
        };
        ParcelRecord {
            id: id.to_string(),
            parcel: ParcelRequest {
                parcel_type: ParcelType::Document,
                parcel_name: "Contract".into(),
                weight: courier_core::Weight::from_grams(1_000),
                sender: contact.clone(),
                receiver: contact,
                pickup_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                time_slot: TimeSlot::Morning,
                insurance: false,
                payment_method: PaymentMethod::Cash,
                payment_status: PaymentStatus::PendingCash,
                status,
                cost_poisha: cost,
                tracking_id: TrackingId::from_string("TRK-1-AAAA"),
                created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
                created_by: Submitter::anonymous(),
            },
        }
    }

    #[test]
    fn test_summary_counts_and_spend() {
        let parcels = vec![
            record("a", ParcelStatus::Pending, 13_000),
            record("b", ParcelStatus::InTransit, 30_000),
            record("c", ParcelStatus::Cancelled, 5_000),
            record("d", ParcelStatus::Delivered, 7_000),
        ];
        let summary = ParcelSummary::of(&parcels);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.in_transit, 1);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.cancelled, 1);
        assert_eq!(summary.spent, Money::from_poisha(50_000));
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(ParcelSummary::of(&[]), ParcelSummary::default());
    }
}
