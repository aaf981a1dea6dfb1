//! Shared fixtures for the client integration tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use courier_core::wizard::finalize_draft;
use courier_core::{
    ContactDraft, ParcelDraft, ParcelRecord, ParcelType, PaymentMethod, Submitter, TimeSlot,
    UserIdentity,
};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn now() -> DateTime<Utc> {
    today().and_hms_opt(9, 15, 0).unwrap().and_utc()
}

pub fn user() -> UserIdentity {
    UserIdentity {
        uid: "uid-7".to_string(),
        email: "nadia@example.com".to_string(),
        display_name: Some("Nadia Karim".to_string()),
    }
}

/// A draft that passes every step; document, 2 kg, to Dhaka.
pub fn complete_draft(payment_method: Option<PaymentMethod>) -> ParcelDraft {
    ParcelDraft {
        parcel_type: Some(ParcelType::Document),
        parcel_name: "Contract papers".to_string(),
        weight: "2".to_string(),
        sender: ContactDraft {
            name: "Rahim Uddin".to_string(),
            phone: "01712345678".to_string(),
            email: "rahim@example.com".to_string(),
            address: "House 12, Road 5, Dhanmondi".to_string(),
            district: "Gazipur".to_string(),
            location: "Tongi".to_string(),
            instructions: String::new(),
        },
        receiver: ContactDraft {
            name: "Karim Ahmed".to_string(),
            phone: "01898765432".to_string(),
            email: "karim@example.com".to_string(),
            address: "Flat 3B, Lake Circus, Kalabagan".to_string(),
            district: "Dhaka".to_string(),
            location: "Kalabagan".to_string(),
            instructions: "Call before arrival".to_string(),
        },
        pickup_date: Some(today()),
        time_slot: Some(TimeSlot::Morning),
        insurance: false,
        payment_method,
    }
}

pub fn record(id: &str) -> ParcelRecord {
    let parcel = finalize_draft(&complete_draft(None), today(), now(), Submitter::from(Some(&user())))
        .unwrap();
    ParcelRecord {
        id: id.to_string(),
        parcel,
    }
}
