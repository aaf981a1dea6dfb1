//! Integration tests for the reqwest-backed parcel API.
//!
//! Uses wiremock to stand in for the parcel backend.

#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use courier_client::{AuthContext, ClientConfig, ClientError, HttpParcelApi, ParcelApi};
use courier_core::PaymentUpdate;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer, auth: AuthContext) -> HttpParcelApi {
    let mut config = ClientConfig::default();
    config.api.base_url = server.uri();
    config.api.timeout_secs = 5;
    HttpParcelApi::new(&config, auth).unwrap()
}

// =============================================================================
// PARCEL WRITES
// =============================================================================

#[tokio::test]
async fn test_create_parcel_returns_inserted_id() {
    let server = MockServer::start().await;
    let parcel = common::record("unused").parcel;

    Mock::given(method("POST"))
        .and(path("/parcels"))
        .and(body_partial_json(json!({
            "parcelType": "document",
            "costPoisha": 13_000,
            "paymentMethod": "cash",
            "paymentStatus": "pending-cash",
            "status": "pending",
            "trackingId": parcel.tracking_id.as_str(),
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"acknowledged": true, "insertedId": "665f1c"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, AuthContext::anonymous());
    let id = api.create_parcel(&parcel).await.unwrap();
    assert_eq!(id, "665f1c");
}

#[tokio::test]
async fn test_update_payment_patches_method_and_status() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/parcels/665f1c/payment"))
        .and(body_partial_json(json!({
            "paymentMethod": "cash",
            "paymentStatus": "pay-on-pickup",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"modifiedCount": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, AuthContext::anonymous());
    api.update_payment("665f1c", &PaymentUpdate::pay_on_pickup())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_parcel() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/parcels/665f1c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deletedCount": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, AuthContext::anonymous());
    api.delete_parcel("665f1c").await.unwrap();
}

// =============================================================================
// DASHBOARD READS
// =============================================================================

#[tokio::test]
async fn test_list_parcels_by_email() {
    let server = MockServer::start().await;
    let record = common::record("665f1c");
    let mut body = serde_json::to_value(&record).unwrap();
    // Stored documents come back with a Mongo-style `_id`
    let id = body.as_object_mut().unwrap().remove("id").unwrap();
    body["_id"] = id;

    Mock::given(method("GET"))
        .and(path("/parcels"))
        .and(query_param("email", "nadia@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([body])))
        .mount(&server)
        .await;

    let api = api_for(&server, AuthContext::anonymous());
    let parcels = api.list_parcels("nadia@example.com").await.unwrap();
    assert_eq!(parcels, vec![record]);
}

#[tokio::test]
async fn test_get_parcel_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/parcels/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "no such parcel"})))
        .mount(&server)
        .await;

    let api = api_for(&server, AuthContext::anonymous());
    let err = api.get_parcel("missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_payment_history() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .and(query_param("email", "nadia@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "pay-1",
            "parcelId": "665f1c",
            "trackingId": "TRK-LOYW3V28-0A1B",
            "amountPoisha": 13_000,
            "transactionId": "txn_123",
            "email": "nadia@example.com",
            "paidAt": "2026-10-19T09:20:00Z"
        }])))
        .mount(&server)
        .await;

    let api = api_for(&server, AuthContext::anonymous());
    let payments = api.payment_history("nadia@example.com").await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].id, "pay-1");
    assert_eq!(payments[0].amount().taka(), 130);
}

// =============================================================================
// ERRORS AND AUTH
// =============================================================================

#[tokio::test]
async fn test_server_error_is_retryable_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/parcels"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "database down"})))
        .mount(&server)
        .await;

    let api = api_for(&server, AuthContext::anonymous());
    let err = api
        .create_parcel(&common::record("x").parcel)
        .await
        .unwrap_err();
    match &err {
        ClientError::Status { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_create_without_id_is_unexpected_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/parcels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .mount(&server)
        .await;

    let api = api_for(&server, AuthContext::anonymous());
    let err = api
        .create_parcel(&common::record("x").parcel)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_signed_in_token_is_sent_as_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/parcels/p1"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthContext::signed_in(common::user(), Some("user-token".to_string()));
    let api = api_for(&server, auth);
    api.delete_parcel("p1").await.unwrap();
}
