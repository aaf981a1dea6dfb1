//! # Parcel API
//!
//! Typed access to the remote REST API that stores parcels, payments and
//! rider applications.
//!
//! ## Endpoints
//! ```text
//! ┌────────┬──────────────────────────┬──────────────────────────────────────┐
//! │ Method │ Path                     │ Used by                              │
//! ├────────┼──────────────────────────┼──────────────────────────────────────┤
//! │ POST   │ /parcels                 │ submit                               │
//! │ PATCH  │ /parcels/:id/payment     │ resolve(PayOnPickup)                 │
//! │ DELETE │ /parcels/:id             │ resolve(Abandon)                     │
//! │ GET    │ /parcels?email=          │ dashboard: my parcels                │
//! │ GET    │ /parcels/:id             │ dashboard: parcel detail             │
//! │ GET    │ /payments?email=         │ dashboard: payment history           │
//! │ POST   │ /riders                  │ rider application                    │
//! └────────┴──────────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! The orchestrator only sees the [`ParcelApi`] trait, so tests can swap the
//! HTTP implementation for an in-memory one.

use async_trait::async_trait;
use courier_core::rider::RiderSubmission;
use courier_core::{ParcelRecord, ParcelRequest, PaymentRecord, PaymentUpdate};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::auth::AuthContext;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Trait
// =============================================================================

/// Operations the client needs from the parcel backend.
#[async_trait]
pub trait ParcelApi: Send + Sync {
    /// Stores a new parcel and returns its id.
    async fn create_parcel(&self, parcel: &ParcelRequest) -> ClientResult<String>;

    /// Changes payment method and status of a stored parcel.
    async fn update_payment(&self, parcel_id: &str, update: &PaymentUpdate) -> ClientResult<()>;

    /// Removes a stored parcel.
    async fn delete_parcel(&self, parcel_id: &str) -> ClientResult<()>;

    /// Parcels submitted by `email`.
    async fn list_parcels(&self, email: &str) -> ClientResult<Vec<ParcelRecord>>;

    async fn get_parcel(&self, parcel_id: &str) -> ClientResult<ParcelRecord>;

    /// Settled payments made by `email`.
    async fn payment_history(&self, email: &str) -> ClientResult<Vec<PaymentRecord>>;

    /// Stores a rider application and returns its id.
    async fn submit_rider_application(&self, application: &RiderSubmission) -> ClientResult<String>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// [`ParcelApi`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpParcelApi {
    base_url: Url,
    client: reqwest::Client,
    auth: AuthContext,
}

impl HttpParcelApi {
    /// Builds a client from configuration.
    ///
    /// A static `access_token` from the config is sent as a default
    /// `Authorization: Bearer` header; a signed-in user's token in `auth`
    /// replaces it per request.
    pub fn new(config: &ClientConfig, auth: AuthContext) -> ClientResult<Self> {
        config.validate()?;
        let base_url = Url::parse(config.base_url())?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api.access_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                ClientError::InvalidConfig(format!("Invalid access token header: {}", e))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url,
            client,
            auth,
        })
    }

    /// Base URL plus escaped path segments.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = self.authorize(request).send().await.map_err(|e| {
            error!(error = %e, "Parcel API request failed");
            ClientError::from(e)
        })?;
        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let body = self.send(request).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ParcelApi for HttpParcelApi {
    async fn create_parcel(&self, parcel: &ParcelRequest) -> ClientResult<String> {
        let url = self.endpoint(&["parcels"])?;
        debug!(%url, tracking_id = %parcel.tracking_id, "POST parcel");
        let body: Value = self.get_json(self.client.post(url).json(parcel)).await?;
        created_id(&body)
    }

    async fn update_payment(&self, parcel_id: &str, update: &PaymentUpdate) -> ClientResult<()> {
        let url = self.endpoint(&["parcels", parcel_id, "payment"])?;
        debug!(%url, ?update, "PATCH parcel payment");
        self.send(self.client.patch(url).json(update)).await?;
        Ok(())
    }

    async fn delete_parcel(&self, parcel_id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["parcels", parcel_id])?;
        debug!(%url, "DELETE parcel");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn list_parcels(&self, email: &str) -> ClientResult<Vec<ParcelRecord>> {
        let url = self.endpoint(&["parcels"])?;
        self.get_json(self.client.get(url).query(&[("email", email)]))
            .await
    }

    async fn get_parcel(&self, parcel_id: &str) -> ClientResult<ParcelRecord> {
        let url = self.endpoint(&["parcels", parcel_id])?;
        match self.get_json(self.client.get(url)).await {
            Err(ClientError::Status { status: 404, .. }) => {
                Err(ClientError::NotFound(format!("parcel {}", parcel_id)))
            }
            other => other,
        }
    }

    async fn payment_history(&self, email: &str) -> ClientResult<Vec<PaymentRecord>> {
        let url = self.endpoint(&["payments"])?;
        self.get_json(self.client.get(url).query(&[("email", email)]))
            .await
    }

    async fn submit_rider_application(&self, application: &RiderSubmission) -> ClientResult<String> {
        let url = self.endpoint(&["riders"])?;
        debug!(%url, "POST rider application");
        let body: Value = self.get_json(self.client.post(url).json(application)).await?;
        created_id(&body)
    }
}

// =============================================================================
// Response Helpers
// =============================================================================

/// Turns a non-2xx response into [`ClientError::Status`].
async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    error!(status = status.as_u16(), %message, "Parcel API returned an error");
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Best-effort message from an error body: `message`, then `error`, then text.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = json.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

/// Extracts the new record id from a create response.
///
/// Accepts `insertedId`, `id` or `_id`, as a string or a number.
fn created_id(body: &Value) -> ClientResult<String> {
    ["insertedId", "id", "_id"]
        .iter()
        .find_map(|key| match body.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .ok_or_else(|| ClientError::UnexpectedResponse(format!("no id in create response: {}", body)))
}
