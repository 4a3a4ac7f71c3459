//! Request builder, response parser and transport driver for the vegetable API.
//!
//! # Design
//! `VegetableClient` holds only the endpoint URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that runs
//! client-side validation and produces an `HttpRequest`, and a `parse_*`
//! method that consumes an `HttpResponse`. The composed methods (`list`,
//! `create`, `update`, `delete`) run build, the injected `Transport`, and
//! parse in sequence, so one call is exactly one request.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, Failure};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{Created, Deleted, ListParams, NewVegetable, Updated, VegetableChanges, VegetablePage};

/// Stateless client for the vegetable inventory API.
#[derive(Debug, Clone)]
pub struct VegetableClient {
    endpoint: String,
}

impl VegetableClient {
    /// `endpoint` is the full URL of the vegetables resource, e.g.
    /// `http://localhost:3000/vegetables`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // -----------------------------------------------------------------------
    // Build
    // -----------------------------------------------------------------------

    pub fn build_list(&self, params: ListParams) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url_with_query(&format!("page={}&limit={}", params.page, params.limit)),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Fails with `ValidationError` unless `name` is non-empty and `price` is
    /// non-zero.
    pub fn build_create(&self, input: &NewVegetable) -> Result<HttpRequest, ApiError> {
        if input.name.is_empty() || !is_set(input.price) {
            return Err(rejected("name and price are required"));
        }
        json_request(HttpMethod::Post, self.endpoint.clone(), input)
    }

    /// Fails with `ValidationError` if `id` is missing, then if `changes`
    /// sets neither `price` nor `description`.
    pub fn build_update(
        &self,
        id: impl Into<Option<i64>>,
        changes: &VegetableChanges,
    ) -> Result<HttpRequest, ApiError> {
        let id = require_id(id.into())?;
        let has_price = changes.price.is_some_and(is_set);
        let has_description = changes.description.as_deref().is_some_and(|d| !d.is_empty());
        if !has_price && !has_description {
            return Err(rejected("at least one field required"));
        }
        json_request(HttpMethod::Put, self.url_with_query(&format!("id={id}")), changes)
    }

    pub fn build_delete(&self, id: impl Into<Option<i64>>) -> Result<HttpRequest, ApiError> {
        let id = require_id(id.into())?;
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            url: self.url_with_query(&format!("id={id}")),
            headers: Vec::new(),
            body: None,
        })
    }

    // -----------------------------------------------------------------------
    // Parse
    // -----------------------------------------------------------------------

    pub fn parse_list(&self, response: HttpResponse) -> Result<VegetablePage, ApiError> {
        decode(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Created, ApiError> {
        decode(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Updated, ApiError> {
        decode(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<Deleted, ApiError> {
        decode(response)
    }

    // -----------------------------------------------------------------------
    // Round-trip
    // -----------------------------------------------------------------------

    /// Fetch one page of records.
    pub fn list<T: Transport + ?Sized>(
        &self,
        transport: &T,
        params: ListParams,
    ) -> Result<VegetablePage, ApiError> {
        let response = send(transport, self.build_list(params))?;
        self.parse_list(response)
    }

    /// Create a record; the result carries the server-assigned id.
    pub fn create<T: Transport + ?Sized>(
        &self,
        transport: &T,
        input: &NewVegetable,
    ) -> Result<Created, ApiError> {
        let response = send(transport, self.build_create(input)?)?;
        self.parse_create(response)
    }

    /// Change the price and/or description of record `id`.
    pub fn update<T: Transport + ?Sized>(
        &self,
        transport: &T,
        id: impl Into<Option<i64>>,
        changes: &VegetableChanges,
    ) -> Result<Updated, ApiError> {
        let response = send(transport, self.build_update(id, changes)?)?;
        self.parse_update(response)
    }

    pub fn delete<T: Transport + ?Sized>(
        &self,
        transport: &T,
        id: impl Into<Option<i64>>,
    ) -> Result<Deleted, ApiError> {
        let response = send(transport, self.build_delete(id)?)?;
        self.parse_delete(response)
    }

    fn url_with_query(&self, query: &str) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!("{}{separator}{query}", self.endpoint)
    }
}

/// Truthiness of a numeric field: zero and NaN count as unset.
fn is_set(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

fn require_id(id: Option<i64>) -> Result<i64, ApiError> {
    match id {
        Some(id) if id != 0 => Ok(id),
        _ => Err(rejected("id is required")),
    }
}

fn rejected(message: &str) -> ApiError {
    log::warn!("[VEGETABLES] Rejected before sending: {message}");
    ApiError::validation(message)
}

fn json_request<B: Serialize>(method: HttpMethod, url: String, input: &B) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn send<T: Transport + ?Sized>(transport: &T, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let method = request.method;
    log::debug!("[VEGETABLES] {} {}", method, request.url);
    let response = transport.execute(request).map_err(|e| {
        log::warn!("[VEGETABLES] {method} failed in transport: {e}");
        ApiError::RequestFailed(Failure::Transport(e.to_string()))
    })?;
    log::debug!("[VEGETABLES] {} answered status={}", method, response.status);
    Ok(response)
}

/// Map non-2xx responses to `RequestFailed`, keeping the error body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let payload = serde_json::from_str(&response.body)
        .unwrap_or_else(|_| serde_json::Value::String(response.body.clone()));
    log::warn!("[VEGETABLES] Remote error status={}: {}", response.status, payload);
    Err(ApiError::RequestFailed(Failure::Remote {
        status: response.status,
        payload,
    }))
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
