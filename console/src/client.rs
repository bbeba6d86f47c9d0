use std::time::Instant;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use order_data::models::customer::{Customer, CustomerList};
use order_data::models::order::{Ack, CreateOrderRequest, CreatedOrder, Order, OrderList};
use order_data::models::product::{Product, ProductList};
use order_data::models::workflow::WorkflowExecution;

use crate::activity::{ActivityKind, ActivityLog};
use crate::config::config::ConfigError;

/// Failure messages in the activity feed are cut down to this length.
const ACTIVITY_MESSAGE_LIMIT: usize = 50;
/// Raw (non-JSON) error bodies are cut down to this length for display.
const ERROR_BODY_LIMIT: usize = 100;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Endpoint or key missing; raised before any request is built.
    #[error("{0}")]
    Configuration(#[from] ConfigError),

    /// Transport-level failure: unreachable host, refused connection,
    /// TLS trouble. The request may never have left this machine.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The server answered 2xx but the body was not usable JSON, or a
    /// typed response did not match its schema.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The short operator-facing wording, as opposed to the full
    /// diagnostic carried by `Display`.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Configuration(e) => format!("{e}. Update settings first."),
            ApiError::Network(_) => {
                "Network error. Check the API endpoint and CORS settings.".to_string()
            }
            ApiError::Http { status: 403, .. } => "Access denied. Check your API key.".to_string(),
            ApiError::Http { .. } => self.to_string(),
            ApiError::Decode(_) => "Invalid response from the server.".to_string(),
        }
    }
}

/// Immutable connection parameters, produced by settings validation.
/// Changing settings means building a new value and a new client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: String,
}

/// Thin wrapper over the management API: header injection, timing,
/// error normalization and activity logging around every call. One
/// attempt per call; retrying is the operator's decision.
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    activity: ActivityLog,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            activity: ActivityLog::new(),
        }
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    fn url(&self, path: &str) -> String {
        let base = self
            .config
            .endpoint
            .strip_suffix('/')
            .unwrap_or(&self.config.endpoint);
        format!("{base}{path}")
    }

    /// Issue one request and normalize the outcome. Every call lands in
    /// the activity feed, and the round-trip time of any answered
    /// request (2xx or not) updates the last-response-time display.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "API request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.config.api_key)
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let outcome = match request.send().await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(text) => {
                        self.activity.set_response_time(started.elapsed());
                        interpret_response(status, &text)
                    }
                    Err(e) => Err(ApiError::Network(e)),
                }
            }
            Err(e) => Err(ApiError::Network(e)),
        };
        let elapsed_ms = started.elapsed().as_millis();

        match &outcome {
            Ok(_) => {
                tracing::info!(method = %method, path, elapsed_ms, "API call succeeded");
                self.activity.record(
                    ActivityKind::Success,
                    format!("API {method} {path} - Success ({elapsed_ms}ms)"),
                );
            }
            Err(e) => {
                tracing::error!(method = %method, path, error = %e, "API call failed");
                self.activity.record(
                    ActivityKind::Error,
                    format!(
                        "API {method} {path} - Failed: {}",
                        truncate(&e.to_string(), ACTIVITY_MESSAGE_LIMIT)
                    ),
                );
            }
        }

        outcome
    }

    pub async fn list_orders(&self, page: u32, limit: u32) -> Result<OrderList, ApiError> {
        let page = page.max(1);
        let value = self
            .call(Method::GET, &format!("/orders?page={page}&limit={limit}"), None)
            .await?;
        decode(value)
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Order, ApiError> {
        let value = self
            .call(Method::GET, &format!("/orders/{order_id}"), None)
            .await?;
        decode(value)
    }

    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreatedOrder, ApiError> {
        let body =
            serde_json::to_value(request).expect("CreateOrderRequest is always serialisable");
        let value = self.call(Method::POST, "/orders", Some(&body)).await?;
        decode(value)
    }

    pub async fn update_order_status(&self, order_id: &str, status: &str) -> Result<Ack, ApiError> {
        let body = serde_json::json!({ "status": status });
        let value = self
            .call(Method::PUT, &format!("/orders/{order_id}"), Some(&body))
            .await?;
        decode(value)
    }

    pub async fn delete_order(&self, order_id: &str) -> Result<Ack, ApiError> {
        let value = self
            .call(Method::DELETE, &format!("/orders/{order_id}"), None)
            .await?;
        decode(value)
    }

    pub async fn customers(&self) -> Result<Vec<Customer>, ApiError> {
        let value = self.call(Method::GET, "/customers", None).await?;
        decode::<CustomerList>(value).map(|list| list.customers)
    }

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let value = self.call(Method::GET, "/products", None).await?;
        decode::<ProductList>(value).map(|list| list.products)
    }

    /// `execution_ref` is either a workflow execution ARN or an order
    /// id; the server resolves both.
    pub async fn workflow_status(&self, execution_ref: &str) -> Result<WorkflowExecution, ApiError> {
        let value = self
            .call(Method::GET, &format!("/status/{execution_ref}"), None)
            .await?;
        decode(value)
    }
}

/// Map a received HTTP response onto the error taxonomy. Pure, so the
/// whole classification is testable without a server.
pub(crate) fn interpret_response(status: StatusCode, body: &str) -> Result<Value, ApiError> {
    if !status.is_success() {
        return Err(ApiError::Http {
            status: status.as_u16(),
            message: extract_error_message(status, body),
        });
    }
    if body.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(body).map_err(|_| {
        ApiError::Decode(format!(
            "invalid JSON response: {}",
            truncate(body, ERROR_BODY_LIMIT)
        ))
    })
}

/// Best-effort extraction of a human-readable message from an error
/// body: prefer the JSON `message` field (with `error` as detail), then
/// a bare `error` field, then the raw text, then the status line.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return match value.get("error").and_then(Value::as_str) {
                Some(detail) => format!("{message} (Details: {detail})"),
                None => message.to_string(),
            };
        }
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        format!("HTTP error! status: {}", status.as_u16())
    } else {
        truncate(body, ERROR_BODY_LIMIT)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_path_to_error::deserialize(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    }
}
