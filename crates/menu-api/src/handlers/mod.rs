//! HTTP handlers

pub mod account;
pub mod health;
pub mod menu;
pub mod navigation;
pub mod settings;

use axum::body::Bytes;
use serde_json::Value;

use crate::error::ApiError;

/// Bodies are parsed by hand so a bad payload still gets the failure
/// envelope.
pub(crate) fn parse_json(body: &Bytes) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedPayload(e.to_string()))
}
