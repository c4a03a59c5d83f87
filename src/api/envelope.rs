//! Response envelopes and their conversion into typed results.
//!
//! The admin API wraps most payloads as `{ "success": bool, "message": ..., "data": ... }`
//! but a few reads return the bare payload. [`decode`] accepts both and turns
//! every failure shape into [`DeviceDeskError::Server`], so no caller ever
//! inspects a raw body.

use crate::domain::error::{DeviceDeskError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Acknowledgement of a write call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ack {
    pub message: Option<String>,
}

/// List payloads arrive either as a bare array or wrapped in a named field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(
            alias = "users",
            alias = "applications",
            alias = "results",
            alias = "clients",
            alias = "operational_users"
        )]
        items: Vec<T>,
    },
}

impl<T> ListPayload<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { items } => items,
        }
    }
}

fn message_of(value: &Value) -> Option<String> {
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(ToString::to_string)
}

/// Decodes a response body into `T`.
///
/// # Errors
///
/// - [`DeviceDeskError::Server`] for a non-2xx status or `success: false`
/// - [`DeviceDeskError::Decode`] when the payload does not match `T`
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    let value: Value = if body.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) if (200..300).contains(&status) => return Err(e.into()),
            Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()),
        }
    };

    if !(200..300).contains(&status) {
        let message = message_of(&value)
            .or_else(|| value.as_str().filter(|s| !s.trim().is_empty()).map(ToString::to_string))
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        return Err(DeviceDeskError::Server { status, message });
    }

    match value.get("success").and_then(Value::as_bool) {
        Some(false) => Err(DeviceDeskError::Server {
            status,
            message: message_of(&value).unwrap_or_else(|| "The request was not successful".to_string()),
        }),
        Some(true) => {
            let data = value.get("data").cloned().unwrap_or(Value::Null);
            Ok(serde_json::from_value(data)?)
        }
        None => Ok(serde_json::from_value(value)?),
    }
}

/// Decodes the acknowledgement of a write call.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_ack(status: u16, body: &[u8]) -> Result<Ack> {
    // A 2xx with a non-JSON body still acknowledges the write.
    match decode::<Value>(status, body) {
        Ok(_) | Err(DeviceDeskError::Decode(_)) => {}
        Err(e) => return Err(e),
    }
    let raw: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    Ok(Ack {
        message: message_of(&raw),
    })
}

/// Decodes a list endpoint.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_list<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<Vec<T>> {
    decode::<ListPayload<T>>(status, body).map(ListPayload::into_vec)
}
