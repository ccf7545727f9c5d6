//! Typed views over the open job payload.
//!
//! The `print_jobs.payload` column is a schema-less JSON object whose
//! meaning depends on the job's type and status. Handlers and workers never
//! index the map directly; they parse it into one of the types here, and
//! write results back as merge patches so unrelated keys survive.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which document(s) a generation job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    ShippingList,
    Guides,
    Both,
    /// Egress receipt for a single sale; requires a `venta_id`.
    Egreso,
}

impl DocKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocKind::ShippingList => "shipping_list",
            DocKind::Guides => "guides",
            DocKind::Both => "both",
            DocKind::Egreso => "egreso",
        }
    }
}

/// Error raised when a job payload is missing or malformed.
///
/// Fatal to the job it belongs to, never to the worker loop.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload.{0} is required")]
    MissingField(&'static str),

    #[error("payload.{field} is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

/// Parameters of a shipping-docs generation job, parsed from its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub what: DocKind,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venta_id: Option<String>,
}

impl GenerateRequest {
    /// Parse the mandatory `what` and `date` fields (and optional
    /// `venta_id`) from a job payload. `egreso` jobs must carry a
    /// `venta_id` naming the sale to print.
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let what_raw = payload
            .get("what")
            .and_then(Value::as_str)
            .ok_or(PayloadError::MissingField("what"))?;
        let what: DocKind = serde_json::from_value(Value::String(what_raw.to_owned()))
            .map_err(|_| PayloadError::InvalidField {
                field: "what",
                reason: format!("unknown document kind '{what_raw}'"),
            })?;

        let date_raw = payload
            .get("date")
            .and_then(Value::as_str)
            .ok_or(PayloadError::MissingField("date"))?;
        let date: NaiveDate = date_raw.parse().map_err(|_| PayloadError::InvalidField {
            field: "date",
            reason: format!("'{date_raw}' is not an ISO date"),
        })?;

        let venta_id = payload
            .get("venta_id")
            .and_then(Value::as_str)
            .map(str::to_owned);

        if what == DocKind::Egreso && venta_id.is_none() {
            return Err(PayloadError::MissingField("venta_id"));
        }

        Ok(Self {
            what,
            date,
            venta_id,
        })
    }

    /// Initial payload of a freshly enqueued generation job.
    pub fn to_payload(&self) -> Value {
        serde_json::to_value(self).expect("GenerateRequest serializes to a JSON object")
    }
}

/// Extract the ordered list of PDF paths to print from a payload.
///
/// Tolerant by design: a missing or non-array `files` yields an empty list,
/// entries are trimmed and blank ones dropped. Callers decide whether an
/// empty list is fatal.
pub fn files_from_payload(payload: &Value) -> Vec<String> {
    let Some(items) = payload.get("files").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}
