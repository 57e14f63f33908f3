use serde::{Deserialize, Serialize};

/// Uniform JSON wrapper returned by every endpoint:
/// `{success, data?, message?, count?, planta_id?}`.
///
/// List responses carry `count`; the by-plant listing additionally echoes
/// the requested `planta_id`. Failures carry only `success: false` and a
/// `message`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planta_id: Option<i64>,
}

impl<T> Envelope<T> {
    /// Successful single-record response.
    pub fn record(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            count: None,
            planta_id: None,
        }
    }

    /// Successful single-record response with a human-readable message.
    pub fn record_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::record(data)
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Successful list response with its element count.
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            success: true,
            data: Some(items),
            message: None,
            count: Some(count),
            planta_id: None,
        }
    }

    /// List response scoped to one plant, echoing the requested id.
    pub fn list_for_plant(items: Vec<T>, planta_id: i64) -> Self {
        Self {
            planta_id: Some(planta_id),
            ..Self::list(items)
        }
    }
}

impl Envelope<()> {
    /// Successful response with no payload, e.g. after a delete.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            count: None,
            planta_id: None,
        }
    }

    /// Failure envelope; status code is chosen by the caller.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            count: None,
            planta_id: None,
        }
    }
}
