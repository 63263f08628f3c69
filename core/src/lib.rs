use serde::{Deserialize, Serialize, Serializer};

/// Body of `POST /api/v1/encrypt`. `validity` is in seconds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EncryptRequest {
    pub data: String,
    #[serde(serialize_with = "serialize_number")]
    pub validity: f64,
}

/// Writes whole numbers as JSON integers, so `3600.0` goes out as `3600`.
fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Body of `POST /api/v1/decrypt`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DecryptRequest {
    pub id: String,
    pub key: String,
}

/// A stored claw: its id, the key needed to open it and a human readable
/// validity window.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct EncryptResponse {
    pub id: String,
    pub key: String,
    pub valid_for: String,
}

impl EncryptResponse {
    /// The `<id>.<key>` token a recipient pastes into the decrypt form.
    pub fn share_token(&self) -> String {
        format!("{}.{}", self.id, self.key)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DecryptResponse {
    pub data: String,
}

/// The uniform failure shape. Every failed call surfaces as one of these,
/// whatever went wrong.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiEmpty {
    pub status: u16,
    pub message: String,
}

impl ApiEmpty {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}
