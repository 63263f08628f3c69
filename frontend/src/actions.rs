//! Form actions: validate untrusted form fields, call the vault and normalize
//! every failure into an [`ApiEmpty`].

use claw_core::{ApiEmpty, DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse};
use serde::Deserialize;

use crate::api::VaultClient;

pub const INVALID_INFORMATION: &str = "Invalid information provided";
pub const INVALID_ID_KEY: &str = "Invalid ID.Key format";

const BAD_REQUEST: u16 = 400;

/// Raw fields of the encrypt form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EncryptForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub expiry: String,
}

impl EncryptForm {
    pub fn validate(self) -> Result<EncryptRequest, ApiEmpty> {
        let validity = self
            .expiry
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);

        if self.text.trim().is_empty() || validity == 0.0 {
            return Err(ApiEmpty::new(BAD_REQUEST, INVALID_INFORMATION));
        }

        Ok(EncryptRequest {
            data: self.text,
            validity,
        })
    }
}

/// Raw fields of the decrypt form. `id_key` is `<id>.<key>`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DecryptForm {
    #[serde(default)]
    pub id_key: String,
}

impl DecryptForm {
    /// Splits on every `.` and keeps only the first two tokens, so anything
    /// after a second `.` is dropped.
    pub fn validate(self) -> Result<DecryptRequest, ApiEmpty> {
        let tokens: Vec<&str> = self.id_key.split('.').collect();
        if tokens.len() < 2 {
            return Err(ApiEmpty::new(BAD_REQUEST, INVALID_ID_KEY));
        }

        Ok(DecryptRequest {
            id: tokens[0].to_owned(),
            key: tokens[1].to_owned(),
        })
    }
}

fn report(action: &str, err: &ApiEmpty) {
    if err.is_server_error() {
        log::error!("{action} failed with {}: {}", err.status, err.message);
    } else {
        log::warn!("{action} rejected with {}: {}", err.status, err.message);
    }
}

pub async fn encrypt_data(
    client: &VaultClient,
    form: EncryptForm,
) -> Result<EncryptResponse, ApiEmpty> {
    let request = form.validate().inspect_err(|e| report("encrypt", e))?;

    client
        .encrypt(&request.data, request.validity)
        .await
        .map_err(ApiEmpty::from)
        .inspect_err(|e| report("encrypt", e))
}

pub async fn decrypt_data(
    client: &VaultClient,
    form: DecryptForm,
) -> Result<DecryptResponse, ApiEmpty> {
    let request = form.validate().inspect_err(|e| report("decrypt", e))?;

    client
        .decrypt(&request.id, &request.key)
        .await
        .map_err(ApiEmpty::from)
        .inspect_err(|e| report("decrypt", e))
}
