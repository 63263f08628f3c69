//! Client side of the claw vault: the backend HTTP client and the form
//! actions that sit in front of it.

pub mod actions;
pub mod api;

pub use actions::{decrypt_data, encrypt_data, DecryptForm, EncryptForm};
pub use api::{ClientError, VaultClient};
