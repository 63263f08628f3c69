//! Turns raw backend responses into either a typed value or an [`ApiEmpty`].

use claw_core::ApiEmpty;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod vault;

pub use vault::VaultClient;

/// Failure of a single backend call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend answered with something other than 200/201.
    #[error("{0}")]
    Api(ApiEmpty),

    /// No usable response: connection failure, or the body could not be read.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl From<ClientError> for ApiEmpty {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api(api) => api,
            ClientError::Transport(err) => {
                ApiEmpty::new(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), err.to_string())
            }
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn is_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

/// Same as [`map_response_with`] with the identity transform.
pub async fn map_response<T>(response: Response, default: T) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    map_response_with(response, default, |value| value).await
}

/// Decodes a 200/201 body as `T` and passes it through `transform`.
///
/// A success body that does not decode as `T` yields `default` instead of an
/// error. Any other status becomes [`ClientError::Api`] carrying that status
/// and either the `message` field of a JSON body or the raw body text.
pub async fn map_response_with<T, R, F>(
    response: Response,
    default: T,
    transform: F,
) -> Result<R, ClientError>
where
    T: DeserializeOwned,
    F: FnOnce(T) -> R,
{
    let status = response.status();

    if is_success(status) {
        let body = response.bytes().await?;
        let data = match serde_json::from_slice::<T>(&body) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Could not decode {} response, using default: {}", status, e);
                default
            }
        };
        return Ok(transform(data));
    }

    let text = response.text().await?;
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.message,
        Err(_) => text,
    };

    Err(ClientError::Api(ApiEmpty::new(status.as_u16(), message)))
}
