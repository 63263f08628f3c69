//! HTTP client for the vault backend.

use claw_core::{ApiEmpty, DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse};

use super::{json_headers, map_response, ClientError};

/// Percent-encode a single URL path component.
fn percent_encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        let safe = b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~');
        if safe {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Vault backend client. Holds no per-call state; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    base_url: String,
}

impl VaultClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.base_url)
    }

    /// Store `data` for `validity` seconds.
    pub async fn encrypt(&self, data: &str, validity: f64) -> Result<EncryptResponse, ClientError> {
        let url = self.url("encrypt");
        log::debug!("POST {url}");

        let body = EncryptRequest {
            data: data.to_owned(),
            validity,
        };
        let res = self
            .http
            .post(&url)
            .headers(json_headers())
            .json(&body)
            .send()
            .await?;

        map_response(res, EncryptResponse::default()).await
    }

    pub async fn decrypt(&self, id: &str, key: &str) -> Result<DecryptResponse, ClientError> {
        let url = self.url("decrypt");
        log::debug!("POST {url}");

        let body = DecryptRequest {
            id: id.to_owned(),
            key: key.to_owned(),
        };
        let res = self
            .http
            .post(&url)
            .headers(json_headers())
            .json(&body)
            .send()
            .await?;

        map_response(res, DecryptResponse::default()).await
    }

    /// Ask whether a claw with `id` is still stored.
    ///
    /// Empty, `.` and `..` ids are refused without a request: URL parsing
    /// would collapse them (even percent-encoded) out of `claw/{id}`.
    pub async fn exists(&self, id: &str) -> Result<ApiEmpty, ClientError> {
        if matches!(id, "" | "." | "..") {
            return Err(ClientError::Api(ApiEmpty::new(400, "Invalid claw id")));
        }

        let url = self.url(&format!("claw/{}", percent_encode_component(id)));
        log::debug!("GET {url}");

        let res = self.http.get(&url).headers(json_headers()).send().await?;

        map_response(res, ApiEmpty::new(400, "")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn percent_encode_path_component() {
        assert_eq!(percent_encode_component("abc-123"), "abc-123");
        assert_eq!(percent_encode_component("a/b c"), "a%2Fb%20c");
        assert_eq!(percent_encode_component("a?b#c"), "a%3Fb%23c");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = VaultClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("encrypt"), "http://localhost:8080/api/v1/encrypt");
    }

    #[tokio::test]
    async fn encrypt_posts_json_body() {
        let server = MockServer::start().await;
        let client = VaultClient::new(server.uri());

        Mock::given(method("POST"))
            .and(path("/api/v1/encrypt"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(serde_json::json!({ "data": "hello", "validity": 3600 })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "abc", "key": "xyz", "valid_for": "1h"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let res = client.encrypt("hello", 3600.0).await.unwrap();
        assert_eq!(res.id, "abc");
        assert_eq!(res.key, "xyz");
        assert_eq!(res.valid_for, "1h");
    }

    #[tokio::test]
    async fn decrypt_posts_id_and_key() {
        let server = MockServer::start().await;
        let client = VaultClient::new(server.uri());

        Mock::given(method("POST"))
            .and(path("/api/v1/decrypt"))
            .and(header("accept", "application/json"))
            .and(body_json(serde_json::json!({ "id": "abc", "key": "xyz" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": "secret" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let res = client.decrypt("abc", "xyz").await.unwrap();
        assert_eq!(res.data, "secret");
    }

    #[tokio::test]
    async fn decrypt_propagates_backend_failure() {
        let server = MockServer::start().await;
        let client = VaultClient::new(server.uri());

        Mock::given(method("POST"))
            .and(path("/api/v1/decrypt"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({ "message": "Bad key" })),
            )
            .mount(&server)
            .await;

        let err = client.decrypt("abc", "wrong").await.unwrap_err();
        assert!(matches!(err, ClientError::Api(ref api) if api.status == 400 && api.message == "Bad key"));
    }

    #[tokio::test]
    async fn exists_gets_claw_by_id() {
        let server = MockServer::start().await;
        let client = VaultClient::new(server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v1/claw/abc"))
            .and(header("content-type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "status": 200, "message": "ok" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let res = client.exists("abc").await.unwrap();
        assert_eq!(res, ApiEmpty::new(200, "ok"));
    }

    #[tokio::test]
    async fn exists_empty_ack_uses_fallback() {
        let server = MockServer::start().await;
        let client = VaultClient::new(server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v1/claw/abc"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let res = client.exists("abc").await.unwrap();
        assert_eq!(res, ApiEmpty::new(400, ""));
    }

    #[tokio::test]
    async fn exists_reports_missing_claw() {
        let server = MockServer::start().await;
        let client = VaultClient::new(server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v1/claw/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let err = client.exists("gone").await.unwrap_err();
        assert_eq!(ApiEmpty::from(err), ApiEmpty::new(404, "not found"));
    }

    #[tokio::test]
    async fn exists_refuses_dot_segment_ids() {
        let server = MockServer::start().await;
        let client = VaultClient::new(server.uri());

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        for id in ["", ".", ".."] {
            let err = client.exists(id).await.unwrap_err();
            assert_eq!(ApiEmpty::from(err), ApiEmpty::new(400, "Invalid claw id"));
        }
    }

    #[tokio::test]
    async fn exists_keeps_dotted_ids_in_path() {
        let server = MockServer::start().await;
        let client = VaultClient::new(server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v1/claw/a..b"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client.exists("a..b").await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = VaultClient::new(format!("http://{addr}"));
        let err = client.encrypt("hello", 60.0).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
