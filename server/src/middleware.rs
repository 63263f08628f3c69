use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use rand::RngCore;

pub const REQUEST_ID_HEADER: &str = "x-req-id";

/// Tags the request and its response with a short random id and logs the
/// request line and the outcome under that id.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = generate_id();
    let method = req.method().clone();
    let uri = req.uri().clone();
    log::info!("[{id}] {method} {uri}");

    if let Ok(value) = HeaderValue::from_str(&id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let start = Instant::now();
    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    log_response(&id, res.status(), start);
    res
}

fn log_response(id: &str, status: StatusCode, start: Instant) {
    let latency = start.elapsed();
    if status.is_server_error() {
        log::error!("[{id}] Completed with status {status} in {latency:?}");
    } else if status.is_client_error() {
        log::warn!("[{id}] Completed with status {status} in {latency:?}");
    } else {
        log::info!("[{id}] Completed with status {status} in {latency:?}");
    }
}

fn generate_id() -> String {
    let mut bytes = [0u8; 3];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_six_hex_chars() {
        let id = generate_id();
        assert_eq!(id.len(), 6);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
