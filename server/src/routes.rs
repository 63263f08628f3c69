use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header::ACCEPT, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use axum_macros::debug_handler;
use claw_core::ApiEmpty;
use claw_frontend::{actions, DecryptForm, EncryptForm};
use maud::Markup;
use serde::Serialize;

use crate::{views, AppState};

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

/// Status a failed action answers with. Anything that is not a 4xx/5xx is
/// reported as 500.
fn failure_status(err: &ApiEmpty) -> StatusCode {
    StatusCode::from_u16(err.status)
        .ok()
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// A form body axum could not extract, in the uniform failure shape.
fn rejected(rejection: FormRejection) -> ApiEmpty {
    ApiEmpty::new(rejection.status().as_u16(), rejection.body_text())
}

/// Answers a form action with JSON when asked for it, otherwise with the
/// index page showing the outcome.
fn respond<T>(headers: &HeaderMap, result: Result<T, ApiEmpty>, render: fn(&T) -> Markup) -> Response
where
    T: Serialize,
{
    let json = wants_json(headers);
    match result {
        Ok(value) if json => (StatusCode::OK, Json(value)).into_response(),
        Ok(value) => (StatusCode::OK, views::index(Some(render(&value)))).into_response(),
        Err(err) => {
            let status = failure_status(&err);
            if json {
                (status, Json(err)).into_response()
            } else {
                (status, views::index(Some(views::failure(&err)))).into_response()
            }
        }
    }
}

#[debug_handler]
pub async fn index() -> Markup {
    views::index(None)
}

#[debug_handler]
pub async fn encrypt(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<EncryptForm>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(form)) => actions::encrypt_data(&state.client, form).await,
        Err(rejection) => Err(rejected(rejection)),
    };
    if let Ok(res) = &result {
        log::info!("Stored claw {} valid for {}", res.id, res.valid_for);
    }
    respond(&headers, result, views::encrypted)
}

#[debug_handler]
pub async fn decrypt(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<DecryptForm>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(form)) => actions::decrypt_data(&state.client, form).await,
        Err(rejection) => Err(rejected(rejection)),
    };
    respond(&headers, result, views::decrypted)
}

#[debug_handler]
pub async fn vault(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.client.exists(&id).await {
        Ok(_) => views::vault(&id).into_response(),
        Err(err) => {
            log::warn!("Claw {id} is not available: {err}");
            (StatusCode::NOT_FOUND, views::not_found()).into_response()
        }
    }
}

#[debug_handler]
pub async fn privacy() -> Markup {
    views::privacy()
}

#[debug_handler]
pub async fn health() -> &'static str {
    "Server is up and running"
}

/// Handler for routes that are not defined
#[debug_handler]
pub async fn not_found() -> (StatusCode, Markup) {
    (StatusCode::NOT_FOUND, views::not_found())
}
