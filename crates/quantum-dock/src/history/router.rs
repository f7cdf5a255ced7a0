use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::UserId;
use super::repository::ResultStore;
use super::service::{HistoryError, HistoryService};
use crate::simulation::SimulationEntry;

/// Header carrying the identity provider's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Deserialize)]
pub struct SaveResultsRequest {
    pub entries: Vec<SimulationEntry>,
}

/// Router exposing save and list endpoints for the per-user result history.
pub fn history_router<S>(service: Arc<HistoryService<S>>) -> Router
where
    S: ResultStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/history",
            get(list_handler::<S>).post(save_handler::<S>),
        )
        .with_state(service)
}

pub(crate) fn user_from_headers(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(UserId::parse)
}

fn unauthorized() -> Response {
    let payload = json!({
        "error": "you must be signed in to access saved results",
    });
    (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
}

pub(crate) async fn save_handler<S>(
    State(service): State<Arc<HistoryService<S>>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<SaveResultsRequest>,
) -> Response
where
    S: ResultStore + 'static,
{
    let Some(user) = user_from_headers(&headers) else {
        return unauthorized();
    };

    match service.save_run(&user, &request.entries) {
        Ok(saved) => (StatusCode::CREATED, axum::Json(json!({ "saved": saved }))).into_response(),
        Err(HistoryError::NothingToSave) => {
            let payload = json!({
                "error": HistoryError::NothingToSave.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(err @ HistoryError::Partial { saved, .. }) => {
            let payload = json!({
                "error": err.to_string(),
                "saved": saved,
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<HistoryService<S>>>,
    headers: HeaderMap,
) -> Response
where
    S: ResultStore + 'static,
{
    let Some(user) = user_from_headers(&headers) else {
        return unauthorized();
    };

    match service.history(&user) {
        Ok(results) => {
            let payload = json!({
                "user_id": user,
                "results": results,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
