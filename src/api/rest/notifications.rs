use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::rest::auth::Authenticated;
use crate::api::rest::extract::{ApiPath, ApiQuery};
use crate::error::AppError;
use crate::models::notification::Notification;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/read-all", post(mark_all_read))
        .route("/notifications/:id/read", post(mark_read))
}

#[derive(Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub unread: bool,
}

#[derive(Serialize)]
struct MarkedResponse {
    marked: usize,
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Json<Vec<Notification>> {
    Json(state.inbox.list_for(actor.id(), query.unread))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Notification>, AppError> {
    Ok(Json(state.inbox.mark_read(id, actor.id())?))
}

async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    Authenticated(actor): Authenticated,
) -> Json<MarkedResponse> {
    Json(MarkedResponse {
        marked: state.inbox.mark_all_read(actor.id()),
    })
}
