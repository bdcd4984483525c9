//! Notes endpoint

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use licklog_common::db::{notes, Note};

use crate::{ApiResult, AppState};

/// Build note routes
pub fn note_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id/notes", get(list_notes))
}

/// GET /users/:user_id/notes
pub async fn list_notes(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(notes::fetch_notes(&state.db, user_id).await?))
}
