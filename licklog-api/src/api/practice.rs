//! Practice dashboard endpoint

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use licklog_common::api::types::PracticeDashboard;
use licklog_common::catalog::practice_dashboard;
use licklog_common::db::licks;
use licklog_common::time;

use crate::{ApiResult, AppState};

/// Build practice routes
pub fn practice_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id/practice", get(get_practice))
}

/// GET /users/:user_id/practice
///
/// Licks scheduled for today, overdue licks and the sloppiest licks.
pub async fn get_practice(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<PracticeDashboard>> {
    let collection = licks::fetch_licks(&state.db, user_id).await?;
    Ok(Json(practice_dashboard(&collection, time::now())))
}
