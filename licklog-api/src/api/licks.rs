//! Lick index, detail, create/update and delete endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use licklog_common::api::types::{DeleteOutcome, IndexOptions, LickQuery};
use licklog_common::catalog::{filter_and_sort, filter_options, SortStrategy};
use licklog_common::db::licks;
use licklog_common::db::Lick;
use licklog_common::draft::LickDraft;
use licklog_common::SortedLicks;

use crate::{ApiError, ApiResult, AppState};

/// Build lick routes
pub fn lick_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/licks", get(list_licks).post(create_lick))
        .route(
            "/users/:user_id/licks/:lick_id",
            get(show_lick).patch(update_lick).delete(delete_lick),
        )
        .route("/users/:user_id/options", get(index_options))
}

/// GET /users/:user_id/licks?filter=&sort=
///
/// Flat JSON array for `sort` none or a date sort, JSON object of
/// label to licks for the grouping sorts.
pub async fn list_licks(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<LickQuery>,
) -> ApiResult<Json<SortedLicks>> {
    let collection = licks::fetch_licks(&state.db, user_id).await?;
    let known_artists = licks::artist_names(&state.db).await?;

    let sorted = filter_and_sort(collection, &query, &known_artists)?;
    Ok(Json(sorted))
}

/// GET /users/:user_id/licks/:lick_id
pub async fn show_lick(
    State(state): State<AppState>,
    Path((user_id, lick_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Lick>> {
    licks::fetch_lick(&state.db, user_id, lick_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Lick {lick_id}")))
}

/// POST /users/:user_id/licks
pub async fn create_lick(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    payload: Result<Json<LickDraft>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(draft) = payload?;
    if !licks::user_exists(&state.db, user_id).await? {
        return Err(ApiError::NotFound(format!("User {user_id}")));
    }

    let new_lick = draft.validate()?;
    let lick = licks::insert_lick(&state.db, user_id, &new_lick).await?;
    Ok((StatusCode::CREATED, Json(lick)))
}

/// PATCH /users/:user_id/licks/:lick_id
pub async fn update_lick(
    State(state): State<AppState>,
    Path((user_id, lick_id)): Path<(i64, i64)>,
    payload: Result<Json<LickDraft>, JsonRejection>,
) -> ApiResult<Json<Lick>> {
    let Json(draft) = payload?;
    let new_lick = draft.validate()?;
    licks::update_lick(&state.db, user_id, lick_id, &new_lick)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Lick {lick_id}")))
}

/// DELETE /users/:user_id/licks/:lick_id
///
/// 204 when deleted, 404 when the lick is already gone.
pub async fn delete_lick(
    State(state): State<AppState>,
    Path((user_id, lick_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    match licks::delete_lick(&state.db, user_id, lick_id).await? {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::NotFound => {
            Err(ApiError::NotFound(format!("Lick {lick_id}")))
        }
    }
}

/// GET /users/:user_id/options
///
/// Filter selector option groups and the sort selector labels.
pub async fn index_options(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<IndexOptions>> {
    let collection = licks::fetch_licks(&state.db, user_id).await?;

    Ok(Json(IndexOptions {
        filters: filter_options(&collection),
        sorts: SortStrategy::labels(),
    }))
}
