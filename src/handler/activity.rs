use crate::{
    AppState,
    db::ActivityExt,
    dtos::{ActivateDto, DataResponse, InputActivityDto, ListResponse, ReorderDto},
    error::HttpError,
    middleware::auth,
    ordering,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post, put},
};
use tracing::instrument;
use validator::Validate;

pub fn activity_handler(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_public_activities))
        .route(
            "/",
            post(create_activity)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/all",
            get(get_all_activities)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/reorder",
            put(reorder_activities)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{activity_id}",
            put(update_activity)
                .delete(delete_activity)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{activity_id}/active",
            patch(set_activity_active)
                .route_layer(middleware::from_fn_with_state(app_state, auth)),
        )
}

/// Public list: active items only. A database failure degrades to an empty
/// section rather than breaking the page.
pub async fn get_public_activities(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let activities = app_state
        .db_client
        .get_active_activities()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("DB error, listing active activities: {}", e);
            Vec::new()
        });

    Ok(Json(ListResponse::success(activities)))
}

/// Admin list: every item, hidden ones included
pub async fn get_all_activities(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let activities = app_state
        .db_client
        .get_activities()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(activities)))
}

#[instrument(skip(app_state, body), fields(title = %body.title))]
pub async fn create_activity(
    State(app_state): State<AppState>,
    Json(body): Json<InputActivityDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid activity input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let activity = app_state
        .db_client
        .create_activity(&body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(DataResponse::success(activity))))
}

#[instrument(skip(app_state, body))]
pub async fn update_activity(
    Path(activity_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<InputActivityDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid activity input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let activity = app_state
        .db_client
        .update_activity(activity_id, &body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Activity not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(activity)))
}

#[instrument(skip(app_state))]
pub async fn set_activity_active(
    Path(activity_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<ActivateDto>,
) -> Result<impl IntoResponse, HttpError> {
    let activity = app_state
        .db_client
        .set_activity_active(activity_id, body.is_active)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Activity not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(activity)))
}

#[instrument(skip(app_state))]
pub async fn delete_activity(
    Path(activity_id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_activity(activity_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Activity not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Apply a drag gesture to the admin-ordered list and persist the new
/// permutation. `from == to` issues no writes and returns the list as is.
#[instrument(skip(app_state))]
pub async fn reorder_activities(
    State(app_state): State<AppState>,
    Json(body): Json<ReorderDto>,
) -> Result<impl IntoResponse, HttpError> {
    let activities = app_state
        .db_client
        .get_activities()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if body.from >= activities.len() || body.to >= activities.len() {
        return Err(HttpError::bad_request("Reorder index out of range"));
    }

    let next = match ordering::reorder(&activities, body.from, body.to) {
        Some(next) => next,
        None => return Ok(Json(ListResponse::success(activities))),
    };

    let ordered_ids: Vec<i32> = next.iter().map(|activity| activity.id).collect();
    app_state
        .db_client
        .reorder_activities(&ordered_ids)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Reload so the response carries the renumbered positions.
    let activities = app_state
        .db_client
        .get_activities()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(activities)))
}
