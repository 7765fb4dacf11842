use crate::{
    AppState,
    db::SectionExt,
    dtos::{DataResponse, ListResponse, ReorderDto, VisibilityDto},
    error::HttpError,
    middleware::auth,
    ordering,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::{get, patch, put},
};
use tracing::instrument;

pub fn section_handler(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_visible_sections))
        .route(
            "/all",
            get(get_all_sections)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/reorder",
            put(reorder_sections)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{section_name}/visibility",
            patch(set_section_visibility)
                .route_layer(middleware::from_fn_with_state(app_state, auth)),
        )
}

/// Public layout: visible sections in render order
pub async fn get_visible_sections(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let sections = app_state
        .db_client
        .get_visible_sections()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("DB error, listing visible sections: {}", e);
            Vec::new()
        });

    Ok(Json(ListResponse::success(sections)))
}

pub async fn get_all_sections(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let sections = app_state
        .db_client
        .get_sections()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(sections)))
}

/// Toggle one section. Idempotent: setting the value it already has
/// succeeds without complaint.
#[instrument(skip(app_state))]
pub async fn set_section_visibility(
    Path(section_name): Path<String>,
    State(app_state): State<AppState>,
    Json(body): Json<VisibilityDto>,
) -> Result<impl IntoResponse, HttpError> {
    let section = app_state
        .db_client
        .set_section_visible(&section_name, body.is_visible)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Section not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(section)))
}

#[instrument(skip(app_state))]
pub async fn reorder_sections(
    State(app_state): State<AppState>,
    Json(body): Json<ReorderDto>,
) -> Result<impl IntoResponse, HttpError> {
    let sections = app_state
        .db_client
        .get_sections()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if body.from >= sections.len() || body.to >= sections.len() {
        return Err(HttpError::bad_request("Reorder index out of range"));
    }

    let next = match ordering::reorder(&sections, body.from, body.to) {
        Some(next) => next,
        None => return Ok(Json(ListResponse::success(sections))),
    };

    let ordered_ids: Vec<i32> = next.iter().map(|section| section.id).collect();
    app_state
        .db_client
        .reorder_sections(&ordered_ids)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let sections = app_state
        .db_client
        .get_sections()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(sections)))
}
