use crate::{
    AppState,
    db::PoiExt,
    dtos::{ActivateDto, DataResponse, InputPoiDto, ListResponse, ReorderDto},
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

pub fn poi_handler(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_public_pois))
        .route(
            "/",
            post(create_poi).route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/all",
            get(get_all_pois)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/reorder",
            put(reorder_pois)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{poi_id}",
            put(update_poi)
                .delete(delete_poi)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{poi_id}/active",
            patch(set_poi_active).route_layer(middleware::from_fn_with_state(app_state, auth)),
        )
}

pub async fn get_public_pois(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let pois = app_state.db_client.get_active_pois().await.unwrap_or_else(|e| {
        tracing::error!("DB error, listing active pois: {}", e);
        Vec::new()
    });

    Ok(Json(ListResponse::success(pois)))
}

pub async fn get_all_pois(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let pois = app_state
        .db_client
        .get_pois()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(pois)))
}

#[instrument(skip(app_state, body), fields(name = %body.name))]
pub async fn create_poi(
    State(app_state): State<AppState>,
    Json(body): Json<InputPoiDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid poi input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let poi = app_state
        .db_client
        .create_poi(&body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(DataResponse::success(poi))))
}

#[instrument(skip(app_state, body))]
pub async fn update_poi(
    Path(poi_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<InputPoiDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid poi input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let poi = app_state
        .db_client
        .update_poi(poi_id, &body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Point of interest not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(poi)))
}

#[instrument(skip(app_state))]
pub async fn set_poi_active(
    Path(poi_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<ActivateDto>,
) -> Result<impl IntoResponse, HttpError> {
    let poi = app_state
        .db_client
        .set_poi_active(poi_id, body.is_active)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Point of interest not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(poi)))
}

#[instrument(skip(app_state))]
pub async fn delete_poi(
    Path(poi_id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_poi(poi_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Point of interest not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(app_state))]
pub async fn reorder_pois(
    State(app_state): State<AppState>,
    Json(body): Json<ReorderDto>,
) -> Result<impl IntoResponse, HttpError> {
    let pois = app_state
        .db_client
        .get_pois()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if body.from >= pois.len() || body.to >= pois.len() {
        return Err(HttpError::bad_request("Reorder index out of range"));
    }

    let next = match ordering::reorder(&pois, body.from, body.to) {
        Some(next) => next,
        None => return Ok(Json(ListResponse::success(pois))),
    };

    let ordered_ids: Vec<i32> = next.iter().map(|poi| poi.id).collect();
    app_state
        .db_client
        .reorder_pois(&ordered_ids)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let pois = app_state
        .db_client
        .get_pois()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(pois)))
}
