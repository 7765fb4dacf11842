use crate::{
    AppState,
    db::RestaurantExt,
    dtos::{ActivateDto, DataResponse, InputRestaurantDto, ListResponse, ReorderDto},
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

pub fn restaurant_handler(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_public_restaurants))
        .route(
            "/",
            post(create_restaurant)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/all",
            get(get_all_restaurants)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/reorder",
            put(reorder_restaurants)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{restaurant_id}",
            put(update_restaurant)
                .delete(delete_restaurant)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{restaurant_id}/active",
            patch(set_restaurant_active)
                .route_layer(middleware::from_fn_with_state(app_state, auth)),
        )
}

pub async fn get_public_restaurants(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let restaurants = app_state
        .db_client
        .get_active_restaurants()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("DB error, listing active restaurants: {}", e);
            Vec::new()
        });

    Ok(Json(ListResponse::success(restaurants)))
}

pub async fn get_all_restaurants(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let restaurants = app_state
        .db_client
        .get_restaurants()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(restaurants)))
}

#[instrument(skip(app_state, body), fields(name = %body.name))]
pub async fn create_restaurant(
    State(app_state): State<AppState>,
    Json(body): Json<InputRestaurantDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid restaurant input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let restaurant = app_state
        .db_client
        .create_restaurant(&body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(DataResponse::success(restaurant))))
}

#[instrument(skip(app_state, body))]
pub async fn update_restaurant(
    Path(restaurant_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<InputRestaurantDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid restaurant input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let restaurant = app_state
        .db_client
        .update_restaurant(restaurant_id, &body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Restaurant not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(restaurant)))
}

#[instrument(skip(app_state))]
pub async fn set_restaurant_active(
    Path(restaurant_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<ActivateDto>,
) -> Result<impl IntoResponse, HttpError> {
    let restaurant = app_state
        .db_client
        .set_restaurant_active(restaurant_id, body.is_active)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Restaurant not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(restaurant)))
}

#[instrument(skip(app_state))]
pub async fn delete_restaurant(
    Path(restaurant_id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_restaurant(restaurant_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Restaurant not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(app_state))]
pub async fn reorder_restaurants(
    State(app_state): State<AppState>,
    Json(body): Json<ReorderDto>,
) -> Result<impl IntoResponse, HttpError> {
    let restaurants = app_state
        .db_client
        .get_restaurants()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if body.from >= restaurants.len() || body.to >= restaurants.len() {
        return Err(HttpError::bad_request("Reorder index out of range"));
    }

    let next = match ordering::reorder(&restaurants, body.from, body.to) {
        Some(next) => next,
        None => return Ok(Json(ListResponse::success(restaurants))),
    };

    let ordered_ids: Vec<i32> = next.iter().map(|restaurant| restaurant.id).collect();
    app_state
        .db_client
        .reorder_restaurants(&ordered_ids)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let restaurants = app_state
        .db_client
        .get_restaurants()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(restaurants)))
}
