use crate::{
    AppState,
    db::ReviewExt,
    dtos::{ActivateDto, DataResponse, InputReviewDto, ListResponse, ReorderDto},
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

pub fn review_handler(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_public_reviews))
        .route(
            "/",
            post(create_review)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/all",
            get(get_all_reviews)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/reorder",
            put(reorder_reviews)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{review_id}",
            put(update_review)
                .delete(delete_review)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{review_id}/active",
            patch(set_review_active)
                .route_layer(middleware::from_fn_with_state(app_state, auth)),
        )
}

pub async fn get_public_reviews(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_active_reviews()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("DB error, listing active reviews: {}", e);
            Vec::new()
        });

    Ok(Json(ListResponse::success(reviews)))
}

pub async fn get_all_reviews(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_reviews()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(reviews)))
}

#[instrument(skip(app_state, body), fields(author = %body.author_name))]
pub async fn create_review(
    State(app_state): State<AppState>,
    Json(body): Json<InputReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid review input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let review = app_state
        .db_client
        .create_review(&body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(DataResponse::success(review))))
}

#[instrument(skip(app_state, body))]
pub async fn update_review(
    Path(review_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<InputReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid review input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let review = app_state
        .db_client
        .update_review(review_id, &body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Review not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(review)))
}

#[instrument(skip(app_state))]
pub async fn set_review_active(
    Path(review_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<ActivateDto>,
) -> Result<impl IntoResponse, HttpError> {
    let review = app_state
        .db_client
        .set_review_active(review_id, body.is_active)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Review not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(review)))
}

#[instrument(skip(app_state))]
pub async fn delete_review(
    Path(review_id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_review(review_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Review not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(app_state))]
pub async fn reorder_reviews(
    State(app_state): State<AppState>,
    Json(body): Json<ReorderDto>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_reviews()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if body.from >= reviews.len() || body.to >= reviews.len() {
        return Err(HttpError::bad_request("Reorder index out of range"));
    }

    let next = match ordering::reorder(&reviews, body.from, body.to) {
        Some(next) => next,
        None => return Ok(Json(ListResponse::success(reviews))),
    };

    let ordered_ids: Vec<i32> = next.iter().map(|review| review.id).collect();
    app_state
        .db_client
        .reorder_reviews(&ordered_ids)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let reviews = app_state
        .db_client
        .get_reviews()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(reviews)))
}
