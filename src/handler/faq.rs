use crate::{
    AppState,
    db::FaqExt,
    dtos::{ActivateDto, DataResponse, InputFaqDto, ListResponse, ReorderDto},
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

pub fn faq_handler(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_public_faqs))
        .route(
            "/",
            post(create_faq).route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/all",
            get(get_all_faqs)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/reorder",
            put(reorder_faqs)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{faq_id}",
            put(update_faq)
                .delete(delete_faq)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{faq_id}/active",
            patch(set_faq_active).route_layer(middleware::from_fn_with_state(app_state, auth)),
        )
}

pub async fn get_public_faqs(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let faqs = app_state.db_client.get_active_faqs().await.unwrap_or_else(|e| {
        tracing::error!("DB error, listing active faqs: {}", e);
        Vec::new()
    });

    Ok(Json(ListResponse::success(faqs)))
}

pub async fn get_all_faqs(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let faqs = app_state
        .db_client
        .get_faqs()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(faqs)))
}

#[instrument(skip(app_state, body))]
pub async fn create_faq(
    State(app_state): State<AppState>,
    Json(body): Json<InputFaqDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid faq input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let faq = app_state
        .db_client
        .create_faq(&body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(DataResponse::success(faq))))
}

#[instrument(skip(app_state, body))]
pub async fn update_faq(
    Path(faq_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<InputFaqDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid faq input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let faq = app_state
        .db_client
        .update_faq(faq_id, &body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Faq not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(faq)))
}

#[instrument(skip(app_state))]
pub async fn set_faq_active(
    Path(faq_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<ActivateDto>,
) -> Result<impl IntoResponse, HttpError> {
    let faq = app_state
        .db_client
        .set_faq_active(faq_id, body.is_active)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Faq not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(faq)))
}

#[instrument(skip(app_state))]
pub async fn delete_faq(
    Path(faq_id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_faq(faq_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Faq not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(app_state))]
pub async fn reorder_faqs(
    State(app_state): State<AppState>,
    Json(body): Json<ReorderDto>,
) -> Result<impl IntoResponse, HttpError> {
    let faqs = app_state
        .db_client
        .get_faqs()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if body.from >= faqs.len() || body.to >= faqs.len() {
        return Err(HttpError::bad_request("Reorder index out of range"));
    }

    let next = match ordering::reorder(&faqs, body.from, body.to) {
        Some(next) => next,
        None => return Ok(Json(ListResponse::success(faqs))),
    };

    let ordered_ids: Vec<i32> = next.iter().map(|faq| faq.id).collect();
    app_state
        .db_client
        .reorder_faqs(&ordered_ids)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let faqs = app_state
        .db_client
        .get_faqs()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(faqs)))
}
