use crate::{
    AppState,
    db::AboutExt,
    dtos::{DataResponse, InputAboutDto},
    error::HttpError,
    middleware::auth,
    models::About,
};
use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use tracing::instrument;
use validator::Validate;

pub fn about_handler(app_state: AppState) -> Router<AppState> {
    Router::new().route("/", get(get_about)).route(
        "/",
        put(save_about).route_layer(middleware::from_fn_with_state(app_state, auth)),
    )
}

/// Public read of the single about record; `data` is null until the admin
/// writes one.
pub async fn get_about(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let about: Option<About> = app_state.db_client.get_about().await.unwrap_or_else(|e| {
        tracing::error!("DB error, getting about: {}", e);
        None
    });

    Ok(Json(DataResponse::success(about)))
}

/// Upsert: the table holds at most one row, so a save either updates it or
/// creates it.
#[instrument(skip(app_state, body), fields(title = %body.title))]
pub async fn save_about(
    State(app_state): State<AppState>,
    Json(body): Json<InputAboutDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid about input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let existing = app_state
        .db_client
        .get_about()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let about = match existing {
        Some(about) => app_state
            .db_client
            .update_about(about.id, &body)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        None => app_state
            .db_client
            .create_about(&body)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
    };

    Ok(Json(DataResponse::success(about)))
}
