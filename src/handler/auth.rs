use crate::{
    AppState,
    dtos::{LoginDto, LoginResponseDto, Response},
    error::{ErrorMessage, HttpError},
    middleware::{ADMIN_SUBJECT, AdminSession, auth},
    utils::{password, token},
};
use axum::{
    Extension, Json, Router,
    extract::State,
    http::{HeaderMap, header},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::Cookie;
use time::Duration;
use tracing::instrument;
use validator::Validate;

/// Router for the admin session endpoints
pub fn auth_handler(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route(
            "/logout",
            post(logout).route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(app_state, auth)),
        )
}

/// Login with the single admin password
///
/// Compares the submitted password against the Argon2 hash from the
/// environment; there is no user table behind this.
#[instrument(skip(app_state, body))]
pub async fn login(
    State(app_state): State<AppState>,
    Json(body): Json<LoginDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid login input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let password_matched = password::compare(&body.password, &app_state.env.admin_password_hash)
        .map_err(|e| {
        tracing::error!("Password error: {}", e);
        HttpError::unauthorized("Login failed")
    })?;

    if !password_matched {
        tracing::error!("password mismatch");
        return Err(HttpError::unauthorized("Login failed"));
    }

    let access_token = token::create_token(
        ADMIN_SUBJECT,
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| {
        tracing::error!("Access token creation error: {}", e);
        HttpError::server_error(ErrorMessage::ServerError.to_string())
    })?;

    let access_cookie = Cookie::build(("access_token", access_token.clone()))
        .path("/")
        .max_age(Duration::seconds(app_state.env.jwt_maxage))
        .http_only(true)
        .secure(true)
        .build();

    let response = Json(LoginResponseDto {
        status: "success".to_string(),
        access_token,
    });

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        access_cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error(ErrorMessage::ServerError.to_string()))?,
    );

    let mut response = response.into_response();
    response.headers_mut().extend(headers);
    tracing::info!("Admin login successful");
    Ok(response)
}

/// Clear the session cookie
#[instrument]
pub async fn logout() -> Result<impl IntoResponse, HttpError> {
    let expired_cookie = Cookie::build(("access_token", ""))
        .path("/")
        .max_age(Duration::seconds(0))
        .http_only(true)
        .secure(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        expired_cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error(ErrorMessage::ServerError.to_string()))?,
    );

    let response = Json(Response {
        status: "success",
        message: "Logged out".to_string(),
    });

    let mut response = response.into_response();
    response.headers_mut().extend(headers);
    Ok(response)
}

/// Session probe used by the admin console on load
pub async fn me(
    Extension(session): Extension<AdminSession>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(Response {
        status: "success",
        message: session.subject,
    }))
}
