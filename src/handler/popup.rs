use crate::{
    AppState,
    db::PopupExt,
    dtos::{
        ActivateDto, DataResponse, EligibilityResponseDto, InputPopupDto, ListResponse,
        StatsQueryDto,
    },
    error::HttpError,
    middleware::auth,
    popup::{Phase, PopupSession, SkipReason, VisitorStore, evaluate},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, patch, post, put},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use time::Duration;
use tracing::instrument;
use validator::Validate;

/// Default stats window when the query does not say otherwise
const DEFAULT_STATS_DAYS: i64 = 30;

pub fn popup_handler(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/active", get(get_active_popup))
        .route("/{popup_id}/view", post(record_view))
        .route("/{popup_id}/click", post(record_click))
        .route(
            "/",
            get(get_popups)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/",
            post(create_popup)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{popup_id}",
            put(update_popup)
                .delete(delete_popup)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{popup_id}/activate",
            patch(activate_popup)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{popup_id}/stats",
            get(get_popup_stats)
                .route_layer(middleware::from_fn_with_state(app_state, auth)),
        )
}

/// The visitor is identified by a long-lived random cookie; a fresh id
/// means "never shown", so the popup can display at most once more than
/// the frequency cap promises for cookie-clearing visitors.
fn visitor_id(cookie_jar: &CookieJar) -> (String, bool) {
    match cookie_jar.get("visitor_id") {
        Some(cookie) => (cookie.value().to_string(), false),
        None => (uuid::Uuid::new_v4().to_string(), true),
    }
}

fn visitor_cookie(visitor_id: &str) -> Cookie<'static> {
    Cookie::build(("visitor_id", visitor_id.to_string()))
        .path("/")
        .max_age(Duration::days(365))
        .http_only(true)
        .secure(true)
        .build()
}

/// Public eligibility check, called once per page load.
///
/// Answers either "show this popup after `delay_seconds`" or "skip" with
/// the reason. Display itself is reported separately through the view
/// endpoint, after the client-side delay has elapsed.
#[instrument(skip(app_state, cookie_jar))]
pub async fn get_active_popup(
    cookie_jar: CookieJar,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let (visitor, is_new_visitor) = visitor_id(&cookie_jar);

    // Reads degrade gracefully: no popup row means nothing to show.
    let popup = app_state.db_client.get_active_popup().await.unwrap_or_else(|e| {
        tracing::error!("DB error, getting active popup: {}", e);
        None
    });

    let last_shown = app_state.redis_client.last_shown(&visitor).await;

    let mut session = PopupSession::new();
    let response = match session.check(popup.as_ref(), last_shown, Utc::now()) {
        Phase::Eligible { delay_seconds } => Json(EligibilityResponseDto {
            status: "success".to_string(),
            eligible: true,
            reason: None,
            popup,
            delay_seconds: Some(delay_seconds),
        }),
        _ => {
            let reason = match evaluate(popup.as_ref(), last_shown, Utc::now()) {
                crate::popup::Eligibility::Skip(reason) => reason,
                // Unreachable given the phase above, but stay total.
                crate::popup::Eligibility::Show { .. } => SkipReason::NoActivePopup,
            };
            Json(EligibilityResponseDto {
                status: "success".to_string(),
                eligible: false,
                reason: Some(reason.to_string()),
                popup: None,
                delay_seconds: None,
            })
        }
    };

    let mut response = response.into_response();
    if is_new_visitor {
        let mut headers = HeaderMap::new();
        headers.append(
            header::SET_COOKIE,
            visitor_cookie(&visitor)
                .to_string()
                .parse()
                .map_err(|_| HttpError::server_error("Cookie encoding failed"))?,
        );
        response.headers_mut().extend(headers);
    }

    Ok(response)
}

/// The client's display delay elapsed and the popup is on screen: bump the
/// daily view counter and stamp the visitor's cool-down.
#[instrument(skip(app_state, cookie_jar))]
pub async fn record_view(
    cookie_jar: CookieJar,
    Path(popup_id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let now = Utc::now();

    app_state
        .db_client
        .record_popup_view(popup_id, now.date_naive())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(cookie) = cookie_jar.get("visitor_id") {
        app_state
            .redis_client
            .record_shown(cookie.value(), now)
            .await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Call-to-action click. Always counted, even when no view landed for the
/// day (the row is created with zero views in that case).
#[instrument(skip(app_state))]
pub async fn record_click(
    Path(popup_id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .record_popup_click(popup_id, Utc::now().date_naive())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_popups(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let popups = app_state
        .db_client
        .get_popups()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(popups)))
}

#[instrument(skip(app_state, body), fields(title = %body.title))]
pub async fn create_popup(
    State(app_state): State<AppState>,
    Json(body): Json<InputPopupDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid popup input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let popup = app_state
        .db_client
        .create_popup(&body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Creating an active popup retires whatever was active before.
    if popup.is_active {
        app_state
            .db_client
            .deactivate_other_popups(popup.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    Ok((StatusCode::CREATED, Json(DataResponse::success(popup))))
}

#[instrument(skip(app_state, body))]
pub async fn update_popup(
    Path(popup_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<InputPopupDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid popup input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let popup = app_state
        .db_client
        .update_popup(popup_id, &body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Popup not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    if popup.is_active {
        app_state
            .db_client
            .deactivate_other_popups(popup.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    Ok(Json(DataResponse::success(popup)))
}

/// Flip one popup's active flag. Activation keeps a single popup live by
/// deactivating the others first; deactivation touches only this row.
#[instrument(skip(app_state))]
pub async fn activate_popup(
    Path(popup_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(body): Json<ActivateDto>,
) -> Result<impl IntoResponse, HttpError> {
    if body.is_active {
        app_state
            .db_client
            .deactivate_other_popups(popup_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    let popup = app_state
        .db_client
        .set_popup_active(popup_id, body.is_active)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Popup not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(DataResponse::success(popup)))
}

#[instrument(skip(app_state))]
pub async fn delete_popup(
    Path(popup_id): Path<i32>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_popup(popup_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Popup not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Daily view/click counters, newest first
#[instrument(skip(app_state))]
pub async fn get_popup_stats(
    Path(popup_id): Path<i32>,
    Query(query): Query<StatsQueryDto>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let popup = app_state
        .db_client
        .get_popup(popup_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    if popup.is_none() {
        return Err(HttpError::not_found("Popup not found"));
    }

    let days = query.days.unwrap_or(DEFAULT_STATS_DAYS);
    let stats = app_state
        .db_client
        .get_popup_stats(popup_id, days)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ListResponse::success(stats)))
}
