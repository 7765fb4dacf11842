use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::IntoResponse,
};

use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    error::{ErrorMessage, HttpError},
    utils::token,
};

/// Claim the back-office runs under. There is exactly one administrator,
/// so the token carries a fixed subject instead of a user id.
pub const ADMIN_SUBJECT: &str = "admin";

/// Inserted into request extensions after a successful token check, so
/// admin handlers can extract it without re-validating.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminSession {
    pub subject: String,
}

/// Authentication middleware guarding the admin routes.
///
/// Token extraction priority:
/// - First: `access_token` cookie (the admin console is browser-based)
/// - Second: `Authorization: Bearer <token>` header
///
/// Returns 401 when no token is provided, the token is invalid or expired,
/// or the subject is not the admin claim.
pub async fn auth(
    cookie_jar: CookieJar,
    State(app_state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let cookies = cookie_jar
        .get("access_token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| {
                    auth_value
                        .strip_prefix("Bearer ")
                        .map(|token| token.to_owned())
                })
        });

    let token = cookies
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::TokenNotProvided.to_string()))?;

    let subject = match token::decode_token(token, app_state.env.jwt_secret.as_bytes()) {
        Ok(subject) => subject,
        Err(_) => {
            return Err(HttpError::unauthorized(
                ErrorMessage::InvalidToken.to_string(),
            ));
        }
    };

    if subject != ADMIN_SUBJECT {
        return Err(HttpError::unauthorized(
            ErrorMessage::InvalidToken.to_string(),
        ));
    }

    req.extensions_mut().insert(AdminSession { subject });

    Ok(next.run(req).await)
}
