use crate::{
    AppState, dtos::ContactDto, dtos::Response, error::HttpError, mail::mails::send_contact_message,
};
use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use tracing::instrument;
use validator::Validate;

pub fn contact_handler() -> Router<AppState> {
    Router::new().route("/", post(send_message))
}

/// Contact form submission, forwarded to the owner's inbox
#[instrument(skip(app_state, body), fields(nome = %body.nome))]
pub async fn send_message(
    State(app_state): State<AppState>,
    Json(body): Json<ContactDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid contact input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let sent = send_contact_message(
        &app_state.env.contact_inbox,
        &body.nome,
        &body.email,
        &body.messaggio,
    )
    .await;

    if let Err(e) = sent {
        tracing::error!("Failed to send contact email: {}", e);
        return Err(HttpError::server_error("Failed to send message"));
    }

    Ok(Json(Response {
        status: "success",
        message: "Messaggio inviato".to_string(),
    }))
}
