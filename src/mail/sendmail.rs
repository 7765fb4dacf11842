use lettre::{
    Message, SmtpTransport, Transport,
    message::header,
    transport::smtp::authentication::Credentials,
};
use std::env;

/// Send a plain-text email via the configured SMTP server.
///
/// SMTP settings come from the environment so the transport can be swapped
/// without touching config plumbing. Uses STARTTLS, usually on port 587.
/// A relay rejection is a failure the caller must see, not a log line.
pub async fn send_email(
    to_email: &str,
    reply_to: Option<&str>,
    subject: &str,
    body: String,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let smtp_username = env::var("SMTP_USERNAME")?;
    let smtp_password = env::var("SMTP_PASSWORD")?;
    let smtp_server = env::var("SMTP_SERVER")?;
    let smtp_port: u16 = env::var("SMTP_PORT")?.parse()?;

    let mut builder = Message::builder()
        .from(smtp_username.parse()?)
        .to(to_email.parse()?)
        .subject(subject)
        .header(header::ContentType::TEXT_PLAIN);

    // Replies should go to the visitor who wrote the message, not to the
    // sending account.
    if let Some(reply_to) = reply_to {
        builder = builder.reply_to(reply_to.parse()?);
    }

    let email = builder.body(body)?;

    let creds = Credentials::new(smtp_username, smtp_password);
    let mailer = SmtpTransport::starttls_relay(&smtp_server)?
        .credentials(creds)
        .port(smtp_port)
        .build();

    // The sync transport blocks on the SMTP round-trip, so it runs on the
    // blocking pool instead of parking an async worker.
    tokio::task::spawn_blocking(move || mailer.send(&email)).await??;

    tracing::info!("email sent to {}", to_email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn relay_failure_propagates() {
        // .invalid never resolves, so the send fails at the relay and the
        // error must reach the caller instead of being swallowed.
        unsafe {
            std::env::set_var("SMTP_USERNAME", "mittente@example.com");
            std::env::set_var("SMTP_PASSWORD", "segreto");
            std::env::set_var("SMTP_SERVER", "smtp.invalid");
            std::env::set_var("SMTP_PORT", "2525");
        }

        let result = send_email(
            "proprietario@example.com",
            Some("ospite@example.com"),
            "Nuovo messaggio",
            "Ciao".to_string(),
        )
        .await;

        assert!(result.is_err());
    }
}
