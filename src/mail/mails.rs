use super::sendmail::send_email;

/// Forwards a contact-form submission to the owner's inbox.
pub async fn send_contact_message(
    contact_inbox: &str,
    nome: &str,
    email: &str,
    messaggio: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let subject = format!("Nuovo messaggio dal sito da {}", nome);
    let body = format!(
        "Nome: {}\nEmail: {}\n\nMessaggio:\n{}\n",
        nome, email, messaggio
    );

    send_email(contact_inbox, Some(email), &subject, body).await
}
