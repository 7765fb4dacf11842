use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::ErrorMessage;

/// Argon2 is intentionally slow; unbounded input length would let a single
/// login request burn CPU for as long as the attacker likes.
const MAX_PASSWORD_LENGTH: usize = 64;

/// Hash a password with Argon2id, returning a PHC-format string.
///
/// The salt is generated per call, so hashing the same password twice
/// produces different strings. The output embeds the salt and parameters,
/// which is all `compare` needs.
pub fn hash(password: impl Into<String>) -> Result<String, ErrorMessage> {
    let password = password.into();

    if password.is_empty() {
        return Err(ErrorMessage::EmptyPassword);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ErrorMessage::ExceededMaxPasswordLength(MAX_PASSWORD_LENGTH));
    }

    let salt = SaltString::generate(&mut OsRng);

    let hashed_password = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| ErrorMessage::HashingError)?
        .to_string();

    Ok(hashed_password)
}

/// Verify a password against a stored PHC-format hash.
///
/// Returns `Ok(false)` on a mismatch; `Err` only when the input or the
/// stored hash itself is unusable.
pub fn compare(password: &str, hashed_password: &str) -> Result<bool, ErrorMessage> {
    if password.is_empty() {
        return Err(ErrorMessage::EmptyPassword);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ErrorMessage::ExceededMaxPasswordLength(MAX_PASSWORD_LENGTH));
    }

    let parsed_hash =
        PasswordHash::new(hashed_password).map_err(|_| ErrorMessage::InvalidHashFormat)?;

    let password_matched = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_or(false, |_| true);

    Ok(password_matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_compare_round_trip() {
        let hashed = hash("corretto").unwrap();
        assert!(compare("corretto", &hashed).unwrap());
        assert!(!compare("sbagliato", &hashed).unwrap());
    }

    #[test]
    fn empty_password_rejected() {
        assert!(matches!(hash(""), Err(ErrorMessage::EmptyPassword)));
    }

    #[test]
    fn oversized_password_rejected() {
        let long = "x".repeat(MAX_PASSWORD_LENGTH + 1);
        assert!(matches!(
            hash(long),
            Err(ErrorMessage::ExceededMaxPasswordLength(_))
        ));
    }

    #[test]
    fn garbage_hash_rejected() {
        assert!(matches!(
            compare("anything", "not-a-phc-string"),
            Err(ErrorMessage::InvalidHashFormat)
        ));
    }
}
