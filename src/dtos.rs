use crate::models::Popup;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// DTOs define the structure of data exchanged with clients. They are kept
// separate from the database models so the wire format is explicit and the
// validator derives live in one place.

// ============================================================================
// Generic response envelopes
// ============================================================================

/// Generic success response
#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

/// Single-record response wrapper
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub status: String,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn success(data: T) -> Self {
        DataResponse {
            status: "success".to_string(),
            data,
        }
    }
}

/// List response wrapper
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub status: String,
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn success(data: Vec<T>) -> Self {
        ListResponse {
            status: "success".to_string(),
            data,
        }
    }
}

// ============================================================================
// Auth DTOs
// ============================================================================

/// Admin login request — the back-office is gated by one shared secret
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginDto {
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login success response with the session token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponseDto {
    pub status: String,
    pub access_token: String,
}

// ============================================================================
// Ordering & visibility DTOs
// ============================================================================

/// Drag-gesture result: move the item at `from` to position `to`
#[derive(Debug, Deserialize, Serialize)]
pub struct ReorderDto {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct VisibilityDto {
    pub is_visible: bool,
}

// ============================================================================
// Content DTOs (one input type per collection, used for create and update)
// ============================================================================

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct InputAboutDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub subtitle: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct InputActivityDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(custom(function = "validate_season"))]
    pub season: String,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_position: i32,
}

/// Season facet is a closed set, matching the public site's filter tabs
fn validate_season(season: &str) -> Result<(), validator::ValidationError> {
    match season {
        "estate" | "inverno" | "primavera" | "autunno" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_season")),
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct InputRestaurantDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub cuisine: Option<String>,
    pub price_range: Option<String>,
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_position: i32,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct InputPoiDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Type is required"))]
    #[serde(rename = "type")]
    pub poi_type: String,
    pub location: Option<String>,
    pub distance: Option<String>,
    pub opening_hours: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_position: i32,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct InputFaqDto {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,
    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,
    #[validate(custom(function = "validate_faq_category"))]
    pub category: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_position: i32,
}

fn validate_faq_category(category: &str) -> Result<(), validator::ValidationError> {
    match category {
        "checkin" | "appartamento" | "parcheggio" | "animali" | "zona" | "altro" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_category")),
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct InputReviewDto {
    #[validate(length(min = 1, message = "Author name is required"))]
    pub author_name: String,
    #[validate(length(min = 1, max = 4, message = "Initials must be 1 to 4 characters"))]
    pub author_initials: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[validate(length(min = 1, message = "Review text is required"))]
    pub review_text: String,
    #[validate(length(min = 1, message = "Relative time is required"))]
    pub time_ago: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_position: i32,
}

fn default_true() -> bool {
    true
}

fn default_rating() -> i32 {
    5
}

// ============================================================================
// Image DTOs
// ============================================================================

/// Promote a history entry to the current slot asset
#[derive(Validate, Debug, Deserialize)]
pub struct PromoteDto {
    #[validate(length(min = 1, message = "Url is required"))]
    pub url: String,
}

/// Remove one url from a slot's history
#[derive(Validate, Debug, Deserialize)]
pub struct HistoryDeleteDto {
    #[validate(length(min = 1, message = "Url is required"))]
    pub url: String,
}

/// Upload result sent back to the admin console
#[derive(Serialize)]
pub struct UploadResponse {
    pub status: String,
    pub location: String,
}

// ============================================================================
// Popup DTOs
// ============================================================================

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct InputPopupDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub image_url: Option<String>,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0, max = 600, message = "Delay must be between 0 and 600 seconds"))]
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: i32,
    #[validate(range(min = 0, max = 365, message = "Frequency must be between 0 and 365 days"))]
    #[serde(default = "default_show_frequency_days")]
    pub show_frequency_days: i32,
}

fn default_delay_seconds() -> i32 {
    3
}

fn default_show_frequency_days() -> i32 {
    7
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ActivateDto {
    pub is_active: bool,
}

#[derive(Debug, Validate, Deserialize)]
pub struct StatsQueryDto {
    #[validate(range(min = 1, max = 365, message = "Days must be between 1 and 365"))]
    pub days: Option<i64>,
}

/// Answer for the public eligibility check: when `eligible`, the client
/// waits `delay_seconds` and then shows `popup` (reporting the view event).
#[derive(Debug, Serialize)]
pub struct EligibilityResponseDto {
    pub status: String,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<Popup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_seconds: Option<i32>,
}

// ============================================================================
// Contact form DTO
// ============================================================================

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContactDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub nome: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
    #[validate(length(min = 1, max = 5000, message = "Message must be between 1 and 5000 characters"))]
    pub messaggio: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_rating_outside_range_is_rejected() {
        let mut dto = InputReviewDto {
            author_name: "Anna".to_string(),
            author_initials: "AB".to_string(),
            rating: 6,
            review_text: "Bellissimo soggiorno".to_string(),
            time_ago: "2 mesi fa".to_string(),
            is_active: true,
            order_position: 0,
        };
        assert!(dto.validate().is_err());

        dto.rating = 0;
        assert!(dto.validate().is_err());

        dto.rating = 5;
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn activity_season_is_a_closed_set() {
        let mut dto = InputActivityDto {
            title: "Passeggiata".to_string(),
            description: "Sentiero panoramico".to_string(),
            season: "monsone".to_string(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        dto.season = "estate".to_string();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn contact_requires_valid_email() {
        let dto = ContactDto {
            nome: "Luca".to_string(),
            email: "not-an-email".to_string(),
            messaggio: "Ciao".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
