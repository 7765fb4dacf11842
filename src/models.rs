use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// A top-level block of the public page ("about", "activities", ...)
///
/// Rows are seeded once at startup and never deleted; the admin console only
/// flips `is_visible` and rewrites `order_position`. Ascending sort by
/// `(order_position, id)` gives the render order, with the row id acting as
/// the insertion-order tiebreak.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Section {
    pub id: i32,
    pub section_name: String,
    pub section_title: String,
    pub order_position: i32,
    pub is_visible: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The single "Chi Siamo" record shown in the about section
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct About {
    pub id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    pub highlights: Vec<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Seasonal activity suggestion (facet: season)
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Activity {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub season: String,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Recommended restaurant (facet: category)
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub cuisine: Option<String>,
    pub price_range: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Point of interest near the apartment (facet: type)
///
/// The column is called `type` in the database; renamed here because `type`
/// is a Rust keyword.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Poi {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub poi_type: String,
    pub location: Option<String>,
    pub distance: Option<String>,
    pub opening_hours: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Frequently asked question (facet: category)
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Faq {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Guest review shown on the public page when `is_active`
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Review {
    pub id: i32,
    pub author_name: String,
    pub author_initials: String,
    pub rating: i32,
    pub review_text: String,
    pub time_ago: String,
    pub is_active: bool,
    pub order_position: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One gallery entry; identity is positional, reordering rewrites the list
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GalleryImage {
    pub url: String,
    pub label: Option<String>,
}

/// The single `site_images` row
///
/// `hero_url`/`logo_url` hold the currently displayed asset; the `_history`
/// columns are append-only lists (most-recent-last) the admin can promote
/// from or prune. The gallery is stored as one jsonb document because items
/// have no identity beyond their position.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct SiteImages {
    pub id: i32,
    pub hero_url: Option<String>,
    pub hero_history: Vec<String>,
    pub logo_url: Option<String>,
    pub logo_history: Vec<String>,
    pub gallery: Json<Vec<GalleryImage>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Promotional overlay definition
///
/// At most one row is expected to have `is_active = true`; the admin flow
/// deactivates siblings before activating a new one, there is no database
/// constraint behind it.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Popup {
    pub id: i32,
    pub title: String,
    pub message: String,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub image_url: Option<String>,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub is_active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub delay_seconds: i32,
    pub show_frequency_days: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Per-popup, per-day view/click counters; the row is created lazily on the
/// first event of the day and the counters only ever grow.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct PopupStat {
    pub id: i32,
    pub popup_id: i32,
    pub date: NaiveDate,
    pub views: i32,
    pub clicks: i32,
}
