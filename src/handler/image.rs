use crate::{
    AppState,
    db::SiteImageExt,
    dtos::{DataResponse, HistoryDeleteDto, PromoteDto, ReorderDto, UploadResponse},
    error::HttpError,
    images::{self, ImageSlot},
    middleware::auth,
    models::{GalleryImage, SiteImages},
    ordering,
};
use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use tracing::instrument;
use validator::Validate;

pub fn image_handler(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_site_images))
        .route(
            "/{slot}",
            post(upload_image)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{slot}/promote",
            post(promote_image)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/{slot}/history/delete",
            post(delete_from_history)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/gallery/reorder",
            put(reorder_gallery)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), auth)),
        )
        .route(
            "/gallery/{index}",
            delete(remove_gallery_image)
                .route_layer(middleware::from_fn_with_state(app_state, auth)),
        )
}

/// The image placeholders with a current/history pair. The gallery is not
/// one of these; it is a positional list handled by its own routes.
enum Slot {
    Hero,
    Logo,
}

impl Slot {
    fn parse(name: &str) -> Option<Slot> {
        match name {
            "hero" => Some(Slot::Hero),
            "logo" => Some(Slot::Logo),
            _ => None,
        }
    }
}

/// The registry row split into workable parts, defaulting to empty when no
/// row has been saved yet.
fn split_row(row: Option<SiteImages>) -> (ImageSlot, ImageSlot, Vec<GalleryImage>) {
    match row {
        Some(row) => (
            ImageSlot::new(row.hero_url, row.hero_history),
            ImageSlot::new(row.logo_url, row.logo_history),
            row.gallery.0,
        ),
        None => (
            ImageSlot::new(None, Vec::new()),
            ImageSlot::new(None, Vec::new()),
            Vec::new(),
        ),
    }
}

/// Public read of the whole image registry; `data` is null before the
/// first save.
pub async fn get_site_images(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let images: Option<SiteImages> =
        app_state.db_client.get_site_images().await.unwrap_or_else(|e| {
            tracing::error!("DB error, getting site images: {}", e);
            None
        });

    Ok(Json(DataResponse::success(images)))
}

/// Multipart upload into a slot ("hero", "logo") or the gallery.
///
/// The file is validated before any storage call; a rejected upload never
/// leaves the process. Gallery uploads may carry a `label` text field.
#[instrument(skip(app_state, multipart))]
pub async fn upload_image(
    Path(slot): Path<String>,
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    if Slot::parse(&slot).is_none() && slot != "gallery" {
        return Err(HttpError::not_found("Unknown image slot"));
    }

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut label: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?
    {
        match field.name() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| HttpError::bad_request(e.to_string()))?;
                file = Some((content_type, bytes.to_vec()));
            }
            Some("label") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| HttpError::bad_request(e.to_string()))?;
                if !text.is_empty() {
                    label = Some(text);
                }
            }
            _ => {}
        }
    }

    let (content_type, bytes) =
        file.ok_or_else(|| HttpError::bad_request("No file field in upload"))?;

    images::validate_image(bytes.len(), &content_type).map_err(|e| {
        tracing::error!("Rejected upload for slot {}: {}", slot, e);
        HttpError::bad_request(e.to_string())
    })?;

    let extension = content_type.strip_prefix("image/").unwrap_or("bin");
    let object_path = format!(
        "{}_{}.{}",
        slot,
        chrono::Utc::now().timestamp_millis(),
        extension
    );

    let url = app_state
        .storage_client
        .upload(&object_path, bytes, &content_type)
        .await?;

    let row = app_state
        .db_client
        .get_site_images()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let (mut hero, mut logo, mut gallery) = split_row(row);

    match Slot::parse(&slot) {
        Some(Slot::Hero) => hero.record_upload(url.clone()),
        Some(Slot::Logo) => logo.record_upload(url.clone()),
        None => gallery.push(GalleryImage {
            url: url.clone(),
            label,
        }),
    }

    app_state
        .db_client
        .save_site_images(&hero, &logo, &gallery)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(slot = %slot, url = %url, "Image uploaded");
    Ok(Json(UploadResponse {
        status: "success".to_string(),
        location: url,
    }))
}

/// Bring a history entry back as the slot's current asset
#[instrument(skip(app_state, body))]
pub async fn promote_image(
    Path(slot): Path<String>,
    State(app_state): State<AppState>,
    Json(body): Json<PromoteDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let slot = Slot::parse(&slot).ok_or_else(|| HttpError::not_found("Unknown image slot"))?;

    let row = app_state
        .db_client
        .get_site_images()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let (mut hero, mut logo, gallery) = split_row(row);

    let target = match slot {
        Slot::Hero => &mut hero,
        Slot::Logo => &mut logo,
    };
    target.promote(&body.url).map_err(|e| {
        tracing::error!("Promote failed: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let saved = app_state
        .db_client
        .save_site_images(&hero, &logo, &gallery)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(DataResponse::success(saved)))
}

/// Prune one url from a slot's history. The current asset stays untouched.
#[instrument(skip(app_state, body))]
pub async fn delete_from_history(
    Path(slot): Path<String>,
    State(app_state): State<AppState>,
    Json(body): Json<HistoryDeleteDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let slot = Slot::parse(&slot).ok_or_else(|| HttpError::not_found("Unknown image slot"))?;

    let row = app_state
        .db_client
        .get_site_images()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let (mut hero, mut logo, gallery) = split_row(row);

    match slot {
        Slot::Hero => hero.delete_from_history(&body.url),
        Slot::Logo => logo.delete_from_history(&body.url),
    }

    let saved = app_state
        .db_client
        .save_site_images(&hero, &logo, &gallery)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(DataResponse::success(saved)))
}

/// Remove a gallery entry by position
#[instrument(skip(app_state))]
pub async fn remove_gallery_image(
    Path(index): Path<usize>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let row = app_state
        .db_client
        .get_site_images()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let (hero, logo, mut gallery) = split_row(row);

    if index >= gallery.len() {
        return Err(HttpError::bad_request("Gallery index out of range"));
    }
    gallery.remove(index);

    let saved = app_state
        .db_client
        .save_site_images(&hero, &logo, &gallery)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(DataResponse::success(saved)))
}

/// Drag gesture over the gallery list
#[instrument(skip(app_state))]
pub async fn reorder_gallery(
    State(app_state): State<AppState>,
    Json(body): Json<ReorderDto>,
) -> Result<impl IntoResponse, HttpError> {
    let row = app_state
        .db_client
        .get_site_images()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let (hero, logo, gallery) = split_row(row);

    if body.from >= gallery.len() || body.to >= gallery.len() {
        return Err(HttpError::bad_request("Reorder index out of range"));
    }

    let next = match ordering::reorder(&gallery, body.from, body.to) {
        Some(next) => next,
        None => {
            let current = app_state
                .db_client
                .get_site_images()
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;
            return Ok(Json(DataResponse::success(current)));
        }
    };

    let saved = app_state
        .db_client
        .save_site_images(&hero, &logo, &next)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(DataResponse::success(Some(saved))))
}
