//! Image slot logic for the hero and logo placeholders.
//!
//! Each slot has one current asset plus an append-only history
//! (most-recent-last). Uploads and promotions swap urls between the two;
//! the current asset is never allowed to sit in the history at the same
//! time. All of this is pure list manipulation — the handlers read the
//! `site_images` row, run these methods, and write the row back.

use std::fmt;

/// Uploads above this size are rejected before any storage call.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, PartialEq)]
pub enum ImageError {
    TooLarge,
    NotAnImage,
    NotInHistory,
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ImageError::TooLarge => "File too large, maximum size is 5 MB",
            ImageError::NotAnImage => "File must be an image",
            ImageError::NotInHistory => "Url is not in the slot history",
        };
        write!(f, "{}", message)
    }
}

impl std::error::Error for ImageError {}

/// Validate an upload before it touches the network.
pub fn validate_image(size: usize, content_type: &str) -> Result<(), ImageError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ImageError::TooLarge);
    }
    if !content_type.starts_with("image/") {
        return Err(ImageError::NotAnImage);
    }
    Ok(())
}

/// One named image placeholder (hero, logo): a current url plus history.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSlot {
    pub current_url: Option<String>,
    pub history: Vec<String>,
}

impl ImageSlot {
    pub fn new(current_url: Option<String>, history: Vec<String>) -> Self {
        ImageSlot {
            current_url,
            history,
        }
    }

    /// A fresh upload becomes the current asset; the previous current is
    /// pushed into history unless it is already there.
    pub fn record_upload(&mut self, new_url: String) {
        if let Some(previous) = self.current_url.take() {
            if !self.history.contains(&previous) {
                self.history.push(previous);
            }
        }
        self.current_url = Some(new_url);
    }

    /// Swap a history entry with the current asset. Net history length is
    /// unchanged: one url leaves the history and the old current enters it.
    pub fn promote(&mut self, url: &str) -> Result<(), ImageError> {
        let index = self
            .history
            .iter()
            .position(|entry| entry == url)
            .ok_or(ImageError::NotInHistory)?;

        self.history.remove(index);
        if let Some(previous) = self.current_url.take() {
            if !self.history.contains(&previous) {
                self.history.push(previous);
            }
        }
        self.current_url = Some(url.to_string());
        Ok(())
    }

    /// Remove a url from the history only. The current asset is never
    /// touched here, even when the same url is asked for — it only changes
    /// through `record_upload` or `promote`.
    pub fn delete_from_history(&mut self, url: &str) {
        self.history.retain(|entry| entry != url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_upload_is_rejected() {
        let six_mib = 6 * 1024 * 1024;
        assert_eq!(validate_image(six_mib, "image/jpeg"), Err(ImageError::TooLarge));
    }

    #[test]
    fn non_image_content_type_is_rejected() {
        assert_eq!(
            validate_image(1024, "application/pdf"),
            Err(ImageError::NotAnImage)
        );
    }

    #[test]
    fn valid_jpeg_passes_validation() {
        let two_mib = 2 * 1024 * 1024;
        assert_eq!(validate_image(two_mib, "image/jpeg"), Ok(()));
    }

    #[test]
    fn upload_pushes_previous_current_into_history() {
        let mut slot = ImageSlot::new(Some("a.jpg".to_string()), vec![]);
        slot.record_upload("b.jpg".to_string());

        assert_eq!(slot.current_url.as_deref(), Some("b.jpg"));
        assert_eq!(slot.history, vec!["a.jpg".to_string()]);
    }

    #[test]
    fn upload_into_empty_slot_leaves_history_empty() {
        let mut slot = ImageSlot::new(None, vec![]);
        slot.record_upload("a.jpg".to_string());

        assert_eq!(slot.current_url.as_deref(), Some("a.jpg"));
        assert!(slot.history.is_empty());
    }

    #[test]
    fn history_is_deduplicated_by_url() {
        let mut slot = ImageSlot::new(Some("a.jpg".to_string()), vec!["a.jpg".to_string()]);
        slot.record_upload("b.jpg".to_string());

        assert_eq!(slot.history, vec!["a.jpg".to_string()]);
    }

    #[test]
    fn promote_swaps_current_with_history_entry() {
        let mut slot = ImageSlot::new(
            Some("current.jpg".to_string()),
            vec!["old1.jpg".to_string(), "old2.jpg".to_string()],
        );

        slot.promote("old1.jpg").unwrap();

        assert_eq!(slot.current_url.as_deref(), Some("old1.jpg"));
        assert!(!slot.history.contains(&"old1.jpg".to_string()));
        assert_eq!(
            slot.history
                .iter()
                .filter(|url| url.as_str() == "current.jpg")
                .count(),
            1
        );
        // Swap, not growth.
        assert_eq!(slot.history.len(), 2);
    }

    #[test]
    fn promote_of_unknown_url_fails_and_changes_nothing() {
        let mut slot = ImageSlot::new(Some("a.jpg".to_string()), vec!["b.jpg".to_string()]);
        let before = slot.clone();

        assert_eq!(slot.promote("missing.jpg"), Err(ImageError::NotInHistory));
        assert_eq!(slot, before);
    }

    #[test]
    fn delete_from_history_never_touches_current() {
        let mut slot = ImageSlot::new(
            Some("a.jpg".to_string()),
            vec!["a.jpg".to_string(), "b.jpg".to_string()],
        );

        slot.delete_from_history("a.jpg");

        assert_eq!(slot.current_url.as_deref(), Some("a.jpg"));
        assert_eq!(slot.history, vec!["b.jpg".to_string()]);
    }

    #[test]
    fn current_never_coexists_with_itself_in_history_after_promote() {
        let mut slot = ImageSlot::new(Some("a.jpg".to_string()), vec!["b.jpg".to_string()]);
        slot.promote("b.jpg").unwrap();
        slot.record_upload("c.jpg".to_string());
        slot.promote("a.jpg").unwrap();

        let current = slot.current_url.clone().unwrap();
        assert!(!slot.history.contains(&current));
    }
}
