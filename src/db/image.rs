use super::DBClient;
use crate::images::ImageSlot;
use crate::models::{GalleryImage, SiteImages};
use sqlx::types::Json;

/// Site-wide image registry operations. The table holds a single row that
/// carries the hero, logo and gallery together.
pub trait SiteImageExt {
    async fn get_site_images(&self) -> Result<Option<SiteImages>, sqlx::Error>;

    /// Persists the whole registry. Inserts the row on first save, updates
    /// it afterwards.
    async fn save_site_images(
        &self,
        hero: &ImageSlot,
        logo: &ImageSlot,
        gallery: &[GalleryImage],
    ) -> Result<SiteImages, sqlx::Error>;
}

impl SiteImageExt for DBClient {
    async fn get_site_images(&self) -> Result<Option<SiteImages>, sqlx::Error> {
        sqlx::query_as::<_, SiteImages>("SELECT * FROM site_images ORDER BY id ASC LIMIT 1")
            .fetch_optional(&self.pool)
            .await
    }

    async fn save_site_images(
        &self,
        hero: &ImageSlot,
        logo: &ImageSlot,
        gallery: &[GalleryImage],
    ) -> Result<SiteImages, sqlx::Error> {
        let existing = self.get_site_images().await?;

        let gallery = Json(gallery.to_vec());

        match existing {
            Some(row) => {
                sqlx::query_as::<_, SiteImages>(
                    r#"
                    UPDATE site_images
                    SET hero_url = $1, hero_history = $2,
                        logo_url = $3, logo_history = $4,
                        gallery = $5, updated_at = NOW()
                    WHERE id = $6
                    RETURNING *
                    "#,
                )
                .bind(&hero.current_url)
                .bind(&hero.history)
                .bind(&logo.current_url)
                .bind(&logo.history)
                .bind(&gallery)
                .bind(row.id)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, SiteImages>(
                    r#"
                    INSERT INTO site_images
                        (hero_url, hero_history, logo_url, logo_history, gallery)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING *
                    "#,
                )
                .bind(&hero.current_url)
                .bind(&hero.history)
                .bind(&logo.current_url)
                .bind(&logo.history)
                .bind(&gallery)
                .fetch_one(&self.pool)
                .await
            }
        }
    }
}
