use super::DBClient;
use crate::dtos::InputAboutDto;
use crate::models::About;

/// About-section database operations. The table holds at most one row.
pub trait AboutExt {
    async fn get_about(&self) -> Result<Option<About>, sqlx::Error>;

    async fn create_about(&self, input: &InputAboutDto) -> Result<About, sqlx::Error>;

    async fn update_about(&self, about_id: i32, input: &InputAboutDto)
    -> Result<About, sqlx::Error>;
}

impl AboutExt for DBClient {
    async fn get_about(&self) -> Result<Option<About>, sqlx::Error> {
        sqlx::query_as::<_, About>("SELECT * FROM about_section ORDER BY id ASC LIMIT 1")
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_about(&self, input: &InputAboutDto) -> Result<About, sqlx::Error> {
        sqlx::query_as::<_, About>(
            r#"
            INSERT INTO about_section
                (title, subtitle, description, image_url, highlights, cta_text, cta_link)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.subtitle)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(&input.highlights)
        .bind(&input.cta_text)
        .bind(&input.cta_link)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_about(
        &self,
        about_id: i32,
        input: &InputAboutDto,
    ) -> Result<About, sqlx::Error> {
        sqlx::query_as::<_, About>(
            r#"
            UPDATE about_section
            SET title = $1, subtitle = $2, description = $3, image_url = $4,
                highlights = $5, cta_text = $6, cta_link = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.subtitle)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(&input.highlights)
        .bind(&input.cta_text)
        .bind(&input.cta_link)
        .bind(about_id)
        .fetch_one(&self.pool)
        .await
    }
}
