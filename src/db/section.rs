use super::DBClient;
use crate::models::Section;
use crate::ordering::OrderedCollection;

/// The sections every deployment starts with. Seeding is idempotent, so a
/// restart never duplicates or resets rows the admin already touched.
const SEED_SECTIONS: [(&str, &str); 5] = [
    ("about", "Chi Siamo"),
    ("activities", "Attività"),
    ("restaurants", "Ristoranti"),
    ("poi", "Punti di Interesse"),
    ("faqs", "Domande Frequenti"),
];

/// Section ordering and visibility operations
pub trait SectionExt {
    async fn get_sections(&self) -> Result<Vec<Section>, sqlx::Error>;

    async fn get_visible_sections(&self) -> Result<Vec<Section>, sqlx::Error>;

    /// Idempotent: writing the value a section already has is a state
    /// no-op and succeeds.
    async fn set_section_visible(
        &self,
        section_name: &str,
        is_visible: bool,
    ) -> Result<Section, sqlx::Error>;

    async fn reorder_sections(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error>;

    async fn seed_sections(&self) -> Result<(), sqlx::Error>;
}

impl SectionExt for DBClient {
    async fn get_sections(&self) -> Result<Vec<Section>, sqlx::Error> {
        sqlx::query_as::<_, Section>(
            "SELECT * FROM section_visibility ORDER BY order_position ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_visible_sections(&self) -> Result<Vec<Section>, sqlx::Error> {
        sqlx::query_as::<_, Section>(
            r#"
            SELECT * FROM section_visibility
            WHERE is_visible = true
            ORDER BY order_position ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn set_section_visible(
        &self,
        section_name: &str,
        is_visible: bool,
    ) -> Result<Section, sqlx::Error> {
        sqlx::query_as::<_, Section>(
            r#"
            UPDATE section_visibility
            SET is_visible = $1, updated_at = NOW()
            WHERE section_name = $2
            RETURNING *
            "#,
        )
        .bind(is_visible)
        .bind(section_name)
        .fetch_one(&self.pool)
        .await
    }

    async fn reorder_sections(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error> {
        self.renumber(OrderedCollection::Sections, ordered_ids)
            .await
    }

    async fn seed_sections(&self) -> Result<(), sqlx::Error> {
        for (position, (name, title)) in SEED_SECTIONS.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO section_visibility (section_name, section_title, order_position, is_visible)
                VALUES ($1, $2, $3, true)
                ON CONFLICT (section_name) DO NOTHING
                "#,
            )
            .bind(name)
            .bind(title)
            .bind(position as i32)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
