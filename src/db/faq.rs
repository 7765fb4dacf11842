use super::DBClient;
use crate::dtos::InputFaqDto;
use crate::models::Faq;
use crate::ordering::OrderedCollection;

/// FAQ database operations
pub trait FaqExt {
    async fn get_faqs(&self) -> Result<Vec<Faq>, sqlx::Error>;

    async fn get_active_faqs(&self) -> Result<Vec<Faq>, sqlx::Error>;

    async fn create_faq(&self, input: &InputFaqDto) -> Result<Faq, sqlx::Error>;

    async fn update_faq(&self, faq_id: i32, input: &InputFaqDto) -> Result<Faq, sqlx::Error>;

    async fn set_faq_active(&self, faq_id: i32, is_active: bool) -> Result<Faq, sqlx::Error>;

    async fn delete_faq(&self, faq_id: i32) -> Result<(), sqlx::Error>;

    async fn reorder_faqs(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error>;
}

impl FaqExt for DBClient {
    async fn get_faqs(&self) -> Result<Vec<Faq>, sqlx::Error> {
        // Category first, matching the grouped accordion on the public page.
        sqlx::query_as::<_, Faq>(
            "SELECT * FROM faqs ORDER BY category ASC, order_position ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_active_faqs(&self) -> Result<Vec<Faq>, sqlx::Error> {
        sqlx::query_as::<_, Faq>(
            r#"
            SELECT * FROM faqs
            WHERE is_active = true
            ORDER BY category ASC, order_position ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn create_faq(&self, input: &InputFaqDto) -> Result<Faq, sqlx::Error> {
        sqlx::query_as::<_, Faq>(
            r#"
            INSERT INTO faqs (question, answer, category, is_active, order_position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.question)
        .bind(&input.answer)
        .bind(&input.category)
        .bind(input.is_active)
        .bind(input.order_position)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_faq(&self, faq_id: i32, input: &InputFaqDto) -> Result<Faq, sqlx::Error> {
        sqlx::query_as::<_, Faq>(
            r#"
            UPDATE faqs
            SET question = $1, answer = $2, category = $3, is_active = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&input.question)
        .bind(&input.answer)
        .bind(&input.category)
        .bind(input.is_active)
        .bind(faq_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_faq_active(&self, faq_id: i32, is_active: bool) -> Result<Faq, sqlx::Error> {
        sqlx::query_as::<_, Faq>(
            "UPDATE faqs SET is_active = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(is_active)
        .bind(faq_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_faq(&self, faq_id: i32) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(faq_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    async fn reorder_faqs(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error> {
        self.renumber(OrderedCollection::Faqs, ordered_ids).await
    }
}
