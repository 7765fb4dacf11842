use super::DBClient;
use crate::dtos::InputReviewDto;
use crate::models::Review;
use crate::ordering::OrderedCollection;

/// Reviews database operations
pub trait ReviewExt {
    async fn get_reviews(&self) -> Result<Vec<Review>, sqlx::Error>;

    async fn get_active_reviews(&self) -> Result<Vec<Review>, sqlx::Error>;

    async fn create_review(&self, input: &InputReviewDto) -> Result<Review, sqlx::Error>;

    async fn update_review(
        &self,
        review_id: i32,
        input: &InputReviewDto,
    ) -> Result<Review, sqlx::Error>;

    async fn set_review_active(
        &self,
        review_id: i32,
        is_active: bool,
    ) -> Result<Review, sqlx::Error>;

    async fn delete_review(&self, review_id: i32) -> Result<(), sqlx::Error>;

    async fn reorder_reviews(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error>;
}

impl ReviewExt for DBClient {
    async fn get_reviews(&self) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY order_position ASC, id ASC")
            .fetch_all(&self.pool)
            .await
    }

    async fn get_active_reviews(&self) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT * FROM reviews
            WHERE is_active = true
            ORDER BY order_position ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn create_review(&self, input: &InputReviewDto) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews
                (author_name, author_initials, rating, review_text, time_ago, is_active, order_position)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.author_name)
        .bind(&input.author_initials)
        .bind(input.rating)
        .bind(&input.review_text)
        .bind(&input.time_ago)
        .bind(input.is_active)
        .bind(input.order_position)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_review(
        &self,
        review_id: i32,
        input: &InputReviewDto,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET author_name = $1, author_initials = $2, rating = $3, review_text = $4,
                time_ago = $5, is_active = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&input.author_name)
        .bind(&input.author_initials)
        .bind(input.rating)
        .bind(&input.review_text)
        .bind(&input.time_ago)
        .bind(input.is_active)
        .bind(review_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_review_active(
        &self,
        review_id: i32,
        is_active: bool,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            "UPDATE reviews SET is_active = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(is_active)
        .bind(review_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_review(&self, review_id: i32) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    async fn reorder_reviews(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error> {
        self.renumber(OrderedCollection::Reviews, ordered_ids).await
    }
}
