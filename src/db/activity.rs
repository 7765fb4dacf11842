use super::DBClient;
use crate::dtos::InputActivityDto;
use crate::models::Activity;
use crate::ordering::OrderedCollection;

/// Activities database operations
pub trait ActivityExt {
    async fn get_activities(&self) -> Result<Vec<Activity>, sqlx::Error>;

    async fn get_active_activities(&self) -> Result<Vec<Activity>, sqlx::Error>;

    async fn create_activity(&self, input: &InputActivityDto) -> Result<Activity, sqlx::Error>;

    async fn update_activity(
        &self,
        activity_id: i32,
        input: &InputActivityDto,
    ) -> Result<Activity, sqlx::Error>;

    async fn set_activity_active(
        &self,
        activity_id: i32,
        is_active: bool,
    ) -> Result<Activity, sqlx::Error>;

    async fn delete_activity(&self, activity_id: i32) -> Result<(), sqlx::Error>;

    async fn reorder_activities(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error>;
}

impl ActivityExt for DBClient {
    async fn get_activities(&self) -> Result<Vec<Activity>, sqlx::Error> {
        // Season first so the admin list groups the way the public tabs do.
        sqlx::query_as::<_, Activity>(
            "SELECT * FROM activities ORDER BY season ASC, order_position ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_active_activities(&self) -> Result<Vec<Activity>, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            r#"
            SELECT * FROM activities
            WHERE is_active = true
            ORDER BY season ASC, order_position ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn create_activity(&self, input: &InputActivityDto) -> Result<Activity, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities
                (title, description, season, location, duration, price, image_url, link, is_active, order_position)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.season)
        .bind(&input.location)
        .bind(&input.duration)
        .bind(&input.price)
        .bind(&input.image_url)
        .bind(&input.link)
        .bind(input.is_active)
        .bind(input.order_position)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_activity(
        &self,
        activity_id: i32,
        input: &InputActivityDto,
    ) -> Result<Activity, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            r#"
            UPDATE activities
            SET title = $1, description = $2, season = $3, location = $4, duration = $5,
                price = $6, image_url = $7, link = $8, is_active = $9, updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.season)
        .bind(&input.location)
        .bind(&input.duration)
        .bind(&input.price)
        .bind(&input.image_url)
        .bind(&input.link)
        .bind(input.is_active)
        .bind(activity_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_activity_active(
        &self,
        activity_id: i32,
        is_active: bool,
    ) -> Result<Activity, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            "UPDATE activities SET is_active = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(is_active)
        .bind(activity_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_activity(&self, activity_id: i32) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(activity_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    async fn reorder_activities(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error> {
        self.renumber(OrderedCollection::Activities, ordered_ids)
            .await
    }
}
