use super::DBClient;
use crate::dtos::InputPoiDto;
use crate::models::Poi;
use crate::ordering::OrderedCollection;

/// Points-of-interest database operations
pub trait PoiExt {
    async fn get_pois(&self) -> Result<Vec<Poi>, sqlx::Error>;

    async fn get_active_pois(&self) -> Result<Vec<Poi>, sqlx::Error>;

    async fn create_poi(&self, input: &InputPoiDto) -> Result<Poi, sqlx::Error>;

    async fn update_poi(&self, poi_id: i32, input: &InputPoiDto) -> Result<Poi, sqlx::Error>;

    async fn set_poi_active(&self, poi_id: i32, is_active: bool) -> Result<Poi, sqlx::Error>;

    async fn delete_poi(&self, poi_id: i32) -> Result<(), sqlx::Error>;

    async fn reorder_pois(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error>;
}

impl PoiExt for DBClient {
    async fn get_pois(&self) -> Result<Vec<Poi>, sqlx::Error> {
        sqlx::query_as::<_, Poi>("SELECT * FROM poi ORDER BY order_position ASC, id ASC")
            .fetch_all(&self.pool)
            .await
    }

    async fn get_active_pois(&self) -> Result<Vec<Poi>, sqlx::Error> {
        sqlx::query_as::<_, Poi>(
            r#"
            SELECT * FROM poi
            WHERE is_active = true
            ORDER BY order_position ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn create_poi(&self, input: &InputPoiDto) -> Result<Poi, sqlx::Error> {
        sqlx::query_as::<_, Poi>(
            r#"
            INSERT INTO poi
                (name, description, type, location, distance, opening_hours, price, image_url, link, is_active, order_position)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.poi_type)
        .bind(&input.location)
        .bind(&input.distance)
        .bind(&input.opening_hours)
        .bind(&input.price)
        .bind(&input.image_url)
        .bind(&input.link)
        .bind(input.is_active)
        .bind(input.order_position)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_poi(&self, poi_id: i32, input: &InputPoiDto) -> Result<Poi, sqlx::Error> {
        sqlx::query_as::<_, Poi>(
            r#"
            UPDATE poi
            SET name = $1, description = $2, type = $3, location = $4, distance = $5,
                opening_hours = $6, price = $7, image_url = $8, link = $9,
                is_active = $10, updated_at = NOW()
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.poi_type)
        .bind(&input.location)
        .bind(&input.distance)
        .bind(&input.opening_hours)
        .bind(&input.price)
        .bind(&input.image_url)
        .bind(&input.link)
        .bind(input.is_active)
        .bind(poi_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_poi_active(&self, poi_id: i32, is_active: bool) -> Result<Poi, sqlx::Error> {
        sqlx::query_as::<_, Poi>(
            "UPDATE poi SET is_active = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(is_active)
        .bind(poi_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_poi(&self, poi_id: i32) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM poi WHERE id = $1")
            .bind(poi_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    async fn reorder_pois(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error> {
        self.renumber(OrderedCollection::Poi, ordered_ids).await
    }
}
