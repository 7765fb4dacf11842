use super::DBClient;
use crate::dtos::InputRestaurantDto;
use crate::models::Restaurant;
use crate::ordering::OrderedCollection;

/// Restaurants database operations
pub trait RestaurantExt {
    async fn get_restaurants(&self) -> Result<Vec<Restaurant>, sqlx::Error>;

    async fn get_active_restaurants(&self) -> Result<Vec<Restaurant>, sqlx::Error>;

    async fn create_restaurant(
        &self,
        input: &InputRestaurantDto,
    ) -> Result<Restaurant, sqlx::Error>;

    async fn update_restaurant(
        &self,
        restaurant_id: i32,
        input: &InputRestaurantDto,
    ) -> Result<Restaurant, sqlx::Error>;

    async fn set_restaurant_active(
        &self,
        restaurant_id: i32,
        is_active: bool,
    ) -> Result<Restaurant, sqlx::Error>;

    async fn delete_restaurant(&self, restaurant_id: i32) -> Result<(), sqlx::Error>;

    async fn reorder_restaurants(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error>;
}

impl RestaurantExt for DBClient {
    async fn get_restaurants(&self) -> Result<Vec<Restaurant>, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(
            "SELECT * FROM restaurants ORDER BY order_position ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_active_restaurants(&self) -> Result<Vec<Restaurant>, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT * FROM restaurants
            WHERE is_active = true
            ORDER BY order_position ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn create_restaurant(
        &self,
        input: &InputRestaurantDto,
    ) -> Result<Restaurant, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(
            r#"
            INSERT INTO restaurants
                (name, description, category, address, phone, website, cuisine, price_range, image_url, is_active, order_position)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.website)
        .bind(&input.cuisine)
        .bind(&input.price_range)
        .bind(&input.image_url)
        .bind(input.is_active)
        .bind(input.order_position)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_restaurant(
        &self,
        restaurant_id: i32,
        input: &InputRestaurantDto,
    ) -> Result<Restaurant, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(
            r#"
            UPDATE restaurants
            SET name = $1, description = $2, category = $3, address = $4, phone = $5,
                website = $6, cuisine = $7, price_range = $8, image_url = $9,
                is_active = $10, updated_at = NOW()
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.website)
        .bind(&input.cuisine)
        .bind(&input.price_range)
        .bind(&input.image_url)
        .bind(input.is_active)
        .bind(restaurant_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_restaurant_active(
        &self,
        restaurant_id: i32,
        is_active: bool,
    ) -> Result<Restaurant, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(
            "UPDATE restaurants SET is_active = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(is_active)
        .bind(restaurant_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_restaurant(&self, restaurant_id: i32) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    async fn reorder_restaurants(&self, ordered_ids: &[i32]) -> Result<(), sqlx::Error> {
        self.renumber(OrderedCollection::Restaurants, ordered_ids)
            .await
    }
}
