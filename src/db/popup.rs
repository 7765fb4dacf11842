use super::DBClient;
use crate::dtos::InputPopupDto;
use crate::models::{Popup, PopupStat};
use crate::popup::{StatEvent, next_stat};
use chrono::NaiveDate;

/// Popup configuration and daily statistics operations
pub trait PopupExt {
    async fn get_popups(&self) -> Result<Vec<Popup>, sqlx::Error>;

    async fn get_popup(&self, popup_id: i32) -> Result<Option<Popup>, sqlx::Error>;

    /// The popup the public site shows. When several rows are active the
    /// most recently updated one wins.
    async fn get_active_popup(&self) -> Result<Option<Popup>, sqlx::Error>;

    async fn create_popup(&self, input: &InputPopupDto) -> Result<Popup, sqlx::Error>;

    async fn update_popup(&self, popup_id: i32, input: &InputPopupDto)
    -> Result<Popup, sqlx::Error>;

    async fn set_popup_active(&self, popup_id: i32, is_active: bool)
    -> Result<Popup, sqlx::Error>;

    /// Deactivates every popup except the given one, so activation keeps a
    /// single popup live.
    async fn deactivate_other_popups(&self, popup_id: i32) -> Result<(), sqlx::Error>;

    async fn delete_popup(&self, popup_id: i32) -> Result<(), sqlx::Error>;

    async fn get_popup_stats(
        &self,
        popup_id: i32,
        days: i64,
    ) -> Result<Vec<PopupStat>, sqlx::Error>;

    async fn record_popup_view(&self, popup_id: i32, date: NaiveDate) -> Result<(), sqlx::Error>;

    async fn record_popup_click(&self, popup_id: i32, date: NaiveDate) -> Result<(), sqlx::Error>;
}

impl PopupExt for DBClient {
    async fn get_popups(&self) -> Result<Vec<Popup>, sqlx::Error> {
        sqlx::query_as::<_, Popup>("SELECT * FROM popup_config ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn get_popup(&self, popup_id: i32) -> Result<Option<Popup>, sqlx::Error> {
        sqlx::query_as::<_, Popup>("SELECT * FROM popup_config WHERE id = $1")
            .bind(popup_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_active_popup(&self) -> Result<Option<Popup>, sqlx::Error> {
        sqlx::query_as::<_, Popup>(
            r#"
            SELECT * FROM popup_config
            WHERE is_active = true
            ORDER BY updated_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_popup(&self, input: &InputPopupDto) -> Result<Popup, sqlx::Error> {
        sqlx::query_as::<_, Popup>(
            r#"
            INSERT INTO popup_config
                (title, message, button_text, button_link, image_url, bg_color, text_color,
                 is_active, start_date, end_date, delay_seconds, show_frequency_days)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.message)
        .bind(&input.button_text)
        .bind(&input.button_link)
        .bind(&input.image_url)
        .bind(&input.bg_color)
        .bind(&input.text_color)
        .bind(input.is_active)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.delay_seconds)
        .bind(input.show_frequency_days)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_popup(
        &self,
        popup_id: i32,
        input: &InputPopupDto,
    ) -> Result<Popup, sqlx::Error> {
        sqlx::query_as::<_, Popup>(
            r#"
            UPDATE popup_config
            SET title = $1, message = $2, button_text = $3, button_link = $4,
                image_url = $5, bg_color = $6, text_color = $7, is_active = $8,
                start_date = $9, end_date = $10, delay_seconds = $11,
                show_frequency_days = $12, updated_at = NOW()
            WHERE id = $13
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.message)
        .bind(&input.button_text)
        .bind(&input.button_link)
        .bind(&input.image_url)
        .bind(&input.bg_color)
        .bind(&input.text_color)
        .bind(input.is_active)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.delay_seconds)
        .bind(input.show_frequency_days)
        .bind(popup_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_popup_active(
        &self,
        popup_id: i32,
        is_active: bool,
    ) -> Result<Popup, sqlx::Error> {
        sqlx::query_as::<_, Popup>(
            "UPDATE popup_config SET is_active = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(is_active)
        .bind(popup_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn deactivate_other_popups(&self, popup_id: i32) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE popup_config
            SET is_active = false, updated_at = NOW()
            WHERE id <> $1 AND is_active = true
            "#,
        )
        .bind(popup_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_popup(&self, popup_id: i32) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM popup_config WHERE id = $1")
            .bind(popup_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    async fn get_popup_stats(
        &self,
        popup_id: i32,
        days: i64,
    ) -> Result<Vec<PopupStat>, sqlx::Error> {
        sqlx::query_as::<_, PopupStat>(
            r#"
            SELECT * FROM popup_stats
            WHERE popup_id = $1
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(popup_id)
        .bind(days)
        .fetch_all(&self.pool)
        .await
    }

    async fn record_popup_view(&self, popup_id: i32, date: NaiveDate) -> Result<(), sqlx::Error> {
        self.record_popup_event(popup_id, date, StatEvent::View)
            .await
    }

    async fn record_popup_click(&self, popup_id: i32, date: NaiveDate) -> Result<(), sqlx::Error> {
        self.record_popup_event(popup_id, date, StatEvent::Click)
            .await
    }
}

impl DBClient {
    /// Read-modify-write over today's stat row. Concurrent increments on
    /// the same day can drop a count; the numbers are indicative, not
    /// billing data. The counter arithmetic lives in [`next_stat`], so a
    /// click landing before any view inserts a row with zero views.
    async fn record_popup_event(
        &self,
        popup_id: i32,
        date: NaiveDate,
        event: StatEvent,
    ) -> Result<(), sqlx::Error> {
        let existing = sqlx::query_as::<_, PopupStat>(
            "SELECT * FROM popup_stats WHERE popup_id = $1 AND date = $2",
        )
        .bind(popup_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        let (views, clicks) = next_stat(existing.as_ref().map(|s| (s.views, s.clicks)), event);

        match existing {
            Some(stat) => {
                sqlx::query("UPDATE popup_stats SET views = $1, clicks = $2 WHERE id = $3")
                    .bind(views)
                    .bind(clicks)
                    .bind(stat.id)
                    .execute(&self.pool)
                    .await?;
            }
            None => {
                sqlx::query(
                    "INSERT INTO popup_stats (popup_id, date, views, clicks) VALUES ($1, $2, $3, $4)",
                )
                .bind(popup_id)
                .bind(date)
                .bind(views)
                .bind(clicks)
                .execute(&self.pool)
                .await?;
            }
        }

        Ok(())
    }
}
