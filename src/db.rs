use sqlx::{Pool, Postgres};

use crate::ordering::OrderedCollection;

pub mod scheduler;

mod about;
pub use about::AboutExt;

mod activity;
pub use activity::ActivityExt;

mod restaurant;
pub use restaurant::RestaurantExt;

mod poi;
pub use poi::PoiExt;

mod faq;
pub use faq::FaqExt;

mod review;
pub use review::ReviewExt;

mod section;
pub use section::SectionExt;

mod image;
pub use image::SiteImageExt;

mod popup;
pub use popup::PopupExt;

#[derive(Debug, Clone)]
pub struct DBClient {
    pool: Pool<Postgres>,
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }

    /// Persist a reordered collection by writing `order_position = index`
    /// for every row, inside one transaction. Either the whole list is
    /// renumbered or nothing is — a partial failure rolls back and the
    /// caller reloads from source.
    pub(crate) async fn renumber(
        &self,
        collection: OrderedCollection,
        ordered_ids: &[i32],
    ) -> Result<(), sqlx::Error> {
        let statement = format!(
            "UPDATE {} SET order_position = $1, updated_at = NOW() WHERE id = $2",
            collection.table()
        );

        let mut tx = self.pool.begin().await?;
        for (index, id) in ordered_ids.iter().enumerate() {
            sqlx::query(&statement)
                .bind(index as i32)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(())
    }
}
