use crate::popup::VisitorStore;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, aio::ConnectionManager};

/// How long a visitor's last-shown marker survives. Anything older than the
/// longest configurable cool-down would evaluate as eligible anyway.
const LAST_SHOWN_TTL_SECS: u64 = 60 * 60 * 24 * 365;

#[derive(Clone)]
pub struct RedisClient {
    pub conn: ConnectionManager,
}

impl RedisClient {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn last_shown_key(visitor_id: &str) -> String {
        format!("popup:last_shown:{}", visitor_id)
    }
}

impl VisitorStore for RedisClient {
    async fn last_shown(&self, visitor_id: &str) -> Option<DateTime<Utc>> {
        let key = Self::last_shown_key(visitor_id);
        let mut conn = self.conn.clone(); //connectionmanager cloning is cheap
        let raw: Option<String> = match conn.get(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                // A missing marker just means the popup shows again.
                tracing::error!("redis read failed for {}: {:?}", key, e);
                return None;
            }
        };

        raw.and_then(|s| match DateTime::parse_from_rfc3339(&s) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(e) => {
                tracing::error!("unparseable last-shown value for {}: {:?}", key, e);
                None
            }
        })
    }

    async fn record_shown(&self, visitor_id: &str, when: DateTime<Utc>) {
        let key = Self::last_shown_key(visitor_id);
        let mut conn = self.conn.clone();
        let result: redis::RedisResult<()> =
            conn.set_ex(&key, when.to_rfc3339(), LAST_SHOWN_TTL_SECS).await;
        if let Err(e) = result {
            tracing::error!("redis write failed for {}: {:?}", key, e);
        }
    }
}
