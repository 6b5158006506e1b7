// libs/notification-cell/src/services/redis_store.rs
use anyhow::{anyhow, Result};
use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use tracing::debug;

use shared_config::AppConfig;

use crate::models::Notification;

/// 30 days, matching the in-app notification retention window.
const NOTIFICATION_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Best-effort Redis mirror of the notification store. The database row is
/// always the source of truth; every caller falls back to it when Redis
/// reads come back empty or fail.
pub struct RedisNotificationService {
    pool: Pool,
}

impl RedisNotificationService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let redis_url = config
            .redis_url
            .clone()
            .ok_or_else(|| anyhow!("REDIS_URL not configured"))?;

        let cfg = Config::from_url(redis_url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| anyhow!("Failed to create Redis pool: {}", e))?;

        Ok(Self { pool })
    }

    async fn get_connection(&self) -> Result<Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| anyhow!("Failed to get Redis connection: {}", e))
    }

    fn notification_key(user_type: &str, user_id: i32, notification_id: i32) -> String {
        format!("notification:{}:{}:{}", user_type, user_id, notification_id)
    }

    fn user_list_key(user_type: &str, user_id: i32) -> String {
        format!("notifications:{}:{}", user_type, user_id)
    }

    pub async fn store_notification(&self, notification: &Notification) -> Result<()> {
        let mut conn = self.get_connection().await?;

        let key = Self::notification_key(
            &notification.user_type,
            notification.user_id,
            notification.notification_id,
        );
        let list_key = Self::user_list_key(&notification.user_type, notification.user_id);

        let payload = serde_json::to_string(notification)?;

        let _: () = conn.set(&key, payload).await?;
        let _: () = conn
            .lpush(&list_key, notification.notification_id.to_string())
            .await?;
        let _: () = conn.expire(&key, NOTIFICATION_TTL_SECONDS).await?;
        let _: () = conn.expire(&list_key, NOTIFICATION_TTL_SECONDS).await?;

        debug!(
            "Stored notification {} in Redis for {}:{}",
            notification.notification_id, notification.user_type, notification.user_id
        );
        Ok(())
    }

    pub async fn get_user_notifications(
        &self,
        user_id: i32,
        user_type: &str,
    ) -> Result<Vec<Notification>> {
        let mut conn = self.get_connection().await?;

        let list_key = Self::user_list_key(user_type, user_id);
        let ids: Vec<String> = conn.lrange(&list_key, 0, -1).await?;

        let mut notifications = Vec::with_capacity(ids.len());
        for id in ids {
            let notification_id: i32 = match id.parse() {
                Ok(parsed) => parsed,
                Err(_) => continue,
            };

            let key = Self::notification_key(user_type, user_id, notification_id);
            let payload: Option<String> = conn.get(&key).await?;

            if let Some(payload) = payload {
                match serde_json::from_str(&payload) {
                    Ok(notification) => notifications.push(notification),
                    Err(e) => debug!("Skipping undecodable cached notification {}: {}", key, e),
                }
            }
        }

        Ok(notifications)
    }

    pub async fn mark_as_read(
        &self,
        notification_id: i32,
        user_id: i32,
        user_type: &str,
    ) -> Result<()> {
        let mut conn = self.get_connection().await?;

        let key = Self::notification_key(user_type, user_id, notification_id);
        let payload: Option<String> = conn.get(&key).await?;

        if let Some(payload) = payload {
            let mut notification: Notification = serde_json::from_str(&payload)?;
            notification.read = true;
            let _: () = conn.set(&key, serde_json::to_string(&notification)?).await?;
        }

        Ok(())
    }
}
