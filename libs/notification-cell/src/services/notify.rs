// libs/notification-cell/src/services/notify.rs
use anyhow::Result;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};

use scheduling_cell::models::AppointmentStatus;
use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::{status_change_content, Notification};
use crate::services::email::EmailService;
use crate::services::redis_store::RedisNotificationService;

/// Notification fan-out: the database row is the primary write; the Redis
/// mirror and email delivery are side channels whose failures are logged
/// and swallowed.
pub struct NotificationService {
    supabase: SupabaseClient,
    email: EmailService,
    redis: Option<RedisNotificationService>,
}

impl NotificationService {
    pub fn new(config: &AppConfig) -> Self {
        let redis = if config.is_redis_configured() {
            match RedisNotificationService::new(config) {
                Ok(service) => Some(service),
                Err(e) => {
                    warn!("Redis notification mirror unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            supabase: SupabaseClient::new(config),
            email: EmailService::new(config),
            redis,
        }
    }

    /// Create an in-app notification. The row insert is the operation's
    /// outcome; the Redis mirror never fails it.
    pub async fn create_notification(
        &self,
        user_id: i32,
        user_type: &str,
        title: &str,
        message: &str,
        notification_type: &str,
        link: &str,
    ) -> Result<Notification> {
        let body = json!({
            "user_id": user_id,
            "user_type": user_type,
            "title": title,
            "message": message,
            "notification_type": notification_type,
            "link": link,
            "read": false,
            "created_at": Utc::now().to_rfc3339(),
        });

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let mut result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::POST, "/rest/v1/notifications", Some(body), Some(headers))
            .await?;

        if result.is_empty() {
            return Err(anyhow::anyhow!("Notification insert returned no row"));
        }

        let notification: Notification = serde_json::from_value(result.remove(0))?;

        if let Some(redis) = &self.redis {
            if let Err(e) = redis.store_notification(&notification).await {
                warn!("Failed to store notification in Redis: {}", e);
            }
        }

        Ok(notification)
    }

    /// In-app notification plus an optional email.
    pub async fn notify_user(
        &self,
        user_id: i32,
        user_type: &str,
        title: &str,
        message: &str,
        notification_type: &str,
        link: &str,
        email: Option<&str>,
    ) -> Result<Notification> {
        let notification = self
            .create_notification(user_id, user_type, title, message, notification_type, link)
            .await?;

        if let Some(address) = email {
            if let Err(e) = self.email.send_email(address, title, message).await {
                warn!(
                    "In-app notification created but email could not be sent to {}: {}",
                    address, e
                );
            }
        }

        Ok(notification)
    }

    pub async fn notify_appointment_booked(
        &self,
        cust_id: i32,
        appointment_id: i32,
        service_label: &str,
        date_label: &str,
        email: Option<&str>,
    ) -> Result<Notification> {
        let title = "New Appointment Booked";
        let message = format!(
            "Your appointment for {} on {} has been booked successfully.",
            service_label, date_label
        );
        let link = format!("/customer/appointments/{}", appointment_id);

        self.notify_user(cust_id, "customer", title, &message, "appointment", &link, email)
            .await
    }

    pub async fn notify_status_changed(
        &self,
        cust_id: i32,
        appointment_id: i32,
        service_label: &str,
        new_status: AppointmentStatus,
    ) -> Result<Notification> {
        let (title, message, notification_type) = status_change_content(service_label, new_status);
        let link = format!("/customer/appointments/{}", appointment_id);

        self.create_notification(cust_id, "customer", &title, &message, notification_type, &link)
            .await
    }

    /// All notifications for a user; Redis first, database fallback.
    pub async fn get_user_notifications(
        &self,
        user_id: i32,
        user_type: &str,
    ) -> Result<Vec<Notification>> {
        if let Some(redis) = &self.redis {
            match redis.get_user_notifications(user_id, user_type).await {
                Ok(notifications) if !notifications.is_empty() => {
                    debug!(
                        "Retrieved {} notifications from Redis for {}:{}",
                        notifications.len(),
                        user_type,
                        user_id
                    );
                    return Ok(notifications);
                }
                Ok(_) => {}
                Err(e) => warn!("Redis notification read failed, using database: {}", e),
            }
        }

        let path = format!(
            "/rest/v1/notifications?user_id=eq.{}&user_type=eq.{}&order=created_at.desc",
            user_id, user_type
        );
        self.fetch_list(&path).await
    }

    pub async fn get_unread_notifications(
        &self,
        user_id: i32,
        user_type: &str,
    ) -> Result<Vec<Notification>> {
        let path = format!(
            "/rest/v1/notifications?user_id=eq.{}&user_type=eq.{}&read=eq.false&order=created_at.desc",
            user_id, user_type
        );
        self.fetch_list(&path).await
    }

    pub async fn mark_as_read(&self, notification_id: i32) -> Result<()> {
        let path = format!("/rest/v1/notifications?notification_id=eq.{}", notification_id);

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let mut result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::PATCH, &path, Some(json!({"read": true})), Some(headers))
            .await?;

        if result.is_empty() {
            return Err(anyhow::anyhow!("Notification {} not found", notification_id));
        }

        if let Some(redis) = &self.redis {
            let notification: Notification = serde_json::from_value(result.remove(0))?;
            if let Err(e) = redis
                .mark_as_read(notification.notification_id, notification.user_id, &notification.user_type)
                .await
            {
                warn!("Failed to mark notification as read in Redis: {}", e);
            }
        }

        Ok(())
    }

    pub async fn mark_all_as_read(&self, user_id: i32, user_type: &str) -> Result<usize> {
        let path = format!(
            "/rest/v1/notifications?user_id=eq.{}&user_type=eq.{}&read=eq.false",
            user_id, user_type
        );

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::PATCH, &path, Some(json!({"read": true})), Some(headers))
            .await?;

        if let Some(redis) = &self.redis {
            for row in &result {
                if let Ok(notification) = serde_json::from_value::<Notification>(row.clone()) {
                    if let Err(e) = redis
                        .mark_as_read(notification.notification_id, user_id, user_type)
                        .await
                    {
                        warn!("Failed to mark notification as read in Redis: {}", e);
                    }
                }
            }
        }

        Ok(result.len())
    }

    async fn fetch_list(&self, path: &str) -> Result<Vec<Notification>> {
        let result: Vec<Value> = self.supabase.request(Method::GET, path, None).await?;

        let notifications = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Notification>, _>>()?;

        Ok(notifications)
    }
}
