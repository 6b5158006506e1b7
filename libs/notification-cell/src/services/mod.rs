pub mod email;
pub mod notify;
pub mod redis_store;

pub use email::EmailService;
pub use notify::NotificationService;
pub use redis_store::RedisNotificationService;
