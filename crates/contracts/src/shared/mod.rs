pub mod equipment;
pub mod inventory_buckets;
pub mod logger;
pub mod notifications;
pub mod order_timer;
