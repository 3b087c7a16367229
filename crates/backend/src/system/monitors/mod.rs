//! Фоновые мониторы: таймеры заказов, остатки склада, температура холодильников.

pub mod cold_storage;
pub mod initialization;
pub mod inventory_levels;
pub mod kitchen_timer;
pub mod monitor;
pub mod registry;
pub mod worker;

pub use monitor::Monitor;
pub use registry::MonitorRegistry;
pub use worker::MonitorWorker;
