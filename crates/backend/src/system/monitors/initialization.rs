use std::sync::Arc;

use super::cold_storage::ColdStorageMonitor;
use super::inventory_levels::InventoryLevelMonitor;
use super::kitchen_timer::KitchenTimerMonitor;
use super::registry::MonitorRegistry;
use super::worker::MonitorWorker;
use crate::shared::config::Config;

/// Собирает реестр мониторов по конфигурации
pub fn build_registry(config: &Config) -> MonitorRegistry {
    let mut registry = MonitorRegistry::new();
    registry.register(KitchenTimerMonitor::new(config.kitchen.alert_threshold_minutes));
    registry.register(InventoryLevelMonitor::default());
    if config.cold_storage.enabled {
        registry.register(ColdStorageMonitor::new(&config.cold_storage));
    }
    registry
}

/// Запускает фоновый воркер мониторов
pub fn start(config: &Config) {
    let registry = Arc::new(build_registry(config));
    let worker = MonitorWorker::new(registry, config.kitchen.poll_interval_seconds);
    tokio::spawn(async move {
        worker.run_loop().await;
    });
    tracing::info!("Monitors started");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_storage_is_optional() {
        let mut config = Config::default();
        assert_eq!(build_registry(&config).len(), 3);
        config.cold_storage.enabled = false;
        let registry = build_registry(&config);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("cold_storage").is_none());
        assert!(registry.get("kitchen_timer").is_some());
    }
}
