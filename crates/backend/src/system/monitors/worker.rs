use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use super::registry::MonitorRegistry;

/// Фоновый воркер: с фиксированной задержкой прогоняет все мониторы.
pub struct MonitorWorker {
    registry: Arc<MonitorRegistry>,
    interval_seconds: u64,
}

impl MonitorWorker {
    pub fn new(registry: Arc<MonitorRegistry>, interval_seconds: u64) -> Self {
        Self {
            registry,
            interval_seconds: interval_seconds.max(1),
        }
    }

    /// Запускает бесконечный цикл. Пропущенные тики не догоняются.
    pub async fn run_loop(&self) {
        info!(
            "Monitor worker started: {} monitors, interval {} seconds",
            self.registry.len(),
            self.interval_seconds
        );
        let mut interval = time::interval(time::Duration::from_secs(self.interval_seconds));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            self.run_once(Utc::now()).await;
        }
    }

    /// Один проход по всем мониторам; возвращает число упавших.
    /// Ошибка одного монитора не мешает остальным.
    pub async fn run_once(&self, now: DateTime<Utc>) -> usize {
        let mut failed = 0;
        for monitor in self.registry.all() {
            if let Err(e) = monitor.tick(now).await {
                failed += 1;
                error!("Monitor '{}' failed: {:?}", monitor.name(), e);
            }
        }
        failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::monitors::Monitor;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Monitor for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn tick(&self, _now: DateTime<Utc>) -> anyhow::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Monitor for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn tick(&self, _now: DateTime<Utc>) -> anyhow::Result<()> {
            anyhow::bail!("sensor offline")
        }
    }

    #[tokio::test]
    async fn failure_does_not_stop_other_monitors() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let mut registry = MonitorRegistry::new();
        registry.register(Failing);
        registry.register(Counting(ticks.clone()));

        let worker = MonitorWorker::new(Arc::new(registry), 30);
        assert_eq!(worker.run_once(Utc::now()).await, 1);
        assert_eq!(worker.run_once(Utc::now()).await, 1);
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn registry_replaces_by_name() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let mut registry = MonitorRegistry::new();
        registry.register(Counting(ticks.clone()));
        registry.register(Counting(ticks));
        registry.register(Failing);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("failing").is_some());
        let names: Vec<_> = registry.all().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["counting", "failing"]);
    }
}
