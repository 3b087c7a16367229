use super::monitor::Monitor;
use std::collections::HashMap;
use std::sync::Arc;

/// Реестр мониторов.
/// Повторная регистрация с тем же именем заменяет прежний монитор.
pub struct MonitorRegistry {
    monitors: HashMap<String, Arc<dyn Monitor>>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self {
            monitors: HashMap::new(),
        }
    }

    pub fn register<T: Monitor + 'static>(&mut self, monitor: T) {
        let name = monitor.name().to_string();
        self.monitors.insert(name, Arc::new(monitor));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Monitor>> {
        self.monitors.get(name).cloned()
    }

    /// Все мониторы в порядке имён
    pub fn all(&self) -> Vec<Arc<dyn Monitor>> {
        let mut names: Vec<&String> = self.monitors.keys().collect();
        names.sort();
        names
            .into_iter()
            .filter_map(|name| self.monitors.get(name).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl Default for MonitorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
