use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub kitchen: KitchenConfig,
    pub inventory: InventoryConfig,
    pub payroll: PayrollConfig,
    pub cold_storage: ColdStorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "target/db/restaurant.db".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct KitchenConfig {
    /// Minutes before the estimate at which an order alert fires
    pub alert_threshold_minutes: i64,
    /// Delay between monitor ticks
    pub poll_interval_seconds: u64,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            alert_threshold_minutes: 5,
            poll_interval_seconds: 30,
        }
    }
}

impl KitchenConfig {
    /// Часть настроек, которую видит доска кухни в браузере
    pub fn board_settings(&self) -> contracts::domain::a006_kitchen_order::KitchenBoardSettings {
        contracts::domain::a006_kitchen_order::KitchenBoardSettings {
            alert_threshold_minutes: self.alert_threshold_minutes,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InventoryConfig {
    pub expiring_soon_days: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PayrollConfig {
    pub overtime_weekly_hours: f64,
    pub overtime_multiplier: f64,
    pub flat_deduction_rate: f64,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            overtime_weekly_hours: 40.0,
            overtime_multiplier: 1.5,
            flat_deduction_rate: 0.0,
        }
    }
}

impl PayrollConfig {
    pub fn settings(&self) -> contracts::domain::a007_payroll_entry::PayrollSettings {
        contracts::domain::a007_payroll_entry::PayrollSettings {
            overtime_weekly_hours: self.overtime_weekly_hours,
            overtime_multiplier: self.overtime_multiplier,
            flat_deduction_rate: self.flat_deduction_rate,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ColdStorageConfig {
    pub enabled: bool,
    pub min_celsius: f64,
    pub max_celsius: f64,
    pub units: Vec<String>,
}

impl Default for ColdStorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_celsius: 0.0,
            max_celsius: 5.0,
            units: vec![
                "Холодильная камера 1".into(),
                "Холодильная камера 2".into(),
                "Барная витрина".into(),
            ],
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/restaurant.db"

[server]
port = 3000

[kitchen]
alert_threshold_minutes = 5
poll_interval_seconds = 30

[inventory]
expiring_soon_days = 3

[payroll]
overtime_weekly_hours = 40.0
overtime_multiplier = 1.5
flat_deduction_rate = 0.0

[cold_storage]
enabled = true
min_celsius = 0.0
max_celsius = 5.0
"#;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Loaded configuration, read once per process
pub fn get() -> &'static Config {
    CONFIG.get_or_init(|| match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config.toml, using defaults: {}", e);
            Config::default()
        }
    })
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/restaurant.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.kitchen.alert_threshold_minutes, 5);
        assert_eq!(config.inventory.expiring_soon_days, 3);
        assert_eq!(config.payroll.overtime_multiplier, 1.5);
        assert_eq!(config.cold_storage.units.len(), 3);
    }

    #[test]
    fn test_partial_config_uses_section_defaults() {
        let config: Config = toml::from_str(
            r#"
            [kitchen]
            alert_threshold_minutes = 8

            [payroll]
            flat_deduction_rate = 0.13
            "#,
        )
        .unwrap();
        assert_eq!(config.kitchen.alert_threshold_minutes, 8);
        assert_eq!(config.kitchen.poll_interval_seconds, 30);
        assert_eq!(config.kitchen.board_settings().alert_threshold_minutes, 8);
        assert_eq!(config.payroll.overtime_weekly_hours, 40.0);
        assert_eq!(config.payroll.settings().flat_deduction_rate, 0.13);
        assert_eq!(config.database.path, "target/db/restaurant.db");
    }
}
