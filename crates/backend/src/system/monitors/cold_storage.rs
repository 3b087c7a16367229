//! Имитация датчиков холодильного оборудования.
//!
//! Температура каждой камеры гуляет случайным образом с возвратом к середине
//! допустимого диапазона; изредка случается скачок (открытая дверь).
//! Выход за диапазон оповещается один раз до возврата в норму.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::shared::equipment::TemperatureReading;
use contracts::shared::notifications::NotificationVariant;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::RwLock;
use tokio::sync::Mutex;

use super::monitor::Monitor;
use crate::shared::config::ColdStorageConfig;
use crate::shared::notifications::notify;

/// Вероятность скачка температуры за один тик
const SPIKE_CHANCE: f64 = 0.03;
const MEAN_REVERSION: f64 = 0.2;

static LATEST: Lazy<RwLock<Vec<TemperatureReading>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// Последние показания всех камер
pub fn latest_readings() -> Vec<TemperatureReading> {
    LATEST.read().map(|r| r.clone()).unwrap_or_default()
}

fn store_readings(readings: &[TemperatureReading]) {
    if let Ok(mut latest) = LATEST.write() {
        *latest = readings.to_vec();
    }
}

struct ColdUnit {
    name: String,
    celsius: f64,
    alerted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureAlert {
    pub reading: TemperatureReading,
}

impl TemperatureAlert {
    pub fn title(&self) -> String {
        format!("{}: температура вне нормы", self.reading.unit)
    }

    pub fn message(&self) -> String {
        format!(
            "{:.1} °C (норма {:.1}..{:.1} °C)",
            self.reading.celsius, self.reading.min_celsius, self.reading.max_celsius
        )
    }
}

pub struct ColdStorageSimulator {
    units: Vec<ColdUnit>,
    min_celsius: f64,
    max_celsius: f64,
    rng: StdRng,
}

impl ColdStorageSimulator {
    pub fn new(config: &ColdStorageConfig, rng: StdRng) -> Self {
        let mid = (config.min_celsius + config.max_celsius) / 2.0;
        Self {
            units: config
                .units
                .iter()
                .map(|name| ColdUnit {
                    name: name.clone(),
                    celsius: mid,
                    alerted: false,
                })
                .collect(),
            min_celsius: config.min_celsius,
            max_celsius: config.max_celsius,
            rng,
        }
    }

    /// Один шаг случайного блуждания для всех камер
    pub fn step(&mut self, now: DateTime<Utc>) -> Vec<TemperatureReading> {
        let mid = (self.min_celsius + self.max_celsius) / 2.0;
        let mut readings = Vec::with_capacity(self.units.len());
        for unit in &mut self.units {
            let noise: f64 = self.rng.gen_range(-0.6..0.6);
            unit.celsius += (mid - unit.celsius) * MEAN_REVERSION + noise;
            if self.rng.gen_bool(SPIKE_CHANCE) {
                unit.celsius += self.rng.gen_range(3.0..6.0);
            }
            readings.push(TemperatureReading {
                unit: unit.name.clone(),
                celsius: (unit.celsius * 10.0).round() / 10.0,
                min_celsius: self.min_celsius,
                max_celsius: self.max_celsius,
                measured_at: now,
            });
        }
        readings
    }

    /// Оповещения по выходу за диапазон, не более одного на эпизод
    pub fn check(&mut self, readings: &[TemperatureReading]) -> Vec<TemperatureAlert> {
        let mut alerts = Vec::new();
        for reading in readings {
            let Some(unit) = self.units.iter_mut().find(|u| u.name == reading.unit) else {
                continue;
            };
            if reading.in_range() {
                unit.alerted = false;
            } else if !unit.alerted {
                unit.alerted = true;
                alerts.push(TemperatureAlert {
                    reading: reading.clone(),
                });
            }
        }
        alerts
    }

    #[cfg(test)]
    fn set_celsius(&mut self, unit: &str, celsius: f64) {
        if let Some(u) = self.units.iter_mut().find(|u| u.name == unit) {
            u.celsius = celsius;
        }
    }
}

pub struct ColdStorageMonitor {
    simulator: Mutex<ColdStorageSimulator>,
}

impl ColdStorageMonitor {
    pub fn new(config: &ColdStorageConfig) -> Self {
        Self {
            simulator: Mutex::new(ColdStorageSimulator::new(config, StdRng::from_entropy())),
        }
    }
}

#[async_trait]
impl Monitor for ColdStorageMonitor {
    fn name(&self) -> &'static str {
        "cold_storage"
    }

    async fn tick(&self, now: DateTime<Utc>) -> Result<()> {
        let (readings, alerts) = {
            let mut simulator = self.simulator.lock().await;
            let readings = simulator.step(now);
            let alerts = simulator.check(&readings);
            (readings, alerts)
        };
        store_readings(&readings);
        for alert in alerts {
            tracing::warn!("{} {}", alert.title(), alert.message());
            notify(
                "cold_storage",
                &alert.title(),
                &alert.message(),
                NotificationVariant::Destructive,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator() -> ColdStorageSimulator {
        ColdStorageSimulator::new(&ColdStorageConfig::default(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn produces_a_reading_per_unit() {
        let mut sim = simulator();
        let now = Utc::now();
        let readings = sim.step(now);
        assert_eq!(readings.len(), 3);
        assert!(readings.iter().all(|r| r.measured_at == now));
        assert!(readings.iter().all(|r| r.max_celsius == 5.0));
    }

    #[test]
    fn walk_stays_near_the_middle_without_spikes() {
        let mut sim = simulator();
        let mut worst: f64 = 0.0;
        for _ in 0..500 {
            for r in sim.step(Utc::now()) {
                worst = worst.max((r.celsius - 2.5).abs());
            }
        }
        // noise plus the occasional spike, always pulled back
        assert!(worst < 20.0, "drifted to {worst}");
    }

    #[test]
    fn out_of_range_alerts_once_per_episode() {
        let mut sim = simulator();
        let reading = |celsius: f64| TemperatureReading {
            unit: "Барная витрина".into(),
            celsius,
            min_celsius: 0.0,
            max_celsius: 5.0,
            measured_at: Utc::now(),
        };

        assert!(sim.check(&[reading(3.0)]).is_empty());
        let alerts = sim.check(&[reading(7.5)]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].message(), "7.5 °C (норма 0.0..5.0 °C)");
        assert!(sim.check(&[reading(8.0)]).is_empty());
        assert!(sim.check(&[reading(4.0)]).is_empty());
        assert_eq!(sim.check(&[reading(-1.0)]).len(), 1);
    }

    #[test]
    fn unknown_units_are_ignored() {
        let mut sim = simulator();
        sim.set_celsius("Холодильная камера 1", 40.0);
        let readings = sim.step(Utc::now());
        let alerts = sim.check(&readings);
        assert!(alerts
            .iter()
            .any(|a| a.reading.unit == "Холодильная камера 1"));

        let stray = TemperatureReading {
            unit: "Морозильник".into(),
            celsius: 30.0,
            min_celsius: 0.0,
            max_celsius: 5.0,
            measured_at: Utc::now(),
        };
        assert!(sim.check(&[stray]).is_empty());
    }
}
