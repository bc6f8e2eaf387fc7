use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::{AnalyticsConfig, CalendarZone, InsightThresholds, Timeframe};

use crate::state::{default_ledger_path, ensure_tally_home, tally_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analytics: AnalyticsSection,
    pub thresholds: InsightThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSection {
    /// IANA zone used for day/month bucketing (e.g. "America/Chicago")
    pub timezone: String,
    pub default_timeframe: Timeframe,
    /// Overrides ~/.tally/ledger.json
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_path: Option<PathBuf>,
}

impl Default for AnalyticsSection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            default_timeframe: Timeframe::ThirtyDays,
            ledger_path: None,
        }
    }
}

impl Config {
    pub fn analytics_config(&self) -> Result<AnalyticsConfig> {
        let zone = CalendarZone::parse(&self.analytics.timezone)
            .context("analytics.timezone in config.toml")?;
        Ok(AnalyticsConfig::default()
            .with_zone(zone)
            .with_thresholds(self.thresholds))
    }

    pub fn ledger_path(&self) -> Result<PathBuf> {
        match &self.analytics.ledger_path {
            Some(p) => Ok(p.clone()),
            None => default_ledger_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    ensure_tally_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
