use crate::infrastructure::error::PlannerError;
use std::fs;
use std::path::Path;

const PLANNER_JSON: &str = "planner.json";

/// Runtime tuning for the day grid and the background save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Fixed grid step used for rendering and snapping.
    pub slot_minutes: u16,
    /// Minute of day past which no block may end. 1380 = 23:00.
    pub day_close_minute: u16,
    pub auto_save_interval_secs: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            slot_minutes: 30,
            day_close_minute: 1380,
            auto_save_interval_secs: 120,
        }
    }
}

pub fn ensure_default_config(config_dir: &Path) -> Result<(), PlannerError> {
    let path = config_dir.join(PLANNER_JSON);
    if !path.exists() {
        let defaults = PlannerConfig::default();
        let value = serde_json::json!({
            "schema": 1,
            "slotMinutes": defaults.slot_minutes,
            "dayCloseMinute": defaults.day_close_minute,
            "autoSaveIntervalSecs": defaults.auto_save_interval_secs,
        });
        let formatted = serde_json::to_string_pretty(&value)?;
        fs::write(path, format!("{formatted}\n"))?;
    }
    Ok(())
}

/// Lenient load: missing or malformed fields fall back to defaults.
pub fn load_config(config_dir: &Path) -> PlannerConfig {
    let mut config = PlannerConfig::default();
    let path = config_dir.join(PLANNER_JSON);
    let Ok(raw) = fs::read_to_string(path) else {
        return config;
    };
    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&raw) else {
        return config;
    };

    if let Some(value) = parsed.get("slotMinutes").and_then(serde_json::Value::as_u64) {
        if value > 0 && value <= 1440 {
            config.slot_minutes = value as u16;
        }
    }
    if let Some(value) = parsed
        .get("dayCloseMinute")
        .and_then(serde_json::Value::as_u64)
    {
        if value > 0 && value <= 1440 {
            config.day_close_minute = value as u16;
        }
    }
    if let Some(value) = parsed
        .get("autoSaveIntervalSecs")
        .and_then(serde_json::Value::as_u64)
    {
        if value > 0 {
            config.auto_save_interval_secs = value;
        }
    }

    config
}
