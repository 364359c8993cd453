use crate::persistence::atomic_write;
use crate::rounding::RoundingMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration, read from settings.json at startup.
///
/// Every field carries a default so files written by older versions (or
/// edited by hand with keys missing) merge cleanly over the defaults.
/// The reminder gates are consulted fresh on every check, so edits take
/// effect without restarting a running task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rounding_mode: RoundingMode,
    /// Rounding step in minutes.
    pub rounding_step: u32,

    pub notification_enabled: bool,
    /// Reminder interval in minutes.
    pub notification_interval: u32,
    pub notify_common_tasks: bool,
    pub notify_urgent_tasks: bool,
    pub sound_common_tasks: bool,
    pub sound_urgent_tasks: bool,

    /// Workday moments as HH:MM.
    pub entry_time: String,
    pub lunch_time: String,
    pub exit_time: String,
    pub work_hours_notification: bool,

    /// Extra steps in the creation flow.
    pub require_details: bool,
    pub require_requester: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rounding_mode: RoundingMode::Up,
            rounding_step: 10,
            notification_enabled: false,
            notification_interval: 15,
            notify_common_tasks: true,
            notify_urgent_tasks: true,
            sound_common_tasks: true,
            sound_urgent_tasks: true,
            entry_time: "09:00".to_string(),
            lunch_time: "12:00".to_string(),
            exit_time: "18:00".to_string(),
            work_hours_notification: false,
            require_details: false,
            require_requester: false,
        }
    }
}

impl Settings {
    pub fn interval_seconds(&self) -> u64 {
        u64::from(self.notification_interval.max(1)) * 60
    }

    /// Whether a duration reminder may fire for this urgency class.
    pub fn should_notify(&self, is_urgent: bool) -> bool {
        self.notification_enabled
            && if is_urgent {
                self.notify_urgent_tasks
            } else {
                self.notify_common_tasks
            }
    }

    pub fn should_play_sound(&self, is_urgent: bool) -> bool {
        if is_urgent {
            self.sound_urgent_tasks
        } else {
            self.sound_common_tasks
        }
    }
}

/// Load settings, returning defaults when no file exists yet.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
    Ok(settings)
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)
}
