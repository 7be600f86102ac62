use crate::storage::Storage;
use crate::theme::{Palette, Theme};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

pub const CONFIG_KEY: &str = "snakeGameConfig";

pub const DEFAULT_GRID_SIZE: i16 = 20;
pub const MIN_GRID_SIZE: i16 = 8;
pub const MAX_GRID_SIZE: i16 = 60;

const MIN_TICK_INTERVAL_MS: u64 = 20;
const MAX_TICK_INTERVAL_MS: u64 = 1000;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SpeedPreset {
    Slow,
    Medium,
    Fast,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 3] = [SpeedPreset::Slow, SpeedPreset::Medium, SpeedPreset::Fast];

    pub fn interval_ms(&self) -> u64 {
        match self {
            SpeedPreset::Slow => 150,
            SpeedPreset::Medium => 100,
            SpeedPreset::Fast => 70,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "slow",
            SpeedPreset::Medium => "medium",
            SpeedPreset::Fast => "fast",
        }
    }

    pub fn from_name(name: &str) -> Option<SpeedPreset> {
        SpeedPreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }
}

/// User-adjustable settings. Read by the controller and the renderer.
#[derive(PartialEq, Clone, Debug)]
pub struct GameConfig {
    pub tick_interval_ms: u64,
    pub theme: Theme,
    pub grid_lines: bool,
    pub sound_enabled: bool,
    pub special_food_enabled: bool,
    pub grid_size: i16,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedConfig {
    speed: u64,
    theme: Theme,
    grid_lines: bool,
    sound_enabled: bool,
    special_food_enabled: bool,
    grid_size: i16,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_interval_ms: SpeedPreset::Medium.interval_ms(),
            theme: Theme::Default,
            grid_lines: true,
            sound_enabled: false,
            special_food_enabled: true,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GameConfig {
    /// Every field is parsed on its own; a bad field only loses itself.
    pub fn load(storage: &dyn Storage) -> GameConfig {
        let mut config = GameConfig::default();

        let raw = match storage.get(CONFIG_KEY) {
            Some(raw) => raw,
            None => return config,
        };
        let fields = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(fields)) => fields,
            _ => {
                tracing::debug!("stored config is not a JSON object, using defaults");
                return config;
            }
        };

        if let Some(ms) = field(&fields, "speed", parse_speed) {
            config.tick_interval_ms = ms;
        }
        if let Some(theme) = field(&fields, "theme", |v| v.as_str().and_then(Theme::from_name)) {
            config.theme = theme;
        }
        if let Some(on) = field(&fields, "gridLines", Value::as_bool) {
            config.grid_lines = on;
        }
        if let Some(on) = field(&fields, "soundEnabled", Value::as_bool) {
            config.sound_enabled = on;
        }
        if let Some(on) = field(&fields, "specialFoodEnabled", Value::as_bool) {
            config.special_food_enabled = on;
        }
        if let Some(size) = field(&fields, "gridSize", parse_grid_size) {
            config.grid_size = size;
        }

        config
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        let persisted = PersistedConfig {
            speed: self.tick_interval_ms,
            theme: self.theme,
            grid_lines: self.grid_lines,
            sound_enabled: self.sound_enabled,
            special_food_enabled: self.special_food_enabled,
            grid_size: self.grid_size,
        };
        let result = serde_json::to_string(&persisted)
            .map_err(crate::error::Error::from)
            .and_then(|json| storage.set(CONFIG_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }

    pub fn apply_theme(&self) -> Palette {
        self.theme.palette()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn speed_preset(&self) -> Option<SpeedPreset> {
        SpeedPreset::ALL
            .into_iter()
            .find(|preset| preset.interval_ms() == self.tick_interval_ms)
    }

    pub fn set_speed(&mut self, preset: SpeedPreset) {
        self.tick_interval_ms = preset.interval_ms();
    }
}

fn field<T>(fields: &Map<String, Value>, name: &str, parse: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let value = fields.get(name)?;
    let parsed = parse(value);
    if parsed.is_none() {
        tracing::debug!(field = name, %value, "malformed setting, using default");
    }
    parsed
}

fn parse_speed(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .filter(|ms| (MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(ms)),
        Value::String(s) => SpeedPreset::from_name(s).map(|preset| preset.interval_ms()),
        _ => None,
    }
}

fn parse_grid_size(value: &Value) -> Option<i16> {
    value
        .as_i64()
        .filter(|size| (MIN_GRID_SIZE as i64..=MAX_GRID_SIZE as i64).contains(size))
        .map(|size| size as i16)
}
