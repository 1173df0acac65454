use chrono_tz::Tz;
use shared::calendar::DEFAULT_HORIZON_MONTHS;
use shared::panel::DEFAULT_REFRESH_INTERVAL_MS;
use shared::time::DEFAULT_SERVER_TIMEZONE;

use crate::services::location;

/// Element the widget mounts into; its `data-*` attributes configure it
pub const MOUNT_ELEMENT_ID: &str = "booking-app";

/// `data-*` attributes read from the mount element
const SETTING_KEYS: [&str; 8] = [
    "api-base",
    "negocio",
    "calendarios",
    "meses",
    "intervalo-reloj",
    "duracion-toast",
    "zona-horaria",
    "log",
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown time zone '{0}'")]
    UnknownTimezone(String),
    #[error("invalid value '{value}' for {key}")]
    InvalidNumber { key: String, value: String },
    #[error("unknown setting '{0}'")]
    UnknownSetting(String),
}

/// Widget configuration
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    /// Prefix for API calls; empty means same origin
    pub api_base_url: String,
    pub business_id: Option<String>,
    /// Calendars offered in the selector, numbered from 1
    pub calendar_count: u32,
    pub horizon_months: u32,
    pub clock_interval_ms: u32,
    pub toast_duration_ms: u32,
    pub server_timezone: Tz,
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            business_id: None,
            calendar_count: 1,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            clock_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            toast_duration_ms: 3000,
            server_timezone: DEFAULT_SERVER_TIMEZONE,
            log_level: "info".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Read the mount element's data attributes over the defaults. Bad
    /// values are skipped and handed back so they can be logged once
    /// logging is up; the business ID falls back to the `/reservas/{id}`
    /// page path.
    pub fn from_document() -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut rejected = Vec::new();

        let mount = gloo::utils::document().get_element_by_id(MOUNT_ELEMENT_ID);
        if let Some(element) = mount {
            for key in SETTING_KEYS {
                if let Some(value) = element.get_attribute(&format!("data-{}", key)) {
                    if let Err(e) = config.apply_setting(key, &value) {
                        rejected.push(e);
                    }
                }
            }
        }

        if config.business_id.is_none() {
            config.business_id = shared::business_id_from_path(&location::pathname());
        }

        (config, rejected)
    }

    pub fn apply_setting(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "api-base" => self.api_base_url = value.trim_end_matches('/').to_string(),
            "negocio" => {
                self.business_id = Some(value.to_string()).filter(|v| !v.is_empty());
            }
            "calendarios" => self.calendar_count = parse_positive(key, value)?,
            "meses" => self.horizon_months = parse_positive(key, value)?,
            "intervalo-reloj" => self.clock_interval_ms = parse_positive(key, value)?,
            "duracion-toast" => self.toast_duration_ms = parse_positive(key, value)?,
            "zona-horaria" => {
                self.server_timezone = value
                    .parse::<Tz>()
                    .map_err(|_| ConfigError::UnknownTimezone(value.to_string()))?;
            }
            "log" => self.log_level = value.to_string(),
            other => return Err(ConfigError::UnknownSetting(other.to_string())),
        }
        Ok(())
    }

    /// Calendar IDs offered in the selector
    pub fn calendar_ids(&self) -> Vec<u32> {
        (1..=self.calendar_count.max(1)).collect()
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.horizon_months, 12);
        assert_eq!(config.clock_interval_ms, 1000);
        assert_eq!(config.toast_duration_ms, 3000);
        assert_eq!(config.server_timezone, chrono_tz::America::Montevideo);
        assert_eq!(config.calendar_ids(), vec![1]);
    }

    #[test]
    fn test_apply_settings() {
        let mut config = WidgetConfig::default();
        config.apply_setting("negocio", " peluqueria ").unwrap();
        config.apply_setting("calendarios", "3").unwrap();
        config.apply_setting("zona-horaria", "Europe/Madrid").unwrap();
        config.apply_setting("api-base", "https://reservas.example.com/").unwrap();

        assert_eq!(config.business_id.as_deref(), Some("peluqueria"));
        assert_eq!(config.calendar_ids(), vec![1, 2, 3]);
        assert_eq!(config.server_timezone, chrono_tz::Europe::Madrid);
        assert_eq!(config.api_base_url, "https://reservas.example.com");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut config = WidgetConfig::default();
        assert!(matches!(
            config.apply_setting("calendarios", "0"),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            config.apply_setting("zona-horaria", "Mars/Olympus"),
            Err(ConfigError::UnknownTimezone(_))
        ));
        assert!(matches!(
            config.apply_setting("color", "rojo"),
            Err(ConfigError::UnknownSetting(_))
        ));
        config.apply_setting("negocio", "").unwrap();
        assert_eq!(config.business_id, None);
        assert_eq!(config, WidgetConfig::default());
    }
}
