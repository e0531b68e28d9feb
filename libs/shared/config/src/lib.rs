use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_OPENING_HOUR: u32 = 8;
pub const DEFAULT_CLOSING_HOUR: u32 = 19;
pub const DEFAULT_SLOT_MINUTES: u32 = 15;
pub const DEFAULT_MIN_PATIENT_AGE: u32 = 13;
pub const DEFAULT_MIN_NAME_LENGTH: usize = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub opening_hour: u32,
    pub closing_hour: u32,
    pub slot_minutes: u32,
    pub min_patient_age_years: u32,
    pub min_patient_name_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDR.to_string(),
            opening_hour: DEFAULT_OPENING_HOUR,
            closing_hour: DEFAULT_CLOSING_HOUR,
            slot_minutes: DEFAULT_SLOT_MINUTES,
            min_patient_age_years: DEFAULT_MIN_PATIENT_AGE,
            min_patient_name_length: DEFAULT_MIN_NAME_LENGTH,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self {
            bind_address: env::var("CLINIC_BIND_ADDR").unwrap_or_else(|_| {
                warn!("CLINIC_BIND_ADDR not set, using default");
                DEFAULT_BIND_ADDR.to_string()
            }),
            opening_hour: parse_var("CLINIC_OPENING_HOUR", DEFAULT_OPENING_HOUR),
            closing_hour: parse_var("CLINIC_CLOSING_HOUR", DEFAULT_CLOSING_HOUR),
            slot_minutes: parse_var("CLINIC_SLOT_MINUTES", DEFAULT_SLOT_MINUTES),
            min_patient_age_years: parse_var("CLINIC_MIN_PATIENT_AGE", DEFAULT_MIN_PATIENT_AGE),
            min_patient_name_length: parse_var("CLINIC_MIN_NAME_LENGTH", DEFAULT_MIN_NAME_LENGTH),
        };

        if !config.has_valid_schedule() {
            warn!(
                "Inconsistent clinic schedule ({}h-{}h, {} min slots), using defaults",
                config.opening_hour, config.closing_hour, config.slot_minutes
            );
            config.opening_hour = DEFAULT_OPENING_HOUR;
            config.closing_hour = DEFAULT_CLOSING_HOUR;
            config.slot_minutes = DEFAULT_SLOT_MINUTES;
        }

        config
    }

    /// Opening before closing, closing within the day, slots tiling the hour.
    pub fn has_valid_schedule(&self) -> bool {
        self.opening_hour < self.closing_hour
            && self.closing_hour <= 24
            && self.slot_minutes > 0
            && 60 % self.slot_minutes == 0
    }
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", key, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_form_a_valid_schedule() {
        let config = AppConfig::default();
        assert!(config.has_valid_schedule());
        assert_eq!(config.opening_hour, 8);
        assert_eq!(config.closing_hour, 19);
        assert_eq!(config.slot_minutes, 15);
    }

    #[test]
    fn rejects_slots_that_do_not_tile_the_hour() {
        let config = AppConfig {
            slot_minutes: 25,
            ..AppConfig::default()
        };
        assert!(!config.has_valid_schedule());
    }

    #[test]
    fn rejects_inverted_hours() {
        let config = AppConfig {
            opening_hour: 19,
            closing_hour: 8,
            ..AppConfig::default()
        };
        assert!(!config.has_valid_schedule());
    }
}
