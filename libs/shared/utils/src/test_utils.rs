use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use shared_config::AppConfig;
use shared_models::Cpf;

use crate::clock::FixedClock;

pub struct TestConfig {
    pub opening_hour: u32,
    pub closing_hour: u32,
    pub slot_minutes: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            opening_hour: 8,
            closing_hour: 19,
            slot_minutes: 15,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            bind_address: "127.0.0.1:0".to_string(),
            opening_hour: self.opening_hour,
            closing_hour: self.closing_hour,
            slot_minutes: self.slot_minutes,
            ..AppConfig::default()
        }
    }
}

/// Checksum-valid CPFs for fixtures.
pub struct TestCpf;

impl TestCpf {
    /// The well-known `123.456.789-09`.
    pub fn maria() -> Cpf {
        Cpf::new(12345678909)
    }

    /// A distinct valid CPF per index.
    pub fn nth(index: u64) -> Cpf {
        Cpf::from_base(200_000_000 + index * 7_919)
    }

    /// Fails the check digit verification.
    pub fn invalid() -> Cpf {
        Cpf::new(12345678900)
    }
}

/// Builds a wall-clock instant, panicking on impossible dates.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_else(|| panic!("invalid test instant {year}-{month}-{day} {hour}:{minute}"))
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// Monday 2030-03-04 10:00, the "now" most tests run at.
pub fn reference_now() -> NaiveDateTime {
    at(2030, 3, 4, 10, 0)
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(reference_now()))
}
