use crate::Status;
use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{env, fs};
use tracing::info;

/// Env var that overrides the `api_key` found in the settings file.
pub const API_KEY_ENV: &str = "CATALOG_API_KEY";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    /// Base URL of the remote catalog service.
    pub catalog_url: String,

    /// Access credential sent with every call to the catalog service.
    #[serde(default)]
    pub api_key: String,

    /// IANA timezone of the office, e.g. "America/Chicago".
    pub time_zone: String,

    /// Weekdays when entries are allowed. Sunday is 0, Saturday is 6.
    pub voting_days: Vec<u8>,
}

impl Settings {
    pub fn from_file(path: &str) -> Result<Self, Status> {
        let text = fs::read_to_string(path)?;
        let mut settings = serde_json::from_str::<Settings>(&text)?;

        if let Ok(key) = env::var(API_KEY_ENV) {
            info!("api key overridden by {API_KEY_ENV}");
            settings.api_key = key;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), Status> {
        self.timezone()?;
        self.weekdays()?;
        if self.api_key.is_empty() {
            return Err(Status::invalid_argument(format!(
                "missing catalog api key, set it in settings or {API_KEY_ENV}"
            )));
        }
        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz, Status> {
        self.time_zone.parse::<Tz>().map_err(|e| {
            Status::invalid_argument(format!("unknown time_zone '{}': {e}", self.time_zone))
        })
    }

    pub fn weekdays(&self) -> Result<Vec<Weekday>, Status> {
        self.voting_days
            .iter()
            .map(|day| weekday_from_sunday_index(*day))
            .collect()
    }
}

/// Maps 0..=6 (Sunday = 0) to a `Weekday`.
pub fn weekday_from_sunday_index(day: u8) -> Result<Weekday, Status> {
    match day {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        day => Err(Status::invalid_argument(format!(
            "voting day {day} is outside 0..=6"
        ))),
    }
}
