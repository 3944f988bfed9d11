// Copyright (c) 2025 - Cowboy AI, Inc.
//! Booking policy and service configuration
//!
//! Every number the availability engine and validator depend on lives in
//! [`BookingPolicy`]. Defaults reproduce the production policy; tests and
//! deployments can load alternates from JSON or the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::domain::TimeSlot;
use crate::errors::{ReservationError, ReservationResult};

/// Booking policy constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingPolicy {
    /// First hour a reservation may start
    pub opening_hour: u32,
    /// Hour by which every reservation must have ended
    pub closing_hour: u32,
    /// Seats per room; one approved reservation consumes all of them
    pub room_capacity: u32,
    pub min_duration_hours: u32,
    pub max_duration_hours: u32,
    /// Active (pending or approved) reservations one email may hold per day
    pub max_daily_reservations: usize,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            opening_hour: 7,
            closing_hour: 19,
            room_capacity: 20,
            min_duration_hours: 1,
            max_duration_hours: 4,
            max_daily_reservations: 2,
        }
    }
}

impl BookingPolicy {
    /// Reject policies the engine cannot reason about
    pub fn validate(&self) -> ReservationResult<()> {
        if self.opening_hour >= self.closing_hour {
            return Err(ReservationError::Configuration(format!(
                "opening hour {} must be before closing hour {}",
                self.opening_hour, self.closing_hour
            )));
        }
        if self.closing_hour > 24 {
            return Err(ReservationError::Configuration(format!(
                "closing hour {} is past midnight",
                self.closing_hour
            )));
        }
        if self.room_capacity == 0 {
            return Err(ReservationError::Configuration(
                "room capacity must be positive".to_string(),
            ));
        }
        if self.min_duration_hours == 0 || self.min_duration_hours > self.max_duration_hours {
            return Err(ReservationError::Configuration(format!(
                "duration bounds {}..={} are empty",
                self.min_duration_hours, self.max_duration_hours
            )));
        }
        if self.max_daily_reservations == 0 {
            return Err(ReservationError::Configuration(
                "daily reservation quota must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Selectable start slots, opening through closing hour inclusive
    pub fn time_slots(&self) -> Vec<TimeSlot> {
        TimeSlot::range_inclusive(self.opening_hour, self.closing_hour)
    }

    /// Hours that key a day-availability breakdown, `[opening, closing)`
    pub fn operating_hours(&self) -> std::ops::Range<u32> {
        self.opening_hour..self.closing_hour
    }
}

/// Simulated email delivery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationConfig {
    /// Artificial latency of a simulated send, in milliseconds
    pub send_delay_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { send_delay_ms: 1000 }
    }
}

impl NotificationConfig {
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}

/// Top-level configuration for [`crate::service::ReservationService`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceConfig {
    pub policy: BookingPolicy,
    pub notification: NotificationConfig,
    /// Shared administrator password
    pub admin_password: String,
    /// Optimistic rounds (submit re-validation, review re-check) before
    /// giving up on a contended store
    pub submit_attempts: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            policy: BookingPolicy::default(),
            notification: NotificationConfig::default(),
            admin_password: "admin123".to_string(),
            submit_attempts: 3,
        }
    }
}

impl ServiceConfig {
    /// Parse a JSON document; missing fields fall back to defaults
    pub fn from_json_str(json: &str) -> ReservationResult<Self> {
        let config: ServiceConfig = serde_json::from_str(json)
            .map_err(|e| ReservationError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> ReservationResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Load configuration from `LAB_CONFIG` (if set) and apply env overrides
    ///
    /// - `LAB_CONFIG`: path to a JSON configuration file
    /// - `LAB_ADMIN_PASSWORD`: shared administrator password
    /// - `LAB_EMAIL_DELAY_MS`: simulated send latency
    pub fn from_env() -> ReservationResult<Self> {
        let mut config = match std::env::var("LAB_CONFIG") {
            Ok(path) => Self::from_json_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(password) = std::env::var("LAB_ADMIN_PASSWORD") {
            config.admin_password = password;
        }

        if let Ok(delay) = std::env::var("LAB_EMAIL_DELAY_MS") {
            config.notification.send_delay_ms = delay.parse().map_err(|_| {
                ReservationError::Configuration(format!("LAB_EMAIL_DELAY_MS is not a number: {delay}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ReservationResult<()> {
        self.policy.validate()?;
        if self.submit_attempts == 0 {
            return Err(ReservationError::Configuration(
                "submit attempts must be positive".to_string(),
            ));
        }
        if self.admin_password.is_empty() {
            return Err(ReservationError::Configuration(
                "admin password must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_policy() {
        let policy = BookingPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.operating_hours().count(), 12);
        assert_eq!(policy.time_slots().len(), 13);
    }

    #[test]
    fn test_invalid_policies() {
        let inverted = BookingPolicy {
            opening_hour: 19,
            closing_hour: 7,
            ..BookingPolicy::default()
        };
        assert!(inverted.validate().is_err());

        let no_capacity = BookingPolicy {
            room_capacity: 0,
            ..BookingPolicy::default()
        };
        assert!(no_capacity.validate().is_err());

        let empty_durations = BookingPolicy {
            min_duration_hours: 5,
            ..BookingPolicy::default()
        };
        assert!(empty_durations.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ServiceConfig::from_json_str(
            r#"{ "policy": { "maxDailyReservations": 3 }, "notification": { "sendDelayMs": 0 } }"#,
        )
        .unwrap();

        assert_eq!(config.policy.max_daily_reservations, 3);
        assert_eq!(config.policy.room_capacity, 20);
        assert_eq!(config.notification.send_delay(), Duration::ZERO);
        assert_eq!(config.admin_password, "admin123");
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lab.json");
        std::fs::write(&path, r#"{ "adminPassword": "s3creto", "submitAttempts": 5 }"#).unwrap();

        let config = ServiceConfig::from_json_file(&path).unwrap();
        assert_eq!(config.admin_password, "s3creto");
        assert_eq!(config.submit_attempts, 5);
        assert_eq!(config.policy, BookingPolicy::default());

        assert!(matches!(
            ServiceConfig::from_json_file(dir.path().join("missing.json")),
            Err(ReservationError::Io(_))
        ));
    }

    #[test]
    fn test_json_rejects_invalid_policy() {
        let result = ServiceConfig::from_json_str(r#"{ "policy": { "roomCapacity": 0 } }"#);
        assert!(matches!(result, Err(ReservationError::Configuration(_))));
    }
}
