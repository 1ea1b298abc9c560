//! Shared types for device status reports and logged readings.
//!
//! These types match the JSON format served by the sensor firmware's
//! `/api/status` endpoint. They are the common format between the device
//! and this monitor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single status report as served by the device.
///
/// Field names follow the firmware's camelCase JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    /// Raw analog value from the water sensor.
    pub sensor_value: i64,

    /// Whether the sensor currently detects water.
    pub water_detected: bool,

    /// Total alerts raised since the device booted.
    /// Monotonically non-decreasing within a device session.
    pub total_alerts: u64,

    /// Human-readable device uptime (e.g., "2d 3h 14m").
    pub uptime: String,

    /// WiFi signal strength in dBm.
    pub signal_strength: i64,
}

/// A status report stamped with the time it was received.
///
/// This is the unit persisted by the reading log: the device's status
/// fields plus an added `timestamp`, flattened so the on-disk layout is
/// a flat object per reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    /// When this reading was received, ISO-8601 / RFC 3339.
    pub timestamp: DateTime<Utc>,

    #[serde(flatten)]
    pub status: DeviceStatus,
}

impl Reading {
    /// Stamp a device status with the current time.
    pub fn now(status: DeviceStatus) -> Self {
        Self {
            timestamp: Utc::now(),
            status,
        }
    }

    /// One-line console summary of this reading.
    pub fn status_line(&self) -> String {
        let state = if self.status.water_detected {
            "WATER DETECTED"
        } else {
            "all clear"
        };
        format!(
            "{:<14} | value: {:>4} | alerts: {:>3} | uptime: {:>12} | signal: {:>4} dBm",
            state,
            self.status.sensor_value,
            self.status.total_alerts,
            self.status.uptime,
            self.status.signal_strength,
        )
    }
}
