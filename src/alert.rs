//! Alert edge detection and the notification boundary.

use tracing::warn;

use crate::status::Reading;

/// Detects the rising edge of the device's alert counter.
///
/// The device reports a running total of alerts; an edge is a strict
/// increase over the highest value seen so far. If the counter moves
/// backwards (device reset or reboot), the detector resynchronizes to the
/// lower value without reporting an edge, so alerts raised after the
/// reboot are still detected.
#[derive(Debug, Clone, Default)]
pub struct AlertDetector {
    last_alert_count: u64,
}

impl AlertDetector {
    /// Create a detector with no alerts seen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a reported alert total for a new alert.
    ///
    /// Returns true exactly once per strict increase.
    pub fn check_edge(&mut self, total_alerts: u64) -> bool {
        if total_alerts > self.last_alert_count {
            self.last_alert_count = total_alerts;
            return true;
        }
        if total_alerts < self.last_alert_count {
            warn!(
                reported = total_alerts,
                tracked = self.last_alert_count,
                "device alert counter moved backwards, resynchronizing"
            );
            self.last_alert_count = total_alerts;
        }
        false
    }

    /// Highest alert total seen (after any resynchronization).
    pub fn last_alert_count(&self) -> u64 {
        self.last_alert_count
    }
}

/// Trait for delivering alert notifications.
///
/// The monitor calls [`Notifier::notify`] synchronously within the tick,
/// at most once per detected edge. Implementations decide the delivery
/// mechanism: email, SMS, webhook, or just the console.
pub trait Notifier: Send {
    /// Deliver a notification for the reading that triggered the edge.
    fn notify(&mut self, reading: &Reading);
}

/// Default notifier that prints an alert banner to the log.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, reading: &Reading) {
        warn!(
            time = %reading.timestamp,
            sensor_value = reading.status.sensor_value,
            total_alerts = reading.status.total_alerts,
            "NEW WATER ALERT"
        );
    }
}
