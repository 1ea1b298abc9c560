//! Monitor configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default device address used when none is given on the command line.
pub const DEFAULT_DEVICE_ADDR: &str = "192.168.1.100";

/// Configuration for a monitor run.
///
/// Defaults reproduce the sensor firmware's documented integration
/// parameters: poll every 5 seconds, 5 second request timeout, warn after
/// 5 consecutive failures, flush the log every 10 readings.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Full status endpoint URL.
    pub endpoint: String,
    /// Time between poll ticks.
    pub poll_interval: Duration,
    /// Per-request timeout for status fetches.
    pub request_timeout: Duration,
    /// Consecutive failures before the connection is considered unhealthy.
    pub max_failures: u32,
    /// Number of buffered readings between automatic flushes.
    pub batch_size: usize,
    /// Path of the persisted reading log.
    pub log_path: PathBuf,
}

impl MonitorConfig {
    /// Build a config for the given device address with all defaults.
    pub fn for_device(addr: &str) -> Self {
        Self {
            endpoint: endpoint_for(addr),
            ..Default::default()
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            endpoint: endpoint_for(DEFAULT_DEVICE_ADDR),
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_millis(5000),
            max_failures: 5,
            batch_size: 10,
            log_path: PathBuf::from("sensor_log.json"),
        }
    }
}

/// Status endpoint URL for a device address (IP or host\[:port\]).
pub fn endpoint_for(addr: &str) -> String {
    format!("http://{}/api/status", addr)
}
