//! # floodwatch
//!
//! A polling monitor for networked water leak sensors.
//!
//! floodwatch polls a sensor device's HTTP status endpoint on a fixed
//! interval, tracks connectivity health, keeps a rolling log of readings
//! on disk, and raises a notification whenever the device reports a new
//! alert.
//!
//! ## Architecture
//!
//! ```text
//!            ┌──────────────────────────────────────────────┐
//!            │                   Monitor                    │
//!            │  tick: fetch → health → display/log → alert  │
//!            └──┬───────────┬───────────┬───────────┬───────┘
//!               │           │           │           │
//!          ┌────▼────┐ ┌────▼─────┐ ┌───▼──────┐ ┌──▼───────┐
//!          │ fetch   │ │ health   │ │ log      │ │ alert    │
//!          │ (HTTP)  │ │ (counter)│ │ (buffer) │ │ (edges)  │
//!          └─────────┘ └──────────┘ └──────────┘ └──────────┘
//! ```
//!
//! - **[`fetch`]**: the [`StatusSource`] trait and the HTTP
//!   [`StatusFetcher`] that queries the device's `/api/status` endpoint
//! - **[`health`]**: consecutive-failure tracking against a threshold
//! - **[`alert`]**: rising-edge detection on the device's alert counter,
//!   plus the [`Notifier`] delivery boundary
//! - **[`log`]**: the buffered [`ReadingLog`] with full-rewrite flushes
//! - **[`monitor`]**: the orchestrator that ties the pieces together in a
//!   serialized tick loop
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the default device address
//! floodwatch
//!
//! # Poll a specific device
//! floodwatch 192.168.1.42
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use floodwatch::{ConsoleNotifier, Monitor, MonitorConfig, StatusFetcher};
//!
//! # tokio_test::block_on(async {
//! let config = MonitorConfig::for_device("192.168.1.42");
//! let fetcher = StatusFetcher::new(config.endpoint.clone(), config.request_timeout).unwrap();
//! let mut monitor = Monitor::new(config, Box::new(fetcher), Box::new(ConsoleNotifier));
//!
//! let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! monitor.run(shutdown_rx).await;
//! # });
//! ```

pub mod alert;
pub mod config;
pub mod error;
pub mod fetch;
pub mod health;
pub mod log;
pub mod monitor;
pub mod status;

// Re-export main types for convenience
pub use alert::{AlertDetector, ConsoleNotifier, Notifier};
pub use config::{endpoint_for, MonitorConfig, DEFAULT_DEVICE_ADDR};
pub use error::{FetchError, ParseError, PersistError};
pub use fetch::{StatusFetcher, StatusSource};
pub use health::HealthTracker;
pub use log::ReadingLog;
pub use monitor::{Monitor, MonitorPhase};
pub use status::{DeviceStatus, Reading};
