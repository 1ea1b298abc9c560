//! The monitor orchestrator and its poll loop.

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::alert::{AlertDetector, Notifier};
use crate::config::MonitorConfig;
use crate::fetch::StatusSource;
use crate::health::HealthTracker;
use crate::log::ReadingLog;
use crate::status::Reading;

/// Lifecycle phase of a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    /// Created, loop not started.
    Idle,
    /// Poll loop running.
    Polling,
    /// Loop exited after a shutdown signal; final flush done.
    Stopped,
}

/// Owns the poll loop and the per-run state.
///
/// Each tick performs, in order: fetch, health update, and - when the
/// fetch succeeded - display, log append, and alert edge check, invoking
/// the notifier on a new edge. Ticks are serialized: the tick body runs to
/// completion inside the loop, so a fetch slower than the poll interval
/// delays the next tick rather than overlapping it. All mutable state is
/// therefore touched from a single path and needs no locking.
pub struct Monitor {
    source: Box<dyn StatusSource>,
    notifier: Box<dyn Notifier>,
    health: HealthTracker,
    alerts: AlertDetector,
    log: ReadingLog,
    config: MonitorConfig,
    phase: MonitorPhase,
}

impl Monitor {
    /// Create a monitor over the given source and notifier.
    pub fn new(
        config: MonitorConfig,
        source: Box<dyn StatusSource>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            source,
            notifier,
            health: HealthTracker::new(config.max_failures),
            alerts: AlertDetector::new(),
            log: ReadingLog::new(&config.log_path, config.batch_size),
            config,
            phase: MonitorPhase::Idle,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> MonitorPhase {
        self.phase
    }

    /// Run the poll loop until `shutdown` signals true (or its sender is
    /// dropped), then flush the reading log one final time.
    ///
    /// No runtime error terminates the loop: fetch, parse, and persist
    /// failures are logged and the loop keeps ticking so the connection
    /// can recover.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        self.phase = MonitorPhase::Polling;

        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        if let Err(e) = self.log.flush() {
            warn!("final flush failed: {}", e);
        } else if !self.log.is_empty() {
            info!(
                readings = self.log.len(),
                path = %self.log.path().display(),
                "reading log saved"
            );
        }
        self.phase = MonitorPhase::Stopped;
    }

    /// One poll cycle: fetch, then process the outcome.
    async fn tick(&mut self) {
        match self.source.fetch().await {
            Ok(status) => {
                self.health.record_outcome(true);
                let reading = Reading::now(status);

                info!("{}", reading.status_line());

                if let Err(e) = self.log.append(reading.clone()) {
                    warn!("{}", e);
                }

                if self.alerts.check_edge(reading.status.total_alerts) {
                    self.notifier.notify(&reading);
                }
            }
            Err(err) => {
                self.health.record_outcome(false);
                warn!("fetch failed: {}", err);

                if !self.health.is_healthy() {
                    warn!(
                        failures = self.health.failures(),
                        "device may be offline or unreachable; check power, WiFi, and network"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::status::DeviceStatus;

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tempfile::tempdir;

    fn status(total_alerts: u64) -> DeviceStatus {
        DeviceStatus {
            sensor_value: 420,
            water_detected: total_alerts > 0,
            total_alerts,
            uptime: "5m".to_string(),
            signal_strength: -55,
        }
    }

    /// Source that replays a fixed script of outcomes.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<DeviceStatus, FetchError>>>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Result<DeviceStatus, FetchError>>) -> Self {
            Self {
                script: Mutex::new(outcomes.into()),
            }
        }
    }

    #[async_trait]
    impl StatusSource for ScriptedSource {
        async fn fetch(&self) -> Result<DeviceStatus, FetchError> {
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Other("script exhausted".to_string())))
        }

        fn description(&self) -> &str {
            "scripted"
        }
    }

    /// Notifier that records every reading it is handed.
    struct RecordingNotifier {
        received: Arc<Mutex<Vec<Reading>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, reading: &Reading) {
            self.received.lock().unwrap().push(reading.clone());
        }
    }

    fn test_config(dir: &std::path::Path, batch_size: usize) -> MonitorConfig {
        MonitorConfig {
            poll_interval: Duration::from_secs(1),
            batch_size,
            log_path: dir.join("sensor_log.json"),
            ..Default::default()
        }
    }

    /// Run a monitor over the scripted outcomes for `ticks` poll cycles,
    /// then signal shutdown and hand the monitor back for inspection.
    async fn run_ticks(monitor: Monitor, ticks: u32) -> Monitor {
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut monitor = monitor;
            monitor.run(rx).await;
            monitor
        });

        // Paused-time test: the first tick fires immediately, then one per
        // second. Land between ticks before signalling.
        tokio::time::sleep(Duration::from_millis(u64::from(ticks - 1) * 1000 + 500)).await;
        tx.send(true).unwrap();

        handle.await.unwrap()
    }

    fn persisted(path: &std::path::Path) -> Vec<serde_json::Value> {
        let content = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_edges_notified_once_per_increase() {
        let dir = tempdir().unwrap();
        let source = ScriptedSource::new(vec![
            Ok(status(0)),
            Ok(status(0)),
            Ok(status(1)),
            Ok(status(1)),
            Ok(status(2)),
        ]);
        let received = Arc::new(Mutex::new(Vec::new()));
        let notifier = RecordingNotifier {
            received: received.clone(),
        };

        let monitor = Monitor::new(
            test_config(dir.path(), 100),
            Box::new(source),
            Box::new(notifier),
        );
        let monitor = run_ticks(monitor, 5).await;

        let notified = received.lock().unwrap();
        assert_eq!(notified.len(), 2);
        assert_eq!(notified[0].status.total_alerts, 1);
        assert_eq!(notified[1].status.total_alerts, 2);
        assert_eq!(monitor.alerts.last_alert_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_skip_logging_and_loop_recovers() {
        let dir = tempdir().unwrap();
        let source = ScriptedSource::new(vec![
            Ok(status(0)),
            Err(FetchError::Timeout),
            Err(FetchError::ConnectionRefused),
            Ok(status(0)),
        ]);
        let received = Arc::new(Mutex::new(Vec::new()));
        let notifier = RecordingNotifier {
            received: received.clone(),
        };

        let monitor = Monitor::new(
            test_config(dir.path(), 100),
            Box::new(source),
            Box::new(notifier),
        );
        let monitor = run_ticks(monitor, 4).await;

        // Only successful fetches were buffered.
        assert_eq!(monitor.log.len(), 2);
        // The trailing success reset the failure count.
        assert_eq!(monitor.health.failures(), 0);
        assert!(monitor.health.is_healthy());
        assert!(received.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_partial_batch() {
        let dir = tempdir().unwrap();
        let source = ScriptedSource::new(vec![
            Ok(status(0)),
            Ok(status(1)),
            Ok(status(1)),
        ]);
        let notifier = RecordingNotifier {
            received: Arc::new(Mutex::new(Vec::new())),
        };

        // Batch size 10: nothing would flush without the shutdown flush.
        let config = test_config(dir.path(), 10);
        let log_path = config.log_path.clone();
        let monitor = Monitor::new(config, Box::new(source), Box::new(notifier));
        let monitor = run_ticks(monitor, 3).await;

        assert_eq!(monitor.phase(), MonitorPhase::Stopped);

        let entries = persisted(&log_path);
        assert_eq!(entries.len(), 3);
        let alerts: Vec<u64> = entries
            .iter()
            .map(|e| e.get("totalAlerts").unwrap().as_u64().unwrap())
            .collect();
        assert_eq!(alerts, vec![0, 1, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unhealthy_after_threshold_is_advisory() {
        let dir = tempdir().unwrap();
        let source = ScriptedSource::new(vec![
            Err(FetchError::Timeout),
            Err(FetchError::Timeout),
            Err(FetchError::Timeout),
            Err(FetchError::Timeout),
            Err(FetchError::Timeout),
            Ok(status(0)),
        ]);
        let notifier = RecordingNotifier {
            received: Arc::new(Mutex::new(Vec::new())),
        };

        let mut config = test_config(dir.path(), 100);
        config.max_failures = 5;
        let monitor = Monitor::new(config, Box::new(source), Box::new(notifier));

        // Five failures cross the threshold but the loop keeps ticking
        // and the sixth tick recovers.
        let monitor = run_ticks(monitor, 6).await;

        assert!(monitor.health.is_healthy());
        assert_eq!(monitor.log.len(), 1);
    }

    #[tokio::test]
    async fn test_new_monitor_is_idle() {
        let dir = tempdir().unwrap();
        let monitor = Monitor::new(
            test_config(dir.path(), 10),
            Box::new(ScriptedSource::new(Vec::new())),
            Box::new(RecordingNotifier {
                received: Arc::new(Mutex::new(Vec::new())),
            }),
        );
        assert_eq!(monitor.phase(), MonitorPhase::Idle);
    }
}
