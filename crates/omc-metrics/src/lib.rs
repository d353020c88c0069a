//! Metrics for the OMC companion.
//!
//! Every metric the companion records is declared once in [`metric_defs`] as a
//! [`Metric`] constant, so names, units and label keys cannot drift between
//! the recording sites and the exporter. The `metrics` facade is re-exported.
//!
//! ```rust,ignore
//! use omc_metrics::{describe_metrics, metric_defs, DeviceLabels};
//!
//! describe_metrics();
//! let labels = DeviceLabels::new("Mount");
//! metrics::counter!(metric_defs::FRAMES_RECEIVED.name, &labels.to_labels()).increment(1);
//! ```

pub use metrics;

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

/// How a metric is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

/// A metric declaration. Built with const constructors so every entry in
/// [`metric_defs`] is a compile-time constant.
#[derive(Debug, Clone)]
pub struct Metric {
    /// Full metric name, e.g. `omc.frames.received`.
    pub name: &'static str,
    pub kind: MetricKind,
    pub description: &'static str,
    pub unit: Option<Unit>,
    /// Label keys recorded with this metric, `device` first.
    pub labels: &'static [&'static str],
}

impl Metric {
    const fn new(name: &'static str, kind: MetricKind) -> Self {
        Self {
            name,
            kind,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    pub const fn counter(name: &'static str) -> Self {
        Self::new(name, MetricKind::Counter)
    }

    pub const fn gauge(name: &'static str) -> Self {
        Self::new(name, MetricKind::Gauge)
    }

    pub const fn histogram(name: &'static str) -> Self {
        Self::new(name, MetricKind::Histogram)
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Register the description and unit with the installed recorder.
    pub fn describe(&self) {
        let (name, description) = (self.name, self.description);
        match (self.kind, self.unit) {
            (MetricKind::Counter, Some(unit)) => describe_counter!(name, unit, description),
            (MetricKind::Counter, None) => describe_counter!(name, description),
            (MetricKind::Gauge, Some(unit)) => describe_gauge!(name, unit, description),
            (MetricKind::Gauge, None) => describe_gauge!(name, description),
            (MetricKind::Histogram, Some(unit)) => describe_histogram!(name, unit, description),
            (MetricKind::Histogram, None) => describe_histogram!(name, description),
        }
    }
}

/// All metric definitions for the companion.
pub mod metric_defs {
    use super::{Metric, Unit};

    /// Labels present on every metric.
    pub const STANDARD_LABELS: &[&str] = &["device"];

    // ========================================================================
    // Inbound Frames
    // ========================================================================

    /// Frames handed to the session by the transport.
    pub const FRAMES_RECEIVED: Metric = Metric::counter("omc.frames.received")
        .with_description("Frames received from the receiver")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Frames discarded because they were not a JSON object.
    pub const FRAMES_MALFORMED: Metric = Metric::counter("omc.frames.malformed")
        .with_description("Frames discarded as malformed")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Size of each received frame.
    pub const FRAME_SIZE: Metric = Metric::histogram("omc.frames.size_bytes")
        .with_description("Received frame size in bytes")
        .with_unit(Unit::Bytes)
        .with_labels(STANDARD_LABELS);

    /// Messages dispatched, by kind.
    ///
    /// Labels: device, kind
    pub const MESSAGES_DISPATCHED: Metric = Metric::counter("omc.messages.dispatched")
        .with_description("Messages dispatched to the sinks")
        .with_unit(Unit::Count)
        .with_labels(&["device", "kind"]);

    // ========================================================================
    // Outbound Commands
    // ========================================================================

    /// Commands written to the transport.
    ///
    /// Labels: device, command
    pub const COMMANDS_SENT: Metric = Metric::counter("omc.commands.sent")
        .with_description("Commands written to the receiver")
        .with_unit(Unit::Count)
        .with_labels(&["device", "command"]);

    /// Commands dropped because no transport was ready.
    ///
    /// Labels: device, command
    pub const COMMANDS_DROPPED: Metric = Metric::counter("omc.commands.dropped")
        .with_description("Commands dropped with no transport ready")
        .with_unit(Unit::Count)
        .with_labels(&["device", "command"]);

    /// Commands whose write was rejected by the transport.
    ///
    /// Labels: device, command
    pub const COMMANDS_FAILED: Metric = Metric::counter("omc.commands.failed")
        .with_description("Commands rejected by the transport")
        .with_unit(Unit::Count)
        .with_labels(&["device", "command"]);

    // ========================================================================
    // Device State
    // ========================================================================

    /// RSSI of the harness link as reported by the receiver.
    pub const SIGNAL_RSSI: Metric = Metric::histogram("omc.signal.rssi_dbm")
        .with_description("Harness link RSSI in dBm")
        .with_labels(STANDARD_LABELS);

    /// SNR of the harness link as reported by the receiver.
    pub const SIGNAL_SNR: Metric = Metric::histogram("omc.signal.snr_db")
        .with_description("Harness link SNR in dB")
        .with_labels(STANDARD_LABELS);

    /// Last reported battery level.
    ///
    /// Labels: device, source (harness or receiver)
    pub const BATTERY_LEVEL: Metric = Metric::gauge("omc.battery.level_percent")
        .with_description("Battery level in percent")
        .with_unit(Unit::Percent)
        .with_labels(&["device", "source"]);

    /// Satellites in view at the last fix.
    pub const SATELLITES_IN_VIEW: Metric = Metric::gauge("omc.gnss.satellites")
        .with_description("Satellites in view at the last fix")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Returns a slice of all defined metrics.
    pub const ALL: &[&Metric] = &[
        // Inbound Frames
        &FRAMES_RECEIVED,
        &FRAMES_MALFORMED,
        &FRAME_SIZE,
        &MESSAGES_DISPATCHED,
        // Outbound Commands
        &COMMANDS_SENT,
        &COMMANDS_DROPPED,
        &COMMANDS_FAILED,
        // Device State
        &SIGNAL_RSSI,
        &SIGNAL_SNR,
        &BATTERY_LEVEL,
        &SATELLITES_IN_VIEW,
    ];
}

/// Labels identifying the device a metric belongs to.
///
/// ```rust
/// use omc_metrics::DeviceLabels;
///
/// let labels = DeviceLabels::new("Mount");
/// let extended = labels.with(&[("kind", "telemetry".to_string())]);
/// assert_eq!(extended.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceLabels {
    /// Device name (the advertised BLE name or a configured alias).
    pub device: String,
}

impl DeviceLabels {
    /// Creates labels for the named device.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
        }
    }

    /// Converts the labels to the metrics crate label format.
    pub fn to_labels(&self) -> Vec<(&'static str, String)> {
        vec![("device", self.device.clone())]
    }

    /// Returns labels with additional key-value pairs.
    pub fn with(&self, extra: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
        let mut labels = self.to_labels();
        labels.extend_from_slice(extra);
        labels
    }
}

/// Registers the descriptions of every metric with the installed recorder.
///
/// Call once at startup, after the recorder is installed.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}

/// Installs a Prometheus recorder serving `/metrics` on `addr`.
///
/// Must be called from within a tokio runtime.
#[cfg(feature = "prometheus")]
pub fn install_prometheus(
    addr: std::net::SocketAddr,
) -> Result<(), metrics_exporter_prometheus::BuildError> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    describe_metrics();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_labels() {
        let labels = DeviceLabels::new("Mount");
        assert_eq!(labels.to_labels(), vec![("device", "Mount".to_string())]);
    }

    #[test]
    fn test_with_extra_labels() {
        let labels = DeviceLabels::new("Mount");
        let extended = labels.with(&[("kind", "ack".to_string()), ("source", "harness".to_string())]);

        assert_eq!(extended.len(), 3);
        assert!(extended.contains(&("kind", "ack".to_string())));
        assert!(extended.contains(&("source", "harness".to_string())));
    }

    #[test]
    fn test_metric_definitions() {
        assert_eq!(metric_defs::FRAMES_RECEIVED.name, "omc.frames.received");
        assert_eq!(metric_defs::FRAMES_RECEIVED.kind, MetricKind::Counter);
        assert_eq!(metric_defs::FRAME_SIZE.unit, Some(Unit::Bytes));
        assert_eq!(metric_defs::BATTERY_LEVEL.kind, MetricKind::Gauge);
        assert_eq!(metric_defs::BATTERY_LEVEL.labels, &["device", "source"]);
        assert_eq!(metric_defs::SIGNAL_RSSI.kind, MetricKind::Histogram);
        assert_eq!(metric_defs::SIGNAL_RSSI.unit, None);
    }

    #[test]
    fn test_metric_names_are_unique() {
        let mut names: Vec<&str> = metric_defs::ALL.iter().map(|m| m.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), metric_defs::ALL.len());
        assert_eq!(metric_defs::ALL.len(), 11);
    }

    #[test]
    fn test_every_metric_has_a_description() {
        for metric in metric_defs::ALL {
            assert!(!metric.description.is_empty(), "{} has no description", metric.name);
            assert_eq!(metric.labels.first(), Some(&"device"), "{}", metric.name);
        }
    }

    #[test]
    fn test_metric_builder() {
        const TEST_GAUGE: Metric = Metric::gauge("test.gauge")
            .with_description("A test gauge")
            .with_unit(Unit::Percent)
            .with_labels(&["device"]);

        assert_eq!(TEST_GAUGE.kind, MetricKind::Gauge);
        assert_eq!(TEST_GAUGE.description, "A test gauge");
        assert_eq!(TEST_GAUGE.unit, Some(Unit::Percent));
        assert_eq!(TEST_GAUGE.labels, &["device"]);
    }

    #[test]
    fn test_metric_minimal() {
        const MINIMAL: Metric = Metric::counter("minimal");

        assert_eq!(MINIMAL.kind, MetricKind::Counter);
        assert_eq!(MINIMAL.description, "");
        assert_eq!(MINIMAL.unit, None);
        assert_eq!(MINIMAL.labels, &[] as &[&str]);
    }
}
