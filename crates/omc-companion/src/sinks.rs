//! Typed state sinks.
//!
//! A sink is the write-only end of the inbound pipeline: the dispatcher hands
//! it one decoded value per category and never reads anything back.

use std::fmt;

use omc_protocol::{BatteryLevel, BatterySource, LightIndicator, PowerMode, SatelliteFix, SignalBars};
use tracing::info;

/// Consumer of decoded receiver state, one method per display category.
pub trait TelemetrySink {
    /// Marker position.
    fn location(&mut self, lat: f64, lon: f64);

    /// Fix time, already rendered in the display zone.
    fn time(&mut self, local: &str);

    /// One battery reading. Telemetry carries two, tagged by source.
    fn battery(&mut self, level: BatteryLevel, source: BatterySource);

    fn satellites(&mut self, fix: SatelliteFix);

    /// Raw HDOP value.
    fn hdop(&mut self, hdop: f64);

    fn light(&mut self, light: LightIndicator);

    fn power_mode(&mut self, mode: PowerMode);

    /// RSSI in dBm with its bucket.
    fn signal(&mut self, rssi: i32, bars: SignalBars);
}

/// One recorded sink write.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Location { lat: f64, lon: f64 },
    Time(String),
    Battery { level: BatteryLevel, source: BatterySource },
    Satellites(SatelliteFix),
    Hdop(f64),
    Light(LightIndicator),
    PowerMode(PowerMode),
    Signal { rssi: i32, bars: SignalBars },
}

impl SinkEvent {
    /// Sink category this write went to.
    pub fn category(&self) -> &'static str {
        match self {
            SinkEvent::Location { .. } => "location",
            SinkEvent::Time(_) => "time",
            SinkEvent::Battery { .. } => "battery",
            SinkEvent::Satellites(_) => "satellites",
            SinkEvent::Hdop(_) => "hdop",
            SinkEvent::Light(_) => "light",
            SinkEvent::PowerMode(_) => "power_mode",
            SinkEvent::Signal { .. } => "signal",
        }
    }
}

impl fmt::Display for SinkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkEvent::Location { lat, lon } => write!(f, "location: {lat}, {lon}"),
            SinkEvent::Time(local) => write!(f, "time: {local}"),
            SinkEvent::Battery { level, source } => {
                write!(f, "battery ({source}): {level} [{}]", level.band())
            }
            SinkEvent::Satellites(fix) => write!(f, "satellites: {fix}"),
            SinkEvent::Hdop(hdop) => write!(f, "hdop: {hdop} HDOP"),
            SinkEvent::Light(light) => write!(f, "light: {}", describe_light(light)),
            SinkEvent::PowerMode(mode) => write!(f, "power mode: {mode}"),
            SinkEvent::Signal { rssi, bars } => write!(f, "signal: {rssi} dBm ({bars})"),
        }
    }
}

fn describe_light(light: &LightIndicator) -> String {
    match light {
        LightIndicator::Solid(rgb) => format!("solid {rgb}"),
        LightIndicator::Rainbow => "rainbow".to_string(),
        LightIndicator::Off => "off".to_string(),
    }
}

/// A sink that keeps every write in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes recorded so far.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Drain the recorded writes.
    pub fn take(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distinct categories written, in first-write order.
    pub fn categories(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for event in &self.events {
            let category = event.category();
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }
}

impl TelemetrySink for RecordingSink {
    fn location(&mut self, lat: f64, lon: f64) {
        self.events.push(SinkEvent::Location { lat, lon });
    }

    fn time(&mut self, local: &str) {
        self.events.push(SinkEvent::Time(local.to_string()));
    }

    fn battery(&mut self, level: BatteryLevel, source: BatterySource) {
        self.events.push(SinkEvent::Battery { level, source });
    }

    fn satellites(&mut self, fix: SatelliteFix) {
        self.events.push(SinkEvent::Satellites(fix));
    }

    fn hdop(&mut self, hdop: f64) {
        self.events.push(SinkEvent::Hdop(hdop));
    }

    fn light(&mut self, light: LightIndicator) {
        self.events.push(SinkEvent::Light(light));
    }

    fn power_mode(&mut self, mode: PowerMode) {
        self.events.push(SinkEvent::PowerMode(mode));
    }

    fn signal(&mut self, rssi: i32, bars: SignalBars) {
        self.events.push(SinkEvent::Signal { rssi, bars });
    }
}

/// A sink that renders every update as a structured log event.
#[derive(Debug, Clone)]
pub struct LogSink {
    device: String,
}

impl LogSink {
    pub fn new(device: impl Into<String>) -> Self {
        Self { device: device.into() }
    }
}

impl TelemetrySink for LogSink {
    fn location(&mut self, lat: f64, lon: f64) {
        info!(device = %self.device, lat, lon, "location: {lat}, {lon}");
    }

    fn time(&mut self, local: &str) {
        info!(device = %self.device, "time: {local}");
    }

    fn battery(&mut self, level: BatteryLevel, source: BatterySource) {
        info!(
            device = %self.device,
            source = source.as_str(),
            band = level.band().as_str(),
            color = level.band().color(),
            height = level.display_height(),
            "battery: {level}"
        );
    }

    fn satellites(&mut self, fix: SatelliteFix) {
        info!(device = %self.device, fix = fix.has_fix(), "satellites: {fix}");
    }

    fn hdop(&mut self, hdop: f64) {
        info!(device = %self.device, "hdop: {hdop} HDOP");
    }

    fn light(&mut self, light: LightIndicator) {
        info!(device = %self.device, lit = light.is_lit(), "light: {}", describe_light(&light));
    }

    fn power_mode(&mut self, mode: PowerMode) {
        info!(device = %self.device, value = mode.value(), "power mode: {mode}");
    }

    fn signal(&mut self, rssi: i32, bars: SignalBars) {
        info!(device = %self.device, bars = bars.bars(), "signal: {rssi} dBm");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omc_protocol::Rgb;

    #[test]
    fn test_recording_sink_categories() {
        let mut sink = RecordingSink::new();
        sink.battery(BatteryLevel::new(12.0), BatterySource::Harness);
        sink.battery(BatteryLevel::new(55.0), BatterySource::Receiver);
        sink.hdop(1.2);

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.categories(), vec!["battery", "hdop"]);

        let events = sink.take();
        assert_eq!(events.len(), 3);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_event_display() {
        let location = SinkEvent::Location { lat: 40.1, lon: -74.2 };
        assert_eq!(location.to_string(), "location: 40.1, -74.2");

        let battery = SinkEvent::Battery {
            level: BatteryLevel::new(12.0),
            source: BatterySource::Harness,
        };
        assert_eq!(battery.to_string(), "battery (harness): 12% [low]");

        let signal = SinkEvent::Signal { rssi: -95, bars: SignalBars::from_rssi(-95) };
        assert_eq!(signal.to_string(), "signal: -95 dBm (3/4)");

        let light = SinkEvent::Light(LightIndicator::Solid(Rgb::new(255, 0, 0)));
        assert_eq!(light.category(), "light");
    }
}
