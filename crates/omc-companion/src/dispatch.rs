//! Message classifier and dispatcher.
//!
//! Only telemetry carries the receiver's ambient state. Every other kind is a
//! command echo: it is logged and touches no sink.

use omc_protocol::{
    AmbientState, BatterySource, DisplayZone, Message, MessageKind, Telemetry,
};
use tracing::debug;

use crate::sinks::TelemetrySink;

/// What a dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Kind of the dispatched message.
    pub kind: MessageKind,
    /// Whether the ambient block (light, power mode, signal) was rendered.
    pub ambient_rendered: bool,
}

/// Routes decoded messages to a sink.
///
/// Holds configuration only; no state survives between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    zone: DisplayZone,
}

impl Dispatcher {
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    /// Zone used to render fix times.
    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    /// Write everything `message` carries to `sink`.
    pub fn dispatch<S>(&self, message: &Message, sink: &mut S) -> DispatchOutcome
    where
        S: TelemetrySink + ?Sized,
    {
        let kind = message.kind();
        match message {
            Message::Telemetry(telemetry) => self.render_telemetry(telemetry, sink),
            Message::Ack { ack } => debug!(ack, "ack received"),
            Message::Buzzer { on } => debug!(on, "buzzer echo"),
            Message::Led { color } => debug!(%color, "led echo"),
            Message::RainbowLed { enabled } => debug!(enabled, "rainbow echo"),
            Message::PowerMode { mode } => debug!(value = mode.value(), "power mode echo: {mode}"),
        }

        let ambient = if kind.carries_ambient_state() {
            message.ambient()
        } else {
            None
        };
        let ambient_rendered = match ambient {
            Some(ambient) => {
                render_ambient(ambient, sink);
                true
            }
            None => false,
        };

        DispatchOutcome { kind, ambient_rendered }
    }

    fn render_telemetry<S>(&self, telemetry: &Telemetry, sink: &mut S)
    where
        S: TelemetrySink + ?Sized,
    {
        debug!(alt = telemetry.alt, "telemetry");
        sink.location(telemetry.lat, telemetry.lon);
        sink.time(&telemetry.time.localize(self.zone));
        sink.battery(telemetry.harness_battery, BatterySource::Harness);
        sink.battery(telemetry.receiver_battery, BatterySource::Receiver);
        sink.satellites(telemetry.satellites());
        sink.hdop(telemetry.hdop);
    }
}

fn render_ambient<S>(ambient: &AmbientState, sink: &mut S)
where
    S: TelemetrySink + ?Sized,
{
    debug!(snr = ambient.snr, rainbow = ?ambient.rainbow, "ambient state");
    sink.light(ambient.light());
    sink.power_mode(ambient.mode);
    sink.signal(ambient.rssi, ambient.signal());
}
