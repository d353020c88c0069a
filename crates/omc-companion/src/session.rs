//! A companion session: one receiver, its command channel and the inbound
//! and outbound pipelines.

use std::fmt;
use std::sync::Arc;

use omc_metrics::{metric_defs, DeviceLabels};
use omc_protocol::{decode_frame, BatterySource, Command, Message, MessageKind, Telemetry};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::dispatch::Dispatcher;
use crate::error::{SendError, TransportError};
use crate::sinks::TelemetrySink;
use crate::transport::CommandChannel;

/// Result of handling one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame parsed and was dispatched as this kind.
    Dispatched(MessageKind),
    /// The frame was malformed and dropped.
    Discarded,
}

/// Handle for an in-flight command write.
pub type SendHandle = JoinHandle<Result<(), TransportError>>;

/// Connection state for one receiver.
///
/// Owned by the application shell. Inbound frames go through
/// [`handle_frame`](Session::handle_frame) one at a time; commands go out
/// through [`send`](Session::send) without waiting for each other.
pub struct Session {
    labels: DeviceLabels,
    dispatcher: Dispatcher,
    channel: Option<Arc<dyn CommandChannel>>,
}

impl Session {
    pub fn new(device: impl Into<String>, dispatcher: Dispatcher) -> Self {
        Self {
            labels: DeviceLabels::new(device),
            dispatcher,
            channel: None,
        }
    }

    /// Name of the receiver this session talks to.
    pub fn device(&self) -> &str {
        &self.labels.device
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Use `channel` for outbound commands, replacing any previous one.
    pub fn attach(&mut self, channel: Arc<dyn CommandChannel>) {
        if self.channel.replace(channel).is_some() {
            debug!(device = %self.labels.device, "replaced command channel");
        }
    }

    /// Forget the command channel, returning it.
    pub fn detach(&mut self) -> Option<Arc<dyn CommandChannel>> {
        self.channel.take()
    }

    /// Whether a command sent now would be handed to a channel.
    pub fn is_connected(&self) -> bool {
        self.channel.as_ref().is_some_and(|channel| channel.is_ready())
    }

    /// Decode, parse and dispatch one inbound frame.
    ///
    /// A malformed frame is logged and dropped. It never affects the next one.
    pub fn handle_frame<S>(&self, frame: &[u8], sink: &mut S) -> FrameOutcome
    where
        S: TelemetrySink + ?Sized,
    {
        let labels = self.labels.to_labels();
        metrics::counter!(metric_defs::FRAMES_RECEIVED.name, &labels).increment(1);
        metrics::histogram!(metric_defs::FRAME_SIZE.name, &labels).record(frame.len() as f64);

        let text = decode_frame(frame);
        let message = match Message::parse(&text) {
            Ok(message) => message,
            Err(e) => {
                warn!(device = %self.labels.device, frame = %text, "discarding frame: {e}");
                metrics::counter!(metric_defs::FRAMES_MALFORMED.name, &labels).increment(1);
                return FrameOutcome::Discarded;
            }
        };

        let outcome = self.dispatcher.dispatch(&message, sink);
        let kind_labels = self.labels.with(&[("kind", outcome.kind.as_str().to_string())]);
        metrics::counter!(metric_defs::MESSAGES_DISPATCHED.name, &kind_labels).increment(1);
        if let Message::Telemetry(telemetry) = &message {
            self.record_telemetry(telemetry);
        }

        FrameOutcome::Dispatched(outcome.kind)
    }

    fn record_telemetry(&self, telemetry: &Telemetry) {
        let labels = self.labels.to_labels();
        for (source, level) in [
            (BatterySource::Harness, telemetry.harness_battery),
            (BatterySource::Receiver, telemetry.receiver_battery),
        ] {
            let source_labels = self.labels.with(&[("source", source.as_str().to_string())]);
            metrics::gauge!(metric_defs::BATTERY_LEVEL.name, &source_labels).set(level.percent());
        }
        metrics::gauge!(metric_defs::SATELLITES_IN_VIEW.name, &labels).set(telemetry.siv as f64);
        metrics::histogram!(metric_defs::SIGNAL_RSSI.name, &labels)
            .record(telemetry.ambient.rssi as f64);
        metrics::histogram!(metric_defs::SIGNAL_SNR.name, &labels).record(telemetry.ambient.snr);
    }

    /// Encode `command` and start writing it.
    ///
    /// Fails immediately with [`SendError::TransportUnavailable`] when no
    /// ready channel is attached; the command is dropped, not queued.
    /// Otherwise the write runs on the current tokio runtime and this
    /// returns at once. A failed write is logged by the spawned task; the
    /// returned handle may be awaited to observe it.
    pub fn send(&self, command: &Command) -> Result<SendHandle, SendError> {
        let command_labels = self
            .labels
            .with(&[("command", command.to_message().kind().as_str().to_string())]);

        let channel = match &self.channel {
            Some(channel) if channel.is_ready() => Arc::clone(channel),
            _ => {
                warn!(device = %self.labels.device, %command, "transport unavailable, dropping command");
                metrics::counter!(metric_defs::COMMANDS_DROPPED.name, &command_labels).increment(1);
                return Err(SendError::TransportUnavailable);
            }
        };
        let runtime = Handle::try_current().map_err(|_| SendError::NoRuntime)?;

        let frame = command.encode();
        debug!(device = %self.labels.device, %command, bytes = frame.len(), "sending command");
        let write = channel.write(frame);
        let device = self.labels.device.clone();
        let description = command.to_string();

        Ok(runtime.spawn(async move {
            let result = write.await;
            match &result {
                Ok(()) => {
                    info!(device = %device, "sent {description}");
                    metrics::counter!(metric_defs::COMMANDS_SENT.name, &command_labels).increment(1);
                }
                Err(e) => {
                    warn!(device = %device, "send rejected for {description}: {e}");
                    metrics::counter!(metric_defs::COMMANDS_FAILED.name, &command_labels).increment(1);
                }
            }
            result
        }))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("device", &self.labels.device)
            .field("dispatcher", &self.dispatcher)
            .field("connected", &self.is_connected())
            .finish()
    }
}
