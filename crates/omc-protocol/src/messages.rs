//! Messages exchanged with the receiver.
//!
//! Every notification is a flat JSON object discriminated by `msgType`.
//! Parsing applies each field's default once, here, so the rest of the app
//! only ever sees fully populated records.

use serde_json::{json, Map, Value};

use crate::constants::*;
use crate::error::*;
use crate::types::*;

// ============================================================================
// Kinds
// ============================================================================

/// The `msgType` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// `msgType` 0, also used for absent or unrecognized discriminants.
    Telemetry,
    /// `msgType` 1.
    Ack,
    /// `msgType` 2.
    Buzzer,
    /// `msgType` 3.
    Led,
    /// `msgType` 4.
    RainbowLed,
    /// `msgType` 5.
    PowerMode,
}

impl MessageKind {
    /// Map a raw discriminant. Anything outside 0..=5 is telemetry.
    pub fn from_msg_type(raw: i64) -> Self {
        match u8::try_from(raw) {
            Ok(MSG_ACKNOWLEDGEMENT) => MessageKind::Ack,
            Ok(MSG_BUZZER) => MessageKind::Buzzer,
            Ok(MSG_LED) => MessageKind::Led,
            Ok(MSG_RB_LED) => MessageKind::RainbowLed,
            Ok(MSG_PWR_MODE) => MessageKind::PowerMode,
            _ => MessageKind::Telemetry,
        }
    }

    /// The discriminant written to the wire.
    pub fn code(&self) -> u8 {
        match self {
            MessageKind::Telemetry => MSG_ALL_DATA,
            MessageKind::Ack => MSG_ACKNOWLEDGEMENT,
            MessageKind::Buzzer => MSG_BUZZER,
            MessageKind::Led => MSG_LED,
            MessageKind::RainbowLed => MSG_RB_LED,
            MessageKind::PowerMode => MSG_PWR_MODE,
        }
    }

    /// Whether the receiver appends its ambient state (light, power mode,
    /// signal) to this kind. Command echoes do not.
    pub fn carries_ambient_state(&self) -> bool {
        matches!(self, MessageKind::Telemetry)
    }

    /// Short name used in logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Telemetry => "telemetry",
            MessageKind::Ack => "ack",
            MessageKind::Buzzer => "buzzer",
            MessageKind::Led => "led",
            MessageKind::RainbowLed => "rainbow_led",
            MessageKind::PowerMode => "power_mode",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Records
// ============================================================================

/// The receiver's continuously reported state, appended to telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientState {
    /// Rainbow cycle flag. `None` when the receiver did not report it,
    /// which is not the same as `Some(false)`.
    pub rainbow: Option<bool>,
    /// Current power mode.
    pub mode: PowerMode,
    /// Signal-to-noise ratio of the last harness packet (dB).
    pub snr: f64,
    /// RSSI of the last harness packet (dBm).
    pub rssi: i32,
    /// Current solid LED colour.
    pub color: Rgb,
}

impl Default for AmbientState {
    fn default() -> Self {
        AmbientState {
            rainbow: None,
            mode: PowerMode::default(),
            snr: 0.0,
            rssi: DEFAULT_RSSI,
            color: Rgb::BLACK,
        }
    }
}

impl AmbientState {
    /// What the light icon should show.
    pub fn light(&self) -> LightIndicator {
        LightIndicator::from_state(self.color, self.rainbow)
    }

    /// Signal bucket for the RSSI.
    pub fn signal(&self) -> SignalBars {
        SignalBars::from_rssi(self.rssi)
    }
}

/// A full telemetry report (`msgType` 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Telemetry {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Altitude in metres.
    pub alt: f64,
    /// UTC time of the fix.
    pub time: GpsTime,
    /// Satellites in view.
    pub siv: u32,
    /// Horizontal dilution of precision.
    pub hdop: f64,
    /// Receiver battery.
    pub receiver_battery: BatteryLevel,
    /// Harness battery.
    pub harness_battery: BatteryLevel,
    /// Trailing ambient state.
    pub ambient: AmbientState,
}

impl Telemetry {
    pub fn satellites(&self) -> SatelliteFix {
        SatelliteFix::new(self.siv)
    }
}

/// A decoded message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Telemetry plus ambient state.
    Telemetry(Telemetry),
    /// Acknowledgement.
    Ack {
        ack: bool,
    },
    /// Buzzer state.
    Buzzer {
        on: bool,
    },
    /// Solid LED colour.
    Led {
        color: Rgb,
    },
    /// Rainbow cycle state.
    RainbowLed {
        enabled: bool,
    },
    /// Power mode.
    PowerMode {
        mode: PowerMode,
    },
}

impl Message {
    /// The kind of this message.
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Telemetry(_) => MessageKind::Telemetry,
            Message::Ack { .. } => MessageKind::Ack,
            Message::Buzzer { .. } => MessageKind::Buzzer,
            Message::Led { .. } => MessageKind::Led,
            Message::RainbowLed { .. } => MessageKind::RainbowLed,
            Message::PowerMode { .. } => MessageKind::PowerMode,
        }
    }

    /// The ambient state, for kinds that carry it.
    pub fn ambient(&self) -> Option<&AmbientState> {
        match self {
            Message::Telemetry(telemetry) => Some(&telemetry.ambient),
            _ => None,
        }
    }

    /// Parse decoded notification text.
    ///
    /// Fails only when the text is not a JSON object. Missing, `null` or
    /// mistyped fields take their defaults.
    pub fn parse(text: &str) -> ParseResult<Message> {
        let value: Value = serde_json::from_str(text)?;
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ParseError::Malformed(format!(
                    "expected a JSON object, got {}",
                    json_type_name(&other)
                )))
            }
        };
        Ok(Self::from_fields(&Fields(&object)))
    }

    fn from_fields(fields: &Fields<'_>) -> Message {
        let kind = MessageKind::from_msg_type(fields.i64_or(FIELD_MSG_TYPE, MSG_ALL_DATA as i64));
        match kind {
            MessageKind::Telemetry => Message::Telemetry(Telemetry {
                lat: fields.f64_or(FIELD_LAT, 0.0),
                lon: fields.f64_or(FIELD_LON, 0.0),
                alt: fields.f64_or(FIELD_ALT, 0.0),
                time: GpsTime::new(
                    fields.u32_or(FIELD_HOUR, 0),
                    fields.u32_or(FIELD_MIN, 0),
                    fields.u32_or(FIELD_SEC, 0),
                ),
                siv: fields.u32_or(FIELD_SIV, 0),
                hdop: fields.f64_or(FIELD_HDOP, 0.0),
                receiver_battery: BatteryLevel::new(fields.f64_or(FIELD_RECEIVER_BATTERY, 0.0)),
                harness_battery: BatteryLevel::new(fields.f64_or(FIELD_HARNESS_BATTERY, 0.0)),
                ambient: Self::ambient_from_fields(fields),
            }),
            MessageKind::Ack => Message::Ack {
                ack: fields.flag_or(FIELD_ACK, false),
            },
            MessageKind::Buzzer => Message::Buzzer {
                on: fields.flag_or(FIELD_BUZZER, false),
            },
            MessageKind::Led => Message::Led {
                color: fields.rgb(),
            },
            MessageKind::RainbowLed => Message::RainbowLed {
                enabled: fields.flag_or(FIELD_RAINBOW, false),
            },
            MessageKind::PowerMode => Message::PowerMode {
                mode: fields.mode_or(FIELD_MODE, DEFAULT_MODE),
            },
        }
    }

    fn ambient_from_fields(fields: &Fields<'_>) -> AmbientState {
        AmbientState {
            rainbow: fields.flag(FIELD_RAINBOW),
            mode: fields.mode_or(FIELD_MODE, DEFAULT_MODE),
            snr: fields.f64_or(FIELD_SNR, 0.0),
            rssi: fields.floor_i32_or(FIELD_RSSI, DEFAULT_RSSI),
            color: fields.rgb(),
        }
    }

    /// The canonical JSON object for this message.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(FIELD_MSG_TYPE.to_string(), json!(self.kind().code()));
        match self {
            Message::Telemetry(t) => {
                object.insert(FIELD_LAT.to_string(), json!(t.lat));
                object.insert(FIELD_LON.to_string(), json!(t.lon));
                object.insert(FIELD_ALT.to_string(), json!(t.alt));
                object.insert(FIELD_HOUR.to_string(), json!(t.time.hour));
                object.insert(FIELD_MIN.to_string(), json!(t.time.min));
                object.insert(FIELD_SEC.to_string(), json!(t.time.sec));
                object.insert(FIELD_SIV.to_string(), json!(t.siv));
                object.insert(FIELD_HDOP.to_string(), json!(t.hdop));
                object.insert(FIELD_RECEIVER_BATTERY.to_string(), json!(t.receiver_battery.percent()));
                object.insert(FIELD_HARNESS_BATTERY.to_string(), json!(t.harness_battery.percent()));
                if let Some(rainbow) = t.ambient.rainbow {
                    object.insert(FIELD_RAINBOW.to_string(), json!(rainbow));
                }
                object.insert(FIELD_MODE.to_string(), mode_json(t.ambient.mode));
                object.insert(FIELD_SNR.to_string(), json!(t.ambient.snr));
                object.insert(FIELD_RSSI.to_string(), json!(t.ambient.rssi));
                insert_rgb(&mut object, t.ambient.color);
            }
            Message::Ack { ack } => {
                object.insert(FIELD_ACK.to_string(), json!(ack));
            }
            Message::Buzzer { on } => {
                object.insert(FIELD_BUZZER.to_string(), json!(on));
            }
            Message::Led { color } => insert_rgb(&mut object, *color),
            Message::RainbowLed { enabled } => {
                object.insert(FIELD_RAINBOW.to_string(), json!(enabled));
            }
            Message::PowerMode { mode } => {
                object.insert(FIELD_MODE.to_string(), mode_json(*mode));
            }
        }
        Value::Object(object)
    }

    /// Compact JSON text for this message.
    pub fn to_text(&self) -> String {
        self.to_json().to_string()
    }
}

fn insert_rgb(object: &mut Map<String, Value>, color: Rgb) {
    object.insert(FIELD_RED.to_string(), json!(color.r));
    object.insert(FIELD_GREEN.to_string(), json!(color.g));
    object.insert(FIELD_BLUE.to_string(), json!(color.b));
}

fn mode_json(mode: PowerMode) -> Value {
    match mode.code() {
        Some(code) => json!(code),
        None => json!(mode.value()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Field Access
// ============================================================================

/// Lenient typed access to the fields of a notification.
///
/// The receiver is not consistent about types: numbers sometimes arrive as
/// strings (`"hBatt":"0"`, `"mode":"1"`). Numeric strings are accepted as
/// numbers; anything else unusable counts as absent.
struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    fn number(&self, key: &str) -> Option<f64> {
        let number = match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Null => None,
            other => {
                log::debug!("ignoring non-numeric {key}: {other}");
                None
            }
        };
        number.filter(|n| n.is_finite())
    }

    /// An exact integer. Fractional values count as absent.
    fn integer(&self, key: &str) -> Option<i64> {
        if let Some(n) = self.0.get(key).and_then(Value::as_i64) {
            return Some(n);
        }
        self.number(key)
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    }

    fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }

    fn i64_or(&self, key: &str, default: i64) -> i64 {
        self.integer(key).unwrap_or(default)
    }

    /// Rounded toward negative infinity, so `f >= t` and `floor(f) >= t`
    /// agree for every integer threshold `t`.
    fn floor_i32_or(&self, key: &str, default: i32) -> i32 {
        self.number(key)
            .map(|f| f.floor().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
            .unwrap_or(default)
    }

    fn u32_or(&self, key: &str, default: u32) -> u32 {
        self.number(key)
            .map(|f| f.trunc().clamp(0.0, u32::MAX as f64) as u32)
            .unwrap_or(default)
    }

    fn u8_or(&self, key: &str, default: u8) -> u8 {
        self.number(key)
            .map(|f| f.trunc().clamp(0.0, u8::MAX as f64) as u8)
            .unwrap_or(default)
    }

    /// A power mode. Non-integral values are kept and describe as unknown.
    fn mode_or(&self, key: &str, default: i64) -> PowerMode {
        match self.number(key) {
            Some(value) => PowerMode::from_value(value),
            None => PowerMode::from_raw(default),
        }
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => match s.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    fn flag_or(&self, key: &str, default: bool) -> bool {
        self.flag(key).unwrap_or(default)
    }

    fn rgb(&self) -> Rgb {
        Rgb::new(
            self.u8_or(FIELD_RED, 0),
            self.u8_or(FIELD_GREEN, 0),
            self.u8_or(FIELD_BLUE, 0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_full_telemetry() {
        let text = r#"{"msgType":0,"lat":40.1,"lon":-74.2,"alt":12.5,"hour":13,"min":5,"sec":0,"siv":6,"hdop":1.2,"rBatt":55,"hBatt":12,"rssi":-95,"snr":7.25,"mode":1,"rbLed":false,"r":0,"g":128,"b":0}"#;
        let Message::Telemetry(t) = Message::parse(text).unwrap() else {
            panic!("expected telemetry");
        };
        assert_relative_eq!(t.lat, 40.1);
        assert_relative_eq!(t.lon, -74.2);
        assert_relative_eq!(t.alt, 12.5);
        assert_eq!(t.time, GpsTime::new(13, 5, 0));
        assert_eq!(t.siv, 6);
        assert_relative_eq!(t.hdop, 1.2);
        assert_eq!(t.receiver_battery.percent(), 55.0);
        assert_eq!(t.harness_battery.percent(), 12.0);
        assert_eq!(t.ambient.rssi, -95);
        assert_relative_eq!(t.ambient.snr, 7.25);
        assert_eq!(t.ambient.mode, PowerMode::PowerSaving);
        assert_eq!(t.ambient.rainbow, Some(false));
        assert_eq!(t.ambient.color, Rgb::new(0, 128, 0));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let Message::Telemetry(t) = Message::parse(r#"{"msgType":0}"#).unwrap() else {
            panic!("expected telemetry");
        };
        assert_eq!(t, Telemetry::default());
        assert_eq!(t.ambient.rssi, DEFAULT_RSSI);
        assert_eq!(t.ambient.mode, PowerMode::NoTracking);
        assert_eq!(t.ambient.rainbow, None);
    }

    #[test]
    fn test_missing_or_unknown_msg_type_is_telemetry() {
        for text in [r#"{}"#, r#"{"msgType":9}"#, r#"{"msgType":-1}"#, r#"{"msgType":"x"}"#, r#"{"msgType":null}"#] {
            let message = Message::parse(text).unwrap();
            assert_eq!(message.kind(), MessageKind::Telemetry, "{text}");
        }
    }

    #[test]
    fn test_parse_command_echoes() {
        assert_eq!(Message::parse(r#"{"msgType":1,"ack":true}"#).unwrap(), Message::Ack { ack: true });
        assert_eq!(Message::parse(r#"{"msgType":1}"#).unwrap(), Message::Ack { ack: false });
        assert_eq!(Message::parse(r#"{"msgType":2,"buzzer":true}"#).unwrap(), Message::Buzzer { on: true });
        assert_eq!(
            Message::parse(r#"{"msgType":3,"r":255,"g":0,"b":0}"#).unwrap(),
            Message::Led { color: Rgb::new(255, 0, 0) }
        );
        assert_eq!(Message::parse(r#"{"msgType":4,"rbLed":1}"#).unwrap(), Message::RainbowLed { enabled: true });
        assert_eq!(
            Message::parse(r#"{"msgType":5}"#).unwrap(),
            Message::PowerMode { mode: PowerMode::NoTracking }
        );
    }

    #[test]
    fn test_echoes_do_not_carry_ambient_state() {
        let message = Message::parse(r#"{"msgType":3,"r":1,"rssi":-50,"mode":0}"#).unwrap();
        assert!(message.ambient().is_none());
        assert!(!message.kind().carries_ambient_state());
        assert!(MessageKind::Telemetry.carries_ambient_state());
    }

    #[test]
    fn test_numeric_strings_are_normalized() {
        let Message::Telemetry(t) =
            Message::parse(r#"{"msgType":"0","hBatt":"0","rBatt":" 42.5 ","mode":"2","rssi":"-101"}"#).unwrap()
        else {
            panic!("expected telemetry");
        };
        assert_eq!(t.harness_battery.percent(), 0.0);
        assert_eq!(t.receiver_battery.percent(), 42.5);
        assert_eq!(t.ambient.mode, PowerMode::ExtremePowerSaving);
        assert_eq!(t.ambient.rssi, -101);

        let message = Message::parse(r#"{"msgType":5,"mode":"1"}"#).unwrap();
        assert_eq!(message, Message::PowerMode { mode: PowerMode::PowerSaving });
    }

    #[test]
    fn test_discriminant_edges() {
        let cases: [(&str, MessageKind); 8] = [
            (r#"{"msgType":3.7,"lat":1.5}"#, MessageKind::Telemetry),
            (r#"{"msgType":1.0}"#, MessageKind::Ack),
            (r#"{"msgType":"3.0"}"#, MessageKind::Led),
            (r#"{"msgType":"2.5"}"#, MessageKind::Telemetry),
            (r#"{"msgType":true}"#, MessageKind::Telemetry),
            (r#"{"msgType":false}"#, MessageKind::Telemetry),
            (r#"{"msgType":[4]}"#, MessageKind::Telemetry),
            (r#"{"msgType":1e300}"#, MessageKind::Telemetry),
        ];
        for (text, kind) in cases {
            assert_eq!(Message::parse(text).unwrap().kind(), kind, "{text}");
        }

        let Message::Telemetry(t) = Message::parse(r#"{"msgType":3.7,"lat":1.5}"#).unwrap() else {
            panic!("expected telemetry");
        };
        assert_eq!(t.lat, 1.5);
    }

    #[test]
    fn test_mode_edges() {
        let cases: [(&str, &str); 6] = [
            (r#"{"mode":1.5}"#, "Error: Unknown"),
            (r#"{"mode":"0.5"}"#, "Error: Unknown"),
            (r#"{"mode":1.0}"#, "Power Saving Mode"),
            (r#"{"mode":"2"}"#, "Extreme Power Saving Mode"),
            (r#"{"mode":true}"#, "Error: No Tracking Mode"),
            (r#"{"mode":-3}"#, "Error: Unknown"),
        ];
        for (text, expected) in cases {
            let message = Message::parse(text).unwrap();
            let mode = message.ambient().unwrap().mode;
            assert_eq!(mode.describe(), expected, "{text}");
        }

        let echo = Message::parse(r#"{"msgType":5,"mode":1.5}"#).unwrap();
        assert_eq!(echo, Message::PowerMode { mode: PowerMode::from_value(1.5) });
        assert_eq!(echo.to_text(), r#"{"msgType":5,"mode":1.5}"#);
        assert_eq!(Message::parse(&echo.to_text()).unwrap(), echo);
    }

    #[test]
    fn test_fractional_rssi_rounds_down() {
        let cases: [(&str, i32, u8); 6] = [
            (r#"{"rssi":-90.5}"#, -91, 3),
            (r#"{"rssi":-90.0}"#, -90, 4),
            (r#"{"rssi":-89.9}"#, -90, 4),
            (r#"{"rssi":"-110.2"}"#, -111, 2),
            (r#"{"rssi":-130.01}"#, -131, 0),
            (r#"{"rssi":true}"#, DEFAULT_RSSI, 0),
        ];
        for (text, rssi, bars) in cases {
            let message = Message::parse(text).unwrap();
            let ambient = message.ambient().unwrap();
            assert_eq!(ambient.rssi, rssi, "{text}");
            assert_eq!(ambient.signal().bars(), bars, "{text}");
        }
    }

    #[test]
    fn test_mistyped_and_null_fields_are_absent() {
        let Message::Telemetry(t) =
            Message::parse(r#"{"lat":"north","lon":null,"siv":true,"rssi":{},"rbLed":"maybe"}"#).unwrap()
        else {
            panic!("expected telemetry");
        };
        assert_eq!(t.lat, 0.0);
        assert_eq!(t.lon, 0.0);
        assert_eq!(t.siv, 0);
        assert_eq!(t.ambient.rssi, DEFAULT_RSSI);
        assert_eq!(t.ambient.rainbow, None);
    }

    #[test]
    fn test_out_of_range_channels_saturate() {
        let message = Message::parse(r#"{"msgType":3,"r":300,"g":-4,"b":12.9}"#).unwrap();
        assert_eq!(message, Message::Led { color: Rgb::new(255, 0, 12) });
    }

    #[test]
    fn test_zero_values_are_kept() {
        // Explicit zeros are values, not absences.
        let Message::Telemetry(t) = Message::parse(r#"{"mode":0,"rssi":0}"#).unwrap() else {
            panic!("expected telemetry");
        };
        assert_eq!(t.ambient.mode, PowerMode::LiveTracking);
        assert_eq!(t.ambient.rssi, 0);
    }

    #[test]
    fn test_malformed_text() {
        assert!(matches!(Message::parse("not json"), Err(ParseError::Malformed(_))));
        assert!(matches!(Message::parse(r#"{"msgType":0,"lat":"#), Err(ParseError::Malformed(_))));
        assert!(matches!(Message::parse(""), Err(ParseError::Malformed(_))));
        assert!(matches!(Message::parse("[1,2,3]"), Err(ParseError::Malformed(_))));
        assert!(matches!(Message::parse("42"), Err(ParseError::Malformed(_))));
    }

    #[test]
    fn test_to_json_shape() {
        let json = Message::Led { color: Rgb::new(255, 0, 0) }.to_json();
        assert_eq!(json, serde_json::json!({"msgType": 3, "r": 255, "g": 0, "b": 0}));

        let json = Message::PowerMode { mode: PowerMode::ExtremePowerSaving }.to_json();
        assert_eq!(json, serde_json::json!({"msgType": 5, "mode": 2}));

        // An unreported rainbow flag stays unreported.
        let json = Message::Telemetry(Telemetry::default()).to_json();
        assert!(json.get(FIELD_RAINBOW).is_none());
        assert_eq!(json[FIELD_RSSI], -999);
    }

    #[test]
    fn test_telemetry_text_round_trip() {
        let original = Message::Telemetry(Telemetry {
            lat: 47.5,
            lon: -122.25,
            alt: 56.0,
            time: GpsTime::new(23, 59, 58),
            siv: 11,
            hdop: 0.75,
            receiver_battery: BatteryLevel::new(87.0),
            harness_battery: BatteryLevel::new(3.5),
            ambient: AmbientState {
                rainbow: Some(true),
                mode: PowerMode::Unknown(7),
                snr: -4.5,
                rssi: -121,
                color: Rgb::new(1, 2, 3),
            },
        });
        assert_eq!(Message::parse(&original.to_text()).unwrap(), original);
    }
}
