//! Protocol constants
//!
//! Message type discriminants, field names, power mode codes and the
//! defaults applied when the receiver omits a field.

// ============================================================================
// Message Types (`msgType`)
// ============================================================================

/// Full telemetry report (position, time, fix quality, batteries) followed by
/// the receiver's ambient state.
pub const MSG_ALL_DATA: u8 = 0;
/// Acknowledgement from the harness.
pub const MSG_ACKNOWLEDGEMENT: u8 = 1;
/// Buzzer on/off.
pub const MSG_BUZZER: u8 = 2;
/// Solid LED colour.
pub const MSG_LED: u8 = 3;
/// Rainbow LED cycle on/off.
pub const MSG_RB_LED: u8 = 4;
/// Power mode selection.
pub const MSG_PWR_MODE: u8 = 5;

// ============================================================================
// Power Modes (`mode`)
// ============================================================================

/// GNSS on, position reported continuously.
pub const MODE_LIVE_TRACKING: i64 = 0;
/// Reduced reporting rate.
pub const MODE_POWER_SAVING: i64 = 1;
/// Minimal reporting rate.
pub const MODE_EXTREME_POWER_SAVING: i64 = 2;
/// Tracking disabled.
pub const MODE_NO_TRACKING: i64 = 10;

// ============================================================================
// Field Names
// ============================================================================

pub const FIELD_MSG_TYPE: &str = "msgType";
pub const FIELD_LAT: &str = "lat";
pub const FIELD_LON: &str = "lon";
pub const FIELD_ALT: &str = "alt";
pub const FIELD_HOUR: &str = "hour";
pub const FIELD_MIN: &str = "min";
pub const FIELD_SEC: &str = "sec";
pub const FIELD_SIV: &str = "siv";
pub const FIELD_HDOP: &str = "hdop";
pub const FIELD_RECEIVER_BATTERY: &str = "rBatt";
pub const FIELD_HARNESS_BATTERY: &str = "hBatt";
pub const FIELD_ACK: &str = "ack";
pub const FIELD_BUZZER: &str = "buzzer";
pub const FIELD_RED: &str = "r";
pub const FIELD_GREEN: &str = "g";
pub const FIELD_BLUE: &str = "b";
pub const FIELD_RAINBOW: &str = "rbLed";
pub const FIELD_MODE: &str = "mode";
pub const FIELD_SNR: &str = "snr";
pub const FIELD_RSSI: &str = "rssi";

// ============================================================================
// Defaults
// ============================================================================

/// RSSI reported when the receiver has not heard the harness yet.
pub const DEFAULT_RSSI: i32 = -999;
/// Power mode assumed when `mode` is absent.
pub const DEFAULT_MODE: i64 = MODE_NO_TRACKING;

// ============================================================================
// Signal Thresholds (dBm, lower bound of each bar count)
// ============================================================================

pub const RSSI_FOUR_BARS: i32 = -90;
pub const RSSI_THREE_BARS: i32 = -110;
pub const RSSI_TWO_BARS: i32 = -120;
pub const RSSI_ONE_BAR: i32 = -130;

// ============================================================================
// Battery Thresholds (percent)
// ============================================================================

/// Below this level the battery is critical.
pub const BATTERY_CRITICAL_BELOW: f64 = 10.0;
/// Below this level (and not critical) the battery is low.
pub const BATTERY_LOW_BELOW: f64 = 30.0;
/// Height used to draw an empty battery so the gauge stays visible.
pub const BATTERY_EMPTY_DISPLAY_FLOOR: f64 = 1.0;

// ============================================================================
// Framing
// ============================================================================

/// Largest notification accepted from a stream bridge.
pub const MAX_NOTIFICATION_SIZE: usize = 4096;
/// Terminator between notifications on a stream bridge.
pub const NOTIFICATION_TERMINATOR: u8 = b'\n';
/// UTF-8 byte order mark, dropped from the start of a frame.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ============================================================================
// BLE Identifiers
// ============================================================================

/// Name the receiver advertises.
pub const DEVICE_NAME: &str = "Mount";
/// GATT service carrying the protocol.
pub const SERVICE_UUID: &str = "4fafc201-1fb5-459e-8fcc-c5c9c331914b";
/// Notify/write characteristic every frame goes through.
pub const CHARACTERISTIC_UUID: &str = "beb5483e-36e1-4688-b7f5-ea07361b26a8";
