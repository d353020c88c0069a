//! Common types used in the protocol.
//!
//! Besides the raw field types this module holds the derived classifications
//! the app renders: power mode text, signal bars, battery bands, the light
//! indicator and the satellite fix flag.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};

use crate::constants::*;

// ============================================================================
// Power Mode
// ============================================================================

/// Power mode reported by (or requested from) the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerMode {
    /// GNSS on, continuous reporting.
    LiveTracking,
    /// Reduced reporting rate.
    PowerSaving,
    /// Minimal reporting rate.
    ExtremePowerSaving,
    /// Tracking disabled.
    NoTracking,
    /// A code this app does not know.
    Unknown(i64),
    /// A value that is not an integer code, kept as its `f64` bits so it
    /// re-encodes as received.
    Invalid(u64),
}

impl PowerMode {
    /// Map a raw `mode` value.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            MODE_LIVE_TRACKING => PowerMode::LiveTracking,
            MODE_POWER_SAVING => PowerMode::PowerSaving,
            MODE_EXTREME_POWER_SAVING => PowerMode::ExtremePowerSaving,
            MODE_NO_TRACKING => PowerMode::NoTracking,
            other => PowerMode::Unknown(other),
        }
    }

    /// Map a numeric `mode` value. Anything that is not an exact integer
    /// is [`PowerMode::Invalid`].
    pub fn from_value(value: f64) -> Self {
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Self::from_raw(value as i64)
        } else {
            PowerMode::Invalid(value.to_bits())
        }
    }

    /// The integer code written to the wire, or `None` for an invalid value.
    pub fn code(&self) -> Option<i64> {
        match self {
            PowerMode::LiveTracking => Some(MODE_LIVE_TRACKING),
            PowerMode::PowerSaving => Some(MODE_POWER_SAVING),
            PowerMode::ExtremePowerSaving => Some(MODE_EXTREME_POWER_SAVING),
            PowerMode::NoTracking => Some(MODE_NO_TRACKING),
            PowerMode::Unknown(raw) => Some(*raw),
            PowerMode::Invalid(_) => None,
        }
    }

    /// The numeric value as reported.
    pub fn value(&self) -> f64 {
        match self {
            PowerMode::Invalid(bits) => f64::from_bits(*bits),
            other => other.code().map_or(f64::NAN, |code| code as f64),
        }
    }

    /// Human readable text shown in the power mode field.
    pub fn describe(&self) -> &'static str {
        match self {
            PowerMode::LiveTracking => "Live Tracking",
            PowerMode::PowerSaving => "Power Saving Mode",
            PowerMode::ExtremePowerSaving => "Extreme Power Saving Mode",
            PowerMode::NoTracking => "Error: No Tracking Mode",
            PowerMode::Unknown(_) | PowerMode::Invalid(_) => "Error: Unknown",
        }
    }
}

impl Default for PowerMode {
    fn default() -> Self {
        PowerMode::from_raw(DEFAULT_MODE)
    }
}

impl fmt::Display for PowerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

// ============================================================================
// Signal
// ============================================================================

/// Signal strength bucket, 0 (nothing) to 4 (strong).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalBars(u8);

impl SignalBars {
    /// Highest bucket.
    pub const MAX: u8 = 4;

    /// Classify an RSSI reading in dBm. The first threshold the reading
    /// reaches wins, so each bucket includes its lower bound.
    pub fn from_rssi(rssi: i32) -> Self {
        let bars = if rssi >= RSSI_FOUR_BARS {
            4
        } else if rssi >= RSSI_THREE_BARS {
            3
        } else if rssi >= RSSI_TWO_BARS {
            2
        } else if rssi >= RSSI_ONE_BAR {
            1
        } else {
            0
        };
        SignalBars(bars)
    }

    /// Number of bars to draw.
    pub fn bars(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for SignalBars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

// ============================================================================
// Battery
// ============================================================================

/// Which battery a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatterySource {
    /// The battery on the pet's harness (`hBatt`).
    Harness,
    /// The handheld receiver's battery (`rBatt`).
    Receiver,
}

impl BatterySource {
    /// Lowercase tag used in logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            BatterySource::Harness => "harness",
            BatterySource::Receiver => "receiver",
        }
    }
}

impl fmt::Display for BatterySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour band of a battery gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryBand {
    /// Below 10%.
    Critical,
    /// 10% up to (not including) 30%.
    Low,
    /// 30% and above.
    Normal,
}

impl BatteryBand {
    /// Lowercase name of the band.
    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryBand::Critical => "critical",
            BatteryBand::Low => "low",
            BatteryBand::Normal => "normal",
        }
    }

    /// CSS colour of the gauge fill.
    pub fn color(&self) -> &'static str {
        match self {
            BatteryBand::Critical => "red",
            BatteryBand::Low => "orange",
            BatteryBand::Normal => "#32dd37",
        }
    }
}

impl fmt::Display for BatteryBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A battery percentage. Values above 100 are kept as reported.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct BatteryLevel(f64);

impl BatteryLevel {
    /// Wrap a percentage.
    pub fn new(percent: f64) -> Self {
        BatteryLevel(percent)
    }

    /// The reported percentage.
    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Classify the level for colouring.
    pub fn band(&self) -> BatteryBand {
        if self.0 < BATTERY_CRITICAL_BELOW {
            BatteryBand::Critical
        } else if self.0 < BATTERY_LOW_BELOW {
            BatteryBand::Low
        } else {
            BatteryBand::Normal
        }
    }

    /// Fill height of the gauge. An empty battery is drawn at a 1% floor;
    /// small positive levels are drawn as reported.
    pub fn display_height(&self) -> f64 {
        if self.0 == 0.0 {
            BATTERY_EMPTY_DISPLAY_FLOOR
        } else {
            self.0
        }
    }
}

impl fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// ============================================================================
// Light
// ============================================================================

/// An RGB colour as sent to the harness LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// All channels off.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// True when every channel is zero.
    pub fn is_off(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// What the light icon shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightIndicator {
    /// A solid colour is lit.
    Solid(Rgb),
    /// The rainbow cycle is running.
    Rainbow,
    /// The light is off.
    Off,
}

impl LightIndicator {
    /// A lit channel takes precedence over the rainbow flag.
    pub fn from_state(color: Rgb, rainbow: Option<bool>) -> Self {
        if !color.is_off() {
            LightIndicator::Solid(color)
        } else if rainbow == Some(true) {
            LightIndicator::Rainbow
        } else {
            LightIndicator::Off
        }
    }

    pub fn is_lit(&self) -> bool {
        !matches!(self, LightIndicator::Off)
    }
}

// ============================================================================
// Satellites
// ============================================================================

/// Satellites in view as reported by the harness GNSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SatelliteFix {
    pub siv: u32,
}

impl SatelliteFix {
    pub fn new(siv: u32) -> Self {
        SatelliteFix { siv }
    }

    /// At least one satellite is in view.
    pub fn has_fix(&self) -> bool {
        self.siv >= 1
    }
}

impl fmt::Display for SatelliteFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SIV", self.siv)
    }
}

// ============================================================================
// Time
// ============================================================================

/// Format used for localized fix times, e.g. `1:05:00 PM UTC-05:00`.
pub const LOCAL_TIME_FORMAT: &str = "%-I:%M:%S %p UTC%:z";

/// Zone used to display fix times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The host's local time zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Build a fixed zone from an offset in minutes east of UTC.
    /// Returns `None` when the offset is out of range.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(DisplayZone::Fixed)
    }
}

/// UTC time of day attached to a GNSS fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpsTime {
    pub hour: u32,
    pub min: u32,
    pub sec: u32,
}

impl GpsTime {
    pub fn new(hour: u32, min: u32, sec: u32) -> Self {
        GpsTime { hour, min, sec }
    }

    /// The time as reported, e.g. `13:05:00 UTC`.
    pub fn utc_string(&self) -> String {
        format!("{:02}:{:02}:{:02} UTC", self.hour, self.min, self.sec)
    }

    /// Localize against today's UTC date.
    pub fn localize(&self, zone: DisplayZone) -> String {
        self.localize_on(Utc::now().date_naive(), zone)
    }

    /// Localize the fix time as if it happened on `date` (UTC). Components
    /// outside a valid time of day fall back to [`GpsTime::utc_string`].
    pub fn localize_on(&self, date: NaiveDate, zone: DisplayZone) -> String {
        let Some(naive) = date.and_hms_opt(self.hour, self.min, self.sec) else {
            log::debug!("fix time {} is not a valid time of day", self.utc_string());
            return self.utc_string();
        };
        let utc: DateTime<Utc> = Utc.from_utc_datetime(&naive);
        match zone {
            DisplayZone::Local => utc.with_timezone(&Local).format(LOCAL_TIME_FORMAT).to_string(),
            DisplayZone::Fixed(offset) => {
                utc.with_timezone(&offset).format(LOCAL_TIME_FORMAT).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_mode_text() {
        assert_eq!(PowerMode::from_raw(0).describe(), "Live Tracking");
        assert_eq!(PowerMode::from_raw(1).describe(), "Power Saving Mode");
        assert_eq!(PowerMode::from_raw(2).describe(), "Extreme Power Saving Mode");
        assert_eq!(PowerMode::from_raw(10).describe(), "Error: No Tracking Mode");
        assert_eq!(PowerMode::from_raw(999).describe(), "Error: Unknown");
        assert_eq!(PowerMode::from_raw(3), PowerMode::Unknown(3));
        assert_eq!(PowerMode::Unknown(3).code(), Some(3));
        assert_eq!(PowerMode::from_value(2.0), PowerMode::ExtremePowerSaving);
        assert_eq!(PowerMode::from_value(1.5).describe(), "Error: Unknown");
        assert_eq!(PowerMode::from_value(1.5).code(), None);
        assert_eq!(PowerMode::from_value(1.5).value(), 1.5);
        assert_eq!(PowerMode::default(), PowerMode::NoTracking);
    }

    #[test]
    fn test_signal_bar_boundaries() {
        assert_eq!(SignalBars::from_rssi(-40).bars(), 4);
        assert_eq!(SignalBars::from_rssi(-90).bars(), 4);
        assert_eq!(SignalBars::from_rssi(-91).bars(), 3);
        assert_eq!(SignalBars::from_rssi(-110).bars(), 3);
        assert_eq!(SignalBars::from_rssi(-111).bars(), 2);
        assert_eq!(SignalBars::from_rssi(-120).bars(), 2);
        assert_eq!(SignalBars::from_rssi(-121).bars(), 1);
        assert_eq!(SignalBars::from_rssi(-130).bars(), 1);
        assert_eq!(SignalBars::from_rssi(-131).bars(), 0);
        assert_eq!(SignalBars::from_rssi(DEFAULT_RSSI).bars(), 0);
    }

    #[test]
    fn test_battery_bands() {
        assert_eq!(BatteryLevel::new(0.0).band(), BatteryBand::Critical);
        assert_eq!(BatteryLevel::new(9.0).band(), BatteryBand::Critical);
        assert_eq!(BatteryLevel::new(9.9).band(), BatteryBand::Critical);
        assert_eq!(BatteryLevel::new(10.0).band(), BatteryBand::Low);
        assert_eq!(BatteryLevel::new(29.0).band(), BatteryBand::Low);
        assert_eq!(BatteryLevel::new(30.0).band(), BatteryBand::Normal);
        assert_eq!(BatteryLevel::new(140.0).band(), BatteryBand::Normal);
        assert_eq!(BatteryBand::Critical.color(), "red");
        assert_eq!(BatteryBand::Normal.color(), "#32dd37");
    }

    #[test]
    fn test_empty_battery_floor() {
        let empty = BatteryLevel::new(0.0);
        assert_eq!(empty.display_height(), 1.0);
        assert_eq!(empty.band(), BatteryBand::Critical);
        assert_eq!(empty.to_string(), "0%");

        // Small positive levels are not lifted to the floor.
        assert_eq!(BatteryLevel::new(0.5).display_height(), 0.5);
        assert_eq!(BatteryLevel::new(55.0).to_string(), "55%");
    }

    #[test]
    fn test_light_indicator() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(LightIndicator::from_state(red, Some(true)), LightIndicator::Solid(red));
        assert_eq!(LightIndicator::from_state(Rgb::BLACK, Some(true)), LightIndicator::Rainbow);
        assert_eq!(LightIndicator::from_state(Rgb::BLACK, Some(false)), LightIndicator::Off);
        assert_eq!(LightIndicator::from_state(Rgb::BLACK, None), LightIndicator::Off);
        assert!(!LightIndicator::Off.is_lit());
    }

    #[test]
    fn test_satellite_fix() {
        assert!(!SatelliteFix::new(0).has_fix());
        assert!(SatelliteFix::new(6).has_fix());
        assert_eq!(SatelliteFix::new(6).to_string(), "6 SIV");
    }

    #[test]
    fn test_localize_fixed_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let time = GpsTime::new(13, 5, 0);

        let utc = DisplayZone::from_offset_minutes(0).unwrap();
        assert_eq!(time.localize_on(date, utc), "1:05:00 PM UTC+00:00");

        let eastern = DisplayZone::from_offset_minutes(-300).unwrap();
        assert_eq!(time.localize_on(date, eastern), "8:05:00 AM UTC-05:00");
    }

    #[test]
    fn test_localize_invalid_time_falls_back() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let time = GpsTime::new(25, 0, 0);
        let zone = DisplayZone::from_offset_minutes(60).unwrap();
        assert_eq!(time.localize_on(date, zone), "25:00:00 UTC");
    }

    #[test]
    fn test_display_zone_out_of_range() {
        assert!(DisplayZone::from_offset_minutes(24 * 60).is_none());
        assert!(DisplayZone::from_offset_minutes(i32::MAX).is_none());
    }
}
