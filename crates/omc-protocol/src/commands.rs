//! Commands that can be sent to the receiver.

use std::fmt;
use std::str::FromStr;

use crate::frame::encode_message;
use crate::messages::Message;
use crate::types::*;

/// The LED palette offered by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedColor {
    /// Placeholder colour; the rainbow cycle itself is a separate command.
    Rainbow,
    Red,
    Pink,
    Purple,
    Orange,
    BrightOrange,
    Yellow,
    BrightGreen,
    Green,
    Blue,
    Cyan,
    White,
    Off,
}

impl LedColor {
    /// Every colour in menu order.
    pub const ALL: [LedColor; 13] = [
        LedColor::Rainbow,
        LedColor::Red,
        LedColor::Pink,
        LedColor::Purple,
        LedColor::Orange,
        LedColor::BrightOrange,
        LedColor::Yellow,
        LedColor::BrightGreen,
        LedColor::Green,
        LedColor::Blue,
        LedColor::Cyan,
        LedColor::White,
        LedColor::Off,
    ];

    /// RGB value sent for this colour.
    pub fn rgb(&self) -> Rgb {
        match self {
            LedColor::Rainbow => Rgb::new(255, 0, 255),
            LedColor::Red => Rgb::new(255, 0, 0),
            LedColor::Pink => Rgb::new(128, 50, 128),
            LedColor::Purple => Rgb::new(128, 0, 128),
            LedColor::Orange => Rgb::new(255, 165, 0),
            LedColor::BrightOrange => Rgb::new(255, 140, 0),
            LedColor::Yellow => Rgb::new(255, 255, 0),
            LedColor::BrightGreen => Rgb::new(0, 255, 0),
            LedColor::Green => Rgb::new(0, 128, 0),
            LedColor::Blue => Rgb::new(0, 0, 255),
            LedColor::Cyan => Rgb::new(0, 255, 255),
            LedColor::White => Rgb::new(255, 255, 255),
            LedColor::Off => Rgb::BLACK,
        }
    }

    /// Display name as shown in the colour menu.
    pub fn name(&self) -> &'static str {
        match self {
            LedColor::Rainbow => "Rainbow",
            LedColor::Red => "Red",
            LedColor::Pink => "Pink",
            LedColor::Purple => "Purple",
            LedColor::Orange => "Orange",
            LedColor::BrightOrange => "Bright Orange",
            LedColor::Yellow => "Yellow",
            LedColor::BrightGreen => "Bright Green",
            LedColor::Green => "Green",
            LedColor::Blue => "Blue",
            LedColor::Cyan => "Cyan",
            LedColor::White => "White",
            LedColor::Off => "Off",
        }
    }

    /// Menu code (1-based).
    pub fn code(&self) -> u8 {
        match self {
            LedColor::Rainbow => 1,
            LedColor::Red => 2,
            LedColor::Pink => 3,
            LedColor::Purple => 4,
            LedColor::Orange => 5,
            LedColor::BrightOrange => 6,
            LedColor::Yellow => 7,
            LedColor::BrightGreen => 8,
            LedColor::Green => 9,
            LedColor::Blue => 10,
            LedColor::Cyan => 11,
            LedColor::White => 12,
            LedColor::Off => 13,
        }
    }

    /// Look up a colour by menu code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Look up a colour by name or menu code. Case, spaces, dashes and
    /// underscores are ignored, so `"bright-green"` matches `Bright Green`.
    pub fn lookup(selection: &str) -> Option<Self> {
        let trimmed = selection.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_code(code);
        }
        let wanted = normalize_name(trimmed);
        Self::ALL.iter().copied().find(|c| normalize_name(c.name()) == wanted)
    }

    /// Resolve a menu selection; anything unknown turns the light off.
    pub fn from_selection(selection: &str) -> Self {
        Self::lookup(selection).unwrap_or_else(|| {
            log::debug!("unknown colour selection {selection:?}, using Off");
            LedColor::Off
        })
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a colour name is not in the palette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown LED colour: {0}")]
pub struct UnknownColor(pub String);

impl FromStr for LedColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| UnknownColor(s.to_string()))
    }
}

/// Commands that can be sent to the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Light the LED with a solid colour.
    SetLed {
        /// Colour to show.
        color: Rgb,
    },

    /// Turn the buzzer on or off.
    SetBuzzer {
        /// Buzzer state.
        on: bool,
    },

    /// Start or stop the rainbow cycle.
    SetRainbow {
        /// Rainbow state.
        enabled: bool,
    },

    /// Switch the harness power mode.
    SetPowerMode {
        /// Requested mode.
        mode: PowerMode,
    },
}

impl Command {
    /// LED command for a palette colour.
    pub fn led(color: LedColor) -> Self {
        Command::SetLed { color: color.rgb() }
    }

    /// LED command for a menu selection; unknown selections send black.
    pub fn led_selection(selection: &str) -> Self {
        Self::led(LedColor::from_selection(selection))
    }

    /// The message this command is sent as.
    pub fn to_message(&self) -> Message {
        match self {
            Command::SetLed { color } => Message::Led { color: *color },
            Command::SetBuzzer { on } => Message::Buzzer { on: *on },
            Command::SetRainbow { enabled } => Message::RainbowLed { enabled: *enabled },
            Command::SetPowerMode { mode } => Message::PowerMode { mode: *mode },
        }
    }

    /// Encode the command to a frame.
    pub fn encode(&self) -> Vec<u8> {
        encode_message(&self.to_message())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetLed { color } => write!(f, "led {color}"),
            Command::SetBuzzer { on } => write!(f, "buzzer {}", if *on { "on" } else { "off" }),
            Command::SetRainbow { enabled } => {
                write!(f, "rainbow {}", if *enabled { "on" } else { "off" })
            }
            Command::SetPowerMode { mode } => write!(f, "power mode {} ({})", mode.value(), mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::parse_frame;

    #[test]
    fn test_palette_lookup() {
        assert_eq!(LedColor::lookup("Red"), Some(LedColor::Red));
        assert_eq!(LedColor::lookup("bright green"), Some(LedColor::BrightGreen));
        assert_eq!(LedColor::lookup("BRIGHT_ORANGE"), Some(LedColor::BrightOrange));
        assert_eq!(LedColor::lookup("12"), Some(LedColor::White));
        assert_eq!(LedColor::lookup("14"), None);
        assert_eq!(LedColor::lookup("magenta"), None);
        assert_eq!("cyan".parse::<LedColor>(), Ok(LedColor::Cyan));
        assert!("teal".parse::<LedColor>().is_err());
    }

    #[test]
    fn test_palette_codes_are_unique() {
        for (i, color) in LedColor::ALL.iter().enumerate() {
            assert_eq!(color.code() as usize, i + 1);
            assert_eq!(LedColor::from_code(color.code()), Some(*color));
        }
    }

    #[test]
    fn test_unknown_selection_is_black() {
        assert_eq!(Command::led_selection("chartreuse"), Command::SetLed { color: Rgb::BLACK });
        assert_eq!(Command::led_selection("Off"), Command::SetLed { color: Rgb::BLACK });
        // The rainbow placeholder is a colour, not the rainbow toggle.
        assert_eq!(
            Command::led_selection("Rainbow"),
            Command::SetLed { color: Rgb::new(255, 0, 255) }
        );
    }

    #[test]
    fn test_encode_commands() {
        assert_eq!(Command::led(LedColor::Red).encode(), br#"{"msgType":3,"r":255,"g":0,"b":0}"#.to_vec());
        assert_eq!(Command::SetBuzzer { on: true }.encode(), br#"{"msgType":2,"buzzer":true}"#.to_vec());
        assert_eq!(Command::SetRainbow { enabled: false }.encode(), br#"{"msgType":4,"rbLed":false}"#.to_vec());
        assert_eq!(
            Command::SetPowerMode { mode: PowerMode::PowerSaving }.encode(),
            br#"{"msgType":5,"mode":1}"#.to_vec()
        );
    }

    #[test]
    fn test_led_command_round_trip() {
        let frame = Command::led_selection("Red").encode();
        assert_eq!(parse_frame(&frame).unwrap(), Message::Led { color: Rgb::new(255, 0, 0) });
    }

    #[test]
    fn test_command_round_trips() {
        let commands = [
            Command::SetBuzzer { on: false },
            Command::SetRainbow { enabled: true },
            Command::SetPowerMode { mode: PowerMode::NoTracking },
            Command::SetPowerMode { mode: PowerMode::Unknown(42) },
        ];
        for command in commands {
            assert_eq!(parse_frame(&command.encode()).unwrap(), command.to_message());
        }
    }
}
