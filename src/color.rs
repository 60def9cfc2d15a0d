// src/color.rs

//! Defines the two cell color attributes, `Foreground` and `Background`.
//!
//! Each attribute is one of 8 base shades combined with an intensity bit,
//! giving 16 values per attribute. The bit layout behind them is private;
//! callers build colors from a `Shade` and an `Intensity` (or use the
//! associated constants) and never see raw bits.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Internal encoding shared by both attributes.
    /// The red/green/blue bits line up with the ANSI color index (R=1, G=2, B=4).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct ColorBits: u8 {
        const RED       = 1 << 0;
        const GREEN     = 1 << 1;
        const BLUE      = 1 << 2;
        const INTENSITY = 1 << 3;
    }
}

/// The 8 base hues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shade {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Whether the bright variant of a shade is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    #[default]
    Normal,
    Bright,
}

impl Shade {
    fn from_bits(bits: ColorBits) -> Self {
        let rgb = bits.difference(ColorBits::INTENSITY);
        match (
            rgb.contains(ColorBits::RED),
            rgb.contains(ColorBits::GREEN),
            rgb.contains(ColorBits::BLUE),
        ) {
            (false, false, false) => Shade::Black,
            (true, false, false) => Shade::Red,
            (false, true, false) => Shade::Green,
            (true, true, false) => Shade::Yellow,
            (false, false, true) => Shade::Blue,
            (true, false, true) => Shade::Magenta,
            (false, true, true) => Shade::Cyan,
            (true, true, true) => Shade::White,
        }
    }
}

const fn encode(shade: Shade, intensity: Intensity) -> ColorBits {
    let rgb: u8 = match shade {
        Shade::Black => 0,
        Shade::Red => 1,
        Shade::Green => 2,
        Shade::Yellow => 3,
        Shade::Blue => 4,
        Shade::Magenta => 5,
        Shade::Cyan => 6,
        Shade::White => 7,
    };
    let bright: u8 = match intensity {
        Intensity::Normal => 0,
        Intensity::Bright => ColorBits::INTENSITY.bits(),
    };
    ColorBits::from_bits_truncate(rgb | bright)
}

/// Serialized form of either attribute: `{ "shade": "cyan", "intensity": "bright" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub shade: Shade,
    #[serde(default)]
    pub intensity: Intensity,
}

macro_rules! color_attribute {
    ($(#[$meta:meta])* $name:ident, $normal_base:expr, $bright_base:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "ColorSpec", into = "ColorSpec")]
        pub struct $name(ColorBits);

        impl $name {
            pub const BLACK: Self = Self::new(Shade::Black, Intensity::Normal);
            pub const RED: Self = Self::new(Shade::Red, Intensity::Normal);
            pub const GREEN: Self = Self::new(Shade::Green, Intensity::Normal);
            pub const YELLOW: Self = Self::new(Shade::Yellow, Intensity::Normal);
            pub const BLUE: Self = Self::new(Shade::Blue, Intensity::Normal);
            pub const MAGENTA: Self = Self::new(Shade::Magenta, Intensity::Normal);
            pub const CYAN: Self = Self::new(Shade::Cyan, Intensity::Normal);
            pub const WHITE: Self = Self::new(Shade::White, Intensity::Normal);
            pub const BRIGHT_BLACK: Self = Self::new(Shade::Black, Intensity::Bright);
            pub const BRIGHT_RED: Self = Self::new(Shade::Red, Intensity::Bright);
            pub const BRIGHT_GREEN: Self = Self::new(Shade::Green, Intensity::Bright);
            pub const BRIGHT_YELLOW: Self = Self::new(Shade::Yellow, Intensity::Bright);
            pub const BRIGHT_BLUE: Self = Self::new(Shade::Blue, Intensity::Bright);
            pub const BRIGHT_MAGENTA: Self = Self::new(Shade::Magenta, Intensity::Bright);
            pub const BRIGHT_CYAN: Self = Self::new(Shade::Cyan, Intensity::Bright);
            pub const BRIGHT_WHITE: Self = Self::new(Shade::White, Intensity::Bright);

            pub const fn new(shade: Shade, intensity: Intensity) -> Self {
                Self(encode(shade, intensity))
            }

            pub fn shade(self) -> Shade {
                Shade::from_bits(self.0)
            }

            pub fn intensity(self) -> Intensity {
                if self.0.contains(ColorBits::INTENSITY) {
                    Intensity::Bright
                } else {
                    Intensity::Normal
                }
            }

            /// SGR parameter selecting this color (30-37/90-97 or 40-47/100-107).
            pub(crate) fn sgr_code(self) -> u16 {
                let index = self.0.difference(ColorBits::INTENSITY).bits() as u16;
                match self.intensity() {
                    Intensity::Normal => $normal_base + index,
                    Intensity::Bright => $bright_base + index,
                }
            }
        }

        impl From<ColorSpec> for $name {
            fn from(spec: ColorSpec) -> Self {
                Self(encode(spec.shade, spec.intensity))
            }
        }

        impl From<$name> for ColorSpec {
            fn from(color: $name) -> Self {
                ColorSpec {
                    shade: color.shade(),
                    intensity: color.intensity(),
                }
            }
        }
    };
}

color_attribute!(
    /// Foreground (glyph) color of a cell. Defaults to normal white.
    Foreground,
    30,
    90
);

color_attribute!(
    /// Background color of a cell. Defaults to black.
    Background,
    40,
    100
);

impl Default for Foreground {
    fn default() -> Self {
        Foreground::WHITE
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::BLACK
    }
}
