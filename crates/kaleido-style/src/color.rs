#![forbid(unsafe_code)]

//! Canonical 24-bit color values and input parsing.
//!
//! Every color the slice model stores is an opaque [`Rgb`]. Input is accepted
//! in three spellings:
//!
//! * `#rgb` shorthand (each nibble doubled, `#abc` == `#aabbcc`)
//! * `#rrggbb`
//! * `rgb(r, g, b)` with integer channels, the form a browser reports for a
//!   computed background color
//!
//! Hex digits are case-insensitive. Output is always the lowercase
//! `#rrggbb` form. Alpha-bearing inputs are rejected rather than truncated.
//!
//! # Example
//!
//! ```
//! use kaleido_style::color::Rgb;
//!
//! let c: Rgb = "#AbC".parse().unwrap();
//! assert_eq!(c.to_string(), "#aabbcc");
//! assert_eq!("rgb(170, 187, 204)".parse::<Rgb>().unwrap(), c);
//! ```

use std::fmt;
use std::str::FromStr;

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Pure white, `#ffffff`.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    /// The off-black used for accents, `#222222`.
    pub const NEAR_BLACK: Self = Self::new(0x22, 0x22, 0x22);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    #[must_use]
    pub const fn from_key(key: u32) -> Self {
        Self::new((key >> 16) as u8, (key >> 8) as u8, key as u8)
    }

    /// Pack into a `0xRRGGBB` key.
    #[must_use]
    pub const fn as_key(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Canonical lowercase `#rrggbb` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// Parse any accepted spelling. See the module docs.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        parse_color(input)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl TryFrom<&str> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_color(value)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        parse_color(&raw).map_err(serde::de::Error::custom)
    }
}

/// Why a color string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    /// Input was empty or whitespace.
    Empty,
    /// Hex body was not 3 or 6 digits long.
    InvalidLength,
    /// Hex body contained a non-hex character.
    InvalidHex,
    /// Input was neither `#hex` nor a well-formed `rgb(r, g, b)`.
    InvalidFunc,
    /// An `rgb()` channel was above 255.
    OutOfRange,
    /// Input carried an alpha channel (`#rgba`, `#rrggbbaa`, `rgba(...)`).
    UnsupportedAlpha,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Empty => "empty color string",
            Self::InvalidLength => "invalid hex length",
            Self::InvalidHex => "invalid hex digits",
            Self::InvalidFunc => "invalid rgb() function",
            Self::OutOfRange => "component out of range",
            Self::UnsupportedAlpha => "alpha channel not supported",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ColorParseError {}

fn nibble(c: u8) -> Result<u8, ColorParseError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ColorParseError::InvalidHex),
    }
}

fn parse_hex(hex: &str) -> Result<Rgb, ColorParseError> {
    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => {
            let r = nibble(bytes[0])?;
            let g = nibble(bytes[1])?;
            let b = nibble(bytes[2])?;
            Ok(Rgb::new(r * 17, g * 17, b * 17))
        }
        6 => {
            let pair = |i: usize| -> Result<u8, ColorParseError> {
                Ok((nibble(bytes[i])? << 4) | nibble(bytes[i + 1])?)
            };
            Ok(Rgb::new(pair(0)?, pair(2)?, pair(4)?))
        }
        4 | 8 if bytes.iter().all(u8::is_ascii_hexdigit) => Err(ColorParseError::UnsupportedAlpha),
        _ => Err(ColorParseError::InvalidLength),
    }
}

fn parse_channel(raw: &str) -> Result<u8, ColorParseError> {
    let value: u32 = raw.trim().parse().map_err(|_| ColorParseError::InvalidFunc)?;
    u8::try_from(value).map_err(|_| ColorParseError::OutOfRange)
}

fn parse_css_rgb(args: &str) -> Result<Rgb, ColorParseError> {
    let parts: Vec<&str> = args.split(',').collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(ColorParseError::InvalidFunc);
    };
    Ok(Rgb::new(parse_channel(r)?, parse_channel(g)?, parse_channel(b)?))
}

/// Parse a color string into its canonical value.
pub fn parse_color(input: &str) -> Result<Rgb, ColorParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    if lower.starts_with("rgba(") {
        return Err(ColorParseError::UnsupportedAlpha);
    }
    if let Some(args) = lower.strip_prefix("rgb(").and_then(|x| x.strip_suffix(')')) {
        return parse_css_rgb(args);
    }

    Err(ColorParseError::InvalidFunc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_hex_is_case_insensitive() {
        let upper: Rgb = "#B09E99".parse().unwrap();
        let lower: Rgb = "#b09e99".parse().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper, Rgb::new(0xb0, 0x9e, 0x99));
    }

    #[test]
    fn shorthand_hex_doubles_nibbles() {
        assert_eq!(Rgb::parse("#aaa").unwrap().to_hex(), "#aaaaaa");
        assert_eq!(Rgb::parse("#0F8").unwrap(), Rgb::new(0x00, 0xff, 0x88));
    }

    #[test]
    fn display_is_lowercase_six_digit() {
        assert_eq!(Rgb::new(0xAB, 0x01, 0x0C).to_string(), "#ab010c");
        assert_eq!(Rgb::NEAR_BLACK.to_string(), "#222222");
    }

    #[test]
    fn css_rgb_matches_hex() {
        assert_eq!(Rgb::parse("rgb(34, 34, 34)").unwrap(), Rgb::NEAR_BLACK);
        assert_eq!(Rgb::parse("RGB(255,255,255)").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::parse("  rgb( 1 ,2, 3 )  ").unwrap(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn single_digit_channels_are_zero_padded() {
        // A computed-style string with small channels must still produce two digits each.
        assert_eq!(Rgb::parse("rgb(5, 10, 0)").unwrap().to_hex(), "#050a00");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Rgb::parse(""), Err(ColorParseError::Empty));
        assert_eq!(Rgb::parse("   "), Err(ColorParseError::Empty));
    }

    #[test]
    fn rejects_bad_hex() {
        assert_eq!(Rgb::parse("#12345"), Err(ColorParseError::InvalidLength));
        assert_eq!(Rgb::parse("#"), Err(ColorParseError::InvalidLength));
        assert_eq!(Rgb::parse("#ggg"), Err(ColorParseError::InvalidHex));
        assert_eq!(Rgb::parse("#12é"), Err(ColorParseError::InvalidLength));
    }

    #[test]
    fn rejects_alpha_forms() {
        assert_eq!(Rgb::parse("#ffff"), Err(ColorParseError::UnsupportedAlpha));
        assert_eq!(Rgb::parse("#ffffff80"), Err(ColorParseError::UnsupportedAlpha));
        assert_eq!(
            Rgb::parse("rgba(1, 2, 3, 0.5)"),
            Err(ColorParseError::UnsupportedAlpha)
        );
    }

    #[test]
    fn rejects_bad_functions() {
        assert_eq!(Rgb::parse("rgb(1, 2)"), Err(ColorParseError::InvalidFunc));
        assert_eq!(Rgb::parse("rgb(1, 2, x)"), Err(ColorParseError::InvalidFunc));
        assert_eq!(Rgb::parse("rgb(1, 2, 3"), Err(ColorParseError::InvalidFunc));
        assert_eq!(Rgb::parse("ffffff"), Err(ColorParseError::InvalidFunc));
        assert_eq!(Rgb::parse("rgb(256, 0, 0)"), Err(ColorParseError::OutOfRange));
    }

    #[test]
    fn key_round_trips_through_packed_form() {
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(c.as_key(), 0x123456);
        assert_eq!(Rgb::from_key(0x123456), c);
        assert_eq!(Rgb::from_key(0xff_123456), c);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_canonical_string() {
        let json = serde_json::to_string(&Rgb::new(0xaa, 0xbb, 0xcc)).unwrap();
        assert_eq!(json, "\"#aabbcc\"");
        let back: Rgb = serde_json::from_str("\"#ABC\"").unwrap();
        assert_eq!(back, Rgb::new(0xaa, 0xbb, 0xcc));
        assert!(serde_json::from_str::<Rgb>("\"#zz\"").is_err());
    }
}
