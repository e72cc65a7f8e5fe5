//! Contains various types needed across the crate.

use ::palette::Srgb;
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// A canonical 8-bit sRGB color, the key used for counting pixels.
///
/// Equality, hashing, and ordering are by exact byte value,
/// comparing red first, then green, then blue.
///
/// The [`Display`] implementation formats the color as six lowercase hex digits
/// without a leading `#` (e.g., `1a2b3c`).
///
/// # Examples
/// ```
/// # use colorart::Rgb;
/// let color = Rgb::new(0x1a, 0x2b, 0x3c);
/// assert_eq!(color.to_string(), "1a2b3c");
/// assert_eq!("1a2b3c".parse(), Ok(color));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self([0, 0, 0]);

    /// Pure white.
    pub const WHITE: Self = Self([u8::MAX; 3]);

    /// Creates a new [`Rgb`] from its red, green, and blue components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self([red, green, blue])
    }

    /// The red component.
    #[must_use]
    pub const fn red(self) -> u8 {
        self.0[0]
    }

    /// The green component.
    #[must_use]
    pub const fn green(self) -> u8 {
        self.0[1]
    }

    /// The blue component.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0[2]
    }

    /// Returns the color with each component scaled to `0.0..=1.0`.
    #[must_use]
    pub fn into_srgb_f32(self) -> Srgb<f32> {
        Srgb::<u8>::from(self).into_format()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Self(value)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(value: Rgb) -> Self {
        value.0
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(value: Srgb<u8>) -> Self {
        let (r, g, b) = value.into_components();
        Self([r, g, b])
    }
}

impl From<Rgb> for Srgb<u8> {
    fn from(value: Rgb) -> Self {
        let [r, g, b] = value.0;
        Srgb::new(r, g, b)
    }
}

impl From<Srgb<f32>> for Rgb {
    fn from(value: Srgb<f32>) -> Self {
        value.into_format::<u8>().into()
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{r:02x}{g:02x}{b:02x}")
    }
}

/// An error type for strings that are not six hex digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected six hex digits, got {0:?}")]
pub struct ParseRgbError(pub String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseRgbError(s.to_owned()));
        }

        let mut rgb = [0; 3];
        for (i, component) in rgb.iter_mut().enumerate() {
            *component = hex
                .get((i * 2)..(i * 2 + 2))
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| ParseRgbError(s.to_owned()))?;
        }

        Ok(Self(rgb))
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
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A color and the number of times it was counted.
///
/// Returned by [`ColorFrequencies::sorted`](crate::ColorFrequencies::sorted)
/// as a snapshot; later changes to the index are not reflected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankedEntry {
    /// The counted color.
    pub color: Rgb,
    /// The number of occurrences of `color`. Always nonzero.
    pub count: u32,
}

impl Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.color, self.count)
    }
}

/// The four theme colors picked for an image.
///
/// With the `serde` feature, this serializes as an object with four
/// hex string fields: `background`, `primary`, `secondary`, and `detail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    /// The dominant color along the image edge.
    pub background: Rgb,
    /// The most frequent color that contrasts with `background`.
    pub primary: Rgb,
    /// A contrasting color distinct from `primary`.
    pub secondary: Rgb,
    /// A contrasting color distinct from both `primary` and `secondary`.
    pub detail: Rgb,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        assert_eq!(Rgb::new(0x1a, 0x2b, 0x3c).to_string(), "1a2b3c");
        assert_eq!(Rgb::new(0, 5, 255).to_string(), "0005ff");
        assert_eq!(Rgb::BLACK.to_string(), "000000");
    }

    #[test]
    fn parse_hex() {
        assert_eq!("ff8000".parse(), Ok(Rgb::new(255, 128, 0)));
        assert_eq!("#FF8000".parse(), Ok(Rgb::new(255, 128, 0)));
        assert!("ff800".parse::<Rgb>().is_err());
        assert!("gg8000".parse::<Rgb>().is_err());
        assert!("ff80001".parse::<Rgb>().is_err());
    }

    #[test]
    fn ordering_is_red_then_green_then_blue() {
        let mut colors = vec![
            Rgb::new(1, 0, 0),
            Rgb::new(0, 1, 0),
            Rgb::new(0, 0, 1),
            Rgb::new(0, 1, 1),
        ];
        colors.sort();
        assert_eq!(
            colors,
            [
                Rgb::new(0, 0, 1),
                Rgb::new(0, 1, 0),
                Rgb::new(0, 1, 1),
                Rgb::new(1, 0, 0)
            ]
        );
    }

    #[test]
    fn srgb_conversion() {
        let color = Rgb::new(12, 34, 56);
        assert_eq!(Rgb::from(Srgb::<u8>::from(color)), color);
        assert_eq!(Rgb::from(Srgb::new(1.0f32, 0.0, 0.0)), Rgb::new(255, 0, 0));
    }

    #[test]
    fn ranked_entry_display() {
        let entry = RankedEntry { color: Rgb::new(0xab, 0, 0x01), count: 7 };
        assert_eq!(entry.to_string(), "ab0001: 7");
    }

    #[test]
    #[cfg(feature = "serde")]
    fn palette_json() {
        let palette = Palette {
            background: Rgb::new(0x1a, 0x2b, 0x3c),
            primary: Rgb::WHITE,
            secondary: Rgb::new(255, 0, 0),
            detail: Rgb::BLACK,
        };
        let json = serde_json::to_string(&palette).unwrap();
        assert_eq!(
            json,
            r#"{"background":"1a2b3c","primary":"ffffff","secondary":"ff0000","detail":"000000"}"#
        );
        assert_eq!(serde_json::from_str::<Palette>(&json).unwrap(), palette);
    }
}
