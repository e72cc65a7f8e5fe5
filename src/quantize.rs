//! Converts 16-bit, alpha-premultiplied pixel samples into canonical [`Rgb`] colors.
//!
//! Each channel is un-premultiplied and rescaled to 8 bits:
//! `round(255 * channel / alpha)`, rounding half up.
//! A fully transparent pixel (alpha of `0`) carries no color information
//! and quantizes to `None`, so it is never counted.

use crate::Rgb;

/// The maximum value of a 16-bit channel.
const MAX_16: u32 = u16::MAX as u32;

/// A pixel sample with four 16-bit, alpha-premultiplied channels.
///
/// Each color channel is expected to be less than or equal to `a`,
/// but larger values are tolerated and saturate when quantized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba16 {
    /// Premultiplied red.
    pub r: u16,
    /// Premultiplied green.
    pub g: u16,
    /// Premultiplied blue.
    pub b: u16,
    /// Alpha.
    pub a: u16,
}

impl Rgba16 {
    /// Creates a new [`Rgba16`] from already premultiplied channels.
    #[must_use]
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new [`Rgba16`] by premultiplying straight (non-premultiplied) channels by alpha.
    ///
    /// Decoders like the [`image`](https://docs.rs/image) crate store straight alpha,
    /// so their pixels must go through this before quantization.
    #[must_use]
    pub const fn from_straight([r, g, b, a]: [u16; 4]) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        const fn mul(c: u16, a: u16) -> u16 {
            (c as u32 * a as u32 / MAX_16) as u16
        }

        Self {
            r: mul(r, a),
            g: mul(g, a),
            b: mul(b, a),
            a,
        }
    }

    /// Quantizes this pixel to a canonical [`Rgb`] color.
    ///
    /// Returns `None` if the pixel is fully transparent.
    ///
    /// # Examples
    /// ```
    /// # use colorart::{Rgb, Rgba16};
    /// assert_eq!(Rgba16::new(65535, 0, 0, 65535).quantize(), Some(Rgb::new(255, 0, 0)));
    /// assert_eq!(Rgba16::new(32768, 32768, 32768, 65535).quantize(), Some(Rgb::new(128, 128, 128)));
    /// assert_eq!(Rgba16::new(0, 0, 0, 0).quantize(), None);
    /// ```
    #[must_use]
    pub fn quantize(self) -> Option<Rgb> {
        quantize(self.r, self.g, self.b, self.a)
    }
}

impl From<[u16; 4]> for Rgba16 {
    fn from([r, g, b, a]: [u16; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Un-premultiplies and rescales a single channel.
#[inline]
fn unpremultiply(channel: u16, alpha: u32) -> u8 {
    let c = u32::from(channel);
    let value = (u32::from(u8::MAX) * c + alpha / 2) / alpha;
    #[allow(clippy::cast_possible_truncation)]
    let value = value.min(u32::from(u8::MAX)) as u8;
    value
}

/// Quantizes 16-bit, alpha-premultiplied channels to a canonical [`Rgb`] color.
///
/// Returns `None` if `a` is `0`.
#[must_use]
pub fn quantize(r: u16, g: u16, b: u16, a: u16) -> Option<Rgb> {
    if a == 0 {
        None
    } else {
        let a = u32::from(a);
        Some(Rgb::new(
            unpremultiply(r, a),
            unpremultiply(g, a),
            unpremultiply(b, a),
        ))
    }
}
