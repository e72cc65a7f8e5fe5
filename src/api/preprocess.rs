//! Prepares decoded images for color counting.
//!
//! Large images are downscaled and every image is (optionally) blurred,
//! then each pixel is quantized to a canonical [`Rgb`] color.

use crate::{AnalyzeOptions, ColorFrequencies, Rgb, Rgba16};
use image::{
    imageops::{self, FilterType},
    DynamicImage, ImageBuffer, Rgba,
};
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// An RGBA image with 16-bit, straight alpha channels.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Converts the image to 16-bit RGBA, downscales it if it is larger than the resize threshold,
/// and blurs it if blurring is enabled.
#[must_use]
pub fn prepare(image: &DynamicImage, options: &AnalyzeOptions) -> Rgba16Image {
    let image = image.to_rgba16();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image;
    }

    let image = if width > options.resize_threshold || height > options.resize_threshold {
        let (new_width, new_height) = scaled_dimensions(width, height, options.resize_size);
        tracing::debug!(width, height, new_width, new_height, "downscaling image");
        imageops::resize(&image, new_width, new_height, FilterType::Lanczos3)
    } else {
        image
    };

    if options.blur && options.blur_sigma > 0.0 {
        tracing::debug!(sigma = options.blur_sigma, "blurring image");
        imageops::blur(&image, options.blur_sigma)
    } else {
        image
    }
}

/// Scales `height` to keep the aspect ratio at the given width, rounding to the nearest pixel.
fn scaled_dimensions(width: u32, height: u32, new_width: u32) -> (u32, u32) {
    let new_width = new_width.max(1);
    let new_height =
        (u64::from(height) * u64::from(new_width) + u64::from(width) / 2) / u64::from(width);
    let new_height = u32::try_from(new_height).unwrap_or(u32::MAX).max(1);
    (new_width, new_height)
}

/// Quantizes a straight alpha pixel, skipping fully transparent pixels.
#[inline]
fn quantize_pixel(&Rgba(pixel): &Rgba<u16>) -> Option<Rgb> {
    Rgba16::from_straight(pixel).quantize()
}

/// Quantizes each pixel of the image, skipping fully transparent pixels.
#[must_use]
pub fn quantized_pixels(image: &Rgba16Image) -> Vec<Rgb> {
    image.pixels().filter_map(quantize_pixel).collect()
}

/// Quantizes each pixel of the image in parallel, skipping fully transparent pixels.
#[cfg(feature = "threads")]
#[must_use]
pub fn quantized_pixels_par(image: &Rgba16Image) -> Vec<Rgb> {
    image
        .as_raw()
        .par_chunks_exact(4)
        .filter_map(|pixel| {
            let pixel = <[u16; 4]>::try_from(pixel).ok()?;
            Rgba16::from_straight(pixel).quantize()
        })
        .collect()
}

/// Counts the colors in the leftmost column of the image.
#[must_use]
pub fn edge_frequencies(image: &Rgba16Image) -> ColorFrequencies {
    let mut edge = ColorFrequencies::with_capacity(image.height() as usize);
    if image.width() > 0 {
        for y in 0..image.height() {
            let Rgba(pixel) = *image.get_pixel(0, y);
            let Rgba16 { r, g, b, a } = Rgba16::from_straight(pixel);
            edge.add_rgba(r, g, b, a);
        }
    }
    edge
}
