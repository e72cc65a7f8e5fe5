//! Contains the [`PalettePipeline`] builder struct for the high level API.

use super::preprocess::{self, Rgba16Image};
use crate::{select::PaletteSelector, AnalyzeOptions, ColorFrequencies, Palette, Rgb};
use image::DynamicImage;

/// A builder struct to specify options to extract a [`Palette`] from an image.
///
/// # Examples
/// To start, create a [`PalettePipeline`] from a [`DynamicImage`]:
/// ```no_run
/// # use colorart::PalettePipeline;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = colorart::open("some image")?;
/// let mut pipeline = PalettePipeline::new(&img);
/// # Ok(())
/// # }
/// ```
///
/// Then, you can change different options like the blur strength or the minimum contrast:
/// ```
/// # use colorart::PalettePipeline;
/// # let img = image::DynamicImage::new_rgb8(1, 1);
/// # let mut pipeline = PalettePipeline::new(&img);
/// let pipeline = pipeline
///     .blur_sigma(20.0)
///     .min_contrast(2.0);
/// ```
///
/// Finally, run the pipeline:
/// ```
/// # use colorart::PalettePipeline;
/// # let img = image::DynamicImage::new_rgb8(1, 1);
/// # let pipeline = PalettePipeline::new(&img);
/// let palette = pipeline.palette();
/// println!("{}", palette.background);
/// ```
///
/// Or, in parallel across multiple threads (needs the `threads` feature):
/// ```
/// # use colorart::PalettePipeline;
/// # let img = image::DynamicImage::new_rgb8(1, 1);
/// # let pipeline = PalettePipeline::new(&img);
/// let palette = pipeline.palette_par();
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct PalettePipeline<'a> {
    /// The decoded input image.
    pub(crate) image: &'a DynamicImage,
    /// The preprocessing and selection options.
    pub(crate) options: AnalyzeOptions,
}

impl<'a> PalettePipeline<'a> {
    /// Creates a new [`PalettePipeline`] with default options.
    pub fn new(image: &'a DynamicImage) -> Self {
        Self { image, options: AnalyzeOptions::new() }
    }

    /// Replaces all options at once.
    pub fn options(&mut self, options: AnalyzeOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Sets the size above which the image is downscaled.
    ///
    /// See [`AnalyzeOptions::resize_threshold`].
    pub fn resize_threshold(&mut self, threshold: u32) -> &mut Self {
        self.options = self.options.resize_threshold(threshold);
        self
    }

    /// Sets the width that a large image is downscaled to.
    ///
    /// See [`AnalyzeOptions::resize_size`].
    pub fn resize_size(&mut self, size: u32) -> &mut Self {
        self.options = self.options.resize_size(size);
        self
    }

    /// Sets the standard deviation of the Gaussian blur.
    ///
    /// See [`AnalyzeOptions::blur_sigma`].
    pub fn blur_sigma(&mut self, sigma: f32) -> &mut Self {
        self.options = self.options.blur_sigma(sigma);
        self
    }

    /// Sets whether or not to blur the image.
    ///
    /// See [`AnalyzeOptions::blur`].
    pub fn blur(&mut self, blur: bool) -> &mut Self {
        self.options = self.options.blur(blur);
        self
    }

    /// Sets the minimum contrast ratio between the background and the other palette colors.
    ///
    /// See [`AnalyzeOptions::min_contrast`].
    pub fn min_contrast(&mut self, min_contrast: f32) -> &mut Self {
        self.options = self.options.min_contrast(min_contrast);
        self
    }
}

impl<'a> From<&'a DynamicImage> for PalettePipeline<'a> {
    fn from(image: &'a DynamicImage) -> Self {
        Self::new(image)
    }
}

impl<'a> PalettePipeline<'a> {
    /// Returns the resized and blurred image that colors are counted from.
    #[must_use]
    pub fn prepared_image(&self) -> Rgba16Image {
        preprocess::prepare(self.image, &self.options)
    }

    /// Runs the preprocessing and counts the colors of the prepared image.
    #[must_use]
    pub fn color_frequencies(&self) -> ColorFrequencies {
        count(&self.prepared_image(), ColorFrequencies::from_colors)
    }

    /// Runs the preprocessing and selection to compute the palette.
    #[must_use]
    pub fn palette(&self) -> Palette {
        let prepared = self.prepared_image();
        let frequencies = count(&prepared, ColorFrequencies::from_colors);
        self.select(&prepared, &frequencies)
    }

    /// Picks the palette from the counted colors and the edge of the prepared image.
    fn select(&self, prepared: &Rgba16Image, frequencies: &ColorFrequencies) -> Palette {
        let edge = preprocess::edge_frequencies(prepared);
        PaletteSelector::new()
            .min_contrast(self.options.min_contrast)
            .select(&edge, &frequencies.sorted())
    }
}

#[cfg(feature = "threads")]
impl<'a> PalettePipeline<'a> {
    /// Runs the preprocessing and counts the colors of the prepared image in parallel.
    #[must_use]
    pub fn color_frequencies_par(&self) -> ColorFrequencies {
        count_par(&self.prepared_image())
    }

    /// Runs the preprocessing and selection to compute the palette,
    /// counting colors in parallel.
    #[must_use]
    pub fn palette_par(&self) -> Palette {
        let prepared = self.prepared_image();
        let frequencies = count_par(&prepared);
        self.select(&prepared, &frequencies)
    }
}

/// Quantizes the pixels of the prepared image and counts them with the given function.
fn count(
    prepared: &Rgba16Image,
    count_colors: impl Fn(&[Rgb]) -> ColorFrequencies,
) -> ColorFrequencies {
    let pixels = preprocess::quantized_pixels(prepared);
    log_counts(prepared, &pixels, count_colors(&pixels))
}

/// Quantizes the pixels of the prepared image and counts them in parallel.
#[cfg(feature = "threads")]
fn count_par(prepared: &Rgba16Image) -> ColorFrequencies {
    let pixels = preprocess::quantized_pixels_par(prepared);
    log_counts(prepared, &pixels, ColorFrequencies::from_colors_par(&pixels))
}

/// Logs how many pixels were counted and skipped.
fn log_counts(
    prepared: &Rgba16Image,
    pixels: &[Rgb],
    frequencies: ColorFrequencies,
) -> ColorFrequencies {
    let total = prepared.pixels().len();
    tracing::debug!(
        pixels = pixels.len(),
        transparent = total - pixels.len(),
        distinct = frequencies.len(),
        "counted colors"
    );
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const NAVY: Rgb = Rgb::new(0, 0, 128);
    const MAROON: Rgb = Rgb::new(128, 0, 0);

    /// A white image with a navy block and a smaller maroon block, away from the left edge.
    fn cover() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(40, 40, |x, y| match (x, y) {
            (10..=29, 5..=19) => Rgba([0, 0, 128, 255]),
            (10..=29, 25..=34) => Rgba([128, 0, 0, 255]),
            _ => Rgba([255, 255, 255, 255]),
        }))
    }

    #[test]
    fn sharp_palette() {
        let image = cover();
        let mut pipeline = PalettePipeline::new(&image);
        pipeline.blur(false);

        let frequencies = pipeline.color_frequencies();
        assert_eq!(
            frequencies.sorted().iter().map(|e| (e.color, e.count)).collect::<Vec<_>>(),
            [(Rgb::WHITE, 1600 - 300 - 200), (NAVY, 300), (MAROON, 200)]
        );

        assert_eq!(
            pipeline.palette(),
            Palette {
                background: Rgb::WHITE,
                primary: NAVY,
                secondary: MAROON,
                detail: Rgb::BLACK,
            }
        );
    }

    #[test]
    fn blurred_palette_is_deterministic() {
        let image = cover();
        let mut pipeline = PalettePipeline::new(&image);
        pipeline.blur_sigma(2.0);

        let palette = pipeline.palette();
        assert_eq!(palette, pipeline.palette());
        assert_eq!(palette.background, Rgb::WHITE);
    }

    #[test]
    fn options_are_applied() {
        let image = cover();
        let mut pipeline = PalettePipeline::new(&image);
        pipeline
            .options(AnalyzeOptions::new().blur(false))
            .resize_threshold(20)
            .resize_size(10);
        assert_eq!(pipeline.prepared_image().dimensions(), (10, 10));
    }

    #[test]
    fn transparent_image() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
        let pipeline = PalettePipeline::new(&image);
        assert!(pipeline.color_frequencies().is_empty());

        let palette = pipeline.palette();
        assert_eq!(palette.background, Rgb::WHITE);
        assert_eq!([palette.primary, palette.secondary, palette.detail], [Rgb::BLACK; 3]);
    }

    #[test]
    fn empty_image() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        let pipeline = PalettePipeline::new(&image);
        let fallback = Palette {
            background: Rgb::WHITE,
            primary: Rgb::BLACK,
            secondary: Rgb::BLACK,
            detail: Rgb::BLACK,
        };

        assert!(pipeline.color_frequencies().is_empty());
        assert_eq!(pipeline.palette(), fallback);
        #[cfg(feature = "threads")]
        assert_eq!(pipeline.palette_par(), fallback);
    }

    #[test]
    #[cfg(feature = "threads")]
    fn single_and_multi_threaded_match() {
        let image = cover();
        let mut pipeline = PalettePipeline::new(&image);
        pipeline.blur_sigma(3.0);
        assert_eq!(pipeline.color_frequencies(), pipeline.color_frequencies_par());
        assert_eq!(pipeline.palette(), pipeline.palette_par());
    }
}
