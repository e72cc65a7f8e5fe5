//! Contains the types and functions for the high level pipeline builder API.

mod pipeline;
pub mod preprocess;

pub use pipeline::PalettePipeline;

use crate::{select::DEFAULT_MIN_CONTRAST, Error};
use image::DynamicImage;
use std::path::Path;

/// Images wider or taller than this are downscaled before counting.
pub const DEFAULT_RESIZE_THRESHOLD: u32 = 350;

/// The width images are downscaled to.
pub const DEFAULT_RESIZE_SIZE: u32 = 320;

/// The standard deviation of the Gaussian blur applied before counting.
pub const DEFAULT_BLUR_SIGMA: f32 = 40.0;

/// A builder struct to specify how an image is prepared and how its palette is selected.
///
/// # Examples
/// ```
/// # use colorart::AnalyzeOptions;
/// let options = AnalyzeOptions::new()
///     .resize_threshold(500)
///     .blur(false)
///     .min_contrast(2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzeOptions {
    /// Images with a width or height above this are downscaled.
    pub(crate) resize_threshold: u32,
    /// The width to downscale to, keeping the aspect ratio.
    pub(crate) resize_size: u32,
    /// The standard deviation of the Gaussian blur.
    pub(crate) blur_sigma: f32,
    /// Whether or not to blur the image.
    pub(crate) blur: bool,
    /// The minimum contrast ratio between the background and the other palette colors.
    pub(crate) min_contrast: f32,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzeOptions {
    /// Creates a new [`AnalyzeOptions`] with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resize_threshold: DEFAULT_RESIZE_THRESHOLD,
            resize_size: DEFAULT_RESIZE_SIZE,
            blur_sigma: DEFAULT_BLUR_SIGMA,
            blur: true,
            min_contrast: DEFAULT_MIN_CONTRAST,
        }
    }

    /// Sets the size above which an image is downscaled.
    /// The image is downscaled if either its width or height is greater than `threshold`.
    ///
    /// The default is [`DEFAULT_RESIZE_THRESHOLD`].
    #[must_use]
    pub const fn resize_threshold(mut self, threshold: u32) -> Self {
        self.resize_threshold = threshold;
        self
    }

    /// Sets the width that large images are downscaled to.
    /// The height is scaled to keep the aspect ratio.
    ///
    /// The default is [`DEFAULT_RESIZE_SIZE`].
    #[must_use]
    pub const fn resize_size(mut self, size: u32) -> Self {
        self.resize_size = size;
        self
    }

    /// Sets the standard deviation of the Gaussian blur.
    ///
    /// Blurring merges small details into the large color regions around them,
    /// so that the counted colors favor large areas of the image.
    ///
    /// The default is [`DEFAULT_BLUR_SIGMA`].
    #[must_use]
    pub const fn blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    /// Sets whether or not to blur the image before counting colors.
    ///
    /// The default is `true`.
    #[must_use]
    pub const fn blur(mut self, blur: bool) -> Self {
        self.blur = blur;
        self
    }

    /// Sets the minimum WCAG 2.1 contrast ratio between the background and the other palette colors.
    ///
    /// The default is [`DEFAULT_MIN_CONTRAST`].
    #[must_use]
    pub const fn min_contrast(mut self, min_contrast: f32) -> Self {
        self.min_contrast = min_contrast;
        self
    }
}

/// Opens and decodes the image at the given path.
///
/// JPEG, PNG, and GIF images are supported.
///
/// # Errors
/// Returns [`Error::Image`] if the file cannot be read or decoded.
pub fn open(path: impl AsRef<Path>) -> Result<DynamicImage, Error> {
    let path = path.as_ref();
    image::open(path).map_err(|source| Error::Image { path: path.to_owned(), source })
}
