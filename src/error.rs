//! Error types for loading images and parsing output templates.

#[cfg(feature = "image")]
use std::path::PathBuf;

/// The errors that can occur outside of color counting and selection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The image file could not be read or decoded.
    #[cfg(feature = "image")]
    #[error("failed to load image {}", path.display())]
    Image {
        /// The path of the image.
        path: PathBuf,
        /// The underlying decoding or I/O error.
        #[source]
        source: image::ImageError,
    },

    /// An output template could not be parsed.
    #[error("invalid template at byte {offset}: {reason}")]
    Template {
        /// The byte offset of the problem in the template text.
        offset: usize,
        /// What is wrong with the template.
        reason: String,
    },
}
