//! A library for extracting a theme palette from an image, in the style of album art players.
//!
//! `colorart` picks four colors from an image:
//! a background color taken from the left edge of the image,
//! and primary, secondary, and detail colors that stand out against that background.
//!
//! # Features
//! To reduce dependencies and compile times, `colorart` has several `cargo` features
//! that can be turned off or on:
//! - `pipelines`: exposes [`PalettePipeline`], the high-level API (more details below).
//! - `threads`: exposes parallel versions of the color counting functions via [`rayon`].
//! - `image`: enables integration with the [`image`] crate.
//! - `serde`: serializes [`Rgb`] and [`Palette`] as hex strings.
//! - `cli`: builds the `colorart` command line tool.
//!
//! # High-Level API
//! To get started with the high-level API, see [`PalettePipeline`].
//! Here is an example:
//! ```no_run
//! # use colorart::PalettePipeline;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = colorart::open("some image")?;
//!
//! let palette = PalettePipeline::new(&img)
//!     .blur(false) // count the sharp image colors
//!     .min_contrast(2.0) // require more contrast against the background
//!     .palette_par(); // count colors in parallel
//!
//! println!("background: #{}", palette.background);
//! # Ok(())
//! # }
//! ```
//!
//! # Low-Level API
//! The color counting and selection steps are also available on their own.
//! Colors are counted in a [`ColorFrequencies`] index,
//! and [`select::PaletteSelector`] picks the palette from the ranked colors.
//!
//! Note that some of the options and functions above require certain features to be enabled.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::use_debug))]

mod color_counts;
mod error;
mod quantize;
mod traits;
mod types;

pub mod output;
pub mod select;

#[cfg(feature = "pipelines")]
mod api;

pub use color_counts::*;
pub use error::Error;
pub use quantize::{quantize, Rgba16};
pub use traits::*;
pub use types::*;

#[cfg(feature = "pipelines")]
pub use api::*;
