#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

//! Prints the theme palette of each given image.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use colorart::{
    output::Template, select::DEFAULT_MIN_CONTRAST, AnalyzeOptions, PalettePipeline,
    DEFAULT_BLUR_SIGMA, DEFAULT_RESIZE_SIZE, DEFAULT_RESIZE_THRESHOLD,
};
use tracing_subscriber::EnvFilter;

/// Extracts a background, primary, secondary, and detail color from images.
#[derive(Parser)]
#[command(version, about)]
pub struct Options {
    /// Downscale images wider or taller than this many pixels.
    #[arg(long, default_value_t = DEFAULT_RESIZE_THRESHOLD)]
    resize_threshold: u32,

    /// The width to downscale large images to.
    #[arg(long, default_value_t = DEFAULT_RESIZE_SIZE)]
    resize_size: u32,

    /// The standard deviation of the Gaussian blur.
    #[arg(long, default_value_t = DEFAULT_BLUR_SIGMA)]
    blur_sigma: f32,

    /// Whether or not to blur images before counting colors.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    blur: bool,

    /// The minimum contrast ratio against the background (use 2 or more for accessibility).
    #[arg(long, default_value_t = DEFAULT_MIN_CONTRAST)]
    contrast: f32,

    /// A template file rendered once per image instead of printing JSON.
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// The number of threads to use, or 0 for one per core.
    #[arg(short = 'j', long, default_value_t = 0)]
    threads: u8,

    /// The images to analyze.
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

impl Options {
    fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions::new()
            .resize_threshold(self.resize_threshold)
            .resize_size(self.resize_size)
            .blur_sigma(self.blur_sigma)
            .blur(self.blur)
            .min_contrast(self.contrast)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let options = Options::parse();

    if options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads.into())
            .build_global()
            .context("failed to start the thread pool")?;
    }

    let template = options
        .template
        .as_ref()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template {}", path.display()))?;
            Template::parse(&text).with_context(|| format!("in template {}", path.display()))
        })
        .transpose()?;

    let analyze_options = options.analyze_options();
    let mut stdout = io::stdout().lock();

    for path in &options.images {
        let image = colorart::open(path)?;

        let time = std::time::Instant::now();
        let palette = PalettePipeline::new(&image)
            .options(analyze_options)
            .palette_par();
        tracing::info!(
            path = %path.display(),
            ms = time.elapsed().as_millis(),
            background = %palette.background,
            "analyzed image"
        );

        if let Some(template) = &template {
            let filename = path.to_string_lossy();
            write!(stdout, "{}", template.rendered(&filename, &palette))?;
        } else {
            serde_json::to_writer(&mut stdout, &palette)?;
            writeln!(stdout)?;
        }
    }

    stdout.flush()?;
    Ok(())
}
