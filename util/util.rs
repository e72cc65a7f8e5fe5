#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use colorart::Rgb;
use image::{DynamicImage, Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

pub fn load_images(images: &[PathBuf]) -> Vec<(String, DynamicImage)> {
    images
        .iter()
        .map(|path| {
            image::open(path).map(|image| {
                (
                    path.file_name().unwrap().to_owned().into_string().unwrap(),
                    image,
                )
            })
        })
        .collect::<Result<_, _>>()
        .expect("loaded each image")
}

pub fn load_image_dir(dir: impl AsRef<Path>) -> Vec<(String, DynamicImage)> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths = entries
        .collect::<Result<Vec<_>, _>>()
        .expect("read each file")
        .iter()
        .map(std::fs::DirEntry::path)
        .collect::<Vec<_>>();

    paths.sort();

    load_images(&paths)
}

pub const COVERS_DIR: &str = "img/covers";

pub fn load_image_dir_relative_to_root(dir: impl AsRef<Path>) -> Vec<(String, DynamicImage)> {
    // assume current exe path is something like: target/build/deps/current_exe
    let exe = std::env::current_exe().unwrap();
    let root = exe
        .parent()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap();

    load_image_dir(root.join(dir.as_ref()))
}

/// A cover-like image: a two color gradient with random rectangles of solid color on top.
pub fn synthetic_cover(width: u32, height: u32, seed: u64) -> DynamicImage {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    let top: [u8; 3] = rng.gen();
    let bottom: [u8; 3] = rng.gen();

    let mut image = RgbaImage::from_fn(width, height, |_, y| {
        let t = f64::from(y) / f64::from(height.max(1));
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t) as u8;
        Rgba([mix(top[0], bottom[0]), mix(top[1], bottom[1]), mix(top[2], bottom[2]), 255])
    });

    for _ in 0..16 {
        let [r, g, b]: [u8; 3] = rng.gen();
        let x0 = rng.gen_range(0..width);
        let y0 = rng.gen_range(0..height);
        let x1 = rng.gen_range(x0..=width);
        let y1 = rng.gen_range(y0..=height);
        for y in y0..y1 {
            for x in x0..x1 {
                image.put_pixel(x, y, Rgba([r, g, b, 255]));
            }
        }
    }

    DynamicImage::ImageRgba8(image)
}

/// Uniformly random colors, the worst case for counting.
pub fn random_colors(len: usize, seed: u64) -> Vec<Rgb> {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    (0..len).map(|_| Rgb(rng.gen())).collect()
}

static BENCH_IMAGES: OnceLock<Vec<(String, DynamicImage)>> = OnceLock::new();

pub fn load_bench_images() -> Vec<(String, DynamicImage)> {
    let mut images = load_image_dir_relative_to_root(COVERS_DIR);
    images.extend(
        [(320, 320), (640, 640), (1500, 1500)]
            .into_iter()
            .enumerate()
            .map(|(i, (w, h))| (format!("synthetic{i}"), synthetic_cover(w, h, i as u64))),
    );
    images
}

pub fn bench_images() -> &'static [(String, DynamicImage)] {
    BENCH_IMAGES.get_or_init(load_bench_images)
}
