//! Picks the four theme colors of a [`Palette`] from counted image colors.
//!
//! The background is the dominant color along the left edge of the image.
//! The primary, secondary, and detail colors are then taken, in ranked order,
//! from the image colors that are light on a dark background (or dark on a light one),
//! contrast enough with the background, and are distinct from the colors already picked.

use crate::{ColorFrequencies, Palette, RankedEntry, Rgb};
use ::palette::{color_difference::Wcag21RelativeContrast, FromColor, Hsv, Srgb};

/// The default minimum contrast ratio between the background and the other palette colors.
///
/// Use `2.0` or higher for accessibility compliance.
pub const DEFAULT_MIN_CONTRAST: f32 = 1.6;

/// Edge colors covering no more than this fraction of the edge are treated as noise.
const EDGE_NOISE_FRACTION: f64 = 0.01;

/// A black or white background proposal is replaced by the next edge color
/// if that color is at least this common relative to the proposal.
const EDGE_ALTERNATIVE_RATIO: f64 = 0.3;

/// Text colors are saturated to at least this much.
const MIN_TEXT_SATURATION: f32 = 0.15;

/// Two colors are distinct if any component differs by more than this.
const DISTINCT_THRESHOLD: f32 = 0.25;

/// A color is gray if its green and blue components are this close to its red component.
const GRAY_THRESHOLD: f32 = 0.03;

/// Components below this are black, components above `1.0 - BLACK_OR_WHITE_THRESHOLD` are white.
const BLACK_OR_WHITE_THRESHOLD: f32 = 0.09;

/// Whether or not the gamma encoded luma of the color is below one half.
fn is_dark(color: Srgb<f32>) -> bool {
    let (r, g, b) = color.into_components();
    0.2126 * r + 0.7152 * g + 0.0722 * b < 0.5
}

/// Whether or not every component is near `0.0` or every component is near `1.0`.
fn is_black_or_white(color: Srgb<f32>) -> bool {
    let (r, g, b) = color.into_components();
    let white = 1.0 - BLACK_OR_WHITE_THRESHOLD;
    (r > white && g > white && b > white)
        || (r < BLACK_OR_WHITE_THRESHOLD
            && g < BLACK_OR_WHITE_THRESHOLD
            && b < BLACK_OR_WHITE_THRESHOLD)
}

/// Whether or not all three components are nearly equal.
fn is_gray(color: Srgb<f32>) -> bool {
    let (r, g, b) = color.into_components();
    (r - g).abs() < GRAY_THRESHOLD && (r - b).abs() < GRAY_THRESHOLD
}

/// Whether or not two colors are far enough apart to both appear in a palette.
///
/// Two grays are never distinct.
fn is_distinct(a: Srgb<f32>, b: Srgb<f32>) -> bool {
    let (r1, g1, b1) = a.into_components();
    let (r2, g2, b2) = b.into_components();
    let far = (r1 - r2).abs() > DISTINCT_THRESHOLD
        || (g1 - g2).abs() > DISTINCT_THRESHOLD
        || (b1 - b2).abs() > DISTINCT_THRESHOLD;

    far && !(is_gray(a) && is_gray(b))
}

/// Raises the HSV saturation of the color to `min`.
///
/// Returns `None` if the color is already saturated enough.
fn saturate_to(color: Srgb<f32>, min: f32) -> Option<Srgb<f32>> {
    let hsv = Hsv::from_color(color);
    (hsv.saturation < min).then(|| Srgb::from_color(Hsv::new(hsv.hue, min, hsv.value)))
}

/// Selects palette colors from counted image colors.
///
/// # Examples
/// ```
/// # use colorart::{select::PaletteSelector, ColorFrequencies, Rgb};
/// let navy = Rgb::new(0, 0, 128);
///
/// let mut edge = ColorFrequencies::new();
/// edge.add_count(Rgb::WHITE, 10);
///
/// let mut image = ColorFrequencies::new();
/// image.add_count(Rgb::WHITE, 100);
/// image.add_count(navy, 20);
///
/// let palette = PaletteSelector::new().select(&edge, &image.sorted());
/// assert_eq!(palette.background, Rgb::WHITE);
/// assert_eq!(palette.primary, navy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteSelector {
    /// The WCAG 2.1 contrast ratio each color must exceed against the background.
    min_contrast: f32,
}

impl Default for PaletteSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteSelector {
    /// Creates a new [`PaletteSelector`] with the [`DEFAULT_MIN_CONTRAST`].
    #[must_use]
    pub const fn new() -> Self {
        Self { min_contrast: DEFAULT_MIN_CONTRAST }
    }

    /// Sets the minimum contrast ratio between the background and the other palette colors.
    #[must_use]
    pub const fn min_contrast(mut self, min_contrast: f32) -> Self {
        self.min_contrast = min_contrast;
        self
    }

    /// Picks the background color from the colors along the image edge.
    ///
    /// Returns white if `edge` is empty.
    #[must_use]
    pub fn background(&self, edge: &ColorFrequencies) -> Rgb {
        let ranked = edge.sorted();
        let Some(&most_common) = ranked.first() else {
            return Rgb::WHITE;
        };

        #[allow(clippy::cast_precision_loss)]
        let noise = edge.total_count() as f64 * EDGE_NOISE_FRACTION;
        let candidates = ranked
            .iter()
            .take_while(|entry| f64::from(entry.count) > noise)
            .collect::<Vec<_>>();

        let Some((&&first, rest)) = candidates.split_first() else {
            return most_common.color;
        };

        let mut proposed = first;
        if is_black_or_white(proposed.color.into_srgb_f32()) {
            for &&next in rest {
                if f64::from(next.count) / f64::from(proposed.count) <= EDGE_ALTERNATIVE_RATIO {
                    break;
                }
                if !is_black_or_white(next.color.into_srgb_f32()) {
                    proposed = next;
                    break;
                }
            }
        }

        proposed.color
    }

    /// Picks the primary, secondary, and detail colors for the given background
    /// from colors ranked by descending count.
    #[must_use]
    pub fn text_colors(&self, background: Rgb, ranked: &[RankedEntry]) -> [Rgb; 3] {
        let background = background.into_srgb_f32();
        let dark_background = is_dark(background);
        let contrasting =
            |color: Srgb<f32>| color.relative_contrast(background) > self.min_contrast;

        let mut primary = None;
        let mut secondary = None;
        let mut detail = None;

        // colors that keep their saturation also keep their exact bytes
        let candidates = ranked
            .iter()
            .map(|entry| {
                let color = entry.color.into_srgb_f32();
                match saturate_to(color, MIN_TEXT_SATURATION) {
                    Some(saturated) => (Rgb::from(saturated), saturated),
                    None => (entry.color, color),
                }
            })
            .filter(|&(_, color)| is_dark(color) != dark_background);

        for candidate @ (_, color) in candidates {
            if !contrasting(color) {
                continue;
            }

            match (primary, secondary) {
                (None, _) => primary = Some(candidate),
                (Some((_, p)), None) => {
                    if is_distinct(p, color) {
                        secondary = Some(candidate);
                    }
                }
                (Some((_, p)), Some((_, s))) => {
                    if is_distinct(p, color) && is_distinct(s, color) {
                        detail = Some(candidate);
                        break;
                    }
                }
            }
        }

        let fallback = if dark_background { Rgb::WHITE } else { Rgb::BLACK };
        [primary, secondary, detail].map(|picked| picked.map_or(fallback, |(rgb, _)| rgb))
    }

    /// Picks all four palette colors.
    ///
    /// `edge` holds the colors along the left edge of the image,
    /// and `ranked` holds every image color ranked by descending count
    /// (see [`ColorFrequencies::sorted`]).
    #[must_use]
    pub fn select(&self, edge: &ColorFrequencies, ranked: &[RankedEntry]) -> Palette {
        let background = self.background(edge);
        tracing::debug!(%background, "picked background color");

        let [primary, secondary, detail] = self.text_colors(background, ranked);
        Palette { background, primary, secondary, detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAVY: Rgb = Rgb::new(0, 0, 128);
    const MAROON: Rgb = Rgb::new(128, 0, 0);
    const RED: Rgb = Rgb::new(255, 0, 0);

    fn frequencies(counts: &[(Rgb, u32)]) -> ColorFrequencies {
        let mut frequencies = ColorFrequencies::new();
        for &(color, count) in counts {
            frequencies.add_count(color, count);
        }
        frequencies
    }

    #[test]
    fn color_predicates() {
        assert!(is_dark(NAVY.into_srgb_f32()));
        assert!(!is_dark(Rgb::WHITE.into_srgb_f32()));
        assert!(is_black_or_white(Rgb::new(240, 240, 240).into_srgb_f32()));
        assert!(is_black_or_white(Rgb::new(10, 10, 10).into_srgb_f32()));
        assert!(!is_black_or_white(RED.into_srgb_f32()));
        assert!(is_distinct(NAVY.into_srgb_f32(), MAROON.into_srgb_f32()));
        assert!(!is_distinct(NAVY.into_srgb_f32(), Rgb::new(0, 0, 120).into_srgb_f32()));
        assert!(!is_distinct(Rgb::BLACK.into_srgb_f32(), Rgb::new(200, 200, 200).into_srgb_f32()));
    }

    #[test]
    fn saturation_floor() {
        let gray = Rgb::new(100, 100, 100).into_srgb_f32();
        let saturated = saturate_to(gray, MIN_TEXT_SATURATION).unwrap();
        assert!((Hsv::from_color(saturated).saturation - MIN_TEXT_SATURATION).abs() < 1e-4);

        assert_eq!(saturate_to(RED.into_srgb_f32(), MIN_TEXT_SATURATION), None);
    }

    #[test]
    fn background_is_most_common_edge_color() {
        let edge = frequencies(&[(NAVY, 7), (RED, 3)]);
        assert_eq!(PaletteSelector::new().background(&edge), NAVY);
    }

    #[test]
    fn background_prefers_common_non_black_or_white() {
        let selector = PaletteSelector::new();

        let edge = frequencies(&[(Rgb::WHITE, 6), (RED, 4)]);
        assert_eq!(selector.background(&edge), RED);

        // too rare to replace white
        let edge = frequencies(&[(Rgb::WHITE, 8), (RED, 2)]);
        assert_eq!(selector.background(&edge), Rgb::WHITE);

        let edge = frequencies(&[(Rgb::WHITE, 6), (Rgb::BLACK, 5), (RED, 4)]);
        assert_eq!(selector.background(&edge), RED);
    }

    #[test]
    fn background_ignores_noise() {
        // every color covers 1% of the edge
        let edge = (0..100u8).map(|i| Rgb::new(i, 0, 0)).collect::<ColorFrequencies>();
        assert_eq!(PaletteSelector::new().background(&edge), Rgb::new(0, 0, 0));
    }

    #[test]
    fn background_of_empty_edge_is_white() {
        assert_eq!(PaletteSelector::new().background(&ColorFrequencies::new()), Rgb::WHITE);
    }

    #[test]
    fn selects_contrasting_distinct_colors() {
        let edge = frequencies(&[(Rgb::WHITE, 20)]);
        let image = frequencies(&[
            (Rgb::WHITE, 1000),
            (NAVY, 500),
            (Rgb::new(0, 0, 120), 400),
            (MAROON, 300),
            (Rgb::BLACK, 200),
        ]);

        let palette = PaletteSelector::new().select(&edge, &image.sorted());
        assert_eq!(
            palette,
            Palette {
                background: Rgb::WHITE,
                primary: NAVY,
                secondary: MAROON,
                detail: Rgb::BLACK,
            }
        );
    }

    #[test]
    fn light_text_on_dark_background() {
        let edge = frequencies(&[(Rgb::BLACK, 20)]);
        let image = frequencies(&[(Rgb::BLACK, 1000), (MAROON, 600), (Rgb::new(255, 255, 0), 10)]);

        let palette = PaletteSelector::new().select(&edge, &image.sorted());
        assert_eq!(palette.background, Rgb::BLACK);
        // maroon is dark, so it cannot be text on black
        assert_eq!(palette.primary, Rgb::new(255, 255, 0));
        assert_eq!(palette.secondary, Rgb::WHITE);
        assert_eq!(palette.detail, Rgb::WHITE);
    }

    #[test]
    fn missing_colors_fall_back() {
        let edge = frequencies(&[(Rgb::WHITE, 20)]);
        let image = frequencies(&[(Rgb::WHITE, 1000)]);
        let palette = PaletteSelector::new().select(&edge, &image.sorted());
        assert_eq!([palette.primary, palette.secondary, palette.detail], [Rgb::BLACK; 3]);

        let image = frequencies(&[(Rgb::WHITE, 1000), (NAVY, 10)]);
        let palette = PaletteSelector::new()
            .min_contrast(25.0)
            .select(&edge, &image.sorted());
        assert_eq!(palette.primary, Rgb::BLACK);
    }

    #[test]
    fn ties_pick_lowest_color_first() {
        let edge = frequencies(&[(Rgb::WHITE, 20)]);
        let image = frequencies(&[(MAROON, 10), (NAVY, 10)]);
        let [primary, secondary, _] = PaletteSelector::new().text_colors(Rgb::WHITE, &image.sorted());
        assert_eq!(primary, NAVY);
        assert_eq!(secondary, MAROON);
        assert_eq!(PaletteSelector::new().background(&edge), Rgb::WHITE);
    }
}
