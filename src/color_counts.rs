//! Contains the color frequency index and the code for bulk color counting.

use crate::{quantize, Rgb, RankedEntry, ZeroedIsZero};
use bitvec::vec::BitVec;
#[cfg(feature = "threads")]
use rayon::prelude::*;
use std::{
    collections::{hash_map, HashMap},
    ops::Range,
};

/// Counts the number of times each canonical [`Rgb`] color occurs.
///
/// Only colors with a nonzero count are tracked:
/// a count that drops to `0` removes the color from the index.
/// The index has no inherent order; use [`ColorFrequencies::sorted`] to get the colors
/// ranked by descending count.
///
/// The index is meant to be filled by a single pass over an image and then read out once.
/// To count in parallel, build one index per worker and combine them with
/// [`ColorFrequencies::merge`] (or use [`ColorFrequencies::from_colors_par`]).
///
/// # Examples
/// ```
/// # use colorart::{ColorFrequencies, Rgb, RankedEntry};
/// let red = Rgb::new(255, 0, 0);
/// let blue = Rgb::new(0, 0, 255);
///
/// let mut counts = ColorFrequencies::new();
/// counts.add(blue);
/// counts.add(red);
/// counts.add(red);
///
/// assert_eq!(counts.count(red), 2);
/// assert_eq!(
///     counts.sorted(),
///     [RankedEntry { color: red, count: 2 }, RankedEntry { color: blue, count: 1 }],
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorFrequencies {
    /// The count for each color. Every count is nonzero.
    counts: HashMap<Rgb, u32>,
}

impl ColorFrequencies {
    /// Creates a new, empty [`ColorFrequencies`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty [`ColorFrequencies`] with space for at least `capacity` distinct colors.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { counts: HashMap::with_capacity(capacity) }
    }

    /// Increments the count of `color` by one.
    ///
    /// The count saturates at `u32::MAX`.
    pub fn add(&mut self, color: Rgb) {
        let n = self.counts.entry(color).or_insert(0);
        *n = n.saturating_add(1);
    }

    /// Quantizes the 16-bit, alpha-premultiplied pixel and increments the count of the resulting color.
    ///
    /// Fully transparent pixels (`a == 0`) are skipped.
    /// Returns whether or not the pixel was counted.
    pub fn add_rgba(&mut self, r: u16, g: u16, b: u16, a: u16) -> bool {
        if let Some(color) = quantize(r, g, b, a) {
            self.add(color);
            true
        } else {
            tracing::trace!("skipping fully transparent pixel");
            false
        }
    }

    /// Sets the count of `color` to exactly `count`, replacing any previous count.
    ///
    /// A `count` of `0` removes the color.
    pub fn add_count(&mut self, color: Rgb, count: u32) {
        if count == 0 {
            self.counts.remove(&color);
        } else {
            self.counts.insert(color, count);
        }
    }

    /// Decrements the count of `color` by one, removing it once the count reaches `0`.
    ///
    /// Does nothing if `color` is not present.
    pub fn remove(&mut self, color: Rgb) {
        if let hash_map::Entry::Occupied(mut entry) = self.counts.entry(color) {
            if *entry.get() > 1 {
                *entry.get_mut() -= 1;
            } else {
                entry.remove();
            }
        }
    }

    /// Removes `color` regardless of its count.
    pub fn remove_all(&mut self, color: Rgb) {
        self.counts.remove(&color);
    }

    /// Returns the count of `color`, or `0` if it is not present.
    #[must_use]
    pub fn count(&self, color: Rgb) -> u32 {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    /// Returns the number of distinct colors with a nonzero count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether or not there are no colors in the index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the sum of all counts.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.counts.values().map(|&n| u64::from(n)).sum()
    }

    /// Returns an iterator over the distinct colors in an unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.counts.keys().copied()
    }

    /// Returns an iterator over each color and its count in an unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Rgb, u32)> + '_ {
        self.counts.iter().map(|(&color, &count)| (color, count))
    }

    /// Returns every color and its count, ranked from the greatest count to the least.
    ///
    /// Colors with equal counts are ordered by ascending byte value
    /// (red, then green, then blue), so the result is fully deterministic.
    #[must_use]
    pub fn sorted(&self) -> Vec<RankedEntry> {
        let mut entries = self
            .iter()
            .map(|(color, count)| RankedEntry { color, count })
            .collect::<Vec<_>>();

        entries.sort_unstable_by(|a, b| b.count.cmp(&a.count).then(a.color.cmp(&b.color)));
        entries
    }

    /// Adds the counts of `other` to the counts of `self`, color by color.
    ///
    /// Counts saturate at `u32::MAX`.
    pub fn merge(&mut self, other: &Self) {
        self.counts.reserve(other.len());
        for (color, count) in other.iter() {
            let n = self.counts.entry(color).or_insert(0);
            *n = n.saturating_add(count);
        }
    }

    /// Creates a new [`ColorFrequencies`] by counting every color in the given slice.
    ///
    /// This is faster than calling [`ColorFrequencies::add`] for each color
    /// when the slice is large (e.g., every pixel of an image).
    #[must_use]
    pub fn from_colors(colors: &[Rgb]) -> Self {
        let mut frequencies = Self::with_capacity(0);
        // u32 prefix sums limit each radix pass to u32::MAX colors
        for chunk in colors.chunks(u32::MAX as usize) {
            radix_counts(chunk, |color, count| {
                let n = frequencies.counts.entry(color).or_insert(0);
                *n = n.saturating_add(count);
            });
        }
        frequencies
    }

    /// Creates a new [`ColorFrequencies`] by counting every color in the given slice in parallel.
    ///
    /// The slice is split into one chunk per thread, each chunk is counted independently,
    /// and the partial counts are then merged.
    #[cfg(feature = "threads")]
    #[must_use]
    pub fn from_colors_par(colors: &[Rgb]) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            let chunk_size = colors.len().div_ceil(rayon::current_num_threads());
            colors
                .par_chunks(chunk_size)
                .map(Self::from_colors)
                .reduce(Self::default, |mut a, mut b| {
                    if a.len() < b.len() {
                        std::mem::swap(&mut a, &mut b);
                    }
                    a.merge(&b);
                    a
                })
        }
    }
}

impl FromIterator<Rgb> for ColorFrequencies {
    fn from_iter<T: IntoIterator<Item = Rgb>>(iter: T) -> Self {
        let mut frequencies = Self::new();
        frequencies.extend(iter);
        frequencies
    }
}

impl Extend<Rgb> for ColorFrequencies {
    fn extend<T: IntoIterator<Item = Rgb>>(&mut self, iter: T) {
        for color in iter {
            self.add(color);
        }
    }
}

/// A byte-sized Radix
const RADIX: usize = u8::MAX as usize + 1;

/// Returns the range associated with the `i`-th chunk.
#[inline]
fn chunk_range(chunks: &[u32], i: usize) -> Range<usize> {
    (chunks[i] as usize)..(chunks[i + 1] as usize)
}

/// Computes the prefix sum of the array in place.
#[inline]
fn prefix_sum<const M: usize>(counts: &mut [u32; M]) {
    for i in 1..M {
        counts[i] += counts[i - 1];
    }
}

/// Counts each distinct color in `colors`, calling `emit` once per color
/// in ascending byte order.
///
/// `colors` must have at most `u32::MAX` elements.
///
/// Colors are first bucketed by red component using a counting sort.
/// Each bucket then has its green and blue components counted in a dense table.
/// Sparse buckets track which table cells were touched in a bitmask
/// so that only those need to be visited and cleared.
fn radix_counts(colors: &[Rgb], mut emit: impl FnMut(Rgb, u32)) {
    if colors.is_empty() {
        return;
    }

    #[allow(clippy::cast_possible_truncation)]
    let total_count = colors.len() as u32;
    debug_assert_eq!(total_count as usize, colors.len());

    let mut red_prefix = <[u32; RADIX + 1]>::box_zeroed();
    for &Rgb([r, ..]) in colors {
        red_prefix[usize::from(r)] += 1;
    }
    prefix_sum(&mut *red_prefix);

    let mut green_blue = vec![[0; 2]; colors.len()];
    for &Rgb([r, g, b]) in colors {
        let r = usize::from(r);
        let j = red_prefix[r] - 1;
        green_blue[j as usize] = [g, b];
        red_prefix[r] = j;
    }
    red_prefix[RADIX] = total_count;

    let mut lower_counts = <[[u32; RADIX]; RADIX]>::box_zeroed();
    let mut bitmask: BitVec = BitVec::repeat(false, RADIX * RADIX);

    for r in 0..RADIX {
        let chunk = chunk_range(red_prefix.as_slice(), r);
        if chunk.is_empty() {
            continue;
        }

        #[allow(clippy::cast_possible_truncation)]
        let r = r as u8;
        let green_blue = &green_blue[chunk.clone()];

        if chunk.len() < RADIX * RADIX / 4 {
            for gb in green_blue {
                let [g, b] = gb.map(usize::from);
                lower_counts[g][b] += 1;
                bitmask.set(g * RADIX + b, true);
            }

            for i in bitmask.iter_ones() {
                let g = i / RADIX;
                let b = i % RADIX;
                #[allow(clippy::cast_possible_truncation)]
                let color = Rgb::new(r, g as u8, b as u8);
                emit(color, lower_counts[g][b]);
                lower_counts[g][b] = 0;
            }

            bitmask.fill(false);
        } else {
            for &[g, b] in green_blue {
                lower_counts[usize::from(g)][usize::from(b)] += 1;
            }

            for (g, counts) in lower_counts.iter().enumerate() {
                for (b, &count) in counts.iter().enumerate() {
                    if count > 0 {
                        #[allow(clippy::cast_possible_truncation)]
                        let color = Rgb::new(r, g as u8, b as u8);
                        emit(color, count);
                    }
                }
            }

            lower_counts.fill_zero();
        }
    }
}
