// ============================================================================
// HISTOGRAM COMPUTER — per-channel 256-bin pixel-value counting
// ============================================================================
//
// Pure functions of the decoded bitmap: each call allocates its own count
// buffers and returns them owned. Counting is parallelized by row via rayon
// (associative merge of per-row count arrays).
// ============================================================================

use image::{DynamicImage, GrayImage, RgbaImage};
use rayon::prelude::*;

/// Number of bins before any coalescing (one per 8-bit sample value).
pub const BINS: usize = 256;

/// Which frequency arrays `HistogramData::compute` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// Three independent arrays: red, green, blue. Alpha never selects a bin.
    Rgb,
    /// One array over a single pre-flattened intensity plane.
    Luminance,
}

/// Per-channel frequency arrays for one image.
///
/// Counts are `u64` so a single bin can hold well past 2^32 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistogramData {
    Rgb {
        red:   Vec<u64>,
        green: Vec<u64>,
        blue:  Vec<u64>,
    },
    Luminance(Vec<u64>),
}

impl HistogramData {
    /// Compute histograms for an already-decoded image.
    ///
    /// `Luminance` mode flattens via [`DynamicImage::to_luma8`] before
    /// counting; the counting core itself never derives a luma formula.
    pub fn compute(image: &DynamicImage, mode: ChannelMode, step: usize) -> Self {
        match mode {
            ChannelMode::Rgb => {
                let (red, green, blue) = rgb_histogram(&image.to_rgba8(), step);
                HistogramData::Rgb { red, green, blue }
            }
            ChannelMode::Luminance => {
                HistogramData::Luminance(luminance_histogram(&image.to_luma8(), step))
            }
        }
    }

    /// Decode `bytes` and compute histograms. Returns `None` when the bytes
    /// are not a decodable image — "no histogram available", never a panic.
    pub fn from_encoded(bytes: &[u8], mode: ChannelMode, step: usize) -> Option<Self> {
        let image = image::load_from_memory(bytes).ok()?;
        Some(Self::compute(&image, mode, step))
    }

    /// The frequency arrays as slices, in draw order (R, G, B or the single
    /// luminance plane).
    pub fn channels(&self) -> Vec<&[u64]> {
        match self {
            HistogramData::Rgb { red, green, blue } => vec![red, green, blue],
            HistogramData::Luminance(lum) => vec![lum],
        }
    }

    /// Number of bins per channel after coalescing.
    pub fn bin_count(&self) -> usize {
        match self {
            HistogramData::Rgb { red, .. } => red.len(),
            HistogramData::Luminance(lum) => lum.len(),
        }
    }
}

/// Count every pixel of `image` into three 256-bin arrays (one per color
/// channel), then coalesce each by `step`.
///
/// Each of the three arrays sums to `width * height` when `step == 1`;
/// alpha is ignored for bin selection, so fully transparent pixels count too.
pub fn rgb_histogram(image: &RgbaImage, step: usize) -> (Vec<u64>, Vec<u64>, Vec<u64>) {
    let stride = image.width() as usize * 4;
    let raw = image.as_raw();

    let (r, g, b) = if stride == 0 {
        ([0u64; BINS], [0u64; BINS], [0u64; BINS])
    } else {
        raw.par_chunks(stride)
            .map(|row| {
                let mut r = [0u64; BINS];
                let mut g = [0u64; BINS];
                let mut b = [0u64; BINS];
                for px in row.chunks_exact(4) {
                    r[px[0] as usize] += 1;
                    g[px[1] as usize] += 1;
                    b[px[2] as usize] += 1;
                }
                (r, g, b)
            })
            .reduce(
                || ([0u64; BINS], [0u64; BINS], [0u64; BINS]),
                |mut acc, part| {
                    for i in 0..BINS {
                        acc.0[i] += part.0[i];
                        acc.1[i] += part.1[i];
                        acc.2[i] += part.2[i];
                    }
                    acc
                },
            )
    };

    (coalesce(&r, step), coalesce(&g, step), coalesce(&b, step))
}

/// Count every sample of a grey plane into one 256-bin array, then coalesce
/// by `step`. Single-channel mode expects the caller to have flattened the
/// image to one intensity plane already.
pub fn luminance_histogram(plane: &GrayImage, step: usize) -> Vec<u64> {
    let stride = plane.width() as usize;
    let raw = plane.as_raw();

    let bins = if stride == 0 {
        [0u64; BINS]
    } else {
        raw.par_chunks(stride)
            .map(|row| {
                let mut bins = [0u64; BINS];
                for &v in row {
                    bins[v as usize] += 1;
                }
                bins
            })
            .reduce(
                || [0u64; BINS],
                |mut acc, part| {
                    for i in 0..BINS {
                        acc[i] += part[i];
                    }
                    acc
                },
            )
    };

    coalesce(&bins, step)
}

/// Block-sum reduction: destination bin `i` is the sum of source bins
/// `[i*step, i*step + step)`. Output length is exactly `256 / step`
/// (integer division); for steps that do not divide 256 the trailing
/// remainder bins are dropped. This truncation is intentional, not a
/// rounding policy.
fn coalesce(bins: &[u64; BINS], step: usize) -> Vec<u64> {
    if step <= 1 {
        return bins.to_vec();
    }
    (0..BINS / step)
        .map(|i| bins[i * step..i * step + step].iter().sum())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(px))
    }

    #[test]
    fn single_black_pixel() {
        let (r, g, b) = rgb_histogram(&solid(1, 1, [0, 0, 0, 255]), 1);
        for ch in [&r, &g, &b] {
            assert_eq!(ch.len(), 256);
            assert_eq!(ch[0], 1);
            assert!(ch[1..].iter().all(|&c| c == 0));
        }
    }

    #[test]
    fn full_red_2x2() {
        let (r, g, b) = rgb_histogram(&solid(2, 2, [255, 0, 0, 255]), 1);
        assert_eq!(r[255], 4);
        assert_eq!(r[..255].iter().sum::<u64>(), 0);
        assert_eq!(g[0], 4);
        assert_eq!(b[0], 4);
    }

    #[test]
    fn each_channel_sums_to_pixel_count() {
        let mut img = RgbaImage::new(13, 7);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgba([(x * 19) as u8, (y * 37) as u8, (x + y) as u8, (x % 2) as u8 * 255]);
        }
        let (r, g, b) = rgb_histogram(&img, 1);
        for ch in [&r, &g, &b] {
            assert_eq!(ch.iter().sum::<u64>(), 13 * 7);
        }
    }

    #[test]
    fn alpha_never_selects_a_bin() {
        // Fully transparent pixels still count once per channel array.
        let (r, _, _) = rgb_histogram(&solid(3, 3, [10, 20, 30, 0]), 1);
        assert_eq!(r[10], 9);
        assert_eq!(r.iter().sum::<u64>(), 9);
    }

    #[test]
    fn coalescing_preserves_total_for_dividing_steps() {
        let mut img = RgbaImage::new(16, 16);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgba([(x * 16 + y) as u8, 0, 0, 255]);
        }
        let (base, _, _) = rgb_histogram(&img, 1);
        let total: u64 = base.iter().sum();
        for step in [2, 4, 8, 16, 32, 64, 128, 256] {
            let (r, _, _) = rgb_histogram(&img, step);
            assert_eq!(r.len(), 256 / step);
            assert_eq!(r.iter().sum::<u64>(), total, "step {}", step);
        }
    }

    #[test]
    fn coalesced_bins_are_block_sums() {
        let img = solid(4, 1, [5, 0, 0, 255]);
        let (r, _, _) = rgb_histogram(&img, 4);
        // Value 5 lands in destination bin 5 / 4 = 1.
        assert_eq!(r.len(), 64);
        assert_eq!(r[1], 4);
        assert_eq!(r.iter().sum::<u64>(), 4);
    }

    #[test]
    fn non_dividing_step_truncates_remainder() {
        // step = 3: 85 full blocks cover bins 0..255; source bin 255 is the
        // remainder and its counts disappear.
        let (r, _, _) = rgb_histogram(&solid(2, 2, [255, 0, 0, 255]), 3);
        assert_eq!(r.len(), 85);
        assert_eq!(r.iter().sum::<u64>(), 0);

        let (r, _, _) = rgb_histogram(&solid(2, 2, [254, 0, 0, 255]), 3);
        assert_eq!(r.len(), 85);
        assert_eq!(r[84], 4);
    }

    #[test]
    fn luminance_counts_grey_plane_directly() {
        let plane = GrayImage::from_pixel(5, 4, image::Luma([200]));
        let lum = luminance_histogram(&plane, 1);
        assert_eq!(lum.len(), 256);
        assert_eq!(lum[200], 20);
        assert_eq!(lum.iter().sum::<u64>(), 20);
    }

    #[test]
    fn empty_image_yields_all_zero_bins() {
        let (r, g, b) = rgb_histogram(&RgbaImage::new(0, 0), 1);
        assert!(r.iter().chain(&g).chain(&b).all(|&c| c == 0));
        assert_eq!(luminance_histogram(&GrayImage::new(0, 0), 1).len(), 256);
    }

    #[test]
    fn from_encoded_rejects_garbage() {
        assert_eq!(
            HistogramData::from_encoded(b"not an image", ChannelMode::Rgb, 1),
            None
        );
    }

    #[test]
    fn from_encoded_decodes_png() {
        let img = DynamicImage::ImageRgba8(solid(2, 2, [0, 255, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageOutputFormat::Png,
        )
        .unwrap();

        let data = HistogramData::from_encoded(&bytes, ChannelMode::Rgb, 1).unwrap();
        match data {
            HistogramData::Rgb { green, .. } => assert_eq!(green[255], 4),
            _ => panic!("expected RGB histograms"),
        }
    }
}
