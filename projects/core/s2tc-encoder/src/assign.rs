//! Pixel assigner (§4.3): for each tile pixel, choose the ramp codepoint minimizing distance
//! under the active metric, and tally per-codepoint sums for refinement.

use crate::config::DxtMode;
use crate::tile::Tile;
use s2tc_common::{metrics::alpha_dist, Color565, ColorDistMetric, WideColor565};

/// The result of one assignment pass over the color ramp: per-pixel indices (raw ramp index,
/// `0`/`1` for a normal match or `3` for a DXT1 transparent pixel), plus the count/sum needed
/// to recompute each endpoint's centroid, and the total assigned distortion over the pixels
/// that counted towards it.
#[derive(Debug, Clone)]
pub struct ColorAssignment {
    /// Per-pixel-index (0..16) ramp index; unused slots (truncated edge tiles) are left at 0.
    pub indices: [u8; 16],
    /// `(count, sum)` for endpoint 0 and endpoint 1, in encode-transform space (§4.1).
    pub stats: [(i64, WideColor565); 2],
    /// Sum of per-pixel min-distance over every pixel that counted towards `stats` (excludes
    /// DXT1 transparent pixels and, under alpha-ignoring metrics, alpha-0/alpha-ramp-sentinel
    /// pixels per §4.3).
    pub cost: i64,
}

/// Assigns every tile pixel to the nearer of `c[0]`/`c[1]` under `metric`, with DXT1's
/// alpha-0-forces-index-3 rule and the DXT3/DXT5 sum-exclusion rule from §4.3.
///
/// `alpha_excluded(pixel_index)` reports whether a pixel's color contribution should be left
/// out of the refinement sums: for DXT1 this is irrelevant (alpha-0 pixels are forced to index
/// 3 and never reach the sums regardless); for DXT3 it should be `alpha == 0` under an
/// alpha-ignoring metric; for DXT5 it should be "this pixel's alpha-ramp index is the 0
/// sentinel" under an alpha-ignoring metric.
pub fn assign_color(
    tile: &Tile,
    c: [Color565; 2],
    metric: ColorDistMetric,
    dxt_mode: DxtMode,
    alpha_excluded: impl Fn(u8) -> bool,
) -> ColorAssignment {
    let mut indices = [0u8; 16];
    let mut stats = [(0i64, WideColor565::zero()), (0i64, WideColor565::zero())];
    let mut cost = 0i64;

    for (idx, pixel) in tile.iter() {
        if dxt_mode == DxtMode::Dxt1 && pixel.alpha == 0 {
            indices[idx as usize] = 3;
            continue;
        }
        let d0 = metric.dist(c[0], pixel.color);
        let d1 = metric.dist(c[1], pixel.color);
        let chosen = if d0 <= d1 { 0usize } else { 1usize };
        indices[idx as usize] = chosen as u8;

        if alpha_excluded(idx) {
            continue;
        }
        cost += d0.min(d1);
        stats[chosen].0 += 1;
        stats[chosen].1.add(WideColor565 {
            r: metric.encode_component(pixel.color.r()),
            g: metric.encode_component(pixel.color.g()),
            b: metric.encode_component(pixel.color.b()),
        });
    }

    ColorAssignment { indices, stats, cost }
}

/// The result of one assignment pass over the DXT5 alpha ramp: the per-pixel 3-bit encoded
/// index (`0`, `1`, `6`, or `7`, per §3's 6-entry form), and the count/sum for the two
/// non-sentinel endpoints.
#[derive(Debug, Clone)]
pub struct AlphaAssignment {
    /// Per-pixel-index (0..16) 3-bit encoded alpha ramp index.
    pub indices: [u8; 16],
    /// `(count, sum)` for `a[0]` (encoded index 0) and `a[1]` (encoded index 1).
    pub stats: [(i64, i64); 2],
    /// Sum of per-pixel min-distance over every pixel (all pixels count towards the alpha
    /// ramp's own cost; exclusion from color sums is a separate, color-side decision).
    pub cost: i64,
}

/// Assigns every tile pixel to the nearest of `{a[0], a[1], 0, 255}` under squared difference,
/// encoding `a[0]/a[1]` as indices 0/1 and the sentinels as indices 6/7 (§3, §4.3).
pub fn assign_alpha(tile: &Tile, a: [u8; 2]) -> AlphaAssignment {
    let mut indices = [0u8; 16];
    let mut stats = [(0i64, 0i64), (0i64, 0i64)];
    let mut cost = 0i64;

    let codepoints: [(u8, u8); 4] = [(0, a[0]), (1, a[1]), (6, 0), (7, 255)];

    for (idx, pixel) in tile.iter() {
        let mut best_code = codepoints[0].0;
        let mut best_d = alpha_dist(codepoints[0].1, pixel.alpha);
        for &(code, value) in &codepoints[1..] {
            let d = alpha_dist(value, pixel.alpha);
            if d < best_d {
                best_d = d;
                best_code = code;
            }
        }
        indices[idx as usize] = best_code;
        cost += best_d;
        if best_code == 0 {
            stats[0].0 += 1;
            stats[0].1 += pixel.alpha as i64;
        } else if best_code == 1 {
            stats[1].0 += 1;
            stats[1].1 += pixel.alpha as i64;
        }
    }

    AlphaAssignment { indices, stats, cost }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile_of(pixels: &[(u8, u8, u8, u8)]) -> Tile {
        let mut img = Vec::new();
        for &(r, g, b, a) in pixels {
            img.extend_from_slice(&[r, g, b, a]);
        }
        let w = pixels.len();
        Tile::read(&img, w, 1, w, 0, 0)
    }

    #[test]
    fn dxt1_alpha_zero_pixel_forces_index_three() {
        let tile = tile_of(&[(255, 0, 0, 0), (255, 0, 0, 255)]);
        let c = [Color565::from_components(31, 0, 0), Color565::from_components(0, 0, 0)];
        let a = assign_color(&tile, c, ColorDistMetric::Wavg, DxtMode::Dxt1, |_| false);
        assert_eq!(a.indices[0], 3);
        assert_ne!(a.indices[1], 3);
    }

    #[test]
    fn alpha_assigner_picks_sentinels_for_extreme_alphas() {
        let tile = tile_of(&[(0, 0, 0, 0), (0, 0, 0, 255), (0, 0, 0, 128)]);
        let a = assign_alpha(&tile, [64, 192]);
        assert_eq!(a.indices[0], 6);
        assert_eq!(a.indices[1], 7);
    }

    #[test]
    fn color_sums_exclude_marked_pixels() {
        let tile = tile_of(&[(255, 0, 0, 0), (0, 0, 0, 255)]);
        let c = [Color565::from_components(31, 0, 0), Color565::from_components(0, 0, 0)];
        let a = assign_color(&tile, c, ColorDistMetric::Wavg, DxtMode::Dxt3, |i| i == 0);
        assert_eq!(a.stats[0].0 + a.stats[1].0, 1);
    }
}
