//! Refinement driver (§4.3): replace endpoints with the centroid of their assigned pixels,
//! one-shot, verify-and-keep, or iterated to a fixed point.

use crate::assign::{assign_alpha, assign_color, AlphaAssignment};
use crate::config::{DxtMode, RefineMode};
use crate::tile::Tile;
use s2tc_common::color565::round_half_up_div;
use s2tc_common::{Color565, ColorDistMetric, WideColor565};

/// Recomputes an endpoint's color from its accumulated `(count, sum)`, decoding out of the
/// metric's refinement transform (§4.1). If `count` is zero (every pixel was excluded or went
/// to the other endpoint) the original endpoint is kept unchanged — there is nothing to
/// recompute it from.
fn centroid(stat: (i64, WideColor565), metric: ColorDistMetric, fallback: Color565) -> Color565 {
    let (n, sum) = stat;
    if n == 0 {
        return fallback;
    }
    let r = metric.decode_component(round_half_up_div(sum.r, n)).clamp(0, 31);
    let g = metric.decode_component(round_half_up_div(sum.g, n)).clamp(0, 63);
    let b = metric.decode_component(round_half_up_div(sum.b, n)).clamp(0, 31);
    Color565::from_components(r as u8, g as u8, b as u8)
}

/// Whether pixel `idx`'s color should be excluded from this tile's refinement sums, per the
/// dxt-mode-specific rule in §4.3.
fn color_exclusion(
    tile: &Tile,
    dxt_mode: DxtMode,
    metric: ColorDistMetric,
    alpha_indices: Option<&[u8; 16]>,
) -> impl Fn(u8) -> bool + '_ {
    move |idx: u8| {
        if !metric.alpha_0_is_unimportant() {
            return false;
        }
        match dxt_mode {
            // DXT1's alpha-0 pixels are already forced to index 3 by the assigner and never
            // reach the sums; nothing extra to exclude here.
            DxtMode::Dxt1 => false,
            DxtMode::Dxt3 => tile
                .iter()
                .find(|(i, _)| *i == idx)
                .map(|(_, p)| p.alpha == 0)
                .unwrap_or(false),
            DxtMode::Dxt5 => alpha_indices
                .map(|indices| indices[idx as usize] == 6)
                .unwrap_or(false),
        }
    }
}

/// Runs the color-ramp refinement driver and returns the final endpoint pair plus the indices
/// that go with them. `alpha_indices`, when set, is this tile's already-decided DXT5 alpha
/// ramp assignment (needed only to implement DXT5's sum-exclusion rule).
pub fn refine_color(
    tile: &Tile,
    initial: [Color565; 2],
    metric: ColorDistMetric,
    dxt_mode: DxtMode,
    refine: RefineMode,
    alpha_indices: Option<&[u8; 16]>,
) -> ([Color565; 2], [u8; 16]) {
    let excluded = color_exclusion(tile, dxt_mode, metric, alpha_indices);
    let effective_refine = if metric.skips_refinement_check() && refine == RefineMode::Check {
        RefineMode::Always
    } else {
        refine
    };

    match effective_refine {
        RefineMode::Never => {
            let a = assign_color(tile, initial, metric, dxt_mode, &excluded);
            (initial, a.indices)
        }
        RefineMode::Always => {
            let first = assign_color(tile, initial, metric, dxt_mode, &excluded);
            let refined = [
                centroid(first.stats[0], metric, initial[0]),
                centroid(first.stats[1], metric, initial[1]),
            ];
            let second = assign_color(tile, refined, metric, dxt_mode, &excluded);
            (refined, second.indices)
        }
        RefineMode::Check => {
            let first = assign_color(tile, initial, metric, dxt_mode, &excluded);
            let refined = [
                centroid(first.stats[0], metric, initial[0]),
                centroid(first.stats[1], metric, initial[1]),
            ];
            let old_score = total_color_distortion(tile, &first.indices, initial, metric, &excluded);
            let new_score = total_color_distortion(tile, &first.indices, refined, metric, &excluded);
            if new_score < old_score {
                (refined, first.indices)
            } else {
                (initial, first.indices)
            }
        }
        RefineMode::Loop => {
            let mut cur = initial;
            let mut cur_assign = assign_color(tile, cur, metric, dxt_mode, &excluded);
            let mut cur_cost = cur_assign.cost;
            loop {
                let candidate = [
                    centroid(cur_assign.stats[0], metric, cur[0]),
                    centroid(cur_assign.stats[1], metric, cur[1]),
                ];
                if candidate == cur {
                    break;
                }
                let candidate_assign = assign_color(tile, candidate, metric, dxt_mode, &excluded);
                if candidate_assign.cost < cur_cost {
                    cur = candidate;
                    cur_cost = candidate_assign.cost;
                    cur_assign = candidate_assign;
                } else {
                    break;
                }
            }
            (cur, cur_assign.indices)
        }
    }
}

/// Total per-pixel distortion of `indices` re-scored against `endpoints` (used by *Check* to
/// compare the pre- and post-refinement endpoint sets on the *same* assignment).
fn total_color_distortion(
    tile: &Tile,
    indices: &[u8; 16],
    endpoints: [Color565; 2],
    metric: ColorDistMetric,
    excluded: impl Fn(u8) -> bool,
) -> i64 {
    let mut total = 0i64;
    for (idx, pixel) in tile.iter() {
        let ramp_index = indices[idx as usize];
        if ramp_index > 1 || excluded(idx) {
            continue;
        }
        total += metric.dist(endpoints[ramp_index as usize], pixel.color);
    }
    total
}

fn alpha_centroid(stat: (i64, i64), fallback: u8) -> u8 {
    let (n, sum) = stat;
    if n == 0 {
        return fallback;
    }
    round_half_up_div(sum, n).clamp(0, 255) as u8
}

/// Runs the DXT5 alpha-ramp refinement driver and returns the final `a[0]`/`a[1]` pair plus
/// the 3-bit encoded indices that go with them.
pub fn refine_alpha(tile: &Tile, initial: [u8; 2], refine: RefineMode) -> ([u8; 2], [u8; 16]) {
    match refine {
        RefineMode::Never => {
            let a = assign_alpha(tile, initial);
            (initial, a.indices)
        }
        RefineMode::Always => {
            let first = assign_alpha(tile, initial);
            let refined = [
                alpha_centroid(first.stats[0], initial[0]),
                alpha_centroid(first.stats[1], initial[1]),
            ];
            let second = assign_alpha(tile, refined);
            (refined, second.indices)
        }
        RefineMode::Check => {
            let first = assign_alpha(tile, initial);
            let refined = [
                alpha_centroid(first.stats[0], initial[0]),
                alpha_centroid(first.stats[1], initial[1]),
            ];
            let old_score = total_alpha_distortion(tile, &first.indices, initial);
            let new_score = total_alpha_distortion(tile, &first.indices, refined);
            if new_score < old_score {
                (refined, first.indices)
            } else {
                (initial, first.indices)
            }
        }
        RefineMode::Loop => {
            let mut cur = initial;
            let mut cur_assign: AlphaAssignment = assign_alpha(tile, cur);
            let mut cur_cost = cur_assign.cost;
            loop {
                let candidate = [
                    alpha_centroid(cur_assign.stats[0], cur[0]),
                    alpha_centroid(cur_assign.stats[1], cur[1]),
                ];
                if candidate == cur {
                    break;
                }
                let candidate_assign = assign_alpha(tile, candidate);
                if candidate_assign.cost < cur_cost {
                    cur = candidate;
                    cur_cost = candidate_assign.cost;
                    cur_assign = candidate_assign;
                } else {
                    break;
                }
            }
            (cur, cur_assign.indices)
        }
    }
}

fn total_alpha_distortion(tile: &Tile, indices: &[u8; 16], endpoints: [u8; 2]) -> i64 {
    use s2tc_common::metrics::alpha_dist;
    let mut total = 0i64;
    for (idx, pixel) in tile.iter() {
        let code = indices[idx as usize];
        let value = match code {
            0 => endpoints[0],
            1 => endpoints[1],
            6 => 0,
            7 => 255,
            _ => continue,
        };
        total += alpha_dist(value, pixel.alpha);
    }
    total
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
    fn never_mode_leaves_endpoints_untouched() {
        let tile = tile_of(&[(255, 0, 0, 255), (0, 0, 0, 255)]);
        let initial = [Color565::from_components(20, 0, 0), Color565::from_components(5, 0, 0)];
        let (endpoints, _) =
            refine_color(&tile, initial, ColorDistMetric::Wavg, DxtMode::Dxt1, RefineMode::Never, None);
        assert_eq!(endpoints, initial);
    }

    #[test]
    fn loop_mode_converges_to_a_fixed_point() {
        let tile = tile_of(&[
            (255, 0, 0, 255),
            (250, 0, 0, 255),
            (0, 0, 0, 255),
            (5, 0, 0, 255),
        ]);
        let initial = [Color565::from_components(31, 0, 0), Color565::from_components(0, 0, 0)];
        let (endpoints, indices) =
            refine_color(&tile, initial, ColorDistMetric::Wavg, DxtMode::Dxt1, RefineMode::Loop, None);
        let a = assign_color(&tile, endpoints, ColorDistMetric::Wavg, DxtMode::Dxt1, |_| false);
        assert_eq!(a.indices, indices);
        let recentroid = [
            centroid(a.stats[0], ColorDistMetric::Wavg, endpoints[0]),
            centroid(a.stats[1], ColorDistMetric::Wavg, endpoints[1]),
        ];
        assert_eq!(recentroid, endpoints);
    }

    #[test]
    fn always_mode_never_increases_distortion_under_wavg() {
        let tile = tile_of(&[
            (200, 10, 5, 255),
            (180, 20, 0, 255),
            (20, 200, 100, 255),
            (10, 210, 90, 255),
        ]);
        let initial = [Color565::from_components(25, 1, 0), Color565::from_components(2, 26, 11)];
        let never = assign_color(&tile, initial, ColorDistMetric::Wavg, DxtMode::Dxt1, |_| false);
        let (refined, indices) =
            refine_color(&tile, initial, ColorDistMetric::Wavg, DxtMode::Dxt1, RefineMode::Always, None);
        let refined_cost =
            total_color_distortion(&tile, &indices, refined, ColorDistMetric::Wavg, |_| false);
        assert!(refined_cost <= never.cost);
    }
}
