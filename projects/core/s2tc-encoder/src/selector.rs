//! Endpoint selector (§4.2): pick the two candidates minimizing the tile's total per-pixel
//! min-distance, under the active candidate-generation mode (Normal / Random / Fast).
//!
//! Entirely stack-resident: candidate sets are capped fixed-size buffers rather than heap
//! vectors, matching the crate's "no allocation beyond the caller's output buffer" contract
//! (§5). A `Random` candidate count above [`MAX_RANDOM_CANDIDATES`] is silently clamped; the
//! endpoint search is already a heuristic; a few thousand extra candidates would not plausibly
//! be distinguishable in the final two picks.

use crate::config::CandidateMode;
use crate::tile::{Tile, TILE_PIXELS};
use s2tc_common::{metrics::alpha_dist, Color565, ColorDistMetric};

/// Cap on synthetic candidates drawn by [`CandidateMode::Random`].
pub const MAX_RANDOM_CANDIDATES: usize = 64;
const MAX_CANDIDATES: usize = TILE_PIXELS + MAX_RANDOM_CANDIDATES;

/// A capped, stack-resident, append-only buffer.
struct Buf<T: Copy, const N: usize> {
    items: [T; N],
    len: usize,
}

impl<T: Copy + PartialEq, const N: usize> Buf<T, N> {
    #[inline]
    fn new(fill: T) -> Self {
        Self { items: [fill; N], len: 0 }
    }

    #[inline]
    fn push(&mut self, v: T) {
        if self.len < N {
            self.items[self.len] = v;
            self.len += 1;
        }
    }

    #[inline]
    fn push_distinct(&mut self, v: T) {
        if !self.as_slice().contains(&v) {
            self.push(v);
        }
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.items[..self.len]
    }
}

/// Scans every unordered candidate pair and returns the indices of the pair minimizing
/// `sum(min(dist(i, p), dist(j, p), dist(sentinel, p)...))` over `pixels`. Ties break on
/// first-found, scanning `i` outer and `j` inner with `i < j` (§4.2).
///
/// `candidates` must have at least two entries.
fn select_pair<C: Copy>(
    candidates: &[C],
    pixels: &[C],
    dist: impl Fn(C, C) -> i64,
    sentinels: &[C],
) -> (usize, usize) {
    debug_assert!(candidates.len() >= 2);
    let mut best_i = 0;
    let mut best_j = 1;
    let mut best_total = i64::MAX;
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let mut total = 0i64;
            for &p in pixels {
                let mut d = dist(candidates[i], p).min(dist(candidates[j], p));
                for &s in sentinels {
                    d = d.min(dist(s, p));
                }
                total += d;
            }
            if total < best_total {
                best_total = total;
                best_i = i;
                best_j = j;
            }
        }
    }
    (best_i, best_j)
}

/// Whether a tile pixel's color counts towards endpoint selection/refinement under `metric`:
/// alpha-ignoring metrics drop alpha-0 pixels (their color is invisible), except NORMALMAP,
/// which has no alpha semantics at all (§4.1, §4.2 "Normal").
fn counted_colors(tile: &Tile, metric: ColorDistMetric) -> Buf<Color565, TILE_PIXELS> {
    let mut out = Buf::new(Color565::from_raw(0));
    for (_, p) in tile.iter() {
        if metric.alpha_0_is_unimportant() && p.alpha == 0 {
            continue;
        }
        out.push(p.color);
    }
    if out.len == 0 {
        // Degenerate: every pixel is alpha-0. Fall back to the full pixel set so the
        // selector always has something to choose between.
        for (_, p) in tile.iter() {
            out.push(p.color);
        }
    }
    out
}

/// Draws up to [`MAX_RANDOM_CANDIDATES`] synthetic colors uniformly from the axis-aligned
/// bounding box of `colors` (inclusive of an extra +1 per axis, per §4.2), clamped to valid
/// R5G6B5 component ranges.
fn random_box_candidates(
    colors: &[Color565],
    count: u32,
    seed: u64,
    out: &mut Buf<Color565, MAX_CANDIDATES>,
) {
    let (mut rmin, mut rmax) = (31i32, 0i32);
    let (mut gmin, mut gmax) = (63i32, 0i32);
    let (mut bmin, mut bmax) = (31i32, 0i32);
    for &c in colors {
        rmin = rmin.min(c.r());
        rmax = rmax.max(c.r());
        gmin = gmin.min(c.g());
        gmax = gmax.max(c.g());
        bmin = bmin.min(c.b());
        bmax = bmax.max(c.b());
    }
    let mut rng = s2tc_common::prng::CandidateRng::new(seed);
    let draws = (count as usize).min(MAX_RANDOM_CANDIDATES);
    for _ in 0..draws {
        let r = (rmin + rng.next_below((rmax - rmin + 2) as u32) as i32).clamp(0, 31);
        let g = (gmin + rng.next_below((gmax - gmin + 2) as u32) as i32).clamp(0, 63);
        let b = (bmin + rng.next_below((bmax - bmin + 2) as u32) as i32).clamp(0, 31);
        out.push(Color565::from_components(r as u8, g as u8, b as u8));
    }
}

/// Selects the two color endpoints for the color ramp (§4.2). `pixels` (the selection
/// objective's population) and `candidates` (the search space) are both derived from the
/// tile's alpha-filtered color set; for [`CandidateMode::Fast`] the selector itself is
/// bypassed in favor of a single nearest/farthest-from-black scan.
pub fn select_color_endpoints(
    tile: &Tile,
    metric: ColorDistMetric,
    candidates_mode: CandidateMode,
) -> (Color565, Color565) {
    let pixels = counted_colors(tile, metric);
    let pixels = pixels.as_slice();
    debug_assert!(!pixels.is_empty());

    if pixels.len() == 1 {
        return (pixels[0], pixels[0]);
    }

    match candidates_mode {
        CandidateMode::Fast => {
            debug_assert!(metric.supports_fast_candidates());
            let black = Color565::from_components(0, 0, 0);
            let mut nearest = pixels[0];
            let mut farthest = pixels[0];
            let mut nearest_d = metric.dist(black, pixels[0]);
            let mut farthest_d = nearest_d;
            for &p in &pixels[1..] {
                let d = metric.dist(black, p);
                if d < nearest_d {
                    nearest_d = d;
                    nearest = p;
                }
                if d > farthest_d {
                    farthest_d = d;
                    farthest = p;
                }
            }
            (nearest, farthest)
        }
        CandidateMode::Normal => {
            let mut candidates: Buf<Color565, MAX_CANDIDATES> = Buf::new(pixels[0]);
            for &p in pixels {
                candidates.push_distinct(p);
            }
            if candidates.len == 1 {
                return (candidates.items[0], candidates.items[0]);
            }
            let (i, j) = select_pair(candidates.as_slice(), pixels, |a, b| metric.dist(a, b), &[]);
            (candidates.items[i], candidates.items[j])
        }
        CandidateMode::Random { count, seed } => {
            let mut candidates: Buf<Color565, MAX_CANDIDATES> = Buf::new(pixels[0]);
            for &p in pixels {
                candidates.push_distinct(p);
            }
            random_box_candidates(pixels, count, seed, &mut candidates);
            if candidates.len == 1 {
                return (candidates.items[0], candidates.items[0]);
            }
            let (i, j) = select_pair(candidates.as_slice(), pixels, |a, b| metric.dist(a, b), &[]);
            (candidates.items[i], candidates.items[j])
        }
    }
}

/// Whether a tile pixel's alpha counts towards DXT5 alpha endpoint selection: alpha-0 pixels
/// are excluded so the selector doesn't waste precision fitting invisible pixels (they'll
/// land on the 0 sentinel in the assigner regardless of where `a[0]`/`a[1]` end up).
fn counted_alphas(tile: &Tile) -> Buf<u8, TILE_PIXELS> {
    let mut out = Buf::new(0u8);
    for (_, p) in tile.iter() {
        if p.alpha != 0 {
            out.push(p.alpha);
        }
    }
    if out.len == 0 {
        for (_, p) in tile.iter() {
            out.push(p.alpha);
        }
    }
    out
}

/// Selects the two non-sentinel alpha endpoints for DXT5's 6-entry ramp (§4.2). The search
/// objective additionally considers the two fixed sentinels 0 and 255, since a pixel that's
/// already well served by a sentinel shouldn't pull an endpoint towards it.
pub fn select_alpha_endpoints(tile: &Tile, candidates_mode: CandidateMode) -> (u8, u8) {
    let alphas = counted_alphas(tile);
    let alphas = alphas.as_slice();
    debug_assert!(!alphas.is_empty());

    if alphas.len() == 1 {
        return (alphas[0], alphas[0]);
    }

    let lo = *alphas.iter().min().unwrap();
    let hi = *alphas.iter().max().unwrap();

    match candidates_mode {
        CandidateMode::Fast => (lo, hi),
        CandidateMode::Normal => {
            let mut candidates: Buf<u8, MAX_CANDIDATES> = Buf::new(alphas[0]);
            for &a in alphas {
                candidates.push_distinct(a);
            }
            if candidates.len == 1 {
                return (candidates.items[0], candidates.items[0]);
            }
            let (i, j) =
                select_pair(candidates.as_slice(), alphas, alpha_dist, &[0u8, 255u8]);
            (candidates.items[i], candidates.items[j])
        }
        CandidateMode::Random { count, seed } => {
            let mut candidates: Buf<u8, MAX_CANDIDATES> = Buf::new(alphas[0]);
            for &a in alphas {
                candidates.push_distinct(a);
            }
            let mut rng = s2tc_common::prng::CandidateRng::new(seed);
            let draws = (count as usize).min(MAX_RANDOM_CANDIDATES);
            for _ in 0..draws {
                let span = (hi as i32 - lo as i32 + 2).max(1) as u32;
                let a = (lo as i32 + rng.next_below(span) as i32).clamp(0, 255);
                candidates.push(a as u8);
            }
            if candidates.len == 1 {
                return (candidates.items[0], candidates.items[0]);
            }
            let (i, j) =
                select_pair(candidates.as_slice(), alphas, alpha_dist, &[0u8, 255u8]);
            (candidates.items[i], candidates.items[j])
        }
    }
}
