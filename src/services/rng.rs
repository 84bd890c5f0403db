use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform integer in `[min, max]` inclusive. Inverted bounds are swapped
/// before drawing; `min == max` returns that value. `thread_rng` is a
/// CSPRNG, so this is safe for password material too.
pub fn random_int_inclusive(min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if lo == hi {
        return lo;
    }
    rand::thread_rng().gen_range(lo..=hi)
}

/// Uniform index into a collection of `len` elements.
pub fn random_index(len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rand::thread_rng().gen_range(0..len))
}

/// Fisher-Yates shuffle of the slice, in place. No-op for 0/1 elements.
pub fn shuffle_in_place<T>(items: &mut [T]) {
    items.shuffle(&mut rand::thread_rng());
}

/// Draw an index proportional to `weights`. Negative weights clamp to 0,
/// non-finite weights count as 1; if everything clamps to 0 the draw is
/// uniform. Empty input yields `None`.
pub fn weighted_index(weights: &[f64]) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let effective: Vec<f64> = weights
        .iter()
        .map(|&w| if w.is_finite() { w.max(0.0) } else { 1.0 })
        .collect();
    let total: f64 = effective.iter().sum();
    if total <= 0.0 {
        return random_index(weights.len());
    }
    let mut target = rand::thread_rng().gen::<f64>() * total;
    for (i, &w) in effective.iter().enumerate() {
        target -= w;
        if target < 0.0 {
            return Some(i);
        }
    }
    Some(effective.len() - 1)
}

/// Draw `count` distinct integers uniformly from `[min, max]` (swap-safe).
/// When `count` covers the whole domain the full shuffled domain is
/// returned. Small domains are materialized and shuffled; large ones use
/// rejection sampling so a `pick 5 of 1..10^9` draw stays cheap.
pub fn sample_unique_ints(min: i64, max: i64, count: usize) -> Vec<i64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let domain = (hi as i128 - lo as i128 + 1) as u128;

    if count as u128 >= domain || domain <= 4096 {
        let take = (count as u128).min(domain) as usize;
        let mut all: Vec<i64> = (lo..=hi).collect();
        shuffle_in_place(&mut all);
        all.truncate(take);
        return all;
    }

    let mut seen = HashSet::with_capacity(count);
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let v = random_int_inclusive(lo, hi);
        if seen.insert(v) {
            out.push(v);
        }
    }
    out
}
