use std::ops::Range;

/// Level of `magnitude` relative to `reference`, in dB (`20 * log10`).
///
/// Zero (or negative) magnitudes and a zero reference have no finite level
/// and return `None`; callers map that to the bottom of their range.
#[inline]
pub fn to_db(magnitude: f32, reference: f32) -> Option<f32> {
    if magnitude <= 0.0 || reference <= 0.0 {
        return None;
    }
    Some(20.0 * (magnitude / reference).log10())
}

/// Map a magnitude to `[0, 1]`: 0 at `dynamic_range_db` below `peak` (or
/// quieter), 1 at the peak.
#[inline]
pub fn normalize(magnitude: f32, peak: f32, dynamic_range_db: f32) -> f32 {
    match to_db(magnitude, peak) {
        Some(db) => (db.clamp(-dynamic_range_db, 0.0) + dynamic_range_db) / dynamic_range_db,
        None => 0.0,
    }
}

/// Source indices folded into output cell `index` when `len` items are
/// spread over `buckets` cells: `[floor(i*len/buckets), floor((i+1)*len/buckets))`,
/// widened to one item when that range is empty (upscaling).
///
/// Requires `index < buckets` and `len > 0`.
#[inline]
pub fn bucket(index: usize, buckets: usize, len: usize) -> Range<usize> {
    debug_assert!(index < buckets && len > 0);
    let start = index * len / buckets;
    let end = ((index + 1) * len / buckets).max(start + 1);
    start..end
}
