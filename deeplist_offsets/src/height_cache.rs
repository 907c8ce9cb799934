// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse cache of measured row heights.

use hashbrown::HashMap;

use crate::Scalar;

/// Sparse store of measured row heights with a default-height fallback.
///
/// Rows that have never been measured answer with the default height, so
/// the cache can be queried for any index without knowing the list length.
/// A measured height of zero is a valid measurement and is distinct from
/// "not measured": [`HeightCache::has`] tells the two apart.
#[derive(Clone, Debug)]
pub struct HeightCache<S: Scalar> {
    heights: HashMap<usize, S>,
    default_height: S,
}

impl<S: Scalar> HeightCache<S> {
    /// Creates an empty cache that assumes `default_height` for unmeasured rows.
    ///
    /// Negative defaults are clamped to zero.
    pub fn new(default_height: S) -> Self {
        debug_assert!(
            default_height.is_finite(),
            "default height must be finite, got {default_height:?}"
        );
        Self {
            heights: HashMap::new(),
            default_height: default_height.clamp_non_negative(),
        }
    }

    /// The height assumed for rows that have not been measured.
    pub fn default_height(&self) -> S {
        self.default_height
    }

    /// The measured height of `index`, or the default height if unmeasured.
    pub fn get(&self, index: usize) -> S {
        self.heights
            .get(&index)
            .copied()
            .unwrap_or(self.default_height)
    }

    /// Whether `index` has an exact measurement, even a zero-height one.
    pub fn has(&self, index: usize) -> bool {
        self.heights.contains_key(&index)
    }

    /// Records the measured height of `index`, replacing any prior value.
    ///
    /// Negative heights are clamped to zero.
    pub fn set(&mut self, index: usize, height: S) {
        debug_assert!(
            height.is_finite(),
            "measured height must be finite, got {height:?} for row {index}"
        );
        self.heights.insert(index, height.clamp_non_negative());
    }

    /// Number of rows with an exact measurement.
    pub fn measured_count(&self) -> usize {
        self.heights.len()
    }

    /// Discards every measurement, keeping the default height.
    pub fn clear(&mut self) {
        self.heights.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmeasured_rows_fall_back_to_default() {
        let cache = HeightCache::new(48.0_f64);
        assert_eq!(cache.get(0), 48.0);
        assert_eq!(cache.get(1_000_000), 48.0);
        assert!(!cache.has(0));
        assert_eq!(cache.measured_count(), 0);
    }

    #[test]
    fn measured_height_wins_over_default() {
        let mut cache = HeightCache::new(48.0_f64);
        cache.set(3, 80.0);
        assert_eq!(cache.get(3), 80.0);
        assert!(cache.has(3));
        assert_eq!(cache.get(4), 48.0);
    }

    #[test]
    fn zero_height_is_a_real_measurement() {
        let mut cache = HeightCache::new(48.0_f64);
        cache.set(7, 0.0);
        assert!(cache.has(7));
        assert_eq!(cache.get(7), 0.0);
    }

    #[test]
    fn negative_heights_clamp_to_zero() {
        let mut cache = HeightCache::new(-10.0_f64);
        assert_eq!(cache.default_height(), 0.0);
        cache.set(1, 5.0);
        assert_eq!(cache.get(1), 5.0);
    }

    #[test]
    fn clear_discards_measurements_only() {
        let mut cache = HeightCache::new(48.0_f32);
        cache.set(0, 10.0);
        cache.set(1, 20.0);
        cache.clear();
        assert_eq!(cache.measured_count(), 0);
        assert_eq!(cache.get(0), 48.0);
        assert_eq!(cache.default_height(), 48.0);
    }
}
