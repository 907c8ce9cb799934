// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset monotonicity under arbitrary measurement batches.

use deeplist_offsets::{HeightCache, MeasuredRow, OffsetIndex};
use proptest::prelude::*;

const DEFAULT_HEIGHT: f64 = 100.0;
const INDEX_SPAN: usize = 400;

fn batches() -> impl Strategy<Value = Vec<(usize, Vec<f64>)>> {
    prop::collection::vec(
        (
            0..INDEX_SPAN,
            prop::collection::vec(0.0_f64..300.0, 1..=16),
        ),
        1..=12,
    )
}

proptest! {
    /// End offsets never decrease, no matter how measurements arrive.
    #[test]
    fn offset_ends_are_non_decreasing(batches in batches()) {
        let mut index = OffsetIndex::new(DEFAULT_HEIGHT);
        for (first, heights) in &batches {
            let rows: Vec<_> = heights
                .iter()
                .enumerate()
                .map(|(i, height)| MeasuredRow { index: first + i, height: *height })
                .collect();
            index.add_measured_range(&rows);
        }

        let mut previous = 0.0;
        for i in 0..INDEX_SPAN + 32 {
            let end = index.offset_end(i);
            prop_assert!(end.is_finite(), "offset_end({}) is not finite", i);
            prop_assert!(
                end >= previous,
                "offset_end({}) = {} dropped below {}",
                i,
                end,
                previous
            );
            previous = end;
        }
    }

    /// Top and end of a row always differ by exactly the row's height.
    #[test]
    fn offset_top_tracks_height(batches in batches()) {
        let mut index = OffsetIndex::new(DEFAULT_HEIGHT);
        let mut heights = HeightCache::new(DEFAULT_HEIGHT);
        for (first, measured) in &batches {
            let rows: Vec<_> = measured
                .iter()
                .enumerate()
                .map(|(i, height)| MeasuredRow { index: first + i, height: *height })
                .collect();
            for row in &rows {
                heights.set(row.index, row.height);
            }
            index.add_measured_range(&rows);
        }

        for i in 0..INDEX_SPAN + 32 {
            let height = heights.get(i);
            let top = index.offset_top(i, height);
            // Subtracting the top back out can be off by an ulp of the
            // end offset, so compare with a tolerance.
            prop_assert!(
                (index.offset_end(i) - top - height).abs() < 1e-9,
                "row {}: end {} minus top {} does not give height {}",
                i,
                index.offset_end(i),
                top,
                height
            );
        }
    }

    /// Scrolling down measures strictly adjacent batches; the measured
    /// region must stay a single group with exact cumulative offsets.
    #[test]
    fn adjacent_appends_keep_one_group(heights in prop::collection::vec(1.0_f64..200.0, 1..=64)) {
        let mut index = OffsetIndex::new(DEFAULT_HEIGHT);
        for (i, height) in heights.iter().enumerate() {
            index.add_measured_range(&[MeasuredRow { index: i, height: *height }]);
            prop_assert_eq!(index.group_count(), 1);
        }
        let total: f64 = heights.iter().sum();
        prop_assert!((index.offset_end(heights.len() - 1) - total).abs() < 1e-9);
    }
}
