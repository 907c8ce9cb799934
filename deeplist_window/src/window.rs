// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window computation over partially measured rows.

use alloc::vec::Vec;

use deeplist_offsets::{HeightCache, MeasuredRow, OffsetIndex, Scalar};

use crate::{MeasureRows, RowSource};

/// A half-open range of row indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RowRange {
    /// First row in the range.
    pub start: usize,
    /// One past the last row in the range.
    pub end: usize,
}

impl RowRange {
    /// An empty range at row zero.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Number of rows in the range.
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range contains no rows.
    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Whether `index` lies within the range.
    pub fn contains(self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// The range as an iterable `Range<usize>`.
    pub fn iter(self) -> core::ops::Range<usize> {
        self.start..self.end
    }
}

/// The set of rows that must exist as real UI nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderWindow {
    /// Rows intersecting the viewport.
    pub visible: RowRange,
    /// Visible rows padded on both sides, clamped to the item count.
    pub overscan: RowRange,
}

impl RenderWindow {
    /// The window of an empty list.
    pub const EMPTY: Self = Self {
        visible: RowRange::EMPTY,
        overscan: RowRange::EMPTY,
    };

    /// Whether no rows need to exist.
    pub fn is_empty(self) -> bool {
        self.overscan.is_empty()
    }
}

/// Where a row sits in logical scroll space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowPlacement<S> {
    /// Row index.
    pub index: usize,
    /// Logical offset of the row's top edge.
    pub offset_top: S,
    /// Current height of the row, measured or default.
    pub height: S,
}

struct StartRow<S> {
    index: usize,
    offset_top: S,
    height: S,
}

/// Computes the render window for a viewport position.
///
/// Binary-searches the first row whose top edge is at or above
/// `logical_offset`, then walks forward accumulating row heights until the
/// viewport extent is covered or the list ends. Rows about to enter view
/// that are loaded but unmeasured are measured on the spot, so the window
/// anchors on exact offsets wherever it actually lands.
///
/// An empty list yields [`RenderWindow::EMPTY`] without touching the
/// measurement collaborator.
pub fn compute_window<S, R, M>(
    offsets: &mut OffsetIndex<S>,
    heights: &mut HeightCache<S>,
    source: &R,
    measurer: &mut M,
    viewport_extent: S,
    logical_offset: S,
    item_count: usize,
    overscan_count: usize,
) -> RenderWindow
where
    S: Scalar,
    R: RowSource + ?Sized,
    M: MeasureRows<S> + ?Sized,
{
    if item_count == 0 {
        return RenderWindow::EMPTY;
    }
    debug_assert!(
        logical_offset.is_finite(),
        "logical offset must be finite, got {logical_offset:?}"
    );
    debug_assert!(
        viewport_extent.is_finite(),
        "viewport extent must be finite, got {viewport_extent:?}"
    );
    let logical_offset = logical_offset.clamp_non_negative();
    let viewport_extent = viewport_extent.clamp_non_negative();

    let start = find_start_row(
        offsets,
        heights,
        source,
        measurer,
        logical_offset,
        item_count,
    );

    let max_offset = logical_offset + viewport_extent;
    let mut stop = start.index;
    let mut filled = start.offset_top + start.height;
    while stop + 1 < item_count && filled < max_offset {
        stop += 1;
        measure_rows(offsets, heights, source, measurer, stop, stop);
        filled = filled + heights.get(stop);
    }

    let visible = RowRange {
        start: start.index,
        end: stop + 1,
    };
    let overscan = RowRange {
        start: visible.start.saturating_sub(overscan_count),
        end: (visible.end + overscan_count).min(item_count),
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        start = visible.start,
        end = visible.end,
        overscan_start = overscan.start,
        overscan_end = overscan.end,
        "computed render window"
    );

    RenderWindow { visible, overscan }
}

/// Finds the row containing `logical_offset` under partial information.
///
/// Probes extrapolated top offsets; a probe landing exactly on the offset
/// is the window start, so its height is measured immediately and the
/// result recomputed from exact data. Otherwise the search converges on
/// the last row whose top is at or above the offset.
fn find_start_row<S, R, M>(
    offsets: &mut OffsetIndex<S>,
    heights: &mut HeightCache<S>,
    source: &R,
    measurer: &mut M,
    logical_offset: S,
    item_count: usize,
) -> StartRow<S>
where
    S: Scalar,
    R: RowSource + ?Sized,
    M: MeasureRows<S> + ?Sized,
{
    let mut low = 0;
    let mut high = item_count;
    while low < high {
        let mid = low + (high - low) / 2;
        let top = offsets.offset_top(mid, heights.get(mid));
        if top == logical_offset {
            measure_rows(offsets, heights, source, measurer, mid, mid);
            let height = heights.get(mid);
            return StartRow {
                index: mid,
                offset_top: offsets.offset_top(mid, height),
                height,
            };
        } else if top < logical_offset {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    let index = low.saturating_sub(1).min(item_count - 1);
    measure_rows(offsets, heights, source, measurer, index, index);
    let height = heights.get(index);
    StartRow {
        index,
        offset_top: offsets.offset_top(index, height),
        height,
    }
}

/// Measures loaded, unmeasured rows in `first..=last`.
///
/// Eligible rows are measured synchronously and folded into the offset
/// index in contiguous batches. Unloaded rows and rows that already have
/// an exact height split the batch and keep their current values.
fn measure_rows<S, R, M>(
    offsets: &mut OffsetIndex<S>,
    heights: &mut HeightCache<S>,
    source: &R,
    measurer: &mut M,
    first: usize,
    last: usize,
) where
    S: Scalar,
    R: RowSource + ?Sized,
    M: MeasureRows<S> + ?Sized,
{
    let mut batch: Vec<MeasuredRow<S>> = Vec::new();
    #[cfg(feature = "tracing")]
    let mut measured_count = 0_usize;
    for index in first..=last {
        if source.is_loaded(index) && !heights.has(index) {
            let measured = measurer.measure(index);
            heights.set(index, measured);
            batch.push(MeasuredRow {
                index,
                // Read back so clamping applies to both caches alike.
                height: heights.get(index),
            });
            #[cfg(feature = "tracing")]
            {
                measured_count += 1;
            }
        } else if !batch.is_empty() {
            offsets.add_measured_range(&batch);
            batch.clear();
        }
    }
    if !batch.is_empty() {
        offsets.add_measured_range(&batch);
    }

    #[cfg(feature = "tracing")]
    if measured_count > 0 {
        tracing::debug!(first, last, measured_count, "measured rows entering view");
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;

    struct AllLoaded;

    impl RowSource for AllLoaded {
        fn is_loaded(&self, _index: usize) -> bool {
            true
        }
    }

    struct EvenLoaded;

    impl RowSource for EvenLoaded {
        fn is_loaded(&self, index: usize) -> bool {
            index % 2 == 0
        }
    }

    struct FixedMeasure {
        height: f64,
        calls: RefCell<Vec<usize>>,
    }

    impl FixedMeasure {
        fn new(height: f64) -> Self {
            Self {
                height,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl MeasureRows<f64> for FixedMeasure {
        fn measure(&mut self, index: usize) -> f64 {
            self.calls.borrow_mut().push(index);
            self.height
        }
    }

    #[test]
    fn empty_list_yields_empty_window() {
        let mut offsets = OffsetIndex::new(100.0);
        let mut heights = HeightCache::new(100.0);
        let mut measure = FixedMeasure::new(80.0);
        let window = compute_window(
            &mut offsets,
            &mut heights,
            &AllLoaded,
            &mut measure,
            400.0,
            0.0,
            0,
            3,
        );
        assert_eq!(window, RenderWindow::EMPTY);
        assert!(measure.calls.borrow().is_empty());
    }

    #[test]
    fn window_anchors_on_measured_start_row() {
        let mut offsets = OffsetIndex::new(100.0);
        let mut heights = HeightCache::new(100.0);
        let mut measure = FixedMeasure::new(80.0);
        let window = compute_window(
            &mut offsets,
            &mut heights,
            &AllLoaded,
            &mut measure,
            400.0,
            5_000.0,
            1_000,
            0,
        );
        // Extrapolation puts row 50 at offset 5000; measuring it at 80
        // keeps its top anchored on the preceding extrapolated rows.
        assert_eq!(window.visible, RowRange { start: 50, end: 55 });
        assert_eq!(offsets.offset_top(50, heights.get(50)), 5_000.0);
        assert_eq!(heights.get(50), 80.0);
    }

    #[test]
    fn recomputing_at_same_offset_is_stable() {
        let mut offsets = OffsetIndex::new(100.0);
        let mut heights = HeightCache::new(100.0);
        let mut measure = FixedMeasure::new(80.0);
        let first = compute_window(
            &mut offsets,
            &mut heights,
            &AllLoaded,
            &mut measure,
            400.0,
            5_000.0,
            1_000,
            0,
        );
        let calls_after_first = measure.calls.borrow().len();
        let second = compute_window(
            &mut offsets,
            &mut heights,
            &AllLoaded,
            &mut measure,
            400.0,
            5_000.0,
            1_000,
            0,
        );
        assert_eq!(first, second);
        // Every row in the window is already measured; no extra calls.
        assert_eq!(measure.calls.borrow().len(), calls_after_first);
    }

    #[test]
    fn unloaded_rows_are_never_measured() {
        let mut offsets = OffsetIndex::new(100.0);
        let mut heights = HeightCache::new(100.0);
        let mut measure = FixedMeasure::new(50.0);
        let window = compute_window(
            &mut offsets,
            &mut heights,
            &EvenLoaded,
            &mut measure,
            300.0,
            0.0,
            20,
            0,
        );
        assert_eq!(window.visible.start, 0);
        assert!(measure.calls.borrow().iter().all(|index| index % 2 == 0));
        // Odd rows keep the default height.
        assert!(!heights.has(1));
        assert_eq!(heights.get(1), 100.0);
    }

    #[test]
    fn overscan_clamps_to_list_bounds() {
        let mut offsets = OffsetIndex::new(100.0);
        let mut heights = HeightCache::new(100.0);
        let mut measure = FixedMeasure::new(100.0);
        let window = compute_window(
            &mut offsets,
            &mut heights,
            &AllLoaded,
            &mut measure,
            250.0,
            0.0,
            10,
            4,
        );
        assert_eq!(window.visible, RowRange { start: 0, end: 3 });
        assert_eq!(window.overscan, RowRange { start: 0, end: 7 });

        let tail = compute_window(
            &mut offsets,
            &mut heights,
            &AllLoaded,
            &mut measure,
            250.0,
            900.0,
            10,
            4,
        );
        assert_eq!(tail.visible.end, 10);
        assert_eq!(tail.overscan.end, 10);
    }

    #[test]
    fn single_tall_row_fills_the_viewport() {
        let mut offsets = OffsetIndex::new(100.0);
        let mut heights = HeightCache::new(100.0);
        let mut measure = FixedMeasure::new(1_000.0);
        let window = compute_window(
            &mut offsets,
            &mut heights,
            &AllLoaded,
            &mut measure,
            400.0,
            0.0,
            10,
            0,
        );
        assert_eq!(window.visible, RowRange { start: 0, end: 1 });
    }

    #[test]
    fn zero_height_rows_do_not_stall_the_walk() {
        let mut offsets = OffsetIndex::new(100.0);
        let mut heights = HeightCache::new(100.0);
        let mut measure = FixedMeasure::new(0.0);
        let window = compute_window(
            &mut offsets,
            &mut heights,
            &AllLoaded,
            &mut measure,
            400.0,
            0.0,
            5,
            0,
        );
        // Every row measures zero; the walk ends at the list instead.
        assert_eq!(window.visible, RowRange { start: 0, end: 5 });
    }

    #[test]
    fn offset_past_content_clamps_to_last_row() {
        let mut offsets = OffsetIndex::new(100.0);
        let mut heights = HeightCache::new(100.0);
        let mut measure = FixedMeasure::new(100.0);
        let window = compute_window(
            &mut offsets,
            &mut heights,
            &AllLoaded,
            &mut measure,
            400.0,
            1_000_000.0,
            10,
            0,
        );
        assert_eq!(window.visible, RowRange { start: 9, end: 10 });
    }
}
