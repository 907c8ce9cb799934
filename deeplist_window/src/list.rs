// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-list state tying the caches to the windowing pipeline.

use alloc::vec::Vec;

use deeplist_offsets::{HeightCache, OffsetIndex, Scalar};

use crate::{MeasureRows, RenderWindow, RowPlacement, RowRange, RowSource, compute_window};

/// Configuration for one [`DynamicList`] instance.
#[derive(Clone, Copy, Debug)]
pub struct ListConfig<S> {
    /// Height assumed for rows that have not been measured.
    pub default_row_height: S,
    /// Rows kept alive on each side of the visible range.
    pub overscan_count: usize,
    /// Row to position the viewport on when the list first appears.
    pub scroll_to_index: Option<usize>,
}

impl<S: Scalar> ListConfig<S> {
    /// Configuration with the given default row height and two rows of
    /// overscan.
    pub fn new(default_row_height: S) -> Self {
        Self {
            default_row_height,
            overscan_count: 2,
            scroll_to_index: None,
        }
    }

    /// Sets the overscan row count.
    #[must_use]
    pub fn with_overscan(mut self, overscan_count: usize) -> Self {
        self.overscan_count = overscan_count;
        self
    }

    /// Sets the row the viewport starts on.
    #[must_use]
    pub fn with_scroll_to_index(mut self, index: usize) -> Self {
        self.scroll_to_index = Some(index);
        self
    }
}

/// Windowing state for a single list.
///
/// Owns the height cache and offset index for the list and runs
/// [`compute_window`] against them whenever the viewport moves. The host
/// renders exactly the rows of the returned window, positioned by
/// [`placements`](Self::placements), inside a spacer sized by
/// [`total_extent`](Self::total_extent).
#[derive(Clone, Debug)]
pub struct DynamicList<S: Scalar> {
    heights: HeightCache<S>,
    offsets: OffsetIndex<S>,
    item_count: usize,
    overscan_count: usize,
    scroll_to_index: Option<usize>,
    window: RenderWindow,
}

impl<S: Scalar> DynamicList<S> {
    /// Creates a list of `item_count` rows, none of them measured.
    pub fn new(item_count: usize, config: ListConfig<S>) -> Self {
        Self {
            heights: HeightCache::new(config.default_row_height),
            offsets: OffsetIndex::new(config.default_row_height),
            item_count,
            overscan_count: config.overscan_count,
            scroll_to_index: config.scroll_to_index,
            window: RenderWindow::EMPTY,
        }
    }

    /// Number of rows in the list.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Changes the number of rows.
    ///
    /// Shrinking discards all measurements: stored offsets may refer to
    /// rows that no longer exist. Growing keeps them.
    pub fn set_item_count(&mut self, item_count: usize) {
        if item_count < self.item_count {
            self.invalidate();
        }
        self.item_count = item_count;
    }

    /// The measured heights backing this list.
    pub fn heights(&self) -> &HeightCache<S> {
        &self.heights
    }

    /// The offset index backing this list.
    pub fn offsets(&self) -> &OffsetIndex<S> {
        &self.offsets
    }

    /// The window computed by the most recent scroll.
    pub fn window(&self) -> RenderWindow {
        self.window
    }

    /// Total logical extent of the list.
    ///
    /// Exact through the last measured row, extrapolated with the default
    /// height beyond it. Grows toward the true content size as more rows
    /// are measured.
    pub fn total_extent(&self) -> S {
        if self.item_count == 0 {
            S::zero()
        } else {
            self.offsets.offset_end(self.item_count - 1)
        }
    }

    /// The logical top offset of `index` under current knowledge.
    pub fn offset_top_of(&self, index: usize) -> S {
        self.offsets.offset_top(index, self.heights.get(index))
    }

    /// The logical offset the viewport should start at, if configured.
    pub fn initial_scroll_offset(&self) -> Option<S> {
        let index = self.scroll_to_index?;
        if index >= self.item_count {
            return None;
        }
        Some(self.offset_top_of(index))
    }

    /// Recomputes the render window for a new viewport position.
    ///
    /// Rows entering view that are loaded but unmeasured are measured
    /// through `measurer` during the computation.
    pub fn handle_viewport_scrolled<R, M>(
        &mut self,
        source: &R,
        measurer: &mut M,
        viewport_extent: S,
        logical_offset: S,
    ) -> RenderWindow
    where
        R: RowSource + ?Sized,
        M: MeasureRows<S> + ?Sized,
    {
        self.window = compute_window(
            &mut self.offsets,
            &mut self.heights,
            source,
            measurer,
            viewport_extent,
            logical_offset,
            self.item_count,
            self.overscan_count,
        );
        self.window
    }

    /// Logical placements for the rows of `range`.
    pub fn placements(&self, range: RowRange) -> Vec<RowPlacement<S>> {
        range
            .iter()
            .map(|index| {
                let height = self.heights.get(index);
                RowPlacement {
                    index,
                    offset_top: self.offsets.offset_top(index, height),
                    height,
                }
            })
            .collect()
    }

    /// Discards every measurement, keeping configuration and item count.
    ///
    /// Used when the viewport is resized: widths changed, so every cached
    /// height is stale at once.
    pub fn invalidate(&mut self) {
        self.heights.clear();
        self.offsets.clear();
        self.window = RenderWindow::EMPTY;
        #[cfg(feature = "tracing")]
        tracing::debug!(item_count = self.item_count, "invalidated all measurements");
    }
}
