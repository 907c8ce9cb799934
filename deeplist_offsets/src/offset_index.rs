// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cumulative row offsets maintained as contiguous measured groups.

use alloc::vec::Vec;
use core::cmp::Ordering;

use smallvec::SmallVec;

use crate::Scalar;

/// Offsets rewritten in place when a batch is prepended to a group.
///
/// Prepending shifts every stored offset of the adjacent group by the
/// difference between measured and assumed heights. Rewriting an unbounded
/// group would make up-scrolling quadratic, so only this many offsets are
/// kept exact; the rest are dropped back to extrapolation.
const DEFAULT_REWRITE_LIMIT: usize = 50;

/// One row measurement reported back from the host.
///
/// Batches handed to [`OffsetIndex::add_measured_range`] must hold
/// consecutive, ascending indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasuredRow<S> {
    /// Row index the measurement belongs to.
    pub index: usize,
    /// Measured height of the row.
    pub height: S,
}

/// A maximal run of consecutively measured rows.
///
/// `offsets[i]` is the exact end offset of row `start_index + i`. Offsets
/// are non-decreasing within a group and consistent with the groups before
/// it, so a query never observes overlap or backwards motion.
#[derive(Clone, Debug)]
struct OffsetGroup<S> {
    start_index: usize,
    stop_index: usize,
    offsets: Vec<S>,
}

impl<S: Scalar> OffsetGroup<S> {
    fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.stop_index
    }

    fn last_offset(&self) -> S {
        // Groups are never constructed empty.
        self.offsets[self.offsets.len() - 1]
    }
}

/// Cumulative end-offsets for rows of unknown height.
///
/// Measured rows live in contiguous groups; everything outside a
/// group extrapolates from the nearest preceding group (or from offset zero)
/// using the default height. Feeding measurements in with
/// [`add_measured_range`](Self::add_measured_range) grows, shifts, or merges
/// groups so that the exact region tracks wherever the viewport has been.
#[derive(Clone, Debug)]
pub struct OffsetIndex<S: Scalar> {
    groups: SmallVec<[OffsetGroup<S>; 4]>,
    default_height: S,
    rewrite_limit: usize,
}

impl<S: Scalar> OffsetIndex<S> {
    /// Creates an empty index extrapolating with `default_height`.
    ///
    /// Negative defaults are clamped to zero.
    pub fn new(default_height: S) -> Self {
        Self::with_rewrite_limit(default_height, DEFAULT_REWRITE_LIMIT)
    }

    /// Creates an empty index with an explicit prepend rewrite bound.
    ///
    /// `rewrite_limit` is the number of stored offsets a prepend is willing
    /// to shift in the adjacent group; offsets beyond it are dropped back to
    /// extrapolation. Values below one are raised to one.
    pub fn with_rewrite_limit(default_height: S, rewrite_limit: usize) -> Self {
        debug_assert!(
            default_height.is_finite(),
            "default height must be finite, got {default_height:?}"
        );
        Self {
            groups: SmallVec::new(),
            default_height: default_height.clamp_non_negative(),
            rewrite_limit: rewrite_limit.max(1),
        }
    }

    /// The height assumed for rows outside every measured group.
    pub fn default_height(&self) -> S {
        self.default_height
    }

    /// Whether any row has been measured.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of measured groups currently held.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Highest row index covered by a measured group, if any.
    pub fn last_measured_index(&self) -> Option<usize> {
        self.groups.last().map(|group| group.stop_index)
    }

    /// Whether `index` lies inside a measured group.
    pub fn is_measured(&self, index: usize) -> bool {
        self.find_group(index).is_ok()
    }

    /// Discards every group, returning the index to its initial state.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// The end offset of `index`: exact inside a group, extrapolated outside.
    ///
    /// Extrapolation charges one default height per unmeasured row past the
    /// nearest preceding group, or past offset zero when no group precedes.
    pub fn offset_end(&self, index: usize) -> S {
        match self.find_group(index) {
            Ok(group) => {
                let group = &self.groups[group];
                group.offsets[index - group.start_index]
            }
            Err(preceding) => {
                let (base, measured_through) = match preceding {
                    Some(preceding) => {
                        let group = &self.groups[preceding];
                        (group.last_offset(), group.stop_index as isize)
                    }
                    None => (S::zero(), -1),
                };
                let unmeasured = index as isize - measured_through;
                base + S::from_isize(unmeasured) * self.default_height
            }
        }
    }

    /// The top offset of `index` given its current height.
    ///
    /// `height` is whatever the caller's height cache answers for the row,
    /// measured or default, so top and end stay mutually consistent.
    pub fn offset_top(&self, index: usize, height: S) -> S {
        self.offset_end(index) - height
    }

    /// Folds a batch of consecutive measurements into the index.
    ///
    /// Depending on where the batch lands relative to existing groups it is
    /// appended to one, prepended to one (shifting that group's stored
    /// offsets by the measured-minus-assumed delta, up to the rewrite
    /// limit), bridges two into a merge, or starts a new group. Groups after
    /// the touched region extrapolated through rows this batch has now
    /// measured, so they are dropped.
    pub fn add_measured_range(&mut self, rows: &[MeasuredRow<S>]) {
        let Some(first_row) = rows.first() else {
            return;
        };
        debug_assert!(
            rows.windows(2).all(|w| w[1].index == w[0].index + 1),
            "measured batch must hold consecutive ascending indices"
        );
        debug_assert!(
            rows.iter().all(|row| row.height.is_finite()),
            "measured heights must be finite"
        );

        let first = first_row.index;
        let last = rows[rows.len() - 1].index;

        self.trim_overlap(first, last);

        let base = if first == 0 {
            S::zero()
        } else {
            self.offset_end(first - 1)
        };
        let mut running = base;
        let mut height_sum = S::zero();
        let mut ends = Vec::with_capacity(rows.len());
        for row in rows {
            let height = row.height.clamp_non_negative();
            running = running + height;
            height_sum = height_sum + height;
            ends.push(running);
        }

        let preceding = self
            .groups
            .iter()
            .rposition(|group| group.stop_index < first);
        let following = preceding.map_or(0, |p| p + 1);
        let appends = preceding.is_some_and(|p| self.groups[p].stop_index + 1 == first);
        let prepends = self
            .groups
            .get(following)
            .is_some_and(|group| group.start_index == last + 1);

        // Offset delta for an existing group absorbed from the front: its
        // base was `gap * default`, the batch replaces that with exact sums.
        let delta = height_sum - S::from_usize(rows.len()) * self.default_height;

        match (appends, prepends) {
            (true, true) => self.merge(preceding.unwrap_or(0), last, ends, delta),
            (true, false) => self.append(preceding.unwrap_or(0), last, ends),
            (false, true) => self.prepend(following, first, ends, delta),
            (false, false) => self.insert_disconnected(following, first, last, ends),
        }
    }

    /// Drops stored offsets superseded by a batch covering `first..=last`.
    ///
    /// A group reaching into the batch keeps its exact prefix before
    /// `first`; that group's tail and every group after it are dropped.
    fn trim_overlap(&mut self, first: usize, last: usize) {
        let overlapping = self
            .groups
            .iter()
            .position(|group| group.stop_index >= first && group.start_index <= last);
        let Some(overlapping) = overlapping else {
            return;
        };
        if self.groups[overlapping].start_index < first {
            let group = &mut self.groups[overlapping];
            group.offsets.truncate(first - group.start_index);
            group.stop_index = first - 1;
            self.groups.truncate(overlapping + 1);
        } else {
            self.groups.truncate(overlapping);
        }
    }

    fn append(&mut self, group: usize, last: usize, ends: Vec<S>) {
        let target = &mut self.groups[group];
        target.offsets.extend(ends);
        target.stop_index = last;
        self.groups.truncate(group + 1);
    }

    fn prepend(&mut self, group: usize, first: usize, ends: Vec<S>, delta: S) {
        let shifted_first = self.groups[group].offsets[0] + delta;
        let batch_last = ends[ends.len() - 1];
        if shifted_first < batch_last {
            // Shifting would break monotonicity; start over from the batch.
            let last = self.groups[group].start_index - 1;
            self.insert_disconnected(group, first, last, ends);
            return;
        }

        let target = &mut self.groups[group];
        if target.offsets.len() > self.rewrite_limit {
            target.offsets.truncate(self.rewrite_limit);
            target.stop_index = target.start_index + self.rewrite_limit - 1;
        }
        let mut merged = ends;
        merged.extend(target.offsets.iter().map(|offset| *offset + delta));
        target.offsets = merged;
        target.start_index = first;
        self.groups.truncate(group + 1);
    }

    fn merge(&mut self, group: usize, last: usize, ends: Vec<S>, delta: S) {
        let shifted_first = self.groups[group + 1].offsets[0] + delta;
        let batch_last = ends[ends.len() - 1];
        if shifted_first < batch_last {
            let first = self.groups[group].stop_index + 1;
            self.insert_disconnected(group + 1, first, last, ends);
            return;
        }

        let absorbed = self.groups.remove(group + 1);
        let target = &mut self.groups[group];
        target.offsets.extend(ends);
        target
            .offsets
            .extend(absorbed.offsets.iter().map(|offset| *offset + delta));
        target.stop_index = absorbed.stop_index;
        self.groups.truncate(group + 1);
    }

    fn insert_disconnected(&mut self, at: usize, first: usize, last: usize, ends: Vec<S>) {
        self.groups.truncate(at);
        self.groups.push(OffsetGroup {
            start_index: first,
            stop_index: last,
            offsets: ends,
        });
    }

    /// Locates the group containing `index`, or the nearest preceding group.
    fn find_group(&self, index: usize) -> Result<usize, Option<usize>> {
        let found = self.groups.binary_search_by(|group| {
            if group.stop_index < index {
                Ordering::Less
            } else if group.start_index > index {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        match found {
            Ok(group) => Ok(group),
            Err(insertion) => Err(insertion.checked_sub(1)),
        }
    }
}
