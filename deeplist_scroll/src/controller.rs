// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logical scroll position and custom scrollbar geometry.

use deeplist_offsets::Scalar;

use crate::Debounce;

/// What the scroll position is currently responding to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollPhase {
    /// No interaction in progress.
    #[default]
    Idle,
    /// The scrollbar thumb is being dragged.
    Dragging,
    /// Wheel scrolling, waiting for the wheel to settle.
    Scrolling,
    /// A viewport resize burst, waiting for it to settle.
    Resizing,
}

/// Tuning for a [`ScrollController`].
#[derive(Clone, Copy, Debug)]
pub struct ScrollConfig<S> {
    /// Smallest extent the thumb may shrink to on long content.
    pub thumb_min_extent: S,
    /// Logical pixels one wheel row corresponds to at 1:1 speed.
    pub row_unit: S,
    /// Quiet period after the last wheel event before returning to idle.
    pub wheel_settle_ms: u64,
    /// Quiet period a resize burst must hold before invalidation fires.
    pub resize_debounce_ms: u64,
}

impl<S: Scalar> Default for ScrollConfig<S> {
    fn default() -> Self {
        Self {
            thumb_min_extent: S::from_usize(30),
            row_unit: S::from_usize(20),
            wheel_settle_ms: 150,
            resize_debounce_ms: 50,
        }
    }
}

/// The logical viewport position changed.
///
/// Hosts feed this into window computation; it carries everything that
/// computation needs besides the item count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportScrolled<S> {
    /// Current viewport extent.
    pub viewport_extent: S,
    /// Current logical content extent.
    pub content_extent: S,
    /// New logical scroll offset.
    pub logical_offset: S,
}

/// A settled viewport resize.
///
/// Every cached row measurement was taken at the old viewport extent and
/// is now stale; the host must clear its height and offset caches and
/// recompute the window at the preserved logical offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeInvalidation<S> {
    /// The settled viewport extent.
    pub viewport_extent: S,
    /// The logical offset, preserved across the resize.
    pub logical_offset: S,
}

/// Owns the logical scroll offset of one virtualized list.
///
/// The native scroll machinery never sees the extrapolated content, so
/// wheel deltas, thumb drags, and track clicks are all mapped onto the
/// logical offset here, and the scrollbar is drawn from
/// [`thumb_extent`](Self::thumb_extent) and
/// [`thumb_position`](Self::thumb_position).
///
/// All timestamps are caller-supplied milliseconds. Hosts call
/// [`poll`](Self::poll) from their frame tick to let wheel settling and
/// debounced resizes complete.
#[derive(Clone, Debug)]
pub struct ScrollController<S: Scalar> {
    config: ScrollConfig<S>,
    viewport_extent: S,
    track_extent: S,
    content_extent: S,
    logical_offset: S,
    real_scroll_top: S,
    phase: ScrollPhase,
    wheel_settle: Debounce<()>,
    resize_settle: Debounce<S>,
}

impl<S: Scalar> ScrollController<S> {
    /// Creates an idle controller with no content.
    pub fn new(viewport_extent: S, track_extent: S, config: ScrollConfig<S>) -> Self {
        debug_assert!(
            viewport_extent.is_finite() && track_extent.is_finite(),
            "controller extents must be finite"
        );
        Self {
            viewport_extent: viewport_extent.clamp_non_negative(),
            track_extent: track_extent.clamp_non_negative(),
            content_extent: S::zero(),
            logical_offset: S::zero(),
            real_scroll_top: S::zero(),
            phase: ScrollPhase::Idle,
            wheel_settle: Debounce::new(config.wheel_settle_ms),
            resize_settle: Debounce::new(config.resize_debounce_ms),
            config,
        }
    }

    /// The current interaction phase.
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// The current logical scroll offset.
    pub fn logical_offset(&self) -> S {
        self.logical_offset
    }

    /// The current viewport extent.
    pub fn viewport_extent(&self) -> S {
        self.viewport_extent
    }

    /// The logical content extent last reported by the list.
    pub fn content_extent(&self) -> S {
        self.content_extent
    }

    /// The extent of the scrollbar track.
    pub fn track_extent(&self) -> S {
        self.track_extent
    }

    /// Largest reachable logical offset.
    pub fn max_logical_offset(&self) -> S {
        (self.content_extent - self.viewport_extent).clamp_non_negative()
    }

    /// Whether the content overflows the viewport at all.
    pub fn has_overflow(&self) -> bool {
        self.content_extent > self.viewport_extent
    }

    /// Logical pixels one wheel row moves the viewport.
    ///
    /// Scaled down as content grows, so a notch traverses a constant
    /// fraction of very long lists instead of a fixed pixel distance.
    pub fn scroll_speed(&self) -> S {
        if self.content_extent <= S::zero() {
            S::zero()
        } else {
            self.viewport_extent / self.content_extent * self.config.row_unit
        }
    }

    /// Updates the logical content extent after the list re-extrapolated.
    ///
    /// If the content shrank below the current offset the offset is
    /// clamped and the resulting scroll change is returned.
    pub fn set_logical_content_extent(&mut self, content_extent: S) -> Option<ViewportScrolled<S>> {
        debug_assert!(
            content_extent.is_finite(),
            "content extent must be finite, got {content_extent:?}"
        );
        if !content_extent.is_finite() {
            return None;
        }
        self.content_extent = content_extent.clamp_non_negative();
        if self.set_logical_offset(self.logical_offset) {
            Some(self.scrolled_event())
        } else {
            None
        }
    }

    /// Updates the scrollbar track extent.
    pub fn set_track_extent(&mut self, track_extent: S) {
        debug_assert!(
            track_extent.is_finite(),
            "track extent must be finite, got {track_extent:?}"
        );
        if track_extent.is_finite() {
            self.track_extent = track_extent.clamp_non_negative();
        }
    }

    /// Applies a wheel delta measured in rows.
    pub fn on_wheel(&mut self, delta_rows: S, now_ms: u64) -> Option<ViewportScrolled<S>> {
        debug_assert!(
            delta_rows.is_finite(),
            "wheel delta must be finite, got {delta_rows:?}"
        );
        if !delta_rows.is_finite() || !self.has_overflow() {
            return None;
        }
        self.phase = ScrollPhase::Scrolling;
        self.wheel_settle.arm((), now_ms);
        let target = self.logical_offset + delta_rows * self.scroll_speed();
        self.set_logical_offset(target).then(|| self.scrolled_event())
    }

    /// Applies a native scroll position from the wheel proxy element.
    ///
    /// The proxy is a small real scrollable that exists only to receive
    /// wheel momentum; successive positions are differenced and the delta
    /// forwarded as wheel rows. The absolute position carries no meaning.
    pub fn on_native_scroll(&mut self, real_top: S, now_ms: u64) -> Option<ViewportScrolled<S>> {
        debug_assert!(
            real_top.is_finite(),
            "native scroll position must be finite, got {real_top:?}"
        );
        if !real_top.is_finite() {
            return None;
        }
        let delta = real_top - self.real_scroll_top;
        self.real_scroll_top = real_top;
        self.on_wheel(delta / self.config.row_unit, now_ms)
    }

    /// Scrolls to an absolute logical offset, clamped to the content.
    pub fn scroll_to(&mut self, logical_offset: S) -> Option<ViewportScrolled<S>> {
        debug_assert!(
            logical_offset.is_finite(),
            "scroll target must be finite, got {logical_offset:?}"
        );
        if !logical_offset.is_finite() {
            return None;
        }
        self.set_logical_offset(logical_offset)
            .then(|| self.scrolled_event())
    }

    /// Enters the thumb drag phase if there is anything to drag.
    pub fn begin_thumb_drag(&mut self) {
        if self.has_overflow() {
            self.phase = ScrollPhase::Dragging;
        }
    }

    /// Moves the thumb's top edge to `track_position`.
    pub fn on_thumb_drag(&mut self, track_position: S) -> Option<ViewportScrolled<S>> {
        debug_assert!(
            track_position.is_finite(),
            "thumb position must be finite, got {track_position:?}"
        );
        if !track_position.is_finite() || !self.has_overflow() {
            return None;
        }
        self.phase = ScrollPhase::Dragging;
        let target = self.offset_for_thumb_position(track_position);
        self.set_logical_offset(target).then(|| self.scrolled_event())
    }

    /// Leaves the thumb drag phase.
    pub fn end_thumb_drag(&mut self) {
        if self.phase == ScrollPhase::Dragging {
            self.phase = ScrollPhase::Idle;
        }
    }

    /// Jumps so the thumb centers on a click at `track_position`.
    pub fn on_track_click(&mut self, track_position: S) -> Option<ViewportScrolled<S>> {
        debug_assert!(
            track_position.is_finite(),
            "track position must be finite, got {track_position:?}"
        );
        if !track_position.is_finite() || !self.has_overflow() {
            return None;
        }
        let half_thumb = self.thumb_extent() / S::from_usize(2);
        let target = self.offset_for_thumb_position(track_position - half_thumb);
        self.set_logical_offset(target).then(|| self.scrolled_event())
    }

    /// Reports a new viewport extent.
    ///
    /// Resize events arrive in bursts while the user drags a window edge;
    /// each call re-arms the debounce with the latest extent. Nothing is
    /// applied until [`poll`](Self::poll) observes the burst settling.
    pub fn on_viewport_resize(&mut self, viewport_extent: S, now_ms: u64) {
        debug_assert!(
            viewport_extent.is_finite(),
            "viewport extent must be finite, got {viewport_extent:?}"
        );
        if !viewport_extent.is_finite() {
            return;
        }
        self.phase = ScrollPhase::Resizing;
        self.wheel_settle.cancel();
        self.resize_settle
            .arm(viewport_extent.clamp_non_negative(), now_ms);
    }

    /// Advances time-driven state.
    ///
    /// Returns a [`ResizeInvalidation`] when a resize burst has settled:
    /// the new viewport extent is applied here, and the host must clear
    /// its measurement caches before the next window computation. Wheel
    /// settling back to idle is handled here as well.
    pub fn poll(&mut self, now_ms: u64) -> Option<ResizeInvalidation<S>> {
        if let Some(viewport_extent) = self.resize_settle.poll(now_ms) {
            self.viewport_extent = viewport_extent;
            self.set_logical_offset(self.logical_offset);
            self.phase = ScrollPhase::Idle;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                viewport_extent = ?viewport_extent,
                logical_offset = ?self.logical_offset,
                "viewport resize settled, measurements invalidated"
            );
            return Some(ResizeInvalidation {
                viewport_extent,
                logical_offset: self.logical_offset,
            });
        }
        if self.wheel_settle.poll(now_ms).is_some() && self.phase == ScrollPhase::Scrolling {
            self.phase = ScrollPhase::Idle;
        }
        None
    }

    /// Extent of the scrollbar thumb.
    ///
    /// Proportional to the visible fraction of the content, never below
    /// the configured minimum, and filling the whole track when the
    /// content does not overflow.
    pub fn thumb_extent(&self) -> S {
        if !self.has_overflow() || self.track_extent <= S::zero() {
            return self.track_extent;
        }
        let raw = (self.viewport_extent / self.content_extent * self.track_extent)
            .ceil_non_negative();
        raw.max(self.config.thumb_min_extent).min(self.track_extent)
    }

    /// Position of the thumb's top edge within the track.
    pub fn thumb_position(&self) -> S {
        let range = self.max_logical_offset();
        let span = self.track_extent - self.thumb_extent();
        if range <= S::zero() || span <= S::zero() {
            return S::zero();
        }
        (self.logical_offset / range * span)
            .max(S::zero())
            .min(span)
    }

    fn offset_for_thumb_position(&self, track_position: S) -> S {
        let span = self.track_extent - self.thumb_extent();
        if span <= S::zero() {
            return S::zero();
        }
        track_position / span * self.max_logical_offset()
    }

    /// Clamps and stores `target`, reporting whether the offset moved.
    fn set_logical_offset(&mut self, target: S) -> bool {
        let clamped = target.clamp_non_negative().min(self.max_logical_offset());
        let changed = clamped != self.logical_offset;
        self.logical_offset = clamped;
        changed
    }

    fn scrolled_event(&self) -> ViewportScrolled<S> {
        ViewportScrolled {
            viewport_extent: self.viewport_extent,
            content_extent: self.content_extent,
            logical_offset: self.logical_offset,
        }
    }
}
