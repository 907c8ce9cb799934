// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deeplist Scroll: logical scroll state for virtualized lists.
//!
//! A list whose total extent is extrapolated cannot hand scrolling to the
//! platform: the native scroll element would need the real content laid
//! out. This crate keeps the scroll position as a *logical* offset into
//! the extrapolated space and derives everything the host needs to draw a
//! custom scrollbar over it:
//!
//! - [`ScrollController`]: owns the logical offset, maps wheel deltas,
//!   thumb drags, and track clicks onto it, and reports each change as a
//!   [`ViewportScrolled`] value for the host to feed into window
//!   computation.
//! - [`Debounce`]: a timestamp-driven trailing-edge debouncer used for
//!   wheel settling and resize invalidation. No clock is read; hosts pass
//!   timestamps in milliseconds, which also makes time trivial to control
//!   in tests.
//!
//! Viewport resizes invalidate every cached row measurement at once, so
//! they are debounced: the controller coalesces a resize burst and, once
//! quiet, emits a single [`ResizeInvalidation`] telling the host to clear
//! its caches while the logical offset is preserved.
//!
//! ## Minimal example
//!
//! ```rust
//! use deeplist_scroll::{ScrollConfig, ScrollController};
//!
//! let mut scroll = ScrollController::new(200.0_f64, 200.0, ScrollConfig::default());
//! scroll.set_logical_content_extent(1_000.0);
//!
//! // One wheel notch moves by viewport/content * row_unit.
//! let event = scroll.on_wheel(1.0, 0).unwrap();
//! assert_eq!(event.logical_offset, 4.0);
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod controller;
mod debounce;

pub use controller::{
    ResizeInvalidation, ScrollConfig, ScrollController, ScrollPhase, ViewportScrolled,
};
pub use debounce::Debounce;
