// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deeplist Window: render-window computation for unbounded lists.
//!
//! Given a logical scroll offset and a viewport extent, this crate decides
//! which rows of a list must exist as real UI nodes. Row heights are
//! unknown until a row is rendered, so the window is computed against the
//! sparse caches from [`deeplist_offsets`], and rows are measured lazily
//! exactly when they are about to enter view.
//!
//! - [`RowSource`] and [`MeasureRows`]: the two host collaborators, one
//!   reporting whether a row's content is available and one performing a
//!   synchronous render-and-measure of a single row.
//! - [`compute_window`]: binary-searches the first visible row, walks
//!   forward accumulating heights until the viewport is filled, and pads
//!   with overscan.
//! - [`DynamicList`]: owns the caches and configuration for one list
//!   instance and exposes the scroll-to-window pipeline as methods.
//!
//! ## Minimal example
//!
//! ```rust
//! use deeplist_window::{DynamicList, ListConfig, MeasureRows, RowSource};
//!
//! struct Loaded;
//! impl RowSource for Loaded {
//!     fn is_loaded(&self, _index: usize) -> bool {
//!         true
//!     }
//! }
//!
//! struct FixedMeasure(f64);
//! impl MeasureRows<f64> for FixedMeasure {
//!     fn measure(&mut self, _index: usize) -> f64 {
//!         self.0
//!     }
//! }
//!
//! let mut list = DynamicList::new(1_000, ListConfig::new(100.0_f64));
//! let window = list.handle_viewport_scrolled(&Loaded, &mut FixedMeasure(80.0), 400.0, 5_000.0);
//! assert_eq!(window.visible.start, 50);
//! assert!(window.visible.len() >= 5);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod list;
mod source;
mod window;

pub use deeplist_offsets::{HeightCache, MeasuredRow, OffsetIndex, Scalar};
pub use list::{DynamicList, ListConfig};
pub use source::{MeasureRows, RowSource};
pub use window::{RenderWindow, RowPlacement, RowRange, compute_window};
