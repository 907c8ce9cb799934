// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deeplist Offsets: height and offset bookkeeping for unbounded lists.
//!
//! This crate provides the data-structure half of a 1D virtualization engine
//! for lists whose rows have unknown, variable heights that can only be
//! discovered by rendering them:
//!
//! - [`Scalar`]: a small abstraction over `f32`/`f64` used for heights,
//!   offsets, and scroll positions.
//! - [`HeightCache`]: a sparse store of measured row heights with a
//!   default-height fallback for rows that have not been measured yet.
//! - [`OffsetIndex`]: cumulative end-offsets maintained as contiguous
//!   "measured groups", refined incrementally as measurements arrive and
//!   extrapolated with the default height everywhere else.
//!
//! The two caches are deliberately separate: [`HeightCache`] answers "how
//! tall is row `i`" and [`OffsetIndex`] answers "where does row `i` end",
//! and only the measurement feedback path mutates either. Host code owns
//! one pair per list instance and clears both wholesale when a viewport
//! resize invalidates every measurement.
//!
//! ## Minimal example
//!
//! ```rust
//! use deeplist_offsets::{HeightCache, MeasuredRow, OffsetIndex};
//!
//! let mut heights = HeightCache::new(100.0_f64);
//! let mut offsets = OffsetIndex::new(100.0_f64);
//!
//! // Nothing measured yet: everything extrapolates from the default.
//! assert_eq!(offsets.offset_end(9), 1_000.0);
//!
//! // Measurement reports rows 0..=1 as shorter than assumed.
//! heights.set(0, 40.0);
//! heights.set(1, 40.0);
//! offsets.add_measured_range(&[
//!     MeasuredRow { index: 0, height: 40.0 },
//!     MeasuredRow { index: 1, height: 40.0 },
//! ]);
//!
//! // Measured rows answer exactly; later rows extrapolate from them.
//! assert_eq!(offsets.offset_end(1), 80.0);
//! assert_eq!(offsets.offset_end(3), 280.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod height_cache;
mod offset_index;
mod scalar;

pub use height_cache::HeightCache;
pub use offset_index::{MeasuredRow, OffsetIndex};
pub use scalar::Scalar;
