// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborators the windowing engine calls back into.

use deeplist_offsets::Scalar;

/// Reports whether a row's content is available to render.
///
/// Rows whose data has not arrived yet (for example a page still in
/// flight) cannot be measured; the engine keeps using the default height
/// for them and never calls [`MeasureRows::measure`] on them.
pub trait RowSource {
    /// Whether the content of `index` is available.
    fn is_loaded(&self, index: usize) -> bool;
}

/// Synchronously renders a row off-screen and reports its extent.
///
/// Called only for loaded rows that are about to enter the viewport and
/// have no exact measurement yet. Implementations are expected to be
/// expensive; the engine batches and minimizes calls accordingly.
pub trait MeasureRows<S: Scalar> {
    /// Measures the rendered extent of `index`.
    fn measure(&mut self, index: usize) -> S;
}

impl<T: RowSource + ?Sized> RowSource for &T {
    fn is_loaded(&self, index: usize) -> bool {
        (**self).is_loaded(index)
    }
}

impl<S: Scalar, T: MeasureRows<S> + ?Sized> MeasureRows<S> for &mut T {
    fn measure(&mut self, index: usize) -> S {
        (**self).measure(index)
    }
}
