//! The render surface boundary.

use crate::geometry::Size;
use crate::layout::model::Layout;

/// Something that can display a finished layout.
///
/// A surface only ever sees complete snapshots; it never observes a layout
/// while it is being produced. Errors are handed back to the caller of
/// [`RichTextView::sync`](crate::render::bridge::RichTextView::sync) as-is.
pub trait RenderSurface {
    type Error;

    /// Display `layout` inside a viewport of `viewport` pixels.
    fn present(&mut self, viewport: Size, layout: &Layout) -> Result<(), Self::Error>;
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    type Error = S::Error;

    fn present(&mut self, viewport: Size, layout: &Layout) -> Result<(), Self::Error> {
        (**self).present(viewport, layout)
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    type Error = S::Error;

    fn present(&mut self, viewport: Size, layout: &Layout) -> Result<(), Self::Error> {
        (**self).present(viewport, layout)
    }
}
