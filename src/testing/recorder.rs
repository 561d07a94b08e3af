//! A render surface that records what it was asked to present.

use crate::geometry::Size;
use crate::layout::model::Layout;
use crate::render::surface::RenderSurface;

/// Error returned by a [`RecordingSurface`] set to fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("recording surface rejected present #{attempt}")]
pub struct RecordingError {
    pub attempt: usize,
}

/// One recorded call to [`RenderSurface::present`].
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub viewport: Size,
    pub layout: Layout,
}

/// Headless surface for tests: stores every presented layout.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    presentations: Vec<Presentation>,
    attempts: usize,
    failing: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that rejects every present.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn presentations(&self) -> &[Presentation] {
        &self.presentations
    }

    pub fn last(&self) -> Option<&Presentation> {
        self.presentations.last()
    }

    /// Number of present calls, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl RenderSurface for RecordingSurface {
    type Error = RecordingError;

    fn present(&mut self, viewport: Size, layout: &Layout) -> Result<(), RecordingError> {
        self.attempts += 1;
        if self.failing {
            return Err(RecordingError {
                attempt: self.attempts,
            });
        }
        self.presentations.push(Presentation {
            viewport,
            layout: layout.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_layout() -> Layout {
        Layout {
            content_width: 100.0,
            blocks: Vec::new(),
            height: 0.0,
        }
    }

    #[test]
    fn records_presentations() {
        let mut surface = RecordingSurface::new();
        surface.present(Size::new(10.0, 10.0), &empty_layout()).unwrap();
        assert_eq!(surface.presentations().len(), 1);
        assert_eq!(surface.last().unwrap().viewport, Size::new(10.0, 10.0));
        assert_eq!(surface.attempts(), 1);
    }

    #[test]
    fn failing_surface_records_nothing() {
        let mut surface = RecordingSurface::failing();
        let err = surface.present(Size::ZERO, &empty_layout()).unwrap_err();
        assert_eq!(err, RecordingError { attempt: 1 });
        assert!(surface.presentations().is_empty());
        assert_eq!(err.to_string(), "recording surface rejected present #1");
    }
}
