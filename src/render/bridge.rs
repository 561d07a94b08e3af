//! Asynchronous build / sync handoff between a document and a render surface.
//!
//! A [`RichTextView`] owns a layout engine and a surface. `build` snapshots
//! the frame and lays it out on the tokio blocking pool; the caller awaits
//! the result on its own task and records it with `apply` (or lets
//! `build_with` do that). `sync` pushes whatever snapshot was last recorded.
//!
//! Every build is stamped with a generation. Recording keeps the newest
//! generation, so a slow old build finishing late never replaces a newer one.

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::config::ViewConfig;
use crate::document::frame::Frame;
use crate::layout::engine::{LayoutEngine, LayoutError};
use crate::layout::measure::TextMeasure;
use crate::layout::model::Layout;

use super::surface::RenderSurface;

/// Errors from a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("layout worker failed: {0}")]
    Worker(#[from] JoinError),
}

/// A finished layout stamped with the generation of the build that made it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltLayout {
    pub generation: u64,
    pub layout: Arc<Layout>,
}

/// Whether a view has a layout to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    Unbuilt,
    Built { generation: u64 },
}

/// Result of a [`RichTextView::sync`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The recorded layout was handed to the surface.
    Presented { generation: u64 },
    /// No build has been recorded yet; nothing was pushed.
    NothingBuilt,
}

/// A rich-text view: layout engine, recorded layout and render surface.
pub struct RichTextView<S> {
    surface: S,
    config: ViewConfig,
    engine: LayoutEngine,
    issued: u64,
    built: Option<BuiltLayout>,
}

impl<S: RenderSurface> RichTextView<S> {
    pub fn new(surface: S, config: ViewConfig) -> Self {
        Self {
            surface,
            engine: LayoutEngine::new(config.layout),
            config,
            issued: 0,
            built: None,
        }
    }

    /// Replace the text measurer used by future builds (builder).
    pub fn with_measurer(mut self, measurer: impl TextMeasure + 'static) -> Self {
        self.engine = self.engine.with_measurer(measurer);
        self
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Change the viewport and layout settings. Takes effect on the next build.
    pub fn set_config(&mut self, config: ViewConfig) {
        self.engine.set_config(config.layout);
        self.config = config;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn state(&self) -> LayoutState {
        match &self.built {
            Some(built) => LayoutState::Built {
                generation: built.generation,
            },
            None => LayoutState::Unbuilt,
        }
    }

    /// The recorded layout, if any.
    pub fn layout(&self) -> Option<&Arc<Layout>> {
        self.built.as_ref().map(|built| &built.layout)
    }

    /// Start a build of `frame`.
    ///
    /// The frame is cloned before this returns, so the caller may keep
    /// editing it. The returned future runs the layout on the blocking pool
    /// when polled inside a tokio runtime and inline otherwise. The result is
    /// not recorded; pass it to [`apply`](Self::apply).
    pub fn build(
        &mut self,
        frame: &Frame,
    ) -> impl Future<Output = Result<BuiltLayout, BuildError>> + Send + 'static {
        self.issued += 1;
        let generation = self.issued;
        let snapshot = frame.clone();
        let engine = self.engine.clone();
        debug!(generation, blocks = snapshot.block_count(), "build started");

        async move {
            let layout = match Handle::try_current() {
                Ok(handle) => handle.spawn_blocking(move || engine.layout(&snapshot)).await??,
                Err(_) => engine.layout(&snapshot)?,
            };
            Ok(BuiltLayout {
                generation,
                layout: Arc::new(layout),
            })
        }
    }

    /// Build `frame`, record a successful result, then hand the result to
    /// `on_complete` together with the view.
    pub async fn build_with<F, R>(&mut self, frame: &Frame, on_complete: F) -> R
    where
        F: FnOnce(&mut Self, Result<BuiltLayout, BuildError>) -> R,
    {
        let result = self.build(frame).await;
        match &result {
            Ok(built) => {
                self.apply(built.clone());
            }
            Err(err) => warn!(error = %err, "build failed"),
        }
        on_complete(self, result)
    }

    /// Record a build result. Returns `false` and discards `built` when a
    /// newer generation is already recorded.
    pub fn apply(&mut self, built: BuiltLayout) -> bool {
        if let Some(current) = &self.built {
            if current.generation > built.generation {
                warn!(
                    stale = built.generation,
                    current = current.generation,
                    "discarding stale build"
                );
                return false;
            }
        }
        debug!(generation = built.generation, "build recorded");
        self.built = Some(built);
        true
    }

    /// Push the recorded layout to the surface.
    pub fn sync(&mut self) -> Result<SyncOutcome, S::Error> {
        let Some(built) = &self.built else {
            warn!("sync called before any build was recorded");
            return Ok(SyncOutcome::NothingBuilt);
        };
        self.surface.present(self.config.viewport(), &built.layout)?;
        debug!(generation = built.generation, "layout presented");
        Ok(SyncOutcome::Presented {
            generation: built.generation,
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::measure::MonospaceMeasurer;
    use crate::style::styles::PropertySet;
    use crate::testing::{layout_to_string, RecordingError, RecordingSurface};
    use crate::geometry::Size;
    use pretty_assertions::assert_eq;

    fn view() -> RichTextView<RecordingSurface> {
        RichTextView::new(RecordingSurface::new(), ViewConfig::new(200.0, 100.0))
            .with_measurer(MonospaceMeasurer::new(0.5))
    }

    fn frame() -> Frame {
        let mut frame = Frame::new();
        frame
            .styles_mut()
            .define("paragraph", PropertySet::new().with_font_size(10.0));
        let mut blk = frame.insert_block();
        blk.set_style_name("paragraph");
        blk.insert_span("first block");
        frame
    }

    // ── state machine ────────────────────────────────────────────────

    #[test]
    fn starts_unbuilt() {
        let view = view();
        assert_eq!(view.state(), LayoutState::Unbuilt);
        assert!(view.layout().is_none());
    }

    #[test]
    fn sync_before_build_pushes_nothing() {
        let mut view = view();
        assert_eq!(view.sync(), Ok(SyncOutcome::NothingBuilt));
        assert_eq!(view.surface().attempts(), 0);
    }

    #[tokio::test]
    async fn build_apply_sync() {
        let mut view = view();
        let built = view.build(&frame()).await.unwrap();
        assert_eq!(built.generation, 1);
        // Building alone does not record anything.
        assert_eq!(view.state(), LayoutState::Unbuilt);

        assert!(view.apply(built));
        assert_eq!(view.state(), LayoutState::Built { generation: 1 });
        assert_eq!(view.sync(), Ok(SyncOutcome::Presented { generation: 1 }));

        let shown = view.surface().last().unwrap();
        assert_eq!(shown.viewport, Size::new(200.0, 100.0));
        assert_eq!(layout_to_string(&shown.layout), "first block");
    }

    #[test]
    fn builds_inline_without_runtime() {
        assert!(Handle::try_current().is_err());
        let mut view = view();
        // No executor and no runtime: the first poll has to finish the layout.
        let mut task = tokio_test::task::spawn(view.build(&frame()));
        let built = tokio_test::assert_ready_ok!(task.poll());
        assert_eq!(built.generation, 1);
        assert_eq!(layout_to_string(&built.layout), "first block");
    }

    // ── ordering ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn stale_build_is_discarded() {
        let mut view = view();
        let older = view.build(&frame());
        let newer = view.build(&frame());
        let newer = newer.await.unwrap();
        let older = older.await.unwrap();

        assert!(view.apply(newer));
        assert!(!view.apply(older));
        assert_eq!(view.state(), LayoutState::Built { generation: 2 });
    }

    #[tokio::test]
    async fn build_snapshots_the_frame() {
        let mut view = view();
        let mut doc = frame();
        let pending = view.build(&doc);

        doc.insert_block().insert_span("added later");
        doc.styles_mut()
            .define("paragraph", PropertySet::new().with_font_size(40.0));

        let built = pending.await.unwrap();
        assert_eq!(built.layout.blocks.len(), 1);
        assert_eq!(built.layout.blocks[0].lines[0].fragments[0].style.font_size, 10.0);

        let rebuilt = view.build(&doc).await.unwrap();
        assert_eq!(rebuilt.layout.blocks.len(), 2);
        assert_eq!(rebuilt.layout.blocks[0].lines[0].fragments[0].style.font_size, 40.0);
    }

    #[tokio::test]
    async fn recorded_layout_survives_later_builds_until_applied() {
        let mut view = view();
        let mut doc = frame();
        view.build_with(&doc, |_, _| ()).await;
        let first = Arc::clone(view.layout().unwrap());

        doc.insert_block().insert_span("second");
        let _unapplied = view.build(&doc).await.unwrap();
        assert_eq!(view.layout().unwrap(), &first);
    }

    // ── build_with ───────────────────────────────────────────────────

    #[tokio::test]
    async fn build_with_records_then_calls_back_once() {
        let mut view = view();
        let mut calls = 0;
        let outcome = view
            .build_with(&frame(), |view, result| {
                calls += 1;
                assert!(result.is_ok());
                assert_eq!(view.state(), LayoutState::Built { generation: 1 });
                view.sync()
            })
            .await;
        assert_eq!(calls, 1);
        assert_eq!(outcome, Ok(SyncOutcome::Presented { generation: 1 }));
        assert_eq!(view.surface().presentations().len(), 1);
    }

    #[tokio::test]
    async fn failed_build_records_nothing() {
        let config = ViewConfig::new(0.0, 100.0);
        let mut view = RichTextView::new(RecordingSurface::new(), config);
        let err = view
            .build_with(&frame(), |_, result| result.unwrap_err())
            .await;
        assert!(matches!(err, BuildError::Layout(LayoutError::Config(_))));
        assert_eq!(view.state(), LayoutState::Unbuilt);
    }

    #[tokio::test]
    async fn surface_errors_pass_through() {
        let mut view = RichTextView::new(RecordingSurface::failing(), ViewConfig::new(200.0, 100.0));
        view.build_with(&frame(), |_, _| ()).await;
        assert_eq!(view.sync(), Err(RecordingError { attempt: 1 }));
    }

    #[tokio::test]
    async fn set_config_applies_to_next_build() {
        let mut view = view();
        view.set_config(
            ViewConfig::new(200.0, 100.0).with_layout(LayoutConfig::new().with_content_width(30.0)),
        );
        let built = view.build(&frame()).await.unwrap();
        assert_eq!(layout_to_string(&built.layout), "first\nblock");
    }
}
