//! Integration tests for richlayout.
//!
//! These tests exercise the public API from outside the crate: styles,
//! document, layout and the build/sync bridge working together.

use pretty_assertions::assert_eq;

use richlayout::config::{LayoutConfig, ViewConfig};
use richlayout::document::{BlockId, Frame};
use richlayout::layout::{LayoutEngine, MonospaceMeasurer};
use richlayout::render::{LayoutState, RichTextView, SyncOutcome};
use richlayout::style::{resolve_block, resolve_span, FontStyle, PropertySet, StyleSheet, TextAlign};
use richlayout::testing::{layout_to_string, RecordingSurface};

const DEMO_STYLES: &str = r##"{
    "bold": { "font-style": "normal", "font-family": "source", "font-weight": "700" },
    "italic": { "font-style": "italic", "font-family": "source" },
    "code": { "color": "#000000", "font-family": "source", "background-color": "#ccffee" },
    "paragraph": {
        "color": "#000000",
        "font-size": 15,
        "font-family": "source",
        "font-style": "normal",
        "background-color": "#ffffff",
        "font-weight": "400",
        "block-padding": 15,
        "border-color": "#000000"
    },
    "header": { "font-size": 30, "font-family": "source", "block-padding": 10 },
    "subheader": { "font-size": 20, "font-family": "source", "block-padding": 10 }
}"##;

const PARAGRAPH: &str = "Another paragraph of text is here. I think this is pretty cool. \
Don't you think so? Let's type some more so that the text will wrap.";

fn demo_document() -> Frame {
    let mut frame = Frame::with_styles(StyleSheet::from_json(DEMO_STYLES).unwrap());
    {
        let mut blk = frame.insert_block();
        blk.set_style_name("paragraph");
        blk.insert_span("This is some plain text");
        blk.insert_span(" italic,").set_style_name("italic");
        blk.insert_span(" bold,").set_style_name("bold");
        blk.insert_span(" and code,").set_style_name("code");
        blk.insert_span(" yet again.");
        blk.insert_span(
            " And now for a really long span that will have to be wrapped. \
             It really is pretty long, don't you think?",
        );
    }
    frame.insert_block().set_style_name("header").insert_span("This is a header");
    frame
        .insert_block()
        .set_style_name("subheader")
        .insert_span("This is a sub header");
    for _ in 0..2 {
        frame.insert_block().set_style_name("paragraph").insert_span(PARAGRAPH);
    }
    frame
}

/// Character width = half the font size.
fn mono_engine(width: f32) -> LayoutEngine {
    LayoutEngine::new(LayoutConfig::new().with_content_width(width)).with_measurer(MonospaceMeasurer::new(0.5))
}

fn single_block(frame: &mut Frame, style: Option<&str>, text: &str) -> BlockId {
    let mut blk = frame.insert_block();
    if let Some(style) = style {
        blk.set_style_name(style);
    }
    blk.insert_span(text);
    blk.id()
}

// ---------------------------------------------------------------------------
// Cascade
// ---------------------------------------------------------------------------

#[test]
fn test_unstyled_span_inherits_block_style() {
    let frame = demo_document();
    let sheet = frame.styles();
    let (block_id, block) = frame.blocks().next().unwrap();
    let (_, plain) = frame.spans(block_id).next().unwrap();

    let resolved = resolve_span(sheet, block.style_name(), plain.style_name());
    assert_eq!(resolved, resolve_block(sheet, Some("paragraph")));
    assert_eq!(resolved.font_size, 15.0);
}

#[test]
fn test_span_style_overrides_per_property() {
    let sheet = StyleSheet::from_json(DEMO_STYLES).unwrap();
    let resolved = resolve_span(&sheet, Some("paragraph"), Some("italic"));
    assert_eq!(resolved.font_style, FontStyle::Italic);
    assert_eq!(resolved.font_size, 15.0);
    assert!(!resolved.background_color.is_transparent());
}

// ---------------------------------------------------------------------------
// Layout properties
// ---------------------------------------------------------------------------

#[test]
fn test_plain_text_paragraph_is_one_line() {
    let mut frame = Frame::with_styles(StyleSheet::from_json(DEMO_STYLES).unwrap());
    let id = single_block(&mut frame, Some("paragraph"), "This is some plain text");

    let layout = LayoutEngine::new(LayoutConfig::new().with_content_width(600.0))
        .layout(&frame)
        .unwrap();
    let block = layout.block(id).unwrap();

    assert_eq!(block.lines.len(), 1);
    let line = &block.lines[0];
    assert_eq!(line.fragments.len(), 1);
    assert_eq!(line.fragments[0].text, "This is some plain text");
    assert_eq!(line.x, 15.0);
    assert_eq!(line.height, 15.0 * 1.2);
    assert_eq!(block.text_align, TextAlign::Left);
}

#[test]
fn test_long_word_is_never_split() {
    let mut frame = Frame::new();
    let word = "x".repeat(300);
    let id = single_block(&mut frame, None, &word);

    let layout = LayoutEngine::new(LayoutConfig::new().with_content_width(100.0))
        .layout(&frame)
        .unwrap();
    let block = layout.block(id).unwrap();
    assert_eq!(block.lines.len(), 1);
    assert_eq!(block.lines[0].text(), word);
}

#[test]
fn test_long_word_span_is_alone_beside_neighbours() {
    let mut frame = Frame::new();
    let word = "x".repeat(300);
    let id = {
        let mut blk = frame.insert_block();
        blk.insert_span("ab");
        blk.insert_span(word.as_str());
        blk.insert_span("cd");
        blk.id()
    };

    let layout = LayoutEngine::new(LayoutConfig::new().with_content_width(100.0))
        .layout(&frame)
        .unwrap();
    let lines = &layout.block(id).unwrap().lines;
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1].text(), word);
    assert_eq!(lines[1].fragments.len(), 1);
}

#[test]
fn test_line_heights_sum_to_block_height() {
    let layout = LayoutEngine::default().layout(&demo_document()).unwrap();
    for block in &layout.blocks {
        let sum: f32 = block.lines.iter().map(|l| l.height).sum();
        assert_eq!(block.height, sum);
    }
}

#[test]
fn test_blocks_stack_without_overlap() {
    let layout = LayoutEngine::default().layout(&demo_document()).unwrap();
    let mut bottom = 0.0;
    for block in &layout.blocks {
        let outer = block.outer_rect(layout.content_width);
        assert!((outer.y - bottom).abs() < 1e-3, "{} != {}", outer.y, bottom);
        bottom = outer.bottom();
    }
    assert!((layout.height - bottom).abs() < 1e-3);
}

#[test]
fn test_empty_block_occupies_padding() {
    let mut frame = Frame::with_styles(StyleSheet::from_json(DEMO_STYLES).unwrap());
    let empty = frame.insert_block().set_style_name("header").id();
    let next = single_block(&mut frame, None, "after");

    let layout = mono_engine(600.0).layout(&frame).unwrap();
    assert_eq!(layout.block(empty).unwrap().height, 0.0);
    assert_eq!(layout.block(next).unwrap().top, 20.0);
}

#[test]
fn test_layout_is_deterministic() {
    let frame = demo_document();
    let engine = LayoutEngine::default();
    assert_eq!(engine.layout(&frame).unwrap(), engine.layout(&frame).unwrap());
}

#[test]
fn test_demo_document_wraps() {
    let layout = mono_engine(600.0).layout(&demo_document()).unwrap();
    insta::assert_snapshot!(layout_to_string(&layout), @r"
    This is some plain text italic, bold, and code, yet again. And now for a
    really long span that will have to be wrapped. It really is pretty long,
    don't you think?

    This is a header

    This is a sub header

    Another paragraph of text is here. I think this is pretty cool. Don't you
    think so? Let's type some more so that the text will wrap.

    Another paragraph of text is here. I think this is pretty cool. Don't you
    think so? Let's type some more so that the text will wrap.
    ");
}

#[test]
fn test_fragments_are_exact_span_substrings() {
    let frame = demo_document();
    let layout = mono_engine(600.0).layout(&frame).unwrap();
    let first = &layout.blocks[0];

    let texts: Vec<&str> = first.lines[0].fragments.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "This is some plain text",
            " italic,",
            " bold,",
            " and code,",
            " yet again.",
            " And now for a",
        ]
    );
    assert!(first.lines[0].fragments[2].style.font_weight.is_bold());

    for line in &first.lines {
        for fragment in &line.fragments {
            let span = frame.span(fragment.span).unwrap();
            assert!(span.text().contains(&fragment.text));
        }
    }
}

#[test]
fn test_style_sheet_text_end_to_end() {
    let sheet = StyleSheet::parse(
        "/* demo */
         paragraph { font-size: 10px; block-padding: 5; text-align: center }
         bold { font-weight: bold }",
    )
    .unwrap();
    let mut frame = Frame::with_styles(sheet);
    let id = {
        let mut blk = frame.insert_block();
        blk.set_style_name("paragraph");
        blk.insert_span("ab ");
        blk.insert_span("cd").set_style_name("bold");
        blk.id()
    };

    let layout = mono_engine(100.0).layout(&frame).unwrap();
    let line = &layout.block(id).unwrap().lines[0];
    assert_eq!(line.text(), "ab cd");
    // 5 chars × 5px = 25px centred in 90px, after 5px padding.
    assert_eq!(line.x, 5.0 + 32.5);
    assert!(line.fragments[1].style.font_weight.is_bold());
}

// ---------------------------------------------------------------------------
// Build / sync bridge
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_redefining_style_leaves_snapshot_unchanged() {
    let mut frame = demo_document();
    let mut view = RichTextView::new(RecordingSurface::new(), ViewConfig::new(600.0, 600.0))
        .with_measurer(MonospaceMeasurer::new(0.5));

    view.build_with(&frame, |view, result| {
        result.unwrap();
        view.sync().unwrap();
    })
    .await;
    let before = view.surface().last().unwrap().layout.clone();

    frame
        .styles_mut()
        .define("paragraph", PropertySet::new().with_font_size(40.0));
    assert_eq!(view.surface().last().unwrap().layout, before);
    assert_eq!(**view.layout().unwrap(), before);

    view.build_with(&frame, |view, _| view.sync()).await.unwrap();
    let after = &view.surface().last().unwrap().layout;
    assert_ne!(after, &before);
    assert_eq!(after.blocks[0].lines[0].fragments[0].style.font_size, 40.0);
    assert_eq!(view.state(), LayoutState::Built { generation: 2 });
}

#[tokio::test]
async fn test_sync_before_build_reports_nothing() {
    let mut view = RichTextView::new(RecordingSurface::new(), ViewConfig::default());
    assert_eq!(view.sync(), Ok(SyncOutcome::NothingBuilt));
    assert!(view.surface().presentations().is_empty());
}

#[test]
fn test_build_without_runtime() {
    assert!(tokio::runtime::Handle::try_current().is_err());
    let frame = demo_document();
    let mut view = RichTextView::new(RecordingSurface::new(), ViewConfig::new(600.0, 600.0));

    let outcome = {
        let mut task = tokio_test::task::spawn(view.build_with(&frame, |view, result| {
            assert!(result.is_ok());
            view.sync()
        }));
        tokio_test::assert_ready!(task.poll())
    };
    assert_eq!(outcome, Ok(SyncOutcome::Presented { generation: 1 }));
    assert_eq!(view.surface().presentations().len(), 1);
}
