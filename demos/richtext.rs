//! Rich-text demo: five styled blocks laid out at 600px and painted to the
//! terminal. Logs go to stderr.
//!
//! `cargo run --example richtext`

use richlayout::config::ViewConfig;
use richlayout::document::Frame;
use richlayout::render::{CellMetrics, RichTextView, TerminalSurface};
use richlayout::style::StyleSheet;

const STYLES: &str = r##"{
    "bold": {
        "font-style": "normal",
        "font-family": "source",
        "font-weight": "700"
    },
    "italic": {
        "font-style": "italic",
        "font-family": "source"
    },
    "code": {
        "color": "#000000",
        "font-family": "source",
        "background-color": "#ccffee"
    },
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
    "subheader": { "font-size": 20, "font-family": "source", "block-padding": 10 },
    "left": { "font-size": 25, "font-family": "source", "block-padding": 10, "text-align": "left" },
    "center": { "font-size": 25, "font-family": "source", "block-padding": 10, "text-align": "center" },
    "right": { "font-size": 25, "font-family": "source", "block-padding": 10, "text-align": "right" }
}"##;

const PARAGRAPH: &str = "Another paragraph of text is here. I think this is pretty cool. \
Don't you think so? Let's type some more so that the text will wrap.";

fn make_document() -> Result<Frame, Box<dyn std::error::Error>> {
    let mut frame = Frame::with_styles(StyleSheet::from_json(STYLES)?);

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

    Ok(frame)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let frame = make_document()?;
    // Measure in whole cells so fragment columns match the printed text.
    let metrics = CellMetrics::default();
    let mut view = RichTextView::new(
        TerminalSurface::stdout().with_metrics(metrics),
        ViewConfig::new(600.0, 600.0),
    )
    .with_measurer(metrics);

    let synced = view
        .build_with(&frame, |view, result| match result {
            Ok(_) => view.sync().map_err(Box::<dyn std::error::Error>::from),
            Err(err) => Err(err.into()),
        })
        .await?;

    tracing::info!(?synced, "done");
    Ok(())
}
