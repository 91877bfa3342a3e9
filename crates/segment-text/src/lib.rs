#![no_std]

//! `segment-text` is a library for placing human-readable text into a 2D
//! layout, such as an integrated-circuit mask layer, as plain geometry.
//!
//! Text is drawn in a fixed-pitch 14-segment display font: every lit segment
//! becomes one box or polygon, snapped to the integer grid of the target and
//! handed to a [ShapeSink] on the requested layer.
//!
//! The library supports `no_std` environments but requires an allocator.
//!
//! This library provides the render_text function which you can use to render text, e.g.:
//!
//! ```
//! use segment_text::{render_text, Point, ShapeCollector};
//!
//! let mut cell = ShapeCollector::new();
//! render_text("CHIP 7\nREV B", Point::new(0.0, 0.0), &mut cell, &"metal1", 1.0).unwrap();
//! ```

pub use segment_text_core::{
    GridPoint, GridShape, InvalidScale, LayoutError, Point, Renderer, Shape, ShapeCollector,
    ShapeSink,
};
pub use segment_text_fourteen::{
    BASE_HEIGHT, BASE_WIDTH, Extent, FontMetrics, FourteenSegmentRenderer, Segment, Segments,
    encoding, generate, glyph_shapes,
};

/// Render `text` at `origin` into `sink` on `layer` using the default font metrics.
///
/// `scale` multiplies every dimension of the font; use `1.0` for the nominal
/// 15000 x 2000 bar size. Lines are separated by `'\n'` and grow downward.
pub fn render_text<S: ShapeSink>(
    text: &str,
    origin: impl Into<Point>,
    sink: &mut S,
    layer: &S::Layer,
    scale: f64,
) -> Result<(), LayoutError<S::Error>> {
    FourteenSegmentRenderer::new(scale)?.render_text(text, origin.into(), sink, layer)
}

/// Compute the area `text` would cover when rendered with the default font metrics.
pub fn measure_text(text: &str, scale: f64) -> Result<Extent, InvalidScale> {
    Ok(FourteenSegmentRenderer::new(scale)?.measure(text))
}
