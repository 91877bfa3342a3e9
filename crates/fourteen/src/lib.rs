#![no_std]

//! `segment-text-fourteen` is a backend for the `segment-text` crate that
//! renders text as the lit segments of a 14-segment display.
//!
//! Every character occupies a fixed-pitch cell. Supported characters are the
//! digits and the uppercase Latin letters; lowercase input is folded to
//! uppercase, anything else is left blank but still takes up a cell.
//!
//! ```
//! use segment_text_core::{Point, Renderer, ShapeCollector};
//! use segment_text_fourteen::FourteenSegmentRenderer;
//!
//! let renderer = FourteenSegmentRenderer::new(1.0).unwrap();
//! let mut sink = ShapeCollector::new();
//! renderer.render_text("HI 42", Point::ORIGIN, &mut sink, &"text").unwrap();
//!
//! assert!(!sink.is_empty());
//! ```

extern crate alloc;

mod geometry;

use log::{debug, trace};
use segment_text_core::{InvalidScale, LayoutError, Point, Renderer, ShapeSink};

pub use geometry::{Segment, Segments, generate, glyph_shapes};

include!(concat!(env!("OUT_DIR"), "/fourteen_segment_table.rs"));

/// Nominal length of a horizontal bar, in grid units at scale 1.
pub const BASE_WIDTH: f64 = 15000.0;
/// Nominal thickness of a bar, in grid units at scale 1.
pub const BASE_HEIGHT: f64 = 2000.0;

/// Unscaled bar dimensions from which all cell geometry and spacing derive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontMetrics {
    /// Length of a horizontal bar.
    pub base_width: f64,
    /// Thickness of every bar.
    pub base_height: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            base_width: BASE_WIDTH,
            base_height: BASE_HEIGHT,
        }
    }
}

impl FontMetrics {
    /// Horizontal distance between the origins of neighbouring characters.
    pub fn letter_advance(&self, scale: f64) -> f64 {
        2.0 * self.base_width * scale
    }

    /// Vertical distance between the baselines of consecutive lines.
    pub fn line_advance(&self, scale: f64) -> f64 {
        (4.0 * self.base_height + 2.0 * self.base_width) * scale
    }

    pub fn cell_width(&self, scale: f64) -> f64 {
        (self.base_width + 2.0 * self.base_height) * scale
    }

    pub fn cell_height(&self, scale: f64) -> f64 {
        (2.0 * self.base_width + 2.0 * self.base_height) * scale
    }
}

/// Look up the segments lit for `character`.
///
/// Only exact table entries match; callers fold case beforehand.
pub fn encoding(character: char) -> Option<Segments> {
    ENCODING
        .get(character as usize)
        .copied()
        .flatten()
        .map(Segments::from_encoding)
}

/// Size of the area covered by a block of text.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

/// A [Renderer] which draws text as 14-segment display glyphs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FourteenSegmentRenderer {
    metrics: FontMetrics,
    scale: f64,
}

impl FourteenSegmentRenderer {
    /// Create a renderer using the default metrics.
    pub fn new(scale: f64) -> Result<Self, InvalidScale> {
        Self::with_metrics(FontMetrics::default(), scale)
    }

    pub fn with_metrics(metrics: FontMetrics, scale: f64) -> Result<Self, InvalidScale> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(InvalidScale(scale));
        }

        Ok(Self { metrics, scale })
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn letter_advance(&self) -> f64 {
        self.metrics.letter_advance(self.scale)
    }

    pub fn line_advance(&self) -> f64 {
        self.metrics.line_advance(self.scale)
    }

    /// Compute the area `text` would cover when rendered.
    ///
    /// The width counts a full advance for every cell of the longest line.
    pub fn measure(&self, text: &str) -> Extent {
        if text.is_empty() {
            return Extent::default();
        }

        let mut lines = 1usize;
        let mut widest = 0usize;
        let mut current = 0usize;

        for character in normalize(text) {
            if character == '\n' {
                widest = widest.max(current);
                current = 0;
                lines += 1;
            } else {
                current += 1;
            }
        }
        widest = widest.max(current);

        Extent {
            width: widest as f64 * self.letter_advance(),
            height: (lines - 1) as f64 * self.line_advance() + self.metrics.cell_height(self.scale),
        }
    }
}

impl Renderer for FourteenSegmentRenderer {
    fn render_text<S: ShapeSink>(
        &self,
        text: &str,
        origin: Point,
        sink: &mut S,
        layer: &S::Layer,
    ) -> Result<(), LayoutError<S::Error>> {
        let letter_advance = self.letter_advance();
        let line_advance = self.line_advance();

        debug!(
            "rendering {} characters at ({}, {}) with scale {}",
            text.chars().count(),
            origin.x,
            origin.y,
            self.scale
        );

        let mut cursor = origin;

        for character in normalize(text) {
            if character == '\n' {
                cursor.x = origin.x;
                cursor.y -= line_advance;
                continue;
            }

            match encoding(character) {
                Some(segments) => {
                    trace!("{character:?} at ({}, {})", cursor.x, cursor.y);

                    for shape in glyph_shapes(segments, &self.metrics, self.scale) {
                        sink.insert_shape(layer, &shape.translated(cursor).to_grid())
                            .map_err(LayoutError::Sink)?;
                    }
                }
                None => trace!("no glyph for {character:?}, leaving the cell blank"),
            }

            cursor.x += letter_advance;
        }

        Ok(())
    }
}

/// Fold `text` to uppercase, one output character per produced capital.
fn normalize(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_uppercase)
}
