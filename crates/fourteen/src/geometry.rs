//! Segment geometry for a single character cell.
//!
//! A cell is `w + 2h` wide and `2w + 2h` tall, where `w` is the scaled bar
//! length and `h` the scaled bar thickness. The outer frame (A to F) and the
//! two midline halves (G1, G2) are plain rectangles. Inside the frame, the
//! center strokes (I, L) are rectangles too, while the four diagonals (H, J,
//! K, M) are hexagons whose ends are chamfered at 45 degrees so that they
//! meet the frame and the center strokes flush.

use alloc::{vec, vec::Vec};
use core::f64::consts::SQRT_2;

use bitflags::bitflags;
use segment_text_core::{Point, Shape};

use crate::FontMetrics;

bitflags! {
    /// The set of lit segments of one character.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Segments: u32 {
        /// Top bar
        const A  = 1 << 0;
        /// Upper right bar
        const B  = 1 << 1;
        /// Lower right bar
        const C  = 1 << 2;
        /// Bottom bar
        const D  = 1 << 3;
        /// Lower left bar
        const E  = 1 << 4;
        /// Upper left bar
        const F  = 1 << 5;
        /// Left half of the midline
        const G1 = 1 << 6;
        /// Right half of the midline
        const G2 = 1 << 7;
        /// Upper left diagonal
        const H  = 1 << 8;
        /// Upper center stroke
        const I  = 1 << 9;
        /// Upper right diagonal
        const J  = 1 << 10;
        /// Lower left diagonal
        const K  = 1 << 11;
        /// Lower center stroke
        const L  = 1 << 12;
        /// Lower right diagonal
        const M  = 1 << 13;
    }
}

impl Segments {
    /// Interpret an arbitrary integer as a segment mask.
    /// Bits above the 14 segment bits are ignored.
    pub const fn from_encoding(encoding: u32) -> Self {
        Self::from_bits_truncate(encoding)
    }
}

impl From<Segment> for Segments {
    fn from(segment: Segment) -> Self {
        segment.mask()
    }
}

/// One stroke of the 14-segment cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G1,
    G2,
    H,
    I,
    J,
    K,
    L,
    M,
}

impl Segment {
    /// Every segment, in the order shapes are emitted.
    pub const CANONICAL_ORDER: [Segment; 14] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G1,
        Segment::G2,
        Segment::H,
        Segment::I,
        Segment::J,
        Segment::K,
        Segment::L,
        Segment::M,
    ];

    /// Bit position of this segment within an encoding.
    pub const fn bit(self) -> u32 {
        self as u32
    }

    pub const fn mask(self) -> Segments {
        Segments::from_bits_truncate(1 << self.bit())
    }

    /// Whether this segment is one of the chamfered diagonals.
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Segment::H | Segment::J | Segment::K | Segment::M)
    }

    /// Shape of this segment in local cell coordinates.
    pub fn shape(self, metrics: &FontMetrics, scale: f64) -> Shape {
        Cell::new(metrics, scale).shape(self)
    }
}

/// Scaled measurements shared by every segment of one cell.
struct Cell {
    w: f64,
    h: f64,
    /// Leg length of a 45 degree chamfer across a bar of thickness `h`.
    chamfer: f64,
    /// Left edge of the center strokes.
    stem_left: f64,
    /// Right edge of the center strokes.
    stem_right: f64,
    /// Top edge of the vertical bars, bottom edge of A.
    top: f64,
    /// Bottom edge of the midline.
    mid_low: f64,
    /// Top edge of the midline.
    mid_high: f64,
}

impl Cell {
    fn new(metrics: &FontMetrics, scale: f64) -> Self {
        let w = metrics.base_width * scale;
        let h = metrics.base_height * scale;
        let center = (2.0 * h + w) / 2.0;

        Self {
            w,
            h,
            chamfer: h * SQRT_2 / 2.0,
            stem_left: center - h / 2.0,
            stem_right: center + h / 2.0,
            top: 2.0 * w + h,
            mid_low: h / 2.0 + w,
            mid_high: 3.0 * h / 2.0 + w,
        }
    }

    fn shape(&self, segment: Segment) -> Shape {
        let Cell {
            w,
            h,
            chamfer: c,
            stem_left,
            stem_right,
            top,
            mid_low,
            mid_high,
        } = *self;

        let rect = |x0, y0, x1, y1| Shape::Rectangle([Point::new(x0, y0), Point::new(x1, y1)]);
        let hexagon = |points: [(f64, f64); 6]| {
            Shape::Polygon(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
        };

        match segment {
            Segment::A => rect(0.0, top, 2.0 * h + w, 2.0 * w + 2.0 * h),
            Segment::B => rect(w + h, w + h, w + 2.0 * h, top),
            Segment::C => rect(w + h, h, w + 2.0 * h, w + h),
            Segment::D => rect(0.0, 0.0, w + 2.0 * h, h),
            Segment::E => rect(0.0, h, h, h + w),
            Segment::F => rect(0.0, h + w, h, h + 2.0 * w),
            Segment::G1 => rect(h, mid_low, h + w / 2.0, mid_high),
            Segment::G2 => rect(h + w / 2.0, mid_low, h + w, mid_high),
            Segment::H => hexagon([
                (h, top - c),
                (h, top),
                (h + c, top),
                (stem_left, mid_high + c),
                (stem_left, mid_high),
                (stem_left - c, mid_high),
            ]),
            Segment::I => rect(stem_left, mid_high, stem_right, top),
            Segment::J => hexagon([
                (w + h - c, top),
                (w + h, top),
                (w + h, top - c),
                (stem_right + c, mid_high),
                (stem_right, mid_high),
                (stem_right, mid_high + c),
            ]),
            Segment::K => hexagon([
                (h, h),
                (h, h + c),
                (stem_left - c, mid_low),
                (stem_left, mid_low),
                (stem_left, mid_low - c),
                (h + c, h),
            ]),
            Segment::L => rect(stem_left, h, stem_right, mid_low),
            Segment::M => hexagon([
                (w + h - c, h),
                (stem_right, mid_low - c),
                (stem_right, mid_low),
                (stem_right + c, mid_low),
                (w + h, h + c),
                (w + h, h),
            ]),
        }
    }
}

/// Compute the shapes for every lit segment, in canonical segment order.
///
/// Coordinates are local to the character cell, with the bottom left corner
/// of segment D at the origin, and are not snapped to any grid.
pub fn glyph_shapes(segments: Segments, metrics: &FontMetrics, scale: f64) -> Vec<Shape> {
    if segments.is_empty() {
        return vec![];
    }

    let cell = Cell::new(metrics, scale);

    Segment::CANONICAL_ORDER
        .iter()
        .filter(|segment| segments.contains(segment.mask()))
        .map(|&segment| cell.shape(segment))
        .collect()
}

/// Compute the shapes for a raw encoding using the default font metrics.
///
/// Any integer is accepted; bits above the 14 segment bits are ignored.
pub fn generate(encoding: u32, scale: f64) -> Vec<Shape> {
    glyph_shapes(
        Segments::from_encoding(encoding),
        &FontMetrics::default(),
        scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(shape: &Shape) -> Vec<(i64, i64)> {
        shape.to_grid().points().iter().map(|p| (p.x, p.y)).collect()
    }

    /// Twice the signed area; negative for clockwise winding.
    fn signed_area2(points: &[Point]) -> f64 {
        let n = points.len();
        (0..n)
            .map(|i| {
                let (a, b) = (points[i], points[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum()
    }

    fn cross(o: Point, a: Point, b: Point) -> f64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    }

    fn edges_cross(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
        let d1 = cross(q1, q2, p1);
        let d2 = cross(q1, q2, p2);
        let d3 = cross(p1, p2, q1);
        let d4 = cross(p1, p2, q2);
        d1 * d2 < 0.0 && d3 * d4 < 0.0
    }

    #[test]
    fn frame_and_midline_are_rectangles() {
        let metrics = FontMetrics::default();
        let expected = [
            (Segment::A, vec![(0, 32000), (19000, 34000)]),
            (Segment::B, vec![(17000, 17000), (19000, 32000)]),
            (Segment::C, vec![(17000, 2000), (19000, 17000)]),
            (Segment::D, vec![(0, 0), (19000, 2000)]),
            (Segment::E, vec![(0, 2000), (2000, 17000)]),
            (Segment::F, vec![(0, 17000), (2000, 32000)]),
            (Segment::G1, vec![(2000, 16000), (9500, 18000)]),
            (Segment::G2, vec![(9500, 16000), (17000, 18000)]),
            (Segment::I, vec![(8500, 18000), (10500, 32000)]),
            (Segment::L, vec![(8500, 2000), (10500, 16000)]),
        ];

        for (segment, corners) in expected {
            let shape = segment.shape(&metrics, 1.0);
            assert!(matches!(shape, Shape::Rectangle(_)), "{segment:?}");
            assert_eq!(grid(&shape), corners, "{segment:?}");
        }
    }

    #[test]
    fn diagonals_are_chamfered_hexagons() {
        let metrics = FontMetrics::default();
        let expected = [
            (
                Segment::H,
                vec![
                    (2000, 30585),
                    (2000, 32000),
                    (3414, 32000),
                    (8500, 19414),
                    (8500, 18000),
                    (7085, 18000),
                ],
            ),
            (
                Segment::J,
                vec![
                    (15585, 32000),
                    (17000, 32000),
                    (17000, 30585),
                    (11914, 18000),
                    (10500, 18000),
                    (10500, 19414),
                ],
            ),
            (
                Segment::K,
                vec![
                    (2000, 2000),
                    (2000, 3414),
                    (7085, 16000),
                    (8500, 16000),
                    (8500, 14585),
                    (3414, 2000),
                ],
            ),
            (
                Segment::M,
                vec![
                    (15585, 2000),
                    (10500, 14585),
                    (10500, 16000),
                    (11914, 16000),
                    (17000, 3414),
                    (17000, 2000),
                ],
            ),
        ];

        for (segment, vertices) in expected {
            let shape = segment.shape(&metrics, 1.0);
            assert!(segment.is_diagonal());
            assert!(matches!(shape, Shape::Polygon(_)), "{segment:?}");
            assert_eq!(grid(&shape), vertices, "{segment:?}");
        }
    }

    #[test]
    fn chamfer_leg_is_projected_thickness() {
        let Shape::Polygon(h) = Segment::H.shape(&FontMetrics::default(), 1.0) else {
            panic!("H should be a polygon");
        };

        let leg = 2000.0 * SQRT_2 / 2.0;
        for (a, b) in [(h[1].y, h[0].y), (h[2].x, h[1].x), (h[3].y, h[4].y), (h[4].x, h[5].x)] {
            assert!((a - b - leg).abs() < 1e-9);
        }
    }

    #[test]
    fn diagonals_wind_clockwise_without_self_intersection() {
        let metrics = FontMetrics::default();

        for segment in Segment::CANONICAL_ORDER.into_iter().filter(|s| s.is_diagonal()) {
            let shape = segment.shape(&metrics, 1.0);
            let points = shape.points();
            assert_eq!(points.len(), 6);
            assert!(signed_area2(points) < 0.0, "{segment:?} is not clockwise");

            for i in 0..6 {
                for j in (i + 2)..6 {
                    if i == 0 && j == 5 {
                        continue;
                    }
                    assert!(
                        !edges_cross(points[i], points[i + 1], points[j], points[(j + 1) % 6]),
                        "{segment:?} edges {i} and {j} cross"
                    );
                }
            }
        }
    }

    #[test]
    fn diagonals_share_vertices_with_neighbours() {
        let metrics = FontMetrics::default();
        let shape = |s: Segment| s.shape(&metrics, 1.0);

        // H runs from the top of F down to the top of I.
        let h = shape(Segment::H);
        assert!(h.points().contains(&Point::new(2000.0, 32000.0)));
        assert!(h.points().contains(&shape(Segment::I).points()[0]));

        // K runs from the bottom of E up to the top left of L.
        let k = shape(Segment::K);
        assert!(k.points().contains(&Point::new(2000.0, 2000.0)));
        assert!(k.points().contains(&Point::new(8500.0, 16000.0)));

        // J and M meet the right edge of the center strokes.
        assert!(shape(Segment::J).points().contains(&Point::new(10500.0, 18000.0)));
        assert!(shape(Segment::M).points().contains(&shape(Segment::L).points()[1]));
    }

    #[test]
    fn shapes_follow_canonical_order() {
        let all = glyph_shapes(Segments::all(), &FontMetrics::default(), 1.0);
        let one_by_one: Vec<Shape> = Segment::CANONICAL_ORDER
            .iter()
            .map(|s| s.shape(&FontMetrics::default(), 1.0))
            .collect();

        assert_eq!(all, one_by_one);

        let declared: Vec<Segments> = Segments::all().iter().collect();
        let canonical: Vec<Segments> = Segment::CANONICAL_ORDER.iter().map(|s| s.mask()).collect();
        assert_eq!(declared, canonical);
    }

    #[test]
    fn high_bits_are_ignored() {
        assert_eq!(generate(0xFFFF_C000, 1.0), vec![]);
        assert_eq!(generate(0x0001_4001, 1.0), generate(0x0001, 1.0));
        assert_eq!(generate(0xFFFF_FFFF, 1.0).len(), 14);
    }

    #[test]
    fn coordinates_scale_linearly() {
        for encoding in [0x3FFF, 0x0F7, 0x2D00, 0x1209] {
            let unit = generate(encoding, 1.0);
            let doubled: Vec<Shape> = unit.iter().map(|s| s.scaled(2.0)).collect();
            assert_eq!(generate(encoding, 2.0), doubled);

            let halved: Vec<Shape> = unit.iter().map(|s| s.scaled(0.5)).collect();
            assert_eq!(generate(encoding, 0.5), halved);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate(0x3FFF, 3.7), generate(0x3FFF, 3.7));
    }
}
