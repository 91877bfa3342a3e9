use std::convert::Infallible;

use svg::Document;
use svg::node::element::{Polygon, Rectangle};

use segment_text::{FontMetrics, GridPoint, Point, ShapeSink, measure_text, render_text};

/// A [ShapeSink] drawing into SVG elements. The layer is the fill color.
///
/// SVG grows downward, so every y coordinate is mirrored.
#[derive(Default)]
struct SvgSink {
    boxes: Vec<Rectangle>,
    polygons: Vec<Polygon>,
}

impl ShapeSink for SvgSink {
    type Layer = str;
    type Error = Infallible;

    fn insert_box(&mut self, layer: &str, [a, b]: [GridPoint; 2]) -> Result<(), Infallible> {
        let rect = Rectangle::new()
            .set("x", a.x.min(b.x))
            .set("y", -a.y.max(b.y))
            .set("width", (b.x - a.x).abs())
            .set("height", (b.y - a.y).abs())
            .set("fill", layer);

        self.boxes.push(rect);
        Ok(())
    }

    fn insert_polygon(&mut self, layer: &str, vertices: &[GridPoint]) -> Result<(), Infallible> {
        let points: Vec<String> = vertices
            .iter()
            .map(|p| format!("{},{}", p.x, -p.y))
            .collect();

        self.polygons.push(
            Polygon::new()
                .set("points", points.join(" "))
                .set("fill", layer),
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let text = "0123456789\nABCDEFGHIJKLM\nNOPQRSTUVWXYZ";
    let footer = "segment text";
    let scale = 1.0;
    let margin = 10000.0;

    let metrics = FontMetrics::default();
    let origin = Point::new(0.0, 0.0);
    let footer_origin = Point::new(0.0, origin.y - 3.0 * metrics.line_advance(scale));

    let mut sink = SvgSink::default();

    render_text(text, origin, &mut sink, "black", scale)?;
    render_text(footer, footer_origin, &mut sink, "firebrick", scale)?;

    let extent = measure_text(&format!("{text}\n{footer}"), scale)?;
    let width = extent.width + 2.0 * margin;
    let height = extent.height + 2.0 * margin;
    let top = -(origin.y + metrics.cell_height(scale)) - margin;

    let background = Rectangle::new()
        .set("x", -margin)
        .set("y", top)
        .set("width", width)
        .set("height", height)
        .set("fill", "white");

    let mut document = Document::new().add(background);

    for el in sink.boxes {
        document = document.add(el);
    }
    for el in sink.polygons {
        document = document.add(el);
    }

    let document = document
        .set("viewBox", (-margin, top, width, height))
        .set("width", format!("{}px", width / 200.0))
        .set("height", format!("{}px", height / 200.0));

    svg::save("output_segments.svg", &document)?;
    println!("Wrote output_segments.svg");

    Ok(())
}
