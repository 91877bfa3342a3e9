#![no_std]

//! `segment-text-core` provides core primitives for the `segment-text` crate.
//!
//! Font backends compute [Shape]s in real-valued local coordinates, move them
//! to their absolute position and only then snap them to the integer grid of
//! the target document, handing each result to a [ShapeSink].

use alloc::vec::Vec;
use core::convert::Infallible;

extern crate alloc;

/// A point in real-valued layout units.
/// Used for all intermediate geometry, before snapping to the grid.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Move this point by `offset`.
    pub fn translated(self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }

    /// Multiply both coordinates by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Snap to the integer grid, truncating toward zero.
    pub fn to_grid(self) -> GridPoint {
        GridPoint {
            x: self.x as i64,
            y: self.y as i64,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A point on the integer grid of the target document (e.g. database units).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// A closed shape in real-valued coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle given by two opposite corners.
    Rectangle([Point; 2]),
    /// Implicitly closed polygon with at least three vertices.
    Polygon(Vec<Point>),
}

impl Shape {
    /// Corner or vertex list of this shape, in definition order.
    pub fn points(&self) -> &[Point] {
        match self {
            Shape::Rectangle(corners) => corners,
            Shape::Polygon(vertices) => vertices,
        }
    }

    pub fn translated(&self, offset: Point) -> Self {
        self.map(|p| p.translated(offset))
    }

    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|p| p.scaled(factor))
    }

    /// Snap every coordinate to the integer grid.
    ///
    /// This should happen exactly once, after all translation, so that
    /// rounding error does not accumulate across chained offsets.
    pub fn to_grid(&self) -> GridShape {
        match self {
            Shape::Rectangle([a, b]) => GridShape::Box([a.to_grid(), b.to_grid()]),
            Shape::Polygon(vertices) => {
                GridShape::Polygon(vertices.iter().map(|p| p.to_grid()).collect())
            }
        }
    }

    fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        match self {
            Shape::Rectangle([a, b]) => Shape::Rectangle([f(*a), f(*b)]),
            Shape::Polygon(vertices) => Shape::Polygon(vertices.iter().map(|p| f(*p)).collect()),
        }
    }
}

/// A shape snapped to the integer grid, ready for insertion into a sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GridShape {
    Box([GridPoint; 2]),
    Polygon(Vec<GridPoint>),
}

impl GridShape {
    pub fn points(&self) -> &[GridPoint] {
        match self {
            GridShape::Box(corners) => corners,
            GridShape::Polygon(vertices) => vertices,
        }
    }
}

/// Receives finished shapes on a named drawing layer.
///
/// This is the only capability text rendering needs from the host document;
/// no query or deletion is ever performed.
pub trait ShapeSink {
    /// Handle identifying a drawing layer in the host document.
    type Layer: ?Sized;
    /// Error produced when the host refuses a shape.
    type Error;

    /// Insert an axis-aligned box given by two opposite corners.
    fn insert_box(&mut self, layer: &Self::Layer, corners: [GridPoint; 2])
    -> Result<(), Self::Error>;

    /// Insert a closed polygon with at least three vertices.
    fn insert_polygon(
        &mut self,
        layer: &Self::Layer,
        vertices: &[GridPoint],
    ) -> Result<(), Self::Error>;

    fn insert_shape(&mut self, layer: &Self::Layer, shape: &GridShape) -> Result<(), Self::Error> {
        match shape {
            GridShape::Box(corners) => self.insert_box(layer, *corners),
            GridShape::Polygon(vertices) => self.insert_polygon(layer, vertices),
        }
    }
}

/// A [ShapeSink] which records every inserted shape in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCollector<L> {
    shapes: Vec<(L, GridShape)>,
}

impl<L> ShapeCollector<L> {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// All recorded shapes with the layer they were inserted on.
    pub fn shapes(&self) -> &[(L, GridShape)] {
        &self.shapes
    }

    pub fn into_shapes(self) -> Vec<(L, GridShape)> {
        self.shapes
    }

    /// Recorded shapes, without their layers.
    pub fn geometry(&self) -> impl Iterator<Item = &GridShape> {
        self.shapes.iter().map(|(_, shape)| shape)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl<L: PartialEq> ShapeCollector<L> {
    /// Shapes which were inserted on `layer`.
    pub fn on_layer<'a>(&'a self, layer: &'a L) -> impl Iterator<Item = &'a GridShape> + 'a {
        self.shapes
            .iter()
            .filter(move |(l, _)| l == layer)
            .map(|(_, shape)| shape)
    }
}

impl<L> Default for ShapeCollector<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Clone> ShapeSink for ShapeCollector<L> {
    type Layer = L;
    type Error = Infallible;

    fn insert_box(&mut self, layer: &L, corners: [GridPoint; 2]) -> Result<(), Infallible> {
        self.shapes.push((layer.clone(), GridShape::Box(corners)));
        Ok(())
    }

    fn insert_polygon(&mut self, layer: &L, vertices: &[GridPoint]) -> Result<(), Infallible> {
        self.shapes
            .push((layer.clone(), GridShape::Polygon(vertices.to_vec())));
        Ok(())
    }
}

/// The requested font scale cannot produce valid geometry.
#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
#[error("font scale must be finite and greater than zero, got {0}")]
pub struct InvalidScale(pub f64);

/// Failure while laying out text into a [ShapeSink].
///
/// Sink errors are carried as-is. Shapes inserted before the failure are not
/// removed.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError<E> {
    #[error(transparent)]
    Scale(#[from] InvalidScale),
    #[error("shape sink rejected insertion: {0}")]
    Sink(E),
}

/// Allows rendering text into shapes.
///
/// Implementors carry their own font data and scale.
pub trait Renderer {
    /// Lay out `text` starting at `origin`, inserting every shape into `sink`
    /// on `layer`.
    fn render_text<S: ShapeSink>(
        &self,
        text: &str,
        origin: Point,
        sink: &mut S,
        layer: &S::Layer,
    ) -> Result<(), LayoutError<S::Error>>;
}
