//! Feature outlines as open or closed polylines.

use serde::{Deserialize, Serialize};

use crate::types::{Point, Rect};

/// An ordered list of vertices, optionally wrapping back to the first one.
///
/// A closed polyline does not repeat its first vertex at the end; the closing
/// segment is implied by `closed`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    vertices: Vec<Point>,
    closed: bool,
}

impl Polyline {
    pub fn open(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            closed: false,
        }
    }

    pub fn closed(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            closed: true,
        }
    }

    pub fn add_vertex(&mut self, p: Point) {
        self.vertices.push(p);
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consecutive vertex pairs, including last-to-first when closed.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        let count = match (n, self.closed) {
            (0 | 1, _) => 0,
            (_, true) => n,
            (_, false) => n - 1,
        };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn perimeter(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(&b)).sum()
    }

    /// Enclosed area. Open polylines enclose nothing.
    pub fn area(&self) -> f32 {
        if self.closed {
            polygon_area(&self.vertices)
        } else {
            0.0
        }
    }

    /// Mean of the vertices.
    pub fn centroid(&self) -> Option<Point> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Point::zero(), |acc, &p| acc + p);
        Some(sum * (1.0 / self.vertices.len() as f32))
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        Rect::enclosing(&self.vertices)
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::open(iter.into_iter().collect())
    }
}

/// Calculate the area of a polygon using the shoelace formula.
pub fn polygon_area(points: &[Point]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = points.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }

    (area / 2.0).abs()
}
