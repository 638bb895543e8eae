use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Component-wise division, used for texture coordinate scaling.
    pub fn div_components(self, sx: f32, sy: f32) -> Self {
        Self {
            x: self.x / sx,
            y: self.y / sy,
        }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// An axis-aligned rectangle defined by top-left corner, width, and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a `width` x `height` image from the origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Convert a point from normalized coordinates [0,1] to coordinates
    /// within this rectangle.
    pub fn denormalize_point(&self, p: Point) -> Point {
        Point::new(self.x + p.x * self.width, self.y + p.y * self.height)
    }

    /// Half-open containment test: the right and bottom edges are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Smallest rectangle enclosing all points, or `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

/// A facial shape as produced by a shape predictor, in detector coordinates.
/// The standard dlib model uses 68 landmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub points: Vec<Point>,
}

impl Shape {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn num_landmarks(&self) -> usize {
        self.points.len()
    }

    pub fn get(&self, idx: usize) -> Option<&Point> {
        self.points.get(idx)
    }

    /// Parse a shape from JSON.
    ///
    /// Accepts either the serialized form `{"points": [{"x":..,"y":..}, ...]}`
    /// or a bare array of `[x, y]` pairs.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let shape = match serde_json::from_str::<ShapeJson>(text)? {
            ShapeJson::Shape { points } => Self { points },
            ShapeJson::Pairs(pairs) => pairs.into_iter().map(Point::from).collect(),
        };
        Ok(shape)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShapeJson {
    Shape { points: Vec<Point> },
    Pairs(Vec<[f32; 2]>),
}

impl std::ops::Index<usize> for Shape {
    type Output = Point;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

impl FromIterator<Point> for Shape {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);

        let sum = a + b;
        assert_eq!(sum.x, 4.0);
        assert_eq!(sum.y, 6.0);

        let diff = b - a;
        assert_eq!(diff.x, 2.0);
        assert_eq!(diff.y, 2.0);

        let scaled = a * 2.0;
        assert_eq!(scaled.x, 2.0);
        assert_eq!(scaled.y, 4.0);

        let divided = Point::new(50.0, 20.0).div_components(100.0, 40.0);
        assert_eq!(divided, Point::new(0.5, 0.5));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::from_size(100, 50);

        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(99.9, 49.9)));
        assert!(!rect.contains(Point::new(100.0, 10.0)));
        assert!(!rect.contains(Point::new(10.0, 50.0)));
        assert!(!rect.contains(Point::new(-0.1, 10.0)));
    }

    #[test]
    fn rect_enclosing() {
        assert!(Rect::enclosing(&[]).is_none());

        let rect = Rect::enclosing(&[
            Point::new(3.0, 4.0),
            Point::new(-1.0, 8.0),
            Point::new(5.0, 2.0),
        ])
        .unwrap();
        assert_eq!(rect, Rect::new(-1.0, 2.0, 6.0, 6.0));
        assert_eq!(rect.center(), Point::new(2.0, 5.0));
        assert_eq!(rect.denormalize_point(Point::new(0.5, 0.5)), rect.center());
    }

    #[test]
    fn shape_index_and_get() {
        let shape: Shape = [[0.0, 1.0], [2.0, 3.0]].into_iter().map(Point::from).collect();
        assert_eq!(shape.num_landmarks(), 2);
        assert_eq!(shape[1], Point::new(2.0, 3.0));
        assert!(shape.get(2).is_none());
    }

    #[test]
    fn shape_from_json() {
        let a = Shape::from_json_str(r#"{"points": [{"x": 1.0, "y": 2.0}, {"x": 3.5, "y": 4.0}]}"#)
            .unwrap();
        let b = Shape::from_json_str("[[1.0, 2.0], [3.5, 4.0]]").unwrap();
        assert_eq!(a, b);
        assert_eq!(a[1], Point::new(3.5, 4.0));

        assert!(matches!(
            Shape::from_json_str(r#"{"landmarks": []}"#),
            Err(crate::error::Error::Json(_))
        ));
    }
}
