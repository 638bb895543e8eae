//! A generic frontal face in the 68-point layout.
//!
//! Useful as a stand-in detection result for previews and tests.

use crate::types::{Point, Rect, Shape};

/// Approximate positions of the 68 iBUG landmarks in normalized [0,1]
/// coordinates of the face box.
pub fn mean_face_68() -> Shape {
    let points = vec![
        // Jaw line (0-16)
        Point::new(0.10, 0.35),
        Point::new(0.11, 0.45),
        Point::new(0.12, 0.55),
        Point::new(0.14, 0.65),
        Point::new(0.18, 0.73),
        Point::new(0.24, 0.80),
        Point::new(0.32, 0.85),
        Point::new(0.41, 0.88),
        Point::new(0.50, 0.89), // Chin center
        Point::new(0.59, 0.88),
        Point::new(0.68, 0.85),
        Point::new(0.76, 0.80),
        Point::new(0.82, 0.73),
        Point::new(0.86, 0.65),
        Point::new(0.88, 0.55),
        Point::new(0.89, 0.45),
        Point::new(0.90, 0.35),
        // Left eyebrow (17-21)
        Point::new(0.20, 0.26),
        Point::new(0.25, 0.22),
        Point::new(0.32, 0.21),
        Point::new(0.38, 0.23),
        Point::new(0.43, 0.27),
        // Right eyebrow (22-26)
        Point::new(0.57, 0.27),
        Point::new(0.62, 0.23),
        Point::new(0.68, 0.21),
        Point::new(0.75, 0.22),
        Point::new(0.80, 0.26),
        // Nose bridge (27-30)
        Point::new(0.50, 0.32),
        Point::new(0.50, 0.40),
        Point::new(0.50, 0.48),
        Point::new(0.50, 0.55),
        // Nose base (31-35)
        Point::new(0.40, 0.58),
        Point::new(0.45, 0.60),
        Point::new(0.50, 0.62),
        Point::new(0.55, 0.60),
        Point::new(0.60, 0.58),
        // Left eye (36-41)
        Point::new(0.24, 0.32),
        Point::new(0.28, 0.29),
        Point::new(0.34, 0.29),
        Point::new(0.38, 0.33),
        Point::new(0.34, 0.35),
        Point::new(0.28, 0.35),
        // Right eye (42-47)
        Point::new(0.62, 0.33),
        Point::new(0.66, 0.29),
        Point::new(0.72, 0.29),
        Point::new(0.76, 0.32),
        Point::new(0.72, 0.35),
        Point::new(0.66, 0.35),
        // Outer mouth (48-59)
        Point::new(0.32, 0.72),
        Point::new(0.38, 0.68),
        Point::new(0.44, 0.66),
        Point::new(0.50, 0.67),
        Point::new(0.56, 0.66),
        Point::new(0.62, 0.68),
        Point::new(0.68, 0.72),
        Point::new(0.62, 0.78),
        Point::new(0.56, 0.80),
        Point::new(0.50, 0.81),
        Point::new(0.44, 0.80),
        Point::new(0.38, 0.78),
        // Inner mouth (60-67)
        Point::new(0.36, 0.72),
        Point::new(0.44, 0.70),
        Point::new(0.50, 0.70),
        Point::new(0.56, 0.70),
        Point::new(0.64, 0.72),
        Point::new(0.56, 0.74),
        Point::new(0.50, 0.75),
        Point::new(0.44, 0.74),
    ];

    Shape::new(points)
}

/// The mean face scaled into `face_box`.
pub fn mean_face_in(face_box: Rect) -> Shape {
    mean_face_68()
        .points
        .into_iter()
        .map(|p| face_box.denormalize_point(p))
        .collect()
}
