use crate::error::{Error, Result};
use crate::feature::{Feature, NUM_LANDMARKS};
use crate::mesh::{Mesh, TexCoords};
use crate::polyline::Polyline;
use crate::transform::InputInfo;
use crate::types::{Point, Shape};

/// One detection result together with the context of the frame it came from.
///
/// The shape is stored in detector coordinates. Every `image_*` query maps
/// points through the context's rotation matrix into input image space.
///
/// # Usage
///
/// ```ignore
/// let info = InputInfo::new(640, 480)?;
/// let landmarks = Landmarks::new(shape, &info)?;
/// let mouth = landmarks.image_feature(Feature::OuterMouth);
/// let mesh = landmarks.image_mesh(TexCoords::Normalized);
/// ```
#[derive(Debug, Clone)]
pub struct Landmarks<'a> {
    shape: Shape,
    info: &'a InputInfo,
}

impl<'a> Landmarks<'a> {
    /// Wrap a detection result.
    ///
    /// The shape needs at least the 68 standard points. Models with extra
    /// points (e.g. 81-point forehead models) put the standard ones first.
    pub fn new(shape: Shape, info: &'a InputInfo) -> Result<Self> {
        if shape.num_landmarks() < NUM_LANDMARKS {
            return Err(Error::TooFewLandmarks {
                expected: NUM_LANDMARKS,
                actual: shape.num_landmarks(),
            });
        }
        Ok(Self { shape, info })
    }

    pub fn num_points(&self) -> usize {
        self.shape.num_landmarks()
    }

    pub fn info(&self) -> &'a InputInfo {
        self.info
    }

    /// The untransformed detection result.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Point `i` in detector coordinates.
    pub fn raw_point(&self, i: usize) -> Result<Point> {
        self.shape
            .get(i)
            .copied()
            .ok_or(Error::LandmarkOutOfRange {
                index: i,
                len: self.shape.num_landmarks(),
            })
    }

    /// Point `i` in image coordinates.
    pub fn image_point(&self, i: usize) -> Result<Point> {
        self.raw_point(i).map(|p| self.info.to_image(p))
    }

    /// All points in image coordinates, in landmark order.
    pub fn image_points(&self) -> Vec<Point> {
        self.shape
            .points
            .iter()
            .map(|&p| self.info.to_image(p))
            .collect()
    }

    /// Outline of `feature` in image coordinates.
    pub fn image_feature(&self, feature: Feature) -> Polyline {
        feature_polyline(feature, &self.image_points())
    }

    /// Delaunay mesh over all image points, clipped to the input image.
    pub fn image_mesh(&self, tex_coords: TexCoords) -> Mesh {
        Mesh::delaunay(&self.image_points(), self.info.image_rect(), tex_coords)
    }
}

/// Pick the feature's points out of `points` and close the outline where the
/// feature wraps around.
fn feature_polyline(feature: Feature, points: &[Point]) -> Polyline {
    let mut polyline: Polyline = feature.indices().iter().map(|&i| points[i]).collect();
    if feature.is_closed() {
        polyline.close();
    }
    polyline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{Orientation, RotationMatrix};

    fn shape_68() -> Shape {
        (0..NUM_LANDMARKS)
            .map(|i| Point::new(100.0 + i as f32, 50.0 + (i % 7) as f32 * 3.0))
            .collect()
    }

    #[test]
    fn rejects_short_shapes() {
        let info = InputInfo::new(640, 480).unwrap();
        let shape = Shape::new(vec![Point::zero(); 5]);
        assert!(matches!(
            Landmarks::new(shape, &info),
            Err(Error::TooFewLandmarks { expected: 68, actual: 5 })
        ));
    }

    #[test]
    fn image_point_applies_rotation() {
        let info = InputInfo::with_rotation(640, 480, RotationMatrix::translation(10.0, -5.0)).unwrap();
        let landmarks = Landmarks::new(shape_68(), &info).unwrap();

        let raw = landmarks.raw_point(3).unwrap();
        let image = landmarks.image_point(3).unwrap();
        assert_eq!(image, Point::new(raw.x + 10.0, raw.y - 5.0));
    }

    #[test]
    fn image_point_out_of_range() {
        let info = InputInfo::new(640, 480).unwrap();
        let landmarks = Landmarks::new(shape_68(), &info).unwrap();

        assert!(landmarks.image_point(67).is_ok());
        assert!(matches!(
            landmarks.image_point(68),
            Err(Error::LandmarkOutOfRange { index: 68, len: 68 })
        ));
    }

    #[test]
    fn image_points_match_image_point() {
        let info = InputInfo::with_orientation(640, 480, Orientation::Rotated180).unwrap();
        let landmarks = Landmarks::new(shape_68(), &info).unwrap();

        let all = landmarks.image_points();
        assert_eq!(all.len(), 68);
        for (i, p) in all.iter().enumerate() {
            assert_eq!(*p, landmarks.image_point(i).unwrap());
        }
    }

    #[test]
    fn feature_outlines() {
        let info = InputInfo::new(640, 480).unwrap();
        let landmarks = Landmarks::new(shape_68(), &info).unwrap();
        let points = landmarks.image_points();

        let eye = landmarks.image_feature(Feature::LeftEye);
        assert!(eye.is_closed());
        assert_eq!(eye.vertices(), &points[36..42]);

        let brow = landmarks.image_feature(Feature::RightEyebrow);
        assert!(!brow.is_closed());
        assert_eq!(brow.vertices(), &points[22..27]);

        let outline = landmarks.image_feature(Feature::FaceOutline);
        assert!(outline.is_closed());
        assert_eq!(outline.len(), 27);
        assert_eq!(outline.vertices()[0], points[17]);
        assert_eq!(outline.vertices()[26], points[0]);
    }

    #[test]
    fn extra_points_are_kept() {
        let info = InputInfo::new(640, 480).unwrap();
        let mut shape = shape_68();
        shape.points.extend((0..13).map(|i| Point::new(120.0 + i as f32, 20.0)));
        let landmarks = Landmarks::new(shape, &info).unwrap();

        assert_eq!(landmarks.num_points(), 81);
        assert_eq!(landmarks.image_points().len(), 81);
        assert_eq!(landmarks.image_feature(Feature::AllFeatures).len(), 68);
    }
}
