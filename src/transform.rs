//! Rotation and sizing context of the frame a detector ran on.
//!
//! Detectors are often fed a rotated copy of the camera frame (e.g. a phone
//! held in portrait). [`InputInfo`] carries the matrix that maps detector
//! coordinates back into the input image, plus the input image size.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Point, Rect};

/// Affine 2D transform stored as a row-major 3x3 matrix.
///
/// Points are treated as row vectors: `[x y 1] * M`, so the translation lives
/// in the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationMatrix {
    pub m: [[f32; 3]; 3],
}

impl RotationMatrix {
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Rotation about the origin by `radians`.
    ///
    /// With y pointing down (image space) a positive angle turns clockwise on
    /// screen.
    pub fn rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            m: [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub fn rotation_degrees(degrees: f32) -> Self {
        Self::rotation(degrees.to_radians())
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [tx, ty, 1.0]],
        }
    }

    /// Matrix applying `self` first and `next` second.
    pub fn then(&self, next: &RotationMatrix) -> Self {
        let a = &self.m;
        let b = &next.m;
        let mut m = [[0.0f32; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Self { m }
    }

    pub fn transform_point(&self, p: Point) -> Point {
        let m = &self.m;
        Point::new(
            p.x * m[0][0] + p.y * m[1][0] + m[2][0],
            p.x * m[0][1] + p.y * m[1][1] + m[2][1],
        )
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Clockwise rotation applied to the input image before detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Upright,
    Clockwise90,
    Rotated180,
    Clockwise270,
}

impl Orientation {
    /// Orientation for a clockwise angle in degrees, if it is a multiple of 90.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::Upright),
            90 => Some(Self::Clockwise90),
            180 => Some(Self::Rotated180),
            270 => Some(Self::Clockwise270),
            _ => None,
        }
    }

    /// Matrix mapping detector coordinates back into a `width` x `height`
    /// input image.
    pub fn to_input_matrix(self, width: u32, height: u32) -> RotationMatrix {
        let w = width as f32;
        let h = height as f32;
        let m = match self {
            Self::Upright => return RotationMatrix::IDENTITY,
            // detector (u, v) -> input (v, h - u)
            Self::Clockwise90 => [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, h, 1.0]],
            // detector (u, v) -> input (w - u, h - v)
            Self::Rotated180 => [[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [w, h, 1.0]],
            // detector (u, v) -> input (w - v, u)
            Self::Clockwise270 => [[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [w, 0.0, 1.0]],
        };
        RotationMatrix { m }
    }
}

/// Transform and sizing context shared by every landmark set of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputInfo {
    pub rotation_matrix: RotationMatrix,
    pub input_width: u32,
    pub input_height: u32,
}

impl InputInfo {
    /// Context for an image the detector saw unrotated.
    pub fn new(input_width: u32, input_height: u32) -> Result<Self> {
        Self::with_rotation(input_width, input_height, RotationMatrix::IDENTITY)
    }

    pub fn with_rotation(
        input_width: u32,
        input_height: u32,
        rotation_matrix: RotationMatrix,
    ) -> Result<Self> {
        if input_width == 0 || input_height == 0 {
            return Err(Error::InvalidInputSize {
                width: input_width,
                height: input_height,
            });
        }
        Ok(Self {
            rotation_matrix,
            input_width,
            input_height,
        })
    }

    /// Context for a detector that was fed the input rotated by `orientation`.
    pub fn with_orientation(
        input_width: u32,
        input_height: u32,
        orientation: Orientation,
    ) -> Result<Self> {
        Self::with_rotation(
            input_width,
            input_height,
            orientation.to_input_matrix(input_width, input_height),
        )
    }

    /// The input image rectangle, anchored at the origin.
    pub fn image_rect(&self) -> Rect {
        Rect::from_size(self.input_width, self.input_height)
    }

    pub fn to_image(&self, p: Point) -> Point {
        self.rotation_matrix.transform_point(p)
    }
}
