//! # landmark-mesh
//!
//! Query views over a 68-point facial landmark detection.
//!
//! A shape predictor (dlib or a compatible pure Rust port) produces 68
//! labeled points per face. This crate wraps one such result together with
//! the rotation/sizing context of the frame it came from, and provides:
//!
//! - **Image points**: landmarks mapped back into input image space
//! - **Feature outlines**: eyes, eyebrows, jaw, nose and mouth as open or
//!   closed polylines
//! - **Mesh**: a Delaunay triangulation over all landmarks, clipped to the
//!   image, with per-vertex texture coordinates
//!
//! Detection and tracking are out of scope; bring your own landmarks.
//!
//! ## Quick Start
//!
//! ```rust
//! use landmark_mesh::{mean_face_in, Feature, InputInfo, Landmarks, Rect, TexCoords};
//!
//! // Context of the frame the detector ran on
//! let info = InputInfo::new(640, 480).unwrap();
//!
//! // A detection result (here: a generic face placed in a box)
//! let shape = mean_face_in(Rect::new(200.0, 100.0, 240.0, 240.0));
//! let landmarks = Landmarks::new(shape, &info).unwrap();
//!
//! let left_eye = landmarks.image_feature(Feature::LeftEye);
//! assert!(left_eye.is_closed());
//!
//! let mesh = landmarks.image_mesh(TexCoords::Normalized);
//! println!("{} triangles", mesh.num_triangles());
//! ```
//!
//! ## Rotated input
//!
//! If the detector was fed a rotated copy of the frame, describe the rotation
//! in the context and every query maps back to the original frame:
//!
//! ```rust
//! use landmark_mesh::{InputInfo, Orientation};
//!
//! let info = InputInfo::with_orientation(1280, 720, Orientation::Clockwise90).unwrap();
//! # let _ = info;
//! ```

mod error;
mod feature;
mod landmarks;
mod mesh;
mod polyline;
mod reference;
pub mod render;
mod transform;
mod types;

pub use error::{Error, Result};
pub use feature::{Feature, NUM_LANDMARKS};
pub use landmarks::Landmarks;
pub use mesh::{Mesh, TexCoords, NEAR_DUPLICATE_DISTANCE};
pub use polyline::{polygon_area, Polyline};
pub use reference::{mean_face_68, mean_face_in};
pub use transform::{InputInfo, Orientation, RotationMatrix};
pub use types::{Point, Rect, Shape};
