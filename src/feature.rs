//! Named landmark groups of the iBUG 68-point scheme.
//!
//! Layout of the 68 points:
//!
//! - 0-16: jaw line
//! - 17-21: left eyebrow, 22-26: right eyebrow
//! - 27-30: nose bridge, 31-35: nose base
//! - 36-41: left eye, 42-47: right eye
//! - 48-59: outer mouth, 60-67: inner mouth
//!
//! "Left" and "right" follow the image, not the subject.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Number of points in the standard landmark scheme.
pub const NUM_LANDMARKS: usize = 68;

const fn consecutive<const N: usize>() -> [usize; N] {
    let mut out = [0usize; N];
    let mut i = 0;
    while i < N {
        out[i] = i;
        i += 1;
    }
    out
}

/// `ALL_INDICES[i] == i`, so any consecutive feature is a sub-slice of it.
static ALL_INDICES: [usize; NUM_LANDMARKS] = consecutive::<NUM_LANDMARKS>();

/// Eyebrows left to right, then the jaw from right to left.
static FACE_OUTLINE: [usize; 27] = [
    17, 18, 19, 20, 21, 22, 23, 24, 25, 26, //
    16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    LeftEyeTop,
    RightEyeTop,
    LeftJaw,
    RightJaw,
    Jaw,
    LeftEyebrow,
    RightEyebrow,
    LeftEye,
    RightEye,
    OuterMouth,
    InnerMouth,
    NoseBridge,
    NoseBase,
    FaceOutline,
    AllFeatures,
}

impl Feature {
    pub const ALL: [Feature; 15] = [
        Feature::LeftEyeTop,
        Feature::RightEyeTop,
        Feature::LeftJaw,
        Feature::RightJaw,
        Feature::Jaw,
        Feature::LeftEyebrow,
        Feature::RightEyebrow,
        Feature::LeftEye,
        Feature::RightEye,
        Feature::OuterMouth,
        Feature::InnerMouth,
        Feature::NoseBridge,
        Feature::NoseBase,
        Feature::FaceOutline,
        Feature::AllFeatures,
    ];

    /// Landmark indices of this feature, in outline order.
    pub fn indices(self) -> &'static [usize] {
        match self {
            Feature::LeftEyeTop => &ALL_INDICES[36..40],
            Feature::RightEyeTop => &ALL_INDICES[42..46],
            Feature::LeftJaw => &ALL_INDICES[0..9],
            Feature::RightJaw => &ALL_INDICES[8..17],
            Feature::Jaw => &ALL_INDICES[0..17],
            Feature::LeftEyebrow => &ALL_INDICES[17..22],
            Feature::RightEyebrow => &ALL_INDICES[22..27],
            Feature::LeftEye => &ALL_INDICES[36..42],
            Feature::RightEye => &ALL_INDICES[42..48],
            Feature::OuterMouth => &ALL_INDICES[48..60],
            Feature::InnerMouth => &ALL_INDICES[60..68],
            Feature::NoseBridge => &ALL_INDICES[27..31],
            Feature::NoseBase => &ALL_INDICES[31..36],
            Feature::FaceOutline => &FACE_OUTLINE,
            Feature::AllFeatures => &ALL_INDICES,
        }
    }

    /// Whether the outline of this feature wraps back to its first point.
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            Feature::LeftEye
                | Feature::RightEye
                | Feature::OuterMouth
                | Feature::InnerMouth
                | Feature::FaceOutline
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Feature::LeftEyeTop => "left-eye-top",
            Feature::RightEyeTop => "right-eye-top",
            Feature::LeftJaw => "left-jaw",
            Feature::RightJaw => "right-jaw",
            Feature::Jaw => "jaw",
            Feature::LeftEyebrow => "left-eyebrow",
            Feature::RightEyebrow => "right-eyebrow",
            Feature::LeftEye => "left-eye",
            Feature::RightEye => "right-eye",
            Feature::OuterMouth => "outer-mouth",
            Feature::InnerMouth => "inner-mouth",
            Feature::NoseBridge => "nose-bridge",
            Feature::NoseBase => "nose-base",
            Feature::FaceOutline => "face-outline",
            Feature::AllFeatures => "all-features",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = Error;

    /// Accepts the kebab-case name, ignoring case and treating `_` like `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == normalized)
            .ok_or_else(|| Error::UnknownFeature(s.to_string()))
    }
}
