use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Landmark index {index} out of range for shape with {len} points")]
    LandmarkOutOfRange { index: usize, len: usize },

    #[error("Shape has {actual} landmarks, expected at least {expected}")]
    TooFewLandmarks { expected: usize, actual: usize },

    #[error("Invalid input size {width}x{height}")]
    InvalidInputSize { width: u32, height: u32 },

    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Rotation must be a multiple of 90 degrees, got {0}")]
    InvalidRotation(i32),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_and_image_errors_convert() {
        fn open_missing() -> Result<()> {
            std::fs::read("/nonexistent/landmarks.json")?;
            Ok(())
        }
        assert!(matches!(open_missing(), Err(Error::Io(_))));

        fn decode_garbage() -> Result<()> {
            image::load_from_memory(b"not an image")?;
            Ok(())
        }
        let err = decode_garbage().unwrap_err();
        assert!(matches!(err, Error::Image(_)));
        assert!(err.to_string().starts_with("Image error"));
    }

    #[test]
    fn rotation_message() {
        assert_eq!(
            Error::InvalidRotation(45).to_string(),
            "Rotation must be a multiple of 90 degrees, got 45"
        );
    }
}
