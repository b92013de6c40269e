use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("File not found or not writable: {0}")]
    FileNotFound(String),

    #[error("Missing channel '{0}' in EXR input")]
    MissingChannel(String),

    #[error("Shape mismatch in {plane}: expected {expected_width}x{expected_height}, got {actual}")]
    ShapeMismatch {
        plane: String,
        expected_width: usize,
        expected_height: usize,
        actual: String,
    },

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode PNG image: {0}")]
    EncodingError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConversionError {
    /// Plane dimensions disagree with the expected `width x height`.
    pub fn shape_mismatch(
        plane: impl Into<String>,
        expected: (usize, usize),
        actual: impl Into<String>,
    ) -> Self {
        ConversionError::ShapeMismatch {
            plane: plane.into(),
            expected_width: expected.0,
            expected_height: expected.1,
            actual: actual.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_message_names_plane() {
        let err = ConversionError::shape_mismatch("green", (100, 100), "100x99");
        assert_eq!(
            err.to_string(),
            "Shape mismatch in green: expected 100x100, got 100x99"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: ConversionError = io.into();
        assert!(matches!(err, ConversionError::IoError(_)));
    }
}
