use thiserror::Error;

use crate::pose::BodyPart;

pub type Result<T> = std::result::Result<T, FormError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormError {
    #[error("degenerate geometry: hip width {hip_width} is below the minimum denominator")]
    DegenerateGeometry { hip_width: f64 },
    #[error("capture is missing landmark {0}")]
    MissingLandmark(BodyPart),
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("classifier returned {actual} probabilities, expected {expected}")]
    ClassCount { expected: usize, actual: usize },
    #[error("squat classification requires a probability classifier")]
    ClassifierMissing,
    #[error("classifier failed: {0}")]
    Classifier(#[source] anyhow::Error),
}
