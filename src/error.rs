use thiserror::Error;

/// Failures surfaced by the classifier core.
///
/// Only decoding can fail; classification and recommendation lookup are total
/// once a `DecodedImage` exists.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The uploaded bytes are not a readable JPEG/PNG image.
    #[error("{0}")]
    Decode(#[from] image::ImageError),
}
