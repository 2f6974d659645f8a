pub mod decode;

pub use decode::{decode, DecodedImage, TARGET_SIZE};
