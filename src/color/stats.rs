use crate::color::hsv::rgb_to_hsv;
use crate::preprocess::DecodedImage;

/// Mean hue, saturation and value over every pixel of a `DecodedImage`.
///
/// Hue is in half-degrees [0, 180); saturation and value are in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStatistics {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl ChannelStatistics {
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        ChannelStatistics { hue, saturation, value }
    }

    pub fn from_image(image: &DecodedImage) -> Self {
        let mut sums = [0u64; 3];
        let mut count = 0u64;
        for px in image.pixels() {
            let hsv = rgb_to_hsv(*px);
            for (sum, c) in sums.iter_mut().zip(hsv) {
                *sum += u64::from(c);
            }
            count += 1;
        }

        // A DecodedImage is never empty, but keep the division total.
        let n = count.max(1) as f64;
        ChannelStatistics {
            hue:        sums[0] as f64 / n,
            saturation: sums[1] as f64 / n,
            value:      sums[2] as f64 / n,
        }
    }
}
