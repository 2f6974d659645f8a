pub mod hsv;
pub mod stats;

pub use hsv::rgb_to_hsv;
pub use stats::ChannelStatistics;
