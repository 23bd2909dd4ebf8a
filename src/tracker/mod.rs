pub mod segmenter;

pub use segmenter::{Phase, RepetitionSegmenter};
