pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod error;
pub mod exercise;
pub mod features;
pub mod feedback;
pub mod geometry;
pub mod pose;
pub mod protocol;
pub mod tracker;

pub use analyzer::{analyze, Analyzer, Repetition};
pub use error::{FormError, Result};
pub use exercise::Exercise;
pub use feedback::FeedbackRecord;
