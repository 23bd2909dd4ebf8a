pub mod capture;
pub mod landmark;

pub use capture::Capture;
pub use landmark::{pick_more_visible, BodyPart, Frame, Landmark, LandmarkSource};
