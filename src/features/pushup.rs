use super::{point, FeatureVector};
use crate::error::Result;
use crate::geometry::angle;
use crate::pose::{pick_more_visible, BodyPart, LandmarkSource};

/// 腕立て伏せ特徴量 4個
pub const PUSHUP_FEATURES: [&str; 4] = ["neck_angle", "elbow_angle", "hip_angle", "knee_angle"];

/// 各関節は左右のうち可視性が高い側を使う
pub fn extract(capture: &impl LandmarkSource) -> Result<FeatureVector> {
    use BodyPart::*;

    let shoulder = pick_more_visible(LeftShoulder, RightShoulder, capture);
    let elbow = pick_more_visible(LeftElbow, RightElbow, capture);
    let wrist = pick_more_visible(LeftWrist, RightWrist, capture);
    let hip = pick_more_visible(LeftHip, RightHip, capture);
    let knee = pick_more_visible(LeftKnee, RightKnee, capture);
    let ankle = pick_more_visible(LeftAnkle, RightAnkle, capture);

    let joint = |a, b, c| -> Result<f64> {
        Ok(angle(point(capture, a)?, point(capture, b)?, point(capture, c)?))
    };

    let values = vec![
        joint(Nose, shoulder, hip)?,
        joint(shoulder, elbow, wrist)?,
        joint(shoulder, hip, knee)?,
        joint(hip, knee, ankle)?,
    ];

    FeatureVector::new(&PUSHUP_FEATURES, values)
}
