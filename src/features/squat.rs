use super::{point, FeatureVector};
use crate::error::{FormError, Result};
use crate::geometry::{angle, distance};
use crate::pose::{BodyPart, LandmarkSource};

/// スクワット特徴量 21個（計算順）
pub const SQUAT_FEATURES: [&str; 21] = [
    "left_knee_angle",
    "left_hip_angle",
    "left_ankle_angle",
    "right_knee_angle",
    "right_hip_angle",
    "right_ankle_angle",
    "left_hip_to_right_hip",
    "left_torso_height_to_hip_width_ratio",
    "right_torso_height_to_hip_width_ratio",
    "shoulder_width_to_hip_width_ratio",
    "left_thigh_height_to_hip_width_ratio",
    "right_thigh_height_to_hip_width_ratio",
    "left_shin_length_to_hip_width_ratio",
    "right_shin_length_to_hip_width_ratio",
    "left_ankle_to_left_heel_to_hip_width_ratio",
    "left_heel_to_left_foot_index_to_hip_width_ratio",
    "left_foot_index_to_left_ankle_to_hip_width_ratio",
    "right_ankle_to_right_heel_to_hip_width_ratio",
    "right_heel_to_right_foot_index_to_hip_width_ratio",
    "right_foot_index_to_right_ankle_to_hip_width_ratio",
    "knee_width_to_hip_width_ratio",
];

/// 腰幅で割る線分
const RATIO_SEGMENTS: [(BodyPart, BodyPart); 14] = [
    (BodyPart::LeftShoulder, BodyPart::LeftHip),
    (BodyPart::RightShoulder, BodyPart::RightHip),
    (BodyPart::LeftShoulder, BodyPart::RightShoulder),
    (BodyPart::LeftHip, BodyPart::LeftKnee),
    (BodyPart::RightHip, BodyPart::RightKnee),
    (BodyPart::LeftKnee, BodyPart::LeftAnkle),
    (BodyPart::RightKnee, BodyPart::RightAnkle),
    (BodyPart::LeftAnkle, BodyPart::LeftHeel),
    (BodyPart::LeftHeel, BodyPart::LeftFootIndex),
    (BodyPart::LeftFootIndex, BodyPart::LeftAnkle),
    (BodyPart::RightAnkle, BodyPart::RightHeel),
    (BodyPart::RightHeel, BodyPart::RightFootIndex),
    (BodyPart::RightFootIndex, BodyPart::RightAnkle),
    (BodyPart::LeftKnee, BodyPart::RightKnee),
];

/// 関節角度 (端点, 頂点, 端点)
const JOINT_ANGLES: [(BodyPart, BodyPart, BodyPart); 6] = [
    (BodyPart::LeftHip, BodyPart::LeftKnee, BodyPart::LeftAnkle),
    (BodyPart::LeftShoulder, BodyPart::LeftHip, BodyPart::LeftKnee),
    (BodyPart::LeftKnee, BodyPart::LeftAnkle, BodyPart::LeftFootIndex),
    (BodyPart::RightHip, BodyPart::RightKnee, BodyPart::RightAnkle),
    (BodyPart::RightShoulder, BodyPart::RightHip, BodyPart::RightKnee),
    (BodyPart::RightKnee, BodyPart::RightAnkle, BodyPart::RightFootIndex),
];

pub fn extract(capture: &impl LandmarkSource, min_hip_width: f64) -> Result<FeatureVector> {
    let mut values = Vec::with_capacity(SQUAT_FEATURES.len());

    for (a, b, c) in JOINT_ANGLES {
        values.push(angle(point(capture, a)?, point(capture, b)?, point(capture, c)?));
    }

    let hip_width = distance(
        point(capture, BodyPart::LeftHip)?,
        point(capture, BodyPart::RightHip)?,
    );
    // NaN もここで弾く
    if !(hip_width >= min_hip_width) {
        return Err(FormError::DegenerateGeometry { hip_width });
    }
    values.push(hip_width);

    for (a, b) in RATIO_SEGMENTS {
        values.push(distance(point(capture, a)?, point(capture, b)?) / hip_width);
    }

    FeatureVector::new(&SQUAT_FEATURES, values)
}
