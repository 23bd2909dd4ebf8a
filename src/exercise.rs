use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::pose::BodyPart;

/// 対応しているエクササイズ
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Exercise {
    #[serde(rename = "squat")]
    Squat,
    #[serde(rename = "pushup")]
    PushUp,
}

/// 角度を測る3点 (端点, 頂点, 端点)
pub type JointTriple = (BodyPart, BodyPart, BodyPart);

const SQUAT_CAPTURE: [BodyPart; 12] = [
    BodyPart::LeftShoulder,
    BodyPart::RightShoulder,
    BodyPart::LeftHip,
    BodyPart::RightHip,
    BodyPart::LeftKnee,
    BodyPart::RightKnee,
    BodyPart::LeftAnkle,
    BodyPart::RightAnkle,
    BodyPart::LeftHeel,
    BodyPart::RightHeel,
    BodyPart::LeftFootIndex,
    BodyPart::RightFootIndex,
];

const PUSHUP_CAPTURE: [BodyPart; 13] = [
    BodyPart::Nose,
    BodyPart::LeftShoulder,
    BodyPart::RightShoulder,
    BodyPart::LeftElbow,
    BodyPart::RightElbow,
    BodyPart::LeftWrist,
    BodyPart::RightWrist,
    BodyPart::LeftHip,
    BodyPart::RightHip,
    BodyPart::LeftKnee,
    BodyPart::RightKnee,
    BodyPart::LeftAnkle,
    BodyPart::RightAnkle,
];

impl Exercise {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exercise::Squat => "squat",
            Exercise::PushUp => "pushup",
        }
    }

    /// 反復検出に使う左右の関節 (左, 右)
    ///
    /// スクワット: 膝角度 (hip-knee-ankle)
    /// 腕立て伏せ: 肘角度 (shoulder-elbow-wrist)
    pub fn signal_joints(&self) -> [JointTriple; 2] {
        use BodyPart::*;
        match self {
            Exercise::Squat => [
                (LeftHip, LeftKnee, LeftAnkle),
                (RightHip, RightKnee, RightAnkle),
            ],
            Exercise::PushUp => [
                (LeftShoulder, LeftElbow, LeftWrist),
                (RightShoulder, RightElbow, RightWrist),
            ],
        }
    }

    /// 最下点フレームから保存する部位
    pub fn capture_parts(&self) -> &'static [BodyPart] {
        match self {
            Exercise::Squat => &SQUAT_CAPTURE,
            Exercise::PushUp => &PUSHUP_CAPTURE,
        }
    }

    /// 特徴量ベクトルの長さ
    pub fn feature_count(&self) -> usize {
        match self {
            Exercise::Squat => 21,
            Exercise::PushUp => 4,
        }
    }
}

impl std::fmt::Display for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exercise {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "squat" => Ok(Exercise::Squat),
            "pushup" | "push-up" | "push_up" => Ok(Exercise::PushUp),
            other => Err(format!("unknown exercise: {} (expected squat or pushup)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_sizes() {
        assert_eq!(Exercise::Squat.capture_parts().len(), 12);
        assert_eq!(Exercise::PushUp.capture_parts().len(), 13);
    }

    #[test]
    fn test_signal_joints_share_vertex_side() {
        let [(_, lv, _), (_, rv, _)] = Exercise::Squat.signal_joints();
        assert_eq!(lv, BodyPart::LeftKnee);
        assert_eq!(rv, BodyPart::RightKnee);

        let [(_, lv, _), (_, rv, _)] = Exercise::PushUp.signal_joints();
        assert_eq!(lv, BodyPart::LeftElbow);
        assert_eq!(rv, BodyPart::RightElbow);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("squat".parse::<Exercise>(), Ok(Exercise::Squat));
        assert_eq!("Push-Up".parse::<Exercise>(), Ok(Exercise::PushUp));
        assert!("lunge".parse::<Exercise>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Exercise::PushUp).unwrap(), "\"pushup\"");
        let e: Exercise = serde_json::from_str("\"squat\"").unwrap();
        assert_eq!(e, Exercise::Squat);
    }
}
