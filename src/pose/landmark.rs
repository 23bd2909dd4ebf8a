use serde::Deserialize;

/// MediaPipe Pose の 33 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BodyPart {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyPart {
    pub const COUNT: usize = 33;

    pub const ALL: [BodyPart; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// MediaPipe 表記の名前 (e.g. "LEFT_HIP")
    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "NOSE",
            Self::LeftEyeInner => "LEFT_EYE_INNER",
            Self::LeftEye => "LEFT_EYE",
            Self::LeftEyeOuter => "LEFT_EYE_OUTER",
            Self::RightEyeInner => "RIGHT_EYE_INNER",
            Self::RightEye => "RIGHT_EYE",
            Self::RightEyeOuter => "RIGHT_EYE_OUTER",
            Self::LeftEar => "LEFT_EAR",
            Self::RightEar => "RIGHT_EAR",
            Self::MouthLeft => "MOUTH_LEFT",
            Self::MouthRight => "MOUTH_RIGHT",
            Self::LeftShoulder => "LEFT_SHOULDER",
            Self::RightShoulder => "RIGHT_SHOULDER",
            Self::LeftElbow => "LEFT_ELBOW",
            Self::RightElbow => "RIGHT_ELBOW",
            Self::LeftWrist => "LEFT_WRIST",
            Self::RightWrist => "RIGHT_WRIST",
            Self::LeftPinky => "LEFT_PINKY",
            Self::RightPinky => "RIGHT_PINKY",
            Self::LeftIndex => "LEFT_INDEX",
            Self::RightIndex => "RIGHT_INDEX",
            Self::LeftThumb => "LEFT_THUMB",
            Self::RightThumb => "RIGHT_THUMB",
            Self::LeftHip => "LEFT_HIP",
            Self::RightHip => "RIGHT_HIP",
            Self::LeftKnee => "LEFT_KNEE",
            Self::RightKnee => "RIGHT_KNEE",
            Self::LeftAnkle => "LEFT_ANKLE",
            Self::RightAnkle => "RIGHT_ANKLE",
            Self::LeftHeel => "LEFT_HEEL",
            Self::RightHeel => "RIGHT_HEEL",
            Self::LeftFootIndex => "LEFT_FOOT_INDEX",
            Self::RightFootIndex => "RIGHT_FOOT_INDEX",
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 単一ランドマーク
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Landmark {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f64,
    /// 正規化されたY座標 (0.0〜1.0)
    pub y: f64,
    /// 可視性スコア (0.0〜1.0)
    pub visibility: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self { x, y, visibility }
    }

    /// 2D座標
    pub fn point(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// 1フレーム分の33ランドマーク
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Landmark>")]
pub struct Frame {
    landmarks: [Landmark; BodyPart::COUNT],
}

impl Frame {
    pub fn new(landmarks: [Landmark; BodyPart::COUNT]) -> Self {
        Self { landmarks }
    }

    pub fn get(&self, part: BodyPart) -> &Landmark {
        &self.landmarks[part.index()]
    }

    /// 指定部位だけを置き換えた新しいフレームを返す
    pub fn with(mut self, part: BodyPart, landmark: Landmark) -> Self {
        self.landmarks[part.index()] = landmark;
        self
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); BodyPart::COUNT],
        }
    }
}

impl TryFrom<Vec<Landmark>> for Frame {
    type Error = String;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, Self::Error> {
        let len = landmarks.len();
        let landmarks: [Landmark; BodyPart::COUNT] = landmarks
            .try_into()
            .map_err(|_| format!("expected {} landmarks, got {}", BodyPart::COUNT, len))?;
        Ok(Self { landmarks })
    }
}

/// 左右ペアのうち可視性の高い方を選ぶ（同値なら左）
pub fn pick_more_visible(left: BodyPart, right: BodyPart, frame: &impl LandmarkSource) -> BodyPart {
    let lv = frame.landmark(left).map(|l| l.visibility);
    let rv = frame.landmark(right).map(|l| l.visibility);
    match (lv, rv) {
        (Some(l), Some(r)) if r > l => right,
        (None, Some(_)) => right,
        _ => left,
    }
}

/// 部位名でランドマークを引ける入れ物
pub trait LandmarkSource {
    fn landmark(&self, part: BodyPart) -> Option<&Landmark>;
}

impl LandmarkSource for Frame {
    fn landmark(&self, part: BodyPart) -> Option<&Landmark> {
        Some(self.get(part))
    }
}
