/// スクワットの分類クラス（モデル出力の並び順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquatClass {
    Acceptable = 0,
    AnteriorKnee = 1,
    BentOver = 2,
    KneeValgus = 3,
    KneeVarus = 4,
    HalfSquat = 5,
    Other = 6,
}

impl SquatClass {
    pub const COUNT: usize = 7;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Acceptable),
            1 => Some(Self::AnteriorKnee),
            2 => Some(Self::BentOver),
            3 => Some(Self::KneeValgus),
            4 => Some(Self::KneeVarus),
            5 => Some(Self::HalfSquat),
            6 => Some(Self::Other),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Acceptable => "Acceptable",
            Self::AnteriorKnee => "Anterior Knee",
            Self::BentOver => "Bent Over",
            Self::KneeValgus => "Knee Valgus",
            Self::KneeVarus => "Knee Varus",
            Self::HalfSquat => "Half Squat",
            Self::Other => "Other",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Acceptable => "Normal squat",
            Self::AnteriorKnee => "Knee ahead of toes during exercise",
            Self::BentOver => "Excessive flexing of hip and torso",
            Self::KneeValgus => "Both knees pointing inside during exercise",
            Self::KneeVarus => "Both knees pointing outside during exercise",
            Self::HalfSquat => "Insufficient squatting depth",
            Self::Other => "Probably standing most of the time",
        }
    }
}

/// 腕立て伏せのフォーム不良（評価順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushUpDefect {
    HalfPushUp,
    BentKnee,
    PelvisCurved,
    PelvisDropped,
    Acceptable,
}

impl PushUpDefect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HalfPushUp => "Half Push-Up",
            Self::BentKnee => "Bent Knee",
            Self::PelvisCurved => "Pelvis Curved",
            Self::PelvisDropped => "Pelvis Dropped",
            Self::Acceptable => "Acceptable",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::HalfPushUp => "Not enough bending to the ground.",
            Self::BentKnee => "Excessive bent on the knee.",
            Self::PelvisCurved => "The pelvis is tilted up.",
            Self::PelvisDropped => "The pelvis is bent down.",
            Self::Acceptable => "Normal push-up",
        }
    }
}

/// 判定ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectCode {
    Squat(SquatClass),
    PushUp(PushUpDefect),
}

impl DefectCode {
    pub fn name(&self) -> &'static str {
        match self {
            DefectCode::Squat(c) => c.name(),
            DefectCode::PushUp(d) => d.name(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DefectCode::Squat(c) => c.description(),
            DefectCode::PushUp(d) => d.description(),
        }
    }
}

impl From<SquatClass> for DefectCode {
    fn from(c: SquatClass) -> Self {
        DefectCode::Squat(c)
    }
}

impl From<PushUpDefect> for DefectCode {
    fn from(d: PushUpDefect) -> Self {
        DefectCode::PushUp(d)
    }
}

impl std::fmt::Display for DefectCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
