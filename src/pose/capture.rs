use super::landmark::{BodyPart, Frame, Landmark, LandmarkSource};

/// 1回の反復の最下点で保存したランドマーク部分集合
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    parts: &'static [BodyPart],
    landmarks: Vec<Landmark>,
    /// 保存時のシグナル角度（度）
    pub signal_angle: f64,
    /// 入力ストリーム内のフレーム番号（0始まり、欠損フレームも数える）
    pub frame_index: usize,
}

impl Capture {
    /// フレームから指定部位だけを抜き出す
    pub fn from_frame(
        frame: &Frame,
        parts: &'static [BodyPart],
        signal_angle: f64,
        frame_index: usize,
    ) -> Self {
        let landmarks = parts.iter().map(|&p| *frame.get(p)).collect();
        Self {
            parts,
            landmarks,
            signal_angle,
            frame_index,
        }
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

impl LandmarkSource for Capture {
    fn landmark(&self, part: BodyPart) -> Option<&Landmark> {
        self.parts
            .iter()
            .position(|&p| p == part)
            .map(|i| &self.landmarks[i])
    }
}
