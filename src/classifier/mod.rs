//! Form classification
//!
//! Push-ups are judged by fixed rules against the reference profile.
//! Squats blend a closeness-to-reference score into the output of an
//! external probability classifier.

mod blend;
mod labels;
#[cfg(feature = "onnx")]
mod onnx;
mod rules;

pub use blend::{closeness_score, min_max_normalize, reallocate, BlendedClassifier};
pub use labels::{DefectCode, PushUpDefect, SquatClass};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use rules::RuleClassifier;

use crate::error::Result;
use crate::features::FeatureVector;

/// 理想フォームの特徴量と許容誤差
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceProfile {
    pub perfect: Vec<f64>,
    pub tolerance: f64,
}

impl ReferenceProfile {
    pub fn new(perfect: Vec<f64>, tolerance: f64) -> Self {
        Self { perfect, tolerance }
    }
}

/// 1回の反復の判定結果
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// 評価順に並んだラベル
    pub labels: Vec<DefectCode>,
    /// 確信度（%）。確率分類器を使った場合のみ
    pub confidence: Option<f64>,
}

/// 正規化済み特徴量ベクトル → クラスごとの確率
///
/// 学習済みモデルはこのトレイトの外側にある。
pub trait ProbabilityClassifier {
    fn classify(&mut self, features: &[f64]) -> anyhow::Result<Vec<f64>>;
}

impl<F> ProbabilityClassifier for F
where
    F: FnMut(&[f64]) -> anyhow::Result<Vec<f64>>,
{
    fn classify(&mut self, features: &[f64]) -> anyhow::Result<Vec<f64>> {
        self(features)
    }
}

/// エクササイズごとの判定器
pub enum FormClassifier {
    PushUp(RuleClassifier),
    Squat(BlendedClassifier),
}

impl FormClassifier {
    pub fn classify(&mut self, features: &FeatureVector) -> Result<ClassificationResult> {
        match self {
            FormClassifier::PushUp(rules) => rules.classify(features),
            FormClassifier::Squat(blend) => blend.classify(features),
        }
    }
}
