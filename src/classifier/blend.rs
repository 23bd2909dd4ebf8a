use super::{ClassificationResult, DefectCode, ProbabilityClassifier, ReferenceProfile, SquatClass};
use crate::error::{FormError, Result};
use crate::exercise::Exercise;
use crate::features::FeatureVector;

/// 近さスコアで確率を移すクラス（AnteriorKnee〜KneeVarus）
const REALLOCATED: std::ops::RangeInclusive<usize> = 1..=4;

/// 理想フォームへの近さ
///
/// 各関節について、差が許容誤差以内なら 1、
/// それ以外は `1 - diff / (perfect - tolerance)`（負になりうる、クリップしない）。
/// 平均を `divisor` で割った値を返す。
pub fn closeness_score(features: &[f64], profile: &ReferenceProfile, divisor: f64) -> f64 {
    let n = profile.perfect.len();
    let sum: f64 = profile
        .perfect
        .iter()
        .zip(features)
        .map(|(&perfect, &value)| {
            let diff = (perfect - value).abs();
            if diff <= profile.tolerance {
                1.0
            } else {
                1.0 - diff / (perfect - profile.tolerance)
            }
        })
        .sum();
    sum / n as f64 / divisor
}

/// ベクトル自身の最小・最大で [0, 1] に正規化する
///
/// 全要素が同じ値なら全て 0。
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|&v| if range > 0.0 { (v - min) / range } else { 0.0 })
        .collect()
}

/// フォーム不良クラス 1〜4 から `w` の割合を Acceptable に移す
///
/// HalfSquat と Other はそのまま。
pub fn reallocate(probabilities: &mut [f64], w: f64) {
    for class in REALLOCATED {
        let taken = w * probabilities[class];
        probabilities[class] -= taken;
        probabilities[SquatClass::Acceptable as usize] += taken;
    }
}

/// 最大値の添字（同値なら先頭）
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// スクワット判定: 確率分類器の出力を理想フォームへの近さで補正する
pub struct BlendedClassifier {
    profile: ReferenceProfile,
    divisor: f64,
    model: Box<dyn ProbabilityClassifier>,
}

impl BlendedClassifier {
    pub fn new(profile: ReferenceProfile, divisor: f64, model: Box<dyn ProbabilityClassifier>) -> Self {
        Self {
            profile,
            divisor,
            model,
        }
    }

    pub fn classify(&mut self, features: &FeatureVector) -> Result<ClassificationResult> {
        let values = features.values();
        let expected = Exercise::Squat.feature_count();
        if values.len() != expected {
            return Err(FormError::FeatureCount {
                expected,
                actual: values.len(),
            });
        }

        let w = closeness_score(values, &self.profile, self.divisor);

        let normalized = min_max_normalize(values);
        let mut probabilities = self
            .model
            .classify(&normalized)
            .map_err(FormError::Classifier)?;
        if probabilities.len() != SquatClass::COUNT {
            return Err(FormError::ClassCount {
                expected: SquatClass::COUNT,
                actual: probabilities.len(),
            });
        }

        tracing::debug!(closeness = w, raw = ?probabilities, "squat classifier output");
        reallocate(&mut probabilities, w);

        let best = argmax(&probabilities);
        let class = SquatClass::from_index(best).unwrap_or(SquatClass::Other);
        Ok(ClassificationResult {
            labels: vec![DefectCode::Squat(class)],
            confidence: Some(probabilities[best] * 100.0),
        })
    }
}
