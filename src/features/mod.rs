//! Capture → 固定長特徴量ベクトル

pub mod pushup;
pub mod squat;

use std::collections::HashSet;

use crate::error::{FormError, Result};
use crate::exercise::Exercise;
use crate::pose::{BodyPart, LandmarkSource};

pub use pushup::PUSHUP_FEATURES;
pub use squat::SQUAT_FEATURES;

/// 名前付き特徴量ベクトル（順序固定）
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: &'static [&'static str],
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(names: &'static [&'static str], values: Vec<f64>) -> Result<Self> {
        if names.len() != values.len() {
            return Err(FormError::FeatureCount {
                expected: names.len(),
                actual: values.len(),
            });
        }
        Ok(Self { names, values })
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 名前で値を取得
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// ビット単位の同一性キー
    fn key(&self) -> Vec<u64> {
        self.values.iter().map(|v| v.to_bits()).collect()
    }
}

/// Capture から特徴量を計算する
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    exercise: Exercise,
    min_hip_width: f64,
}

impl FeatureExtractor {
    pub fn new(exercise: Exercise, min_hip_width: f64) -> Self {
        Self {
            exercise,
            min_hip_width,
        }
    }

    pub fn extract(&self, capture: &impl LandmarkSource) -> Result<FeatureVector> {
        match self.exercise {
            Exercise::Squat => squat::extract(capture, self.min_hip_width),
            Exercise::PushUp => pushup::extract(capture),
        }
    }
}

/// 完全に同じ特徴量ベクトルを2回目以降落とす
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<Vec<u64>>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初出なら true
    pub fn insert(&mut self, features: &FeatureVector) -> bool {
        self.seen.insert(features.key())
    }
}

fn point(source: &impl LandmarkSource, part: BodyPart) -> Result<[f64; 2]> {
    source
        .landmark(part)
        .map(|l| l.point())
        .ok_or(FormError::MissingLandmark(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_length_checked() {
        assert!(FeatureVector::new(&PUSHUP_FEATURES, vec![1.0, 2.0]).is_err());
        let fv = FeatureVector::new(&PUSHUP_FEATURES, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(fv.len(), 4);
        assert_eq!(fv.get("elbow_angle"), Some(2.0));
        assert_eq!(fv.get("missing"), None);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let a = FeatureVector::new(&PUSHUP_FEATURES, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = FeatureVector::new(&PUSHUP_FEATURES, vec![1.0, 2.0, 3.0, 5.0]).unwrap();
        let mut dedup = Deduplicator::new();
        let kept: Vec<bool> = [&a, &a, &b, &a].iter().map(|v| dedup.insert(v)).collect();
        assert_eq!(kept, vec![true, false, true, false]);
    }

    #[test]
    fn test_dedup_treats_identical_nan_as_duplicate() {
        let a = FeatureVector::new(&PUSHUP_FEATURES, vec![f64::NAN, 2.0, 3.0, 4.0]).unwrap();
        let mut dedup = Deduplicator::new();
        assert!(dedup.insert(&a));
        assert!(!dedup.insert(&a));
    }
}
