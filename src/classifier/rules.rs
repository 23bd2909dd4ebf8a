use super::{ClassificationResult, DefectCode, PushUpDefect, ReferenceProfile};
use crate::error::{FormError, Result};
use crate::exercise::Exercise;
use crate::features::FeatureVector;

// 0 は首の角度。判定には使わない
const ELBOW: usize = 1;
const HIP: usize = 2;
const KNEE: usize = 3;

/// 腰がこれを超えたら落ちている
const PELVIS_DROP_ANGLE: f64 = 180.0;

/// 腕立て伏せのルール判定
///
/// 各ルールは独立に評価し、該当したものを評価順にすべて返す。
/// どれにも該当しなければ Acceptable。
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    profile: ReferenceProfile,
}

impl RuleClassifier {
    pub fn new(profile: ReferenceProfile) -> Self {
        Self { profile }
    }

    pub fn defects(&self, features: &[f64]) -> Result<Vec<PushUpDefect>> {
        let expected = Exercise::PushUp.feature_count();
        for actual in [features.len(), self.profile.perfect.len()] {
            if actual != expected {
                return Err(FormError::FeatureCount { expected, actual });
            }
        }
        let perfect = &self.profile.perfect;
        let tolerance = self.profile.tolerance;

        let mut defects = Vec::new();
        if (features[ELBOW] - perfect[ELBOW]).abs() > tolerance {
            defects.push(PushUpDefect::HalfPushUp);
        }
        if features[KNEE] < perfect[KNEE] - tolerance {
            defects.push(PushUpDefect::BentKnee);
        }
        if features[HIP] < perfect[HIP] - tolerance {
            defects.push(PushUpDefect::PelvisCurved);
        }
        if features[HIP] > PELVIS_DROP_ANGLE {
            defects.push(PushUpDefect::PelvisDropped);
        }
        if defects.is_empty() {
            defects.push(PushUpDefect::Acceptable);
        }
        Ok(defects)
    }

    pub fn classify(&self, features: &FeatureVector) -> Result<ClassificationResult> {
        let labels = self
            .defects(features.values())?
            .into_iter()
            .map(DefectCode::from)
            .collect();
        Ok(ClassificationResult {
            labels,
            confidence: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PushUpConfig;

    fn classifier() -> RuleClassifier {
        RuleClassifier::new(ReferenceProfile::new(vec![141.1, 52.8, 175.2, 169.6], 10.0))
    }

    #[test]
    fn test_within_tolerance_is_acceptable() {
        // 肘の差 7.2 <= 10
        let defects = classifier().defects(&[141.1, 60.0, 175.2, 169.6]).unwrap();
        assert_eq!(defects, vec![PushUpDefect::Acceptable]);
    }

    #[test]
    fn test_half_pushup() {
        let defects = classifier().defects(&[141.1, 70.0, 175.2, 169.6]).unwrap();
        assert_eq!(defects, vec![PushUpDefect::HalfPushUp]);
        // 曲げすぎも範囲外
        let defects = classifier().defects(&[141.1, 40.0, 175.2, 169.6]).unwrap();
        assert_eq!(defects, vec![PushUpDefect::HalfPushUp]);
    }

    #[test]
    fn test_multiple_defects_in_order() {
        let defects = classifier().defects(&[141.1, 90.0, 150.0, 140.0]).unwrap();
        assert_eq!(
            defects,
            vec![
                PushUpDefect::HalfPushUp,
                PushUpDefect::BentKnee,
                PushUpDefect::PelvisCurved
            ]
        );
    }

    #[test]
    fn test_pelvis_dropped() {
        // 角度は 0〜180 なので実際には起きにくいが、ルールとしては 180 超えで判定
        let defects = classifier().defects(&[141.1, 52.8, 180.5, 169.6]).unwrap();
        assert_eq!(defects, vec![PushUpDefect::PelvisDropped]);
        let defects = classifier().defects(&[141.1, 52.8, 180.0, 169.6]).unwrap();
        assert_eq!(defects, vec![PushUpDefect::Acceptable]);
    }

    #[test]
    fn test_neck_is_not_judged() {
        let defects = classifier().defects(&[60.0, 52.8, 175.2, 169.6]).unwrap();
        assert_eq!(defects, vec![PushUpDefect::Acceptable]);
    }

    #[test]
    fn test_deterministic() {
        let c = classifier();
        let input = [130.0, 75.0, 160.0, 150.0];
        assert_eq!(c.defects(&input).unwrap(), c.defects(&input).unwrap());
    }

    #[test]
    fn test_default_profile() {
        let c = RuleClassifier::new(PushUpConfig::default().profile());
        let defects = c.defects(&[141.1, 60.0, 175.2, 169.6]).unwrap();
        assert_eq!(defects, vec![PushUpDefect::Acceptable]);
    }

    #[test]
    fn test_wrong_length() {
        assert!(matches!(
            classifier().defects(&[1.0, 2.0]),
            Err(FormError::FeatureCount { expected: 4, actual: 2 })
        ));
        assert!(matches!(
            classifier().defects(&[141.1, 52.8, 175.2, 169.6, 0.0]),
            Err(FormError::FeatureCount { expected: 4, actual: 5 })
        ));
    }

    #[test]
    fn test_short_profile_rejected() {
        let c = RuleClassifier::new(ReferenceProfile::new(vec![141.1, 52.8], 10.0));
        assert!(matches!(
            c.defects(&[141.1, 52.8, 175.2, 169.6]),
            Err(FormError::FeatureCount { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn test_classify_result_has_no_confidence() {
        let fv = FeatureVector::new(
            &crate::features::PUSHUP_FEATURES,
            vec![141.1, 70.0, 150.0, 169.6],
        )
        .unwrap();
        let result = classifier().classify(&fv).unwrap();
        assert_eq!(
            result.labels,
            vec![
                DefectCode::PushUp(PushUpDefect::HalfPushUp),
                DefectCode::PushUp(PushUpDefect::PelvisCurved)
            ]
        );
        assert_eq!(result.confidence, None);
    }
}
