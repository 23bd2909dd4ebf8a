//! Frame stream → classified repetitions → feedback.

use crate::classifier::{
    BlendedClassifier, ClassificationResult, FormClassifier, ProbabilityClassifier, RuleClassifier,
};
use crate::config::Config;
use crate::error::{FormError, Result};
use crate::exercise::Exercise;
use crate::features::{Deduplicator, FeatureExtractor, FeatureVector};
use crate::feedback::{self, FeedbackRecord};
use crate::pose::{Capture, Frame};
use crate::tracker::RepetitionSegmenter;

/// 確定・判定済みの1回の反復
#[derive(Debug, Clone)]
pub struct Repetition {
    /// セグメンタ上の反復番号（1始まり、重複除去前）
    pub index: usize,
    pub capture: Capture,
    pub features: FeatureVector,
    pub classification: ClassificationResult,
}

/// 1セッション分のストリーミング解析
pub struct Analyzer {
    exercise: Exercise,
    segmenter: RepetitionSegmenter,
    extractor: FeatureExtractor,
    classifier: FormClassifier,
    dedup: Deduplicator,
    repetitions: Vec<Repetition>,
    skipped: usize,
}

impl Analyzer {
    /// スクワットは確率分類器が必須
    pub fn new(
        exercise: Exercise,
        config: &Config,
        model: Option<Box<dyn ProbabilityClassifier>>,
    ) -> Result<Self> {
        let (threshold, classifier) = match exercise {
            Exercise::Squat => {
                let model = model.ok_or(FormError::ClassifierMissing)?;
                let squat = &config.squat;
                let blend = BlendedClassifier::new(squat.profile(), squat.divisor, model);
                (squat.threshold, FormClassifier::Squat(blend))
            }
            Exercise::PushUp => (
                config.pushup.threshold,
                FormClassifier::PushUp(RuleClassifier::new(config.pushup.profile())),
            ),
        };

        Ok(Self {
            exercise,
            segmenter: RepetitionSegmenter::new(exercise, threshold),
            extractor: FeatureExtractor::new(exercise, config.squat.min_hip_width),
            classifier,
            dedup: Deduplicator::new(),
            repetitions: Vec::new(),
            skipped: 0,
        })
    }

    /// 確定した反復数（スキップ・重複分を含む）
    pub fn rep_count(&self) -> usize {
        self.segmenter.count()
    }

    pub fn repetitions(&self) -> &[Repetition] {
        &self.repetitions
    }

    /// 1フレーム処理する。`None` は姿勢推定に失敗したフレーム
    ///
    /// 反復が確定して判定まで済んだときだけ `Some` を返す。
    pub fn push(&mut self, frame: Option<&Frame>) -> Result<Option<&Repetition>> {
        let Some(capture) = self.segmenter.push(frame) else {
            return Ok(None);
        };
        let index = self.segmenter.count();
        tracing::debug!(
            index,
            signal_angle = capture.signal_angle,
            frame = capture.frame_index,
            "repetition closed"
        );

        let features = match self.extractor.extract(&capture) {
            Ok(features) => features,
            Err(FormError::DegenerateGeometry { hip_width }) => {
                tracing::warn!(index, hip_width, "skipping repetition with degenerate geometry");
                self.skipped += 1;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if !self.dedup.insert(&features) {
            tracing::warn!(index, "dropping duplicate repetition");
            self.skipped += 1;
            return Ok(None);
        }

        let classification = self.classifier.classify(&features)?;
        self.repetitions.push(Repetition {
            index,
            capture,
            features,
            classification,
        });
        Ok(self.repetitions.last())
    }

    /// ストリーム終了。未確定の反復は捨ててフィードバックを返す
    pub fn finish(mut self) -> Vec<FeedbackRecord> {
        self.segmenter.finish();
        tracing::info!(
            exercise = %self.exercise,
            closed = self.segmenter.count(),
            classified = self.repetitions.len(),
            skipped = self.skipped,
            "analysis finished"
        );
        feedback::aggregate(self.repetitions.iter().map(|r| &r.classification))
    }
}

/// フレーム列をまとめて解析する
pub fn analyze<I>(
    exercise: Exercise,
    config: &Config,
    model: Option<Box<dyn ProbabilityClassifier>>,
    frames: I,
) -> Result<Vec<FeedbackRecord>>
where
    I: IntoIterator<Item = Option<Frame>>,
{
    let mut analyzer = Analyzer::new(exercise, config, model)?;
    for frame in frames {
        analyzer.push(frame.as_ref())?;
    }
    Ok(analyzer.finish())
}
