use serde::{Deserialize, Serialize};

use crate::classifier::ClassificationResult;

/// 1回の反復に対する外部向けフィードバック
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// 1始まりの反復番号
    pub ex_number: usize,
    /// 判定名（複数ならカンマ区切り）
    pub class: String,
    /// 修正内容（複数ならスペース区切り）
    pub correction: String,
    /// 確信度（%）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl FeedbackRecord {
    pub fn from_result(ex_number: usize, result: &ClassificationResult) -> Self {
        let class = result
            .labels
            .iter()
            .map(|l| l.name())
            .collect::<Vec<_>>()
            .join(", ");
        let correction = result
            .labels
            .iter()
            .map(|l| l.description())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            ex_number,
            class,
            correction,
            confidence: result.confidence,
        }
    }
}

/// 判定結果の列をフィードバックの列に変換する
pub fn aggregate<'a, I>(results: I) -> Vec<FeedbackRecord>
where
    I: IntoIterator<Item = &'a ClassificationResult>,
{
    results
        .into_iter()
        .enumerate()
        .map(|(i, r)| FeedbackRecord::from_result(i + 1, r))
        .collect()
}
