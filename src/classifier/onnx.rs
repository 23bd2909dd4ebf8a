use anyhow::{Context, Result};
use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;

use super::ProbabilityClassifier;

/// ONNX の学習済みモデルによる確率分類器
///
/// 入力: [1, N] の f32 テンソル（正規化済み特徴量）
/// 出力: [1, C] のクラス確率
pub struct OnnxClassifier {
    session: Session,
    input_name: String,
    output_name: String,
}

impl OnnxClassifier {
    /// ONNXモデルを読み込んで初期化
    pub fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load ONNX model {}", model_path.display()))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .context("Model has no inputs")?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .context("Model has no outputs")?;

        tracing::info!(
            model = %model_path.display(),
            input = %input_name,
            output = %output_name,
            "loaded classifier model"
        );

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }
}

impl ProbabilityClassifier for OnnxClassifier {
    fn classify(&mut self, features: &[f64]) -> Result<Vec<f64>> {
        let data: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let input = Array2::from_shape_vec((1, data.len()), data)?;
        let input_tensor = Tensor::from_array(input)?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .context("Inference failed")?;

        let output: ndarray::ArrayViewD<f32> = outputs[self.output_name.as_str()]
            .try_extract_array()
            .context("Failed to extract output tensor")?;

        Ok(output.iter().map(|&p| p as f64).collect())
    }
}
