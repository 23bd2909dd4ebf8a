use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use formcheck::classifier::ProbabilityClassifier;
use formcheck::config::Config;
use formcheck::{protocol, Analyzer, Exercise};

/// 動画から抽出したランドマーク列を反復ごとに判定する
#[derive(Parser, Debug)]
#[command(name = "formcheck", version = env!("GIT_VERSION"))]
struct Args {
    /// squat | pushup
    exercise: Exercise,

    /// JSON Lines のランドマーク列（1行1フレーム、推定失敗は null）
    landmarks: PathBuf,

    /// 設定ファイル（無ければデフォルト値）
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// スクワット判定用の ONNX モデル
    #[arg(long)]
    model: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load_or_default(&args.config);
    let model = load_model(args.model.as_deref())?;

    let file = File::open(&args.landmarks)
        .with_context(|| format!("Failed to open {}", args.landmarks.display()))?;

    tracing::info!(
        version = env!("GIT_VERSION"),
        exercise = %args.exercise,
        input = %args.landmarks.display(),
        "starting analysis"
    );

    let mut analyzer = Analyzer::new(args.exercise, &config, model)?;
    for frame in protocol::read_frames(BufReader::new(file)) {
        if let Some(rep) = analyzer.push(frame?.as_ref())? {
            let labels: Vec<&str> = rep.classification.labels.iter().map(|l| l.name()).collect();
            tracing::info!(
                rep = rep.index,
                frame = rep.capture.frame_index,
                labels = ?labels,
                "repetition classified"
            );
        }
    }
    let records = analyzer.finish();

    protocol::write_feedback(io::stdout().lock(), &records)?;
    Ok(())
}

#[cfg(feature = "onnx")]
fn load_model(path: Option<&std::path::Path>) -> Result<Option<Box<dyn ProbabilityClassifier>>> {
    use formcheck::classifier::OnnxClassifier;

    match path {
        Some(path) => Ok(Some(Box::new(OnnxClassifier::new(path)?))),
        None => Ok(None),
    }
}

#[cfg(not(feature = "onnx"))]
fn load_model(path: Option<&std::path::Path>) -> Result<Option<Box<dyn ProbabilityClassifier>>> {
    if let Some(path) = path {
        anyhow::bail!(
            "--model {} requires the `onnx` feature",
            path.display()
        );
    }
    Ok(None)
}
