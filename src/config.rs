use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::classifier::ReferenceProfile;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub squat: SquatConfig,
    #[serde(default)]
    pub pushup: PushUpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SquatConfig {
    /// 反復判定の膝角度しきい値（度）
    #[serde(default = "default_squat_threshold")]
    pub threshold: f64,
    /// 理想フォームからの許容誤差（度）
    #[serde(default = "default_squat_tolerance")]
    pub tolerance: f64,
    /// 近さスコアの減衰係数
    #[serde(default = "default_squat_divisor")]
    pub divisor: f64,
    /// 理想フォームの関節角度
    /// left_knee, left_hip, left_ankle, right_knee, right_hip, right_ankle
    #[serde(default = "default_squat_perfect")]
    pub perfect: Vec<f64>,
    /// 腰幅の最小値（これ未満は比率特徴量を計算しない）
    #[serde(default = "default_min_hip_width")]
    pub min_hip_width: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PushUpConfig {
    /// 反復判定の肘角度しきい値（度）
    #[serde(default = "default_pushup_threshold")]
    pub threshold: f64,
    #[serde(default = "default_pushup_tolerance")]
    pub tolerance: f64,
    /// neck, elbow, hip, knee
    #[serde(default = "default_pushup_perfect")]
    pub perfect: Vec<f64>,
}

fn default_squat_threshold() -> f64 { 130.0 }
fn default_squat_tolerance() -> f64 { 7.0 }
fn default_squat_divisor() -> f64 { 1.5 }
fn default_min_hip_width() -> f64 { 1e-6 }
fn default_pushup_threshold() -> f64 { 100.0 }
fn default_pushup_tolerance() -> f64 { 10.0 }

fn default_squat_perfect() -> Vec<f64> {
    vec![
        84.87369318857579,
        83.45166654986053,
        153.37894731195783,
        85.30513286618259,
        83.7632826648259,
        179.36188848969115,
    ]
}

fn default_pushup_perfect() -> Vec<f64> {
    vec![
        141.1026047751081,
        52.83349409408348,
        175.2033315138845,
        169.6284784841131,
    ]
}

impl Default for SquatConfig {
    fn default() -> Self {
        Self {
            threshold: default_squat_threshold(),
            tolerance: default_squat_tolerance(),
            divisor: default_squat_divisor(),
            perfect: default_squat_perfect(),
            min_hip_width: default_min_hip_width(),
        }
    }
}

impl Default for PushUpConfig {
    fn default() -> Self {
        Self {
            threshold: default_pushup_threshold(),
            tolerance: default_pushup_tolerance(),
            perfect: default_pushup_perfect(),
        }
    }
}

impl SquatConfig {
    pub fn profile(&self) -> ReferenceProfile {
        ReferenceProfile::new(self.perfect.clone(), self.tolerance)
    }
}

impl PushUpConfig {
    pub fn profile(&self) -> ReferenceProfile {
        ReferenceProfile::new(self.perfect.clone(), self.tolerance)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 読めなければデフォルト値
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}; using default config", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.squat.perfect.len() != 6 {
            anyhow::bail!(
                "squat.perfect must have 6 joint angles, got {}",
                self.squat.perfect.len()
            );
        }
        if self.pushup.perfect.len() != 4 {
            anyhow::bail!(
                "pushup.perfect must have 4 joint angles, got {}",
                self.pushup.perfect.len()
            );
        }
        if !(self.squat.divisor.is_finite() && self.squat.divisor != 0.0) {
            anyhow::bail!("squat.divisor must be finite and non-zero");
        }
        if !(self.squat.min_hip_width > 0.0 && self.squat.min_hip_width.is_finite()) {
            anyhow::bail!(
                "squat.min_hip_width must be a positive finite number, got {}",
                self.squat.min_hip_width
            );
        }
        let finite = [
            ("squat.threshold", self.squat.threshold),
            ("squat.tolerance", self.squat.tolerance),
            ("pushup.threshold", self.pushup.threshold),
            ("pushup.tolerance", self.pushup.tolerance),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                anyhow::bail!("{} must be finite, got {}", name, value);
            }
        }
        if self.squat.perfect.iter().chain(&self.pushup.perfect).any(|v| !v.is_finite()) {
            anyhow::bail!("reference angles must be finite");
        }
        Ok(())
    }
}
