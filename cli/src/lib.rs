use facade::AnalysisMode;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Mode '{0}' requires a 'mask' path")]
    MissingMask(String),
    #[error("Mode 'two_mask' requires 'window_mask' and 'facade_mask' paths")]
    MissingTwoMasks,
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// One analysis run, as described by a TOML or JSON job file.
///
/// `mask` is consumed by the combined and overlay modes; `window_mask` and
/// `facade_mask` by the two-mask mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisJob {
    /// The clean building photo: visualization background and, for
    /// overlay mode, the classification baseline.
    pub reference: String,
    pub output_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facade_mask: Option<String>,
    /// TTF/OTF font for the label text on the visualization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default)]
    pub mode: AnalysisMode,
}

impl AnalysisJob {
    /// Load a job from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, JobError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a job from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, JobError> {
        let job: AnalysisJob = toml::from_str(content)?;
        job.validate()?;
        Ok(job)
    }

    /// Load a job from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, JobError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a job from a JSON string
    pub fn from_json(content: &str) -> Result<Self, JobError> {
        let job: AnalysisJob = serde_json::from_str(content)?;
        job.validate()?;
        Ok(job)
    }

    /// Auto-detect file format and load the job
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, JobError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(JobError::UnsupportedFileFormat),
        }
    }

    /// Serialize the job as pretty TOML
    pub fn to_toml(&self) -> Result<String, JobError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Serialize the job as pretty JSON
    pub fn to_json(&self) -> Result<String, JobError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    fn validate(&self) -> Result<(), JobError> {
        if self.mode.is_two_mask() {
            if self.window_mask.is_none() || self.facade_mask.is_none() {
                return Err(JobError::MissingTwoMasks);
            }
        } else if self.mask.is_none() {
            return Err(JobError::MissingMask(self.mode.to_string()));
        }
        Ok(())
    }
}
