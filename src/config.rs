//! Harness configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::KatResult;

/// Settings for one harness run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Vector document to run
    pub vectors: Option<PathBuf>,

    /// Report mismatches as warnings and trace every command
    pub debug: bool,

    /// Where to write the JSON report, if anywhere
    pub report: Option<PathBuf>,
}

impl HarnessConfig {
    pub fn from_json_str(json: &str) -> KatResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> KatResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Default log filter for a run with these settings
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    /// Overlay explicitly given settings on top of this configuration
    pub fn merge(mut self, vectors: Option<PathBuf>, debug: bool, report: Option<PathBuf>) -> Self {
        if vectors.is_some() {
            self.vectors = vectors;
        }
        if report.is_some() {
            self.report = report;
        }
        self.debug |= debug;
        self
    }
}
