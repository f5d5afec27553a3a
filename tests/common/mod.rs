//! Shared test helpers for integration tests
//!
//! Fixtures cover both control chart layouts, the response envelopes and the
//! single-section payloads the analysis engine sends.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Scratch directory with an explicit config, so host config never leaks in
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_config("output:\n  color: false\n")
    }

    pub fn with_config(yaml: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.yaml"), yaml).unwrap();
        Self { dir }
    }

    /// `spc` command running inside the workspace
    pub fn spc(&self) -> Command {
        let mut cmd = spc();
        cmd.current_dir(self.dir.path())
            .env("SPC_CONFIG", self.dir.path().join("config.yaml"))
            .env_remove("SPC_LSL")
            .env_remove("SPC_USL")
            .env_remove("SPC_LOG");
        cmd
    }

    /// Write a snapshot file and return its path
    pub fn snapshot(&self, name: &str, body: &Value) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, serde_json::to_string_pretty(body).unwrap()).unwrap();
        path
    }

    pub fn raw_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}

/// Helper to get an spc command
pub fn spc() -> Command {
    Command::new(cargo::cargo_bin!("spc"))
}

pub fn descriptive_stats() -> Value {
    json!({
        "count": 125,
        "mean": 100.12,
        "median": 100.05,
        "standardDeviation": 5.03,
        "variance": 25.3,
        "range": 31.21,
        "minimum": 84.52,
        "maximum": 115.73,
        "q1": 96.8,
        "q3": 103.4
    })
}

pub fn capability_indices() -> Value {
    json!({
        "lsl": 85.0, "usl": 115.0,
        "cp": 0.99, "cpk": 0.98, "cpl": 1.0, "cpu": 0.98,
        "pp": 0.97, "ppk": 0.96, "k": 0.008
    })
}

/// Flat control chart: group 2 breaks the X-bar UCL, group 3 the R UCL
pub fn flat_control_chart() -> Value {
    json!({
        "means": [99.5, 107.2, 100.4, 98.9, 100.8],
        "ranges": [10.2, 11.0, 25.4, 9.8, 12.1],
        "clMean": 100.12, "uclMean": 106.5, "lclMean": 93.7,
        "clRange": 11.1, "uclRange": 23.5, "lclRange": 0.0,
        "isControlled": false
    })
}

/// The same groups in the nested `xbarChart` / `rChart` layout
pub fn nested_control_chart() -> Value {
    json!({
        "isControlled": false,
        "xbarChart": {
            "centerLine": 100.12, "upperControlLimit": 106.5, "lowerControlLimit": 93.7,
            "values": [99.5, 107.2, 100.4, 98.9, 100.8]
        },
        "rChart": {
            "centerLine": 11.1, "upperControlLimit": 23.5, "lowerControlLimit": 0.0,
            "values": [10.2, 11.0, 25.4, 9.8, 12.1]
        }
    })
}

pub fn normality_test() -> Value {
    json!({
        "method": "Anderson-Darling",
        "statistic": 0.31,
        "pValue": 0.54,
        "isNormal": true,
        "conclusion": "Data is consistent with a normal distribution"
    })
}

/// Complete analysis in the `{success, analysis}` envelope
pub fn full_analysis() -> Value {
    json!({
        "success": true,
        "analysis": {
            "descriptiveStats": descriptive_stats(),
            "normalityTest": normality_test(),
            "capabilityIndices": capability_indices(),
            "controlChart": flat_control_chart(),
            "meanTest": {
                "sampleMean": 100.12, "expectedMean": 100.0, "alpha": 0.05,
                "tStatistic": 0.27, "pValue": 0.79, "testResult": true,
                "conclusion": "No significant difference from the target mean"
            },
            "processAssessment": {
                "stabilityStatus": "unstable",
                "capabilityLevel": "marginal",
                "recommendations": "Investigate group 2"
            },
            "histogram": [2, 5, 11, 19, 26, 24, 18, 12, 6, 2]
        }
    })
}

/// A well-centered capable process that is in control
pub fn capable_analysis() -> Value {
    json!({
        "success": true,
        "analysis": {
            "descriptiveStats": {
                "count": 100, "mean": 100.0, "stdDev": 2.5,
                "min": 93.0, "max": 107.0
            },
            "normalityTest": {"pValue": 0.6, "isNormal": true},
            "capabilityIndices": {"lsl": 85, "usl": 115, "cp": 2.0, "cpk": 2.0},
            "controlChart": {
                "means": [99.8, 100.1, 100.3],
                "ranges": [4.0, 5.0, 4.5],
                "clMean": 100.0, "uclMean": 104.0, "lclMean": 96.0,
                "clRange": 4.5, "uclRange": 9.5, "lclRange": 0.0,
                "isControlled": true
            },
            "histogram": [3, 10, 20, 10, 3]
        }
    })
}

pub fn failure_envelope(message: &str) -> Value {
    json!({"success": false, "error": message})
}
