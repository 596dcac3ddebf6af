//! Structured log of what each pipeline stage did.
//!
//! The pipeline never prints; callers decide what to show from the report.

use std::path::Path;

use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use crate::error::{AlignError, AlignResult};
use crate::pipeline::Stage;

/// Intermediate values of one executed stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "StageEntry")]
pub struct StageRecord {
    pub stage: Stage,
    /// 1-based identifiers the stage's centroid was taken from
    pub ids: Vec<usize>,
    /// Origin centroid (centering) or direction centroid (alignment)
    pub centroid: Option<Vector3<f64>>,
    /// Matrix applied to the points (`R` for rotations, `M` for the explicit matrix)
    pub matrix: Option<Matrix3<f64>>,
    /// Translation vector
    pub offset: Option<Vector3<f64>>,
}

impl StageRecord {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            ids: Vec::new(),
            centroid: None,
            matrix: None,
            offset: None,
        }
    }
}

/// JSON shape of a [`StageRecord`], with row-major matrices.
#[derive(Serialize)]
struct StageEntry {
    stage: Stage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ids: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    centroid: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<[[f64; 3]; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<[f64; 3]>,
}

fn vector_array(v: Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

fn matrix_rows(m: Matrix3<f64>) -> [[f64; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

impl From<StageRecord> for StageEntry {
    fn from(record: StageRecord) -> Self {
        Self {
            stage: record.stage,
            ids: record.ids,
            centroid: record.centroid.map(vector_array),
            matrix: record.matrix.map(matrix_rows),
            offset: record.offset.map(vector_array),
        }
    }
}

/// Every executed stage, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineReport {
    pub stages: Vec<StageRecord>,
}

impl PipelineReport {
    /// Origin subtracted by the centering stage, if it ran
    pub fn origin(&self) -> Option<Vector3<f64>> {
        self.stages
            .iter()
            .find(|r| r.stage == Stage::Center)
            .and_then(|r| r.centroid)
    }

    pub fn to_json(&self) -> String {
        // Plain numbers, strings and arrays only; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> AlignResult<()> {
        std::fs::write(path, self.to_json()).map_err(|source| AlignError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
