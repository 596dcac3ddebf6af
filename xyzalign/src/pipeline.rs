//! The alignment pipeline.
//!
//! Directives are applied to the point set in a fixed order, listed in
//! [`STAGE_ORDER`]. Each stage reads the positions left by the one before, so
//! the order cannot be changed without changing the result:
//!
//! 1. center on the origin selection
//! 2. align the x selection to (1, 0, 0)
//! 3. align the y selection to (0, 1, 0)
//! 4. align the z selection to (0, 0, 1)
//! 5. align x + y + z combined to (1, 1, 1), when all three are given
//! 6. align x + y combined to (1, 1, 0), when both are given
//! 7. re-align y to (0, 1, 0)
//! 8. re-align x to (1, 0, 0)
//! 9. rotate by the x/y/z angles
//! 10. apply the explicit matrix (`points · M`, not transposed)
//! 11. translate
//!
//! Stages 7 and 8 undo the drift that 5 and 6 introduce on the single-axis
//! alignments. The z selection is not re-aligned afterwards, so with all three
//! selections only x and y are guaranteed to lie on their axes.

use std::fmt;

use align_math::{rotation_between, rotation_from_angles};
use log::{debug, warn};
use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use crate::error::AlignResult;
use crate::point_set::PointSet;
use crate::report::{PipelineReport, StageRecord};
use crate::selection::{select, select_combined, Selection};

/// What to do to the point set. Absent fields skip their stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Directives {
    /// Selection whose centroid becomes (0, 0, 0); `None` keeps the input frame
    pub origin: Option<Selection>,
    pub x: Option<Selection>,
    pub y: Option<Selection>,
    pub z: Option<Selection>,
    /// Counterclockwise angles about x, y and z, in degrees
    pub rotate: Option<[f64; 3]>,
    /// Matrix right-multiplied onto row-vector points
    pub matrix: Option<Matrix3<f64>>,
    pub translate: Option<Vector3<f64>>,
}

impl Default for Directives {
    fn default() -> Self {
        Self {
            origin: Some(Selection::AllPoints),
            x: None,
            y: None,
            z: None,
            rotate: None,
            matrix: None,
            translate: None,
        }
    }
}

impl Directives {
    /// Directives that leave every coordinate untouched.
    pub fn identity() -> Self {
        Self {
            origin: None,
            ..Self::default()
        }
    }

    fn selections(&self) -> impl Iterator<Item = &Selection> {
        [&self.origin, &self.x, &self.y, &self.z]
            .into_iter()
            .flatten()
    }
}

/// One step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Center,
    AlignX,
    AlignY,
    AlignZ,
    AlignXyz,
    AlignXy,
    RealignY,
    RealignX,
    Rotate,
    Matrix,
    Translate,
}

/// Execution order of all stages.
pub const STAGE_ORDER: [Stage; 11] = [
    Stage::Center,
    Stage::AlignX,
    Stage::AlignY,
    Stage::AlignZ,
    Stage::AlignXyz,
    Stage::AlignXy,
    Stage::RealignY,
    Stage::RealignX,
    Stage::Rotate,
    Stage::Matrix,
    Stage::Translate,
];

impl Stage {
    /// Whether the directives ask for this stage.
    pub fn is_triggered(&self, directives: &Directives) -> bool {
        let d = directives;
        match self {
            Stage::Center => d.origin.is_some(),
            Stage::AlignX | Stage::RealignX => d.x.is_some(),
            Stage::AlignY | Stage::RealignY => d.y.is_some(),
            Stage::AlignZ => d.z.is_some(),
            Stage::AlignXyz => d.x.is_some() && d.y.is_some() && d.z.is_some(),
            Stage::AlignXy => d.x.is_some() && d.y.is_some(),
            Stage::Rotate => d.rotate.is_some(),
            Stage::Matrix => d.matrix.is_some(),
            Stage::Translate => d.translate.is_some(),
        }
    }

    /// Axis direction an alignment stage rotates its selection onto.
    pub fn target_axis(&self) -> Option<Vector3<f64>> {
        match self {
            Stage::AlignX | Stage::RealignX => Some(Vector3::new(1.0, 0.0, 0.0)),
            Stage::AlignY | Stage::RealignY => Some(Vector3::new(0.0, 1.0, 0.0)),
            Stage::AlignZ => Some(Vector3::new(0.0, 0.0, 1.0)),
            Stage::AlignXyz => Some(Vector3::new(1.0, 1.0, 1.0)),
            Stage::AlignXy => Some(Vector3::new(1.0, 1.0, 0.0)),
            Stage::Center | Stage::Rotate | Stage::Matrix | Stage::Translate => None,
        }
    }

    /// Selections an alignment stage takes its centroid from.
    fn alignment_selections<'a>(&self, d: &'a Directives) -> Vec<&'a Selection> {
        let fields = match self {
            Stage::AlignX | Stage::RealignX => vec![&d.x],
            Stage::AlignY | Stage::RealignY => vec![&d.y],
            Stage::AlignZ => vec![&d.z],
            Stage::AlignXyz => vec![&d.x, &d.y, &d.z],
            Stage::AlignXy => vec![&d.x, &d.y],
            Stage::Center | Stage::Rotate | Stage::Matrix | Stage::Translate => vec![],
        };
        fields.into_iter().filter_map(Option::as_ref).collect()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Center => "origin",
            Stage::AlignX => "x",
            Stage::AlignY => "y",
            Stage::AlignZ => "z",
            Stage::AlignXyz => "xyz",
            Stage::AlignXy => "xy",
            Stage::RealignY => "y 2nd",
            Stage::RealignX => "x 2nd",
            Stage::Rotate => "angles",
            Stage::Matrix => "matrix",
            Stage::Translate => "translate",
        };
        write!(f, "{name}")
    }
}

/// Stages the directives trigger, in execution order.
pub fn plan(directives: &Directives) -> Vec<Stage> {
    STAGE_ORDER
        .iter()
        .copied()
        .filter(|stage| stage.is_triggered(directives))
        .collect()
}

/// Applies `directives` to `set` in place.
///
/// Every selection is checked before the first stage runs, so on error the
/// point set is left exactly as it was.
pub fn run(set: &mut PointSet, directives: &Directives) -> AlignResult<PipelineReport> {
    for selection in directives.selections() {
        selection.resolve(set)?;
    }

    let mut report = PipelineReport::default();
    for stage in plan(directives) {
        let record = run_stage(stage, set, directives)?;
        debug!("stage {stage} done");
        report.stages.push(record);
    }

    Ok(report)
}

fn run_stage(stage: Stage, set: &mut PointSet, d: &Directives) -> AlignResult<StageRecord> {
    let mut record = StageRecord::new(stage);

    match stage {
        Stage::Center => {
            if let Some(origin) = &d.origin {
                let picked = select(set, origin)?;
                set.center_on(&picked.centroid);
                record.ids = picked.ids;
                record.centroid = Some(picked.centroid);
            }
        }
        Stage::AlignX
        | Stage::AlignY
        | Stage::AlignZ
        | Stage::AlignXyz
        | Stage::AlignXy
        | Stage::RealignY
        | Stage::RealignX => {
            let target = stage.target_axis().unwrap_or_else(Vector3::zeros);
            let picked = select_combined(set, &stage.alignment_selections(d))?;
            if picked.centroid.norm() == 0.0 {
                warn!("selection for {stage} lies on the origin; direction undefined, skipping rotation");
            }
            let rotation = rotation_between(&picked.centroid, &target);
            set.apply_rotation(&rotation);
            record.ids = picked.ids;
            record.centroid = Some(picked.centroid);
            record.matrix = Some(rotation);
        }
        Stage::Rotate => {
            if let Some([ax, ay, az]) = d.rotate {
                let rotation = rotation_from_angles(ax, ay, az);
                set.apply_rotation(&rotation);
                record.matrix = Some(rotation);
            }
        }
        Stage::Matrix => {
            if let Some(matrix) = &d.matrix {
                set.apply_matrix(matrix);
                record.matrix = Some(*matrix);
            }
        }
        Stage::Translate => {
            if let Some(offset) = &d.translate {
                set.translate(offset);
                record.offset = Some(*offset);
            }
        }
    }

    Ok(record)
}
