//! Align, rotate and translate molecular xyz coordinates.
//!
//! A [`PointSet`] is loaded from an xyz file, transformed in place by
//! [`pipeline::run`] according to a set of [`Directives`], and written back
//! with the original header.

pub mod args;
pub mod error;
pub mod pipeline;
pub mod point_set;
pub mod report;
pub mod selection;
pub mod xyz;

pub use error::{AlignError, AlignResult};
pub use pipeline::{plan, run, Directives, Stage, STAGE_ORDER};
pub use point_set::{Point, PointSet};
pub use report::{PipelineReport, StageRecord};
pub use selection::{select, select_combined, SelectedPoints, Selection, SelectionToken};
pub use xyz::{output_path, parse_xyz, read_xyz, write_xyz, write_xyz_file, XyzFile};
