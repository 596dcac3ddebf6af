//! Command-line configuration for the `xyzalign` tool.

use std::path::PathBuf;

use clap::Parser;
use nalgebra::{Matrix3, Vector3};

use crate::error::{AlignError, AlignResult};
use crate::pipeline::Directives;
use crate::selection::{Selection, SelectionToken};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "xyzalign",
    about = "Align, rotate and translate xyz coordinates",
    long_about = "Align, rotate and translate xyz coordinates.\n\
        Output is saved as <filename>-mod.<ext> unless --stdout is given.\n\
        Atom number 1 is the first atom in the xyz file."
)]
pub struct Args {
    /// Input file in XMol xyz format, e.g. mymolecule.xyz
    pub filename: PathBuf,

    #[arg(
        short,
        long,
        num_args = 1..,
        value_name = "ATOM",
        help = "Atoms whose centroid becomes the origin, e.g. -o 1 or -o 1 2 3",
        long_help = "Define the origin (0, 0, 0) by one or more atoms. \
            Without this option the centroid of all atoms is used."
    )]
    pub origin: Option<Vec<SelectionToken>>,

    /// Atom(s) defining the x direction, e.g. -x 1 or -x 2 3 4 or -x all
    #[arg(short = 'x', long = "x", num_args = 1.., value_name = "ATOM")]
    pub x: Option<Vec<SelectionToken>>,

    /// Atom(s) defining the y direction, e.g. -y 1 or -y 2 3 4
    #[arg(short = 'y', long = "y", num_args = 1.., value_name = "ATOM")]
    pub y: Option<Vec<SelectionToken>>,

    /// Atom(s) defining the z direction, e.g. -z 1 or -z 2 3 4
    #[arg(short = 'z', long = "z", num_args = 1.., value_name = "ATOM")]
    pub z: Option<Vec<SelectionToken>>,

    /// Rotation about the x, y and z axes in degrees, e.g. -r 45.11 90 0
    #[arg(
        short,
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true
    )]
    pub rotate: Option<Vec<f64>>,

    #[arg(
        short,
        long,
        num_args = 9,
        value_name = "M",
        allow_negative_numbers = true,
        help = "Transformation matrix x1 y1 z1 x2 y2 z2 x3 y3 z3, e.g. -m -1 0 0 0 -1 0 0 0 -1",
        long_help = "Transformation matrix in row-major order. Coordinates are used as row \
            vectors and multiplied by the matrix as given (not transposed). \
            The matrix is not checked for orthogonality."
    )]
    pub matrix: Option<Vec<f64>>,

    /// Translation along x, y and z in input units, e.g. -t 2.11 0 3
    #[arg(
        short,
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true
    )]
    pub translate: Option<Vec<f64>>,

    /// Keep the input frame instead of centering on the origin atoms
    #[arg(long, conflicts_with = "origin")]
    pub keep_origin: bool,

    /// Print selected atoms, centroids and rotation matrices
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the result to stdout instead of saving a file
    #[arg(short, long)]
    pub stdout: bool,

    /// Write the per-stage centroids and matrices as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

fn fixed<const N: usize>(values: &[f64], what: &str) -> AlignResult<[f64; N]> {
    values.try_into().map_err(|_| {
        AlignError::InvalidArgument(format!(
            "{what} takes {N} values, got {}",
            values.len()
        ))
    })
}

fn selection(tokens: &Option<Vec<SelectionToken>>) -> AlignResult<Option<Selection>> {
    tokens.as_deref().map(Selection::from_tokens).transpose()
}

impl Args {
    /// Converts the command line into pipeline directives.
    pub fn directives(&self) -> AlignResult<Directives> {
        let origin = if self.keep_origin {
            None
        } else {
            Some(selection(&self.origin)?.unwrap_or(Selection::AllPoints))
        };

        let matrix = match &self.matrix {
            Some(values) => Some(Matrix3::from_row_slice(&fixed::<9>(values, "--matrix")?)),
            None => None,
        };
        let translate = match &self.translate {
            Some(values) => Some(Vector3::from(fixed::<3>(values, "--translate")?)),
            None => None,
        };
        let rotate = match &self.rotate {
            Some(values) => Some(fixed::<3>(values, "--rotate")?),
            None => None,
        };

        Ok(Directives {
            origin,
            x: selection(&self.x)?,
            y: selection(&self.y)?,
            z: selection(&self.z)?,
            rotate,
            matrix,
            translate,
        })
    }
}
