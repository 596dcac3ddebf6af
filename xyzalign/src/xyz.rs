//! XMol xyz reader and writer
//!
//! The first two lines (atom count and comment) are kept verbatim as a header
//! and echoed back on output. Every further non-blank line is
//! `label x y z`; extra columns are ignored.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{AlignError, AlignResult};
use crate::point_set::{Point, PointSet};

/// Number of leading lines treated as the header blob
const HEADER_LINES: usize = 2;

/// Suffix appended to the input file stem for the output file
pub const OUTPUT_SUFFIX: &str = "-mod";

/// Loaded xyz file: header blob plus points.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzFile {
    pub header: String,
    pub points: PointSet,
}

/// Read an xyz file from a path
pub fn read_xyz(path: &Path) -> AlignResult<XyzFile> {
    let mut file = File::open(path).map_err(|source| AlignError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|source| AlignError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;

    parse_xyz(&content)
}

/// Parse xyz content from a string
pub fn parse_xyz(content: &str) -> AlignResult<XyzFile> {
    let mut lines = content.lines();

    let mut header: Vec<&str> = lines.by_ref().take(HEADER_LINES).collect();
    // A blank comment line would vanish on output; keep it as a single space.
    if header.len() == HEADER_LINES && header[HEADER_LINES - 1].is_empty() {
        header[HEADER_LINES - 1] = " ";
    }

    let mut points = Vec::new();
    for (offset, line) in lines.enumerate() {
        let line_number = HEADER_LINES + offset + 1;
        if line.trim().is_empty() {
            continue;
        }
        points.push(parse_atom_line(line, line_number)?);
    }

    Ok(XyzFile {
        header: header.join("\n"),
        points: PointSet::new(points),
    })
}

/// Parse an xyz atom line: `label x y z [ignored...]`
fn parse_atom_line(line: &str, line_number: usize) -> AlignResult<Point> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.len() < 4 {
        return Err(AlignError::parse(
            line_number,
            format!("expected 'element x y z', got '{}'", line.trim()),
        ));
    }

    let coord = |i: usize, axis: &str| -> AlignResult<f64> {
        parts[i].parse().map_err(|_| {
            AlignError::parse(
                line_number,
                format!("invalid {axis} coordinate '{}'", parts[i]),
            )
        })
    };

    Ok(Point::new(
        parts[0],
        coord(1, "x")?,
        coord(2, "y")?,
        coord(3, "z")?,
    ))
}

/// Write the header and one fixed-width line per point.
pub fn write_xyz<W: Write>(writer: &mut W, xyz: &XyzFile) -> std::io::Result<()> {
    writeln!(writer, "{}", xyz.header)?;
    for point in xyz.points.points() {
        let p = &point.position;
        writeln!(
            writer,
            "{:<2}  {:12.8}  {:12.8}  {:12.8}",
            point.label, p.x, p.y, p.z
        )?;
    }
    writer.flush()
}

/// Write an xyz file to a path
pub fn write_xyz_file(path: &Path, xyz: &XyzFile) -> AlignResult<()> {
    let to_write_error = |source| AlignError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_write_error)?;
    let mut out = BufWriter::new(file);
    write_xyz(&mut out, xyz).map_err(to_write_error)
}

/// Sibling output path: `dir/name.xyz` becomes `dir/name-mod.xyz`.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match input.extension() {
        Some(ext) => format!("{stem}{OUTPUT_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{OUTPUT_SUFFIX}"),
    };

    input.with_file_name(file_name)
}
