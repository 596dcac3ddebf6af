//! Align, rotate and translate xyz coordinates
//!
//! Reads an XMol xyz file, centers it on the origin atoms, aligns the selected
//! atoms to the coordinate axes, applies any rotation, matrix and translation,
//! and writes `<name>-mod.<ext>` next to the input (or to stdout with `-s`).

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};
use nalgebra::{Matrix3, Vector3};

use xyzalign::args::Args;
use xyzalign::{
    output_path, read_xyz, write_xyz, write_xyz_file, AlignError, PipelineReport, PointSet, Stage,
};

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn format_vector(v: &Vector3<f64>) -> String {
    format!("{:.4} {:.4} {:.4}", v.x, v.y, v.z)
}

fn format_matrix(m: &Matrix3<f64>) -> String {
    m.row_iter()
        .map(|row| format!("[{:.4} {:.4} {:.4}]", row[0], row[1], row[2]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Verbose listing of every executed stage.
fn log_report(report: &PipelineReport, points: &PointSet) {
    for record in &report.stages {
        match record.stage {
            Stage::Center => {
                info!("selected atom(s) for origin: {:?}", record.ids);
            }
            Stage::AlignX | Stage::AlignY | Stage::AlignZ => {
                let labels: Vec<String> = record
                    .ids
                    .iter()
                    .filter_map(|&id| points.get(id).map(|p| format!("{id}:{}", p.label)))
                    .collect();
                info!(
                    "selected atom(s) for {} direction: {}",
                    record.stage,
                    labels.join(" ")
                );
            }
            _ => {}
        }

        if let Some(centroid) = &record.centroid {
            info!("centroid {}: {}", record.stage, format_vector(centroid));
        }
        if let Some(matrix) = &record.matrix {
            info!("rotation matrix {}: {}", record.stage, format_matrix(matrix));
        }
        if let Some(offset) = &record.offset {
            info!("translation: {}", format_vector(offset));
        }
    }

    info!("transformed coordinates:");
    for (i, p) in points.points().iter().enumerate() {
        info!("{:>4} {:<2} {}", i + 1, p.label, format_vector(&p.position));
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut xyz = read_xyz(&args.filename)?;
    info!(
        "read {} atoms from {}",
        xyz.points.len(),
        args.filename.display()
    );

    let directives = args.directives()?;
    let report = xyzalign::run(&mut xyz.points, &directives)?;

    if args.verbose {
        log_report(&report, &xyz.points);
    }

    if args.stdout {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_xyz(&mut out, &xyz)
            .and_then(|_| out.flush())
            .map_err(|source| AlignError::OutputWrite {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
    } else {
        let path = output_path(&args.filename);
        write_xyz_file(&path, &xyz)?;
        info!("saved {}", path.display());
    }

    if let Some(path) = &args.report {
        report
            .save_to_file(path)
            .with_context(|| "failed to save stage report")?;
    }

    Ok(())
}
