// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Plain-text point cloud dump.
//!
//! One point per line as comma-separated `x,y,z`, which most point cloud
//! viewers import directly as `.xyz`. Coordinates are written with the
//! shortest representation that reads back to the same `f32`, so a dump
//! round-trips exactly.
//!
//! # Example
//!
//! ```
//! use edgefirst_lidarsort::{xyz, Point3};
//!
//! let points = vec![Point3::new(1.5, -2.0, 0.25)];
//! let mut buf = Vec::new();
//! xyz::write_xyz_to(&mut buf, &points)?;
//! assert_eq!(buf, b"1.5,-2,0.25\n");
//!
//! let read = xyz::read_xyz_from(buf.as_slice())?;
//! assert_eq!(read, points);
//! # Ok::<(), edgefirst_lidarsort::Error>(())
//! ```

use crate::lidar::{Error, Point3};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};
use tracing::debug;

/// Write `points` to the file at `path`, replacing it.
pub fn write_xyz<P: AsRef<Path>>(path: P, points: &[Point3]) -> Result<(), Error> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_xyz_to(&mut writer, points)?;
    writer.flush()?;
    debug!("wrote {} points to {}", points.len(), path.display());
    Ok(())
}

/// Write `points` to any writer.
pub fn write_xyz_to<W: Write>(mut writer: W, points: &[Point3]) -> Result<(), Error> {
    for p in points {
        writeln!(writer, "{},{},{}", p.x, p.y, p.z)?;
    }
    Ok(())
}

/// Read every point from the file at `path`.
pub fn read_xyz<P: AsRef<Path>>(path: P) -> Result<Vec<Point3>, Error> {
    let path = path.as_ref();
    let points = read_xyz_from(BufReader::new(File::open(path)?))?;
    debug!("read {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Read every point from a buffered reader. Blank lines are skipped.
pub fn read_xyz_from<R: BufRead>(reader: R) -> Result<Vec<Point3>, Error> {
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        points.push(parse_line(trimmed, index + 1)?);
    }
    Ok(points)
}

fn parse_line(line: &str, number: usize) -> Result<Point3, Error> {
    let mut coords = [0.0f32; 3];
    let mut fields = line.split(',');

    for (axis, coord) in ["x", "y", "z"].iter().zip(coords.iter_mut()) {
        let field = fields.next().ok_or_else(|| Error::Parse {
            line: number,
            message: format!("missing {} coordinate", axis),
        })?;
        *coord = field.trim().parse().map_err(|err| Error::Parse {
            line: number,
            message: format!("invalid {} coordinate {:?}: {}", axis, field.trim(), err),
        })?;
    }

    if fields.next().is_some() {
        return Err(Error::Parse {
            line: number,
            message: "expected 3 fields".to_string(),
        });
    }

    Ok(Point3::from(coords))
}
