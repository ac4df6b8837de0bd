// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use edgefirst_lidarsort::{Algorithm, Comparator, ScanPattern, Variant};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Scan lines per simulated sweep
    #[arg(long, env = "SCAN_LINES", default_value = "128")]
    pub lines: usize,

    /// Returns per scan line
    #[arg(long, env, default_value = "2048")]
    pub points_per_line: usize,

    /// Altitude of the lowest scan line in degrees
    #[arg(long, env, default_value = "-15", allow_hyphen_values = true)]
    pub min_altitude: f32,

    /// Altitude of the highest scan line in degrees
    #[arg(long, env, default_value = "15", allow_hyphen_values = true)]
    pub max_altitude: f32,

    /// Azimuth of the first return on each line in degrees, counter-clockwise
    /// from +X. Keep both azimuth bounds inside (-180, 180) to avoid the seam.
    #[arg(long, env, default_value = "-179.9", allow_hyphen_values = true)]
    pub min_azimuth: f32,

    /// Azimuth of the last return on each line in degrees
    #[arg(long, env, default_value = "179.9", allow_hyphen_values = true)]
    pub max_azimuth: f32,

    /// Minimum return range in meters
    #[arg(long, env, default_value = "3")]
    pub min_range: f32,

    /// Maximum return range in meters
    #[arg(long, env, default_value = "100")]
    pub max_range: f32,

    /// Seed for the point generator and shuffler.
    #[arg(long, env, default_value = "0")]
    pub seed: u64,

    /// Altitude comparison variants to benchmark.
    #[arg(long, env, value_enum, value_delimiter = ',', default_values_t = Variant::ALL)]
    pub altitude: Vec<Variant>,

    /// Azimuth comparison variants to benchmark.
    #[arg(long, env, value_enum, value_delimiter = ',', default_values_t = Variant::ALL)]
    pub azimuth: Vec<Variant>,

    /// Sort algorithms to benchmark.
    #[arg(long, env, value_enum, value_delimiter = ',', default_values_t = Algorithm::ALL)]
    pub algorithm: Vec<Algorithm>,

    /// Write the generated points to this file as comma-separated x,y,z.
    #[arg(long, env, default_value = "points.xyz")]
    pub output: PathBuf,

    /// Skip writing the point dump.
    #[arg(long, env)]
    pub no_output: bool,

    /// Application log level
    #[arg(long, env, default_value = "info")]
    pub rust_log: LevelFilter,
}

impl Args {
    /// Every selected altitude × azimuth pairing.
    pub fn comparators(&self) -> Vec<Comparator> {
        self.altitude
            .iter()
            .flat_map(|&alt| self.azimuth.iter().map(move |&azi| Comparator::new(alt, azi)))
            .collect()
    }
}

impl From<&Args> for ScanPattern {
    fn from(args: &Args) -> Self {
        ScanPattern {
            lines: args.lines,
            points_per_line: args.points_per_line,
            min_altitude: args.min_altitude,
            max_altitude: args.max_altitude,
            min_azimuth: args.min_azimuth,
            max_azimuth: args.max_azimuth,
            min_range: args.min_range,
            max_range: args.max_range,
        }
    }
}
