// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

mod args;

use args::Args;
use clap::Parser;
use edgefirst_lidarsort::{
    angle::ALTITUDE_TOLERANCE,
    generate::{generate, shuffle},
    lidar::{check_domain, first_mismatch},
    sort::{is_sorted, sort_points},
    xyz::write_xyz,
    Algorithm, Comparator, Error, Point3, ScanPattern,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::{error, info, info_span, warn};
use tracing_subscriber::FmtSubscriber;

/// Coordinate tolerance when checking sorted output against the reference.
const EPSILON: f32 = 1e-6;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.rust_log)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let pattern = ScanPattern::from(&args);
    if pattern.line_spacing() < ALTITUDE_TOLERANCE.to_degrees() {
        warn!(
            "line spacing {:.4}° is below the altitude tolerance {:.4}°, adjacent lines will merge",
            pattern.line_spacing(),
            ALTITUDE_TOLERANCE.to_degrees()
        );
    }

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let points = generate(&pattern, &mut rng)?;
    let shuffled = shuffle(&points, &mut rng);
    info!(
        "generated {} points ({} lines x {} points, seed {})",
        points.len(),
        pattern.lines,
        pattern.points_per_line,
        args.seed
    );

    if let Err(err) = check_domain(&points) {
        warn!("{}", err);
    }

    let comparators = args.comparators();
    let mut failures = Vec::new();

    for &algorithm in &args.algorithm {
        for &comparator in &comparators {
            let _span = info_span!("benchmark", %algorithm, %comparator).entered();

            for (label, input) in [("sort shuffled", &shuffled), ("sort sorted", &points)] {
                if let Some(index) = run_sort(label, input, &points, comparator, algorithm) {
                    failures.push(index);
                }
            }
        }
    }

    for &comparator in &comparators {
        let start = Instant::now();
        let sorted = is_sorted(&points, comparator);
        let elapsed = start.elapsed();

        if sorted {
            info!(
                "check [{}]: {:.3} ms",
                comparator,
                elapsed.as_secs_f64() * 1000.0
            );
        } else {
            let index = points
                .windows(2)
                .position(|w| comparator.is_less(&w[1], &w[0]))
                .map_or(0, |i| i + 1);
            error!(
                "check [{}]: generated points out of order at index {}",
                comparator, index
            );
            failures.push(index);
        }
    }

    if !args.no_output {
        write_xyz(&args.output, &points)?;
        info!("wrote {}", args.output.display());
    }

    if let Some(&index) = failures.first() {
        error!("{} validation failures", failures.len());
        return Err(Box::new(Error::Mismatch { index }));
    }

    Ok(())
}

/// Sort a copy of `input`, log the elapsed time and check it against
/// `expected`. Returns the index of the first mismatch.
fn run_sort(
    label: &str,
    input: &[Point3],
    expected: &[Point3],
    comparator: Comparator,
    algorithm: Algorithm,
) -> Option<usize> {
    let mut cloud = input.to_vec();

    let start = Instant::now();
    sort_points(&mut cloud, comparator, algorithm);
    let elapsed = start.elapsed();

    match first_mismatch(&cloud, expected, EPSILON) {
        None => {
            info!(
                "{} [{} {}]: {:.3} ms",
                label,
                algorithm,
                comparator,
                elapsed.as_secs_f64() * 1000.0
            );
            None
        }
        Some(index) => {
            error!(
                "{} [{} {}]: output differs at index {} (got {:?}, expected {:?})",
                label,
                algorithm,
                comparator,
                index,
                cloud.get(index),
                expected.get(index)
            );
            Some(index)
        }
    }
}
