/* embcordic | sweep.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Streams a degree sweep through the pipeline and checks it against f64 trigonometry
 *
 * cargo run --example sweep [-- --prescaled]
 * RUST_LOG=trace shows every completed computation.
 */

/******************************************************************************/

use embcordic::{cordic, Config, Cordic, Gain};
use log::{info, warn};

/******************************************************************************/

const TOLERANCE: f64 = 1.0 / 2048.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let gain = if std::env::args().any(|arg| arg == "--prescaled") { Gain::PreScaled } else { Gain::Uncorrected };
    let config = Config::default().gain(gain);
    let mut pipeline = match Cordic::new(config) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let g = match gain {
        Gain::Uncorrected => cordic::gain::<16>(),
        Gain::PreScaled => 1.0
    };
    let scale = config.angle_scale();
    info!("{:?} gain, x0 = {}, expecting G = {:.5}", gain, pipeline.initial_x().raw(), g);

    let degrees: Vec<f64> = (-6..=6).map(|i| i as f64 * 15.0).collect();
    let mut failures = 0;
    for result in pipeline.stream(degrees.iter().map(|&deg| scale.from_degrees(deg))) {
        let theta = scale.to_radians(result.angle);
        let (x_ref, y_ref) = (g * theta.cos(), g * theta.sin());
        let dx = result.x.to_f64() - x_ref;
        let dy = result.y.to_f64() - y_ref;
        let pass = dx.abs() < TOLERANCE && dy.abs() < TOLERANCE;
        println!(
            "{:7.2} deg  z0 = {:6}  x = {:6} ({:+.6})  y = {:6} ({:+.6})  {}",
            scale.to_degrees(result.angle),
            result.angle.raw(),
            result.x.raw(),
            dx,
            result.y.raw(),
            dy,
            if pass { "PASS" } else { "FAIL" }
        );
        if !pass {
            failures += 1;
        }
    }

    if failures > 0 {
        warn!("{} of {} angles outside of tolerance", failures, degrees.len());
        std::process::exit(1);
    }
    info!("all {} angles within {:.6}, {} ticks", degrees.len(), TOLERANCE, pipeline.ticks());
}
