/* embcordic | build.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Deepest supported pipeline: every shift amount must stay below the 16-bit word width
const MAX_STAGES: usize = 16;

fn compute_theta_table() -> [f64; MAX_STAGES] {
    (0..MAX_STAGES)
        .map(|i| f64::atan2(1.0, f64::powf(2.0, i as _)))
        .collect::<Vec<f64>>()
        .try_into()
        .unwrap()
}

fn compute_k_table() -> [f64; MAX_STAGES] {
    let mut k = 1.0;
    (0..MAX_STAGES)
        .map(|i| { k *= 1.0 / f64::sqrt(1.0 + f64::powf(2.0, -2.0 * i as f64)); k })
        .collect::<Vec<f64>>()
        .try_into()
        .unwrap()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("cordic_tables.rs");
    let mut f = File::create(dest_path).unwrap();

    writeln!(&mut f, "pub(crate) const MAX_STAGES: usize = {};", MAX_STAGES).unwrap();
    let theta_table = compute_theta_table();
    writeln!(&mut f, "#[allow(clippy::approx_constant)]").unwrap();
    writeln!(&mut f, "pub(crate) const THETA_TABLE: [f64; {}] = {:?};", theta_table.len(), theta_table).unwrap();
    let k_table = compute_k_table();
    writeln!(&mut f, "pub(crate) const K_TABLE: [f64; {}] = {:?};", k_table.len(), k_table).unwrap();
}
