/* embcordic | build.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const TABLE_LEN: usize = 32;
const FRAC_BITS: i32 = 29;

/// Q3.29 encoding of atan(2^-i), saturated to one ULP
fn compute_arctan_table() -> [i32; TABLE_LEN] {
    (0..TABLE_LEN)
        .map(|i| {
            let theta = f64::atan2(1.0, f64::powi(2.0, i as _));
            let raw = (theta * f64::powi(2.0, FRAC_BITS)).round() as i32;
            raw.max(1)
        })
        .collect::<Vec<i32>>()
        .try_into()
        .unwrap()
}

/// CORDIC gain after i + 1 iterations: prod(1 / sqrt(1 + 2^(-2j))) for j = 0..=i
fn compute_k_table() -> [f64; TABLE_LEN] {
    (0..TABLE_LEN)
        .scan(1.0, |k, i| {
            *k /= f64::sqrt(1.0 + f64::powi(2.0, -2 * i as i32));
            Some(*k)
        })
        .collect::<Vec<f64>>()
        .try_into()
        .unwrap()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("cordic_tables.rs");
    let mut f = File::create(dest_path).unwrap();

    let arctan_table = compute_arctan_table();
    writeln!(&mut f, "const ARCTAN_Q3_29: [i32; {}] = {:?};", arctan_table.len(), arctan_table).unwrap();
    let k_table = compute_k_table();
    writeln!(&mut f, "#[allow(clippy::approx_constant)]").unwrap();
    writeln!(&mut f, "const K_TABLE: [f64; {}] = {:?};", k_table.len(), k_table).unwrap();
}
