/* embcordic | table.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* CORDIC micro-rotation angles: atan(2^-i) for i = 0..TABLE_LEN */

/******************************************************************************/

use crate::{ArctanError, FixedPointAngle, QFormat};

include!(concat!(env!("OUT_DIR"), "/cordic_tables.rs"));

/// Number of slots in every table, one per value of a 5-bit iteration index
pub const TABLE_LEN: usize = 32;

/******************************************************************************/

/// Immutable table of fixed-point micro-rotation angles
///
/// Slot `i` holds atan(2^-i) rounded to the nearest value of the table format. Every slot is
/// populated: entries that round below one ULP are stored as exactly one ULP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArctanTable {
    format: QFormat,
    raw: [i32; TABLE_LEN]
}

impl ArctanTable {
    /// Q3.29 table computed at build time
    pub const REFERENCE: Self = Self { format: QFormat::Q3_29, raw: ARCTAN_Q3_29 };

    /// Computes the table for any supported format
    pub fn generate(format: QFormat) -> Self {
        let mut raw = [0; TABLE_LEN];
        for (i, slot) in raw.iter_mut().enumerate() {
            let theta = libm::atan(libm::ldexp(1.0, -(i as i32)));
            *slot = format.encode(theta).max(1);
            log::trace!("atan(2^-{}) = {:.12} rad -> {:#010x}", i, theta, *slot);
        }
        log::debug!("generated {} arctan entries in {}", TABLE_LEN, format);
        Self { format, raw }
    }

    /// Wraps externally provided words, e.g. a table extracted from a hardware design
    ///
    /// Nothing is checked here, use [`ArctanTable::validate()`] before trusting the data.
    pub fn from_raw(format: QFormat, raw: [i32; TABLE_LEN]) -> Self {
        Self { format, raw: raw.map(|word| format.sign_extend(word)) }
    }

    pub fn format(&self) -> QFormat {
        self.format
    }

    pub fn raw(&self) -> &[i32; TABLE_LEN] {
        &self.raw
    }

    pub fn get(&self, index: usize) -> Option<FixedPointAngle> {
        self.raw.get(index).map(|&raw| FixedPointAngle::from_raw(raw, self.format))
    }

    pub fn iter(&self) -> impl Iterator<Item = FixedPointAngle> + '_ {
        self.raw.iter().map(|&raw| FixedPointAngle::from_raw(raw, self.format))
    }

    /// Checks the first `depth` entries against the CORDIC requirements
    ///
    /// Each entry must be:
    /// - strictly larger than the next one,
    /// - at most one rounding step above twice the next one, as atan is concave,
    /// - no larger than the sum of all the following entries plus the last one, so that any
    ///   angle within [`ArctanTable::convergence_range()`] can be reached.
    pub fn validate(&self, depth: usize) -> Result<(), ArctanError> {
        if depth > TABLE_LEN {
            return Err(ArctanError::InvalidDepth { depth, max: TABLE_LEN });
        }
        let result = check_invariants(&self.raw[..depth]);
        if let Err(err) = result {
            log::warn!("{} arctan table failed validation: {}", self.format, err);
        }
        result
    }

    /// Largest angle reachable by summing the first `depth` rotations, in radians
    pub fn convergence_range(&self, depth: usize) -> Result<f64, ArctanError> {
        if depth > TABLE_LEN {
            return Err(ArctanError::InvalidDepth { depth, max: TABLE_LEN });
        }
        let sum: i64 = self.raw[..depth].iter().map(|&raw| raw as i64).sum();
        Ok(sum as f64 * self.format.ulp())
    }
}

fn check_invariants(raw: &[i32]) -> Result<(), ArctanError> {
    let Some(&last) = raw.last() else {
        return Ok(());
    };

    // Sum of the entries after the current one, plus the last one
    let mut remaining = raw.iter().map(|&r| r as i64).sum::<i64>() + last as i64;
    for (index, pair) in raw.windows(2).enumerate() {
        let (current, next) = (pair[0] as i64, pair[1] as i64);
        remaining -= current;
        if current <= next {
            return Err(ArctanError::Precision { index, reason: "strictly decreasing" });
        }
        if 2 * next + 1 < current {
            return Err(ArctanError::Precision { index, reason: "within one rounding step of halving" });
        }
        if current > remaining {
            return Err(ArctanError::Precision { index, reason: "covered by the remaining rotations" });
        }
    }
    Ok(())
}

/******************************************************************************/

/// CORDIC scale factor after a number of iterations
///
/// K = prod(1 / sqrt(1 + 2^(-2i))) for i = 0..iterations. Each rotation stretches the vector by
/// 1 / K, so callers usually pre-scale their input by this value. The factor no longer changes
/// in double precision past [`TABLE_LEN`] iterations.
pub fn gain(iterations: usize) -> f64 {
    match iterations {
        0 => 1.0,
        n => K_TABLE[n.min(TABLE_LEN) - 1]
    }
}

/// [`gain()`] rounded to a fixed-point format
pub fn gain_raw(format: QFormat, iterations: usize) -> i32 {
    format.encode(gain(iterations))
}

/******************************************************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_ulps_eq};
    use core::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

    #[test]
    fn test_reference_matches_generator() {
        assert_eq!(ArctanTable::generate(QFormat::Q3_29), ArctanTable::REFERENCE);
    }

    #[test]
    fn test_reference_head_and_tail() {
        let raw = ArctanTable::REFERENCE.raw();
        assert_eq!(raw[0], 0x1921_FB54);
        assert_eq!(raw[1], 0x0ED6_3383);
        assert_eq!(raw[27], 4);
        assert_eq!(raw[28], 2);
        // Below the format resolution
        assert_eq!(&raw[29..], &[1, 1, 1]);
    }

    #[test]
    fn test_validate_reference() {
        let table = ArctanTable::REFERENCE;
        assert_eq!(table.validate(QFormat::Q3_29.significant_depth()), Ok(()));
        assert_eq!(table.validate(0), Ok(()));
        assert_eq!(
            table.validate(TABLE_LEN),
            Err(ArctanError::Precision { index: 29, reason: "strictly decreasing" })
        );
        assert_eq!(table.validate(33), Err(ArctanError::InvalidDepth { depth: 33, max: 32 }));
    }

    #[test]
    fn test_validate_rejects_tampered_tables() {
        let mut raw = *ArctanTable::REFERENCE.raw();
        raw[4] = raw[3];
        let table = ArctanTable::from_raw(QFormat::Q3_29, raw);
        assert_eq!(table.validate(29), Err(ArctanError::Precision { index: 3, reason: "strictly decreasing" }));

        let mut raw = *ArctanTable::REFERENCE.raw();
        raw[2] = raw[1] / 2 - 10;
        let table = ArctanTable::from_raw(QFormat::Q3_29, raw);
        assert_eq!(
            table.validate(29),
            Err(ArctanError::Precision { index: 1, reason: "within one rounding step of halving" })
        );
    }

    #[test]
    fn test_convergence_range() {
        let exact: f64 = (0..29).map(|i| libm::atan(libm::ldexp(1.0, -i))).sum();
        let range = ArctanTable::REFERENCE.convergence_range(29).unwrap();
        assert_abs_diff_eq!(range, exact, epsilon = 29.0 * QFormat::Q3_29.ulp() / 2.0);
        assert!(range > FRAC_PI_2);
        assert_eq!(ArctanTable::REFERENCE.convergence_range(0), Ok(0.0));
    }

    #[test]
    fn test_gain() {
        assert_ulps_eq!(gain(0), 1.0);
        assert_ulps_eq!(gain(1), FRAC_1_SQRT_2);
        assert_ulps_eq!(gain(32), 0.6072529350088814, max_ulps = 4);
        assert_ulps_eq!(gain(1000), gain(32));
        assert_eq!(gain_raw(QFormat::Q3_29, 32), 326_016_437);
    }
}
