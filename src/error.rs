/* embcordic | error.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/******************************************************************************/

use thiserror::Error;

/// Errors reported by the arctangent tables and their lookup provider
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArctanError {
    /// The iteration index is negative or past the populated depth
    #[error("iteration index outside 0..{depth}")]
    OutOfRange { depth: usize },

    /// A generated entry breaks one of the table invariants
    #[error("table entry {index} is not {reason}")]
    Precision { index: usize, reason: &'static str },

    /// The width / fractional bits combination cannot hold the angles
    #[error("unsupported fixed-point format: {width} bits with {frac_bits} fractional bits")]
    InvalidFormat { width: u32, frac_bits: u32 },

    /// The requested depth does not fit in the table
    #[error("depth {depth} exceeds the {max} table slots")]
    InvalidDepth { depth: usize, max: usize },
}
