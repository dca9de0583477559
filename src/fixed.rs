/* embcordic | fixed.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Signed fixed-point angles stored in 32-bit words */

/******************************************************************************/

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Neg, Sub};

use crate::ArctanError;

/******************************************************************************/

/// Signed fixed-point layout
///
/// `width` is the total number of bits, sign included, and `frac_bits` the number of bits after
/// the binary point. A raw value `r` stands for `r / 2^frac_bits`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QFormat {
    width: u8,
    frac_bits: u8
}

impl QFormat {
    /// Integer bits (sign included) kept by [`QFormat::new()`]
    pub const INTEGER_BITS: u32 = 3;

    /// The 32-bit reference layout: 3 integer bits and 29 fractional bits
    pub const Q3_29: Self = Self { width: 32, frac_bits: 29 };

    /// Creates a format with [`QFormat::INTEGER_BITS`] integer bits
    ///
    /// The width must be between 4 and 32 bits.
    pub const fn new(width: u32) -> Result<Self, ArctanError> {
        if width <= Self::INTEGER_BITS || width > 32 {
            return Err(ArctanError::InvalidFormat {
                width,
                frac_bits: width.saturating_sub(Self::INTEGER_BITS)
            });
        }
        Self::with_fraction(width, width - Self::INTEGER_BITS)
    }

    /// Creates a format with an explicit number of fractional bits
    ///
    /// At least the sign bit must remain in front of the binary point, which is enough for the
    /// arctangent table since its largest entry is pi / 4.
    pub const fn with_fraction(width: u32, frac_bits: u32) -> Result<Self, ArctanError> {
        if width < 2 || width > 32 || frac_bits == 0 || frac_bits >= width {
            return Err(ArctanError::InvalidFormat { width, frac_bits });
        }
        Ok(Self { width: width as u8, frac_bits: frac_bits as u8 })
    }

    pub const fn width(self) -> u32 {
        self.width as u32
    }

    pub const fn frac_bits(self) -> u32 {
        self.frac_bits as u32
    }

    /// Bits in front of the binary point, sign included
    pub const fn integer_bits(self) -> u32 {
        (self.width - self.frac_bits) as u32
    }

    /// Number of leading table entries that hold at least two ULPs
    ///
    /// atan(2^-i) is close to 2^(frac_bits - i) ULPs, so past `frac_bits` entries the table only
    /// holds rounding noise.
    pub const fn significant_depth(self) -> usize {
        self.frac_bits as usize
    }

    /// Unit in the last place, in radians
    pub fn ulp(self) -> f64 {
        libm::ldexp(1.0, -(self.frac_bits as i32))
    }

    pub(crate) const fn max_raw(self) -> i32 {
        ((1u64 << (self.width - 1)) - 1) as i32
    }

    pub(crate) const fn min_raw(self) -> i32 {
        -(1i64 << (self.width - 1)) as i32
    }

    /// Mask selecting the `width` low bits of a word
    pub const fn mask(self) -> u32 {
        u32::MAX >> (32 - self.width)
    }

    /// Sign-extends the `width` low bits of a word
    pub const fn sign_extend(self, raw: i32) -> i32 {
        let shift = 32 - self.width as u32;
        (raw << shift) >> shift
    }

    /// Rounds a real value to the nearest raw value, ties away from zero
    ///
    /// Out-of-range values saturate to the extreme representable values.
    pub fn encode(self, value: f64) -> i32 {
        let scaled = libm::round(libm::ldexp(value, self.frac_bits as i32));
        if scaled >= self.max_raw() as f64 {
            self.max_raw()
        } else if scaled <= self.min_raw() as f64 {
            self.min_raw()
        } else {
            scaled as i32
        }
    }

    pub fn decode(self, raw: i32) -> f64 {
        libm::ldexp(raw as f64, -(self.frac_bits as i32))
    }
}

impl fmt::Display for QFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}.{}", self.integer_bits(), self.frac_bits)
    }
}

/******************************************************************************/

/// An angle in radians, stored as a fixed-point word
///
/// Arithmetic wraps around within the format width, like an accumulator register would.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedPointAngle {
    raw: i32,
    format: QFormat
}

impl FixedPointAngle {
    pub const fn zero(format: QFormat) -> Self {
        Self { raw: 0, format }
    }

    /// Wraps a raw word, keeping only its `width` low bits
    pub const fn from_raw(raw: i32, format: QFormat) -> Self {
        Self { raw: format.sign_extend(raw), format }
    }

    pub fn from_radians(radians: f64, format: QFormat) -> Self {
        Self { raw: format.encode(radians), format }
    }

    /// Signed raw value
    pub const fn raw(self) -> i32 {
        self.raw
    }

    /// Two's complement bit pattern, truncated to the format width
    pub const fn bits(self) -> u32 {
        self.raw as u32 & self.format.mask()
    }

    pub const fn format(self) -> QFormat {
        self.format
    }

    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    pub fn to_radians(self) -> f64 {
        self.format.decode(self.raw)
    }
}

impl Add for FixedPointAngle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(self.format, rhs.format);
        Self::from_raw(self.raw.wrapping_add(rhs.raw), self.format)
    }
}

impl Sub for FixedPointAngle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        debug_assert_eq!(self.format, rhs.format);
        Self::from_raw(self.raw.wrapping_sub(rhs.raw), self.format)
    }
}

impl Neg for FixedPointAngle {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_raw(self.raw.wrapping_neg(), self.format)
    }
}

/// Angles only compare within the same format
impl PartialOrd for FixedPointAngle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.format == other.format {
            Some(self.raw.cmp(&other.raw))
        } else {
            None
        }
    }
}

/******************************************************************************/
