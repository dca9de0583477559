/* embcordic | lib.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Fixed-point arctangent constants for CORDIC angle accumulation */

/******************************************************************************/

#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

/******************************************************************************/

mod error;
mod fixed;
#[cfg(feature = "std")]
mod lazy;
mod table;

pub use error::ArctanError;
pub use fixed::{FixedPointAngle, QFormat};
#[cfg(feature = "std")]
pub use lazy::LazyArctan;
pub use table::{gain, gain_raw, ArctanTable, TABLE_LEN};

/******************************************************************************/

/// Per-iteration rotation angles for a CORDIC engine
///
/// The provider owns an immutable [`ArctanTable`] and only serves its first `depth` entries.
/// On iteration `i`, the engine adds or subtracts [`ArctanLookupProvider::angle_at()`] to its
/// angle accumulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArctanLookupProvider {
    table: ArctanTable,
    depth: usize
}

impl ArctanLookupProvider {
    /// Q3.29 provider backed by the table computed at build time
    ///
    /// It serves indices 0 to 28. The following slots are below the format resolution.
    pub const REFERENCE: Self = Self {
        table: ArctanTable::REFERENCE,
        depth: QFormat::Q3_29.significant_depth()
    };

    /// Generates a table for `format`, serving its significant entries only
    ///
    /// See [`QFormat::significant_depth()`].
    pub fn new(format: QFormat) -> Self {
        let table = ArctanTable::generate(format);
        let depth = format.significant_depth();
        log::debug!("arctan provider ready: {} iterations in {}", depth, format);
        Self { table, depth }
    }

    /// Serves the first `depth` entries of an existing table
    ///
    /// The significant part of the served range must pass [`ArctanTable::validate()`], and every
    /// served word must be a positive angle. Entries saturated to one ULP remain servable.
    pub fn from_table(table: ArctanTable, depth: usize) -> Result<Self, ArctanError> {
        if depth > TABLE_LEN {
            return Err(ArctanError::InvalidDepth { depth, max: TABLE_LEN });
        }
        table.validate(depth.min(table.format().significant_depth()))?;
        if let Some(index) = table.raw()[..depth].iter().position(|&raw| raw <= 0) {
            log::warn!("arctan entry {} is empty, refusing to serve {} entries", index, depth);
            return Err(ArctanError::Precision { index, reason: "a positive angle" });
        }
        Ok(Self { table, depth })
    }

    /// Changes the number of served entries
    ///
    /// Going past [`QFormat::significant_depth()`] exposes entries saturated to one ULP.
    pub fn with_depth(self, depth: usize) -> Result<Self, ArctanError> {
        Self::from_table(self.table, depth)
    }

    /// Rotation angle for iteration `index`, i.e. atan(2^-index)
    ///
    /// Fails with [`ArctanError::OutOfRange`] for negative indices and indices past the depth.
    /// ```
    /// use embcordic::{ArctanError, ArctanLookupProvider};
    ///
    /// let provider = ArctanLookupProvider::REFERENCE;
    /// assert_eq!(provider.angle_at(0).unwrap().bits(), 0x1921_FB54);
    /// assert_eq!(provider.angle_at(-1), Err(ArctanError::OutOfRange { depth: 29 }));
    /// assert_eq!(provider.angle_at(29), Err(ArctanError::OutOfRange { depth: 29 }));
    /// ```
    #[inline]
    pub fn angle_at<I: TryInto<usize>>(&self, index: I) -> Result<FixedPointAngle, ArctanError> {
        index
            .try_into()
            .ok()
            .filter(|&index| index < self.depth)
            .and_then(|index| self.table.get(index))
            .ok_or(ArctanError::OutOfRange { depth: self.depth })
    }

    /// Served angles, in iteration order
    pub fn angles(&self) -> impl Iterator<Item = FixedPointAngle> + '_ {
        self.table.iter().take(self.depth)
    }

    /// Number of served entries
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn table(&self) -> &ArctanTable {
        &self.table
    }

    pub fn format(&self) -> QFormat {
        self.table.format()
    }
}

/******************************************************************************/
