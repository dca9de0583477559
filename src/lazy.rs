/* embcordic | lazy.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/******************************************************************************/

use once_cell::sync::OnceCell;

use crate::{ArctanLookupProvider, QFormat};

/******************************************************************************/

/// Provider generated on first use, for formats that are not embedded at build time
///
/// Can live in a `static`. Concurrent first calls to [`LazyArctan::get()`] generate the table
/// only once, and every caller sees the same provider.
/// ```
/// use embcordic::{LazyArctan, QFormat};
///
/// static ANGLES: LazyArctan = LazyArctan::new(QFormat::Q3_29);
///
/// assert_eq!(ANGLES.get().angle_at(1).unwrap().raw(), 0x0ED6_3383);
/// ```
pub struct LazyArctan {
    format: QFormat,
    cell: OnceCell<ArctanLookupProvider>
}

impl LazyArctan {
    pub const fn new(format: QFormat) -> Self {
        Self { format, cell: OnceCell::new() }
    }

    pub fn get(&self) -> &ArctanLookupProvider {
        self.cell.get_or_init(|| ArctanLookupProvider::new(self.format))
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn format(&self) -> QFormat {
        self.format
    }
}

/******************************************************************************/
