/* embcordic | error.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

use thiserror::Error;

/******************************************************************************/

/// Construction-time configuration failure
///
/// These are the only failures the crate can report. Once a pipeline exists, every tick is total.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("angle table has {found} entries, the pipeline has {expected} stages")]
    TableLength { expected: usize, found: usize },

    #[error("first angle table entry must be positive, found {found}")]
    NonPositiveFirstEntry { found: i16 },

    #[error("angle table entry {index} is negative or larger than its predecessor")]
    NotMonotonic { index: usize },

    #[error("quarter turn must be within 1..=16384, found {found}")]
    InvalidScale { found: i16 },
}
