/* embcordic | table.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Micro-rotation angle constants */

/******************************************************************************/

use crate::config::AngleScale;
use crate::error::ConfigError;
use crate::fixed::{round_ties_away, Q14};

include!(concat!(env!("OUT_DIR"), "/cordic_tables.rs"));

/******************************************************************************/

/// How exact arctangent values are brought onto the fixed-point grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Round to nearest, ties away from zero
    NearestTiesAway,
}

/// The `N` micro-rotation angles arctan(2^-i), in raw angle codes
///
/// The table is built and validated once, then only read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AngleTable<const N: usize> {
    entries: [Q14; N],
}

impl<const N: usize> AngleTable<N> {
    pub const ROUNDING: Rounding = Rounding::NearestTiesAway;

    /// Pipelines deeper than 16 stages would shift every operand out of the 16-bit word
    const IS_N_VALID: bool = {
        assert!(N >= 1, "The pipeline needs at least one stage");
        assert!(N <= MAX_STAGES, "The pipeline supports at most 16 stages");
        true
    };

    /// Quantizes the exact arctangent values for the given angle encoding
    ///
    /// ```
    /// use embcordic::{AngleScale, AngleTable};
    ///
    /// let table = AngleTable::<16>::new(AngleScale::default()).unwrap();
    /// assert_eq!(table.get(0).raw(), 8192);
    /// assert_eq!(table.get(1).raw(), 4836);
    /// ```
    pub fn new(scale: AngleScale) -> Result<Self, ConfigError> {
        Self::from_entries(Self::quantize(scale))
    }

    fn quantize(scale: AngleScale) -> [i16; N] {
        assert!(Self::IS_N_VALID);
        let per_radian = scale.per_radian();
        let mut entries = [0; N];
        for (entry, theta) in entries.iter_mut().zip(THETA_TABLE.iter()) {
            *entry = round_ties_away(theta * per_radian) as i16;
        }
        entries
    }

    /// Validates a caller-supplied table
    pub fn from_entries(entries: [i16; N]) -> Result<Self, ConfigError> {
        assert!(Self::IS_N_VALID);
        if entries[0] <= 0 {
            return Err(ConfigError::NonPositiveFirstEntry { found: entries[0] });
        }
        for index in 1..N {
            if entries[index] < 0 || entries[index] > entries[index - 1] {
                return Err(ConfigError::NotMonotonic { index });
            }
        }
        Ok(Self {
            entries: entries.map(Q14::from_raw)
        })
    }

    /// Validates a caller-supplied table of unknown length
    pub fn from_slice(entries: &[i16]) -> Result<Self, ConfigError> {
        let entries: [i16; N] = entries.try_into().map_err(|_| ConfigError::TableLength {
            expected: N,
            found: entries.len()
        })?;
        Self::from_entries(entries)
    }

    /// Returns the angle of stage `i`
    ///
    /// Panics if `i` is not a stage index; pipeline stages never ask for one.
    pub fn get(&self, i: usize) -> Q14 {
        self.entries[i]
    }

    pub fn try_get(&self, i: usize) -> Option<Q14> {
        self.entries.get(i).copied()
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub fn as_slice(&self) -> &[Q14] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = Q14> + '_ {
        self.entries.iter().copied()
    }
}

impl<const N: usize> Default for AngleTable<N> {
    /// The table for the default encoding, which always passes validation
    fn default() -> Self {
        Self {
            entries: Self::quantize(AngleScale::default()).map(Q14::from_raw)
        }
    }
}

/******************************************************************************/

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: [i16; 16] = [8192, 4836, 2555, 1297, 651, 326, 163, 81, 41, 20, 10, 5, 3, 1, 1, 0];

    #[test]
    fn test_default_table() {
        let table = AngleTable::<16>::new(AngleScale::default()).unwrap();
        let raw: [i16; 16] = core::array::from_fn(|i| table.get(i).raw());
        assert_eq!(raw, EXPECTED);
        assert_eq!(AngleTable::<16>::default(), table);
    }

    #[test]
    fn test_table_matches_arctan() {
        let table = AngleTable::<16>::default();
        for i in 0..16 {
            let exact = f64::atan(f64::powi(2.0, -(i as i32))) * 16384.0 / core::f64::consts::FRAC_PI_2;
            // Round to nearest never lands further than half an LSB away
            assert!((table.get(i).raw() as f64 - exact).abs() <= 0.5, "entry {i}");
        }
    }

    #[test]
    fn test_rounding_policy() {
        assert_eq!(AngleTable::<16>::ROUNDING, Rounding::NearestTiesAway);
        // arctan(2^-14) * 32768 / pi = 0.636..., truncation would give 0
        assert_eq!(AngleTable::<16>::default().get(14).raw(), 1);
        // arctan(2^-15) = 0.318... LSB rounds down
        assert_eq!(AngleTable::<16>::default().get(15).raw(), 0);
    }

    #[test]
    fn test_monotonic() {
        let table = AngleTable::<16>::default();
        for (a, b) in table.iter().zip(table.iter().skip(1)) {
            assert!(b <= a);
        }
    }

    #[test]
    fn test_shorter_pipeline() {
        let table = AngleTable::<8>::default();
        assert_eq!(table.len(), 8);
        assert_eq!(table.as_slice(), &AngleTable::<16>::default().as_slice()[..8]);
    }

    #[test]
    fn test_other_scale() {
        let table = AngleTable::<16>::new(AngleScale::new(8192).unwrap()).unwrap();
        assert_eq!(table.get(0).raw(), 4096);
        assert_eq!(table.get(1).raw(), 2418);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = AngleTable::<16>::from_slice(&EXPECTED[..15]).unwrap_err();
        assert_eq!(err, ConfigError::TableLength { expected: 16, found: 15 });
        assert!(AngleTable::<16>::from_slice(&EXPECTED).is_ok());
    }

    #[test]
    fn test_rejects_bad_entries() {
        let mut entries = EXPECTED;
        entries[0] = 0;
        assert_eq!(AngleTable::from_entries(entries), Err(ConfigError::NonPositiveFirstEntry { found: 0 }));

        let mut entries = EXPECTED;
        entries[5] = 700;
        assert_eq!(AngleTable::from_entries(entries), Err(ConfigError::NotMonotonic { index: 5 }));

        let mut entries = EXPECTED;
        entries[15] = -1;
        assert_eq!(AngleTable::from_entries(entries), Err(ConfigError::NotMonotonic { index: 15 }));
    }

    #[test]
    fn test_try_get() {
        let table = AngleTable::<4>::default();
        assert_eq!(table.try_get(3).map(Q14::raw), Some(1297));
        assert_eq!(table.try_get(4), None);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range() {
        AngleTable::<16>::default().get(16);
    }
}
