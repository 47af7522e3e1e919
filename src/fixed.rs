/* embcordic | fixed.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Q2.14 fixed-point word */

/******************************************************************************/

use core::fmt;
use core::ops::{Add, Neg, Sub};

/******************************************************************************/

/// Number of fractional bits
pub const FRAC_BITS: u32 = 14;

/// 16-bit signed fixed-point value in Q2.14 format
///
/// One sign bit, one integer bit and 14 fractional bits, giving the range [-2.0, 2.0).
/// All arithmetic wraps modulo 2^16 like a fixed-width binary adder would; nothing saturates.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Q14(i16);

impl Q14 {
    /// 0.0
    pub const ZERO: Self = Self(0);
    /// 1.0
    pub const ONE: Self = Self(1 << FRAC_BITS);
    /// -2.0
    pub const MIN: Self = Self(i16::MIN);
    /// 1.99993896484375
    pub const MAX: Self = Self(i16::MAX);

    const SCALE: f64 = (1 << FRAC_BITS) as f64;

    /// Wraps a raw two's complement code
    pub const fn from_raw(raw: i16) -> Self {
        Self(raw)
    }

    /// Returns the raw two's complement code
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Quantizes a real value to the nearest code
    ///
    /// Ties are rounded away from zero. Values outside of the representable range wrap.
    pub fn from_f64(value: f64) -> Self {
        Self(round_ties_away(value * Self::SCALE) as i16)
    }

    /// Returns the real value represented by this code
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE
    }

    pub const fn wrapping_add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }

    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }

    /// Note that -(-2.0) wraps back to -2.0
    pub const fn wrapping_neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }

    /// Arithmetic (sign-extending) right shift
    ///
    /// Shifting by the word width or more leaves only the sign fill: 0 or -1 LSB.
    pub const fn asr(self, shift: u32) -> Self {
        if shift >= i16::BITS {
            Self(self.0 >> (i16::BITS - 1))
        } else {
            Self(self.0 >> shift)
        }
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

/// Rounds to the nearest integer, ties away from zero
///
/// `f64::round()` lives in std; the `as` cast truncates toward zero, so offsetting by one half
/// first gives the same result without libm. Out of range values saturate to `i32` before the
/// final 16-bit wrap.
pub(crate) fn round_ties_away(value: f64) -> i32 {
    if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}

/******************************************************************************/

impl Add for Q14 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl Sub for Q14 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
}

impl Neg for Q14 {
    type Output = Self;

    fn neg(self) -> Self {
        self.wrapping_neg()
    }
}

impl From<i16> for Q14 {
    fn from(raw: i16) -> Self {
        Self(raw)
    }
}

impl From<Q14> for i16 {
    fn from(value: Q14) -> Self {
        value.0
    }
}

impl fmt::Display for Q14 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl fmt::Debug for Q14 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q14({} = {})", self.0, self.to_f64())
    }
}

/******************************************************************************/
