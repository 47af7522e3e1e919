/* embcordic | angle.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Conversions for the default angle encoding, where ±90° is ±16384 */

/******************************************************************************/

use crate::config::AngleScale;
use crate::fixed::Q14;

/******************************************************************************/

/// round(degrees * 16384 / 90)
///
/// Angles beyond ±180° wrap; anything outside ±90° is accepted but does not converge.
pub fn from_degrees(degrees: f64) -> Q14 {
    AngleScale::default().from_degrees(degrees)
}

pub fn to_degrees(angle: Q14) -> f64 {
    AngleScale::default().to_degrees(angle)
}

pub fn from_radians(radians: f64) -> Q14 {
    AngleScale::default().from_radians(radians)
}

pub fn to_radians(angle: Q14) -> f64 {
    AngleScale::default().to_radians(angle)
}

/******************************************************************************/
