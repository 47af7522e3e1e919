/* embcordic | config.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/******************************************************************************/

use crate::error::ConfigError;
use crate::fixed::{round_ties_away, Q14};

/******************************************************************************/

/// How the CORDIC gain is handled
///
/// The pipeline never cancels the gain itself. This only selects the default starting vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gain {
    /// Start from (1.0, 0.0): outputs are (K·cos θ, K·sin θ)
    #[default]
    Uncorrected,
    /// Start from (1/K, 0.0): outputs approximate (cos θ, sin θ)
    PreScaled,
}

impl Gain {
    /// Default x0 for a pipeline of depth `N`
    pub fn initial_x<const N: usize>(self) -> Q14 {
        match self {
            Gain::Uncorrected => Q14::ONE,
            Gain::PreScaled => Q14::from_f64(crate::cordic::inverse_gain::<N>()),
        }
    }
}

/******************************************************************************/

/// Angle encoding: the raw code that stands for +90°
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngleScale {
    quarter_turn: i16,
}

impl AngleScale {
    /// ±90° maps to ±16384, so 45° is 8192
    pub const QUARTER_TURN_16384: Self = Self { quarter_turn: 16384 };

    pub fn new(quarter_turn: i16) -> Result<Self, ConfigError> {
        if (1..=16384).contains(&quarter_turn) {
            Ok(Self { quarter_turn })
        } else {
            Err(ConfigError::InvalidScale { found: quarter_turn })
        }
    }

    pub const fn quarter_turn(self) -> i16 {
        self.quarter_turn
    }

    /// Raw codes per radian
    pub fn per_radian(self) -> f64 {
        self.quarter_turn as f64 / core::f64::consts::FRAC_PI_2
    }

    /// round(degrees * quarter_turn / 90), wrapping outside of the 16-bit range
    pub fn from_degrees(self, degrees: f64) -> Q14 {
        Q14::from_raw(round_ties_away(degrees * self.quarter_turn as f64 / 90.0) as i16)
    }

    pub fn to_degrees(self, angle: Q14) -> f64 {
        angle.raw() as f64 * 90.0 / self.quarter_turn as f64
    }

    pub fn from_radians(self, radians: f64) -> Q14 {
        Q14::from_raw(round_ties_away(radians * self.per_radian()) as i16)
    }

    pub fn to_radians(self, angle: Q14) -> f64 {
        angle.raw() as f64 / self.per_radian()
    }
}

impl Default for AngleScale {
    fn default() -> Self {
        Self::QUARTER_TURN_16384
    }
}

/******************************************************************************/

/// Pipeline configuration
///
/// ```
/// use embcordic::{AngleScale, Config, Gain};
///
/// let config = Config::default()
///     .gain(Gain::PreScaled)
///     .scale(AngleScale::new(8192).unwrap());
/// assert_eq!(config.angle_scale().quarter_turn(), 8192);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    gain: Gain,
    scale: AngleScale,
}

impl Config {
    pub fn gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        self
    }

    pub fn scale(mut self, scale: AngleScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn gain_mode(&self) -> Gain {
        self.gain
    }

    pub fn angle_scale(&self) -> AngleScale {
        self.scale
    }
}

/******************************************************************************/
