/* embcordic | lib.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Pipelined fixed-point CORDIC sine / cosine */

/******************************************************************************/

#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]

/******************************************************************************/

pub mod angle;
pub mod cordic;
mod config;
mod error;
mod fixed;
mod pipeline;
mod table;

/******************************************************************************/

pub use config::{AngleScale, Config, Gain};
pub use cordic::Rotation;
pub use error::ConfigError;
pub use fixed::{FRAC_BITS, Q14};
pub use pipeline::{CordicPipeline, CordicRequest, CordicResult, Flush, State, Stream, STAGES};
pub use table::{AngleTable, Rounding};

/// Pipeline with the default depth of 16 stages
pub type Cordic = CordicPipeline<STAGES>;
