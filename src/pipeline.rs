/* embcordic | pipeline.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Fully pipelined CORDIC rotation */

/******************************************************************************/

use log::{debug, trace};

use crate::config::Config;
use crate::cordic::{self, Rotation};
use crate::error::ConfigError;
use crate::fixed::Q14;
use crate::table::AngleTable;

/******************************************************************************/

/// Pipeline depth used throughout the crate unless stated otherwise
pub const STAGES: usize = 16;

/// One angle to rotate by
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CordicRequest {
    /// z0, in the pipeline's angle encoding
    pub angle: Q14,
    /// Starting x; the pipeline's configured default is used when absent
    pub x0: Option<Q14>,
}

impl CordicRequest {
    pub const fn new(angle: Q14) -> Self {
        Self { angle, x0: None }
    }

    /// Starts from (x0, 0) instead of the configured vector, e.g. to cancel the gain
    pub const fn with_x0(angle: Q14, x0: Q14) -> Self {
        Self { angle, x0: Some(x0) }
    }
}

impl From<Q14> for CordicRequest {
    fn from(angle: Q14) -> Self {
        Self::new(angle)
    }
}

/// A completed rotation
///
/// `x` and `y` are G·cos θ and G·sin θ, where G is the CORDIC gain for an uncorrected starting
/// vector or 1 for a pre-scaled one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CordicResult {
    pub x: Q14,
    pub y: Q14,
    /// The requested z0
    pub angle: Q14,
}

impl CordicResult {
    pub fn cos(&self) -> Q14 {
        self.x
    }

    pub fn sin(&self) -> Q14 {
        self.y
    }
}

/******************************************************************************/

/// Pipeline occupancy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// No computation in flight
    Idle,
    /// At least one slot occupied
    Running
}

/// Pipeline register between two stages
///
/// Zero is a legitimate value for every field, so occupancy is tracked separately.
#[derive(Clone, Copy, Debug)]
struct Slot {
    occupied: bool,
    rotation: Rotation,
    angle: Q14
}

impl Slot {
    const EMPTY: Self = Self {
        occupied: false,
        rotation: Rotation::new(Q14::ZERO, Q14::ZERO, Q14::ZERO),
        angle: Q14::ZERO
    };

    fn load(angle: Q14, x0: Q14) -> Self {
        Self {
            occupied: true,
            rotation: Rotation::new(x0, Q14::ZERO, angle),
            angle
        }
    }
}

/******************************************************************************/

/// The pipelined CORDIC engine
///
/// Slot `k` holds a computation that has gone through `k` micro-rotations. Every tick, each
/// occupied slot goes through its stage and moves one slot further, a new request may enter slot
/// 0, and the computation leaving the last slot is returned. A request accepted on one tick is
/// therefore returned exactly `N` ticks later, in submission order.
///
/// ```
/// use embcordic::{CordicPipeline, CordicRequest, Q14};
///
/// let mut cordic = CordicPipeline::<16>::default();
/// assert!(cordic.tick(Some(CordicRequest::new(Q14::ZERO))).is_none());
/// for _ in 0..15 {
///     assert!(cordic.tick(None).is_none());
/// }
/// let result = cordic.tick(None).unwrap();
/// assert_eq!(result.x.raw(), 26982);
/// assert!(cordic.is_idle());
/// ```
pub struct CordicPipeline<const N: usize = STAGES> {
    config: Config,
    table: AngleTable<N>,
    x0: Q14,
    slots: [Slot; N],
    ticks: u64
}

impl<const N: usize> CordicPipeline<N> {
    /// Builds a pipeline and its angle table
    ///
    /// Fails if the configuration cannot produce a valid angle table.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let table = AngleTable::new(config.angle_scale())?;
        Ok(Self::with_table(config, table))
    }

    /// Builds a pipeline around an already validated table
    ///
    /// The table's encoding takes precedence over the one named in `config`.
    pub fn with_table(config: Config, table: AngleTable<N>) -> Self {
        let x0 = config.gain_mode().initial_x::<N>();
        debug!("CORDIC pipeline: {} stages, {:?} gain, x0 = {}", N, config.gain_mode(), x0.raw());
        Self {
            config,
            table,
            x0,
            slots: [Slot::EMPTY; N],
            ticks: 0
        }
    }

    /// Advances every stage by one clock
    ///
    /// `input` is accepted into the first stage. The return value is the computation leaving the
    /// last stage, if there was one.
    pub fn tick(&mut self, input: Option<CordicRequest>) -> Option<CordicResult> {
        let last = self.slots[N - 1];
        let output = if last.occupied {
            let r = cordic::step(N - 1, &self.table, last.rotation);
            Some(CordicResult { x: r.x, y: r.y, angle: last.angle })
        } else {
            None
        };

        // Back to front, so each slot is read before its predecessor overwrites it
        for k in (0..N - 1).rev() {
            let slot = self.slots[k];
            self.slots[k + 1] = if slot.occupied {
                Slot {
                    rotation: cordic::step(k, &self.table, slot.rotation),
                    ..slot
                }
            } else {
                Slot::EMPTY
            };
        }

        self.slots[0] = match input {
            Some(request) => Slot::load(request.angle, request.x0.unwrap_or(self.x0)),
            None => Slot::EMPTY
        };
        self.ticks = self.ticks.wrapping_add(1);

        if let Some(result) = &output {
            trace!("tick {}: z0 = {} -> x = {}, y = {}", self.ticks, result.angle.raw(), result.x.raw(), result.y.raw());
        }
        output
    }

    /// Empties every stage
    ///
    /// Pending computations are dropped and the tick counter restarts from zero.
    pub fn reset(&mut self) {
        debug!("CORDIC pipeline reset, {} computations dropped", self.in_flight());
        self.slots = [Slot::EMPTY; N];
        self.ticks = 0;
    }

    /// Ticks without input until every pending computation has left the pipeline
    ///
    /// ```
    /// use embcordic::{CordicPipeline, CordicRequest, Q14};
    ///
    /// let mut cordic = CordicPipeline::<16>::default();
    /// cordic.tick(Some(CordicRequest::new(Q14::from_raw(100))));
    /// cordic.tick(Some(CordicRequest::new(Q14::from_raw(200))));
    /// let angles: Vec<i16> = cordic.flush().map(|r| r.angle.raw()).collect();
    /// assert_eq!(angles, [100, 200]);
    /// ```
    pub fn flush(&mut self) -> Flush<'_, N> {
        Flush { pipeline: self }
    }

    /// Feeds one request per tick, then flushes
    ///
    /// Results of computations already in flight come out first, followed by exactly one result
    /// per input, in order.
    ///
    /// ```
    /// use embcordic::{AngleScale, CordicPipeline};
    ///
    /// let scale = AngleScale::default();
    /// let mut cordic = CordicPipeline::<16>::default();
    /// let angles = [0.0, 30.0, 45.0].map(|deg| scale.from_degrees(deg));
    /// let sines: Vec<i16> = cordic.stream(angles).map(|r| r.sin().raw()).collect();
    /// assert_eq!(sines, [1, 13492, 19080]);
    /// ```
    pub fn stream<I>(&mut self, inputs: I) -> Stream<'_, N, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<CordicRequest>
    {
        Stream {
            pipeline: self,
            inputs: inputs.into_iter().fuse()
        }
    }

    pub fn state(&self) -> State {
        if self.slots.iter().any(|slot| slot.occupied) {
            State::Running
        } else {
            State::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state() == State::Idle
    }

    /// Number of computations currently in flight
    pub fn in_flight(&self) -> usize {
        self.slots.iter().filter(|slot| slot.occupied).count()
    }

    /// Ticks since construction or the last reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks from acceptance to completion
    pub const fn latency(&self) -> usize {
        N
    }

    /// x0 used for requests that do not bring their own
    pub fn initial_x(&self) -> Q14 {
        self.x0
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn table(&self) -> &AngleTable<N> {
        &self.table
    }
}

impl<const N: usize> Default for CordicPipeline<N> {
    fn default() -> Self {
        Self::with_table(Config::default(), AngleTable::default())
    }
}

/******************************************************************************/

/// Iterator returned by [`CordicPipeline::flush()`]
pub struct Flush<'a, const N: usize> {
    pipeline: &'a mut CordicPipeline<N>
}

impl<const N: usize> Iterator for Flush<'_, N> {
    type Item = CordicResult;

    fn next(&mut self) -> Option<CordicResult> {
        while !self.pipeline.is_idle() {
            if let Some(result) = self.pipeline.tick(None) {
                return Some(result);
            }
        }
        None
    }
}

/// Iterator returned by [`CordicPipeline::stream()`]
pub struct Stream<'a, const N: usize, I> {
    pipeline: &'a mut CordicPipeline<N>,
    inputs: core::iter::Fuse<I>
}

impl<const N: usize, I> Iterator for Stream<'_, N, I>
where
    I: Iterator,
    I::Item: Into<CordicRequest>
{
    type Item = CordicResult;

    fn next(&mut self) -> Option<CordicResult> {
        loop {
            let input = self.inputs.next().map(Into::into);
            if input.is_none() && self.pipeline.is_idle() {
                return None;
            }
            if let Some(result) = self.pipeline.tick(input) {
                return Some(result);
            }
        }
    }
}

/******************************************************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Gain;
    use crate::cordic::rotate;

    fn request(raw: i16) -> Option<CordicRequest> {
        Some(CordicRequest::new(Q14::from_raw(raw)))
    }

    #[test]
    fn test_latency() {
        let mut cordic = CordicPipeline::<16>::default();
        assert!(cordic.tick(request(1234)).is_none());
        for _ in 1..16 {
            assert!(cordic.tick(None).is_none());
        }
        let result = cordic.tick(None).unwrap();
        assert_eq!(result.angle.raw(), 1234);
        assert_eq!(cordic.ticks(), 17);
    }

    #[test]
    fn test_matches_serial_rotation() {
        let mut cordic = CordicPipeline::<16>::default();
        let table = AngleTable::<16>::default();
        let angles: [i16; 5] = [0, 5461, -5461, 16384, -16384];
        let results: Vec<CordicResult> = cordic.stream(angles.map(Q14::from_raw)).collect();
        assert_eq!(results.len(), angles.len());
        for (result, z) in results.iter().zip(angles) {
            let r = rotate(&table, Rotation::new(Q14::ONE, Q14::ZERO, Q14::from_raw(z)));
            assert_eq!((result.x, result.y), (r.x, r.y));
            assert_eq!(result.angle.raw(), z);
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut cordic = CordicPipeline::<4>::default();
        assert_eq!(cordic.state(), State::Idle);
        cordic.tick(request(10));
        assert_eq!(cordic.state(), State::Running);
        cordic.tick(request(20));
        assert_eq!(cordic.in_flight(), 2);
        assert_eq!(cordic.flush().count(), 2);
        assert_eq!(cordic.state(), State::Idle);
    }

    #[test]
    fn test_full_pipeline_accepts_input() {
        let mut cordic = CordicPipeline::<4>::default();
        for z in 0..4 {
            assert!(cordic.tick(request(z)).is_none());
        }
        assert_eq!(cordic.in_flight(), 4);
        assert_eq!(cordic.tick(request(4)).map(|r| r.angle.raw()), Some(0));
        assert_eq!(cordic.in_flight(), 4);
    }

    #[test]
    fn test_request_x0_overrides_config() {
        let mut cordic = CordicPipeline::<16>::default();
        cordic.tick(Some(CordicRequest::with_x0(Q14::ZERO, Q14::from_raw(9949))));
        let result = cordic.flush().next().unwrap();
        assert_eq!((result.x.raw(), result.y.raw()), (16383, 4));
    }

    #[test]
    fn test_prescaled_config() {
        let mut cordic = CordicPipeline::<16>::new(Config::default().gain(Gain::PreScaled)).unwrap();
        assert_eq!(cordic.initial_x().raw(), 9949);
        let result = cordic.stream([Q14::from_raw(16384)]).next().unwrap();
        assert_eq!((result.cos().raw(), result.sin().raw()), (2, 16383));
    }

    #[test]
    fn test_reset() {
        let mut cordic = CordicPipeline::<16>::default();
        cordic.tick(request(100));
        cordic.tick(request(200));
        cordic.reset();
        assert!(cordic.is_idle());
        assert_eq!(cordic.ticks(), 0);
        assert_eq!(cordic.flush().next(), None);
    }

    #[test]
    fn test_single_stage() {
        let mut cordic = CordicPipeline::<1>::default();
        assert!(cordic.tick(request(5000)).is_none());
        let result = cordic.tick(None).unwrap();
        assert_eq!((result.x.raw(), result.y.raw()), (16384, 16384));
    }
}
