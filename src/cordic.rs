use crate::fixed::Q14;
use crate::table::{AngleTable, K_TABLE};

/// Working vector of one CORDIC computation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rotation {
    pub x: Q14,
    pub y: Q14,
    /// Residual angle still to rotate by
    pub z: Q14,
}

impl Rotation {
    pub const fn new(x: Q14, y: Q14, z: Q14) -> Self {
        Self { x, y, z }
    }
}

/// One micro-rotation by ±arctan(2^-i)
///
/// The direction follows the sign of the residual angle, with zero counting as positive.
/// All three outputs are derived from the same input vector.
#[inline]
pub fn step<const N: usize>(i: usize, table: &AngleTable<N>, r: Rotation) -> Rotation {
    let shift = i as u32;
    let (dx, dy) = (r.y.asr(shift), r.x.asr(shift));
    let theta = table.get(i);
    if r.z.is_negative() {
        Rotation::new(r.x + dx, r.y - dy, r.z + theta)
    } else {
        Rotation::new(r.x - dx, r.y + dy, r.z - theta)
    }
}

/// Applies all `N` micro-rotations in sequence
///
/// This is the blocking equivalent of pushing one request through a [`crate::CordicPipeline`].
pub fn rotate<const N: usize>(table: &AngleTable<N>, mut r: Rotation) -> Rotation {
    let mut i = 0;
    while i < N {
        r = step(i, table, r);
        i += 1;
    }
    r
}

/// Magnitude gain K of an `N` stage rotation
pub fn gain<const N: usize>() -> f64 {
    1.0 / inverse_gain::<N>()
}

/// 1 / K, the x0 that makes an `N` stage rotation return unit vectors
pub fn inverse_gain<const N: usize>() -> f64 {
    K_TABLE[N - 1]
}

/******************************************************************************/
