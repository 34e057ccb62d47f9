// Range mapping: raw 32-bit words to bounded integers, and the `Draw`
// value handed back to the host layer.
//
// Bound 0 is a routing sentinel, not a degenerate range: it selects the
// float draw path at the instance layer and must never reach
// `bounded_int`. Negative bounds are sign-normalized the same way seeds
// are in `seeding::normalize_seed`.

use serde::{Deserialize, Serialize};

/// A completed draw: either a bounded non-negative integer or a unit-
/// interval float, depending on how the host called `rand`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Draw {
    /// Integer in `[0, bound)`.
    Int(u32),
    /// Float in `[0, 1)`.
    Float(f32),
}

impl Draw {
    pub fn as_int(self) -> Option<u32> {
        match self {
            Draw::Int(v) => Some(v),
            Draw::Float(_) => None,
        }
    }

    pub fn as_float(self) -> Option<f32> {
        match self {
            Draw::Float(v) => Some(v),
            Draw::Int(_) => None,
        }
    }
}

/// Map a raw word into `[0, bound)` by truncated modulo.
///
/// The modulo carries a small low-order bias for bounds that do not evenly
/// divide 2^32. That bias is part of the rand protocol's contract and is
/// deliberately not replaced with rejection sampling.
///
/// Panics if `bound == 0` — that is the float-mode sentinel and callers
/// must route it before mapping.
pub fn bounded_int(word: u32, bound: u32) -> u32 {
    assert!(
        bound > 0,
        "bounded_int: bound 0 selects a float draw and must not reach the integer mapping"
    );
    word % bound
}

/// Normalize a caller-supplied bound: magnitude of negative input, then
/// truncation to 32 bits. Mirrors seed normalization. A result of 0 means
/// "draw a float".
pub fn normalize_bound(raw: i64) -> u32 {
    raw.unsigned_abs() as u32
}
