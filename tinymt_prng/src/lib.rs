// Tunable, deterministic TinyMT32 pseudo-random number generator.
//
// Implements TinyMT32 (Saito & Matsumoto, 2011), the small-state member of
// the Mersenne Twister family: 127 bits of state, a 2^127 - 1 period, and a
// 96-bit tuning triple (mat1, mat2, tmat) that selects the concrete
// recurrence. This is a hand-rolled implementation with zero external RNG
// dependencies, chosen so that output is bit-identical to the reference
// implementation on every platform.
//
// This crate is the generator core only: state, seeding, and the two draw
// paths (integer tempering and float tempering). Seed coordination and
// range mapping live in `tinymt_rand`, which owns the host-facing
// rand/srand semantics.
//
// **Critical constraint: determinism.** Every method on `TinyMt32` must
// produce identical output given the same prior state, regardless of
// platform, compiler version, or optimization level. The float path uses
// bit-level mantissa packing, not floating-point arithmetic on the state,
// so it is exactly reproducible as well.

use serde::{Deserialize, Serialize};

const SH0: u32 = 1;
const SH1: u32 = 10;
const SH8: u32 = 8;
const MASK: u32 = 0x7fff_ffff;
const MIN_LOOP: usize = 8;
const PRE_LOOP: usize = 8;

/// Seed applied at construction so a generator is never in an undefined
/// state. Callers wanting a specific stream reseed via [`TinyMt32::seed`].
const DEFAULT_SEED: u32 = 1;

/// The tuning triple selecting a concrete TinyMT32 recurrence.
///
/// The three values parameterize the state transition (`mat1`, `mat2`) and
/// the output tempering (`tmat`). They are fixed for the lifetime of a
/// generator. No combination is rejected here — degenerate triples produce
/// a poor generator, not an error, matching the reference implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuningParams {
    pub mat1: u32,
    pub mat2: u32,
    pub tmat: u32,
}

impl TuningParams {
    /// The parameter set published with the reference implementation
    /// (also the set fixed by RFC 8682 for FECFRAME use).
    pub const REFERENCE: TuningParams = TuningParams {
        mat1: 0x8f70_11ee,
        mat2: 0xfc78_ff1f,
        tmat: 0x3793_fdff,
    };

    pub const fn new(mat1: u32, mat2: u32, tmat: u32) -> Self {
        TuningParams { mat1, mat2, tmat }
    }

    /// Build a triple from floating-point values.
    ///
    /// Host runtimes hand tuning constants through as floats; each value is
    /// truncated toward zero, saturating at the `u32` range (NaN maps to 0).
    pub fn from_f64(mat1: f64, mat2: f64, tmat: f64) -> Self {
        TuningParams {
            mat1: mat1 as u32,
            mat2: mat2 as u32,
            tmat: tmat as u32,
        }
    }
}

/// TinyMT32 generator: four 32-bit state words plus the tuning triple.
///
/// Each instance is exclusively owned by whoever draws from it; there is no
/// interior mutability and no sharing. Construction seeds the state with a
/// fixed default so every draw is defined and deterministic; an explicit
/// [`seed`](TinyMt32::seed) call selects a specific stream. Serialization
/// captures the full state, so a restored generator continues the exact
/// sequence it left off.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TinyMt32 {
    status: [u32; 4],
    params: TuningParams,
}

impl TinyMt32 {
    /// Create a generator with the given tuning triple, seeded with the
    /// fixed default seed.
    pub fn new(params: TuningParams) -> Self {
        let mut rng = TinyMt32 {
            status: [0; 4],
            params,
        };
        rng.seed(DEFAULT_SEED);
        rng
    }

    /// The tuning triple this generator was constructed with.
    pub fn params(&self) -> TuningParams {
        self.params
    }

    /// Reinitialize the state from a 32-bit seed.
    ///
    /// Fully overwrites the state words: Knuth-style mixing over the seed
    /// and tuning triple, the all-zero escape (period certification), then
    /// eight warm-up transitions, exactly as the reference `tinymt32_init`.
    /// Reseeding with the same value reproduces the subsequent output
    /// sequence byte-for-byte.
    pub fn seed(&mut self, seed: u32) {
        self.status = [seed, self.params.mat1, self.params.mat2, self.params.tmat];
        for i in 1..MIN_LOOP {
            let prev = self.status[(i - 1) & 3];
            self.status[i & 3] ^=
                (i as u32).wrapping_add(1_812_433_253u32.wrapping_mul(prev ^ (prev >> 30)));
        }
        self.period_certification();
        for _ in 0..PRE_LOOP {
            self.next_state();
        }
    }

    /// Advance the state by one transition and return the tempered word.
    pub fn next_u32(&mut self) -> u32 {
        self.next_state();
        self.temper()
    }

    /// Advance the state by one transition and return a uniform `f32` in
    /// [0, 1).
    ///
    /// Uses the reference float tempering path: the tempered bits are
    /// packed into the mantissa of a float in [1, 2), then 1.0 is
    /// subtracted. This is an independent draw, not a division of
    /// [`next_u32`](TinyMt32::next_u32)'s output — the two paths share the
    /// state transition but not the output mapping.
    pub fn next_f32(&mut self) -> f32 {
        self.next_state();
        self.temper_conv() - 1.0
    }

    /// One step of the twisted recurrence over the four state words.
    fn next_state(&mut self) {
        let mut y = self.status[3];
        let mut x = (self.status[0] & MASK) ^ self.status[1] ^ self.status[2];
        x ^= x << SH0;
        y ^= (y >> SH0) ^ x;
        self.status[0] = self.status[1];
        self.status[1] = self.status[2];
        self.status[2] = x ^ (y << SH1);
        self.status[3] = y;
        // Conditional matrix application, branch-free: all-ones when y is
        // odd, zero otherwise.
        let odd = (y & 1).wrapping_neg();
        self.status[1] ^= odd & self.params.mat1;
        self.status[2] ^= odd & self.params.mat2;
    }

    /// Integer output tempering.
    fn temper(&self) -> u32 {
        let mut t0 = self.status[3];
        let t1 = self.status[0].wrapping_add(self.status[2] >> SH8);
        t0 ^= t1;
        if t1 & 1 != 0 {
            t0 ^= self.params.tmat;
        }
        t0
    }

    /// Float output tempering: tempered bits packed into [1, 2).
    ///
    /// When `t1` is odd the reference applies `tmat` *and* sets the low
    /// mantissa bit (it ORs 0x3f800001, not 0x3f800000).
    fn temper_conv(&self) -> f32 {
        let mut t0 = self.status[3];
        let t1 = self.status[0].wrapping_add(self.status[2] >> SH8);
        t0 ^= t1;
        let odd = (t1 & 1).wrapping_neg();
        let bits = ((t0 ^ (odd & self.params.tmat)) >> 9) | 0x3f80_0000 | (t1 & 1);
        f32::from_bits(bits)
    }

    /// Escape the all-zero state, which the recurrence can never leave.
    /// Only the low 127 bits count; `status[0]`'s top bit is ignored.
    fn period_certification(&mut self) {
        if self.status[0] & MASK == 0
            && self.status[1] == 0
            && self.status[2] == 0
            && self.status[3] == 0
        {
            self.status = [u32::from(b'T'), u32::from(b'I'), u32::from(b'N'), u32::from(b'Y')];
        }
    }
}
