// Seed coordination: normalization, the shared fallback seed, and the
// explicit/default/draw-time seeding paths.
//
// The protocol has three ways a generator gets seeded:
// - `apply_explicit_seed`: srand with a value — seed the instance, publish
//   the value as the shared fallback, hand back the previous fallback.
// - `apply_default_seed`: srand with no value — derive a seed from the
//   clock plus OS entropy and seed the instance. Publishing the derived
//   value is the caller's job; this function only seeds.
// - `ensure_seeded_for_draw`: runs before every rand call — if no fallback
//   has ever been established, derive one, seed this instance with it, and
//   publish it. One critical section, so concurrent embedders cannot
//   observe check-then-set races on the fallback cell.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use tinymt_prng::TinyMt32;

/// Normalize a caller-supplied seed: negative input is replaced by its
/// magnitude, then the value is truncated to 32 bits. Seed 0 is legal and
/// gets no special treatment.
pub fn normalize_seed(raw: i64) -> u32 {
    raw.unsigned_abs() as u32
}

/// The fallback seed shared by every instance that has not been explicitly
/// seeded.
///
/// Starts unset; set the first time any instance is explicitly seeded, or
/// the first time any instance is drawn from before that. Passed by
/// reference into the seeding calls rather than living in a process global,
/// so the sharing scope is the embedder's choice and tests stay isolated.
///
/// Both mutating operations (exchange, set-if-unset) are single critical
/// sections. The cell holds a bare scalar, so a panic while the lock is
/// held cannot leave it half-written; lock acquisition therefore recovers
/// from poisoning instead of propagating it.
#[derive(Debug, Default)]
pub struct SharedSeed {
    cell: Mutex<Option<u32>>,
}

impl SharedSeed {
    pub const fn new() -> Self {
        SharedSeed {
            cell: Mutex::new(None),
        }
    }

    /// The current fallback seed, if one has been established.
    pub fn get(&self) -> Option<u32> {
        *self.lock()
    }

    /// Set the fallback seed, returning the previous value.
    pub fn exchange(&self, seed: u32) -> Option<u32> {
        self.lock().replace(seed)
    }

    fn lock(&self) -> MutexGuard<'_, Option<u32>> {
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Seed `state` with a caller-supplied value and publish it as the shared
/// fallback.
///
/// Returns the *previous* fallback (None on first use). This is an
/// exchange, not a pure setter — it is the only place the old fallback
/// value is observable.
pub fn apply_explicit_seed(state: &mut TinyMt32, shared: &SharedSeed, raw: i64) -> Option<u32> {
    let seed = normalize_seed(raw);
    state.seed(seed);
    shared.exchange(seed)
}

/// Seed `state` with a freshly derived time-and-entropy seed and return the
/// derived value.
///
/// Does not touch the shared fallback; whether the derived seed is
/// published is decided at the call site (`srand` with no argument
/// publishes it, the draw path publishes it via
/// [`ensure_seeded_for_draw`]).
pub fn apply_default_seed(state: &mut TinyMt32) -> u32 {
    let seed = derive_default_seed();
    state.seed(seed);
    seed
}

/// Seed-on-first-draw: establish the fallback exactly once.
///
/// If the fallback is unset, derive a default seed, apply it to `state`,
/// and store it as the fallback — all under one lock. If the fallback is
/// already set, this is a no-op: the instance's own state (default-seeded
/// at construction, or explicitly seeded earlier) is used as-is, and the
/// fallback is never re-applied to it.
pub fn ensure_seeded_for_draw(state: &mut TinyMt32, shared: &SharedSeed) {
    let mut cell = shared.lock();
    if cell.is_none() {
        *cell = Some(apply_default_seed(state));
    }
}

/// Wall-clock seconds plus one word of OS entropy, sign-normalized like an
/// explicit seed. Second resolution on the clock is deliberate — the
/// entropy word is what separates two derivations within the same second.
fn derive_default_seed() -> u32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    normalize_seed((secs as i64).wrapping_add(i64::from(entropy_word())))
}

/// One word from the OS entropy source, degrading to sub-second clock bits
/// if the source is unavailable, so seed derivation itself never fails.
fn entropy_word() -> u32 {
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf),
        Err(_) => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos(),
    }
}
