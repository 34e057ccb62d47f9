// tinymt_rand — rand/srand seeding semantics over the TinyMT32 core.
//
// This crate layers the host-facing generator protocol on top of
// `tinymt_prng::TinyMt32`: seed normalization, the process-wide fallback
// seed shared by instances that have not been explicitly seeded, and the
// mapping from raw 32-bit words to bounded integers and [0, 1) floats.
// Host-runtime glue (method dispatch, arity checks, type coercion) stays
// above this crate; everything here takes already-coerced values.
//
// Module overview:
// - `seeding.rs`:  Seed normalization, `SharedSeed` (the injectable
//                  fallback-seed cell), explicit/default seed application,
//                  and the seed-on-first-draw path.
// - `range.rs`:    `Draw` (the value handed back to the host) and the
//                  bounded-integer mapping with its sign-normalization rule.
// - `instance.rs`: `TinyMtRand` — one generator per host object, exposing
//                  `rand(bound)` / `srand(seed)` with the bound-0-means-
//                  float routing.
//
// Design decisions:
// - **The fallback seed is injected, not global.** The classic embedding
//   keeps one process-wide seed cell; here it is an explicit `SharedSeed` passed
//   by reference into every call that touches it, so tests can run isolated
//   cells and embedders decide the sharing scope. A process that wants the
//   classic behavior keeps a single `SharedSeed` for all instances.
// - **Truncated modulo for bounded draws.** `word % bound` carries a small
//   low-order bias for bounds that do not divide 2^32. That bias is part of
//   the protocol being reproduced and is kept as-is, unlike the
//   rejection-sampling ranges a general-purpose generator would use.
// - **Clean entropy for the default seed.** The time-derived seed mixes in
//   one word from the OS entropy source rather than a draw from the
//   not-yet-seeded generator, which would read effectively constant state.

pub mod instance;
pub mod range;
pub mod seeding;

pub use instance::TinyMtRand;
pub use range::{Draw, bounded_int, normalize_bound};
pub use seeding::{
    SharedSeed, apply_default_seed, apply_explicit_seed, ensure_seeded_for_draw, normalize_seed,
};

// Re-export the core so embedders need only this crate.
pub use tinymt_prng::{TinyMt32, TuningParams};
