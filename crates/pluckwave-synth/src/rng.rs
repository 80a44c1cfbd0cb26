//! Deterministic RNG using PCG32.
//!
//! All randomness in the engine flows through this module. There is no
//! process-wide generator: callers pass the seed explicitly, so repeated and
//! concurrent renders see exactly the same excitation noise.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}
