//! Ray start jitter noise.
//!
//! The ray marcher offsets each ray's first sample by a per-pixel random
//! fraction of the step length to hide wood-grain artifacts. The noise comes
//! from an explicitly seeded generator, so the same seed always produces the
//! same texture.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates one random byte per pixel of a `width` x `height` viewport.
pub fn jitter_noise(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = width as usize * height as usize;
    (0..len).map(|_| rng.gen::<u8>()).collect()
}
