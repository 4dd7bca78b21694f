use crate::Float;
use fastrand::Rng;

/// A helper trait to get feature-gated floating-point random values
pub trait SampleFloat {
    /// Get a random value from the standard uniform distribution on `[0, 1)`
    fn float(&mut self) -> Float;
}
impl SampleFloat for Rng {
    #[cfg(not(feature = "f32"))]
    fn float(&mut self) -> Float {
        self.f64()
    }
    #[cfg(feature = "f32")]
    fn float(&mut self) -> Float {
        self.f32()
    }
}

/// Derive the seed of an independent random stream from a base seed and a stream index.
///
/// The same `(seed, index)` pair always yields the same stream, whichever thread asks for it.
pub fn stream_seed(seed: u64, index: usize) -> u64 {
    // splitmix64 finalizer
    let mut z = seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
