//! Seed derivation.
//!
//! Every chunk of games and every start gets its own RNG stream derived from
//! the base seed, so results do not depend on how Rayon schedules work.

/// One round of SplitMix64.
pub fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive a child seed from a base seed and a sequence of keys.
pub fn derive_seed(base: u64, keys: &[u64]) -> u64 {
    keys.iter()
        .fold(splitmix64(base), |acc, &k| splitmix64(acc ^ splitmix64(k)))
}
